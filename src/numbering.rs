//! Clue numbering derived from grid topology alone.
//!
//! Numbers are recomputed from scratch on every call: a row-major scan over
//! all `size²` coordinates, so O(gridSize²) per call. There is no incremental
//! state to keep in sync with the grid.

use crate::grid::{Coord, Direction, Grid};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How strictly a cell has to look like the start of an entry to get a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberingRule {
    /// The following cell only needs to be inside the grid and not blocked.
    /// Can number a lettered cell with nothing after it.
    #[default]
    GridSpace,
    /// The following cell must hold a letter.
    Occupied,
}

/// Which entries begin at a numbered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Start {
    pub number: u32,
    pub across: bool,
    pub down: bool,
}

impl Start {
    #[must_use]
    pub fn begins(&self, direction: Direction) -> bool {
        match direction {
            Direction::Across => self.across,
            Direction::Down => self.down,
        }
    }
}

/// Coordinate → clue number, using [`NumberingRule::GridSpace`].
#[must_use]
pub fn number_cells(grid: &Grid) -> BTreeMap<Coord, u32> {
    starts(grid, NumberingRule::GridSpace)
        .into_iter()
        .map(|(coord, start)| (coord, start.number))
        .collect()
}

/// Every numbered cell with the directions that begin there.
///
/// Cells are scanned y outer, x inner; absent and blocked cells are skipped.
/// A cell gets the next number if an entry begins there across or down: the
/// previous cell in that direction is absent, blocked or off the grid, and
/// the next one qualifies under `rule`.
#[must_use]
pub fn starts(grid: &Grid, rule: NumberingRule) -> BTreeMap<Coord, Start> {
    let size = grid.size();
    let mut result = BTreeMap::new();
    let mut next_number = 1;

    for y in 0..size {
        for x in 0..size {
            match grid.get(x, y) {
                Some(cell) if !cell.is_blocked => {}
                _ => continue,
            }

            let across = begins(grid, rule, x, y, Direction::Across);
            let down = begins(grid, rule, x, y, Direction::Down);
            if across || down {
                result.insert((x, y), Start { number: next_number, across, down });
                next_number += 1;
            }
        }
    }

    result
}

fn begins(grid: &Grid, rule: NumberingRule, x: usize, y: usize, direction: Direction) -> bool {
    let (prev, next) = match direction {
        Direction::Across => (x.checked_sub(1).map(|px| (px, y)), (x + 1, y)),
        Direction::Down => (y.checked_sub(1).map(|py| (x, py)), (x, y + 1)),
    };

    let prev_open = match prev {
        None => true,
        Some((px, py)) => match grid.get(px, py) {
            None => true,
            Some(cell) => cell.is_blocked,
        },
    };
    if !prev_open {
        return false;
    }

    let (nx, ny) = next;
    if !grid.in_bounds(nx, ny) {
        return false;
    }
    match rule {
        NumberingRule::GridSpace => !grid.is_blocked(nx, ny),
        NumberingRule::Occupied => grid.letter_at(nx, ny).is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Board;
    use crate::word::Word;

    #[test]
    fn test_single_word_gets_number_one() {
        let mut b = Board::new(5);
        b.place(&Word::new(0, "katt", ""), 0, 0, Direction::Across).unwrap();

        let numbers = number_cells(b.grid());
        assert_eq!(numbers.get(&(0, 0)), Some(&1));
    }

    #[test]
    fn test_grid_space_rule_numbers_every_down_opening() {
        // with a single across word, every letter in row 0 opens a "down" slot
        // because there is free grid space below it
        let mut b = Board::new(5);
        b.place(&Word::new(0, "katt", ""), 0, 0, Direction::Across).unwrap();

        let numbers = number_cells(b.grid());
        let expected: BTreeMap<Coord, u32> = [((0, 0), 1), ((1, 0), 2), ((2, 0), 3), ((3, 0), 4)].into_iter().collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_occupied_rule_only_numbers_real_entries() {
        let mut b = Board::new(5);
        b.place(&Word::new(0, "katt", ""), 0, 0, Direction::Across).unwrap();
        b.place(&Word::new(1, "tunn", ""), 3, 0, Direction::Down).unwrap();
        b.place(&Word::new(2, "nu", ""), 3, 3, Direction::Across).unwrap();

        let s = starts(b.grid(), NumberingRule::Occupied);
        assert_eq!(s.len(), 3);
        assert_eq!(s[&(0, 0)], Start { number: 1, across: true, down: false });
        assert_eq!(s[&(3, 0)], Start { number: 2, across: false, down: true });
        // last letter of TUNN, first letter of NU
        assert_eq!(s[&(3, 3)], Start { number: 3, across: true, down: false });
    }

    #[test]
    fn test_blocked_cells_are_skipped_and_stop_entries() {
        let mut b = Board::new(3);
        b.toggle_blocked(1, 0).unwrap();
        b.place(&Word::new(0, "ab", ""), 0, 1, Direction::Across).unwrap();

        let numbers = number_cells(b.grid());
        assert!(!numbers.contains_key(&(1, 0)));
        // (0, 1): left is off-grid and (1, 1) is free → across begins
        assert_eq!(numbers.get(&(0, 1)), Some(&1));
        // (1, 1): above is blocked and (1, 2) is free → down begins
        assert_eq!(numbers.get(&(1, 1)), Some(&2));
    }

    #[test]
    fn test_last_row_and_column_need_space() {
        let mut b = Board::new(3);
        b.place(&Word::new(0, "x", ""), 2, 2, Direction::Across).unwrap();
        assert!(number_cells(b.grid()).is_empty());
    }

    #[test]
    fn test_numbering_is_deterministic() {
        let mut b = Board::new(7);
        b.place(&Word::new(0, "hallon", ""), 0, 1, Direction::Across).unwrap();
        b.place(&Word::new(1, "lok", ""), 2, 1, Direction::Down).unwrap();
        b.place(&Word::new(2, "snor", ""), 5, 0, Direction::Down).unwrap();

        let first = number_cells(b.grid());
        let second = number_cells(b.grid());
        assert_eq!(first, second);

        let mut numbers: Vec<u32> = first.values().copied().collect();
        numbers.sort_unstable();
        let expected: Vec<u32> = (1..=first.len() as u32).collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_numbers_follow_row_major_order() {
        let mut b = Board::new(6);
        b.place(&Word::new(0, "hej", ""), 3, 0, Direction::Down).unwrap();
        b.place(&Word::new(1, "oj", ""), 0, 2, Direction::Across).unwrap();

        let s = starts(b.grid(), NumberingRule::Occupied);
        assert_eq!(s[&(3, 0)].number, 1);
        assert_eq!(s[&(0, 2)].number, 2);
    }
}
