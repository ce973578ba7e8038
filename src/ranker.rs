//! Candidate ranking: every legal position for a word, best first.
//!
//! Scoring terms:
//! - `+10` per crossing (letter shared with another word),
//! - `+0.1` per path cell that is currently empty,
//! - `-0.1` per step of Manhattan distance from the grid centre to the start cell,
//! - `+20` when the grid holds no letters at all.
//!
//! The crossing term dominates; the others break ties towards fresh space
//! near the middle of the grid.

use crate::grid::{word_path, Direction, Grid};
use crate::validate::validate;
use crate::word::Word;

const CROSSING_BONUS: f64 = 10.0;
const EMPTY_CELL_BONUS: f64 = 0.1;
const CENTER_DISTANCE_PENALTY: f64 = 0.1;
const EMPTY_GRID_BONUS: f64 = 20.0;

/// A legal position for a word, with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub x: usize,
    pub y: usize,
    pub direction: Direction,
    pub crossings: usize,
    pub score: f64,
}

/// Enumerate and score every legal position of `word` on `grid`.
///
/// Enumeration runs y outer, x inner, across before down. The result is
/// sorted by score, highest first; the sort is stable so equal scores keep
/// enumeration order.
#[must_use]
pub fn rank(word: &Word, grid: &Grid) -> Vec<Candidate> {
    let size = grid.size();
    let center = size / 2;
    let empty_grid_bonus = if grid.is_empty() { EMPTY_GRID_BONUS } else { 0.0 };

    let mut candidates = Vec::new();
    for y in 0..size {
        for x in 0..size {
            for direction in Direction::ALL {
                let Ok(fit) = validate(word, x, y, direction, grid) else {
                    continue;
                };

                let empty_cells = word_path(x, y, word.len(), direction)
                    .filter(|&(cx, cy, _)| grid.get(cx, cy).is_none())
                    .count();
                let distance = x.abs_diff(center) + y.abs_diff(center);

                let score = CROSSING_BONUS * fit.crossings as f64
                    + EMPTY_CELL_BONUS * empty_cells as f64
                    - CENTER_DISTANCE_PENALTY * distance as f64
                    + empty_grid_bonus;

                candidates.push(Candidate { x, y, direction, crossings: fit.crossings, score });
            }
        }
    }

    // `sort_by` is stable
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Board;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_every_legal_position_is_listed() {
        let g = Grid::new(5);
        let w = Word::new(0, "katt", "");
        // 2 starting columns x 5 rows across, and the same down
        assert_eq!(rank(&w, &g).len(), 20);

        let one = Word::new(1, "a", "");
        assert_eq!(rank(&one, &g).len(), 50);
    }

    #[test]
    fn test_empty_answer_has_no_candidates() {
        assert!(rank(&Word::new(0, "--", ""), &Grid::new(5)).is_empty());
    }

    #[test]
    fn test_too_long_word_has_no_candidates() {
        assert!(rank(&Word::new(0, "abcdef", ""), &Grid::new(5)).is_empty());
    }

    #[test]
    fn test_first_word_is_pulled_to_the_centre() {
        let g = Grid::new(15);
        let w = Word::new(0, "katt", "");
        let best = rank(&w, &g)[0];
        // distance 0 from (7, 7) fits both ways; across wins on enumeration order
        assert_eq!((best.x, best.y, best.direction), (7, 7, Direction::Across));
        assert!(approx(best.score, 20.0 + 0.4));
    }

    #[test]
    fn test_score_terms() {
        let mut b = Board::new(5);
        b.place(&Word::new(0, "katt", ""), 0, 0, Direction::Across).unwrap();

        let tunn = Word::new(1, "tunn", "");
        let ranked = rank(&tunn, b.grid());
        let crossing = ranked
            .iter()
            .find(|c| c.x == 3 && c.y == 0 && c.direction == Direction::Down)
            .copied()
            .unwrap();
        assert_eq!(crossing.crossings, 1);
        // 10 for the crossing, 3 empty cells, distance |3-2| + |0-2| = 3
        assert!(approx(crossing.score, 10.0 + 0.3 - 0.3));

        // crossings dominate
        assert_eq!(ranked[0].crossings, 1);
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let g = Grid::new(6);
        let ranked = rank(&Word::new(0, "ab", ""), &g);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                let key = |c: &Candidate| (c.y, c.x, c.direction);
                assert!(key(&pair[0]) < key(&pair[1]), "ties must keep enumeration order");
            }
        }
    }

    #[test]
    fn test_blocked_and_conflicting_positions_are_dropped() {
        let mut b = Board::new(3);
        b.toggle_blocked(1, 1).unwrap();
        let ranked = rank(&Word::new(0, "abc", ""), b.grid());
        // row 1 and column 1 are cut by the block
        assert_eq!(ranked.len(), 4);
        assert!(ranked.iter().all(|c| !(c.direction == Direction::Across && c.y == 1)));
        assert!(ranked.iter().all(|c| !(c.direction == Direction::Down && c.x == 1)));
    }

    #[test]
    fn test_empty_grid_bonus_disappears_after_first_word() {
        let mut b = Board::new(9);
        let w = Word::new(0, "hus", "");
        let before = rank(&w, b.grid())[0].score;
        b.place(&Word::new(1, "x", ""), 0, 0, Direction::Across).unwrap();
        let after = rank(&w, b.grid())[0].score;
        assert!(approx(before - after, 20.0));
    }
}
