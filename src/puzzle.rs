//! The host-facing puzzle: a word list, the board, and everything a UI needs
//! to show it (numbered cells, the clue list, a JSON state to save and load).

use crate::autoplace::{AutoPlaceError, AutoPlaceResult, AutoPlacer};
use crate::errors::{ImportError, PlacementError};
use crate::grid::{word_path, Cell, Direction, Grid, DEFAULT_GRID_SIZE};
use crate::normalize::normalize_letter;
use crate::numbering::{starts, NumberingRule};
use crate::placement::{Board, Placement};
use crate::validate::Fit;
use crate::word::{Word, WordId};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One cell as seen by a host, in exported state and numbered views.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub x: usize,
    pub y: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_start: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_word_id: Option<WordId>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_blocked: bool,
}

/// One line of the clue list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClueEntry {
    /// `None` when the start cell is not numbered under the puzzle's rule.
    pub number: Option<u32>,
    pub direction: Direction,
    pub clue: String,
    /// Normalized answer.
    pub answer: String,
    pub word_id: WordId,
    pub x: usize,
    pub y: usize,
}

/// Serializable snapshot of a puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleState {
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(default)]
    pub cells: Vec<CellView>,
}

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

/// A word list laid out (partly or fully) on a board.
#[derive(Debug, Clone)]
pub struct Puzzle {
    words: Vec<Word>,
    index: HashMap<WordId, usize>,
    board: Board,
    rule: NumberingRule,
}

impl Puzzle {
    /// An empty board of side `grid_size` with `words` waiting to be placed.
    ///
    /// # Errors
    ///
    /// [`ImportError::InvalidGridSize`] for a zero size,
    /// [`ImportError::DuplicateWordId`] if two words share an id.
    pub fn new(grid_size: usize, words: Vec<Word>) -> Result<Self, ImportError> {
        if grid_size == 0 {
            return Err(ImportError::InvalidGridSize { size: grid_size });
        }
        let mut index = HashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            if index.insert(word.id, i).is_some() {
                return Err(ImportError::DuplicateWordId { id: word.id });
            }
        }
        Ok(Puzzle { words, index, board: Board::new(grid_size), rule: NumberingRule::default() })
    }

    #[must_use]
    pub fn with_numbering_rule(mut self, rule: NumberingRule) -> Self {
        self.rule = rule;
        self
    }

    #[must_use]
    pub fn numbering_rule(&self) -> NumberingRule {
        self.rule
    }

    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.board.size()
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.index.get(&id).map(|&i| &self.words[i])
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.board.grid()
    }

    fn known_word(&self, id: WordId) -> Result<&Word, PlacementError> {
        self.word(id).ok_or(PlacementError::UnknownWord { id })
    }

    /// Place or move a word.
    ///
    /// # Errors
    ///
    /// [`PlacementError::UnknownWord`] or whatever validation reports; the
    /// board is unchanged on error.
    pub fn place_word(&mut self, id: WordId, x: usize, y: usize, direction: Direction) -> Result<Fit, PlacementError> {
        let word = self.known_word(id)?.clone();
        self.board.place(&word, x, y, direction)
    }

    /// Take a word off the board. Returns whether it was placed.
    ///
    /// # Errors
    ///
    /// [`PlacementError::UnknownWord`].
    pub fn remove_word(&mut self, id: WordId) -> Result<bool, PlacementError> {
        self.known_word(id)?;
        Ok(self.board.remove(id))
    }

    /// Flip a cell between blocked and free. Returns the new blocked state.
    ///
    /// # Errors
    ///
    /// See [`Board::toggle_blocked`].
    pub fn toggle_blocked(&mut self, x: usize, y: usize) -> Result<bool, PlacementError> {
        self.board.toggle_blocked(x, y)
    }

    /// Remove every letter, placement and blocked cell.
    pub fn clear_grid(&mut self) {
        self.board.clear();
    }

    /// Lay out the whole word list with `placer`, replacing the board on success.
    ///
    /// # Errors
    ///
    /// See [`AutoPlacer::solve`]; the board is unchanged on error.
    pub fn auto_place(&mut self, placer: &mut AutoPlacer<'_>) -> Result<AutoPlaceResult, AutoPlaceError> {
        let result = placer.solve(&self.words, &self.board)?;
        self.board = result.board.clone();
        Ok(result)
    }

    /// Words without a placement, in list order.
    #[must_use]
    pub fn unplaced_words(&self) -> Vec<&Word> {
        self.words.iter().filter(|w| !self.board.is_placed(w.id)).collect()
    }

    /// Every stored cell in row-major order, with clue numbers.
    #[must_use]
    pub fn cells(&self) -> Vec<CellView> {
        let numbers = starts(self.grid(), self.rule);
        self.grid()
            .iter()
            .into_iter()
            .map(|((x, y), cell)| {
                let number = numbers.get(&(x, y)).map(|s| s.number);
                CellView {
                    x,
                    y,
                    letter: cell.letter.map(String::from),
                    number,
                    is_start: number.is_some(),
                    direction: cell.direction,
                    owner_word_id: cell.owner,
                    is_blocked: cell.is_blocked,
                }
            })
            .collect()
    }

    /// Clue list of the placed words: across entries, then down, each by number.
    #[must_use]
    pub fn clues(&self) -> Vec<ClueEntry> {
        let numbers = starts(self.grid(), self.rule);
        let mut clues: Vec<ClueEntry> = self
            .words
            .iter()
            .filter_map(|word| {
                let p = self.board.placement(word.id)?;
                let number = numbers.get(&(p.x, p.y)).filter(|s| s.begins(p.direction)).map(|s| s.number);
                Some(ClueEntry {
                    number,
                    direction: p.direction,
                    clue: word.clue.clone(),
                    answer: word.normalized().to_string(),
                    word_id: word.id,
                    x: p.x,
                    y: p.y,
                })
            })
            .collect();
        // unnumbered entries go last within their direction
        clues.sort_by_key(|c| (c.direction, c.number.is_none(), c.number, c.y, c.x));
        clues
    }

    /// Snapshot of the puzzle.
    #[must_use]
    pub fn state(&self) -> PuzzleState {
        PuzzleState { grid_size: self.grid_size(), words: self.words.clone(), cells: self.cells() }
    }

    /// Rebuild a puzzle from a snapshot.
    ///
    /// Placements are recovered from the cells each word owns: the word's
    /// answer must line up with the grid letters along a path through all of
    /// its owned cells. Words that cannot be recovered stay unplaced and
    /// their cells keep their letters without an owner. Numbers and start
    /// flags in the snapshot are ignored and recomputed.
    ///
    /// # Errors
    ///
    /// Any [`ImportError`] other than `InvalidJson`.
    pub fn from_state(state: PuzzleState) -> Result<Self, ImportError> {
        let mut puzzle = Puzzle::new(state.grid_size, state.words)?;
        let mut grid = Grid::new(state.grid_size);

        for view in &state.cells {
            let (x, y) = (view.x, view.y);
            if !grid.in_bounds(x, y) {
                return Err(ImportError::CellOutOfBounds { x, y, grid_size: state.grid_size });
            }
            let letter = match view.letter.as_deref() {
                None | Some("") => None,
                Some(raw) => Some(parse_letter(raw).ok_or_else(|| ImportError::InvalidLetter {
                    x,
                    y,
                    letter: raw.to_string(),
                })?),
            };
            match (view.is_blocked, letter) {
                (true, Some(_)) => return Err(ImportError::BlockedCellHasLetter { x, y }),
                (true, None) => grid.set(x, y, Cell::blocked()),
                (false, Some(letter)) => {
                    let owner = view.owner_word_id.filter(|id| puzzle.index.contains_key(id));
                    let direction = owner.and(view.direction);
                    grid.set(x, y, Cell { letter: Some(letter), is_blocked: false, owner, direction });
                }
                (false, None) => {}
            }
        }

        let mut placements = HashMap::new();
        for word in &puzzle.words {
            let owned = grid.cells_of_word(word.id);
            if owned.is_empty() {
                continue;
            }
            match recover_placement(word, &owned, &grid) {
                Some(p) => {
                    placements.insert(word.id, p);
                }
                None => {
                    warn!("could not recover the placement of word {} ({})", word.id, word.normalized());
                    for &(x, y) in &owned {
                        if let Some(cell) = grid.get(x, y).cloned() {
                            grid.set(x, y, Cell { owner: None, direction: None, ..cell });
                        }
                    }
                }
            }
        }

        debug!("imported {} cell(s) and {} placement(s)", grid.len(), placements.len());
        puzzle.board = Board::from_parts(grid, placements);
        Ok(puzzle)
    }

    /// Parse a JSON snapshot.
    ///
    /// # Errors
    ///
    /// [`ImportError::InvalidJson`] or anything [`Puzzle::from_state`] reports.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let state: PuzzleState = serde_json::from_str(json)?;
        Self::from_state(state)
    }

    /// Snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`ImportError::InvalidJson`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ImportError> {
        Ok(serde_json::to_string_pretty(&self.state())?)
    }
}

/// A single letter that normalizes into the grid alphabet.
fn parse_letter(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => normalize_letter(c),
        _ => None,
    }
}

/// Find a start and direction for `word` whose path covers every cell in
/// `owned` and whose letters match the grid.
fn recover_placement(word: &Word, owned: &[(usize, usize)], grid: &Grid) -> Option<Placement> {
    let len = word.len();
    if len == 0 {
        return None;
    }

    let recorded: HashSet<Direction> = owned.iter().filter_map(|&(x, y)| grid.get(x, y)?.direction).collect();
    let directions: Vec<Direction> = if recorded.len() == 1 {
        recorded.into_iter().collect()
    } else {
        Direction::ALL.to_vec()
    };

    // `owned` is row-major, so the first cell is the top-left one
    let (first_x, first_y) = owned[0];
    for direction in directions {
        let first = match direction {
            Direction::Across => first_x,
            Direction::Down => first_y,
        };
        for offset in 0..len.min(first + 1) {
            let (x, y) = match direction {
                Direction::Across => (first_x - offset, first_y),
                Direction::Down => (first_x, first_y - offset),
            };
            let candidate = Placement { x, y, direction, len };
            if !grid.path_in_bounds(x, y, len, direction) {
                continue;
            }
            let covers_owned = owned.iter().all(|&(ox, oy)| candidate.covers(ox, oy));
            let letters_match = word_path(x, y, len, direction)
                .all(|(cx, cy, i)| grid.letter_at(cx, cy) == word.letter_at(i));
            if covers_owned && letters_match {
                return Some(candidate);
            }
        }
    }
    None
}

impl Default for Puzzle {
    fn default() -> Self {
        Puzzle {
            words: Vec::new(),
            index: HashMap::new(),
            board: Board::new(DEFAULT_GRID_SIZE),
            rule: NumberingRule::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoplace::AutoPlaceOptions;

    fn sample() -> Puzzle {
        let words = vec![
            Word::new(0, "katt", "Spinner"),
            Word::new(1, "tunn", "Inte tjock"),
            Word::new(2, "nu", "Just nu"),
            Word::new(3, "ö", "Omgiven av vatten"),
        ];
        Puzzle::new(5, words).unwrap()
    }

    fn placed_sample() -> Puzzle {
        let mut p = sample();
        p.place_word(0, 0, 0, Direction::Across).unwrap();
        p.place_word(1, 3, 0, Direction::Down).unwrap();
        p.place_word(2, 3, 3, Direction::Across).unwrap();
        p
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert!(matches!(Puzzle::new(0, vec![]), Err(ImportError::InvalidGridSize { size: 0 })));
        let dup = vec![Word::new(1, "a", ""), Word::new(1, "b", "")];
        assert!(matches!(Puzzle::new(5, dup), Err(ImportError::DuplicateWordId { id: 1 })));
    }

    #[test]
    fn test_manual_api() {
        let mut p = sample();
        assert_eq!(p.place_word(0, 0, 0, Direction::Across), Ok(Fit { crossings: 0 }));
        assert_eq!(p.place_word(1, 3, 0, Direction::Down), Ok(Fit { crossings: 1 }));
        assert_eq!(p.place_word(9, 0, 0, Direction::Down), Err(PlacementError::UnknownWord { id: 9 }));
        assert_eq!(p.remove_word(9), Err(PlacementError::UnknownWord { id: 9 }));

        assert_eq!(p.remove_word(1), Ok(true));
        assert_eq!(p.remove_word(1), Ok(false));
        // shared T stays with KATT
        assert_eq!(p.grid().letter_at(3, 0), Some('T'));
        assert_eq!(p.grid().letter_at(3, 1), None);

        assert_eq!(p.toggle_blocked(4, 4), Ok(true));
        p.clear_grid();
        assert_eq!(p.grid().len(), 0);
        assert_eq!(p.unplaced_words().len(), 4);
    }

    #[test]
    fn test_cells_are_row_major_and_numbered() {
        let p = placed_sample();
        let cells = p.cells();
        let coords: Vec<(usize, usize)> = cells.iter().map(|c| (c.x, c.y)).collect();
        let mut sorted = coords.clone();
        sorted.sort_by_key(|&(x, y)| (y, x));
        assert_eq!(coords, sorted);

        let first = &cells[0];
        assert_eq!((first.x, first.y), (0, 0));
        assert_eq!(first.letter.as_deref(), Some("K"));
        assert_eq!(first.number, Some(1));
        assert!(first.is_start);
        assert_eq!(first.owner_word_id, Some(0));
    }

    #[test]
    fn test_clue_list() {
        let p = placed_sample().with_numbering_rule(NumberingRule::Occupied);
        let clues = p.clues();
        let summary: Vec<(Option<u32>, Direction, &str)> =
            clues.iter().map(|c| (c.number, c.direction, c.answer.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (Some(1), Direction::Across, "KATT"),
                (Some(3), Direction::Across, "NU"),
                (Some(2), Direction::Down, "TUNN"),
            ]
        );
        assert_eq!(clues[0].clue, "Spinner");
    }

    #[test]
    fn test_state_round_trip() {
        let mut p = placed_sample();
        p.toggle_blocked(0, 4).unwrap();
        let json = p.to_json().unwrap();
        let back = Puzzle::from_json(&json).unwrap();

        assert_eq!(back.grid(), p.grid());
        assert_eq!(back.board().placements(), p.board().placements());
        assert_eq!(back.words(), p.words());
        assert_eq!(back.cells(), p.cells());
    }

    #[test]
    fn test_state_json_shape() {
        let p = placed_sample();
        let value: serde_json::Value = serde_json::to_value(p.state()).unwrap();
        assert_eq!(value["gridSize"], 5);
        let cell = &value["cells"][0];
        assert_eq!(cell["letter"], "K");
        assert_eq!(cell["ownerWordId"], 0);
        assert_eq!(cell["isStart"], true);
        assert!(cell.get("isBlocked").is_none());
    }

    #[test]
    fn test_recovers_placement_with_shared_cells() {
        // NU's N at (3, 3) is owned by NU; TUNN only owns (3, 1) and (3, 2)
        let p = placed_sample();
        let mut state = p.state();
        for cell in &mut state.cells {
            if (cell.x, cell.y) == (3, 0) {
                cell.owner_word_id = Some(0);
                cell.direction = Some(Direction::Across);
            }
        }
        let back = Puzzle::from_state(state).unwrap();
        assert_eq!(back.board().placement(1), p.board().placement(1));
        assert_eq!(back.board().placement(0), p.board().placement(0));
    }

    #[test]
    fn test_import_errors() {
        let bad_json = Puzzle::from_json("{ not json");
        assert!(matches!(bad_json, Err(ImportError::InvalidJson(_))));

        let oob = r#"{"gridSize": 3, "words": [], "cells": [{"x": 3, "y": 0, "isBlocked": true}]}"#;
        assert!(matches!(Puzzle::from_json(oob), Err(ImportError::CellOutOfBounds { x: 3, .. })));

        let letter = r#"{"gridSize": 3, "cells": [{"x": 0, "y": 0, "letter": "AB"}]}"#;
        assert!(matches!(Puzzle::from_json(letter), Err(ImportError::InvalidLetter { .. })));

        let blocked = r#"{"gridSize": 3, "cells": [{"x": 0, "y": 0, "letter": "A", "isBlocked": true}]}"#;
        assert!(matches!(Puzzle::from_json(blocked), Err(ImportError::BlockedCellHasLetter { x: 0, y: 0 })));

        let dup = r#"{"gridSize": 3, "words": [{"id": 1, "answer": "a"}, {"id": 1, "answer": "b"}]}"#;
        assert!(matches!(Puzzle::from_json(dup), Err(ImportError::DuplicateWordId { id: 1 })));
    }

    #[test]
    fn test_import_folds_letters_and_drops_unknown_owners() {
        let json = r#"{"gridSize": 3, "cells": [{"x": 1, "y": 1, "letter": "ö", "ownerWordId": 7, "direction": "down"}]}"#;
        let p = Puzzle::from_json(json).unwrap();
        let cell = p.grid().get(1, 1).unwrap();
        assert_eq!(cell.letter, Some('O'));
        assert_eq!(cell.owner, None);
        assert_eq!(cell.direction, None);
    }

    #[test]
    fn test_unrecoverable_word_stays_unplaced() {
        let json = r#"{
            "gridSize": 5,
            "words": [{"id": 0, "answer": "katt", "clue": ""}],
            "cells": [{"x": 0, "y": 0, "letter": "K", "ownerWordId": 0, "direction": "across"}]
        }"#;
        let p = Puzzle::from_json(json).unwrap();
        assert!(!p.board().is_placed(0));
        assert_eq!(p.grid().get(0, 0).unwrap().owner, None);
        assert_eq!(p.grid().letter_at(0, 0), Some('K'));
    }

    #[test]
    fn test_auto_place_updates_board() {
        let mut p = Puzzle::new(9, vec![Word::new(0, "katt", ""), Word::new(1, "tunn", "")]).unwrap();
        let mut placer = AutoPlacer::new(AutoPlaceOptions::default());
        let result = p.auto_place(&mut placer).unwrap();
        assert_eq!(result.placed, vec![0, 1]);
        assert!(p.unplaced_words().is_empty());
        assert_eq!(p.board(), &result.board);
    }
}
