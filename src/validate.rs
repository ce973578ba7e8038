//! Placement validation: does a word fit at a position, and how many letters
//! does it share with words already in the grid?
//!
//! [`validate`] never writes. The ranker calls it hundreds of times per word
//! on a speculative basis, so it must stay a pure predicate.

use crate::errors::PlacementError;
use crate::grid::{word_path, Direction, Grid};
use crate::word::Word;

/// A successful validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fit {
    /// Cells where the word shares a letter with a different word.
    pub crossings: usize,
}

/// Check whether `word` can be written at `(start_x, start_y)` going `direction`.
///
/// Checks run in order: empty answer, bounds, then a walk along the path that
/// stops at the first blocked cell or letter conflict. Cells owned by the same
/// word id are never a conflict, so a word can be re-validated over its own
/// footprint.
///
/// # Errors
///
/// [`PlacementError::EmptyAnswer`], [`PlacementError::OutOfBounds`],
/// [`PlacementError::BlockedCell`] or [`PlacementError::LetterConflict`].
pub fn validate(
    word: &Word,
    start_x: usize,
    start_y: usize,
    direction: Direction,
    grid: &Grid,
) -> Result<Fit, PlacementError> {
    let letters = word.normalized().as_bytes();
    if letters.is_empty() {
        return Err(PlacementError::EmptyAnswer);
    }

    if !grid.path_in_bounds(start_x, start_y, letters.len(), direction) {
        return Err(PlacementError::OutOfBounds {
            x: start_x,
            y: start_y,
            len: letters.len(),
            direction,
            grid_size: grid.size(),
        });
    }

    let mut crossings = 0;
    for (x, y, i) in word_path(start_x, start_y, letters.len(), direction) {
        let Some(cell) = grid.get(x, y) else {
            continue;
        };
        if cell.is_blocked {
            return Err(PlacementError::BlockedCell { x, y });
        }
        if cell.is_owned_by(word.id) {
            continue;
        }
        let required = letters[i] as char;
        match cell.letter {
            Some(existing) if existing != required => {
                return Err(PlacementError::LetterConflict { x, y, existing, required });
            }
            Some(_) => crossings += 1,
            None => {}
        }
    }

    Ok(Fit { crossings })
}
