//! Error types for placement and puzzle import, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code for documentation lookup:
//!
//! - P001: `EmptyAnswer` (Answer has no letters after normalization)
//! - P002: `OutOfBounds` (Word does not fit inside the grid)
//! - P003: `BlockedCell` (Word runs over a blocked cell)
//! - P004: `LetterConflict` (Word disagrees with a crossing word)
//! - P005: `UnknownWord` (No word with the given id)
//! - P006: `CellOccupied` (Cell holds a letter and cannot be blocked)
//! - I001: `InvalidJson` (Puzzle state is not valid JSON)
//! - I002: `InvalidGridSize` (Grid size is zero)
//! - I003: `CellOutOfBounds` (Imported cell lies outside the grid)
//! - I004: `InvalidLetter` (Imported cell letter is not A-Z)
//! - I005: `BlockedCellHasLetter` (Imported cell is both blocked and lettered)
//! - I006: `DuplicateWordId` (Two imported words share an id)
//!
//! Search failures (`A0xx`) live next to the search in [`crate::autoplace`].
//!
//! # Examples
//!
//! ```
//! use korsord::grid::{Direction, Grid};
//! use korsord::validate::validate;
//! use korsord::word::Word;
//!
//! let grid = Grid::new(5);
//! let word = Word::new(0, "pannkaka", "Tunn och god");
//! match validate(&word, 0, 0, Direction::Across, &grid) {
//!     Ok(fit) => println!("fits with {} crossings", fit.crossings),
//!     Err(e) => {
//!         println!("Error: {}", e);
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {}", help);
//!         }
//!     }
//! }
//! ```

use crate::grid::Direction;
use crate::word::WordId;

/// Why a word cannot go where it was asked to go.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("empty answer")]
    EmptyAnswer,

    #[error("out of bounds: {len} letters {direction} from ({x}, {y}) do not fit a {grid_size}x{grid_size} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        len: usize,
        direction: Direction,
        grid_size: usize,
    },

    #[error("blocked cell at ({x}, {y})")]
    BlockedCell { x: usize, y: usize },

    #[error("letter conflict at ({x}, {y}): grid has '{existing}', word needs '{required}'")]
    LetterConflict {
        x: usize,
        y: usize,
        existing: char,
        required: char,
    },

    #[error("unknown word id {id}")]
    UnknownWord { id: WordId },

    #[error("cell ({x}, {y}) holds a letter")]
    CellOccupied { x: usize, y: usize },
}

impl PlacementError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            PlacementError::EmptyAnswer => "P001",
            PlacementError::OutOfBounds { .. } => "P002",
            PlacementError::BlockedCell { .. } => "P003",
            PlacementError::LetterConflict { .. } => "P004",
            PlacementError::UnknownWord { .. } => "P005",
            PlacementError::CellOccupied { .. } => "P006",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            PlacementError::EmptyAnswer => "Answer has no letters after normalization",
            PlacementError::OutOfBounds { .. } => "Word does not fit inside the grid",
            PlacementError::BlockedCell { .. } => "Word runs over a blocked cell",
            PlacementError::LetterConflict { .. } => "Word disagrees with a crossing word",
            PlacementError::UnknownWord { .. } => "No word with the given id",
            PlacementError::CellOccupied { .. } => "Cell holds a letter and cannot be blocked",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            PlacementError::EmptyAnswer => "Answers are uppercased, Å/Ä are folded to A and Ö to O, and everything outside A-Z is removed. Nothing was left of this answer.",
            PlacementError::OutOfBounds { .. } => "Either the start cell or the last cell of the word lies outside the grid.",
            PlacementError::BlockedCell { .. } => "Blocked cells can never hold a letter. The word's path crosses one.",
            PlacementError::LetterConflict { .. } => "Another word already occupies a cell on the path with a different letter.",
            PlacementError::UnknownWord { .. } => "The requested word id is not part of the puzzle's word list.",
            PlacementError::CellOccupied { .. } => "Only free cells can be blocked. Remove the words running through the cell first.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            PlacementError::EmptyAnswer => Some("Use an answer with at least one letter, e.g. 'katt' instead of '123'"),
            PlacementError::OutOfBounds { .. } => Some("Move the word towards the top-left corner or use a larger grid"),
            PlacementError::BlockedCell { .. } => Some("Unblock the cell or pick another position"),
            PlacementError::LetterConflict { .. } => Some("Choose a position where the shared letters are the same"),
            PlacementError::UnknownWord { .. } => None,
            PlacementError::CellOccupied { .. } => Some("Remove the word(s) using this cell before blocking it"),
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Errors raised while importing an existing puzzle state.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("invalid puzzle JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid grid size {size}")]
    InvalidGridSize { size: usize },

    #[error("cell ({x}, {y}) lies outside a {grid_size}x{grid_size} grid")]
    CellOutOfBounds { x: usize, y: usize, grid_size: usize },

    #[error("cell ({x}, {y}) has invalid letter \"{letter}\"")]
    InvalidLetter { x: usize, y: usize, letter: String },

    #[error("cell ({x}, {y}) is blocked but holds a letter")]
    BlockedCellHasLetter { x: usize, y: usize },

    #[error("duplicate word id {id}")]
    DuplicateWordId { id: WordId },
}

impl ImportError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::InvalidJson(_) => "I001",
            ImportError::InvalidGridSize { .. } => "I002",
            ImportError::CellOutOfBounds { .. } => "I003",
            ImportError::InvalidLetter { .. } => "I004",
            ImportError::BlockedCellHasLetter { .. } => "I005",
            ImportError::DuplicateWordId { .. } => "I006",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ImportError::InvalidJson(_) => "Puzzle state is not valid JSON",
            ImportError::InvalidGridSize { .. } => "Grid size is zero",
            ImportError::CellOutOfBounds { .. } => "Imported cell lies outside the grid",
            ImportError::InvalidLetter { .. } => "Imported cell letter is not A-Z",
            ImportError::BlockedCellHasLetter { .. } => "Imported cell is both blocked and lettered",
            ImportError::DuplicateWordId { .. } => "Two imported words share an id",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ImportError::InvalidJson(_) => "The puzzle state could not be deserialized. Expected an object with gridSize, words and cells.",
            ImportError::InvalidGridSize { .. } => "A grid needs at least one row and one column.",
            ImportError::CellOutOfBounds { .. } => "Every imported cell must satisfy 0 <= x, y < gridSize.",
            ImportError::InvalidLetter { .. } => "Cell letters must be a single letter that normalizes to A-Z (Å, Ä and Ö are accepted).",
            ImportError::BlockedCellHasLetter { .. } => "Blocked cells can never hold a letter.",
            ImportError::DuplicateWordId { .. } => "Word ids identify placements and must be unique within a puzzle.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ImportError::InvalidJson(_) => Some("Example: {\"gridSize\": 15, \"words\": [{\"id\": 0, \"answer\": \"katt\", \"clue\": \"Jamar\"}], \"cells\": []}"),
            ImportError::InvalidGridSize { .. } => Some("Use a positive grid size such as 15"),
            ImportError::CellOutOfBounds { .. } => Some("Drop the cell or import the puzzle with a larger grid size"),
            ImportError::InvalidLetter { .. } => Some("Use a single letter per cell, e.g. \"K\""),
            ImportError::BlockedCellHasLetter { .. } => Some("Either clear the letter or unblock the cell"),
            ImportError::DuplicateWordId { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
