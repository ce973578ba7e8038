//! Answer normalization.
//!
//! Grid cells only ever hold the *normalized* form of an answer: uppercase
//! ASCII `A`–`Z`, with the Swedish vowels folded onto their base letter
//! (`Å`/`Ä` → `A`, `Ö` → `O`). Everything else (spaces, hyphens, digits,
//! other punctuation and any other non-ASCII letter) is dropped.

use std::ops::RangeInclusive;

pub(crate) const GRID_ALPHABET: RangeInclusive<char> = 'A'..='Z';

/// Character helpers used when folding answers into grid letters.
pub trait GridLetter {
    /// Fold this character into a grid letter, or `None` if it has no place in the grid.
    fn to_grid_letter(&self) -> Option<char>;
    /// True for characters that can be stored in a cell as-is.
    fn is_grid_letter(&self) -> bool;
}

impl GridLetter for char {
    fn to_grid_letter(&self) -> Option<char> {
        // `to_uppercase` can expand (e.g. 'ß' -> "SS"); only single-char results are kept
        let mut upper = self.to_uppercase();
        let c = match (upper.next(), upper.next()) {
            (Some(c), None) => c,
            _ => return None,
        };
        let folded = match c {
            'Å' | 'Ä' => 'A',
            'Ö' => 'O',
            other => other,
        };
        folded.is_grid_letter().then_some(folded)
    }

    fn is_grid_letter(&self) -> bool {
        GRID_ALPHABET.contains(self)
    }
}

/// Normalize a raw answer into the letters that will occupy the grid.
///
/// Idempotent: `normalize_answer(&normalize_answer(s)) == normalize_answer(s)`.
///
/// ```
/// use korsord::normalize::normalize_answer;
///
/// assert_eq!(normalize_answer("Räkmacka"), "RAKMACKA");
/// assert_eq!(normalize_answer("göra om"), "GORAOM");
/// assert_eq!(normalize_answer("  -- "), "");
/// ```
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.chars().filter_map(|c| c.to_grid_letter()).collect()
}

/// Normalize a single cell letter, e.g. from an imported grid.
#[must_use]
pub fn normalize_letter(c: char) -> Option<char> {
    c.to_grid_letter()
}
