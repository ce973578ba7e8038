//! Words to be placed: an id, the clue shown to the player and the answer.

use crate::normalize::normalize_answer;
use serde::{Deserialize, Serialize};

/// Stable identifier of a word (the list index in the simple case).
pub type WordId = usize;

/// A clue/answer pair.
///
/// The normalized answer is computed once on construction; it is what the
/// engine writes into cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWord", into = "RawWord")]
pub struct Word {
    pub id: WordId,
    pub clue: String,
    pub answer: String,
    normalized: String,
}

/// Wire shape of a [`Word`]: `{ "id": 0, "answer": "...", "clue": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawWord {
    pub id: WordId,
    pub answer: String,
    #[serde(default)]
    pub clue: String,
}

impl Word {
    pub fn new(id: WordId, answer: impl Into<String>, clue: impl Into<String>) -> Self {
        let answer = answer.into();
        let normalized = normalize_answer(&answer);
        Self { id, clue: clue.into(), answer, normalized }
    }

    /// The letters this word puts into the grid.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Number of grid cells the word spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    /// True if nothing of the answer survives normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// The normalized letter at `index`.
    ///
    /// Normalized answers are ASCII, so byte indexing is char indexing.
    #[must_use]
    pub fn letter_at(&self, index: usize) -> Option<char> {
        self.normalized.as_bytes().get(index).map(|&b| b as char)
    }
}

impl From<RawWord> for Word {
    fn from(raw: RawWord) -> Self {
        Word::new(raw.id, raw.answer, raw.clue)
    }
}

impl From<Word> for RawWord {
    fn from(word: Word) -> Self {
        RawWord { id: word.id, answer: word.answer, clue: word.clue }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_answer() {
        let w = Word::new(3, "Ekorre!", "Ett litet djur");
        assert_eq!(w.id, 3);
        assert_eq!(w.answer, "Ekorre!");
        assert_eq!(w.normalized(), "EKORRE");
        assert_eq!(w.len(), 6);
        assert!(!w.is_empty());
    }

    #[test]
    fn test_letter_at() {
        let w = Word::new(0, "höst", "");
        assert_eq!(w.letter_at(0), Some('H'));
        assert_eq!(w.letter_at(1), Some('O'));
        assert_eq!(w.letter_at(3), Some('T'));
        assert_eq!(w.letter_at(4), None);
    }

    #[test]
    fn test_empty_after_normalization() {
        let w = Word::new(0, "123 ...", "siffror");
        assert!(w.is_empty());
        assert_eq!(w.len(), 0);
    }

    #[test]
    fn test_json_round_trip_recomputes_normalized() {
        let json = r#"{"id": 7, "answer": "Älg", "clue": "Skogens konung"}"#;
        let w: Word = serde_json::from_str(json).unwrap();
        assert_eq!(w.normalized(), "ALG");
        assert_eq!(w.clue, "Skogens konung");

        let back = serde_json::to_value(&w).unwrap();
        assert_eq!(back["answer"], "Älg");
        assert!(back.get("normalized").is_none());
    }

    #[test]
    fn test_missing_clue_defaults_to_empty() {
        let w: Word = serde_json::from_str(r#"{"id": 1, "answer": "sol"}"#).unwrap();
        assert_eq!(w.clue, "");
        assert_eq!(w.normalized(), "SOL");
    }
}
