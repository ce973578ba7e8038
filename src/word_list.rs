//! `word_list`: loading the clue/answer pairs to be placed.
//!
//! Two input formats:
//! - text, one `answer;clue` pair per line. Blank lines and lines starting
//!   with `#` are skipped; a line without `;` is an answer with an empty clue.
//! - JSON, an array of `{ "answer": ..., "clue": ..., "id": ... }` objects
//!   (`clue` and `id` optional).
//!
//! Ids are assigned from the position in the list unless the JSON gives one.
//! Order is preserved: the auto placer sorts by length itself.
//!
//! Parsing is **WASM-friendly**; `load_from_path` is native-only.

use crate::errors::ImportError;
use crate::word::{Word, WordId};
use serde::Deserialize;
use std::collections::HashSet;

/// A parsed word list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordList {
    pub words: Vec<Word>,
}

#[derive(Deserialize)]
struct JsonEntry {
    answer: String,
    #[serde(default)]
    clue: String,
    id: Option<WordId>,
}

impl WordList {
    /// Parse `answer;clue` lines.
    ///
    /// Only the first `;` splits, so clues may contain semicolons. Lines whose
    /// answer part is blank are skipped.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> WordList {
        let words = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let (answer, clue) = line.split_once(';').unwrap_or((line, ""));
                let answer = answer.trim();
                (!answer.is_empty()).then(|| (answer.to_string(), clue.trim().to_string()))
            })
            .enumerate()
            .map(|(id, (answer, clue))| Word::new(id, answer, clue))
            .collect();

        WordList { words }
    }

    /// Parse a JSON array of words.
    ///
    /// # Errors
    ///
    /// [`ImportError::InvalidJson`] for malformed input,
    /// [`ImportError::DuplicateWordId`] if two entries end up with the same id.
    pub fn parse_json(json: &str) -> Result<WordList, ImportError> {
        let entries: Vec<JsonEntry> = serde_json::from_str(json)?;

        let mut seen = HashSet::with_capacity(entries.len());
        let mut words = Vec::with_capacity(entries.len());
        for (i, entry) in entries.into_iter().enumerate() {
            let id = entry.id.unwrap_or(i);
            if !seen.insert(id) {
                return Err(ImportError::DuplicateWordId { id });
            }
            words.push(Word::new(id, entry.answer, entry.clue));
        }

        Ok(WordList { words })
    }

    /// Native-only: read a word list file. Files ending in `.json` are parsed
    /// as JSON, anything else as `answer;clue` text.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`, or if a JSON
    /// file does not parse.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<WordList> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(e.kind(), format!("failed to read word list from '{}': {}", path_ref.display(), e))
        })?;

        let is_json = path_ref
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::parse_json(&data).map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("failed to parse word list '{}': {}", path_ref.display(), e.display_detailed()),
                )
            })
        } else {
            Ok(Self::parse_from_str(&data))
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
