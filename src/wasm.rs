use crate::autoplace::{AutoPlaceError, AutoPlaceOptions, AutoPlacer, SearchStatus};
use crate::errors::{ImportError, PlacementError};
use crate::grid::Direction;
use crate::logging::init_logger;
use crate::puzzle::{Puzzle, PuzzleState};
use crate::word::{Word, WordId};
use crate::word_list::WordList;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "P004", "A001")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

macro_rules! wasm_error_from {
    ($($error:ty),+ $(,)?) => {
        $(
            impl From<$error> for WasmError {
                fn from(e: $error) -> Self {
                    WasmError {
                        code: e.code().to_string(),
                        message: e.to_string(),
                        description: e.description().to_string(),
                        details: e.details().to_string(),
                        help: e.help().map(str::to_string),
                    }
                }
            }
        )+
    };
}

wasm_error_from!(PlacementError, ImportError, AutoPlaceError);

impl WasmError {
    fn bad_argument(what: &str, e: impl std::fmt::Display) -> Self {
        WasmError {
            code: "WASM001".to_string(),
            message: format!("{what}: {e}"),
            description: "Invalid argument".to_string(),
            details: "An argument passed from JavaScript did not have the expected shape.".to_string(),
            help: Some("Pass words as [{id, answer, clue}] and states as returned by the other functions".to_string()),
        }
    }

    fn serialization(e: impl std::fmt::Display) -> Self {
        WasmError {
            code: "WASM002".to_string(),
            message: format!("serialization failed: {e}"),
            description: "Failed to serialize result".to_string(),
            details: "The result could not be converted to JavaScript format.".to_string(),
            help: Some("This is an internal error. Please report this issue.".to_string()),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {}", help));
        }

        js_sys::Error::new(&msg).into()
    }
}

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, WasmError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| WasmError::bad_argument(what, e))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| WasmError::serialization(e).into())
}

fn load_state(state: JsValue) -> Result<Puzzle, WasmError> {
    let state: PuzzleState = from_js(state, "state must be a puzzle state object")?;
    Ok(Puzzle::from_state(state)?)
}

/// Initialize logging with the specified debug setting.
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("WASM module initialized");
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct WasmAutoPlaceResult {
    state: PuzzleState,
    placed: Vec<WordId>,
    unplaced: Vec<WordId>,
    score: f64,
    steps: usize,
    status: &'static str,
}

/// JS entry: (words: {id, answer, clue}[], gridSize: number, timeBudgetMs: number)
/// returns `{ state, placed, unplaced, score, steps, status }`.
#[wasm_bindgen]
pub fn auto_place_wasm(words: JsValue, grid_size: usize, time_budget_ms: u32) -> Result<JsValue, JsValue> {
    let words: Vec<Word> = from_js(words, "words must be {id, answer, clue}[]")?;
    let mut puzzle = Puzzle::new(grid_size, words).map_err(WasmError::from)?;

    let options = AutoPlaceOptions {
        time_budget: Duration::from_millis(u64::from(time_budget_ms)),
        ..AutoPlaceOptions::default()
    };
    let result = puzzle.auto_place(&mut AutoPlacer::new(options)).map_err(WasmError::from)?;

    let status = match result.status {
        SearchStatus::FirstLayout => "first_layout",
        SearchStatus::SearchExhausted => "search_exhausted",
        SearchStatus::Stopped(_) => "stopped",
    };

    to_js(&WasmAutoPlaceResult {
        state: puzzle.state(),
        placed: result.placed,
        unplaced: result.unplaced,
        score: result.score,
        steps: result.steps,
        status,
    })
}

/// Place or move a word; returns the new state.
#[wasm_bindgen]
pub fn place_word_wasm(state: JsValue, word_id: usize, x: usize, y: usize, direction: &str) -> Result<JsValue, JsValue> {
    let mut puzzle = load_state(state)?;
    let direction: Direction = direction
        .parse()
        .map_err(|e: String| WasmError::bad_argument("direction", e))?;
    puzzle.place_word(word_id, x, y, direction).map_err(WasmError::from)?;
    to_js(&puzzle.state())
}

/// Take a word off the grid; returns the new state.
#[wasm_bindgen]
pub fn remove_word_wasm(state: JsValue, word_id: usize) -> Result<JsValue, JsValue> {
    let mut puzzle = load_state(state)?;
    puzzle.remove_word(word_id).map_err(WasmError::from)?;
    to_js(&puzzle.state())
}

/// Flip a cell between blocked and free; returns the new state.
#[wasm_bindgen]
pub fn toggle_blocked_wasm(state: JsValue, x: usize, y: usize) -> Result<JsValue, JsValue> {
    let mut puzzle = load_state(state)?;
    puzzle.toggle_blocked(x, y).map_err(WasmError::from)?;
    to_js(&puzzle.state())
}

/// Numbered cells of a state, row-major.
#[wasm_bindgen]
pub fn number_cells_wasm(state: JsValue) -> Result<JsValue, JsValue> {
    let puzzle = load_state(state)?;
    to_js(&puzzle.cells())
}

/// Parse `answer;clue` lines into `{id, answer, clue}[]`.
#[wasm_bindgen]
pub fn parse_word_list(text: &str) -> Result<JsValue, JsValue> {
    to_js(&WordList::parse_from_str(text).words)
}
