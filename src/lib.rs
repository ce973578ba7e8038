//! Crossword grid placement engine.
//!
//! Words ([`word::Word`]) are placed on a fixed-size square [`grid::Grid`]
//! either one at a time through [`placement::Board`] (or the host-facing
//! [`puzzle::Puzzle`]) or all at once by [`autoplace::AutoPlacer`]. Clue
//! numbers are derived from the grid by [`numbering`].

// Library API shared by the CLI and the WASM build
pub mod autoplace;
pub mod errors;
pub mod grid;
pub mod logging;
pub mod normalize;
pub mod numbering;
pub mod placement;
pub mod puzzle;
pub mod ranker;
pub mod validate;
pub mod word;
pub mod word_list;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
