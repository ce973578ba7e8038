//! Generate error code documentation from the error enums themselves.
//!
//! Codes, descriptions, details and help text come straight from the
//! `code()`, `description()`, `details()` and `help()` methods of
//! `PlacementError`, `ImportError` and `AutoPlaceError`.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use korsord::autoplace::AutoPlaceError;
use korsord::errors::{ImportError, PlacementError};
use korsord::grid::Direction;
use std::time::Duration;

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            println!("### {}: {}\n", error.code(), error.description());
            println!("**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                println!("**How to fix:**");
                println!("```");
                println!("{}", help_text);
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{}", error);
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

fn all_placement_error_variants() -> Vec<PlacementError> {
    vec![
        PlacementError::EmptyAnswer,
        PlacementError::OutOfBounds { x: 12, y: 3, len: 6, direction: Direction::Across, grid_size: 15 },
        PlacementError::BlockedCell { x: 4, y: 7 },
        PlacementError::LetterConflict { x: 3, y: 0, existing: 'T', required: 'X' },
        PlacementError::UnknownWord { id: 42 },
        PlacementError::CellOccupied { x: 0, y: 0 },
    ]
}

fn all_import_error_variants() -> Vec<ImportError> {
    // InvalidJson--create by parsing broken JSON
    let json_error = serde_json::from_str::<serde_json::Value>("{ \"gridSize\": ").map(|_| ()).err();
    let mut errors: Vec<ImportError> = json_error.into_iter().map(ImportError::InvalidJson).collect();
    errors.extend([
        ImportError::InvalidGridSize { size: 0 },
        ImportError::CellOutOfBounds { x: 15, y: 2, grid_size: 15 },
        ImportError::InvalidLetter { x: 1, y: 1, letter: "7".to_string() },
        ImportError::BlockedCellHasLetter { x: 2, y: 2 },
        ImportError::DuplicateWordId { id: 3 },
    ]);
    errors
}

fn all_auto_place_error_variants() -> Vec<AutoPlaceError> {
    vec![
        AutoPlaceError::NoSolutionFound { words: 20 },
        AutoPlaceError::TimedOut { elapsed: Duration::from_secs(30) },
        AutoPlaceError::StepLimitReached { steps: 250_000 },
        AutoPlaceError::Cancelled,
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    println!("## Table of Contents\n");
    println!("- [Placement Errors (P001–P006)](#placement-errors)");
    println!("- [Auto-Placement Errors (A001–A004)](#auto-placement-errors)");
    println!("- [Import Errors (I001–I006)](#import-errors)");
    println!("- [How to Use Error Codes](#how-to-use-error-codes)\n");

    println!("## Placement Errors\n");
    println!("A word cannot go where it was asked to go. The grid is left unchanged.\n");
    generate_error_docs!(all_placement_error_variants());

    println!("## Auto-Placement Errors\n");
    println!("The automatic layout search ended without a layout to return.\n");
    generate_error_docs!(all_auto_place_error_variants());

    println!("## Import Errors\n");
    println!("A saved puzzle state or JSON word list could not be loaded.\n");
    generate_error_docs!(all_import_error_variants());

    println!("\n## How to Use Error Codes\n");
    println!("When you see an error like:\n");
    println!("```");
    println!("Error: no solution found for 20 word(s) (A001)");
    println!("Try a larger grid size, fewer words, or shorter answers");
    println!("```\n");
    println!("1. Note the error code (e.g., `A001`)");
    println!("2. Look it up in this document for detailed explanation");
    println!("3. Follow the suggested resolution steps\n");
}
