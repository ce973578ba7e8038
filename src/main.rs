use clap::Parser;
use instant::Instant;
use std::process::ExitCode;
use std::time::Duration;

use korsord::autoplace::{AutoPlaceError, AutoPlaceOptions, AutoPlacer, SearchStatus};
use korsord::errors::ImportError;
use korsord::grid::Direction;
use korsord::numbering::NumberingRule;
use korsord::puzzle::Puzzle;
use korsord::word_list::WordList;

/// Lay out a crossword from a word list
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Word list file: `answer;clue` per line, or a JSON array when the name ends in .json
    words: String,

    /// Side length of the square grid
    #[arg(short = 'g', long, default_value_t = korsord::grid::DEFAULT_GRID_SIZE)]
    grid_size: usize,

    /// Time budget in seconds
    #[arg(short = 't', long, default_value_t = 30)]
    time_budget: u64,

    /// Maximum number of search steps
    #[arg(long)]
    max_steps: Option<usize>,

    /// Search every branch and keep the most compact layout
    #[arg(long)]
    exhaustive: bool,

    /// Print the puzzle state as JSON instead of the grid and clue list
    #[arg(long)]
    json: bool,

    /// Only number cells followed by a letter
    #[arg(long)]
    strict_numbering: bool,
}

/// Entry point of the korsord CLI.
///
/// Delegates to [`try_main`], printing any error with its code and help text
/// before exiting with code 1.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("KORSORD_DEBUG").is_ok();
    korsord::logging::init_logger(debug_enabled);

    log::debug!("korsord {} ({})", env!("CARGO_PKG_VERSION"), env!("KORSORD_GIT_HASH"));

    if let Err(e) = try_main() {
        if let Some(auto_err) = e.downcast_ref::<AutoPlaceError>() {
            eprintln!("Error: {}", auto_err.display_detailed());
        } else if let Some(import_err) = e.downcast_ref::<ImportError>() {
            eprintln!("Error: {}", import_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Load the word list, auto-place it and print the result.
///
/// The grid and clues go to stdout, timings and unplaced words to stderr.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let t_load = Instant::now();
    let word_list = WordList::load_from_path(&cli.words)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    let rule = if cli.strict_numbering { NumberingRule::Occupied } else { NumberingRule::GridSpace };
    let mut puzzle = Puzzle::new(cli.grid_size, word_list.words)?.with_numbering_rule(rule);

    let defaults = AutoPlaceOptions::default();
    let options = AutoPlaceOptions {
        time_budget: Duration::from_secs(cli.time_budget),
        max_steps: cli.max_steps.unwrap_or(defaults.max_steps),
        exhaustive: cli.exhaustive,
        ..defaults
    };
    let mut placer = AutoPlacer::new(options);
    let result = puzzle.auto_place(&mut placer)?;

    if cli.json {
        println!("{}", puzzle.to_json()?);
    } else {
        print!("{}", puzzle.grid());
        println!();
        for direction in Direction::ALL {
            println!("{}:", direction.as_str().to_uppercase());
            for clue in puzzle.clues().iter().filter(|c| c.direction == direction) {
                let number = clue.number.map_or_else(|| "-".to_string(), |n| n.to_string());
                println!("{number:>3}. {} ({})", clue.clue, clue.answer.len());
            }
        }
    }

    if let SearchStatus::Stopped(reason) = result.status {
        eprintln!("⚠️  Search stopped early ({reason:?}); showing the best layout found");
    }
    let unplaced = puzzle.unplaced_words();
    if !unplaced.is_empty() {
        let names: Vec<&str> = unplaced.iter().map(|w| w.answer.as_str()).collect();
        eprintln!("Unplaced: {}", names.join(", "));
    }

    eprintln!(
        "Loaded {} words in {:.3}s; placed {} in {:.3}s ({} steps, score {:.1}).",
        puzzle.words().len(),
        load_secs,
        result.placed.len(),
        result.elapsed.as_secs_f64(),
        result.steps,
        result.score
    );

    Ok(())
}
