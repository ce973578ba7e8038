//! Automatic layout of a whole word list.
//!
//! A depth-first backtracking search over the words, longest first. For each
//! word the [ranker](crate::ranker) proposes positions; the best few are tried
//! in turn on a copy of the board, and a word that cannot be placed is skipped
//! (left unplaced). Too many consecutive skips abandon the branch.
//!
//! # Error Handling
//!
//! The search uses [`AutoPlaceError`]:
//!
//! - A001: `NoSolutionFound` (Every branch ran out of skips)
//! - A002: `TimedOut` (Wall-clock budget expired before a layout was found)
//! - A003: `StepLimitReached` (Node budget exhausted before a layout was found)
//! - A004: `Cancelled` (The caller cancelled the search)
//!
//! None of these are fatal: the input board is never modified.
//!
//! # Examples
//!
//! ```
//! use korsord::autoplace::{AutoPlacer, AutoPlaceOptions};
//! use korsord::placement::Board;
//! use korsord::word::Word;
//!
//! let words = vec![
//!     Word::new(0, "katt", "Spinner gärna"),
//!     Word::new(1, "tunn", "Inte tjock"),
//!     Word::new(2, "nu", "Inte sedan"),
//! ];
//! let board = Board::new(15);
//! let result = AutoPlacer::new(AutoPlaceOptions::default()).solve(&words, &board)?;
//! assert!(result.unplaced.is_empty());
//! println!("{}", result.board.grid());
//! # Ok::<(), korsord::autoplace::AutoPlaceError>(())
//! ```

use crate::grid::Grid;
use crate::placement::Board;
use crate::ranker::rank;
use crate::word::{Word, WordId};
use instant::Instant;
use log::{debug, info, warn};
use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// The amount of time (in seconds) we allow a search to run
const TIME_BUDGET: u64 = 30;
// The number of search nodes we allow a search to visit
const DEFAULT_MAX_STEPS: usize = 250_000;
// How many of the ranked positions are tried per word
const TOP_CANDIDATES: usize = 5;
// Consecutive skipped words tolerated on one branch
const MAX_SKIPS: usize = 3;
// Weight of each lettered cell in the layout score
const CELL_WEIGHT: f64 = 0.5;

/// Search limits and mode.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoPlaceOptions {
    /// Ranked positions tried per word.
    pub top_candidates: usize,
    /// A branch is abandoned once more than this many words in a row are skipped.
    pub max_skips: usize,
    /// Wall-clock budget for the whole search.
    pub time_budget: Duration,
    /// Maximum number of search nodes visited.
    pub max_steps: usize,
    /// Keep searching after the first complete layout and return the best one.
    pub exhaustive: bool,
}

impl Default for AutoPlaceOptions {
    fn default() -> Self {
        AutoPlaceOptions {
            top_candidates: TOP_CANDIDATES,
            max_skips: MAX_SKIPS,
            time_budget: Duration::from_secs(TIME_BUDGET),
            max_steps: DEFAULT_MAX_STEPS,
            exhaustive: false,
        }
    }
}

/// Shared flag a host can flip (from any thread) to stop a running search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Advisory progress report: which word the search is currently trying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Index into the length-sorted word order.
    pub word_index: usize,
    pub word_id: WordId,
    pub total: usize,
}

/// Why a search stopped before it was done.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopReason {
    TimedOut { elapsed: Duration },
    StepLimitReached { steps: usize },
    Cancelled,
}

/// How a successful search ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStatus {
    /// The first complete layout was taken (default mode).
    FirstLayout,
    /// Exhaustive mode explored every branch.
    SearchExhausted,
    /// Exhaustive mode stopped early; the best layout so far is returned.
    Stopped(StopReason),
}

/// A successful search.
#[derive(Debug, Clone)]
pub struct AutoPlaceResult {
    pub board: Board,
    /// Ids of words on the board, in input order.
    pub placed: Vec<WordId>,
    /// Ids of input words left off the board, in input order.
    pub unplaced: Vec<WordId>,
    /// [`layout_score`] of the board.
    pub score: f64,
    /// Search nodes visited.
    pub steps: usize,
    pub elapsed: Duration,
    pub status: SearchStatus,
}

/// Unified error type for the auto placer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AutoPlaceError {
    /// Every branch gave up after too many consecutive unplaceable words.
    #[error("no solution found for {words} word(s)")]
    NoSolutionFound { words: usize },

    #[error("timed out after {:.1}s without a complete layout", .elapsed.as_secs_f64())]
    TimedOut { elapsed: Duration },

    #[error("gave up after {steps} search steps without a complete layout")]
    StepLimitReached { steps: usize },

    #[error("search cancelled")]
    Cancelled,
}

impl AutoPlaceError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            AutoPlaceError::NoSolutionFound { .. } => "A001",
            AutoPlaceError::TimedOut { .. } => "A002",
            AutoPlaceError::StepLimitReached { .. } => "A003",
            AutoPlaceError::Cancelled => "A004",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            AutoPlaceError::NoSolutionFound { .. } => "Every branch ran out of skips",
            AutoPlaceError::TimedOut { .. } => "Wall-clock budget expired before a layout was found",
            AutoPlaceError::StepLimitReached { .. } => "Node budget exhausted before a layout was found",
            AutoPlaceError::Cancelled => "The caller cancelled the search",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            AutoPlaceError::NoSolutionFound { .. } => "The search skips words it cannot place, but abandons a branch after too many consecutive skips. Every branch was abandoned, so the word list does not fit this grid.",
            AutoPlaceError::TimedOut { .. } => "The search has a wall-clock budget and ran out of time before reaching a complete layout.",
            AutoPlaceError::StepLimitReached { .. } => "The search has a budget of visited nodes and used it up before reaching a complete layout.",
            AutoPlaceError::Cancelled => "The cancellation token passed to the search was triggered.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            AutoPlaceError::NoSolutionFound { .. } => Some("Try a larger grid size, fewer words, or shorter answers"),
            AutoPlaceError::TimedOut { .. } => Some("Raise the time budget or reduce the number of words"),
            AutoPlaceError::StepLimitReached { .. } => Some("Raise the step limit or reduce the number of words"),
            AutoPlaceError::Cancelled => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

impl From<StopReason> for AutoPlaceError {
    fn from(reason: StopReason) -> Self {
        match reason {
            StopReason::TimedOut { elapsed } => AutoPlaceError::TimedOut { elapsed },
            StopReason::StepLimitReached { steps } => AutoPlaceError::StepLimitReached { steps },
            StopReason::Cancelled => AutoPlaceError::Cancelled,
        }
    }
}

/// Compactness score of a layout: `-boundingBoxArea + 0.5 * letterCells`.
/// Larger is better.
#[must_use]
pub fn layout_score(grid: &Grid) -> f64 {
    let area = grid.bounding_box().map_or(0, |bb| bb.area());
    -(area as f64) + CELL_WEIGHT * grid.letter_count() as f64
}

/// Simple helper to enforce a wall-clock time limit.
struct TimeBudget {
    start: Instant,
    limit: Duration,
}

impl TimeBudget {
    fn new(limit: Duration) -> Self {
        Self { start: Instant::now(), limit }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn expired(&self) -> bool {
        self.start.elapsed() >= self.limit
    }
}

/// Runs [`solve`](AutoPlacer::solve) with the configured limits, an optional
/// cancellation token and an optional progress callback.
pub struct AutoPlacer<'p> {
    options: AutoPlaceOptions,
    cancel: Option<CancelToken>,
    progress: Option<Box<dyn FnMut(Progress) + 'p>>,
}

impl<'p> AutoPlacer<'p> {
    #[must_use]
    pub fn new(options: AutoPlaceOptions) -> Self {
        AutoPlacer { options, cancel: None, progress: None }
    }

    #[must_use]
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, f: impl FnMut(Progress) + 'p) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn options(&self) -> &AutoPlaceOptions {
        &self.options
    }

    /// Lay out `words` on (a copy of) `board`.
    ///
    /// Existing placements of these words are removed first; blocked cells and
    /// any other words already on the board stay. Words whose answer
    /// normalizes to nothing are left unplaced. Word ids must be unique.
    ///
    /// # Errors
    ///
    /// [`AutoPlaceError::NoSolutionFound`] when every branch gives up, or the
    /// budget/cancellation variants when the search is stopped before a
    /// complete layout exists.
    pub fn solve(&mut self, words: &[Word], board: &Board) -> Result<AutoPlaceResult, AutoPlaceError> {
        let mut start = board.clone();
        for word in words {
            start.remove(word.id);
        }

        let mut order: Vec<&Word> = words.iter().filter(|w| !w.is_empty()).collect();
        for dropped in words.iter().filter(|w| w.is_empty()) {
            warn!("word {} ({:?}) has no letters and will not be placed", dropped.id, dropped.answer);
        }
        // stable: equal lengths keep input order
        order.sort_by_key(|w| Reverse(w.len()));

        info!(
            "auto-placing {} word(s) on a {}x{} grid (exhaustive: {})",
            order.len(),
            start.size(),
            start.size(),
            self.options.exhaustive
        );

        let mut search = Search {
            words: &order,
            options: &self.options,
            budget: TimeBudget::new(self.options.time_budget),
            cancel: self.cancel.as_ref(),
            progress: self.progress.as_deref_mut(),
            steps: 0,
            best: None,
        };

        let outcome = search.run(0, 0, &start);
        let steps = search.steps;
        let elapsed = search.budget.elapsed();
        let best = search.best.take();

        let status = match (outcome, &best) {
            (Ok(_), Some(_)) if self.options.exhaustive => SearchStatus::SearchExhausted,
            (Ok(_), Some(_)) => SearchStatus::FirstLayout,
            (Ok(_), None) => {
                info!("no solution found after {steps} step(s)");
                return Err(AutoPlaceError::NoSolutionFound { words: order.len() });
            }
            (Err(reason), Some(_)) => {
                warn!("search stopped early ({reason:?}); returning best layout so far");
                SearchStatus::Stopped(reason)
            }
            (Err(reason), None) => {
                warn!("search stopped early ({reason:?}) without a complete layout");
                return Err(reason.into());
            }
        };
        let Some(best) = best else {
            return Err(AutoPlaceError::NoSolutionFound { words: order.len() });
        };

        let (placed, unplaced): (Vec<WordId>, Vec<WordId>) =
            words.iter().map(|w| w.id).partition(|&id| best.board.is_placed(id));

        info!(
            "placed {}/{} word(s) in {} step(s), {:.3}s",
            placed.len(),
            words.len(),
            steps,
            elapsed.as_secs_f64()
        );

        Ok(AutoPlaceResult {
            board: best.board,
            placed,
            unplaced,
            score: best.score,
            steps,
            elapsed,
            status,
        })
    }
}

struct Layout {
    board: Board,
    placed: usize,
    score: f64,
}

/// State of one running search.
struct Search<'a, 'p> {
    words: &'a [&'a Word],
    options: &'a AutoPlaceOptions,
    budget: TimeBudget,
    cancel: Option<&'a CancelToken>,
    progress: Option<&'a mut (dyn FnMut(Progress) + 'p)>,
    steps: usize,
    best: Option<Layout>,
}

impl Search<'_, '_> {
    /// Visit word `i` with `skips` consecutive skips behind it.
    ///
    /// Returns whether a complete layout was reached below this node.
    fn run(&mut self, i: usize, skips: usize, board: &Board) -> Result<bool, StopReason> {
        self.tick()?;

        if i == self.words.len() {
            self.record(board);
            return Ok(true);
        }
        if skips > self.options.max_skips {
            debug!("abandoning branch at word index {i} after {skips} skips");
            return Ok(false);
        }

        let word = self.words[i];
        if let Some(report) = self.progress.as_deref_mut() {
            report(Progress { word_index: i, word_id: word.id, total: self.words.len() });
        }

        let mut completed = false;
        for candidate in rank(word, board.grid()).into_iter().take(self.options.top_candidates) {
            let Ok((next, _)) = board.placed(word, candidate.x, candidate.y, candidate.direction) else {
                continue;
            };
            if self.run(i + 1, 0, &next)? {
                if !self.options.exhaustive {
                    return Ok(true);
                }
                completed = true;
            }
        }
        if completed {
            return Ok(true);
        }

        debug!("skipping word {} ({})", word.id, word.normalized());
        self.run(i + 1, skips + 1, board)
    }

    fn tick(&mut self) -> Result<(), StopReason> {
        self.steps += 1;
        if self.cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(StopReason::Cancelled);
        }
        if self.steps > self.options.max_steps {
            return Err(StopReason::StepLimitReached { steps: self.steps - 1 });
        }
        if self.budget.expired() {
            return Err(StopReason::TimedOut { elapsed: self.budget.elapsed() });
        }
        Ok(())
    }

    /// Keep `board` if it beats the best layout so far: more placed words
    /// first, then higher [`layout_score`].
    fn record(&mut self, board: &Board) {
        let placed = board.placements().len();
        let score = layout_score(board.grid());
        let better = match &self.best {
            None => true,
            Some(best) => (placed, score) > (best.placed, best.score),
        };
        if better {
            debug!("new best layout: {placed} word(s), score {score:.1}");
            self.best = Some(Layout { board: board.clone(), placed, score });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use crate::placement::Placement;

    fn words(answers: &[&str]) -> Vec<Word> {
        answers.iter().enumerate().map(|(i, a)| Word::new(i, *a, format!("ledtråd {i}"))).collect()
    }

    fn letters_of(board: &Board, p: &Placement) -> String {
        p.cells().filter_map(|(x, y, _)| board.grid().letter_at(x, y)).collect()
    }

    fn assert_consistent(board: &Board, words: &[Word]) {
        for word in words {
            if let Some(p) = board.placement(word.id) {
                assert_eq!(letters_of(board, p), word.normalized(), "word {} corrupted", word.id);
            }
        }
    }

    #[test]
    fn test_places_crossing_words() {
        let ws = words(&["katt", "tunn", "nu"]);
        let result = AutoPlacer::new(AutoPlaceOptions::default()).solve(&ws, &Board::new(15)).unwrap();

        assert_eq!(result.placed, vec![0, 1, 2]);
        assert!(result.unplaced.is_empty());
        assert_eq!(result.status, SearchStatus::FirstLayout);
        assert_consistent(&result.board, &ws);
        assert!((result.score - layout_score(result.board.grid())).abs() < 1e-9);
    }

    #[test]
    fn test_longest_word_goes_first_and_is_centred() {
        let ws = words(&["ek", "björk", "gran"]);
        let result = AutoPlacer::new(AutoPlaceOptions::default()).solve(&ws, &Board::new(15)).unwrap();
        let first = result.board.placement(1).unwrap();
        assert_eq!((first.x, first.y, first.direction), (7, 7, Direction::Across));
        assert_consistent(&result.board, &ws);
    }

    #[test]
    fn test_crossings_are_preferred() {
        let ws = words(&["katt", "tunn"]);
        let result = AutoPlacer::new(AutoPlaceOptions::default()).solve(&ws, &Board::new(15)).unwrap();
        // TUNN shares a T with KATT, so the board has 7 letters rather than 8
        assert_eq!(result.board.grid().letter_count(), 7);
    }

    #[test]
    fn test_too_long_words_are_skipped() {
        let ws = words(&["katt", "abcdefghijklmnopq", "tunn"]);
        let result = AutoPlacer::new(AutoPlaceOptions::default()).solve(&ws, &Board::new(15)).unwrap();
        assert_eq!(result.unplaced, vec![1]);
        assert_eq!(result.placed, vec![0, 2]);
    }

    #[test]
    fn test_empty_answers_are_left_unplaced() {
        let ws = words(&["sol", "???"]);
        let result = AutoPlacer::new(AutoPlaceOptions::default()).solve(&ws, &Board::new(5)).unwrap();
        assert_eq!(result.placed, vec![0]);
        assert_eq!(result.unplaced, vec![1]);
    }

    #[test]
    fn test_no_solution_found() {
        let long = "a".repeat(16);
        let answers: Vec<&str> = (0..20).map(|_| long.as_str()).collect();
        let ws = words(&answers);
        let board = Board::new(15);
        let err = AutoPlacer::new(AutoPlaceOptions::default()).solve(&ws, &board).unwrap_err();
        assert_eq!(err, AutoPlaceError::NoSolutionFound { words: 20 });
        assert_eq!(err.code(), "A001");
        assert!(board.grid().is_empty());
    }

    #[test]
    fn test_few_unplaceable_words_still_complete() {
        // three skips are tolerated, the fourth in a row is not
        let long = "a".repeat(16);
        let ws = words(&[&long, &long, &long]);
        let result = AutoPlacer::new(AutoPlaceOptions::default()).solve(&ws, &Board::new(15)).unwrap();
        assert!(result.placed.is_empty());
        assert_eq!(result.unplaced, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_word_list() {
        let result = AutoPlacer::new(AutoPlaceOptions::default()).solve(&[], &Board::new(5)).unwrap();
        assert!(result.placed.is_empty());
        assert!(result.board.grid().is_empty());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancelToken::new();
        token.cancel();
        let err = AutoPlacer::new(AutoPlaceOptions::default())
            .with_cancel(token)
            .solve(&words(&["katt"]), &Board::new(5))
            .unwrap_err();
        assert_eq!(err, AutoPlaceError::Cancelled);
    }

    #[test]
    fn test_step_limit() {
        let options = AutoPlaceOptions { max_steps: 1, ..AutoPlaceOptions::default() };
        let err = AutoPlacer::new(options).solve(&words(&["katt", "tunn"]), &Board::new(5)).unwrap_err();
        assert_eq!(err, AutoPlaceError::StepLimitReached { steps: 1 });
    }

    #[test]
    fn test_zero_time_budget() {
        let options = AutoPlaceOptions { time_budget: Duration::ZERO, ..AutoPlaceOptions::default() };
        let err = AutoPlacer::new(options).solve(&words(&["katt"]), &Board::new(5)).unwrap_err();
        assert!(matches!(err, AutoPlaceError::TimedOut { .. }));
    }

    #[test]
    fn test_progress_reports_word_indices() {
        let mut seen = Vec::new();
        {
            let mut placer = AutoPlacer::new(AutoPlaceOptions::default()).with_progress(|p| seen.push(p));
            placer.solve(&words(&["ö", "katt", "tak"]), &Board::new(9)).unwrap();
        }
        assert_eq!(seen.first().map(|p| (p.word_index, p.word_id, p.total)), Some((0, 1, 3)));
        assert!(seen.iter().any(|p| p.word_index == 2));
    }

    #[test]
    fn test_keeps_blocked_cells_and_other_words() {
        let mut board = Board::new(9);
        board.toggle_blocked(4, 4).unwrap();
        let other = Word::new(99, "ost", "");
        board.place(&other, 0, 0, Direction::Across).unwrap();

        let ws = words(&["hatt", "tak"]);
        let result = AutoPlacer::new(AutoPlaceOptions::default()).solve(&ws, &board).unwrap();
        assert!(result.board.grid().is_blocked(4, 4));
        assert_eq!(result.board.placement(99), board.placement(99));
        assert_consistent(&result.board, &ws);
        assert_eq!(letters_of(&result.board, result.board.placement(99).unwrap()), "OST");
    }

    #[test]
    fn test_replaces_existing_placements_of_input_words() {
        let ws = words(&["katt"]);
        let mut board = Board::new(9);
        board.place(&ws[0], 0, 0, Direction::Down).unwrap();
        let result = AutoPlacer::new(AutoPlaceOptions::default()).solve(&ws, &board).unwrap();
        assert_eq!(result.board.grid().letter_count(), 4);
        assert_eq!(result.board.grid().cells_of_word(0).len(), 4);
    }

    #[test]
    fn test_exhaustive_is_at_least_as_good() {
        let ws = words(&["hus", "sol", "lus"]);
        let first = AutoPlacer::new(AutoPlaceOptions::default()).solve(&ws, &Board::new(7)).unwrap();
        let options = AutoPlaceOptions { exhaustive: true, ..AutoPlaceOptions::default() };
        let best = AutoPlacer::new(options).solve(&ws, &Board::new(7)).unwrap();

        assert_eq!(best.status, SearchStatus::SearchExhausted);
        assert!(best.placed.len() >= first.placed.len());
        if best.placed.len() == first.placed.len() {
            assert!(best.score >= first.score);
        }
        assert!(best.steps >= first.steps);
        assert_consistent(&best.board, &ws);
    }

    #[test]
    fn test_layout_score() {
        let mut board = Board::new(9);
        assert_eq!(layout_score(board.grid()), 0.0);
        board.place(&Word::new(0, "katt", ""), 0, 0, Direction::Across).unwrap();
        assert!((layout_score(board.grid()) - (-4.0 + 2.0)).abs() < 1e-9);
        board.place(&Word::new(1, "tunn", ""), 3, 0, Direction::Down).unwrap();
        assert!((layout_score(board.grid()) - (-16.0 + 3.5)).abs() < 1e-9);
    }

    #[test]
    fn test_error_codes_are_unique() {
        let errors = [
            AutoPlaceError::NoSolutionFound { words: 1 },
            AutoPlaceError::TimedOut { elapsed: Duration::from_secs(1) },
            AutoPlaceError::StepLimitReached { steps: 10 },
            AutoPlaceError::Cancelled,
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(AutoPlaceError::code).collect();
        assert_eq!(codes.len(), errors.len());
        assert!(errors[0].display_detailed().contains("larger grid"));
    }
}
