//! Sparse, coordinate-keyed crossword grid.
//!
//! Only cells that hold a letter or are blocked exist in the store. The cell
//! map sits behind an [`Arc`] and is copied on write, so cloning a [`Grid`] is
//! cheap and every mutation produces an independent container. The search in
//! [`crate::autoplace`] relies on this to keep sibling branches apart.
//!
//! Bounds are *not* checked by [`Grid::get`], [`Grid::set`] or
//! [`Grid::delete`]; callers check with [`Grid::in_bounds`] /
//! [`Grid::path_in_bounds`] first.

use crate::word::WordId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Side length used when the host does not ask for anything else.
pub const DEFAULT_GRID_SIZE: usize = 15;

/// A grid coordinate, `(x, y)`.
pub type Coord = (usize, usize);

/// Placement direction: across increments `x`, down increments `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Both directions, in enumeration order (across before down).
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    /// Unit step `(dx, dy)`.
    #[must_use]
    pub fn step(self) -> (usize, usize) {
        match self {
            Direction::Across => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "across" | "a" | "h" | "horizontal" => Ok(Direction::Across),
            "down" | "d" | "v" | "vertical" => Ok(Direction::Down),
            other => Err(format!("unknown direction '{other}' (expected 'across' or 'down')")),
        }
    }
}

/// One stored cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub letter: Option<char>,
    pub is_blocked: bool,
    pub owner: Option<WordId>,
    /// Direction of the word that last wrote the letter.
    pub direction: Option<Direction>,
}

impl Cell {
    #[must_use]
    pub fn blocked() -> Self {
        Cell { is_blocked: true, ..Cell::default() }
    }

    #[must_use]
    pub fn letter(letter: char, owner: WordId, direction: Direction) -> Self {
        Cell {
            letter: Some(letter),
            is_blocked: false,
            owner: Some(owner),
            direction: Some(direction),
        }
    }

    /// True if `word_id` is the recorded owner of this cell.
    #[must_use]
    pub fn is_owned_by(&self, word_id: WordId) -> bool {
        self.owner == Some(word_id)
    }
}

/// Lazy walk over the cells of a word: yields `(x, y, index_in_word)`.
///
/// A pure function of its inputs; clone it to restart.
#[derive(Debug, Clone)]
pub struct WordPath {
    start_x: usize,
    start_y: usize,
    len: usize,
    direction: Direction,
    index: usize,
}

impl Iterator for WordPath {
    type Item = (usize, usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let (dx, dy) = self.direction.step();
        let i = self.index;
        self.index += 1;
        Some((self.start_x + dx * i, self.start_y + dy * i, i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WordPath {}

/// Build the path of a word of length `len` starting at `(start_x, start_y)`.
#[must_use]
pub fn word_path(start_x: usize, start_y: usize, len: usize, direction: Direction) -> WordPath {
    WordPath { start_x, start_y, len, direction, index: 0 }
}

/// Inclusive bounding box of lettered cells: `(min_x, min_y, max_x, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    #[must_use]
    pub fn area(&self) -> usize {
        (self.max_x - self.min_x + 1) * (self.max_y - self.min_y + 1)
    }
}

/// Fixed-size square grid holding a sparse cell map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Arc<HashMap<Coord, Cell>>,
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(DEFAULT_GRID_SIZE)
    }
}

impl Grid {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Grid { size, cells: Arc::new(HashMap::new()) }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cells.get(&(x, y))
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        Arc::make_mut(&mut self.cells).insert((x, y), cell);
    }

    pub fn delete(&mut self, x: usize, y: usize) -> Option<Cell> {
        if !self.cells.contains_key(&(x, y)) {
            return None;
        }
        Arc::make_mut(&mut self.cells).remove(&(x, y))
    }

    /// Remove every cell.
    pub fn clear(&mut self) {
        self.cells = Arc::new(HashMap::new());
    }

    #[must_use]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// True if both ends of the path lie inside the grid. An empty path is
    /// never in bounds.
    #[must_use]
    pub fn path_in_bounds(&self, start_x: usize, start_y: usize, len: usize, direction: Direction) -> bool {
        if len == 0 {
            return false;
        }
        let (dx, dy) = direction.step();
        let end_x = start_x.saturating_add(dx * (len - 1));
        let end_y = start_y.saturating_add(dy * (len - 1));
        self.in_bounds(start_x, start_y) && self.in_bounds(end_x, end_y)
    }

    #[must_use]
    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(|c| c.is_blocked)
    }

    #[must_use]
    pub fn letter_at(&self, x: usize, y: usize) -> Option<char> {
        self.get(x, y).and_then(|c| c.letter)
    }

    /// Coordinates of every cell whose owner is `word_id`, in row-major order.
    #[must_use]
    pub fn cells_of_word(&self, word_id: WordId) -> Vec<Coord> {
        let mut coords: Vec<Coord> = self
            .cells
            .iter()
            .filter(|(_, cell)| cell.is_owned_by(word_id))
            .map(|(&coord, _)| coord)
            .collect();
        coords.sort_unstable_by_key(|&(x, y)| (y, x));
        coords
    }

    /// All stored cells in row-major order (y outer, x inner).
    #[must_use]
    pub fn iter(&self) -> Vec<(Coord, &Cell)> {
        let mut cells: Vec<(Coord, &Cell)> = self.cells.iter().map(|(&c, cell)| (c, cell)).collect();
        cells.sort_unstable_by_key(|&((x, y), _)| (y, x));
        cells
    }

    /// Number of stored cells (lettered or blocked).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if no cell holds a letter. Blocked cells do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.cells.values().any(|c| c.letter.is_some())
    }

    #[must_use]
    pub fn letter_count(&self) -> usize {
        self.cells.values().filter(|c| c.letter.is_some()).count()
    }

    /// Bounding box of lettered cells, `None` for a grid without letters.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.letter.is_some())
            .map(|(&coord, _)| coord)
            .fold(None, |acc: Option<BoundingBox>, (x, y)| {
                Some(match acc {
                    None => BoundingBox { min_x: x, min_y: y, max_x: x, max_y: y },
                    Some(b) => BoundingBox {
                        min_x: b.min_x.min(x),
                        min_y: b.min_y.min(y),
                        max_x: b.max_x.max(x),
                        max_y: b.max_y.max(y),
                    },
                })
            })
    }
}

impl fmt::Display for Grid {
    /// `#` for blocked cells, `.` for empty ones, letters otherwise; cells
    /// separated by a space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let c = match self.get(x, y) {
                    Some(cell) if cell.is_blocked => '#',
                    Some(Cell { letter: Some(l), .. }) => *l,
                    _ => '.',
                };
                write!(f, "{c}")?;
                if x != self.size - 1 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
