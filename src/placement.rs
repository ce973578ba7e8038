//! Manual placement: put one word on the board, move it, or take it off.
//!
//! A [`Board`] is a [`Grid`] plus the table of where each word sits. Every
//! mutation is computed on a copy and only swapped in on success, so a failed
//! placement leaves the board exactly as it was.

use crate::errors::PlacementError;
use crate::grid::{word_path, Cell, Coord, Direction, Grid};
use crate::validate::{validate, Fit};
use crate::word::{Word, WordId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where a word sits: start cell, direction and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub direction: Direction,
    pub len: usize,
}

impl Placement {
    /// True if the placement's path runs through `(x, y)`.
    #[must_use]
    pub fn covers(&self, x: usize, y: usize) -> bool {
        match self.direction {
            Direction::Across => y == self.y && x >= self.x && x < self.x + self.len,
            Direction::Down => x == self.x && y >= self.y && y < self.y + self.len,
        }
    }

    /// Index of `(x, y)` within the word, if covered.
    #[must_use]
    pub fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        self.covers(x, y).then(|| match self.direction {
            Direction::Across => x - self.x,
            Direction::Down => y - self.y,
        })
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize)> {
        word_path(self.x, self.y, self.len, self.direction)
    }
}

/// A grid together with the placement of every word on it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Board {
    grid: Grid,
    placements: HashMap<WordId, Placement>,
}

impl Board {
    #[must_use]
    pub fn new(grid_size: usize) -> Self {
        Board { grid: Grid::new(grid_size), placements: HashMap::new() }
    }

    /// Wrap an existing grid and placement table. The caller vouches that the
    /// placements match the grid's cells.
    #[must_use]
    pub fn from_parts(grid: Grid, placements: HashMap<WordId, Placement>) -> Self {
        Board { grid, placements }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    #[must_use]
    pub fn placement(&self, word_id: WordId) -> Option<&Placement> {
        self.placements.get(&word_id)
    }

    #[must_use]
    pub fn placements(&self) -> &HashMap<WordId, Placement> {
        &self.placements
    }

    #[must_use]
    pub fn is_placed(&self, word_id: WordId) -> bool {
        self.placements.contains_key(&word_id)
    }

    /// Place (or move) `word` and return the validator's verdict.
    ///
    /// The word's old footprint is vacated before validating, so a word can be
    /// shifted over cells it used to occupy. On error nothing changes.
    ///
    /// # Errors
    ///
    /// Whatever [`validate`] reports for the new position.
    pub fn place(&mut self, word: &Word, x: usize, y: usize, direction: Direction) -> Result<Fit, PlacementError> {
        let (next, fit) = self.placed(word, x, y, direction)?;
        *self = next;
        Ok(fit)
    }

    /// Non-mutating form of [`Board::place`]: the board that would result.
    ///
    /// # Errors
    ///
    /// Whatever [`validate`] reports for the new position.
    pub fn placed(&self, word: &Word, x: usize, y: usize, direction: Direction) -> Result<(Board, Fit), PlacementError> {
        let mut next = self.clone();
        next.vacate(word.id);

        let fit = validate(word, x, y, direction, &next.grid)?;

        for (cx, cy, i) in word_path(x, y, word.len(), direction) {
            // normalized answers are ASCII
            let letter = word.normalized().as_bytes()[i] as char;
            next.grid.set(cx, cy, Cell::letter(letter, word.id, direction));
        }
        next.placements.insert(word.id, Placement { x, y, direction, len: word.len() });

        debug!("placed word {} at ({x}, {y}) {direction} with {} crossing(s)", word.id, fit.crossings);
        Ok((next, fit))
    }

    /// Take a word off the board. Returns false if it was not placed.
    ///
    /// Cells the word shares with another placed word stay, and are handed
    /// over to that word.
    pub fn remove(&mut self, word_id: WordId) -> bool {
        let was_placed = self.placements.contains_key(&word_id);
        self.vacate(word_id);
        was_placed
    }

    /// Flip `(x, y)` between blocked and free. Returns the new blocked state.
    ///
    /// # Errors
    ///
    /// [`PlacementError::OutOfBounds`] outside the grid,
    /// [`PlacementError::CellOccupied`] if the cell holds a letter.
    pub fn toggle_blocked(&mut self, x: usize, y: usize) -> Result<bool, PlacementError> {
        if !self.grid.in_bounds(x, y) {
            return Err(PlacementError::OutOfBounds { x, y, len: 1, direction: Direction::Across, grid_size: self.grid.size() });
        }
        match self.grid.get(x, y) {
            Some(cell) if cell.is_blocked => {
                self.grid.delete(x, y);
                Ok(false)
            }
            Some(cell) if cell.letter.is_some() => Err(PlacementError::CellOccupied { x, y }),
            _ => {
                self.grid.set(x, y, Cell::blocked());
                Ok(true)
            }
        }
    }

    /// Remove every cell, blocked ones included, and every placement.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.placements.clear();
    }

    /// Remove all placements but keep blocked cells.
    pub fn clear_words(&mut self) {
        let blocked: Vec<Coord> = self
            .grid
            .iter()
            .into_iter()
            .filter(|(_, cell)| cell.is_blocked)
            .map(|(coord, _)| coord)
            .collect();
        self.clear();
        for (x, y) in blocked {
            self.grid.set(x, y, Cell::blocked());
        }
    }

    /// Drop `word_id`'s ownership of its cells and its placement entry.
    fn vacate(&mut self, word_id: WordId) {
        self.placements.remove(&word_id);

        for (x, y) in self.grid.cells_of_word(word_id) {
            let heir = self
                .placements
                .iter()
                .find(|(_, p)| p.covers(x, y))
                .map(|(&id, p)| (id, p.direction));

            match (heir, self.grid.get(x, y).cloned()) {
                (Some((id, direction)), Some(cell)) => {
                    self.grid.set(x, y, Cell { owner: Some(id), direction: Some(direction), ..cell });
                }
                _ => {
                    self.grid.delete(x, y);
                }
            }
        }
    }
}
