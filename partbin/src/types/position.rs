//! Grid coordinates for drawers and compartments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A drawer's cell inside a container grid.
///
/// The derived ordering is row-major, which is also the scan order used when
/// looking for the next free cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.column)
    }
}

/// Where an item sits inside its parent, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Drawer cell inside a container
    Cell(Position),
    /// Compartment index inside a drawer
    Compartment(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Cell(position) => write!(f, "{position}"),
            Location::Compartment(index) => write!(f, "compartment {index}"),
        }
    }
}

impl From<Position> for Location {
    fn from(position: Position) -> Self {
        Location::Cell(position)
    }
}
