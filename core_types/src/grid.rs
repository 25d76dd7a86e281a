//! Grid coordinates for the panel layout

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step on the panel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Lowercase name, as used in command ids (`focus-panel-up`)
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A cell of the panel grid
///
/// Positions are unique among live panels but the grid may be sparse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: u32,
    pub column: u32,
}

impl GridPosition {
    /// The top-left cell
    pub const ORIGIN: Self = Self { row: 0, column: 0 };

    /// Creates a new grid position
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Returns the adjacent cell in `direction`
    ///
    /// Returns `None` when the step would leave the grid (row or column below 0).
    pub fn shifted(&self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Self::new(row, self.column)),
            Direction::Down => self.row.checked_add(1).map(|row| Self::new(row, self.column)),
            Direction::Left => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(self.row, column)),
            Direction::Right => self
                .column
                .checked_add(1)
                .map(|column| Self::new(self.row, column)),
        }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}
