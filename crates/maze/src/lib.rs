//! Maze: grid storage, perfect-maze generation, and collision queries.
//!
//! # Invariants
//! - A `Grid` is immutable once built; every reader shares it by reference.
//! - Generated PATH cells form a spanning tree rooted at (1,1).
//! - Collision queries are fail-closed: anything out of bounds is a wall.

mod collision;
mod generator;
mod grid;

pub use collision::CollisionField;
pub use generator::{MIN_MAZE_SIZE, Maze, MazeGenerator, START_CELL, find_goal};
pub use grid::{Cell, Grid};

/// Errors from building or validating a maze.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("maze size must be odd and at least {min}, got {size}")]
    InvalidSize { size: usize, min: usize },
    #[error("malformed grid at row {row}: {reason}")]
    MalformedGrid { row: usize, reason: String },
}
