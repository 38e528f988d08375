//! Shared value types for the labyrinth simulation.
//!
//! # Invariants
//! - Everything here is plain data or a pure function.
//! - The heading convention is defined once, in [`heading`], and every crate uses it.

pub mod heading;
pub mod random;
pub mod types;

pub use random::{SplitMix64, pick_index};
pub use types::{CellCoord, Pose};
