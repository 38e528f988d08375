//! Input: what the external loop feeds the simulation each tick.
//!
//! # Invariants
//! - The kernel consumes actions, never raw device events.
//! - One tick of input becomes exactly one move and one rotate.

pub mod action;

pub use action::{Action, MoveIntent, TickInput};
