//! Developer Tooling: maze inspector, ASCII dumps, structural validation.
//!
//! # Invariants
//! - Tools are read-only with respect to the simulation.

mod inspector;
mod validate;

pub use inspector::{MazeInspector, SimSummary};
pub use validate::{MazeReport, ValidationError, validate};
