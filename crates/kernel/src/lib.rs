//! Labyrinth Kernel: authoritative simulation state, motion, goal detection,
//! deterministic replay.
//!
//! # Invariants
//! - A session is a pure function of (config, seed, action sequence).
//! - The player pose is mutated only by [`MotionController`].
//! - Every mutation is recorded as a [`SimEvent`].

pub mod config;
pub mod motion;
pub mod portal;
pub mod simulation;

pub use config::{ConfigError, SimConfig};
pub use motion::{AxisResolution, MotionController};
pub use portal::{DEFAULT_PORTAL_THRESHOLD, PortalDetector};
pub use simulation::{Outcome, Phase, SimError, SimEvent, Simulation};
