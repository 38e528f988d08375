use std::path::Path;

use labyrinth_maze::{MazeError, MazeGenerator};
use serde::{Deserialize, Serialize};

use crate::portal::DEFAULT_PORTAL_THRESHOLD;

/// Errors from loading or validating a [`SimConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("player_radius must be in (0, 0.5), got {0}")]
    RadiusOutOfRange(f32),
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Tunables for one simulation session.
///
/// Loadable from YAML; missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Side length of the square grid. Odd, at least 5.
    pub maze_size: usize,
    /// Half-width of the player's collision square, in world units.
    pub player_radius: f32,
    /// Distance covered per tick per held direction.
    pub move_speed: f32,
    /// Degrees of yaw per unit of raw pointer motion.
    pub look_sensitivity: f32,
    /// Fixed camera height.
    pub eye_height: f32,
    /// Goal is reached strictly inside this distance of the goal cell center.
    pub portal_threshold: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            maze_size: 15,
            player_radius: 0.2,
            move_speed: 0.1,
            look_sensitivity: 0.12,
            eye_height: 0.5,
            portal_threshold: DEFAULT_PORTAL_THRESHOLD,
        }
    }
}

impl SimConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        MazeGenerator::new(self.maze_size)?;
        if !(self.player_radius > 0.0 && self.player_radius < 0.5) {
            return Err(ConfigError::RadiusOutOfRange(self.player_radius));
        }
        for (field, value) in [
            ("move_speed", self.move_speed),
            ("portal_threshold", self.portal_threshold),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("look_sensitivity", self.look_sensitivity),
            ("eye_height", self.eye_height),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        Ok(())
    }
}
