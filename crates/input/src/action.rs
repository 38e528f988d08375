use glam::Vec2;
use labyrinth_common::heading;
use serde::{Deserialize, Serialize};

/// Held movement keys for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
}

impl MoveIntent {
    pub const FORWARD: Self = Self {
        forward: true,
        back: false,
        strafe_left: false,
        strafe_right: false,
    };

    pub fn is_idle(&self) -> bool {
        !(self.forward || self.back || self.strafe_left || self.strafe_right)
    }
}

/// Everything the collaborator reports for one simulation tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub intent: MoveIntent,
    /// Raw horizontal pointer motion. Scaled by the look sensitivity in the kernel.
    pub look_delta: f32,
}

impl TickInput {
    pub fn moving(intent: MoveIntent) -> Self {
        Self {
            intent,
            look_delta: 0.0,
        }
    }

    pub fn looking(look_delta: f32) -> Self {
        Self {
            intent: MoveIntent::default(),
            look_delta,
        }
    }

    /// Planar (x, z) displacement for this tick when facing `yaw_degrees`.
    ///
    /// Active intents are summed, so opposing keys cancel and a diagonal is
    /// not renormalised.
    pub fn displacement(&self, yaw_degrees: f32, speed: f32) -> Vec2 {
        let forward = heading::forward(yaw_degrees);
        let right = heading::right(yaw_degrees);
        let mut dir = Vec2::ZERO;
        if self.intent.forward {
            dir += forward;
        }
        if self.intent.back {
            dir -= forward;
        }
        if self.intent.strafe_right {
            dir += right;
        }
        if self.intent.strafe_left {
            dir -= right;
        }
        dir * speed
    }
}

/// A command for the simulation's session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Leave the menu and start the first maze.
    Start,
    /// Advance one tick of play.
    Tick(TickInput),
    /// From the win screen, play again on a fresh maze.
    Restart,
    /// Stop the session.
    Quit,
}
