use glam::Vec2;
use labyrinth_common::{Pose, heading};
use labyrinth_maze::CollisionField;

/// Which axes of a requested move were committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisResolution {
    pub x: bool,
    pub z: bool,
}

impl AxisResolution {
    /// Moved on one axis but not the other.
    pub fn slid(&self) -> bool {
        self.x != self.z
    }
}

/// Owns the player pose and integrates movement against the walls.
///
/// If the pose starts with a free collision square, every pose reachable
/// through [`MotionController::move_by`] also has one.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionController {
    pose: Pose,
    radius: f32,
}

impl MotionController {
    pub fn new(pose: Pose, radius: f32) -> Self {
        Self { pose, radius }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Replace the pose wholesale (new maze, restart).
    pub fn reset(&mut self, pose: Pose) {
        self.pose = pose;
    }

    pub fn forward(&self) -> Vec2 {
        heading::forward(self.pose.yaw_degrees)
    }

    pub fn right(&self) -> Vec2 {
        heading::right(self.pose.yaw_degrees)
    }

    /// Apply a planar (x, z) displacement one axis at a time.
    ///
    /// X is tried first at the old z; z is then tried at the possibly updated
    /// x. A blocked axis is dropped while the other still applies, which is
    /// what lets the player slide along a wall on an oblique approach.
    pub fn move_by(&mut self, delta: Vec2, field: &CollisionField<'_>) -> AxisResolution {
        let mut resolved = AxisResolution::default();
        let start = self.pose.planar();

        let try_x = Vec2::new(start.x + delta.x, start.y);
        if delta.x != 0.0 && field.is_free_for_disc(try_x, self.radius) {
            self.pose.position.x = try_x.x;
            resolved.x = true;
        }

        let try_z = Vec2::new(self.pose.position.x, start.y + delta.y);
        if delta.y != 0.0 && field.is_free_for_disc(try_z, self.radius) {
            self.pose.position.z = try_z.y;
            resolved.z = true;
        }

        if resolved.slid() {
            tracing::trace!(?delta, x = resolved.x, z = resolved.z, "wall slide");
        }
        resolved
    }

    /// Turn by `delta_degrees`; yaw stays in [0, 360).
    ///
    /// A turn whose result is not finite is dropped and the heading is kept.
    pub fn rotate(&mut self, delta_degrees: f32) {
        let yaw = self.pose.yaw_degrees + delta_degrees;
        if !yaw.is_finite() {
            tracing::debug!(delta_degrees, "ignoring non-finite rotation");
            return;
        }
        self.pose.yaw_degrees = heading::wrap_degrees(yaw);
    }
}
