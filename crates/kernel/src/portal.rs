use glam::Vec2;

/// Goal trigger distance used by default, in world units.
pub const DEFAULT_PORTAL_THRESHOLD: f32 = 0.5;

/// Planar proximity test between the player and the goal.
///
/// Stateless and level-triggered: it answers true on every query made while
/// the player is inside the threshold. Exactly at the threshold is outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalDetector {
    threshold: f32,
}

impl PortalDetector {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// True iff the (x, z) distance from `position` to `goal_center` is
    /// strictly less than the threshold.
    pub fn reached(&self, position: Vec2, goal_center: Vec2) -> bool {
        position.distance(goal_center) < self.threshold
    }
}

impl Default for PortalDetector {
    fn default() -> Self {
        Self::new(DEFAULT_PORTAL_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOAL: Vec2 = Vec2::new(13.5, 13.5);

    #[test]
    fn threshold_boundary() {
        let portal = PortalDetector::default();
        assert!(portal.reached(Vec2::new(13.99, 13.5), GOAL));
        assert!(!portal.reached(Vec2::new(14.0, 13.5), GOAL));
        assert!(!portal.reached(Vec2::new(14.01, 13.5), GOAL));
    }

    #[test]
    fn distance_is_planar_euclidean() {
        let portal = PortalDetector::default();
        // 0.4 on both axes is inside on either axis alone, outside combined
        assert!(portal.reached(Vec2::new(13.9, 13.5), GOAL));
        assert!(!portal.reached(Vec2::new(13.9, 13.9), GOAL));
        assert!(portal.reached(Vec2::new(13.7, 13.8), GOAL));
    }

    #[test]
    fn center_hit_and_far_miss() {
        let portal = PortalDetector::new(0.25);
        assert!(portal.reached(GOAL, GOAL));
        assert!(!portal.reached(Vec2::new(1.5, 1.5), GOAL));
    }
}
