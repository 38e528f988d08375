use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Integer grid coordinate on the XZ plane. One cell is one world unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub z: i32,
}

impl CellCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The cell containing a planar world position.
    ///
    /// Uses `floor`, so positions left of or behind the origin land in negative
    /// cells instead of collapsing onto row/column zero.
    pub fn from_position(pos: Vec2) -> Self {
        Self {
            x: pos.x.floor() as i32,
            z: pos.y.floor() as i32,
        }
    }

    /// World-space center of the cell, as (x, z).
    pub fn center(self) -> Vec2 {
        Vec2::new(self.x as f32 + 0.5, self.z as f32 + 0.5)
    }

    /// Offset by whole cells.
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }
}

/// Player pose: position plus facing angle.
///
/// `position.y` is the fixed eye height; motion only ever touches x and z.
/// `yaw_degrees` is kept in [0, 360) by the motion controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub yaw_degrees: f32,
}

impl Pose {
    /// Pose at planar `(x, z)`, standing at `height`, facing +X.
    pub fn at(planar: Vec2, height: f32) -> Self {
        Self {
            position: Vec3::new(planar.x, height, planar.y),
            yaw_degrees: 0.0,
        }
    }

    /// Position on the XZ plane, as (x, z).
    pub fn planar(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    pub fn cell(&self) -> CellCoord {
        CellCoord::from_position(self.planar())
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vec2::new(1.5, 1.5), 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_position_floors_negative_coordinates() {
        assert_eq!(CellCoord::from_position(Vec2::new(2.7, 0.1)), CellCoord::new(2, 0));
        assert_eq!(
            CellCoord::from_position(Vec2::new(-0.1, 3.0)),
            CellCoord::new(-1, 3)
        );
    }

    #[test]
    fn center_is_half_a_cell_in() {
        assert_eq!(CellCoord::new(13, 13).center(), Vec2::new(13.5, 13.5));
    }

    #[test]
    fn default_pose_stands_in_start_cell() {
        let pose = Pose::default();
        assert_eq!(pose.cell(), CellCoord::new(1, 1));
        assert_eq!(pose.position.y, 0.5);
        assert_eq!(pose.yaw_degrees, 0.0);
    }
}
