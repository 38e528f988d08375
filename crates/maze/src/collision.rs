use glam::Vec2;
use labyrinth_common::CellCoord;

use crate::Grid;

/// Read-only occupancy queries over a grid.
///
/// Fail-closed: out-of-bounds cells and coordinates count as walls.
#[derive(Debug, Clone, Copy)]
pub struct CollisionField<'a> {
    grid: &'a Grid,
}

impl<'a> CollisionField<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// True for WALL cells and for anything outside the grid.
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        !self.grid.is_path(cell)
    }

    /// Whether a body of half-width `radius` centered at `center` fits.
    ///
    /// The body is approximated by its bounding square: the cell under the
    /// center and the cells under all four corners must be PATH. With
    /// `radius < 0.5` the square spans at most two cells per axis, so the
    /// corners cover every cell it touches. Non-finite input is blocked.
    pub fn is_free_for_disc(&self, center: Vec2, radius: f32) -> bool {
        if !center.is_finite() || !radius.is_finite() {
            return false;
        }
        let probes = [
            center,
            center + Vec2::new(-radius, -radius),
            center + Vec2::new(-radius, radius),
            center + Vec2::new(radius, -radius),
            center + Vec2::new(radius, radius),
        ];
        probes
            .iter()
            .all(|&p| !self.is_wall(CellCoord::from_position(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Grid {
        Grid::from_ascii(
            "\
#####
#...#
#.###
#...#
#####
",
        )
        .unwrap()
    }

    #[test]
    fn walls_and_out_of_bounds_are_walls() {
        let grid = corridor();
        let field = CollisionField::new(&grid);
        assert!(field.is_wall(CellCoord::new(0, 0)));
        assert!(field.is_wall(CellCoord::new(2, 2)));
        assert!(!field.is_wall(CellCoord::new(1, 1)));
        assert!(field.is_wall(CellCoord::new(-1, 1)));
        assert!(field.is_wall(CellCoord::new(1, 5)));
    }

    #[test]
    fn disc_in_open_cell_is_free() {
        let grid = corridor();
        let field = CollisionField::new(&grid);
        assert!(field.is_free_for_disc(Vec2::new(1.5, 1.5), 0.2));
        // straddles (1,1) and (1,2), both open
        assert!(field.is_free_for_disc(Vec2::new(1.5, 2.0), 0.2));
    }

    #[test]
    fn disc_touching_wall_is_blocked() {
        let grid = corridor();
        let field = CollisionField::new(&grid);
        // corner reaches into (0,1)
        assert!(!field.is_free_for_disc(Vec2::new(1.1, 1.5), 0.2));
        // corner reaches into (2,2)
        assert!(!field.is_free_for_disc(Vec2::new(1.9, 2.0), 0.2));
    }

    #[test]
    fn corners_outside_grid_are_blocked() {
        let grid = Grid::from_ascii("...\n...\n...\n").unwrap();
        let field = CollisionField::new(&grid);
        assert!(field.is_free_for_disc(Vec2::new(1.5, 1.5), 0.4));
        assert!(!field.is_free_for_disc(Vec2::new(0.1, 1.5), 0.2));
        assert!(!field.is_free_for_disc(Vec2::new(2.9, 1.5), 0.2));
    }

    #[test]
    fn non_finite_positions_are_blocked() {
        let grid = corridor();
        let field = CollisionField::new(&grid);
        assert!(!field.is_free_for_disc(Vec2::new(f32::NAN, 1.5), 0.2));
        assert!(!field.is_free_for_disc(Vec2::new(1.5, 1.5), f32::INFINITY));
    }
}
