use labyrinth_common::{CellCoord, pick_index};
use rand::RngCore;
use serde::Serialize;

use crate::{Cell, Grid, MazeError};

/// Smallest accepted side length.
pub const MIN_MAZE_SIZE: usize = 5;

/// Where carving starts and where the player spawns.
pub const START_CELL: CellCoord = CellCoord::new(1, 1);

/// Carving steps, two cells at a time. Order is part of the reproducible layout.
const CARVE_STEPS: [(i32, i32); 4] = [(0, 2), (0, -2), (2, 0), (-2, 0)];

/// A generated maze: the grid plus the cells the simulation cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Maze {
    pub grid: Grid,
    pub start: CellCoord,
    pub goal: CellCoord,
    /// Carve steps performed. Each opens the wall between two cells and the
    /// cell beyond it, so a spanning tree has `2 * carved + 1` path cells.
    pub carved: usize,
}

/// Randomized depth-first carver.
///
/// Validates the size once, then generates any number of mazes, each fully
/// determined by the random source handed in.
#[derive(Debug, Clone, Copy)]
pub struct MazeGenerator {
    size: usize,
}

impl MazeGenerator {
    /// Fails for even sizes and sizes below [`MIN_MAZE_SIZE`].
    pub fn new(size: usize) -> Result<Self, MazeError> {
        if size < MIN_MAZE_SIZE || size % 2 == 0 {
            return Err(MazeError::InvalidSize {
                size,
                min: MIN_MAZE_SIZE,
            });
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Carve a perfect maze.
    ///
    /// Only odd interior cells are ever pushed, so the outer ring stays wall.
    /// Each carve joins one new cell to the tree through exactly one midpoint.
    pub fn generate<R: RngCore + ?Sized>(&self, rng: &mut R) -> Maze {
        let _span = tracing::debug_span!("maze_generate", size = self.size).entered();

        let mut grid = Grid::filled(self.size);
        let mut stack = vec![START_CELL];
        grid.set(START_CELL, Cell::Path);
        let mut carved = 0;
        let mut open = Vec::with_capacity(CARVE_STEPS.len());

        while let Some(&current) = stack.last() {
            open.clear();
            open.extend(
                CARVE_STEPS
                    .iter()
                    .map(|&(dx, dz)| current.offset(dx, dz))
                    .filter(|&c| self.is_interior(c) && grid.get(c) == Some(Cell::Wall)),
            );

            if open.is_empty() {
                stack.pop();
                continue;
            }

            let next = open[pick_index(rng, open.len())];
            let between = CellCoord::new((current.x + next.x) / 2, (current.z + next.z) / 2);
            grid.set(between, Cell::Path);
            grid.set(next, Cell::Path);
            stack.push(next);
            carved += 1;
        }

        let goal = find_goal(&grid);
        tracing::debug!(
            carved,
            paths = grid.path_count(),
            goal_x = goal.x,
            goal_z = goal.z,
            "maze generated"
        );

        Maze {
            grid,
            start: START_CELL,
            goal,
            carved,
        }
    }

    fn is_interior(&self, c: CellCoord) -> bool {
        let limit = self.size as i32 - 1;
        c.x > 0 && c.x < limit && c.z > 0 && c.z < limit
    }
}

/// Last PATH cell scanning rows (x) then columns (z), both descending from
/// `size - 1` to 1. Falls back to [`START_CELL`] on a grid with no paths.
pub fn find_goal(grid: &Grid) -> CellCoord {
    let top = grid.size() as i32 - 1;
    for x in (1..=top).rev() {
        for z in (1..=top).rev() {
            let c = CellCoord::new(x, z);
            if grid.is_path(c) {
                return c;
            }
        }
    }
    START_CELL
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_common::SplitMix64;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashSet, VecDeque};

    const GOLDEN_SEED_42_SIZE_15: &str = "\
###############
#.#.........#.#
#.#######.#.#.#
#.....#...#...#
#####.#.#####.#
#...#...#...#.#
#.#.#######.#.#
#.#.#.......#.#
#.#.#.#####.#.#
#.#...#.....#.#
#.#####.#####.#
#.....#.#.....#
#.###.###.#####
#...#.........#
###############
";

    fn reachable_from_start(grid: &Grid) -> usize {
        let mut seen = HashSet::from([START_CELL]);
        let mut queue = VecDeque::from([START_CELL]);
        while let Some(c) = queue.pop_front() {
            for (dx, dz) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
                let n = c.offset(dx, dz);
                if grid.is_path(n) && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen.len()
    }

    #[test]
    fn golden_layout_seed_42_size_15() {
        let maze = MazeGenerator::new(15)
            .unwrap()
            .generate(&mut SplitMix64::seed_from_u64(42));
        assert_eq!(maze.grid.to_ascii(), GOLDEN_SEED_42_SIZE_15);
        assert_eq!(maze.goal, CellCoord::new(13, 13));
        assert_eq!(maze.carved, 48);
        assert_eq!(maze.grid.path_count(), 2 * 48 + 1);
    }

    #[test]
    fn golden_layout_smallest_maze() {
        let maze = MazeGenerator::new(5)
            .unwrap()
            .generate(&mut SplitMix64::seed_from_u64(7));
        assert_eq!(maze.grid.to_ascii(), "#####\n#...#\n###.#\n#...#\n#####\n");
        assert_eq!(maze.goal, CellCoord::new(3, 3));
    }

    #[test]
    fn rejects_even_and_small_sizes() {
        for size in [0, 1, 3, 4, 6, 14] {
            assert_eq!(
                MazeGenerator::new(size).unwrap_err(),
                MazeError::InvalidSize {
                    size,
                    min: MIN_MAZE_SIZE
                }
            );
        }
        assert!(MazeGenerator::new(5).is_ok());
        assert!(MazeGenerator::new(41).is_ok());
    }

    #[test]
    fn same_seed_same_maze() {
        let generator = MazeGenerator::new(21).unwrap();
        let a = generator.generate(&mut SplitMix64::seed_from_u64(1234));
        let b = generator.generate(&mut SplitMix64::seed_from_u64(1234));
        assert_eq!(a, b);
    }

    #[test]
    fn spanning_tree_for_many_sizes_and_seeds() {
        for size in (5..=31).step_by(2) {
            let generator = MazeGenerator::new(size).unwrap();
            for seed in 0..16 {
                let maze = generator.generate(&mut StdRng::seed_from_u64(seed));
                let paths = maze.grid.path_count();
                assert_eq!(2 * maze.carved + 1, paths, "size={size} seed={seed}");
                assert_eq!(reachable_from_start(&maze.grid), paths, "size={size} seed={seed}");
                assert!(maze.grid.is_path(maze.goal));
            }
        }
    }

    #[test]
    fn border_stays_wall_and_odd_cells_are_carved() {
        let size = 17;
        let maze = MazeGenerator::new(size)
            .unwrap()
            .generate(&mut SplitMix64::seed_from_u64(3));
        let last = size as i32 - 1;
        for i in 0..=last {
            for edge in [
                CellCoord::new(0, i),
                CellCoord::new(last, i),
                CellCoord::new(i, 0),
                CellCoord::new(i, last),
            ] {
                assert_eq!(maze.grid.get(edge), Some(Cell::Wall), "{edge:?}");
            }
        }
        for x in (1..last).step_by(2) {
            for z in (1..last).step_by(2) {
                assert!(maze.grid.is_path(CellCoord::new(x, z)));
            }
        }
        // even-even cells are pillars and never carved
        assert_eq!(maze.grid.get(CellCoord::new(2, 2)), Some(Cell::Wall));
    }

    #[test]
    fn goal_falls_back_to_start_on_solid_grid() {
        assert_eq!(find_goal(&Grid::filled(7)), START_CELL);
    }

    #[test]
    fn goal_scan_prefers_highest_row_then_column() {
        let grid = Grid::from_ascii(
            "\
#####
#...#
#.#.#
#..##
#####
",
        )
        .unwrap();
        assert_eq!(find_goal(&grid), CellCoord::new(3, 2));
    }
}
