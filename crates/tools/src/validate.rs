use std::collections::VecDeque;

use labyrinth_common::CellCoord;
use labyrinth_maze::{Grid, Maze};

const NEIGHBOURS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Ways a maze can fail to be a closed perfect maze.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("border cell {0:?} is open")]
    OpenBorder(CellCoord),
    #[error("start cell {0:?} is not a path")]
    StartNotPath(CellCoord),
    #[error("goal cell {0:?} is not an in-bounds path")]
    GoalNotPath(CellCoord),
    #[error("only {reachable} of {total} path cells are reachable from the start")]
    Disconnected { reachable: usize, total: usize },
    #[error("{carved} carve steps cannot open {paths} path cells")]
    CarveCount { carved: usize, paths: usize },
    #[error("path graph has {edges} edges for {paths} cells, so it contains a cycle")]
    Cyclic { edges: usize, paths: usize },
}

/// Facts about a maze that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeReport {
    pub size: usize,
    pub path_cells: usize,
    pub carved: usize,
    /// Path cells with exactly one open neighbour.
    pub dead_ends: usize,
    /// Steps along the unique path from start to goal.
    pub goal_distance: usize,
}

/// Check that `maze` is a closed perfect maze with a valid start and goal.
pub fn validate(maze: &Maze) -> Result<MazeReport, ValidationError> {
    let grid = &maze.grid;
    check_border(grid)?;
    if !grid.is_path(maze.start) {
        return Err(ValidationError::StartNotPath(maze.start));
    }
    if !grid.is_path(maze.goal) {
        return Err(ValidationError::GoalNotPath(maze.goal));
    }

    let paths = grid.path_count();
    let distances = distances_from(grid, maze.start);
    let reachable = distances.iter().filter(|d| d.is_some()).count();
    if reachable != paths {
        return Err(ValidationError::Disconnected {
            reachable,
            total: paths,
        });
    }
    let edges = edge_count(grid);
    if edges + 1 != paths {
        return Err(ValidationError::Cyclic { edges, paths });
    }
    if 2 * maze.carved + 1 != paths {
        return Err(ValidationError::CarveCount {
            carved: maze.carved,
            paths,
        });
    }

    let goal_distance = distances[index(grid, maze.goal)].unwrap_or_default();
    let dead_ends = grid
        .iter_paths()
        .filter(|&c| open_neighbours(grid, c) == 1)
        .count();
    tracing::debug!(paths, dead_ends, goal_distance, "maze validated");

    Ok(MazeReport {
        size: grid.size(),
        path_cells: paths,
        carved: maze.carved,
        dead_ends,
        goal_distance,
    })
}

fn check_border(grid: &Grid) -> Result<(), ValidationError> {
    let last = grid.size() as i32 - 1;
    for i in 0..=last {
        for c in [
            CellCoord::new(0, i),
            CellCoord::new(last, i),
            CellCoord::new(i, 0),
            CellCoord::new(i, last),
        ] {
            if grid.is_path(c) {
                return Err(ValidationError::OpenBorder(c));
            }
        }
    }
    Ok(())
}

fn index(grid: &Grid, c: CellCoord) -> usize {
    c.x as usize * grid.size() + c.z as usize
}

/// BFS step counts from `start`, indexed like the grid. `None` is unreachable.
fn distances_from(grid: &Grid, start: CellCoord) -> Vec<Option<usize>> {
    let mut dist = vec![None; grid.size() * grid.size()];
    dist[index(grid, start)] = Some(0);
    let mut queue = VecDeque::from([(start, 0usize)]);
    while let Some((c, d)) = queue.pop_front() {
        for (dx, dz) in NEIGHBOURS {
            let n = c.offset(dx, dz);
            if grid.is_path(n) && dist[index(grid, n)].is_none() {
                dist[index(grid, n)] = Some(d + 1);
                queue.push_back((n, d + 1));
            }
        }
    }
    dist
}

/// Undirected edges between orthogonally adjacent path cells.
fn edge_count(grid: &Grid) -> usize {
    grid.iter_paths()
        .map(|c| {
            usize::from(grid.is_path(c.offset(1, 0))) + usize::from(grid.is_path(c.offset(0, 1)))
        })
        .sum()
}

fn open_neighbours(grid: &Grid, c: CellCoord) -> usize {
    NEIGHBOURS
        .iter()
        .filter(|&&(dx, dz)| grid.is_path(c.offset(dx, dz)))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_common::SplitMix64;
    use labyrinth_maze::{MazeGenerator, START_CELL, find_goal};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn hand_made(ascii: &str, carved: usize) -> Maze {
        let grid = Grid::from_ascii(ascii).unwrap();
        let goal = find_goal(&grid);
        Maze {
            grid,
            start: START_CELL,
            goal,
            carved,
        }
    }

    #[test]
    fn golden_maze_report() {
        let maze = MazeGenerator::new(15)
            .unwrap()
            .generate(&mut SplitMix64::new(42));
        let report = validate(&maze).unwrap();
        assert_eq!(
            report,
            MazeReport {
                size: 15,
                path_cells: 97,
                carved: 48,
                dead_ends: 7,
                goal_distance: 40,
            }
        );
    }

    #[test]
    fn smallest_maze_report() {
        let maze = MazeGenerator::new(5)
            .unwrap()
            .generate(&mut SplitMix64::new(7));
        let report = validate(&maze).unwrap();
        assert_eq!(report.goal_distance, 4);
        assert_eq!(report.dead_ends, 2);
    }

    #[test]
    fn generated_mazes_always_validate() {
        for size in [5, 7, 9, 15, 25, 41] {
            let generator = MazeGenerator::new(size).unwrap();
            for seed in 0..12 {
                let maze = generator.generate(&mut StdRng::seed_from_u64(seed));
                assert!(validate(&maze).is_ok(), "size={size} seed={seed}");
            }
        }
    }

    #[test]
    fn loop_is_rejected_as_cyclic() {
        let maze = hand_made("#####\n#...#\n#.#.#\n#...#\n#####\n", 7);
        assert_eq!(
            validate(&maze).unwrap_err(),
            ValidationError::Cyclic { edges: 8, paths: 8 }
        );
    }

    #[test]
    fn island_is_rejected_as_disconnected() {
        let maze = hand_made("#####\n#.#.#\n#####\n#...#\n#####\n", 4);
        assert_eq!(
            validate(&maze).unwrap_err(),
            ValidationError::Disconnected {
                reachable: 1,
                total: 5
            }
        );
    }

    #[test]
    fn open_border_is_rejected() {
        let maze = hand_made("##.##\n#...#\n#####\n#####\n#####\n", 3);
        assert_eq!(
            validate(&maze).unwrap_err(),
            ValidationError::OpenBorder(CellCoord::new(0, 2))
        );
    }

    #[test]
    fn wrong_carve_count_is_rejected() {
        let corridor = "#####\n#...#\n#####\n#####\n#####\n";
        assert!(validate(&hand_made(corridor, 1)).is_ok());
        // one step per removed wall is the off-by-two count
        assert_eq!(
            validate(&hand_made(corridor, 2)).unwrap_err(),
            ValidationError::CarveCount { carved: 2, paths: 3 }
        );
    }

    #[test]
    fn carve_count_matches_generator_for_every_seed() {
        let generator = MazeGenerator::new(9).unwrap();
        for seed in 0..32 {
            let maze = generator.generate(&mut SplitMix64::new(seed));
            let report = validate(&maze).unwrap();
            assert_eq!(2 * report.carved + 1, report.path_cells, "seed={seed}");
        }
    }
}
