use labyrinth_common::{CellCoord, Pose};
use labyrinth_kernel::{Phase, Simulation};
use labyrinth_maze::{Cell, Grid};

use crate::validate::{self, MazeReport, ValidationError};

/// Read-only views of a simulation for debugging and the CLI.
pub struct MazeInspector;

impl MazeInspector {
    /// Produce a summary of the session state.
    pub fn summary(sim: &Simulation) -> SimSummary {
        let pose = sim.pose();
        SimSummary {
            phase: sim.phase(),
            tick: sim.tick(),
            maze_seed: sim.maze_seed(),
            position: [pose.position.x, pose.position.y, pose.position.z],
            yaw_degrees: pose.yaw_degrees,
            goal: sim.maze().map(|m| m.goal),
            pending_events: sim.events().len(),
        }
    }

    /// ASCII map: `#` wall, `.` path, `G` goal, `@` player (drawn over the goal).
    pub fn render(grid: &Grid, player: Option<&Pose>, goal: Option<CellCoord>) -> String {
        let player_cell = player.map(Pose::cell);
        let size = grid.size() as i32;
        let mut out = String::with_capacity((grid.size() + 1) * grid.size());
        for x in 0..size {
            for z in 0..size {
                let c = CellCoord::new(x, z);
                let glyph = if Some(c) == player_cell {
                    '@'
                } else if Some(c) == goal {
                    'G'
                } else {
                    match grid.get(c) {
                        Some(Cell::Path) => '.',
                        _ => '#',
                    }
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }

    /// Render the session's current maze with player and goal, if started.
    pub fn render_session(sim: &Simulation) -> Option<String> {
        sim.maze()
            .map(|m| Self::render(&m.grid, Some(sim.pose()), Some(m.goal)))
    }

    /// Structural checks on the session's current maze.
    pub fn validate_session(sim: &Simulation) -> Option<Result<MazeReport, ValidationError>> {
        sim.maze().map(validate::validate)
    }
}

/// Summary of session state for the inspector.
#[derive(Debug, Clone)]
pub struct SimSummary {
    pub phase: Phase,
    pub tick: u64,
    pub maze_seed: u64,
    pub position: [f32; 3],
    pub yaw_degrees: f32,
    pub goal: Option<CellCoord>,
    pub pending_events: usize,
}

impl std::fmt::Display for SimSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session: phase={:?} tick={} seed={} pos=({:.2}, {:.2}, {:.2}) yaw={:.1}",
            self.phase,
            self.tick,
            self.maze_seed,
            self.position[0],
            self.position[1],
            self.position[2],
            self.yaw_degrees,
        )?;
        if let Some(goal) = self.goal {
            write!(f, " goal=({}, {})", goal.x, goal.z)?;
        }
        write!(f, " pending_events={}", self.pending_events)
    }
}
