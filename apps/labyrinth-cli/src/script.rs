//! Scripted input sources standing in for a keyboard and mouse.

use std::collections::{HashMap, VecDeque};

use clap::ValueEnum;
use glam::Vec2;
use labyrinth_common::CellCoord;
use labyrinth_input::{MoveIntent, TickInput};
use labyrinth_kernel::Simulation;
use labyrinth_maze::Grid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Script {
    /// Hold forward and never turn.
    Forward,
    /// Hold forward while turning at a constant rate.
    Circle,
    /// Random keys and mouse motion from a seeded RNG.
    Wander,
    /// Follow the shortest cell path to the goal.
    Solve,
}

/// Produces one tick of input from the current session state.
pub enum Driver {
    Forward,
    Circle,
    Wander(StdRng),
    Solve(Autopilot),
}

impl Driver {
    pub fn new(script: Script, seed: u64) -> Self {
        match script {
            Script::Forward => Self::Forward,
            Script::Circle => Self::Circle,
            Script::Wander => Self::Wander(StdRng::seed_from_u64(seed)),
            Script::Solve => Self::Solve(Autopilot::default()),
        }
    }

    pub fn next_input(&mut self, sim: &Simulation) -> TickInput {
        match self {
            Self::Forward => TickInput::moving(MoveIntent::FORWARD),
            Self::Circle => TickInput {
                intent: MoveIntent::FORWARD,
                look_delta: 25.0,
            },
            Self::Wander(rng) => TickInput {
                intent: MoveIntent {
                    forward: rng.gen_bool(0.7),
                    back: rng.gen_bool(0.1),
                    strafe_left: rng.gen_bool(0.2),
                    strafe_right: rng.gen_bool(0.2),
                },
                look_delta: rng.gen_range(-60.0..60.0),
            },
            Self::Solve(pilot) => pilot.next_input(sim),
        }
    }
}

/// Steers toward successive cell centers along the BFS path to the goal.
#[derive(Default)]
pub struct Autopilot {
    waypoints: VecDeque<Vec2>,
    /// Seed of the maze the waypoints were planned on.
    planned_for: Option<u64>,
}

impl Autopilot {
    fn next_input(&mut self, sim: &Simulation) -> TickInput {
        let Some(maze) = sim.maze() else {
            return TickInput::default();
        };
        let pose = sim.pose();
        if self.planned_for != Some(sim.maze_seed()) || self.waypoints.is_empty() {
            self.waypoints = shortest_path(&maze.grid, pose.cell(), maze.goal)
                .into_iter()
                .map(CellCoord::center)
                .collect();
            self.planned_for = Some(sim.maze_seed());
        }

        let here = pose.planar();
        let speed = sim.config().move_speed;
        while self
            .waypoints
            .front()
            .is_some_and(|w| w.distance(here) < speed * 0.5)
        {
            self.waypoints.pop_front();
        }
        let Some(&target) = self.waypoints.front() else {
            return TickInput::default();
        };

        let to = target - here;
        let desired = to.y.atan2(to.x).to_degrees();
        let turn = signed_angle(desired - pose.yaw_degrees);
        let sensitivity = sim.config().look_sensitivity;
        let look_delta = if sensitivity != 0.0 { turn / sensitivity } else { 0.0 };
        TickInput {
            intent: MoveIntent::FORWARD,
            look_delta,
        }
    }
}

/// Wrap to (-180, 180].
fn signed_angle(degrees: f32) -> f32 {
    let a = degrees.rem_euclid(360.0);
    if a > 180.0 { a - 360.0 } else { a }
}

/// Cells from `from` to `to` inclusive, or empty when unreachable.
fn shortest_path(grid: &Grid, from: CellCoord, to: CellCoord) -> Vec<CellCoord> {
    let mut came_from: HashMap<CellCoord, CellCoord> = HashMap::from([(from, from)]);
    let mut queue = VecDeque::from([from]);
    while let Some(c) = queue.pop_front() {
        if c == to {
            break;
        }
        for (dx, dz) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
            let n = c.offset(dx, dz);
            if grid.is_path(n) && !came_from.contains_key(&n) {
                came_from.insert(n, c);
                queue.push_back(n);
            }
        }
    }
    if !came_from.contains_key(&to) {
        return Vec::new();
    }
    let mut path = vec![to];
    let mut cur = to;
    while cur != from {
        cur = came_from[&cur];
        path.push(cur);
    }
    path.reverse();
    path
}
