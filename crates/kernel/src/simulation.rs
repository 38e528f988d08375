use glam::Vec2;
use labyrinth_common::{CellCoord, Pose, SplitMix64};
use labyrinth_input::{Action, TickInput};
use labyrinth_maze::{CollisionField, Maze, MazeError, MazeGenerator};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SimConfig};
use crate::motion::MotionController;
use crate::portal::PortalDetector;

/// Where the session is. The external loop reads this to pick a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Menu,
    Playing,
    Won,
    /// Terminal: `Quit` was applied.
    Stopped,
}

impl Phase {
    fn tag(self) -> u8 {
        match self {
            Self::Menu => 0,
            Self::Playing => 1,
            Self::Won => 2,
            Self::Stopped => 3,
        }
    }
}

/// Errors from driving a session.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("action {action} is not valid in phase {phase:?}")]
    InvalidTransition { phase: Phase, action: &'static str },
    #[error("session has stopped")]
    Stopped,
}

/// An event record produced by every state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A fresh maze was generated and play began.
    MazeStarted { seed: u64, size: usize, goal: CellCoord },
    /// Yaw changed during a tick.
    Rotated { tick: u64, yaw_degrees: f32 },
    /// Position changed during a tick.
    Moved { tick: u64, from: Vec2, to: Vec2 },
    /// The player came within the portal threshold.
    GoalReached { tick: u64, goal: CellCoord },
    /// The session stopped.
    Quit { tick: u64 },
}

/// What the rendering collaborator needs after each action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub phase: Phase,
    pub pose: Pose,
    pub tick: u64,
    /// Raw detector output for this tick: true whenever the player is inside
    /// the threshold, not only on the first tick.
    pub goal_reached: bool,
}

/// The authoritative session state.
///
/// Runs the Menu -> Playing -> Won -> Playing ... state machine from an
/// external loop instead of re-entering itself on restart. Given the same
/// config, seed, and action sequence, two sessions are bit-for-bit equal.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    generator: MazeGenerator,
    portal: PortalDetector,
    /// Source of maze seeds after the first.
    seeds: SplitMix64,
    maze_seed: u64,
    phase: Phase,
    maze: Option<Maze>,
    motion: MotionController,
    tick: u64,
    /// Append-only log of state changes.
    events: Vec<SimEvent>,
    /// Every accepted action, in order. Enough to replay the session.
    actions: Vec<Action>,
}

impl Simulation {
    /// A session sitting at the menu. The first maze uses `seed` directly.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        config.validate()?;
        let generator = MazeGenerator::new(config.maze_size)?;
        let motion = MotionController::new(spawn_pose(&config), config.player_radius);
        Ok(Self {
            portal: PortalDetector::new(config.portal_threshold),
            generator,
            seeds: SplitMix64::new(seed),
            maze_seed: seed,
            phase: Phase::Menu,
            maze: None,
            motion,
            tick: 0,
            events: Vec::new(),
            actions: Vec::new(),
            config,
        })
    }

    /// Rebuild a session from a recorded action log.
    pub fn replay(config: SimConfig, seed: u64, actions: &[Action]) -> Result<Self, SimError> {
        let mut sim = Self::new(config, seed)?;
        for action in actions {
            sim.apply(*action)?;
        }
        Ok(sim)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks of play since the session began, across restarts.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Seed of the maze currently loaded (or about to be, at the menu).
    pub fn maze_seed(&self) -> u64 {
        self.maze_seed
    }

    /// `None` until the first `Start`.
    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    pub fn pose(&self) -> &Pose {
        self.motion.pose()
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Feed one action through the state machine.
    ///
    /// A rejected action leaves the session untouched and is not recorded.
    pub fn apply(&mut self, action: Action) -> Result<Outcome, SimError> {
        let goal_reached = match (self.phase, action) {
            (Phase::Stopped, _) => return Err(SimError::Stopped),
            (_, Action::Quit) => {
                self.phase = Phase::Stopped;
                self.events.push(SimEvent::Quit { tick: self.tick });
                tracing::info!(tick = self.tick, "session stopped");
                false
            }
            (Phase::Menu, Action::Start) => {
                self.begin_maze();
                false
            }
            (Phase::Won, Action::Restart) => {
                self.maze_seed = self.seeds.next_u64();
                self.begin_maze();
                false
            }
            (Phase::Playing, Action::Tick(input)) => self.step(input),
            (phase, action) => {
                return Err(SimError::InvalidTransition {
                    phase,
                    action: action_name(&action),
                });
            }
        };
        self.actions.push(action);
        Ok(self.outcome(goal_reached))
    }

    fn begin_maze(&mut self) {
        let maze = self.generator.generate(&mut SplitMix64::new(self.maze_seed));
        tracing::info!(
            seed = self.maze_seed,
            size = self.generator.size(),
            "maze started"
        );
        self.events.push(SimEvent::MazeStarted {
            seed: self.maze_seed,
            size: self.generator.size(),
            goal: maze.goal,
        });
        self.motion.reset(Pose::at(maze.start.center(), self.config.eye_height));
        self.maze = Some(maze);
        self.phase = Phase::Playing;
    }

    /// One tick: rotate, then move, then check the portal.
    fn step(&mut self, input: TickInput) -> bool {
        let Some(maze) = self.maze.as_ref() else {
            return false;
        };
        self.tick += 1;

        let turn = input.look_delta * self.config.look_sensitivity;
        if turn != 0.0 && turn.is_finite() {
            self.motion.rotate(turn);
            self.events.push(SimEvent::Rotated {
                tick: self.tick,
                yaw_degrees: self.motion.pose().yaw_degrees,
            });
        }

        let from = self.motion.pose().planar();
        let delta = input.displacement(self.motion.pose().yaw_degrees, self.config.move_speed);
        if delta != Vec2::ZERO {
            self.motion.move_by(delta, &CollisionField::new(&maze.grid));
            let to = self.motion.pose().planar();
            if to != from {
                self.events.push(SimEvent::Moved {
                    tick: self.tick,
                    from,
                    to,
                });
            }
        }

        let reached = self
            .portal
            .reached(self.motion.pose().planar(), maze.goal.center());
        if reached {
            let goal = maze.goal;
            self.events.push(SimEvent::GoalReached {
                tick: self.tick,
                goal,
            });
            self.phase = Phase::Won;
            tracing::info!(tick = self.tick, goal_x = goal.x, goal_z = goal.z, "goal reached");
        }
        reached
    }

    fn outcome(&self, goal_reached: bool) -> Outcome {
        Outcome {
            phase: self.phase,
            pose: *self.motion.pose(),
            tick: self.tick,
            goal_reached,
        }
    }

    /// Deterministic FNV-1a hash over everything that defines the session.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        mix(&mut h, &self.maze_seed.to_le_bytes());
        mix(&mut h, &[self.phase.tag()]);
        let pose = self.motion.pose();
        mix(&mut h, &pose.position.x.to_bits().to_le_bytes());
        mix(&mut h, &pose.position.y.to_bits().to_le_bytes());
        mix(&mut h, &pose.position.z.to_bits().to_le_bytes());
        mix(&mut h, &pose.yaw_degrees.to_bits().to_le_bytes());
        if let Some(maze) = &self.maze {
            mix(&mut h, &maze.goal.x.to_le_bytes());
            mix(&mut h, &maze.goal.z.to_le_bytes());
            for cell in maze.grid.cells() {
                mix(&mut h, &[*cell as u8]);
            }
        }
        h
    }
}

fn spawn_pose(config: &SimConfig) -> Pose {
    Pose::at(labyrinth_maze::START_CELL.center(), config.eye_height)
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::Start => "Start",
        Action::Tick(_) => "Tick",
        Action::Restart => "Restart",
        Action::Quit => "Quit",
    }
}
