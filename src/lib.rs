//! Box Bounce - a deterministic bouncing-ball simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, wall collisions, world state)
//! - `settings`: Data-driven configuration with construction-time validation
//!
//! The simulation is headless: a driver owns the tick loop and reads ball
//! positions after each tick. Balls never interact with each other; each tick
//! every ball integrates its velocity and reflects off the four walls of a
//! fixed rectangular enclosure. Floor bounces lose a fixed amount of speed;
//! ceiling and side-wall bounces are lossless.

pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Ball, Color, Enclosure, SimState, step, tick};

use thiserror::Error;

/// Simulation errors
///
/// The per-tick path is total; the only failure class is a configuration
/// rejected at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Simulation constants (the original demo's layout)
pub mod consts {
    /// Default box walls
    pub const LEFT_WALL: i32 = 50;
    pub const RIGHT_WALL: i32 = 550;
    pub const CEILING: i32 = 400;
    pub const FLOOR: i32 = 700;

    /// Default speed shaved off the rebound on each floor bounce
    pub const BALL_DEGRADATION: i32 = 2;

    /// Default tick budget for a run
    pub const DEFAULT_MAX_TICKS: u64 = 400;
    /// Default number of balls to spawn
    pub const DEFAULT_BALL_COUNT: u32 = 10;

    /// Spawn ranges (half-open) for randomized balls
    pub const SPAWN_RADIUS_MIN: i32 = 10;
    pub const SPAWN_RADIUS_MAX: i32 = 25;
    pub const SPAWN_SPEED_MIN: i32 = 1;
    pub const SPAWN_SPEED_MAX: i32 = 9;
}
