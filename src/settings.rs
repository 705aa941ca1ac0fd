//! Run settings
//!
//! Everything the driver needs to build a world: the box geometry, how many
//! balls to spawn, the tick budget, and the run seed. Loadable from a JSON
//! file; missing fields fall back to the original demo's constants.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SimError;
use crate::consts::*;

/// Simulation run settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Enclosure ===
    /// x position of the left wall
    pub left: i32,
    /// x position of the right wall
    pub right: i32,
    /// y position of the ceiling (numerically smaller than `bottom`)
    pub top: i32,
    /// y position of the floor
    pub bottom: i32,

    // === Balls ===
    /// Number of balls to spawn
    pub ball_count: u32,
    /// Speed shaved off the rebound on each floor bounce
    pub restitution_loss: i32,

    // === Run ===
    /// Seed for reproducible spawns
    pub seed: u64,
    /// Tick budget for the run
    pub max_ticks: u64,
    /// Stop early once any ball's x reaches this threshold
    pub stop_x: Option<i32>,
    /// Re-clamp both axes after every step, hardening the inherited
    /// degenerate cases (embedded stationary balls, exhausted floor rebounds)
    pub strict_containment: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            left: LEFT_WALL,
            right: RIGHT_WALL,
            top: CEILING,
            bottom: FLOOR,
            ball_count: DEFAULT_BALL_COUNT,
            restitution_loss: BALL_DEGRADATION,
            seed: 0,
            max_ticks: DEFAULT_MAX_TICKS,
            stop_x: None,
            strict_containment: false,
        }
    }
}

impl Settings {
    /// Reject malformed configurations before the simulation is built
    ///
    /// The per-tick hot path assumes these hold and never re-checks them.
    pub fn validate(&self) -> Result<(), SimError> {
        // Delegates the rectangle checks
        crate::sim::Enclosure::new(self.left, self.right, self.top, self.bottom)?;

        if self.ball_count == 0 {
            return Err(SimError::InvalidConfiguration(
                "ball count must be at least 1".into(),
            ));
        }
        if self.restitution_loss < 0 {
            return Err(SimError::InvalidConfiguration(format!(
                "restitution loss must be non-negative, got {}",
                self.restitution_loss
            )));
        }
        if self.max_ticks == 0 {
            return Err(SimError::InvalidConfiguration(
                "tick budget must be at least 1".into(),
            ));
        }

        // The largest spawnable ball must fit the box.
        let max_radius = SPAWN_RADIUS_MAX - 1;
        let width = self.right - self.left;
        let height = self.bottom - self.top;
        if 2 * max_radius > width || 2 * max_radius > height {
            return Err(SimError::InvalidConfiguration(format!(
                "box {width}x{height} is too small for spawned radii up to {max_radius}"
            )));
        }

        Ok(())
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| SimError::InvalidConfiguration(format!("bad settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SimError::InvalidConfiguration(format!("cannot read {}: {e}", path.display()))
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
