//! Simulation state and core types
//!
//! Everything that must be persisted for snapshot/determinism lives here.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::SimError;
use crate::consts::*;
use crate::settings::Settings;

/// The fixed rectangular region balls are confined to
///
/// Screen coordinates: `top` is the numerically smaller y bound (the upper
/// edge), `bottom` the larger (the floor). Immutable for the lifetime of a
/// run; every ball borrows it read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Enclosure {
    /// Build a validated enclosure; degenerate rectangles are rejected
    pub fn new(left: i32, right: i32, top: i32, bottom: i32) -> Result<Self, SimError> {
        if left >= right {
            return Err(SimError::InvalidConfiguration(format!(
                "left wall ({left}) must be less than right wall ({right})"
            )));
        }
        if top >= bottom {
            return Err(SimError::InvalidConfiguration(format!(
                "ceiling ({top}) must be less than floor ({bottom})"
            )));
        }
        Ok(Self {
            left,
            right,
            top,
            bottom,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Ball colors, in the original demo's integer-code order (0-9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Black,
    Blue,
    Cyan,
    Gray,
    Green,
    Magenta,
    Orange,
    Pink,
    Red,
    Yellow,
}

/// Finite lookup table for integer color codes
pub const PALETTE: [Color; 10] = [
    Color::Black,
    Color::Blue,
    Color::Cyan,
    Color::Gray,
    Color::Green,
    Color::Magenta,
    Color::Orange,
    Color::Pink,
    Color::Red,
    Color::Yellow,
];

impl Color {
    /// Look up a color by its integer code; codes >= 10 are rejected
    pub fn from_code(code: u8) -> Result<Self, SimError> {
        PALETTE.get(code as usize).copied().ok_or_else(|| {
            SimError::InvalidConfiguration(format!("color code {code} out of range (0-9)"))
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Blue => "blue",
            Color::Cyan => "cyan",
            Color::Gray => "gray",
            Color::Green => "green",
            Color::Magenta => "magenta",
            Color::Orange => "orange",
            Color::Pink => "pink",
            Color::Red => "red",
            Color::Yellow => "yellow",
        }
    }
}

/// A ball entity
///
/// Pure kinematic state: center position, per-tick displacement, and the two
/// constants that shape its bounces. All quantities are `i32` end to end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Center of the ball
    pub pos: IVec2,
    /// Signed displacement applied each tick
    pub vel: IVec2,
    pub radius: i32,
    /// Speed shaved off the rebound on each floor bounce (floor only; ceiling
    /// and side walls reflect losslessly)
    pub restitution_loss: i32,
    pub color: Color,
}

impl Ball {
    pub fn new(
        id: u32,
        pos: IVec2,
        vel: IVec2,
        radius: i32,
        restitution_loss: i32,
        color: Color,
    ) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            restitution_loss,
            color,
        }
    }

    /// Horizontal position of the center
    #[inline]
    pub fn x(&self) -> i32 {
        self.pos.x
    }

    /// Vertical position of the center
    #[inline]
    pub fn y(&self) -> i32 {
        self.pos.y
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The box the balls bounce in
    pub enclosure: Enclosure,
    /// Active balls (sorted by id; never removed mid-run)
    pub balls: Vec<Ball>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Re-clamp both axes after every step (see `Settings::strict_containment`)
    pub strict_containment: bool,
    /// Next ball ID
    next_id: u32,
}

impl SimState {
    /// Build a world from settings, spawning `ball_count` randomized balls
    ///
    /// Validates the settings first; the per-tick path never re-validates.
    /// Spawn ranges follow the original demo: position anywhere in the box,
    /// speeds in `[1, 9)`, radius in `[10, 25)`, color code in `[0, 10)`.
    pub fn new(settings: &Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let enclosure = Enclosure::new(
            settings.left,
            settings.right,
            settings.top,
            settings.bottom,
        )?;

        let mut state = Self {
            seed: settings.seed,
            enclosure,
            balls: Vec::with_capacity(settings.ball_count as usize),
            time_ticks: 0,
            strict_containment: settings.strict_containment,
            next_id: 1,
        };

        let mut rng = Pcg32::seed_from_u64(settings.seed);
        for _ in 0..settings.ball_count {
            let pos = IVec2::new(
                rng.random_range(enclosure.left..enclosure.right),
                rng.random_range(enclosure.top..enclosure.bottom),
            );
            let vel = IVec2::new(
                rng.random_range(SPAWN_SPEED_MIN..SPAWN_SPEED_MAX),
                rng.random_range(SPAWN_SPEED_MIN..SPAWN_SPEED_MAX),
            );
            let radius = rng.random_range(SPAWN_RADIUS_MIN..SPAWN_RADIUS_MAX);
            let color = Color::from_code(rng.random_range(0..PALETTE.len() as u8))?;
            state.add_ball(pos, vel, radius, settings.restitution_loss, color)?;
        }

        Ok(state)
    }

    /// Allocate a new ball ID
    fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a ball, validating it against the enclosure
    ///
    /// The radius must be positive and fit the box (bounding circle no wider
    /// than either box dimension), and the restitution loss must be
    /// non-negative. The initial position is taken as-is: the original demo
    /// spawns balls whose circles may overlap a wall, and the first bounce
    /// sorts them out.
    pub fn add_ball(
        &mut self,
        pos: IVec2,
        vel: IVec2,
        radius: i32,
        restitution_loss: i32,
        color: Color,
    ) -> Result<u32, SimError> {
        if radius <= 0 {
            return Err(SimError::InvalidConfiguration(format!(
                "ball radius must be positive, got {radius}"
            )));
        }
        if restitution_loss < 0 {
            return Err(SimError::InvalidConfiguration(format!(
                "restitution loss must be non-negative, got {restitution_loss}"
            )));
        }
        if 2 * radius > self.enclosure.width() || 2 * radius > self.enclosure.height() {
            return Err(SimError::InvalidConfiguration(format!(
                "ball radius {radius} does not fit a {}x{} box",
                self.enclosure.width(),
                self.enclosure.height()
            )));
        }
        let id = self.next_ball_id();
        self.balls
            .push(Ball::new(id, pos, vel, radius, restitution_loss, color));
        Ok(id)
    }
}
