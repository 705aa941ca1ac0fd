//! Deterministic simulation module
//!
//! All kinematics live here. This module must be pure and deterministic:
//! - Fixed logical timestep only (one tick = one velocity's worth of travel)
//! - Seeded RNG only, and only at spawn time - `step` itself draws nothing
//! - Stable iteration order (by ball ID)
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{Ball, Color, Enclosure, SimState, PALETTE};
pub use tick::{enforce_containment, step, tick};
