//! Folder Dash - A polygon-hopping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (traversal, pickups, deformation, progress)
//! - `settings`: Tunable speeds and calibration constants
//! - `hud`: Presentation-side collaborators fed by simulation events

pub mod error;
pub mod hud;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Area of the shape a full-progress session starts from
    pub const REFERENCE_AREA: f32 = 16.0575;
    /// Fraction of the reference area at which the session ends
    pub const GAMEOVER_FRACTION: f32 = 2.0 / 3.0;

    /// Default starting shape (regular hexagon, area ~= REFERENCE_AREA)
    pub const DEFAULT_SHAPE_SIDES: usize = 6;
    pub const DEFAULT_SHAPE_RADIUS: f32 = 2.486;

    /// Determinant magnitude below which two lines count as parallel
    pub const PARALLEL_EPSILON: f32 = 1e-4;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Move `current` toward `target` by at most `max_delta`, landing exactly on
/// the target when it is within reach.
#[inline]
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let to_target = target - current;
    let dist = to_target.length();
    if dist <= max_delta || dist == 0.0 {
        return target;
    }
    current + to_target / dist * max_delta
}

/// Vertices of a regular polygon centered on the origin, counter-clockwise,
/// first vertex on the +X axis.
pub fn regular_polygon(sides: usize, radius: f32) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let theta = i as f32 / sides as f32 * std::f32::consts::TAU;
            Vec2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}
