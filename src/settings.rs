//! Game tuning and calibration
//!
//! Speeds, progress calibration and spawn geometry. Loaded from JSON so the
//! balance can change without a rebuild.

use serde::{Deserialize, Serialize};

use crate::consts::{GAMEOVER_FRACTION, REFERENCE_AREA};
use crate::error::{Result, SimError};

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Cursor ===
    /// Walking speed along the polygon edges (units/s)
    pub speed: f32,
    /// Speed while jumping across the shape (units/s)
    pub jump_speed: f32,

    // === Progress ===
    /// Area considered 100% progress
    pub reference_area: f32,
    /// Fraction of `reference_area` at which the session ends
    pub gameover_fraction: f32,

    // === Pickups ===
    /// Scale of the spawn triangle inside the anchor triangle
    pub spawn_scale: f32,
    /// Distance at which a jumping cursor collects a pickup
    pub collect_radius: f32,
    /// Number of pickup slots kept in the pool
    pub pickup_pool_size: usize,

    // === Deformation ===
    /// How fast a displaced vertex creeps to its new position (units/s)
    pub vertex_creep_speed: f32,
    /// Share of the cursor-to-pickup distance a miss shifts the shape by
    pub miss_deformation: f32,

    // === Session ===
    /// Seconds after start before vertices, pickups and area checks go live
    pub interactive_delay: f32,

    // === Cosmetic heading ===
    /// Heading interpolation rate (per second)
    pub heading_smoothing: f32,
    /// Sprite offset subtracted from the jump heading (degrees)
    pub heading_offset: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: 3.0,
            jump_speed: 5.0,

            reference_area: REFERENCE_AREA,
            gameover_fraction: GAMEOVER_FRACTION,

            spawn_scale: 0.5,
            collect_radius: 0.25,
            pickup_pool_size: 3,

            vertex_creep_speed: 1.0 / 3.0,
            miss_deformation: 0.75,

            interactive_delay: 3.0,

            heading_smoothing: 16.0,
            heading_offset: 114.0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check ranges after loading
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(SimError::InvalidSettings(msg.to_string()));

        if !(self.speed >= 0.0) || !(self.jump_speed >= 0.0) {
            return invalid("speeds must be non-negative");
        }
        if !(self.reference_area > 0.0) {
            return invalid("reference_area must be positive");
        }
        if !(0.0..1.0).contains(&self.gameover_fraction) {
            return invalid("gameover_fraction must be in [0, 1)");
        }
        if !(0.0..=1.0).contains(&self.spawn_scale) {
            return invalid("spawn_scale must be in [0, 1]");
        }
        if !(self.collect_radius >= 0.0) {
            return invalid("collect_radius must be non-negative");
        }
        if self.pickup_pool_size == 0 {
            return invalid("pickup_pool_size must be at least 1");
        }
        if !(self.vertex_creep_speed > 0.0) {
            return invalid("vertex_creep_speed must be positive");
        }
        if !(self.interactive_delay >= 0.0) {
            return invalid("interactive_delay must be non-negative");
        }
        Ok(())
    }

    /// Heading offset in radians
    pub fn heading_offset_radians(&self) -> f32 {
        self.heading_offset.to_radians()
    }
}
