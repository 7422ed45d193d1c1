//! Area-based progress
//!
//! Progress is the shape's remaining area normalized between the game-over
//! threshold (0%) and the reference area (100%).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::polygon_area;
use crate::settings::Settings;

/// Latest progress reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub area: f32,
    /// 1.0 at the reference area, 0.0 at the game-over threshold
    pub percentage: f32,
    /// Rounded whole percent, as displayed
    pub display: i32,
    /// Hidden once the percentage drops to zero or below
    pub visible: bool,
}

impl Progress {
    /// Recompute from the current vertex positions
    pub fn evaluate(positions: &[Vec2], settings: &Settings) -> Self {
        let area = polygon_area(positions);
        let fraction = settings.gameover_fraction;
        let percentage = (area / settings.reference_area - fraction) / (1.0 - fraction);
        Self {
            area,
            percentage,
            display: (percentage * 100.0).round() as i32,
            visible: percentage > 0.0,
        }
    }

    /// Whether the displayed percentage has run out
    pub fn is_depleted(&self) -> bool {
        self.display <= 0
    }
}
