//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by vertex index)
//! - No rendering or platform dependencies

pub mod cursor;
pub mod geometry;
pub mod pickup;
pub mod polygon;
pub mod progress;
pub mod state;
pub mod tick;

pub use cursor::{Cursor, CursorPhase, OFF_SEGMENT_CHECKPOINT};
pub use geometry::{
    SegmentSide, line_line_intersection, polygon_area, project_point_on_line,
    project_point_on_segment, random_point_in_triangle, side_of_segment,
};
pub use pickup::{Pickup, PickupPool, SpawnRegion, spawn_region};
pub use polygon::{Polygon, Vertex, VertexTranslation};
pub use progress::Progress;
pub use state::{GameEvent, GameOverCause, GamePhase, GameState};
pub use tick::{TickInput, tick};
