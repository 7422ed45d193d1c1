//! The traversed shape
//!
//! An index-addressed ring of vertices. Neighbor queries use modulo
//! arithmetic; vertices are never added or removed during a session, only
//! repositioned and toggled between passable and lethal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::line_line_intersection;
use crate::error::{Result, SimError};
use crate::move_towards;

/// An in-flight smooth displacement toward a fixed destination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexTranslation {
    pub destination: Vec2,
}

/// A single vertex of the shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub pos: Vec2,
    /// Passable when true; touching a non-hidden vertex while walking is lethal
    pub hidden: bool,
    /// At most one translation per vertex; a new one replaces it
    pub translation: Option<VertexTranslation>,
}

impl Vertex {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            hidden: true,
            translation: None,
        }
    }
}

/// Ordered cyclic sequence of vertices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
}

impl Polygon {
    pub fn new(points: &[Vec2]) -> Self {
        Self {
            vertices: points.iter().copied().map(Vertex::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Position of vertex `idx`
    #[inline]
    pub fn position(&self, idx: usize) -> Vec2 {
        self.vertices[idx].pos
    }

    pub fn is_hidden(&self, idx: usize) -> bool {
        self.vertices[idx].hidden
    }

    /// Next vertex in the cycle; `None` starts at the first vertex
    pub fn next(&self, current: Option<usize>) -> Option<usize> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        Some(match current {
            Some(i) => (i + 1) % n,
            None => 0,
        })
    }

    /// Previous vertex in the cycle; `None` starts at the first vertex
    pub fn previous(&self, current: Option<usize>) -> Option<usize> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        Some(match current {
            Some(i) => (i % n + n - 1) % n,
            None => 0,
        })
    }

    /// Make `idx` passable. Returns true if the state changed.
    pub fn hide(&mut self, idx: usize) -> bool {
        let vertex = &mut self.vertices[idx];
        let changed = !vertex.hidden;
        vertex.hidden = true;
        changed
    }

    /// Make `idx` lethal again. Returns true if the state changed.
    pub fn show(&mut self, idx: usize) -> bool {
        let vertex = &mut self.vertices[idx];
        let changed = vertex.hidden;
        vertex.hidden = false;
        changed
    }

    /// Start creeping vertex `idx` toward its current position + `delta`,
    /// replacing any translation already in flight
    pub fn translate_vertex(&mut self, idx: usize, delta: Vec2) {
        let vertex = &mut self.vertices[idx];
        vertex.translation = Some(VertexTranslation {
            destination: vertex.pos + delta,
        });
    }

    /// Whether any vertex is still moving
    pub fn is_deforming(&self) -> bool {
        self.vertices.iter().any(|v| v.translation.is_some())
    }

    /// Advance every in-flight translation by one tick
    pub fn advance_translations(&mut self, dt: f32, creep_speed: f32) {
        let step = creep_speed * dt;
        for vertex in &mut self.vertices {
            let Some(translation) = vertex.translation else {
                continue;
            };
            if vertex.pos.distance(translation.destination) > step {
                vertex.pos = move_towards(vertex.pos, translation.destination, step);
            } else {
                vertex.pos = translation.destination;
                vertex.translation = None;
            }
        }
    }

    /// Snapshot of current positions in cycle order
    pub fn positions(&self) -> Vec<Vec2> {
        self.vertices.iter().map(|v| v.pos).collect()
    }

    /// Landing point of a jump started at `jump_start` while heading for
    /// `target`: where the edge `target -> next` meets the line through the
    /// jump start that runs parallel to `previous -> next`.
    pub fn jump_destination(&self, jump_start: Vec2, target: usize) -> Result<Vec2> {
        let (Some(prev), Some(next)) = (self.previous(Some(target)), self.next(Some(target))) else {
            return Err(SimError::EmptyPolygon { vertices: 0 });
        };
        let prev = self.position(prev);
        let next = self.position(next);
        let here = self.position(target);

        line_line_intersection(
            here,
            (next - here).normalize_or_zero(),
            jump_start,
            (next - prev).normalize_or_zero(),
        )
    }
}
