//! Folder pickups
//!
//! A small pool of pickup slots of which at most one is active. An active
//! pickup is glued to the three vertices it spawned between: every tick it
//! moves by the average displacement of those anchors.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::random_point_in_triangle;
use super::polygon::Polygon;
use crate::error::{Result, SimError};

/// A vertex a pickup follows, with its position as of the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub vertex: usize,
    pub last_pos: Vec2,
}

/// A pickup entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec2,
    pub anchors: [Anchor; 3],
    pub active: bool,
}

impl Pickup {
    /// Move by the mean displacement of the anchors since the last call
    pub fn follow_anchors(&mut self, polygon: &Polygon) {
        let mut shift = Vec2::ZERO;
        for anchor in &mut self.anchors {
            let current = polygon.position(anchor.vertex);
            shift += (current - anchor.last_pos) / 3.0;
            anchor.last_pos = current;
        }
        self.pos += shift;
    }
}

/// Triangle pickups may spawn in, and the vertices it was derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRegion {
    pub triangle: [Vec2; 3],
    pub anchors: [usize; 3],
}

/// Shrunken triangle spanned by `anchor` and the two vertices after it.
///
/// Each corner is pulled toward the other two by `(1 - scale) / 3` of the
/// way along both edges.
pub fn spawn_region(polygon: &Polygon, anchor: usize, scale: f32) -> Result<SpawnRegion> {
    let n = polygon.len();
    if n < 3 {
        return Err(SimError::EmptyPolygon { vertices: n });
    }
    let following = |i: usize| polygon.next(Some(i)).unwrap_or(i);
    let v0 = anchor % n;
    let v1 = following(v0);
    let v2 = following(v1);
    let (p0, p1, p2) = (polygon.position(v0), polygon.position(v1), polygon.position(v2));

    let pull = (1.0 - scale) / 3.0;
    let corner = |base: Vec2, a: Vec2, b: Vec2| base + (a - base) * pull + (b - base) * pull;

    Ok(SpawnRegion {
        triangle: [corner(p0, p1, p2), corner(p1, p0, p2), corner(p2, p0, p1)],
        anchors: [v0, v1, v2],
    })
}

/// Pool of reusable pickup slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupPool {
    pub slots: Vec<Pickup>,
    capacity: usize,
    next_id: u32,
}

impl PickupPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
            next_id: 1,
        }
    }

    /// The single active pickup, if any
    pub fn active(&self) -> Option<&Pickup> {
        self.slots.iter().find(|p| p.active)
    }

    pub fn has_active(&self) -> bool {
        self.active().is_some()
    }

    /// Spawn a pickup inside the region anchored at `anchor`.
    ///
    /// Refuses with [`SimError::SpawnWhileActive`] if a pickup is live,
    /// leaving the pool untouched.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        polygon: &Polygon,
        anchor: usize,
        scale: f32,
        rng: &mut R,
    ) -> Result<&Pickup> {
        if self.has_active() {
            return Err(SimError::SpawnWhileActive);
        }
        let region = spawn_region(polygon, anchor, scale)?;
        let [a, b, c] = region.triangle;
        let pos = random_point_in_triangle(rng, a, b, c);

        let pickup = Pickup {
            id: self.next_id,
            pos,
            anchors: region.anchors.map(|vertex| Anchor {
                vertex,
                last_pos: polygon.position(vertex),
            }),
            active: true,
        };
        self.next_id += 1;

        // Reuse a retired slot before growing
        let slot = match self.slots.iter().position(|p| !p.active) {
            Some(i) if self.slots.len() >= self.capacity => {
                self.slots[i] = pickup;
                i
            }
            _ => {
                self.slots.push(pickup);
                self.slots.len() - 1
            }
        };
        Ok(&self.slots[slot])
    }

    /// Move the active pickup with its anchors
    pub fn tick(&mut self, polygon: &Polygon) {
        for pickup in self.slots.iter_mut().filter(|p| p.active) {
            pickup.follow_anchors(polygon);
        }
    }

    /// Retire the active pickup as collected. Returns its id.
    pub fn hit(&mut self) -> Option<u32> {
        self.retire()
    }

    /// Retire the active pickup as missed. Returns its id.
    pub fn miss(&mut self) -> Option<u32> {
        self.retire()
    }

    fn retire(&mut self) -> Option<u32> {
        let pickup = self.slots.iter_mut().find(|p| p.active)?;
        pickup.active = false;
        Some(pickup.id)
    }

    /// Drop every slot
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
