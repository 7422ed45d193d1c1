//! Cursor traversal state machine
//!
//! The cursor walks the polygon edge toward its target vertex. A trigger
//! makes it jump across to the next edge, landing where the local slope
//! says it should. Jumps are also where folders get collected or missed,
//! and a miss bends the shape inward.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{SegmentSide, project_point_on_segment, side_of_segment};
use super::pickup::PickupPool;
use super::polygon::Polygon;
use super::state::{GameEvent, GameOverCause};
use crate::settings::Settings;
use crate::{move_towards, normalize_angle};

/// Checkpoint value marking a pickup that lies off the jump segment.
///
/// Shares its value with a real position; a legitimate checkpoint at
/// exactly (1, 1) is also treated as a miss.
pub const OFF_SEGMENT_CHECKPOINT: Vec2 = Vec2::ONE;

/// Movement phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorPhase {
    /// Following the edge toward the target vertex
    Walking,
    /// Flying toward the jump destination
    Jumping,
}

/// Everything the cursor reads or mutates during one tick
pub struct Traversal<'a> {
    pub polygon: &'a mut Polygon,
    pub pickups: &'a mut PickupPool,
    pub rng: &'a mut Pcg32,
    pub events: &'a mut Vec<GameEvent>,
    pub settings: &'a Settings,
    /// Vertex toggles, spawns and lethal touches only apply when interactive
    pub interactive: bool,
}

/// The player's cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursor {
    pub pos: Vec2,
    pub phase: CursorPhase,
    /// Vertex currently followed
    pub target: Option<usize>,
    /// Computed once per jump
    pub jump_destination: Option<Vec2>,
    /// Point on the jump segment nearest the pickup, computed once per jump
    pub pickup_checkpoint: Option<Vec2>,
    /// Flips on every vertex arrival; pickups spawn when it turns true and
    /// are judged on the following leg, while it is false
    pub spawn_turn: bool,
    /// Cosmetic heading (radians)
    pub heading: f32,
    heading_goal: f32,
    pub speed: f32,
    pub jump_speed: f32,
}

impl Cursor {
    /// Cursor parked on the first vertex, walking toward it
    pub fn new(polygon: &Polygon, settings: &Settings) -> Self {
        let target = polygon.next(None);
        Self {
            pos: target.map(|t| polygon.position(t)).unwrap_or(Vec2::ZERO),
            phase: CursorPhase::Walking,
            target,
            jump_destination: None,
            pickup_checkpoint: None,
            spawn_turn: false,
            heading: 0.0,
            heading_goal: 0.0,
            speed: settings.speed,
            jump_speed: settings.jump_speed,
        }
    }

    /// Freeze the cursor in place (game over)
    pub fn halt(&mut self) {
        self.speed = 0.0;
        self.jump_speed = 0.0;
    }

    /// Advance one tick. Returns a game-over cause on a lethal touch.
    pub fn update(&mut self, world: &mut Traversal<'_>, trigger: bool, dt: f32) -> Option<GameOverCause> {
        match self.phase {
            CursorPhase::Walking => self.walk(world, trigger, dt),
            CursorPhase::Jumping => {
                self.jump(world, dt);
                None
            }
        }
    }

    fn walk(&mut self, world: &mut Traversal<'_>, trigger: bool, dt: f32) -> Option<GameOverCause> {
        let mut target = self.target.or_else(|| world.polygon.next(None))?;
        self.target = Some(target);

        let step = self.speed * dt;
        let target_pos = world.polygon.position(target);
        if self.pos.distance(target_pos) < step {
            if !world.polygon.is_hidden(target) {
                log::info!("Cursor touched lethal vertex {}", target);
                return Some(GameOverCause::LethalVertex);
            }
            self.pos = target_pos;
            show_vertex(world, target);
            target = self.arrive(world, target);
        }

        self.pos = move_towards(self.pos, world.polygon.position(target), step);
        self.turn(world.settings, dt);

        if trigger {
            if let Some(following) = world.polygon.next(Some(target)) {
                hide_vertex(world, following);
            }
            self.jump_destination = None;
            self.pickup_checkpoint = None;
            self.phase = CursorPhase::Jumping;
        }
        None
    }

    fn jump(&mut self, world: &mut Traversal<'_>, dt: f32) {
        let Some(target) = self.target else {
            self.phase = CursorPhase::Walking;
            return;
        };

        let destination = match self.jump_destination {
            Some(dest) => dest,
            None => match world.polygon.jump_destination(self.pos, target) {
                Ok(dest) => {
                    let to_dest = dest - self.pos;
                    self.heading_goal =
                        to_dest.y.atan2(to_dest.x) - world.settings.heading_offset_radians();
                    self.jump_destination = Some(dest);
                    dest
                }
                Err(err) => {
                    log::warn!("Jump toward vertex {} aborted: {}", target, err);
                    self.phase = CursorPhase::Walking;
                    return;
                }
            },
        };

        self.collect_or_miss(world, target, destination, dt);

        self.pos = move_towards(self.pos, destination, self.jump_speed * dt);
        self.turn(world.settings, dt);

        if self.pos.distance(destination) <= self.speed * dt {
            show_vertex(world, target);
            self.arrive(world, target);
            self.pos = destination;
            self.phase = CursorPhase::Walking;
        }
    }

    /// Collect the active pickup when close enough; on a judged leg, count
    /// it missed once the cursor passes its checkpoint and bend the shape
    fn collect_or_miss(&mut self, world: &mut Traversal<'_>, target: usize, destination: Vec2, dt: f32) {
        let Some(pickup) = world.pickups.active() else {
            return;
        };
        let pickup_pos = pickup.pos;

        if self.pos.distance(pickup_pos) <= world.settings.collect_radius {
            if let Some(id) = world.pickups.hit() {
                log::debug!("Pickup {} collected", id);
                world.events.push(GameEvent::PickupCollected { id });
            }
            return;
        }

        if self.spawn_turn {
            return;
        }

        let checkpoint = *self.pickup_checkpoint.get_or_insert_with(|| {
            let point = project_point_on_segment(self.pos, destination, pickup_pos);
            if side_of_segment(self.pos, destination, point) != SegmentSide::Within {
                OFF_SEGMENT_CHECKPOINT
            } else {
                point
            }
        });

        if checkpoint == OFF_SEGMENT_CHECKPOINT || checkpoint.distance(self.pos) <= self.speed * dt {
            let Some(id) = world.pickups.miss() else {
                return;
            };
            log::debug!("Pickup {} missed", id);
            world.events.push(GameEvent::PickupMissed { id });

            let previous = world.polygon.previous(Some(target)).unwrap_or(target);
            let direction =
                (world.polygon.position(target) - world.polygon.position(previous)).normalize_or_zero();
            let delta = direction * self.pos.distance(pickup_pos) * world.settings.miss_deformation;
            world.polygon.translate_vertex(previous, delta);
            log::debug!("Vertex {} deforming by {:?}", previous, delta);
            world.events.push(GameEvent::VertexDeformed { vertex: previous, delta });
        }
    }

    /// Move on from `reached`; returns the new target
    fn arrive(&mut self, world: &mut Traversal<'_>, reached: usize) -> usize {
        let next = world.polygon.next(Some(reached)).unwrap_or(reached);
        self.target = Some(next);
        self.heading_goal = 0.0;
        self.spawn_turn = !self.spawn_turn;

        if world.interactive && self.spawn_turn {
            match world
                .pickups
                .spawn(&*world.polygon, next, world.settings.spawn_scale, &mut *world.rng)
            {
                Ok(pickup) => {
                    log::debug!("Pickup {} spawned at {:?}", pickup.id, pickup.pos);
                    world.events.push(GameEvent::PickupSpawned {
                        id: pickup.id,
                        pos: pickup.pos,
                    });
                }
                Err(err) => log::debug!("No pickup spawned: {}", err),
            }
        }
        next
    }

    fn turn(&mut self, settings: &Settings, dt: f32) {
        let t = (settings.heading_smoothing * dt).clamp(0.0, 1.0);
        let delta = normalize_angle(self.heading_goal - self.heading);
        self.heading = normalize_angle(self.heading + delta * t);
    }
}

fn show_vertex(world: &mut Traversal<'_>, vertex: usize) {
    if world.interactive && world.polygon.show(vertex) {
        world.events.push(GameEvent::VertexShown { vertex });
    }
}

fn hide_vertex(world: &mut Traversal<'_>, vertex: usize) {
    if world.interactive && world.polygon.hide(vertex) {
        world.events.push(GameEvent::VertexHidden { vertex });
    }
}
