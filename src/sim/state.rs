//! Session state and core simulation types
//!
//! Owns every component of a running session. Components receive their
//! collaborators explicitly from the tick; nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cursor::Cursor;
use super::pickup::PickupPool;
use super::polygon::Polygon;
use super::progress::Progress;
use crate::error::{Result, SimError};
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu; nothing simulates
    Idle,
    /// Started, cursor moving, but vertices, pickups and area checks are off
    Warmup,
    /// Active gameplay
    Interactive,
    /// Session ended
    GameOver,
}

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Walked into a vertex that was showing
    LethalVertex,
    /// Area fell to the game-over threshold
    AreaDepleted,
    /// Shape has fewer than 3 vertices
    DegeneratePolygon,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Interactive,
    VertexShown { vertex: usize },
    VertexHidden { vertex: usize },
    PickupSpawned { id: u32, pos: Vec2 },
    PickupCollected { id: u32 },
    PickupMissed { id: u32 },
    VertexDeformed { vertex: usize, delta: Vec2 },
    GameOver { cause: GameOverCause },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    pub phase: GamePhase,
    /// Seconds since the session was started
    pub time_since_start: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub polygon: Polygon,
    pub cursor: Cursor,
    pub pickups: PickupPool,
    pub progress: Progress,
    pub game_over_cause: Option<GameOverCause>,
    /// Pending notifications
    pub events: Vec<GameEvent>,
    /// Shape the session restarts from
    initial_shape: Vec<Vec2>,
}

impl GameState {
    /// Create an idle session over `shape`, rejecting out-of-range settings
    pub fn try_new(shape: &[Vec2], settings: Settings, seed: u64) -> Result<Self> {
        settings.validate()?;
        Ok(Self::new(shape, settings, seed))
    }

    /// Create an idle session over `shape` with the given seed.
    ///
    /// `settings` are trusted as given. Out-of-range calibration yields NaN
    /// progress, which reads as depleted; use [`GameState::try_new`] for
    /// settings that have not been validated.
    pub fn new(shape: &[Vec2], settings: Settings, seed: u64) -> Self {
        let polygon = Polygon::new(shape);
        let cursor = Cursor::new(&polygon, &settings);
        let progress = Progress::evaluate(&polygon.positions(), &settings);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            pickups: PickupPool::new(settings.pickup_pool_size),
            settings,
            phase: GamePhase::Idle,
            time_since_start: 0.0,
            time_ticks: 0,
            polygon,
            cursor,
            progress,
            game_over_cause: None,
            events: Vec::new(),
            initial_shape: shape.to_vec(),
        }
    }

    /// Leave the menu and start moving
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            log::info!("Session started (seed {})", self.seed);
            self.phase = GamePhase::Warmup;
            self.time_since_start = 0.0;
            self.events.push(GameEvent::Started);
        }
    }

    /// Vertex toggles, spawns and area game-over are live
    pub fn is_interactive(&self) -> bool {
        self.phase == GamePhase::Interactive
    }

    /// Started and not yet over
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Warmup | GamePhase::Interactive)
    }

    /// End the session. Only the first call has any effect.
    pub fn fire_game_over(&mut self, cause: GameOverCause) -> Result<()> {
        if self.phase == GamePhase::GameOver {
            return Err(SimError::DoubleGameOver);
        }
        log::info!("Game over: {:?} at {}%", cause, self.progress.display);
        self.phase = GamePhase::GameOver;
        self.game_over_cause = Some(cause);
        self.cursor.halt();
        self.events.push(GameEvent::GameOver { cause });
        Ok(())
    }

    /// Apply new tuning mid-session
    pub fn configure(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        if self.phase != GamePhase::GameOver {
            self.cursor.speed = settings.speed;
            self.cursor.jump_speed = settings.jump_speed;
        }
        self.settings = settings;
        Ok(())
    }

    /// Rebuild everything from the initial shape and return to the menu
    pub fn restart(&mut self) {
        log::info!("Session restarted");
        let shape = std::mem::take(&mut self.initial_shape);
        let settings = self.settings.clone();
        *self = Self::new(&shape, settings, self.seed);
    }

    /// Restart with a fresh seed
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.restart();
    }

    /// Hand pending notifications to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
