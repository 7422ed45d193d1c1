//! Fixed timestep simulation tick
//!
//! Core game loop. One call advances, in order: the cursor, in-flight vertex
//! translations, the active pickup, and the progress reading.

use super::cursor::{CursorPhase, Traversal};
use super::geometry::project_point_on_segment;
use super::progress::Progress;
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};

/// How far ahead (seconds of walking) the autopilot reacts to a lethal vertex
const AUTOPILOT_LOOKAHEAD: f32 = 0.2;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Leave the menu (click on play)
    pub start: bool,
    /// Jump (click/tap); only honored while walking
    pub trigger_jump: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let input = &input;

    if input.start {
        state.start();
    }

    match state.phase {
        GamePhase::Idle => return,
        GamePhase::GameOver => {
            // Cursor is frozen; let the shape settle
            settle(state, dt);
            return;
        }
        GamePhase::Warmup | GamePhase::Interactive => {}
    }

    state.time_ticks += 1;
    state.time_since_start += dt;

    if state.phase == GamePhase::Warmup && state.time_since_start > state.settings.interactive_delay {
        log::info!("Session interactive after {:.2}s", state.time_since_start);
        state.phase = GamePhase::Interactive;
        state.events.push(GameEvent::Interactive);
    }

    if state.polygon.len() < 3 {
        log::warn!("Shape has {} vertices, ending session", state.polygon.len());
        end_session(state, GameOverCause::DegeneratePolygon);
        return;
    }

    // --- CURSOR ---
    let interactive = state.is_interactive();
    let lethal = {
        let mut world = Traversal {
            polygon: &mut state.polygon,
            pickups: &mut state.pickups,
            rng: &mut state.rng,
            events: &mut state.events,
            settings: &state.settings,
            interactive,
        };
        state.cursor.update(&mut world, input.trigger_jump, dt)
    };
    if let Some(cause) = lethal {
        end_session(state, cause);
    }

    // --- SHAPE, PICKUP, PROGRESS ---
    settle(state, dt);

    if state.is_interactive() && state.progress.is_depleted() {
        end_session(state, GameOverCause::AreaDepleted);
    }
}

/// Advance deformation, carry the pickup along, re-measure progress
fn settle(state: &mut GameState, dt: f32) {
    state
        .polygon
        .advance_translations(dt, state.settings.vertex_creep_speed);
    state.pickups.tick(&state.polygon);
    state.progress = Progress::evaluate(&state.polygon.positions(), &state.settings);
}

fn end_session(state: &mut GameState, cause: GameOverCause) {
    if let Err(err) = state.fire_game_over(cause) {
        log::debug!("Ignored game over ({:?}): {}", cause, err);
    }
}

/// Demo autopilot: start the session, jump over lethal vertices, and jump
/// early when the jump would sweep through the active pickup
fn autopilot(state: &GameState, input: &mut TickInput) {
    if state.phase == GamePhase::Idle {
        input.start = true;
        return;
    }
    if !state.is_running() || state.cursor.phase != CursorPhase::Walking {
        return;
    }
    let Some(target) = state.cursor.target else {
        return;
    };
    if state.polygon.len() < 3 {
        return;
    }

    let cursor = state.cursor.pos;
    let lookahead = state.settings.speed * AUTOPILOT_LOOKAHEAD;
    let to_target = cursor.distance(state.polygon.position(target));
    if !state.polygon.is_hidden(target) && to_target < lookahead {
        input.trigger_jump = true;
        return;
    }

    if let Some(pickup) = state.pickups.active() {
        if let Ok(dest) = state.polygon.jump_destination(cursor, target) {
            let nearest = project_point_on_segment(cursor, dest, pickup.pos);
            if nearest.distance(pickup.pos) < state.settings.collect_radius * 0.8 {
                input.trigger_jump = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_SHAPE_RADIUS, DEFAULT_SHAPE_SIDES, SIM_DT};
    use crate::settings::Settings;
    use crate::regular_polygon;
    use glam::Vec2;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
        ]
    }

    fn square_settings() -> Settings {
        Settings {
            reference_area: 4.0,
            gameover_fraction: 0.5,
            interactive_delay: 0.0,
            ..Settings::default()
        }
    }

    fn started(shape: &[Vec2], settings: Settings) -> GameState {
        let mut state = GameState::new(shape, settings, 12345);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            SIM_DT,
        );
        state
    }

    fn game_overs(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count()
    }

    #[test]
    fn test_idle_does_nothing() {
        let mut state = GameState::new(&square(), square_settings(), 1);
        let before = state.cursor.pos;
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.cursor.pos, before);
    }

    #[test]
    fn test_warmup_becomes_interactive() {
        let settings = Settings {
            interactive_delay: 0.5,
            ..square_settings()
        };
        let mut state = started(&square(), settings);
        assert_eq!(state.phase, GamePhase::Warmup);
        for _ in 0..40 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Interactive);
        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::Started);
        assert!(events.contains(&GameEvent::Interactive));
    }

    #[test]
    fn test_warmup_lap_is_safe() {
        let settings = Settings {
            interactive_delay: 100.0,
            ..square_settings()
        };
        let mut state = started(&square(), settings);
        // Two full laps of the 8-unit perimeter at 3 u/s
        for _ in 0..400 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Warmup);
        assert!(state.polygon.vertices.iter().all(|v| v.hidden));
        assert!(!state.pickups.has_active());
    }

    #[test]
    fn test_lethal_vertex_ends_session_once() {
        let mut state = GameState::new(&square(), square_settings(), 7);
        state.polygon.show(1);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            SIM_DT,
        );
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_cause, Some(GameOverCause::LethalVertex));

        // Frozen: further ticks and triggers change nothing
        let pos = state.cursor.pos;
        for _ in 0..50 {
            tick(
                &mut state,
                &TickInput {
                    trigger_jump: true,
                    ..Default::default()
                },
                SIM_DT,
            );
        }
        assert_eq!(state.cursor.pos, pos);
        assert_eq!(state.cursor.phase, CursorPhase::Walking);
        assert_eq!(game_overs(&state.drain_events()), 1);
    }

    #[test]
    fn test_area_depletion_ends_session_once() {
        let settings = Settings {
            vertex_creep_speed: 100.0,
            ..square_settings()
        };
        let mut state = started(&square(), settings);
        assert_eq!(state.progress.display, 100);

        // Pull the far corner deep inside the square
        state.polygon.translate_vertex(2, Vec2::new(-1.5, -1.5));
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_cause, Some(GameOverCause::AreaDepleted));
        assert!(state.progress.area < 0.5 * 4.0);
        assert_eq!(game_overs(&state.drain_events()), 1);
    }

    #[test]
    fn test_missed_pickups_deplete_square() {
        let settings = Settings {
            collect_radius: 0.0,
            ..square_settings()
        };
        let mut state = started(&square(), settings);
        let mut events = state.drain_events();
        let mut last_target = state.cursor.target;
        let mut walked = 0;

        for _ in 0..1800 {
            // Jump a few ticks into every leg on which the pickup is judged
            if state.cursor.target != last_target {
                last_target = state.cursor.target;
                walked = 0;
            }
            let walking = state.cursor.phase == CursorPhase::Walking;
            if walking {
                walked += 1;
            }
            let input = TickInput {
                trigger_jump: walking && !state.cursor.spawn_turn && walked == 4,
                ..Default::default()
            };
            tick(&mut state, &input, SIM_DT);
            events.extend(state.drain_events());
        }

        let misses = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PickupMissed { .. }))
            .count();
        assert!(misses >= 1);
        assert!(events.iter().any(|e| matches!(e, GameEvent::VertexDeformed { .. })));
        assert_eq!(state.game_over_cause, Some(GameOverCause::AreaDepleted));
        assert!(state.progress.is_depleted());
        assert_eq!(game_overs(&events), 1);
    }

    #[test]
    fn test_degenerate_polygon_ends_session() {
        let state = started(&[Vec2::ZERO, Vec2::ONE], square_settings());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_cause, Some(GameOverCause::DegeneratePolygon));
        assert_eq!(state.progress.area, 0.0);
    }

    #[test]
    fn test_empty_polygon_ends_session() {
        let state = started(&[], square_settings());
        assert_eq!(state.cursor.target, None);
        assert_eq!(state.game_over_cause, Some(GameOverCause::DegeneratePolygon));
    }

    #[test]
    fn test_trigger_starts_jump() {
        let mut state = started(&square(), square_settings());
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        tick(
            &mut state,
            &TickInput {
                trigger_jump: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.cursor.phase, CursorPhase::Jumping);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.cursor.phase == CursorPhase::Walking {
                break;
            }
        }
        assert_eq!(state.cursor.phase, CursorPhase::Walking);
        // Landed on the edge between vertices 1 and 2
        assert!((state.cursor.pos.x - 2.0).abs() < 1e-4);
        assert_eq!(state.cursor.target, Some(2));
    }

    #[test]
    fn test_idle_mode_game_over_at_most_once() {
        let shape = regular_polygon(DEFAULT_SHAPE_SIDES, DEFAULT_SHAPE_RADIUS);
        let mut state = GameState::new(&shape, Settings::default(), 2024);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        for _ in 0..20_000 {
            tick(&mut state, &input, SIM_DT);
            events.extend(state.drain_events());
        }
        let overs = game_overs(&events);
        assert!(overs <= 1);
        assert_eq!(overs == 1, state.phase == GamePhase::GameOver);
        assert!(events.contains(&GameEvent::Started));
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs must match exactly
        let shape = regular_polygon(DEFAULT_SHAPE_SIDES, DEFAULT_SHAPE_RADIUS);
        let mut state1 = GameState::new(&shape, Settings::default(), 99999);
        let mut state2 = GameState::new(&shape, Settings::default(), 99999);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..3_000 {
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.cursor.pos, state2.cursor.pos);
        assert_eq!(state1.polygon, state2.polygon);
        assert_eq!(state1.drain_events(), state2.drain_events());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = started(&[Vec2::ZERO, Vec2::ONE], square_settings());
        assert_eq!(state.phase, GamePhase::GameOver);
        state.restart();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.time_ticks, 0);
        assert!(state.game_over_cause.is_none());
    }
}
