//! Folder Dash headless runner
//!
//! Plays a seeded attract-mode session at the fixed timestep, logging what
//! the presentation layer would show, then prints a JSON snapshot.

use folder_dash::consts::*;
use folder_dash::hud::{FolderTally, TallyChange, caption, status_label};
use folder_dash::sim::{GameEvent, GameState, TickInput, tick};
use folder_dash::{Settings, regular_polygon};
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Upper bound on simulated ticks (10 minutes at 60 Hz)
const MAX_TICKS: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Folder Dash (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Could not load settings from {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let seed = std::env::var("FOLDER_DASH_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);

    let shape = regular_polygon(DEFAULT_SHAPE_SIDES, DEFAULT_SHAPE_RADIUS);
    let mut state = match GameState::try_new(&shape, settings, seed) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Invalid settings: {}", err);
            std::process::exit(1);
        }
    };
    log::info!("Game initialized with seed: {}", seed);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut tally = FolderTally::new();
    let mut captions = Pcg32::seed_from_u64(seed ^ 0xC0FFEE);
    let mut last_label = None;

    while state.time_ticks < MAX_TICKS {
        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::PickupCollected { id } => {
                    log::info!("Folder {} {}", id, caption(true, &mut captions));
                }
                GameEvent::PickupMissed { id } => {
                    log::info!("Folder {} {}", id, caption(false, &mut captions));
                }
                GameEvent::GameOver { cause } => log::info!("GAME OVER ({:?})", cause),
                other => log::debug!("{:?}", other),
            }
            if let Some(TallyChange::Merged) = tally.apply(&event) {
                log::info!("Folders merged ({} total)", tally.merges);
            }
        }

        let label = status_label(&state.progress);
        if label != last_label {
            if let Some(text) = &label {
                log::info!("Shape status: {}", text);
            }
            last_label = label;
        }

        if state.game_over_cause.is_some() {
            break;
        }
    }

    let snapshot = serde_json::json!({
        "seed": seed,
        "ticks": state.time_ticks,
        "phase": state.phase,
        "cause": state.game_over_cause,
        "progress": state.progress,
        "merges": tally.merges,
        "polygon": state.polygon,
    });
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Snapshot failed: {}", err),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless runner is native only
}
