//! Headless simulation driver
//!
//! Runs the deterministic core without a renderer: seeds a level, feeds a
//! scripted run-right-and-jump input, and reports how the attempt ended.
//! Useful for profiling level generation and soak-testing the tick loop.

use std::path::Path;

use ronin_rush::Settings;
use ronin_rush::consts::TICK_MS;
use ronin_rush::sim::{GameEvent, GameState, TickInput, tick};

/// Hard cap so a stalemate script cannot spin forever
const MAX_TICKS: u64 = 60 * 60 * 10; // ten minutes of sim time

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let start_level: u32 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(1);
    let levels: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);

    let settings = Settings::load(Path::new(Settings::FILE_NAME));
    let config = settings.sim_config();

    for level in start_level..start_level + levels {
        let mut state = GameState::with_config(level, config);
        let outcome = drive(&mut state);
        log::info!(
            "level {level}: {outcome:?} after {} ticks ({:.1}s), health {}",
            state.time_ticks,
            state.time_ticks as f32 * TICK_MS / 1000.0,
            state.player.health,
        );
        if outcome == Some(GameEvent::GameOver) {
            break;
        }
    }
}

/// Scripted pilot: hold right, hop every second, swing on a short cadence.
/// Dumb but deterministic; it clears early levels and dies honestly later.
fn drive(state: &mut GameState) -> Option<GameEvent> {
    for n in 0..MAX_TICKS {
        let input = TickInput {
            right: true,
            jump: n % 60 < 2,
            attack: n % 45 == 0,
            dash: n % 180 == 0,
            ..Default::default()
        };
        tick(state, &input, TICK_MS);
        if let Some(event) = state.drain_events().pop() {
            return Some(event);
        }
    }
    log::warn!("script stalled, giving up on level {}", state.level_number);
    None
}
