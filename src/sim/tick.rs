//! Fixed-timestep orchestrator. One [`tick`] advances the whole world by a
//! single frame; given the same starting state and input sequence it
//! always produces the same result.

use serde::{Deserialize, Serialize};

use super::ai::{self, Spawned};
use super::state::{
    Enemy, GameEvent, GamePhase, GameState, Projectile, patrol_bounds_for,
};
use super::{combat, physics, player};
use crate::consts::*;

/// Sampled control state for one tick. Press-triggered actions fire on
/// the rising edge against the previous tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack: bool,
    pub dash: bool,
    pub shield: bool,
    pub utility: bool,
    pub pause: bool,
}

/// Advance the simulation by one fixed step of `dt` milliseconds.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Pause toggles on the press edge and freezes everything else
    if input.pause && !state.prev_input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }
    if state.phase != GamePhase::Playing {
        state.prev_input = input.clone();
        return;
    }

    state.time_ticks += 1;
    state.screen_shake = (state.screen_shake - SHAKE_DECAY).max(0.0);

    player::update_player(state, input, dt);
    if physics::resolve_player(state) {
        state.raise(GameEvent::GameOver);
        state.prev_input = input.clone();
        return;
    }

    // Enemy pass runs against a snapshot of the player so every enemy
    // sees the same frame
    let snapshot = state.player.clone();
    let mut out = Spawned::default();
    let mut enemies = std::mem::take(&mut state.enemies);
    for enemy in &mut enemies {
        *enemy = ai::update_enemy(enemy, &snapshot, dt, &mut state.rng, &mut out);
    }
    state.enemies = enemies;
    apply_spawns(state, out);

    let elapsed = state.elapsed_ms();
    for blade in &mut state.blades {
        blade.update(elapsed);
    }

    combat::update_projectiles(state, dt);
    combat::apply_player_attack(state);
    combat::apply_hazard_contacts(state);
    combat::sweep_dead_enemies(state);
    combat::spawn_boss_goal_if_cleared(state);
    combat::apply_pickups_and_goal(state);

    state.normalize_order();
    state.prev_input = input.clone();
}

/// Materialize everything the AI pass asked for, assigning ids here so
/// allocation order stays deterministic
fn apply_spawns(state: &mut GameState, out: Spawned) {
    for spawn in out.projectiles {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            kind: spawn.kind,
            rect: spawn.rect,
            vel: spawn.vel,
            lifespan_ms: None,
        });
    }
    for minion in out.minions {
        let id = state.next_entity_id();
        let stats = minion.kind.base_stats();
        let bounds = patrol_bounds_for(
            &state.objects,
            minion.x,
            minion.y,
            stats.width,
            stats.height,
        );
        state.enemies.push(Enemy::spawn(
            id, minion.kind, minion.x, minion.y, stats, bounds,
        ));
    }
    state.bump_shake(out.shake);
}
