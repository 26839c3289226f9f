//! Damage resolution: hazard contact, the sword swing, projectile flight
//! and lifecycle, pickups and level-exit checks.

use super::level::is_boss_level;
use super::rect::Rect;
use super::state::{GameEvent, GameState, LevelObject, LevelObjectKind, ProjectileKind};
use crate::consts::*;

/// One damage application for any overlapping hazard this tick. Contact
/// with several hazards at once still costs a single heart; the
/// invincibility window covers the rest.
pub fn apply_hazard_contacts(state: &mut GameState) {
    let player = state.player.rect;

    let spiked = state.objects.iter().any(|o| {
        matches!(o.kind, LevelObjectKind::Spike { .. }) && o.rect.overlaps(&player)
    });
    let body_contact = state
        .enemies
        .iter()
        .any(|e| e.health > 0 && e.rect.overlaps(&player));
    let bladed = state.blades.iter().any(|b| b.hitbox().overlaps(&player));

    if spiked || body_contact || bladed {
        state.damage_player();
    }
}

/// Damage enemies inside the active swing hitbox, at most once per enemy
/// per swing
pub fn apply_player_attack(state: &mut GameState) {
    if !state.player.attacking {
        return;
    }
    let hitbox = state.player.attack_hitbox();
    for i in 0..state.enemies.len() {
        let id = state.enemies[i].id;
        if state.player.swing_hits.contains(&id) || !hitbox.overlaps(&state.enemies[i].rect) {
            continue;
        }
        state.player.swing_hits.push(id);
        state.enemies[i].health -= ATTACK_DAMAGE;
        if state.enemies[i].health <= 0 {
            state.bump_shake(SHAKE_ENEMY_KILL);
        }
    }
}

/// Advance every projectile and resolve its collisions. Shockwaves roll
/// through platforms; everything else is stopped by them.
pub fn update_projectiles(state: &mut GameState, dt: f32) {
    let world_right = state
        .objects
        .iter()
        .map(|o| o.rect.right())
        .fold(GAME_WIDTH, f32::max);

    let mut shuriken_kill = false;
    let mut i = 0;
    while i < state.projectiles.len() {
        let pr = &mut state.projectiles[i];
        pr.rect.x += pr.vel.x;
        pr.rect.y += pr.vel.y;
        if let Some(ms) = &mut pr.lifespan_ms {
            *ms -= dt;
        }

        let mut remove = pr.lifespan_ms.is_some_and(|ms| ms <= 0.0)
            || pr.rect.right() < -100.0
            || pr.rect.x > world_right + 100.0
            || pr.rect.y > GAME_HEIGHT
            || pr.rect.bottom() < 0.0;

        if !remove && pr.kind != ProjectileKind::Shockwave {
            let rect = pr.rect;
            remove = state
                .objects
                .iter()
                .any(|o| o.kind == LevelObjectKind::Platform && o.rect.overlaps(&rect));
        }

        if !remove && pr.kind == ProjectileKind::Shuriken {
            let rect = pr.rect;
            for e in &mut state.enemies {
                if e.health > 0 && e.rect.overlaps(&rect) {
                    e.health -= SHURIKEN_DAMAGE;
                    if e.health <= 0 {
                        shuriken_kill = true;
                    }
                    remove = true;
                    break;
                }
            }
        }

        let mut hit_player = false;
        if !remove
            && matches!(pr.kind, ProjectileKind::EnemyShot | ProjectileKind::Shockwave)
            && pr.rect.overlaps(&state.player.rect)
        {
            // Consumed on contact even when the hit is negated
            hit_player = true;
            remove = true;
        }

        if hit_player {
            state.damage_player();
        }
        if remove {
            let gone = state.projectiles.remove(i);
            if gone.kind == ProjectileKind::Shuriken {
                state.player.shuriken_in_flight = false;
            }
        } else {
            i += 1;
        }
    }
    if shuriken_kill {
        state.bump_shake(SHAKE_ENEMY_KILL);
    }
}

/// Health packs heal one heart and are only consumed below full health;
/// touching the goal ends the level.
pub fn apply_pickups_and_goal(state: &mut GameState) {
    let player = state.player.rect;

    if state.player.health < PLAYER_MAX_HEALTH {
        if let Some(idx) = state.objects.iter().position(|o| {
            o.kind == LevelObjectKind::HealthPack && o.rect.overlaps(&player)
        }) {
            state.objects.remove(idx);
            state.player.health += 1;
            log::debug!("health pack picked up, health {}", state.player.health);
        }
    }

    let reached_goal = state
        .objects
        .iter()
        .any(|o| o.kind == LevelObjectKind::Goal && o.rect.overlaps(&player));
    if reached_goal {
        state.raise(GameEvent::LevelComplete);
    }
}

/// On a boss level the exit only appears once the boss is down
pub fn spawn_boss_goal_if_cleared(state: &mut GameState) {
    if !is_boss_level(state.level_number) || state.goal_spawned {
        return;
    }
    if state.enemies.iter().any(|e| e.kind.is_boss() && e.health > 0) {
        return;
    }
    let id = state.next_entity_id();
    state.objects.push(LevelObject {
        id,
        kind: LevelObjectKind::Goal,
        rect: Rect::new(
            GAME_WIDTH / 2.0 - 30.0,
            GAME_HEIGHT - ARENA_FLOOR_HEIGHT - 80.0,
            60.0,
            60.0,
        ),
    });
    state.goal_spawned = true;
    log::info!("boss defeated on level {}, exit revealed", state.level_number);
}

/// Drop enemies at zero health from the roster
pub fn sweep_dead_enemies(state: &mut GameState) {
    state.enemies.retain(|e| {
        if e.health <= 0 {
            log::debug!("enemy {} ({:?}) destroyed", e.id, e.kind);
            false
        } else {
            true
        }
    });
}
