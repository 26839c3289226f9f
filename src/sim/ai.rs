//! Per-variant enemy behavior
//!
//! Each update is a pure transformation from the current enemy (plus a view
//! of the player) to the next enemy. Spawning goes through the [`Spawned`]
//! collector instead of direct mutation so the orchestrator stays in charge
//! of entity ids and list order.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::level::EnemySpawn;
use super::rect::Rect;
use super::state::{AiState, BossPhase, Direction, Enemy, EnemyKind, Player, ProjectileKind};
use crate::consts::*;

/// Projectile spawn request (id assigned by the orchestrator)
#[derive(Debug, Clone)]
pub struct ProjectileSpawn {
    pub kind: ProjectileKind,
    pub rect: Rect,
    pub vel: Vec2,
}

/// Side effects an AI update wants applied after the pass
#[derive(Debug, Default)]
pub struct Spawned {
    pub projectiles: Vec<ProjectileSpawn>,
    pub minions: Vec<EnemySpawn>,
    /// Screen-shake request (boss slam landing)
    pub shake: f32,
}

impl Spawned {
    fn fire(&mut self, kind: ProjectileKind, rect: Rect, vel: Vec2) {
        self.projectiles.push(ProjectileSpawn { kind, rect, vel });
    }
}

/// Dispatch an enemy update by variant tag. Biome recolors share their base
/// variant's behavior (their stats differ at spawn).
pub fn update_enemy(
    enemy: &Enemy,
    player: &Player,
    dt: f32,
    rng: &mut Pcg32,
    out: &mut Spawned,
) -> Enemy {
    match enemy.kind {
        EnemyKind::Patrol | EnemyKind::PatrolFire => update_patrol(enemy),
        EnemyKind::Shooter | EnemyKind::ShooterIce => update_shooter(enemy, player, dt, out),
        EnemyKind::Charger => update_charger(enemy, player, dt),
        EnemyKind::Ninja => update_ninja(enemy, player, dt, out),
        EnemyKind::Boss => update_boss(enemy, player, dt, rng, out),
    }
}

/// Distance between top-left corners, matching the detection ranges the
/// stats were tuned against
fn distance_to_player(enemy: &Enemy, player: &Player) -> f32 {
    Vec2::new(player.rect.x - enemy.rect.x, player.rect.y - enemy.rect.y).length()
}

fn direction_to_player(enemy: &Enemy, player: &Player) -> Direction {
    if player.rect.center().x < enemy.rect.center().x {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Walk between the platform bounds, reversing at each edge
fn update_patrol(enemy: &Enemy) -> Enemy {
    let mut e = enemy.clone();
    if let Some((left, right)) = e.patrol_bounds {
        if e.rect.x <= left && e.vx < 0.0 {
            e.vx = e.stats.patrol_speed;
            e.direction = Direction::Right;
        } else if e.rect.x >= right && e.vx > 0.0 {
            e.vx = -e.stats.patrol_speed;
            e.direction = Direction::Left;
        }
    }
    e.rect.x += e.vx;
    e
}

/// Stationary turret: fire a horizontal shot when the player is in range
fn update_shooter(enemy: &Enemy, player: &Player, dt: f32, out: &mut Spawned) -> Enemy {
    let mut e = enemy.clone();
    if e.attack_cooldown > 0.0 {
        e.attack_cooldown -= dt;
    }

    let distance = distance_to_player(&e, player);
    e.direction = direction_to_player(&e, player);

    if distance < e.stats.range && e.attack_cooldown <= 0.0 {
        e.attack_cooldown = e.stats.cooldown_ms;
        let x = match e.direction {
            Direction::Right => e.rect.right(),
            Direction::Left => e.rect.x - ENEMY_PROJECTILE_SIZE,
        };
        out.fire(
            ProjectileKind::EnemyShot,
            Rect::new(
                x,
                e.rect.y + e.rect.h / 2.0 - ENEMY_PROJECTILE_SIZE / 2.0,
                ENEMY_PROJECTILE_SIZE,
                ENEMY_PROJECTILE_SIZE,
            ),
            Vec2::new(e.direction.sign() * ENEMY_PROJECTILE_SPEED, 0.0),
        );
    }
    e
}

/// Idle until a roughly level-aligned player comes into range, then rush
/// their last-known position until contact, overshoot or a world edge
fn update_charger(enemy: &Enemy, player: &Player, dt: f32) -> Enemy {
    let mut e = enemy.clone();
    if e.attack_cooldown > 0.0 {
        e.attack_cooldown -= dt;
    }

    let distance = distance_to_player(&e, player);
    e.direction = direction_to_player(&e, player);

    let aligned = (player.rect.y - e.rect.y).abs() < 50.0;
    if e.ai_state != AiState::Aggro
        && aligned
        && distance < e.stats.range
        && e.attack_cooldown <= 0.0
    {
        e.ai_state = AiState::Aggro;
        e.vx = e.direction.sign() * e.stats.speed;
    }

    if e.ai_state == AiState::Aggro {
        e.rect.x += e.vx;
        // Only the left world edge exists; levels run past the screen width
        let disengage = e.rect.overlaps(&player.rect)
            || distance > e.stats.range + 50.0
            || e.rect.x < 0.0;
        if disengage {
            e.ai_state = AiState::Patrolling;
            e.vx = 0.0;
            e.attack_cooldown = e.stats.cooldown_ms;
        }
    }
    e
}

/// Three-tier behavior: melee dash in close, throw at mid range, patrol
/// otherwise. A started dash runs to completion before any new decision.
fn update_ninja(enemy: &Enemy, player: &Player, dt: f32, out: &mut Spawned) -> Enemy {
    let mut e = enemy.clone();
    if e.attack_cooldown > 0.0 {
        e.attack_cooldown -= dt;
    }
    if e.melee_timer > 0.0 {
        e.melee_timer -= dt;
        if e.melee_timer <= 0.0 {
            e.vx = 0.0;
        }
    }

    if e.melee_timer > 0.0 {
        e.rect.x += e.vx;
        return e;
    }

    let distance = distance_to_player(&e, player);
    e.direction = direction_to_player(&e, player);

    let in_aggro = distance < e.stats.aggro_range;
    let in_melee = distance < e.stats.melee_range;
    let can_see = (player.rect.y - e.rect.y).abs() < 150.0;

    if in_aggro && can_see {
        e.ai_state = AiState::Aggro;
    } else if e.ai_state == AiState::Aggro {
        e.ai_state = AiState::Patrolling;
    }

    if e.ai_state == AiState::Aggro {
        e.vx = 0.0;
        if e.attack_cooldown <= 0.0 {
            if in_melee {
                e.vx = e.direction.sign() * e.stats.melee_dash_speed;
                e.melee_timer = e.stats.melee_dash_ms;
                e.attack_cooldown = e.stats.cooldown_ms;
            } else {
                out.fire(
                    ProjectileKind::EnemyShot,
                    Rect::new(
                        match e.direction {
                            Direction::Right => e.rect.right(),
                            Direction::Left => e.rect.x - ENEMY_PROJECTILE_SIZE,
                        },
                        e.rect.y + e.rect.h / 3.0,
                        ENEMY_PROJECTILE_SIZE,
                        ENEMY_PROJECTILE_SIZE,
                    ),
                    Vec2::new(e.direction.sign() * ENEMY_PROJECTILE_SPEED, 0.0),
                );
                e.attack_cooldown = e.stats.cooldown_ms;
            }
        }
    } else {
        if e.vx == 0.0 {
            e.vx = e.direction.sign() * e.stats.patrol_speed;
        }
        if let Some((left, right)) = e.patrol_bounds {
            if e.rect.x <= left && e.vx < 0.0 {
                e.vx = e.stats.patrol_speed;
                e.direction = Direction::Right;
            } else if e.rect.x >= right && e.vx > 0.0 {
                e.vx = -e.stats.patrol_speed;
                e.direction = Direction::Left;
            }
        }
        e.rect.x += e.vx;
    }
    e
}

/// Boss state machine: idle between attacks, then one of barrage,
/// teleport-slam or minion summon, chosen by the seeded RNG
fn update_boss(
    enemy: &Enemy,
    player: &Player,
    dt: f32,
    rng: &mut Pcg32,
    out: &mut Spawned,
) -> Enemy {
    let mut e = enemy.clone();
    e.direction = direction_to_player(&e, player);
    if e.attack_cooldown > 0.0 {
        e.attack_cooldown -= dt;
    }

    let floor_y = GAME_HEIGHT - ARENA_FLOOR_HEIGHT;

    match e.boss_phase {
        BossPhase::Idle => {
            if e.attack_cooldown <= 0.0 {
                e.boss_phase = match rng.random_range(0..3u32) {
                    0 => {
                        log::debug!("boss {} opens barrage", e.id);
                        BossPhase::Barrage {
                            window_ms: BOSS_BARRAGE_WINDOW_MS,
                            shot_ms: 0.0,
                        }
                    }
                    1 => {
                        // Blink above the player's current position
                        e.rect.x = (player.rect.center().x - e.rect.w / 2.0)
                            .clamp(0.0, GAME_WIDTH - e.rect.w);
                        e.rect.y = BOSS_SLAM_HOVER_Y;
                        log::debug!("boss {} winds up a slam", e.id);
                        BossPhase::SlamCharge {
                            charge_ms: BOSS_SLAM_CHARGE_MS,
                        }
                    }
                    _ => {
                        log::debug!("boss {} calls minions", e.id);
                        BossPhase::SummonMinions {
                            delay_ms: BOSS_MINION_DELAY_MS,
                        }
                    }
                };
            }
        }
        BossPhase::Barrage { window_ms, shot_ms } => {
            let window_ms = window_ms - dt;
            let mut shot_ms = shot_ms - dt;
            if shot_ms <= 0.0 {
                shot_ms = BOSS_BARRAGE_SHOT_INTERVAL_MS;
                let x = match e.direction {
                    Direction::Right => e.rect.right(),
                    Direction::Left => e.rect.x - ENEMY_PROJECTILE_SIZE,
                };
                out.fire(
                    ProjectileKind::EnemyShot,
                    Rect::new(
                        x,
                        e.rect.y + e.rect.h / 3.0,
                        ENEMY_PROJECTILE_SIZE,
                        ENEMY_PROJECTILE_SIZE,
                    ),
                    Vec2::new(e.direction.sign() * ENEMY_PROJECTILE_SPEED, 0.0),
                );
            }
            e.boss_phase = if window_ms <= 0.0 {
                e.attack_cooldown = e.stats.cooldown_ms;
                BossPhase::Idle
            } else {
                BossPhase::Barrage { window_ms, shot_ms }
            };
        }
        BossPhase::SlamCharge { charge_ms } => {
            let charge_ms = charge_ms - dt;
            e.boss_phase = if charge_ms <= 0.0 {
                BossPhase::SlamFall
            } else {
                BossPhase::SlamCharge { charge_ms }
            };
        }
        BossPhase::SlamFall => {
            e.rect.y += BOSS_SLAM_FALL_SPEED;
            if e.rect.bottom() >= floor_y {
                e.rect.y = floor_y - e.rect.h;
                // Twin shockwaves rolling outward along the floor
                out.fire(
                    ProjectileKind::Shockwave,
                    Rect::new(
                        e.rect.x - SHOCKWAVE_WIDTH,
                        floor_y - SHOCKWAVE_HEIGHT,
                        SHOCKWAVE_WIDTH,
                        SHOCKWAVE_HEIGHT,
                    ),
                    Vec2::new(-SHOCKWAVE_SPEED, 0.0),
                );
                out.fire(
                    ProjectileKind::Shockwave,
                    Rect::new(
                        e.rect.right(),
                        floor_y - SHOCKWAVE_HEIGHT,
                        SHOCKWAVE_WIDTH,
                        SHOCKWAVE_HEIGHT,
                    ),
                    Vec2::new(SHOCKWAVE_SPEED, 0.0),
                );
                out.shake = out.shake.max(SHAKE_BOSS_SLAM);
                e.attack_cooldown = e.stats.cooldown_ms;
                e.boss_phase = BossPhase::Idle;
            }
        }
        BossPhase::SummonMinions { delay_ms } => {
            let delay_ms = delay_ms - dt;
            if delay_ms <= 0.0 {
                let minion = EnemyKind::Patrol.base_stats();
                for x in [
                    e.rect.x - BOSS_MINION_OFFSET,
                    e.rect.right() + BOSS_MINION_OFFSET - minion.width,
                ] {
                    out.minions.push(EnemySpawn {
                        kind: EnemyKind::Patrol,
                        x: x.clamp(0.0, GAME_WIDTH - minion.width),
                        y: floor_y - minion.height,
                    });
                }
                e.attack_cooldown = e.stats.cooldown_ms;
                e.boss_phase = BossPhase::Idle;
            } else {
                e.boss_phase = BossPhase::SummonMinions { delay_ms };
            }
        }
    }
    e
}
