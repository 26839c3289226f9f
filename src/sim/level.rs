//! Procedural level generation
//!
//! `generate(n)` is deterministic: the PRNG is seeded from the level number
//! alone, so the same level number always yields a structurally identical
//! level. Level numbers are shareable.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{EnemyKind, LevelObject, LevelObjectKind, SpikeOrientation};
use crate::consts::*;

/// Cosmetic/stat-modifying theme bucket; gates the enemy variant pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Biome {
    Default,
    Fire,
    Ice,
    Forest,
    Sky,
}

const BIOMES: [Biome; 5] = [Biome::Default, Biome::Fire, Biome::Ice, Biome::Forest, Biome::Sky];

/// Biome rotates once per boss interval
pub fn biome_for_level(level_number: u32) -> Biome {
    let index = (level_number.saturating_sub(1) / BOSS_LEVEL_INTERVAL) as usize;
    BIOMES[index % BIOMES.len()]
}

/// Every `BOSS_LEVEL_INTERVAL`th level is a single-arena boss fight
pub fn is_boss_level(level_number: u32) -> bool {
    level_number > 0 && level_number % BOSS_LEVEL_INTERVAL == 0
}

/// Enemy spawn descriptor produced by the generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
}

/// Swinging blade descriptor produced by the generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BladeSpec {
    pub pivot: Vec2,
    pub chain_length: f32,
    pub period_s: f32,
    pub initial_angle: f32,
}

/// Generator output: read-only input to a level attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub number: u32,
    pub biome: Biome,
    pub objects: Vec<LevelObject>,
    pub enemies: Vec<EnemySpawn>,
    pub blades: Vec<BladeSpec>,
}

/// Difficulty scalar in [0, 1], a saturating linear ramp over level number
fn difficulty_for(level_number: u32) -> f32 {
    (0.05 + (level_number.saturating_sub(1)) as f32 * 0.01).min(1.0)
}

/// Enemy variants eligible for this level's biome. The base pool grows with
/// difficulty so early levels introduce variants gradually.
fn enemy_pool(biome: Biome, difficulty: f32) -> Vec<EnemyKind> {
    match biome {
        Biome::Fire => vec![EnemyKind::PatrolFire, EnemyKind::Charger],
        Biome::Ice => vec![EnemyKind::ShooterIce, EnemyKind::Patrol],
        _ => {
            let base = [
                EnemyKind::Patrol,
                EnemyKind::Charger,
                EnemyKind::Shooter,
                EnemyKind::Ninja,
            ];
            let count = (1 + (difficulty * 4.0) as usize).min(base.len());
            base[..count].to_vec()
        }
    }
}

/// Build the level for the given (1-based) level number. Deterministic.
pub fn generate(level_number: u32) -> Level {
    let level_number = level_number.max(1);
    let mut rng = Pcg32::seed_from_u64(u64::from(level_number));
    let biome = biome_for_level(level_number);

    if is_boss_level(level_number) {
        return generate_boss_arena(level_number, biome);
    }

    let difficulty = difficulty_for(level_number);
    let mut objects = Vec::new();
    let mut enemies = Vec::new();
    let mut blades = Vec::new();
    let mut next_id = 0u32;
    let mut id = || {
        next_id += 1;
        next_id
    };

    // Starting platform
    objects.push(LevelObject {
        id: id(),
        kind: LevelObjectKind::Platform,
        rect: Rect::new(0.0, GAME_HEIGHT - 40.0, 150.0, 40.0),
    });
    let mut current_x = 150.0_f32;
    let mut current_y = GAME_HEIGHT - 40.0;

    let segments = 15 + (rng.random::<f32>() * 5.0) as u32 + (difficulty * 30.0) as u32;
    let pool = enemy_pool(biome, difficulty);

    for _ in 0..segments {
        let platform_width =
            (100.0 + rng.random::<f32>() * 120.0 * (1.0 - difficulty)).max(80.0);
        let gap = 60.0 + rng.random::<f32>() * (80.0 + 80.0 * difficulty);
        let next_x = current_x + gap;
        let y_change = (rng.random::<f32>() - 0.48) * 220.0 * (0.5 + difficulty * 0.7);
        // Keep platforms inside the vertical screen bounds
        let next_y = (current_y + y_change).clamp(100.0, GAME_HEIGHT - 40.0);

        let platform = Rect::new(next_x, next_y, platform_width, 20.0);
        objects.push(LevelObject {
            id: id(),
            kind: LevelObjectKind::Platform,
            rect: platform,
        });

        let mut has_hazard = false;

        let enemy_chance = 0.15 + difficulty * 0.5;
        if rng.random::<f32>() < enemy_chance {
            let pick = (rng.random::<f32>() * pool.len() as f32) as usize;
            if let Some(&kind) = pool.get(pick.min(pool.len().saturating_sub(1))) {
                let stats = kind.base_stats();
                enemies.push(EnemySpawn {
                    kind,
                    x: next_x + platform_width / 2.0 - stats.width / 2.0,
                    y: next_y - stats.height,
                });
                has_hazard = true;
            } else {
                log::warn!("level {level_number}: empty enemy pool, slot skipped");
            }
        }

        let hazard_chance = 0.1 + difficulty * 0.45;
        if rng.random::<f32>() < hazard_chance {
            has_hazard = true;
            if rng.random::<f32>() > 0.4 {
                // Spike never wider than its host platform
                let spike_width =
                    platform_width.min((2.0 + rng.random::<f32>() * 4.0).floor() * 20.0);
                let spike_x = next_x + rng.random::<f32>() * (platform_width - spike_width);
                if rng.random::<f32>() > 0.3 || platform.y < 150.0 {
                    objects.push(LevelObject {
                        id: id(),
                        kind: LevelObjectKind::Spike {
                            orientation: SpikeOrientation::Up,
                        },
                        rect: Rect::new(spike_x, platform.y - 20.0, spike_width, 20.0),
                    });
                } else {
                    let ceiling_y = (platform.y - (100.0 + rng.random::<f32>() * 100.0)).max(20.0);
                    objects.push(LevelObject {
                        id: id(),
                        kind: LevelObjectKind::Spike {
                            orientation: SpikeOrientation::Down,
                        },
                        rect: Rect::new(spike_x, ceiling_y, spike_width, 20.0),
                    });
                }
            } else {
                let pivot_y = (platform.y - (100.0 + rng.random::<f32>() * 100.0)).max(20.0);
                blades.push(BladeSpec {
                    pivot: Vec2::new(next_x + platform_width / 2.0, pivot_y),
                    chain_length: BLADE_CHAIN_LENGTH,
                    period_s: (4.0 - difficulty * 2.0).max(1.8),
                    initial_angle: (rng.random::<f32>() - 0.5) * std::f32::consts::PI,
                });
            }
        }

        // Health packs only on quiet platforms
        if !has_hazard && rng.random::<f32>() < 0.15 {
            objects.push(LevelObject {
                id: id(),
                kind: LevelObjectKind::HealthPack,
                rect: Rect::new(next_x + platform_width / 2.0 - 12.0, next_y - 30.0, 24.0, 24.0),
            });
        }

        current_x = next_x + platform_width;
        current_y = next_y;
    }

    objects.push(LevelObject {
        id: id(),
        kind: LevelObjectKind::Goal,
        rect: Rect::new(current_x + 100.0, current_y - 80.0, 60.0, 60.0),
    });

    // Safety-net floor under the whole span; skipped every 10th level to
    // vary traversal style, and absent in the first few levels
    if level_number > 5 && level_number % 10 != 0 {
        objects.push(LevelObject {
            id: id(),
            kind: LevelObjectKind::Platform,
            rect: Rect::new(0.0, GAME_HEIGHT - 20.0, current_x + 200.0, 20.0),
        });
    }

    log::debug!(
        "generated level {level_number}: {} segments, {} objects, {} enemies, {} blades",
        segments,
        objects.len(),
        enemies.len(),
        blades.len()
    );

    Level {
        number: level_number,
        biome,
        objects,
        enemies,
        blades,
    }
}

/// Flat arena, one boss, no goal: the goal materializes once the boss falls
fn generate_boss_arena(level_number: u32, biome: Biome) -> Level {
    let floor = LevelObject {
        id: 1,
        kind: LevelObjectKind::Platform,
        rect: Rect::new(
            0.0,
            GAME_HEIGHT - ARENA_FLOOR_HEIGHT,
            GAME_WIDTH,
            ARENA_FLOOR_HEIGHT,
        ),
    };
    let stats = EnemyKind::Boss.base_stats();
    let boss = EnemySpawn {
        kind: EnemyKind::Boss,
        x: GAME_WIDTH - stats.width - 50.0,
        y: GAME_HEIGHT - ARENA_FLOOR_HEIGHT - stats.height,
    };
    log::debug!("generated boss arena for level {level_number}");
    Level {
        number: level_number,
        biome,
        objects: vec![floor],
        enemies: vec![boss],
        blades: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        for n in [1, 2, 7, 19, 20, 33, 100] {
            assert_eq!(generate(n), generate(n), "level {n} not reproducible");
        }
    }

    #[test]
    fn test_boss_level_shape() {
        let lvl = generate(20);
        assert_eq!(lvl.enemies.len(), 1);
        assert!(lvl.enemies[0].kind.is_boss());
        // One flat platform spanning the full width, nothing else
        assert_eq!(lvl.objects.len(), 1);
        assert_eq!(lvl.objects[0].kind, LevelObjectKind::Platform);
        assert_eq!(lvl.objects[0].rect.w, GAME_WIDTH);
        // No goal until the boss is defeated
        assert!(!lvl.objects.iter().any(|o| o.kind == LevelObjectKind::Goal));
        assert!(lvl.blades.is_empty());
    }

    #[test]
    fn test_regular_level_has_goal() {
        for n in [1, 5, 13, 37] {
            let lvl = generate(n);
            let goals: Vec<_> = lvl
                .objects
                .iter()
                .filter(|o| o.kind == LevelObjectKind::Goal)
                .collect();
            assert_eq!(goals.len(), 1, "level {n}");
        }
    }

    #[test]
    fn test_platforms_within_vertical_bounds() {
        for n in [1, 3, 17, 55, 123] {
            let lvl = generate(n);
            for obj in &lvl.objects {
                if obj.kind == LevelObjectKind::Platform {
                    assert!(obj.rect.y >= 100.0, "level {n}: platform above bounds");
                    assert!(
                        obj.rect.y <= GAME_HEIGHT - 20.0,
                        "level {n}: platform below bounds"
                    );
                }
            }
        }
    }

    #[test]
    fn test_ground_spikes_sit_on_their_platform() {
        for n in [9, 25, 60] {
            let lvl = generate(n);
            for spike in lvl.objects.iter().filter(|o| {
                o.kind
                    == LevelObjectKind::Spike {
                        orientation: SpikeOrientation::Up,
                    }
            }) {
                let host = lvl.objects.iter().any(|p| {
                    p.kind == LevelObjectKind::Platform
                        && (spike.rect.bottom() - p.rect.y).abs() < 0.001
                        && spike.rect.x >= p.rect.x - 0.001
                        && spike.rect.right() <= p.rect.right() + 0.001
                });
                assert!(host, "level {n}: floating ground spike");
            }
        }
    }

    #[test]
    fn test_difficulty_scales_segment_count() {
        let count = |n: u32| {
            generate(n)
                .objects
                .iter()
                .filter(|o| o.kind == LevelObjectKind::Platform)
                .count()
        };
        assert!(count(100) > count(1));
    }

    #[test]
    fn test_biome_rotation() {
        assert_eq!(biome_for_level(1), Biome::Default);
        assert_eq!(biome_for_level(20), Biome::Default);
        assert_eq!(biome_for_level(21), Biome::Fire);
        assert_eq!(biome_for_level(41), Biome::Ice);
        assert_eq!(biome_for_level(61), Biome::Forest);
        assert_eq!(biome_for_level(81), Biome::Sky);
        // Wraps around after the fifth biome
        assert_eq!(biome_for_level(101), Biome::Default);
    }

    #[test]
    fn test_safety_floor_skipped_every_tenth() {
        let has_floor = |n: u32| {
            generate(n).objects.iter().any(|o| {
                o.kind == LevelObjectKind::Platform && o.rect.y == GAME_HEIGHT - 20.0
            })
        };
        assert!(has_floor(7));
        assert!(!has_floor(30), "every 10th level skips the safety floor");
        assert!(!has_floor(3), "early levels have no safety floor");
    }
}
