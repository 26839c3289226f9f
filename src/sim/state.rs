//! Game state and core simulation types
//!
//! Everything a tick mutates lives here: the player, the enemy/projectile
//! lists, the live level object set and the seeded RNG. The whole state is
//! serializable and doubles as the per-tick snapshot the presentation layer
//! reads.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{self, Biome, Level};
use super::rect::Rect;
use super::tick::TickInput;
use crate::consts::*;

/// Current phase of a level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation is advancing
    Playing,
    /// Tick body frozen, state untouched until resume
    Paused,
    /// Player died (health reached zero or fell out of the world)
    GameOver,
    /// Player reached the goal
    LevelComplete,
}

/// Terminal events raised for the embedding layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameOver,
    LevelComplete,
}

/// Facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1.0 for left, +1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Coarse AI state shared by the ground enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    Patrolling,
    Aggro,
}

/// Boss attack sub-state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum BossPhase {
    /// Waiting out the inter-attack cooldown
    #[default]
    Idle,
    /// Firing periodic bursts over a fixed window
    Barrage { window_ms: f32, shot_ms: f32 },
    /// Hovering above the player, winding up the slam
    SlamCharge { charge_ms: f32 },
    /// Free-falling until the arena floor
    SlamFall,
    /// Short delay before two flanking minions appear
    SummonMinions { delay_ms: f32 },
}

/// Enemy variant tag (closed set; biome recolors share base behavior)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Patrol,
    Shooter,
    Charger,
    Ninja,
    PatrolFire,
    ShooterIce,
    Boss,
}

impl EnemyKind {
    #[inline]
    pub fn is_boss(self) -> bool {
        self == EnemyKind::Boss
    }

    /// Base tuning for this variant. Boss health/cooldown are further scaled
    /// by tier via [`boss_stats`].
    pub fn base_stats(self) -> EnemyStats {
        match self {
            EnemyKind::Patrol => EnemyStats {
                width: 35.0,
                height: 35.0,
                patrol_speed: 2.0,
                health: 2,
                ..EnemyStats::default()
            },
            EnemyKind::Shooter => EnemyStats {
                width: 35.0,
                height: 35.0,
                range: 400.0,
                cooldown_ms: 2000.0,
                health: 1,
                ..EnemyStats::default()
            },
            EnemyKind::Charger => EnemyStats {
                width: 35.0,
                height: 35.0,
                speed: 8.0,
                range: 300.0,
                cooldown_ms: 1500.0,
                health: 3,
                ..EnemyStats::default()
            },
            EnemyKind::Ninja => EnemyStats {
                width: 38.0,
                height: 50.0,
                patrol_speed: 2.0,
                aggro_range: 450.0,
                melee_range: 120.0,
                cooldown_ms: 1800.0,
                melee_dash_speed: 9.0,
                melee_dash_ms: 300.0,
                health: 4,
                ..EnemyStats::default()
            },
            // Fire biome patrol: faster and tougher
            EnemyKind::PatrolFire => EnemyStats {
                width: 35.0,
                height: 35.0,
                patrol_speed: 2.5,
                health: 3,
                ..EnemyStats::default()
            },
            // Ice biome shooter: slower cadence, longer reach
            EnemyKind::ShooterIce => EnemyStats {
                width: 35.0,
                height: 35.0,
                range: 450.0,
                cooldown_ms: 2500.0,
                health: 2,
                ..EnemyStats::default()
            },
            EnemyKind::Boss => EnemyStats {
                width: 100.0,
                height: 120.0,
                aggro_range: 800.0,
                cooldown_ms: 2500.0,
                health: 20,
                ..EnemyStats::default()
            },
        }
    }
}

/// Per-variant numeric tuning, copied onto the enemy at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EnemyStats {
    pub width: f32,
    pub height: f32,
    pub patrol_speed: f32,
    /// Charger rush speed
    pub speed: f32,
    /// Detection/disengage range (shooter, charger)
    pub range: f32,
    pub aggro_range: f32,
    pub melee_range: f32,
    pub cooldown_ms: f32,
    pub melee_dash_speed: f32,
    pub melee_dash_ms: f32,
    pub health: i32,
}

/// Boss health and attack cooldown scale in discrete tiers per boss interval
pub fn boss_stats(level_number: u32) -> (i32, f32) {
    let tier = level_number.saturating_sub(1) / BOSS_LEVEL_INTERVAL;
    let health = 20 + tier as i32 * 15;
    let cooldown_ms = (2500.0 - tier as f32 * 300.0).max(1500.0);
    (health, cooldown_ms)
}

/// An enemy instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub rect: Rect,
    pub direction: Direction,
    pub vx: f32,
    pub ai_state: AiState,
    /// Left/right x extents of the platform beneath the spawn point
    pub patrol_bounds: Option<(f32, f32)>,
    pub attack_cooldown: f32,
    /// Ninja melee dash remaining (ms)
    pub melee_timer: f32,
    pub boss_phase: BossPhase,
    pub health: i32,
    pub max_health: i32,
    pub stats: EnemyStats,
}

impl Enemy {
    pub fn spawn(
        id: u32,
        kind: EnemyKind,
        x: f32,
        y: f32,
        stats: EnemyStats,
        patrol_bounds: Option<(f32, f32)>,
    ) -> Self {
        // Patrolling variants start walking left, everything else stands still
        let vx = match kind {
            EnemyKind::Patrol | EnemyKind::PatrolFire | EnemyKind::Ninja => -stats.patrol_speed,
            _ => 0.0,
        };
        Self {
            id,
            kind,
            rect: Rect::new(x, y, stats.width, stats.height),
            direction: Direction::Left,
            vx,
            ai_state: AiState::Patrolling,
            patrol_bounds,
            attack_cooldown: 0.0,
            melee_timer: 0.0,
            boss_phase: BossPhase::Idle,
            health: stats.health,
            max_health: stats.health,
            stats,
        }
    }
}

/// Projectile flavor: decides target and platform interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Fired by shooters/ninjas/boss barrage; hurts the player
    EnemyShot,
    /// Thrown by the player; hurts enemies and anchors the teleport
    Shuriken,
    /// Boss slam emission; travels along the arena floor, ignores platforms
    Shockwave,
}

/// A projectile in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub rect: Rect,
    pub vel: Vec2,
    /// Remaining lifespan in ms (shuriken); `None` means unlimited
    pub lifespan_ms: Option<f32>,
}

/// A swinging pendulum blade hazard
///
/// Purely kinematic: the angle is a deterministic function of sim elapsed
/// time and the level-seeded initial phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingingBlade {
    pub pivot: Vec2,
    pub chain_length: f32,
    pub period_s: f32,
    pub initial_angle: f32,
    pub angle: f32,
    /// Derived blade tip position
    pub tip: Vec2,
}

impl SwingingBlade {
    pub fn from_spec(spec: &level::BladeSpec) -> Self {
        let mut blade = Self {
            pivot: spec.pivot,
            chain_length: spec.chain_length,
            period_s: spec.period_s,
            initial_angle: spec.initial_angle,
            angle: spec.initial_angle,
            tip: spec.pivot,
        };
        blade.update(0.0);
        blade
    }

    /// Recompute angle and tip for the given sim elapsed time
    pub fn update(&mut self, elapsed_ms: f32) {
        let half_period_ms = self.period_s * 1000.0 / 2.0;
        self.angle = BLADE_MAX_ANGLE
            * (elapsed_ms / half_period_ms * std::f32::consts::PI + self.initial_angle).sin();
        self.tip = self.pivot
            + self.chain_length * Vec2::new(self.angle.sin(), self.angle.cos());
    }

    /// Hitbox centered on the blade tip
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.tip.x - BLADE_WIDTH / 2.0,
            self.tip.y - BLADE_HEIGHT / 2.0,
            BLADE_WIDTH,
            BLADE_HEIGHT,
        )
    }
}

/// Spike orientation (floor or ceiling)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpikeOrientation {
    Up,
    Down,
}

/// Static level object tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelObjectKind {
    Platform,
    Spike { orientation: SpikeOrientation },
    Goal,
    HealthPack,
}

/// A static level object (immutable after generation except health packs,
/// which are removed on pickup, and the goal a boss level injects on defeat)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelObject {
    pub id: u32,
    pub kind: LevelObjectKind,
    pub rect: Rect,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    pub on_ground: bool,
    pub direction: Direction,
    pub health: i32,
    pub attacking: bool,
    /// Remaining swing duration (ms); clears `attacking` on expiry
    pub attack_timer: f32,
    pub attack_cooldown: f32,
    /// Enemy ids already damaged by the current swing
    pub swing_hits: Vec<u32>,
    pub invincibility_timer: f32,
    pub dashing: bool,
    pub dash_timer: f32,
    pub dash_cooldown: f32,
    pub double_jump_used: bool,
    pub shielding: bool,
    pub shield_timer: f32,
    pub shield_cooldown: f32,
    pub teleport_cooldown: f32,
    /// Brief visual flash after a shuriken teleport
    pub teleport_effect_timer: f32,
    pub shuriken_in_flight: bool,
}

impl Player {
    pub fn new() -> Self {
        Self {
            rect: Rect::new(
                PLAYER_SPAWN_X,
                GAME_HEIGHT - PLAYER_HEIGHT - 50.0,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            vel: Vec2::ZERO,
            on_ground: false,
            direction: Direction::Right,
            health: PLAYER_MAX_HEALTH,
            attacking: false,
            attack_timer: 0.0,
            attack_cooldown: 0.0,
            swing_hits: Vec::new(),
            invincibility_timer: 0.0,
            dashing: false,
            dash_timer: 0.0,
            dash_cooldown: 0.0,
            double_jump_used: false,
            shielding: false,
            shield_timer: 0.0,
            shield_cooldown: 0.0,
            teleport_cooldown: 0.0,
            teleport_effect_timer: 0.0,
            shuriken_in_flight: false,
        }
    }

    #[inline]
    pub fn invincible(&self) -> bool {
        self.invincibility_timer > 0.0
    }

    /// Melee hitbox positioned in front of the facing direction
    pub fn attack_hitbox(&self) -> Rect {
        let x = match self.direction {
            Direction::Right => self.rect.right(),
            Direction::Left => self.rect.x - ATTACK_WIDTH,
        };
        Rect::new(x, self.rect.y, ATTACK_WIDTH, ATTACK_HEIGHT)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration injected into the simulation at construction time
/// (no ambient globals; the settings screen feeds this)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Accumulate the screen-shake render hint
    pub screen_shake: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { screen_shake: true }
    }
}

/// Complete simulation state for one level attempt (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub level_number: u32,
    pub biome: Biome,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Live enemies (sorted by id for determinism)
    pub enemies: Vec<Enemy>,
    /// Projectiles in flight (sorted by id for determinism)
    pub projectiles: Vec<Projectile>,
    pub blades: Vec<SwingingBlade>,
    /// Live level objects: platforms, spikes, remaining health packs, goal
    pub objects: Vec<LevelObject>,
    /// Seeded RNG (boss attack choice)
    pub rng: Pcg32,
    /// Screen shake render hint (0 when disabled by config)
    pub screen_shake: f32,
    /// Boss levels only: goal has been injected after the boss fell
    pub goal_spawned: bool,
    pub config: SimConfig,
    /// Pending terminal events, drained by the embedding layer
    pub events: Vec<GameEvent>,
    /// Previous tick's input, for just-pressed derivation
    pub prev_input: TickInput,
    next_id: u32,
}

impl GameState {
    /// Create a fresh attempt at the given level with default config
    pub fn new(level_number: u32) -> Self {
        Self::with_config(level_number, SimConfig::default())
    }

    /// Create a fresh attempt with injected configuration
    pub fn with_config(level_number: u32, config: SimConfig) -> Self {
        let lvl = level::generate(level_number);
        Self::from_level(&lvl, config)
    }

    /// Build the mutable attempt state from generator output. Restarting a
    /// level goes through here again; there is no partial teardown.
    pub fn from_level(lvl: &Level, config: SimConfig) -> Self {
        let mut state = Self {
            level_number: lvl.number,
            biome: lvl.biome,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player: Player::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            blades: lvl.blades.iter().map(SwingingBlade::from_spec).collect(),
            objects: lvl.objects.clone(),
            rng: Pcg32::seed_from_u64(u64::from(lvl.number)),
            screen_shake: 0.0,
            goal_spawned: false,
            config,
            events: Vec::new(),
            prev_input: TickInput::default(),
            next_id: 1000,
        };

        for spawn in &lvl.enemies {
            let mut stats = spawn.kind.base_stats();
            if spawn.kind.is_boss() {
                let (health, cooldown_ms) = boss_stats(lvl.number);
                stats.health = health;
                stats.cooldown_ms = cooldown_ms;
            }
            let bounds = patrol_bounds_for(
                &state.objects,
                spawn.x,
                spawn.y,
                stats.width,
                stats.height,
            );
            let id = state.next_entity_id();
            state
                .enemies
                .push(Enemy::spawn(id, spawn.kind, spawn.x, spawn.y, stats, bounds));
        }

        log::info!(
            "level {} loaded: {:?} biome, {} objects, {} enemies, {} blades",
            lvl.number,
            lvl.biome,
            state.objects.len(),
            state.enemies.len(),
            state.blades.len()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Sim elapsed time in milliseconds
    #[inline]
    pub fn elapsed_ms(&self) -> f32 {
        self.time_ticks as f32 * TICK_MS
    }

    /// Accumulate screen shake, respecting the injected config
    pub fn bump_shake(&mut self, amount: f32) {
        if self.config.screen_shake {
            self.screen_shake = self.screen_shake.max(amount);
        }
    }

    /// Shared damage helper: shield negates entirely; otherwise one point of
    /// damage per invincibility window. Raises the game-over event at zero.
    pub fn damage_player(&mut self) {
        if self.player.shielding {
            return;
        }
        if self.player.invincible() {
            return;
        }
        self.player.health -= 1;
        self.player.invincibility_timer = INVINCIBILITY_MS;
        self.bump_shake(SHAKE_DAMAGE);
        if self.player.health <= 0 {
            self.raise(GameEvent::GameOver);
        }
    }

    /// Record a terminal event and latch the matching phase
    pub fn raise(&mut self, event: GameEvent) {
        let phase = match event {
            GameEvent::GameOver => GamePhase::GameOver,
            GameEvent::LevelComplete => GamePhase::LevelComplete,
        };
        if self.phase != phase {
            log::info!("level {}: {:?}", self.level_number, event);
            self.phase = phase;
            self.events.push(event);
        }
    }

    /// Hand pending terminal events to the embedding layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure stable entity iteration order
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}

/// Derive patrol bounds from the platform directly beneath a spawn point
pub fn patrol_bounds_for(
    objects: &[LevelObject],
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> Option<(f32, f32)> {
    objects
        .iter()
        .filter(|o| o.kind == LevelObjectKind::Platform)
        .find(|p| {
            (y + height - p.rect.y).abs() < 5.0 && x < p.rect.right() && x + width > p.rect.x
        })
        .map(|p| (p.rect.x, p.rect.right() - width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boss_stats_tiers() {
        assert_eq!(boss_stats(20), (20, 2500.0));
        assert_eq!(boss_stats(40), (35, 2200.0));
        assert_eq!(boss_stats(60), (50, 1900.0));
        // Cooldown floors at 1500
        assert_eq!(boss_stats(200).1, 1500.0);
    }

    #[test]
    fn test_attack_hitbox_faces_direction() {
        let mut player = Player::new();
        player.direction = Direction::Right;
        let right_box = player.attack_hitbox();
        assert_eq!(right_box.x, player.rect.right());

        player.direction = Direction::Left;
        let left_box = player.attack_hitbox();
        assert_eq!(left_box.right(), player.rect.x);
        assert_eq!(left_box.w, ATTACK_WIDTH);
    }

    #[test]
    fn test_patrol_bounds_from_platform_beneath() {
        let objects = vec![LevelObject {
            id: 1,
            kind: LevelObjectKind::Platform,
            rect: Rect::new(100.0, 300.0, 200.0, 20.0),
        }];
        // Enemy standing exactly on top
        let bounds = patrol_bounds_for(&objects, 150.0, 265.0, 35.0, 35.0);
        assert_eq!(bounds, Some((100.0, 265.0)));
        // Enemy floating far above: no bounds
        assert_eq!(patrol_bounds_for(&objects, 150.0, 100.0, 35.0, 35.0), None);
    }

    #[test]
    fn test_blade_kinematics_deterministic() {
        let spec = level::BladeSpec {
            pivot: Vec2::new(500.0, 100.0),
            chain_length: 130.0,
            period_s: 2.0,
            initial_angle: 0.3,
        };
        let mut a = SwingingBlade::from_spec(&spec);
        let mut b = SwingingBlade::from_spec(&spec);
        a.update(1234.5);
        b.update(1234.5);
        assert_eq!(a.angle, b.angle);
        assert_eq!(a.tip, b.tip);
        // Tip hangs below the pivot at the chain's length
        assert!((a.tip.distance(a.pivot) - 130.0).abs() < 0.001);
    }

    #[test]
    fn test_damage_respects_shield_and_invincibility() {
        let mut state = GameState::new(1);
        state.player.health = 5;

        state.player.shielding = true;
        state.damage_player();
        assert_eq!(state.player.health, 5);

        state.player.shielding = false;
        state.damage_player();
        assert_eq!(state.player.health, 4);
        assert_eq!(state.player.invincibility_timer, INVINCIBILITY_MS);

        // Still invincible: no further decrement
        state.damage_player();
        assert_eq!(state.player.health, 4);
    }

    #[test]
    fn test_game_over_at_zero_health() {
        let mut state = GameState::new(1);
        state.player.health = 1;
        state.damage_player();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.drain_events(), vec![GameEvent::GameOver]);
        // Event queue drains once
        assert!(state.drain_events().is_empty());
    }
}
