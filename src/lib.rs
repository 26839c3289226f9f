//! Ronin Rush - a side-scrolling ninja action-platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, enemy AI, combat, level generation)
//! - `settings`: User preferences injected into the simulation at construction
//!
//! Rendering, menus and account persistence live outside this crate; they
//! consume the per-tick [`sim::GameState`] snapshot and the terminal
//! [`sim::GameEvent`]s the simulation raises.

pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const TICK_MS: f32 = 1000.0 / 60.0;

    /// World dimensions (pixels)
    pub const GAME_WIDTH: f32 = 1024.0;
    pub const GAME_HEIGHT: f32 = 576.0;

    /// Gravity per tick and terminal fall speed (px/tick)
    pub const GRAVITY: f32 = 0.8;
    pub const MAX_FALL_SPEED: f32 = 15.0;

    /// Player body
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPAWN_X: f32 = 50.0;
    pub const PLAYER_MAX_HEALTH: i32 = 5;

    /// Player movement (px/tick)
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const JUMP_FORCE: f32 = 18.0;
    /// Double jump gets slightly less impulse than a grounded jump
    pub const DOUBLE_JUMP_FACTOR: f32 = 0.9;

    /// Melee attack
    pub const ATTACK_DURATION_MS: f32 = 200.0;
    pub const ATTACK_COOLDOWN_MS: f32 = 400.0;
    pub const ATTACK_WIDTH: f32 = 50.0;
    pub const ATTACK_HEIGHT: f32 = 60.0;
    pub const ATTACK_DAMAGE: i32 = 1;

    /// Damage invincibility window
    pub const INVINCIBILITY_MS: f32 = 1500.0;

    /// Dash
    pub const DASH_SPEED: f32 = 14.0;
    pub const DASH_DURATION_MS: f32 = 250.0;
    pub const DASH_COOLDOWN_MS: f32 = 1000.0;

    /// Shield
    pub const SHIELD_DURATION_MS: f32 = 3500.0;
    pub const SHIELD_COOLDOWN_MS: f32 = 5000.0;

    /// Shuriken throw / teleport utility
    pub const SHURIKEN_SPEED: f32 = 12.0;
    pub const SHURIKEN_LIFESPAN_MS: f32 = 2000.0;
    pub const SHURIKEN_DAMAGE: i32 = 1;
    pub const SHURIKEN_SIZE: f32 = 20.0;
    pub const TELEPORT_COOLDOWN_MS: f32 = 2000.0;
    pub const TELEPORT_EFFECT_MS: f32 = 200.0;

    /// Enemy projectiles
    pub const ENEMY_PROJECTILE_SPEED: f32 = 7.0;
    pub const ENEMY_PROJECTILE_SIZE: f32 = 15.0;

    /// Every Nth level is a boss arena
    pub const BOSS_LEVEL_INTERVAL: u32 = 20;
    /// Boss arena floor height (the single full-width platform)
    pub const ARENA_FLOOR_HEIGHT: f32 = 40.0;

    /// Boss attack tuning
    pub const BOSS_BARRAGE_WINDOW_MS: f32 = 1500.0;
    pub const BOSS_BARRAGE_SHOT_INTERVAL_MS: f32 = 300.0;
    pub const BOSS_SLAM_CHARGE_MS: f32 = 600.0;
    pub const BOSS_SLAM_FALL_SPEED: f32 = 18.0;
    pub const BOSS_SLAM_HOVER_Y: f32 = 60.0;
    pub const BOSS_MINION_DELAY_MS: f32 = 500.0;
    pub const BOSS_MINION_OFFSET: f32 = 140.0;
    pub const SHOCKWAVE_SPEED: f32 = 9.0;
    pub const SHOCKWAVE_WIDTH: f32 = 40.0;
    pub const SHOCKWAVE_HEIGHT: f32 = 20.0;

    /// Swinging blade hazard
    pub const BLADE_WIDTH: f32 = 80.0;
    pub const BLADE_HEIGHT: f32 = 15.0;
    pub const BLADE_CHAIN_LENGTH: f32 = 130.0;
    /// Maximum swing amplitude (radians)
    pub const BLADE_MAX_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Screen shake render hint (decays 1.5/tick)
    pub const SHAKE_DECAY: f32 = 1.5;
    pub const SHAKE_DASH: f32 = 5.0;
    pub const SHAKE_DAMAGE: f32 = 15.0;
    pub const SHAKE_ENEMY_KILL: f32 = 8.0;
    pub const SHAKE_BOSS_SLAM: f32 = 12.0;
}
