//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ai;
pub mod combat;
pub mod level;
pub mod physics;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use level::{Biome, Level, generate};
pub use rect::Rect;
pub use state::{
    AiState, BossPhase, Direction, Enemy, EnemyKind, GameEvent, GamePhase, GameState, LevelObject,
    LevelObjectKind, Player, Projectile, ProjectileKind, SimConfig, SpikeOrientation,
    SwingingBlade,
};
pub use tick::{TickInput, tick};
