//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod fever;
pub mod gates;
pub mod loot;
pub mod path;
pub mod player;
pub mod rect;
pub mod snake;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weighted;

pub use collision::HitResult;
pub use effects::update_particles;
pub use fever::{FeverTransition, update_fever};
pub use gates::MYSTERY_TABLE;
pub use loot::LOOT_TABLE;
pub use path::{centerline_at_distance, position_at_distance};
pub use rect::Rect;
pub use spawn::{RowLayout, dynamic_attack_reward, dynamic_speed_reward, gate_hp, segment_hp};
pub use state::{
    Bullet, GameEvent, GamePhase, GameState, Gate, GateKind, GateRow, HudStats, Loot, LootKind,
    MAX_PARTICLES, MysteryOutcome, Particle, ParticleKind, Player, RewardOutcome, Segment,
    SegmentKind, Side, Snake, StatDelta, Tint, Tone, TradeConfig,
};
pub use tick::{TickInput, tick};
pub use weighted::WeightedTable;
