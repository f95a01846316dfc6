//! Neon Defense - a turret-vs-serpent arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snake, gates, bullets, loot, fever, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, input capture and HUD widgets live outside this crate. They read
//! `sim::GameState` and feed `sim::TickInput` back in.

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Fixed geometry of the playfield. Balance numbers live in [`Tuning`].
pub mod consts {
    /// Nominal simulation rate (one tick per display refresh)
    pub const TICK_RATE: u32 = 60;
    /// Milliseconds represented by one tick
    pub const TICK_MS: f32 = 1000.0 / TICK_RATE as f32;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 450.0;
    pub const FIELD_HEIGHT: f32 = 850.0;

    /// Turret footprint; it sits a fixed distance above the bottom edge
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    pub const PLAYER_Y: f32 = FIELD_HEIGHT - 180.0;
    /// Head crossing `PLAYER_Y + LOSE_LINE_OFFSET` ends the run
    pub const LOSE_LINE_OFFSET: f32 = 40.0;

    /// Snake geometry
    pub const SEGMENT_SIZE: f32 = 52.0;
    pub const SEGMENT_SPACING: f32 = 46.0;
    pub const INITIAL_SEGMENTS: usize = 30;
    /// Tail keeps growing while it is less than this far behind the path start
    pub const TAIL_SPAWN_THRESHOLD: f32 = -300.0;
    /// Segments above this line are not hit-tested
    pub const SEGMENT_CULL_TOP: f32 = -100.0;

    /// Serpentine corridor
    pub const PATH_PADDING: f32 = 28.0;
    pub const PATH_TOP_MARGIN: f32 = 80.0;
    pub const ROW_HEIGHT: f32 = 80.0;

    /// Gate rows
    pub const GATE_HEIGHT: f32 = 90.0;
    pub const GATE_WIDTH: f32 = FIELD_WIDTH / 2.0 - 25.0;
    pub const GATE_LEFT_X: f32 = 20.0;
    pub const GATE_RIGHT_X: f32 = FIELD_WIDTH / 2.0 + 5.0;
    pub const GATE_SPAWN_Y: f32 = -200.0;
    pub const GATE_DESPAWN_MARGIN: f32 = 100.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 6.0;
    pub const BULLET_FEVER_WIDTH: f32 = 8.0;
    pub const BULLET_HEIGHT: f32 = 28.0;
    pub const BULLET_SPEED: f32 = 18.0;
    pub const BULLET_SPAWN_OFFSET: f32 = 10.0;
    pub const BULLET_SPACING: f32 = 16.0;
    pub const BULLET_DESPAWN_Y: f32 = -100.0;

    /// Loot pickups
    pub const LOOT_SIZE: f32 = 40.0;
    pub const LOOT_LAUNCH_VY: f32 = -5.0;
    pub const LOOT_DESPAWN_MARGIN: f32 = 50.0;

    /// AABB erosion shared by every hit test
    pub const COLLISION_INSET: f32 = 5.0;

    /// Cosmetic timers (ticks)
    pub const HIT_FLASH_TICKS: u8 = 3;
    pub const MUZZLE_FLASH_TICKS: u8 = 4;

    /// Score awarded per destroyed segment
    pub const SCORE_PER_SEGMENT: u64 = 10;
}

/// Round to one decimal place (attack speed is kept at this precision)
#[inline]
pub fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
