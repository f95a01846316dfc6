//! Game state and core simulation types
//!
//! `GameState` is the single owner of every entity collection. Subsystems
//! borrow it mutably for one tick and keep nothing between ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::path::position_at_distance;
use super::rect::Rect;
use crate::Tuning;
use crate::consts::*;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, waiting for the begin signal
    Start,
    /// Tick loop running
    Playing,
    /// Snake reached the turret; waiting for restart
    GameOver,
    /// Reserved. No win condition is defined, so nothing enters this phase.
    Victory,
}

// ---------------------------------------------------------------------------
// Stats & rewards
// ---------------------------------------------------------------------------

/// A signed-by-context change to one player stat
///
/// Used as a reward (added) or as a cost (debited) depending on the call site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StatDelta {
    Attack(u32),
    AttackSpeed(f32),
    Projectiles(u32),
}

/// Exchange offered by a trade gate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeConfig {
    pub cost: StatDelta,
    pub reward: StatDelta,
}

/// Outcomes a mystery gate can roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MysteryOutcome {
    ProjectileUp,
    AttackMultiply,
    FeverFill,
    AttackBoost,
    SpeedBoost,
    AttackCurse,
    SpeedCurse,
}

/// What destroying a gate actually did to the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RewardOutcome {
    Stat(StatDelta),
    Mystery(MysteryOutcome),
    Trade { success: bool },
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The turret
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Damage per shot
    pub attack: u32,
    /// Shots per second
    pub attack_speed: f32,
    pub projectile_count: u32,
    /// Fever charge, `0..=fever_max`
    pub fever: f32,
    pub fever_active: bool,
    /// Ticks left while fever is active
    pub fever_timer: u32,
    /// Tick of the last volley (None until the first shot)
    pub last_shot_tick: Option<u64>,
    #[serde(default)]
    pub muzzle_flash: u8,
}

// ---------------------------------------------------------------------------
// Snake
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Always index 0. Knocked back on hit, never destroyed.
    Head,
    Body,
    /// Drops loot when destroyed
    Chest,
}

/// One link of the chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Creation ordinal (head is 0)
    pub id: u32,
    pub kind: SegmentKind,
    pub hp: u32,
    pub max_hp: u32,
    /// Reward metadata; mirrors spawn hp
    pub value: u32,
    /// Derived from the path every tick
    pub rect: Rect,
    pub hit_flash: u8,
}

impl Segment {
    pub fn head() -> Self {
        Self {
            id: 0,
            kind: SegmentKind::Head,
            hp: u32::MAX,
            max_hp: u32::MAX,
            value: 0,
            rect: Rect::new(0.0, 0.0, SEGMENT_SIZE, SEGMENT_SIZE),
            hit_flash: 0,
        }
    }
}

/// The ordered segment chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    /// Index 0 is the head; order is spawn order and path order
    pub segments: Vec<Segment>,
    /// Path distance of the head
    pub distance_traveled: f32,
    /// Path units advanced per tick
    pub speed: f32,
    /// Segments ever created this run; difficulty and id source
    pub total_created: u32,
}

impl Snake {
    pub fn new(speed: f32) -> Self {
        Self {
            segments: vec![Segment::head()],
            distance_traveled: 0.0,
            speed,
            total_created: 0,
        }
    }

    /// Path distance of segment `index`
    #[inline]
    pub fn distance_of(&self, index: usize) -> f32 {
        self.distance_traveled - index as f32 * SEGMENT_SPACING
    }

    /// Recompute every segment's rectangle from the travel scalar
    pub fn derive_positions(&mut self) {
        let head_dist = self.distance_traveled;
        for (i, seg) in self.segments.iter_mut().enumerate() {
            seg.rect.pos = position_at_distance(head_dist - i as f32 * SEGMENT_SPACING);
        }
    }

    pub fn head(&self) -> Option<&Segment> {
        self.segments.first()
    }
}

// ---------------------------------------------------------------------------
// Gates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    Attack(u32),
    Speed(f32),
    /// Reward rolled when destroyed
    Mystery,
    Trade(TradeConfig),
}

/// One side of a gate row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    pub kind: GateKind,
    pub hp: u32,
    pub max_hp: u32,
    pub rect: Rect,
    pub hit_flash: u8,
}

/// Which slot of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// A left/right pair offering an exclusive choice
///
/// The row owns both gates, so destroying it removes both at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateRow {
    pub id: u32,
    /// `[left, right]`
    pub gates: [Gate; 2],
}

impl GateRow {
    pub fn y(&self) -> f32 {
        self.gates[0].rect.pos.y
    }

    pub fn scroll(&mut self, dy: f32) {
        for gate in &mut self.gates {
            gate.rect.pos.y += dy;
            gate.hit_flash = gate.hit_flash.saturating_sub(1);
        }
    }
}

// ---------------------------------------------------------------------------
// Bullets, loot, particles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    /// Pixels per tick (negative is up)
    pub vy: f32,
    pub damage: u32,
    /// Fired during fever (drawn differently)
    pub fever: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootKind {
    ProjectileUp,
    AttackUpLarge,
    SpeedUpLarge,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loot {
    pub kind: LootKind,
    pub rect: Rect,
    pub vy: f32,
}

/// Colour family for cosmetic effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Head,
    Body,
    Chest,
    AttackGate,
    SpeedGate,
    MysteryGate,
    TradeGate,
    Fever,
}

/// Sentiment of floating reward text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Jackpot,
    Reward,
    Penalty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParticleKind {
    Spark { tint: Tint },
    Shockwave { tint: Tint, radius: f32 },
    FloatingText { text: String, tone: Tone },
}

/// A particle for visual effects (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub kind: ParticleKind,
}

/// Maximum live particles
pub const MAX_PARTICLES: usize = 512;

// ---------------------------------------------------------------------------
// Published state
// ---------------------------------------------------------------------------

/// Stats the HUD displays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudStats {
    pub attack: u32,
    /// One decimal place
    pub attack_speed: f32,
    pub projectile_count: u32,
    pub fever_charge: u32,
    pub fever_active: bool,
    pub score: u64,
    pub level: u32,
    pub wave: u32,
}

/// Things that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Began,
    GameOver { score: u64 },
    Restarted,
    LevelUp { level: u32 },
    GateRowSpawned { row_id: u32 },
    GateRowDestroyed { row_id: u32, outcome: RewardOutcome },
    SegmentDestroyed { id: u32, kind: SegmentKind },
    HeadKnockedBack,
    LootDropped { kind: LootKind },
    LootCollected { kind: LootKind },
    FeverStarted,
    FeverEnded,
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// Complete simulation context
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Difficulty level, starts at 1
    pub level: u32,
    pub score: u64,
    pub player: Player,
    pub snake: Snake,
    /// Live gate rows, oldest (lowest on screen) first
    pub gate_rows: Vec<GateRow>,
    /// Scroll distance since the last gate row spawned
    pub scroll_since_gate: f32,
    pub bullets: Vec<Bullet>,
    pub loot: Vec<Loot>,
    pub particles: Vec<Particle>,
    pub hud: HudStats,
    /// Cleared at the start of every tick
    pub events: Vec<GameEvent>,
    pub tuning: Tuning,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// New run with default tuning, sitting in `Start`
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Start,
            time_ticks: 0,
            level: 1,
            score: 0,
            player: Player::new(&tuning),
            snake: Snake::new(tuning.initial_snake_speed),
            gate_rows: Vec::new(),
            scroll_since_gate: 0.0,
            bullets: Vec::new(),
            loot: Vec::new(),
            particles: Vec::new(),
            hud: HudStats::default(),
            events: Vec::new(),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Full reset back to `Start`
    ///
    /// Tuning and the RNG stream carry over; everything else is rebuilt.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Start;
        self.time_ticks = 0;
        self.level = 1;
        self.score = 0;
        self.player = Player::new(&self.tuning);
        self.snake = Snake::new(self.tuning.initial_snake_speed);
        self.gate_rows.clear();
        self.scroll_since_gate = 0.0;
        self.bullets.clear();
        self.loot.clear();
        self.particles.clear();
        self.events.clear();

        for _ in 0..INITIAL_SEGMENTS {
            let segment = self.create_segment();
            self.snake.segments.push(segment);
        }
        self.snake.derive_positions();
        self.spawn_gate_row();
        self.publish_hud();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Refresh the HUD snapshot
    pub fn publish_hud(&mut self) {
        self.hud = HudStats {
            attack: self.player.attack,
            attack_speed: crate::round_tenth(self.player.attack_speed),
            projectile_count: self.player.projectile_count,
            fever_charge: self.player.fever.floor() as u32,
            fever_active: self.player.fever_active,
            score: self.score,
            level: self.level,
            wave: self.level / 10 + 1,
        };
    }

    /// Serialize the read-only snapshot for an out-of-process renderer
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Debug-build check of the invariants the clamping is meant to uphold
    pub fn debug_check_invariants(&self) {
        debug_assert!(
            matches!(self.snake.segments.first(), Some(s) if s.kind == SegmentKind::Head),
            "chain must start with the head"
        );
        debug_assert!(
            self.snake
                .segments
                .iter()
                .skip(1)
                .all(|s| s.kind != SegmentKind::Head && s.hp > 0),
            "only index 0 may be the head and dead segments must be removed"
        );
        debug_assert!(self.snake.distance_traveled >= 0.0);
        debug_assert!(self.player.attack >= self.tuning.attack_floor);
        debug_assert!(
            self.player.attack_speed >= self.tuning.attack_speed_floor
                && self.player.attack_speed <= self.tuning.attack_speed_ceiling
        );
        debug_assert!(
            self.player.projectile_count >= 1
                && self.player.projectile_count <= self.tuning.max_projectiles
        );
        debug_assert!(self.player.fever >= 0.0 && self.player.fever <= self.tuning.fever_max);
        debug_assert!(self.gate_rows.iter().all(|r| r.gates.iter().all(|g| g.hp > 0)));
    }
}
