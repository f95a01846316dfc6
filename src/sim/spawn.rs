//! Entity factories
//!
//! Segment and gate toughness scale with the player's current damage output
//! (so enemies stay relevant) and with run progress (so the baseline keeps
//! rising). Both are sampled at spawn time and never revised.

use rand::Rng;

use super::rect::Rect;
use super::state::{
    GameEvent, GameState, Gate, GateKind, GateRow, Segment, SegmentKind, Side, StatDelta,
    TradeConfig,
};
use super::weighted::WeightedTable;
use crate::consts::*;
use crate::round_tenth;

/// Minimum hp of any non-head segment
pub const MIN_SEGMENT_HP: u32 = 20;
/// Minimum hp of a gate
pub const MIN_GATE_HP: f32 = 200.0;

/// Row composition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// Plain attack-vs-speed choice
    Normal,
    /// One side is a mystery gate
    Mystery,
    /// One side is a trade gate
    Trade,
}

/// Hp of the `count`-th segment given the player's dps
pub fn segment_hp(kind: SegmentKind, dps: f32, count: u32) -> u32 {
    let hp = match kind {
        SegmentKind::Head => return u32::MAX,
        SegmentKind::Chest => dps * 1.5,
        SegmentKind::Body => (80.0 + dps * 0.2) * (1.0 + count as f32 / 60.0),
    };
    (hp.floor() as u32).max(MIN_SEGMENT_HP)
}

/// Hp of each gate in a new row
pub fn gate_hp(dps: f32) -> u32 {
    (dps * 2.5).max(MIN_GATE_HP).floor() as u32
}

/// Attack reward of a normal gate; steps up every 15 segments
pub fn dynamic_attack_reward(progress: u32) -> u32 {
    200 + 50 * (progress / 15)
}

/// Speed reward of a normal gate; steps up every 50 segments
pub fn dynamic_speed_reward(progress: u32) -> f32 {
    round_tenth(0.5 + 0.1 * (progress / 50) as f32)
}

impl GameState {
    /// Build the next tail segment (does not attach it)
    pub fn create_segment(&mut self) -> Segment {
        self.snake.total_created += 1;
        let count = self.snake.total_created;
        let kind = if self.rng.random_bool(self.tuning.chest_chance.clamp(0.0, 1.0) as f64) {
            SegmentKind::Chest
        } else {
            SegmentKind::Body
        };
        let hp = segment_hp(kind, self.player.dps(), count);

        Segment {
            id: count,
            kind,
            hp,
            max_hp: hp,
            value: hp,
            // Placed by the next position derivation
            rect: Rect::new(-200.0, -200.0, SEGMENT_SIZE, SEGMENT_SIZE),
            hit_flash: 0,
        }
    }

    /// Spawn a gate row above the visible field
    pub fn spawn_gate_row(&mut self) {
        let progress = self.snake.total_created;
        let hp = gate_hp(self.player.dps());
        let atk_reward = dynamic_attack_reward(progress);
        let spd_reward = dynamic_speed_reward(progress);

        let layouts = WeightedTable::new([
            (self.tuning.mystery_row_weight, RowLayout::Mystery),
            (self.tuning.trade_row_weight, RowLayout::Trade),
            (self.tuning.normal_row_weight, RowLayout::Normal),
        ]);
        let layout = layouts.draw(&mut self.rng).unwrap_or(RowLayout::Normal);

        let plain = |rng: &mut rand_pcg::Pcg32| {
            if rng.random_bool(0.5) {
                GateKind::Attack(atk_reward)
            } else {
                GateKind::Speed(spd_reward)
            }
        };

        let (left, right) = match layout {
            RowLayout::Normal => {
                if self.rng.random_bool(0.5) {
                    (GateKind::Speed(spd_reward), GateKind::Attack(atk_reward))
                } else {
                    (GateKind::Attack(atk_reward), GateKind::Speed(spd_reward))
                }
            }
            RowLayout::Mystery | RowLayout::Trade => {
                let special_side = if self.rng.random_bool(0.5) {
                    Side::Left
                } else {
                    Side::Right
                };
                let special = match layout {
                    RowLayout::Mystery => GateKind::Mystery,
                    _ => GateKind::Trade(self.roll_trade(special_side, atk_reward)),
                };
                let partner = plain(&mut self.rng);
                match special_side {
                    Side::Left => (special, partner),
                    Side::Right => (partner, special),
                }
            }
        };

        let make = |kind: GateKind, x: f32| Gate {
            kind,
            hp,
            max_hp: hp,
            rect: Rect::new(x, GATE_SPAWN_Y, GATE_WIDTH, GATE_HEIGHT),
            hit_flash: 0,
        };

        let id = self.next_entity_id();
        self.gate_rows.push(GateRow {
            id,
            gates: [make(left, GATE_LEFT_X), make(right, GATE_RIGHT_X)],
        });
        self.events.push(GameEvent::GateRowSpawned { row_id: id });
        log::debug!("Gate row {id} spawned ({layout:?}, hp {hp}): {left:?} | {right:?}");
    }

    /// Pick the exchange a trade gate offers
    ///
    /// The right-hand slot always passes the skew check, so projectile trades
    /// cluster there whenever the player has a projectile to spare.
    fn roll_trade(&mut self, side: Side, atk_reward: u32) -> TradeConfig {
        let skew = side.index() as f32;
        let roll: f32 = self.rng.random();
        if (roll + skew) % 2.0 > 0.8 && self.player.projectile_count > 1 {
            TradeConfig {
                cost: StatDelta::Projectiles(1),
                reward: StatDelta::Attack(atk_reward.saturating_mul(4)),
            }
        } else {
            let cost = (self.player.attack as f32 * 0.3).floor() as u32;
            TradeConfig {
                cost: StatDelta::Attack(cost),
                reward: StatDelta::AttackSpeed(2.0),
            }
        }
    }
}
