//! Gate rows: scrolling, spawning, and what breaking a gate pays out

use glam::Vec2;
use rand::Rng;

use super::state::{
    GameEvent, GameState, GateKind, MysteryOutcome, RewardOutcome, StatDelta, Tint, Tone,
};
use super::weighted::WeightedTable;
use crate::consts::*;

/// Mystery gate roll table, in draw order
pub const MYSTERY_TABLE: [(f32, MysteryOutcome); 7] = [
    (0.05, MysteryOutcome::ProjectileUp),
    (0.10, MysteryOutcome::AttackMultiply),
    (0.15, MysteryOutcome::FeverFill),
    (0.20, MysteryOutcome::AttackBoost),
    (0.20, MysteryOutcome::SpeedBoost),
    (0.15, MysteryOutcome::AttackCurse),
    (0.15, MysteryOutcome::SpeedCurse),
];

/// Minimum flat gain of the +20% attack outcome
const MYSTERY_MIN_ATTACK_GAIN: u32 = 50;

impl GateKind {
    pub fn tint(&self) -> Tint {
        match self {
            GateKind::Attack(_) => Tint::AttackGate,
            GateKind::Speed(_) => Tint::SpeedGate,
            GateKind::Mystery => Tint::MysteryGate,
            GateKind::Trade(_) => Tint::TradeGate,
        }
    }

    /// Caption drawn on the gate; normal gates reuse it as their reward text
    pub fn label(&self) -> String {
        match self {
            GateKind::Attack(v) => format!("ATK +{v}"),
            GateKind::Speed(v) => format!("SPD +{v:.1}"),
            GateKind::Mystery => "?".to_string(),
            GateKind::Trade(trade) => {
                format!("{} > {}", stat_label(trade.cost, '-'), stat_label(trade.reward, '+'))
            }
        }
    }
}

fn stat_label(delta: StatDelta, sign: char) -> String {
    match delta {
        StatDelta::Attack(v) => format!("ATK {sign}{v}"),
        StatDelta::AttackSpeed(v) => format!("SPD {sign}{v:.1}"),
        StatDelta::Projectiles(v) => format!("PROJ {sign}{v}"),
    }
}

impl GameState {
    /// Scroll the gate field, spawn a new row on schedule, drop rows that
    /// left the bottom of the field (no reward)
    pub fn update_gates(&mut self) {
        let scroll = self.tuning.scroll_speed;
        self.scroll_since_gate += scroll;
        if self.scroll_since_gate > self.tuning.gate_spawn_interval {
            self.spawn_gate_row();
            self.scroll_since_gate = 0.0;
        }

        for row in &mut self.gate_rows {
            row.scroll(scroll);
        }
        self.gate_rows
            .retain(|row| row.y() < FIELD_HEIGHT + GATE_DESPAWN_MARGIN);
    }

    /// Destroy the row at `row_index` and pay out the broken gate
    ///
    /// Both gates of the row go, whichever one was broken.
    pub fn destroy_gate_row(&mut self, row_index: usize, slot: usize) -> Option<RewardOutcome> {
        if row_index >= self.gate_rows.len() || slot > 1 {
            return None;
        }
        let row = self.gate_rows.remove(row_index);
        let gate = &row.gates[slot];
        let center = gate.rect.center();
        self.spawn_shockwave(center, gate.kind.tint());

        let outcome = self.resolve_gate_reward(gate.kind, center);
        self.events.push(GameEvent::GateRowDestroyed {
            row_id: row.id,
            outcome,
        });
        log::debug!("Gate row {} destroyed: {:?}", row.id, outcome);
        Some(outcome)
    }

    /// Apply the reward of a broken gate
    pub fn resolve_gate_reward(&mut self, kind: GateKind, center: Vec2) -> RewardOutcome {
        match kind {
            GateKind::Mystery => {
                let roll: f32 = self.rng.random();
                RewardOutcome::Mystery(self.apply_mystery(roll, center))
            }
            GateKind::Trade(trade) => {
                let success = self.player.can_afford(trade.cost, &self.tuning);
                if success {
                    self.player.apply_cost(trade.cost, &self.tuning);
                    self.player.apply_reward(trade.reward, &self.tuning);
                    self.spawn_text(center, "TRADE OK!", Tone::Jackpot);
                } else {
                    log::debug!("Trade refused: cannot afford {:?}", trade.cost);
                    self.spawn_text(center, "CAN'T AFFORD!", Tone::Penalty);
                }
                RewardOutcome::Trade { success }
            }
            GateKind::Attack(v) => {
                let delta = StatDelta::Attack(v);
                self.player.apply_reward(delta, &self.tuning);
                self.spawn_text(center, kind.label(), Tone::Reward);
                RewardOutcome::Stat(delta)
            }
            GateKind::Speed(v) => {
                let delta = StatDelta::AttackSpeed(v);
                self.player.apply_reward(delta, &self.tuning);
                self.spawn_text(center, kind.label(), Tone::Reward);
                RewardOutcome::Stat(delta)
            }
        }
    }

    /// Resolve a mystery gate for a given roll in `[0, 1)`
    pub fn apply_mystery(&mut self, roll: f32, center: Vec2) -> MysteryOutcome {
        let table = WeightedTable::new(MYSTERY_TABLE);
        let outcome = table.select(roll).unwrap_or(MysteryOutcome::SpeedCurse);
        let tuning = &self.tuning;
        let player = &mut self.player;

        let (text, tone) = match outcome {
            MysteryOutcome::ProjectileUp => {
                player.apply_reward(StatDelta::Projectiles(1), tuning);
                ("PROJ +1!".to_string(), Tone::Jackpot)
            }
            MysteryOutcome::AttackMultiply => {
                player.scale_attack(1.5, tuning);
                ("ATK x1.5!".to_string(), Tone::Jackpot)
            }
            MysteryOutcome::FeverFill => {
                player.fill_fever(tuning);
                ("FEVER FULL!".to_string(), Tone::Jackpot)
            }
            MysteryOutcome::AttackBoost => {
                let gain =
                    ((player.attack as f32 * 0.2).floor() as u32).max(MYSTERY_MIN_ATTACK_GAIN);
                player.apply_reward(StatDelta::Attack(gain), tuning);
                (format!("ATK +{gain}"), Tone::Reward)
            }
            MysteryOutcome::SpeedBoost => {
                player.apply_reward(StatDelta::AttackSpeed(1.0), tuning);
                ("SPD +1.0".to_string(), Tone::Reward)
            }
            MysteryOutcome::AttackCurse => {
                let loss = (player.attack as f32 * 0.2).floor() as u32;
                player.apply_cost(StatDelta::Attack(loss), tuning);
                (format!("CURSE: ATK -{loss}"), Tone::Penalty)
            }
            MysteryOutcome::SpeedCurse => {
                player.apply_cost(StatDelta::AttackSpeed(1.0), tuning);
                ("CURSE: SPD -1.0".to_string(), Tone::Penalty)
            }
        };
        self.spawn_text(center, text, tone);
        outcome
    }
}
