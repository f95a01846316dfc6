//! Data-driven game balance
//!
//! Every number that shapes difficulty or reward lives here so a run can be
//! rebalanced from a JSON file without touching the simulation. Missing
//! fields fall back to the shipped defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub base_attack: u32,
    pub base_attack_speed: f32,
    pub base_projectiles: u32,
    pub max_projectiles: u32,
    /// Attack never drops below this
    pub attack_floor: u32,
    pub attack_speed_floor: f32,
    pub attack_speed_ceiling: f32,

    // === Snake ===
    pub initial_snake_speed: f32,
    /// Path units the snake is pushed back per head hit
    pub knockback: f32,
    pub speed_ramp_interval_ticks: u64,
    pub speed_ramp_amount: f32,
    pub level_interval_ticks: u64,
    pub level_speed_bonus: f32,
    /// Probability a new segment is a loot chest
    pub chest_chance: f32,

    // === Gates ===
    /// Pixels per tick the gate field scrolls down
    pub scroll_speed: f32,
    /// Scroll distance between gate rows
    pub gate_spawn_interval: f32,
    pub mystery_row_weight: f32,
    pub trade_row_weight: f32,
    pub normal_row_weight: f32,

    // === Fever ===
    pub fever_max: f32,
    pub fever_duration_ticks: u32,
    pub fever_charge_kill: f32,
    pub fever_charge_loot: f32,
    /// Fixed fire period while fever is active
    pub fever_shot_period_ms: f32,

    // === Loot ===
    pub loot_gravity: f32,
    pub loot_capture_radius: f32,
    /// Fraction of the remaining gap closed per tick inside the capture radius
    pub loot_homing: f32,

    // === HUD ===
    pub hud_publish_interval: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_attack: 100,
            base_attack_speed: 3.0,
            base_projectiles: 1,
            max_projectiles: 7,
            attack_floor: 10,
            attack_speed_floor: 1.0,
            attack_speed_ceiling: 25.0,

            initial_snake_speed: 1.0,
            knockback: 0.5,
            speed_ramp_interval_ticks: 600,
            speed_ramp_amount: 0.05,
            level_interval_ticks: 900,
            level_speed_bonus: 0.1,
            chest_chance: 0.05,

            scroll_speed: 2.0,
            gate_spawn_interval: 400.0,
            mystery_row_weight: 0.20,
            trade_row_weight: 0.15,
            normal_row_weight: 0.65,

            fever_max: 100.0,
            fever_duration_ticks: 300,
            fever_charge_kill: 2.0,
            fever_charge_loot: 20.0,
            fever_shot_period_ms: 40.0,

            loot_gravity: 0.2,
            loot_capture_radius: 180.0,
            loot_homing: 0.15,

            hud_publish_interval: 10,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot clamp its way out of
    pub fn validate(&self) -> Result<(), TuningError> {
        let floats = [
            self.base_attack_speed,
            self.attack_speed_floor,
            self.attack_speed_ceiling,
            self.initial_snake_speed,
            self.knockback,
            self.speed_ramp_amount,
            self.level_speed_bonus,
            self.chest_chance,
            self.scroll_speed,
            self.gate_spawn_interval,
            self.mystery_row_weight,
            self.trade_row_weight,
            self.normal_row_weight,
            self.fever_max,
            self.fever_charge_kill,
            self.fever_charge_loot,
            self.fever_shot_period_ms,
            self.loot_gravity,
            self.loot_capture_radius,
            self.loot_homing,
        ];
        if floats.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(TuningError::Invalid("values must be finite and non-negative"));
        }
        if self.max_projectiles == 0 || self.base_projectiles == 0 {
            return Err(TuningError::Invalid("projectile counts must be at least 1"));
        }
        if self.base_projectiles > self.max_projectiles {
            return Err(TuningError::Invalid("base_projectiles exceeds max_projectiles"));
        }
        if self.attack_speed_floor < 0.1 || self.attack_speed_floor > self.attack_speed_ceiling {
            return Err(TuningError::Invalid("attack speed floor must be in [0.1, ceiling]"));
        }
        if self.base_attack_speed < self.attack_speed_floor
            || self.base_attack_speed > self.attack_speed_ceiling
        {
            return Err(TuningError::Invalid(
                "base_attack_speed must be within [attack_speed_floor, attack_speed_ceiling]",
            ));
        }
        if self.base_attack < self.attack_floor {
            return Err(TuningError::Invalid("base_attack is below attack_floor"));
        }
        if self.chest_chance > 1.0 || self.loot_homing > 1.0 {
            return Err(TuningError::Invalid("probabilities and blend factors must be <= 1"));
        }
        if self.mystery_row_weight + self.trade_row_weight + self.normal_row_weight <= 0.0 {
            return Err(TuningError::Invalid("gate row weights sum to zero"));
        }
        if self.fever_max <= 0.0 || self.fever_duration_ticks == 0 {
            return Err(TuningError::Invalid("fever needs a positive charge and duration"));
        }
        if self.fever_shot_period_ms <= 0.0 || self.gate_spawn_interval <= 0.0 {
            return Err(TuningError::Invalid("periods and intervals must be positive"));
        }
        if self.speed_ramp_interval_ticks == 0
            || self.level_interval_ticks == 0
            || self.hud_publish_interval == 0
        {
            return Err(TuningError::Invalid("tick intervals must be positive"));
        }
        Ok(())
    }
}
