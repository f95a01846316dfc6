//! Turret stats, firing cadence and stat mutation
//!
//! Every stat write goes through here so the floor/ceiling clamps live in
//! one place.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Bullet, Player, StatDelta};
use crate::Tuning;
use crate::consts::*;
use crate::round_tenth;

impl Player {
    /// Fresh turret, centred at the bottom of the field
    pub fn new(tuning: &Tuning) -> Self {
        let mut player = Self {
            rect: Rect::new(
                FIELD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                PLAYER_Y,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            attack: tuning.base_attack,
            attack_speed: tuning.base_attack_speed,
            projectile_count: tuning.base_projectiles,
            fever: 0.0,
            fever_active: false,
            fever_timer: 0,
            last_shot_tick: None,
            muzzle_flash: 0,
        };
        player.set_attack_speed(tuning.base_attack_speed, tuning);
        player.projectile_count = player.projectile_count.clamp(1, tuning.max_projectiles.max(1));
        player.attack = player.attack.max(tuning.attack_floor);
        player
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Move the turret; `x` is its left edge
    pub fn set_x(&mut self, x: f32) {
        let x = if x.is_finite() { x } else { self.rect.pos.x };
        self.rect.pos.x = x.clamp(0.0, FIELD_WIDTH - PLAYER_WIDTH);
    }

    /// Damage output used to scale enemy toughness
    #[inline]
    pub fn dps(&self) -> f32 {
        self.attack as f32 * self.attack_speed
    }

    /// Credit a stat; speed gains are rounded to one decimal place
    pub fn apply_reward(&mut self, reward: StatDelta, tuning: &Tuning) {
        match reward {
            StatDelta::Attack(v) => {
                self.attack = self.attack.saturating_add(v).max(tuning.attack_floor);
            }
            StatDelta::AttackSpeed(v) => {
                self.set_attack_speed(round_tenth(self.attack_speed + v), tuning);
            }
            StatDelta::Projectiles(v) => {
                self.projectile_count = self
                    .projectile_count
                    .saturating_add(v)
                    .clamp(1, tuning.max_projectiles);
            }
        }
    }

    /// Debit a stat, never going below its floor
    pub fn apply_cost(&mut self, cost: StatDelta, tuning: &Tuning) {
        match cost {
            StatDelta::Attack(v) => {
                self.attack = self.attack.saturating_sub(v).max(tuning.attack_floor);
            }
            StatDelta::AttackSpeed(v) => {
                self.set_attack_speed(round_tenth(self.attack_speed - v), tuning);
            }
            StatDelta::Projectiles(v) => {
                self.projectile_count = self.projectile_count.saturating_sub(v).max(1);
            }
        }
    }

    /// Whether paying `cost` keeps the stat at or above its floor
    pub fn can_afford(&self, cost: StatDelta, tuning: &Tuning) -> bool {
        match cost {
            StatDelta::Attack(v) => {
                self.attack > v && self.attack - v >= tuning.attack_floor
            }
            StatDelta::AttackSpeed(v) => self.attack_speed - v >= tuning.attack_speed_floor,
            StatDelta::Projectiles(v) => self.projectile_count > v,
        }
    }

    /// Multiply attack, flooring the result
    pub fn scale_attack(&mut self, factor: f32, tuning: &Tuning) {
        let scaled = (self.attack as f32 * factor).floor();
        // `as` saturates on overflow
        self.attack = (scaled as u32).max(tuning.attack_floor);
    }

    /// Multiply attack speed (clamped to the ceiling)
    pub fn scale_attack_speed(&mut self, factor: f32, tuning: &Tuning) {
        self.set_attack_speed(self.attack_speed * factor, tuning);
    }

    fn set_attack_speed(&mut self, value: f32, tuning: &Tuning) {
        let value = if value.is_finite() {
            value
        } else {
            tuning.attack_speed_floor
        };
        self.attack_speed = value.clamp(tuning.attack_speed_floor, tuning.attack_speed_ceiling);
    }

    /// Add fever charge; ignored while fever is already burning
    ///
    /// Returns true if any charge was added.
    pub fn charge_fever(&mut self, amount: f32, tuning: &Tuning) -> bool {
        if self.fever_active {
            return false;
        }
        self.fever = (self.fever + amount.max(0.0)).min(tuning.fever_max);
        true
    }

    /// Top the meter off (activation happens on the next fever update)
    pub fn fill_fever(&mut self, tuning: &Tuning) -> bool {
        self.charge_fever(tuning.fever_max, tuning)
    }

    /// Per-tick cosmetic cooldowns
    pub fn tick(&mut self) {
        self.muzzle_flash = self.muzzle_flash.saturating_sub(1);
    }

    /// Milliseconds between volleys
    pub fn shot_period_ms(&self, tuning: &Tuning) -> f32 {
        if self.fever_active {
            tuning.fever_shot_period_ms
        } else {
            1000.0 / self.attack_speed.max(tuning.attack_speed_floor)
        }
    }

    /// Damage carried by each bullet
    pub fn shot_damage(&self) -> u32 {
        if self.fever_active {
            self.attack.saturating_mul(2)
        } else {
            self.attack
        }
    }

    pub fn ready_to_fire(&self, now_tick: u64, tuning: &Tuning) -> bool {
        match self.last_shot_tick {
            None => true,
            Some(last) => {
                let elapsed_ms = now_tick.saturating_sub(last) as f32 * TICK_MS;
                elapsed_ms > self.shot_period_ms(tuning)
            }
        }
    }

    /// Fire a volley, spread symmetrically about the turret centreline
    pub fn fire(&mut self, now_tick: u64) -> Vec<Bullet> {
        self.last_shot_tick = Some(now_tick);
        self.muzzle_flash = MUZZLE_FLASH_TICKS;

        let count = self.projectile_count.max(1);
        let width = if self.fever_active {
            BULLET_FEVER_WIDTH
        } else {
            BULLET_WIDTH
        };
        let spread = (count - 1) as f32 * BULLET_SPACING;
        let first_center = self.center().x - spread / 2.0;
        let damage = self.shot_damage();

        (0..count)
            .map(|i| {
                let cx = first_center + i as f32 * BULLET_SPACING;
                Bullet {
                    rect: Rect::new(
                        cx - width / 2.0,
                        self.rect.pos.y - BULLET_SPAWN_OFFSET,
                        width,
                        BULLET_HEIGHT,
                    ),
                    vy: -BULLET_SPEED,
                    damage,
                    fever: self.fever_active,
                }
            })
            .collect()
    }
}
