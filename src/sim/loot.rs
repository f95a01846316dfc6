//! Loot pickups dropped by chest segments
//!
//! Loot pops upward, falls under gravity and, once near the turret, is
//! dragged toward it by a fixed per-tick blend (a magnet feel, not physics).

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use super::state::{GameEvent, GameState, Loot, LootKind, StatDelta};
use super::weighted::WeightedTable;
use crate::consts::*;

/// Drop table for chest kills
pub const LOOT_TABLE: [(f32, LootKind); 3] = [
    (0.10, LootKind::ProjectileUp),
    (0.40, LootKind::SpeedUpLarge),
    (0.50, LootKind::AttackUpLarge),
];

/// Flat attack granted by `AttackUpLarge`
pub const LOOT_ATTACK_BONUS: u32 = 300;
/// Attack speed multiplier of `SpeedUpLarge`
pub const LOOT_SPEED_FACTOR: f32 = 1.5;

impl GameState {
    /// Drop a random pickup centred on `center`
    pub fn spawn_loot(&mut self, center: Vec2) {
        let roll: f32 = self.rng.random();
        let kind = WeightedTable::new(LOOT_TABLE)
            .select(roll)
            .unwrap_or(LootKind::AttackUpLarge);
        self.loot.push(Loot {
            kind,
            rect: Rect::centered(center, Vec2::splat(LOOT_SIZE)),
            vy: LOOT_LAUNCH_VY,
        });
        self.events.push(GameEvent::LootDropped { kind });
    }

    /// Move, attract, collect and cull loot
    pub fn update_loot(&mut self) {
        let mut loot = std::mem::take(&mut self.loot);
        loot.retain_mut(|item| {
            item.vy += self.tuning.loot_gravity;
            item.rect.pos.y += item.vy;

            let target = self.player.center();
            let offset = target - item.rect.center();
            if offset.length() < self.tuning.loot_capture_radius {
                item.rect.pos += offset * self.tuning.loot_homing;
            }

            if item.rect.overlaps_inset(&self.player.rect, COLLISION_INSET) {
                self.collect_loot(item.kind);
                return false;
            }
            item.rect.pos.y <= FIELD_HEIGHT + LOOT_DESPAWN_MARGIN
        });
        self.loot = loot;
    }

    /// Apply a pickup's effect and charge fever
    pub fn collect_loot(&mut self, kind: LootKind) {
        let tuning = &self.tuning;
        match kind {
            LootKind::ProjectileUp => self.player.apply_reward(StatDelta::Projectiles(1), tuning),
            LootKind::AttackUpLarge => {
                self.player.apply_reward(StatDelta::Attack(LOOT_ATTACK_BONUS), tuning)
            }
            LootKind::SpeedUpLarge => self.player.scale_attack_speed(LOOT_SPEED_FACTOR, tuning),
        }
        self.player.charge_fever(tuning.fever_charge_loot, tuning);
        self.events.push(GameEvent::LootCollected { kind });
        log::debug!("Loot collected: {kind:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loot_table() {
        let table = WeightedTable::new(LOOT_TABLE);
        assert_eq!(table.select(0.05), Some(LootKind::ProjectileUp));
        assert_eq!(table.select(0.3), Some(LootKind::SpeedUpLarge));
        assert_eq!(table.select(0.7), Some(LootKind::AttackUpLarge));
    }

    #[test]
    fn test_far_loot_falls_and_is_discarded() {
        let mut s = GameState::new(9);
        s.player.set_x(FIELD_WIDTH - PLAYER_WIDTH);
        s.loot.push(Loot {
            kind: LootKind::AttackUpLarge,
            rect: Rect::new(10.0, 100.0, LOOT_SIZE, LOOT_SIZE),
            vy: LOOT_LAUNCH_VY,
        });
        s.update_loot();
        // Launch velocity carries it up first
        assert!(s.loot[0].rect.pos.y < 100.0);
        for _ in 0..200 {
            s.update_loot();
        }
        assert!(s.loot.is_empty());
        assert_eq!(s.player.attack, 100);
    }

    #[test]
    fn test_nearby_loot_homes_in_and_applies() {
        let mut s = GameState::new(9);
        let center = s.player.center() - Vec2::new(0.0, 150.0);
        s.loot.push(Loot {
            kind: LootKind::SpeedUpLarge,
            rect: Rect::centered(center, Vec2::splat(LOOT_SIZE)),
            vy: 0.0,
        });
        for _ in 0..30 {
            s.update_loot();
        }
        assert!(s.loot.is_empty());
        assert_eq!(s.player.attack_speed, 4.5);
        assert_eq!(s.player.fever, s.tuning.fever_charge_loot);
        assert!(s.events.contains(&GameEvent::LootCollected {
            kind: LootKind::SpeedUpLarge
        }));
    }

    #[test]
    fn test_pickup_effects_clamp() {
        let mut s = GameState::new(9);
        s.player.projectile_count = s.tuning.max_projectiles;
        s.collect_loot(LootKind::ProjectileUp);
        assert_eq!(s.player.projectile_count, s.tuning.max_projectiles);

        s.player.attack_speed = 20.0;
        s.collect_loot(LootKind::SpeedUpLarge);
        assert_eq!(s.player.attack_speed, s.tuning.attack_speed_ceiling);

        s.collect_loot(LootKind::AttackUpLarge);
        assert_eq!(s.player.attack, 400);
    }

    #[test]
    fn test_pickup_skips_fever_charge_while_active() {
        let mut s = GameState::new(9);
        s.player.fever_active = true;
        s.player.fever_timer = 10;
        s.player.fever = 100.0;
        s.collect_loot(LootKind::AttackUpLarge);
        assert_eq!(s.player.fever, 100.0);
    }
}
