//! Bullet movement and hit resolution
//!
//! Priority per bullet: gates (first overlap wins), then the head, then the
//! rest of the chain in index order. A bullet is consumed by its first hit.

use super::state::{Bullet, GameEvent, GameState, SegmentKind, Tint};
use crate::consts::*;

/// What a single bullet struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    Miss,
    Gate { row_index: usize, slot: usize, destroyed: bool },
    Head,
    Segment { index: usize, destroyed: bool },
}

impl SegmentKind {
    pub fn tint(&self) -> Tint {
        match self {
            SegmentKind::Head => Tint::Head,
            SegmentKind::Body => Tint::Body,
            SegmentKind::Chest => Tint::Chest,
        }
    }
}

impl GameState {
    /// Move bullets and drop the ones that left the top of the field
    pub fn move_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.rect.pos.y += bullet.vy;
        }
        self.bullets.retain(|b| b.rect.pos.y > BULLET_DESPAWN_Y);
    }

    /// Test every bullet against gates then the snake
    pub fn resolve_bullets(&mut self) {
        let mut bullets = std::mem::take(&mut self.bullets);
        bullets.retain(|bullet| self.resolve_bullet(bullet) == HitResult::Miss);
        self.bullets = bullets;
    }

    /// Resolve one bullet against the world
    pub fn resolve_bullet(&mut self, bullet: &Bullet) -> HitResult {
        if let Some(hit) = self.hit_gates(bullet) {
            return hit;
        }

        let Some(head) = self.snake.segments.first_mut() else {
            return HitResult::Miss;
        };
        if bullet.rect.overlaps_inset(&head.rect, COLLISION_INSET) {
            head.hit_flash = HIT_FLASH_TICKS;
            self.spawn_impact(bullet.rect.pos, Tint::Head);
            self.knock_back(self.tuning.knockback);
            self.events.push(GameEvent::HeadKnockedBack);
            return HitResult::Head;
        }

        let hit_index = self
            .snake
            .segments
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, seg)| {
                seg.rect.pos.y >= SEGMENT_CULL_TOP && seg.rect.pos.y <= FIELD_HEIGHT
            })
            .find(|(_, seg)| bullet.rect.overlaps_inset(&seg.rect, COLLISION_INSET))
            .map(|(i, _)| i);

        let Some(index) = hit_index else {
            return HitResult::Miss;
        };
        let seg = &mut self.snake.segments[index];
        seg.hit_flash = HIT_FLASH_TICKS;
        seg.hp = seg.hp.saturating_sub(bullet.damage);
        let destroyed = seg.hp == 0;
        self.spawn_impact(bullet.rect.pos, Tint::Body);
        if destroyed {
            self.destroy_segment(index);
        }
        HitResult::Segment { index, destroyed }
    }

    fn hit_gates(&mut self, bullet: &Bullet) -> Option<HitResult> {
        let (row_index, slot) = self.gate_rows.iter().enumerate().find_map(|(r, row)| {
            row.gates
                .iter()
                .position(|g| bullet.rect.overlaps_inset(&g.rect, COLLISION_INSET))
                .map(|slot| (r, slot))
        })?;

        let gate = &mut self.gate_rows[row_index].gates[slot];
        gate.hp = gate.hp.saturating_sub(bullet.damage);
        gate.hit_flash = HIT_FLASH_TICKS;
        let destroyed = gate.hp == 0;
        let tint = gate.kind.tint();
        self.spawn_impact(bullet.rect.pos, tint);
        if destroyed {
            self.destroy_gate_row(row_index, slot);
        }
        Some(HitResult::Gate {
            row_index,
            slot,
            destroyed,
        })
    }

    /// Kill side effects for segment `index`, then remove it from the chain
    fn destroy_segment(&mut self, index: usize) {
        let seg = &self.snake.segments[index];
        let (id, kind, center) = (seg.id, seg.kind, seg.rect.center());

        self.score += SCORE_PER_SEGMENT;
        self.player.charge_fever(self.tuning.fever_charge_kill, &self.tuning);
        self.spawn_impact(center, kind.tint());
        if kind == SegmentKind::Chest {
            self.spawn_loot(center);
        }
        self.remove_segment(index);
        self.events.push(GameEvent::SegmentDestroyed { id, kind });
    }
}
