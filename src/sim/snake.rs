//! Snake chain movement, growth and the lose line

use super::state::{GameState, SegmentKind};
use crate::consts::*;

impl GameState {
    /// Advance the chain one tick
    ///
    /// Returns true when the head has crossed the lose line.
    pub fn update_snake(&mut self) -> bool {
        self.snake.distance_traveled += self.snake.speed;

        // Keep feeding the tail while it is still queued above the corridor
        let last_index = self.snake.segments.len() - 1;
        if self.snake.distance_of(last_index) > TAIL_SPAWN_THRESHOLD {
            let segment = self.create_segment();
            self.snake.segments.push(segment);
        }

        self.snake.derive_positions();
        for seg in &mut self.snake.segments {
            seg.hit_flash = seg.hit_flash.saturating_sub(1);
        }

        self.head_crossed_lose_line()
    }

    /// Whether the head's leading edge is past the turret line
    pub fn head_crossed_lose_line(&self) -> bool {
        self.snake
            .head()
            .is_some_and(|head| head.rect.bottom() > self.player.rect.pos.y + LOSE_LINE_OFFSET)
    }

    /// Push the chain back along the path (head hits)
    pub fn knock_back(&mut self, amount: f32) {
        self.snake.distance_traveled = (self.snake.distance_traveled - amount).max(0.0);
    }

    /// Remove segment `index` and close the gap it leaves
    ///
    /// The head is never removed; returns false for index 0 or out of range.
    pub fn remove_segment(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.snake.segments.len() {
            return false;
        }
        debug_assert_ne!(self.snake.segments[index].kind, SegmentKind::Head);
        self.snake.segments.remove(index);
        self.knock_back(SEGMENT_SPACING);
        true
    }
}
