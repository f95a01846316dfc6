//! Serpentine corridor the snake crawls along
//!
//! The corridor is a boustrophedon scan: a horizontal run of `PLAY_WIDTH`
//! followed by a `ROW_HEIGHT` drop, alternating direction on every row.
//! Path distance maps to a point by pure arithmetic, so any segment's
//! position is recomputed from the chain's single travel scalar each tick.

use glam::Vec2;

use crate::consts::*;

/// Horizontal extent of one corridor run
pub const PLAY_WIDTH: f32 = FIELD_WIDTH - PATH_PADDING * 2.0;
/// Path length of one run plus its drop
pub const ROW_CYCLE: f32 = PLAY_WIDTH + ROW_HEIGHT;

/// Where the corridor begins (centreline)
#[inline]
pub fn path_start() -> Vec2 {
    Vec2::new(PATH_PADDING, PATH_PADDING + PATH_TOP_MARGIN)
}

/// Centreline point at path distance `dist`
///
/// Negative distances lie straight above the start, which is where freshly
/// spawned tail segments queue before entering the corridor.
pub fn centerline_at_distance(dist: f32) -> Vec2 {
    let start = path_start();
    if dist < 0.0 {
        return Vec2::new(start.x, start.y + dist);
    }

    let row_index = (dist / ROW_CYCLE).floor();
    let dist_in_row = (dist - row_index * ROW_CYCLE).max(0.0);
    let row_y = start.y + row_index * ROW_HEIGHT;
    let left_to_right = (row_index as u64) % 2 == 0;

    if dist_in_row < PLAY_WIDTH {
        let x = if left_to_right {
            start.x + dist_in_row
        } else {
            start.x + PLAY_WIDTH - dist_in_row
        };
        Vec2::new(x, row_y)
    } else {
        // Dropping down the wall at the end of the run
        let x = if left_to_right { start.x + PLAY_WIDTH } else { start.x };
        Vec2::new(x, row_y + (dist_in_row - PLAY_WIDTH))
    }
}

/// Top-left of a segment footprint centred on the path at `dist`
#[inline]
pub fn position_at_distance(dist: f32) -> Vec2 {
    centerline_at_distance(dist) - Vec2::splat(SEGMENT_SIZE / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_start_and_first_corner() {
        assert_eq!(centerline_at_distance(0.0), Vec2::new(28.0, 108.0));
        // End of first run: right wall
        assert_eq!(centerline_at_distance(PLAY_WIDTH), Vec2::new(422.0, 108.0));
        // Bottom of first drop equals start of the second (right-to-left) run
        assert_eq!(centerline_at_distance(ROW_CYCLE), Vec2::new(422.0, 188.0));
        assert_eq!(
            centerline_at_distance(ROW_CYCLE + 100.0),
            Vec2::new(322.0, 188.0)
        );
        // Second row ends on the left wall and drops again
        assert_eq!(
            centerline_at_distance(ROW_CYCLE + PLAY_WIDTH + 10.0),
            Vec2::new(28.0, 198.0)
        );
    }

    #[test]
    fn test_negative_distance_queues_above_start() {
        assert_eq!(centerline_at_distance(-46.0), Vec2::new(28.0, 62.0));
        assert_eq!(
            position_at_distance(-46.0),
            Vec2::new(28.0 - 26.0, 62.0 - 26.0)
        );
    }

    proptest! {
        #[test]
        fn prop_stays_inside_corridor(d in 0.0f32..50_000.0) {
            let p = centerline_at_distance(d);
            prop_assert!(p.x >= PATH_PADDING - 0.01);
            prop_assert!(p.x <= FIELD_WIDTH - PATH_PADDING + 0.01);
            prop_assert!(p.y >= PATH_PADDING + PATH_TOP_MARGIN - 0.01);
        }

        #[test]
        fn prop_is_continuous(d in 0.0f32..20_000.0, eps in 0.0f32..5.0) {
            let a = centerline_at_distance(d);
            let b = centerline_at_distance(d + eps);
            // Axis-aligned path: Manhattan distance never exceeds path distance
            let manhattan = (a.x - b.x).abs() + (a.y - b.y).abs();
            prop_assert!(manhattan <= eps + 0.05, "d={d} eps={eps} moved {manhattan}");
        }
    }
}
