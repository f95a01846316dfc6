//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::effects::update_particles;
use super::fever::update_fever;
use super::path::centerline_at_distance;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Turret left edge from the pointer/touch adapter
    pub player_x: Option<f32>,
    /// Leave the start screen
    pub begin: bool,
    /// Leave the game over screen
    pub restart: bool,
    /// Demo mode - the engine steers the turret itself
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    match state.phase {
        GamePhase::Start => {
            if input.begin {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Began);
                log::info!("Run started (seed {})", state.seed);
            }
            return;
        }
        GamePhase::GameOver => {
            if input.restart {
                state.reset();
                state.events.push(GameEvent::Restarted);
                log::info!("Restarted");
            }
            return;
        }
        GamePhase::Victory => return,
        GamePhase::Playing => {}
    }

    // Input lands before anything reads the turret position
    let target_x = if input.autopilot {
        autopilot_x(state)
    } else {
        input.player_x
    };
    if let Some(x) = target_x {
        state.player.set_x(x);
    }

    state.time_ticks += 1;

    update_fever(state);
    state.player.tick();
    update_difficulty(state);

    state.update_gates();

    if state.update_snake() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over at level {} with score {} after {} ticks",
            state.level,
            state.score,
            state.time_ticks
        );
        state.publish_hud();
        return;
    }

    // Shooting
    if state.player.ready_to_fire(state.time_ticks, &state.tuning) {
        let volley = state.player.fire(state.time_ticks);
        state.bullets.extend(volley);
    }
    state.move_bullets();
    state.resolve_bullets();

    state.update_loot();
    update_particles(&mut state.particles);

    if state.time_ticks % state.tuning.hud_publish_interval.max(1) == 0 {
        state.publish_hud();
    }

    state.debug_check_invariants();
}

/// Time-based difficulty: the chain speeds up and the level climbs
fn update_difficulty(state: &mut GameState) {
    let now = state.time_ticks;
    let tuning = &state.tuning;

    if now % tuning.speed_ramp_interval_ticks.max(1) == 0 {
        state.snake.speed += tuning.speed_ramp_amount;
    }

    if now % tuning.level_interval_ticks.max(1) == 0 {
        state.level += 1;
        state.snake.speed += tuning.level_speed_bonus;
        state.events.push(GameEvent::LevelUp { level: state.level });
        log::info!(
            "Level {} (wave {}), snake speed {:.2}",
            state.level,
            state.level / 10 + 1,
            state.snake.speed
        );
    }
}

/// Pick a turret position for demo play
///
/// Falling loot comes first. Otherwise line up under the lowest on-screen
/// gate or killable segment, leading segments by the bullet's flight time.
fn autopilot_x(state: &GameState) -> Option<f32> {
    let muzzle_y = state.player.rect.pos.y - BULLET_SPAWN_OFFSET;
    let on_screen = |c: &Vec2| c.y > 0.0 && c.y < muzzle_y;
    let lowest = |a: &Vec2, b: &Vec2| a.y.total_cmp(&b.y);

    let loot = state
        .loot
        .iter()
        .map(|l| l.rect.center())
        .filter(on_screen)
        .max_by(lowest);
    if let Some(c) = loot {
        return Some(c.x - PLAYER_WIDTH / 2.0);
    }

    let gates = state
        .gate_rows
        .iter()
        .flat_map(|row| row.gates.iter())
        .map(|g| {
            let c = g.rect.center();
            (c, c.x)
        });
    let snake = &state.snake;
    let segments = snake.segments.iter().enumerate().skip(1).map(|(i, s)| {
        let c = s.rect.center();
        let flight_ticks = (muzzle_y - c.y).max(0.0) / BULLET_SPEED;
        let lead = centerline_at_distance(snake.distance_of(i) + snake.speed * flight_ticks);
        (c, lead.x)
    });

    gates
        .chain(segments)
        .filter(|(c, _)| on_screen(c))
        .max_by(|(a, _), (b, _)| lowest(a, b))
        .map(|(_, aim_x)| aim_x - PLAYER_WIDTH / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Bullet, SegmentKind};

    fn begin(state: &mut GameState) {
        tick(
            state,
            &TickInput {
                begin: true,
                ..Default::default()
            },
        );
    }

    fn autopilot() -> TickInput {
        TickInput {
            autopilot: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_fresh_start() {
        let state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.snake.segments.len(), 31);
        assert_eq!(state.snake.segments[0].kind, SegmentKind::Head);
        assert!(
            state.snake.segments[1..]
                .iter()
                .all(|s| matches!(s.kind, SegmentKind::Body | SegmentKind::Chest))
        );
        assert_eq!(state.snake.distance_traveled, 0.0);
        assert_eq!(state.player.attack, 100);
        assert_eq!(state.player.attack_speed, 3.0);
        assert_eq!(state.player.projectile_count, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.gate_rows.len(), 1);
        assert_eq!(state.hud.wave, 1);
    }

    #[test]
    fn test_start_waits_for_begin() {
        let mut state = GameState::new(1);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.snake.distance_traveled, 0.0);

        begin(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Began]);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);
        assert!(state.snake.distance_traveled > 0.0);
        // First tick always fires
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_player_input_is_clamped() {
        let mut state = GameState::new(1);
        begin(&mut state);
        tick(
            &mut state,
            &TickInput {
                player_x: Some(10_000.0),
                ..Default::default()
            },
        );
        assert_eq!(state.player.rect.pos.x, FIELD_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_game_over_then_restart() {
        let mut state = GameState::new(3);
        begin(&mut state);
        state.snake.distance_traveled = 20_000.0;
        state.score = 70;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver { score: 70 }));
        assert_eq!(state.hud.score, 70);
        // No shooting on the losing tick
        assert!(state.bullets.is_empty());

        let frozen = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, frozen);
        assert!(state.events.is_empty());

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.events.last(), Some(&GameEvent::Restarted));
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.segments.len(), 31);
        assert_eq!(state.gate_rows.len(), 1);
    }

    #[test]
    fn test_difficulty_ramps() {
        let mut state = GameState::new(8);
        begin(&mut state);
        state.tuning.speed_ramp_interval_ticks = 5;
        state.tuning.level_interval_ticks = 10;
        let base = state.snake.speed;
        // Park the head so the chain cannot reach the turret
        for _ in 0..10 {
            state.snake.distance_traveled = 0.0;
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.level, 2);
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));
        let expected =
            base + 2.0 * state.tuning.speed_ramp_amount + state.tuning.level_speed_bonus;
        assert!((state.snake.speed - expected).abs() < 1e-5);
    }

    #[test]
    fn test_out_of_range_base_speed_is_clamped_before_play() {
        let tuning = crate::Tuning {
            attack_speed_ceiling: 2.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(10, tuning);
        assert_eq!(state.player.attack_speed, 2.0);
        begin(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.attack_speed, 2.0);
    }

    #[test]
    fn test_kill_that_fills_fever_activates_it_next_tick() {
        let mut state = GameState::new(31);
        begin(&mut state);
        state.gate_rows.clear();
        state.tuning.gate_spawn_interval = f32::MAX;
        // Third run of the corridor, so segment 3 sits in a horizontal lane
        state.snake.distance_traveled = 1_328.0;
        state.snake.derive_positions();
        state.snake.segments[3].kind = SegmentKind::Body;
        state.snake.segments[3].hp = 1;
        state.player.fever = state.tuning.fever_max - state.tuning.fever_charge_kill;

        // One bullet step below the segment, so it connects on this tick's move
        let target = state.snake.segments[3].rect.center() + Vec2::new(0.0, BULLET_SPEED);
        state.bullets.push(Bullet {
            rect: Rect::centered(target, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT)),
            vy: -BULLET_SPEED,
            damage: 100,
            fever: false,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, SCORE_PER_SEGMENT);
        assert_eq!(state.player.fever, state.tuning.fever_max);
        assert!(!state.player.fever_active);
        assert!(!state.events.contains(&GameEvent::FeverStarted));

        tick(&mut state, &TickInput::default());
        assert!(state.player.fever_active);
        assert_eq!(state.player.fever_timer, state.tuning.fever_duration_ticks);
        assert!(state.events.contains(&GameEvent::FeverStarted));
    }

    #[test]
    fn test_events_cleared_each_tick() {
        let mut state = GameState::new(4);
        begin(&mut state);
        state.events.push(GameEvent::HeadKnockedBack);
        state.snake.distance_traveled = 0.0;
        tick(&mut state, &TickInput::default());
        assert!(!state.events.contains(&GameEvent::HeadKnockedBack));
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut state = GameState::new(seed);
            begin(&mut state);
            for _ in 0..1_500 {
                tick(&mut state, &autopilot());
            }
            state.snapshot_json().ok()
        };
        let a = run(99);
        assert!(a.is_some());
        assert_eq!(a, run(99));
    }

    #[test]
    fn test_autopilot_kills_segments() {
        let mut state = GameState::new(21);
        state.gate_rows.clear();
        state.tuning.gate_spawn_interval = f32::MAX;
        begin(&mut state);
        for _ in 0..1_200 {
            tick(&mut state, &autopilot());
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert!(state.score > 0);
        assert_eq!(state.score % SCORE_PER_SEGMENT, 0);
    }

    #[test]
    fn test_hud_publish_is_throttled() {
        let mut state = GameState::new(6);
        begin(&mut state);
        state.player.attack = 555;
        state.snake.distance_traveled = 0.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.hud.attack, 100);
        for _ in 1..state.tuning.hud_publish_interval {
            state.snake.distance_traveled = 0.0;
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.hud.attack, 555);
    }
}
