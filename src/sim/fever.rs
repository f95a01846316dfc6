//! Fever: a charge meter that bursts into a timed rapid-fire state
//!
//! INACTIVE -> ACTIVE when the meter is full (checked at the start of a
//! tick), ACTIVE -> INACTIVE when the countdown runs out. Charge is frozen
//! while active and drops to exactly zero on expiry.

use glam::Vec2;

use super::state::{GameEvent, GameState, Tint};

/// Fever state change produced by one update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeverTransition {
    None,
    Started,
    Ended,
}

/// Run the fever state machine for one tick
pub fn update_fever(state: &mut GameState) -> FeverTransition {
    let max = state.tuning.fever_max;
    let player = &mut state.player;

    if player.fever_active {
        player.fever_timer = player.fever_timer.saturating_sub(1);
        if player.fever_timer == 0 {
            player.fever_active = false;
            player.fever = 0.0;
            state.events.push(GameEvent::FeverEnded);
            log::info!("Fever ended");
            return FeverTransition::Ended;
        }
    } else if player.fever >= max {
        player.fever_active = true;
        player.fever = max;
        player.fever_timer = state.tuning.fever_duration_ticks;
        let origin = Vec2::new(player.center().x, player.rect.pos.y);
        state.spawn_shockwave(origin, Tint::Fever);
        state.events.push(GameEvent::FeverStarted);
        log::info!("Fever started ({} ticks)", state.tuning.fever_duration_ticks);
        return FeverTransition::Started;
    }
    FeverTransition::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ParticleKind;

    #[test]
    fn test_full_charge_activates_on_next_update() {
        let mut state = GameState::new(1);
        state.player.fever = state.tuning.fever_max;
        assert!(!state.player.fever_active);

        assert_eq!(update_fever(&mut state), FeverTransition::Started);
        assert!(state.player.fever_active);
        assert_eq!(state.player.fever_timer, state.tuning.fever_duration_ticks);
        assert_eq!(state.player.fever, state.tuning.fever_max);
        assert!(
            state
                .particles
                .iter()
                .any(|p| matches!(p.kind, ParticleKind::Shockwave { .. }))
        );
    }

    #[test]
    fn test_charge_holds_until_expiry_then_resets() {
        let mut state = GameState::new(1);
        state.player.fever = state.tuning.fever_max;
        update_fever(&mut state);

        let duration = state.tuning.fever_duration_ticks;
        for _ in 0..duration - 1 {
            assert_eq!(update_fever(&mut state), FeverTransition::None);
            assert!(state.player.fever_active);
            assert_eq!(state.player.fever, state.tuning.fever_max);
        }
        assert_eq!(update_fever(&mut state), FeverTransition::Ended);
        assert!(!state.player.fever_active);
        assert_eq!(state.player.fever, 0.0);
    }

    #[test]
    fn test_partial_charge_stays_inactive() {
        let mut state = GameState::new(1);
        state.player.fever = state.tuning.fever_max - 1.0;
        assert_eq!(update_fever(&mut state), FeverTransition::None);
        assert!(!state.player.fever_active);
    }
}
