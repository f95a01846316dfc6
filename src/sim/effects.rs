//! Cosmetic particles: impact sparks, shockwaves, floating reward text
//!
//! Nothing here feeds back into gameplay. Particles draw from the shared RNG
//! so a seeded run stays reproducible end to end.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, MAX_PARTICLES, Particle, ParticleKind, Tint, Tone};

const SPARKS_PER_IMPACT: usize = 4;
const SPARK_SPEED: f32 = 4.0;
const SPARK_GRAVITY: f32 = 0.1;
const SPARK_FADE: f32 = 0.05;
const SHOCKWAVE_GROWTH: f32 = 3.0;
const SHOCKWAVE_FADE: f32 = 0.05;
const TEXT_RISE: f32 = -1.5;
const TEXT_LIFE: f32 = 1.5;
const TEXT_FADE: f32 = 0.02;

impl GameState {
    fn push_particle(&mut self, particle: Particle) {
        if self.particles.len() < MAX_PARTICLES {
            self.particles.push(particle);
        }
    }

    /// Burst of sparks where something was hit
    pub fn spawn_impact(&mut self, pos: Vec2, tint: Tint) {
        for _ in 0..SPARKS_PER_IMPACT {
            let vel = Vec2::new(
                self.rng.random_range(-SPARK_SPEED..SPARK_SPEED),
                self.rng.random_range(-SPARK_SPEED..SPARK_SPEED),
            );
            self.push_particle(Particle {
                pos,
                vel,
                life: 1.0,
                kind: ParticleKind::Spark { tint },
            });
        }
    }

    /// Expanding ring
    pub fn spawn_shockwave(&mut self, pos: Vec2, tint: Tint) {
        self.push_particle(Particle {
            pos,
            vel: Vec2::ZERO,
            life: 1.0,
            kind: ParticleKind::Shockwave { tint, radius: 10.0 },
        });
    }

    /// Rising label such as "ATK +200"
    pub fn spawn_text(&mut self, pos: Vec2, text: impl Into<String>, tone: Tone) {
        self.push_particle(Particle {
            pos,
            vel: Vec2::new(0.0, TEXT_RISE),
            life: TEXT_LIFE,
            kind: ParticleKind::FloatingText {
                text: text.into(),
                tone,
            },
        });
    }
}

/// Advance and cull particles
pub fn update_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        match &mut p.kind {
            ParticleKind::Spark { .. } => {
                p.vel.y += SPARK_GRAVITY;
                p.life -= SPARK_FADE;
            }
            ParticleKind::Shockwave { radius, .. } => {
                *radius += SHOCKWAVE_GROWTH;
                p.life -= SHOCKWAVE_FADE;
            }
            ParticleKind::FloatingText { .. } => {
                p.life -= TEXT_FADE;
            }
        }
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_spawns_sparks_that_fade() {
        let mut state = GameState::new(1);
        state.spawn_impact(Vec2::new(100.0, 100.0), Tint::Body);
        assert_eq!(state.particles.len(), SPARKS_PER_IMPACT);
        for _ in 0..21 {
            update_particles(&mut state.particles);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_text_outlives_sparks() {
        let mut state = GameState::new(1);
        state.spawn_text(Vec2::ZERO, "ATK +200", Tone::Reward);
        state.spawn_shockwave(Vec2::ZERO, Tint::Fever);
        for _ in 0..30 {
            update_particles(&mut state.particles);
        }
        assert_eq!(state.particles.len(), 1);
        let p = &state.particles[0];
        assert!(matches!(p.kind, ParticleKind::FloatingText { .. }));
        assert!((p.pos.y - 30.0 * TEXT_RISE).abs() < 1e-3);
    }

    #[test]
    fn test_particle_cap() {
        let mut state = GameState::new(1);
        for _ in 0..MAX_PARTICLES {
            state.spawn_shockwave(Vec2::ZERO, Tint::Fever);
        }
        state.spawn_impact(Vec2::ZERO, Tint::Head);
        assert_eq!(state.particles.len(), MAX_PARTICLES);
    }
}
