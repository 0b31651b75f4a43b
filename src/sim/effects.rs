//! Visual effects: debris particles and win-screen fireworks
//!
//! Effects never affect gameplay, but they draw from the session RNG so a
//! seeded run replays identically.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::consts::*;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// Radius; shrinks every tick and the particle dies at zero
    pub size: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.size -= PARTICLE_DECAY;
    }

    pub fn is_dead(&self) -> bool {
        self.size <= 0.0
    }
}

/// Shape of a particle burst
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub count: usize,
    pub color: Color,
    pub min_size: f32,
    pub max_size: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub gravity: f32,
}

impl Burst {
    /// Sparks where a ball hits a wall or the paddle
    pub fn sparks() -> Self {
        Self {
            count: 5,
            color: Color::YELLOW,
            min_size: 1.0,
            max_size: 3.0,
            min_speed: 1.0,
            max_speed: 3.0,
            gravity: 0.0,
        }
    }

    /// Falling debris from a brick
    pub fn debris(count: usize, color: Color, max: f32) -> Self {
        Self {
            count,
            color,
            min_size: 1.0,
            max_size: max,
            min_speed: 1.0,
            max_speed: max,
            gravity: DEBRIS_GRAVITY,
        }
    }

    /// Spawn the burst at `origin`, each particle flying in a random direction
    pub fn spawn(&self, rng: &mut Pcg32, origin: Vec2) -> Vec<Particle> {
        (0..self.count)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let speed = rng.random_range(self.min_speed..=self.max_speed);
                let size = rng.random_range(self.min_size..=self.max_size);
                Particle {
                    pos: origin,
                    vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                    color: self.color,
                    size,
                    gravity: self.gravity,
                }
            })
            .collect()
    }
}

/// Append a burst to `particles`, dropping whatever doesn't fit under `cap`
pub fn emit(particles: &mut Vec<Particle>, cap: usize, rng: &mut Pcg32, origin: Vec2, burst: Burst) {
    let room = cap.saturating_sub(particles.len());
    if room == 0 {
        return;
    }
    particles.extend(burst.spawn(rng, origin).into_iter().take(room));
}

/// A celebratory burst of colored particles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firework {
    pub pos: Vec2,
    pub particles: Vec<Particle>,
}

impl Firework {
    /// Explode at a random point in the upper part of the screen
    pub fn launch(rng: &mut Pcg32) -> Self {
        let pos = Vec2::new(
            rng.random_range(50.0..SCREEN_WIDTH - 50.0),
            rng.random_range(50.0..SCREEN_HEIGHT / 2.0),
        );
        let color = Color::rgb(
            rng.random_range(100..=255),
            rng.random_range(100..=255),
            rng.random_range(100..=255),
        );
        let burst = Burst {
            count: FIREWORK_PARTICLES,
            color,
            min_size: 2.0,
            max_size: 4.0,
            min_speed: 1.0,
            max_speed: 5.0,
            gravity: FIREWORK_GRAVITY,
        };
        let particles = burst.spawn(rng, pos);
        Self { pos, particles }
    }

    pub fn update(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.update();
        }
        self.particles.retain(|p| !p.is_dead());
    }

    pub fn is_dead(&self) -> bool {
        self.particles.is_empty()
    }
}
