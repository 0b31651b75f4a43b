//! Game session state and core simulation types
//!
//! `GameSession` is the single owner of every entity collection and counter.
//! Everything that mutates it lives here or in `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::Rect;
use super::effects::{Burst, Firework, Particle, emit};
use super::entities::{Brick, Laser, PowerUp, PowerUpKind};
use super::levels::LevelSet;
use super::paddle::Paddle;
use crate::consts::*;

/// Clickable mute toggle in the top bar
pub const MUTE_BUTTON: Rect = Rect::new(350.0, 10.0, 70.0, 30.0);

/// Default particle cap when no settings are applied
pub const MAX_PARTICLES: usize = 500;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start input
    TitleScreen,
    /// Active gameplay
    Playing,
    /// Out of lives
    GameOver,
    /// Every level cleared
    YouWin,
}

/// Something that happened during the last tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    /// Ball bounced off a wall or the paddle
    BallBounced,
    BrickDestroyed,
    PowerUpCollected(PowerUpKind),
    LaserFired,
    LifeLost,
    /// A new level's wall was built (1-based)
    LevelStarted(u32),
    GameOver,
    Won,
    MuteToggled(bool),
}

/// Complete game session (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// 1-based level number
    pub current_level: u32,
    pub muted: bool,
    /// Transient banner text and its remaining ticks
    pub message: String,
    pub message_ticks: u32,
    /// Ticks until the next firework in the win state
    pub firework_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks spent in the current phase
    pub phase_ticks: u64,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    pub lasers: Vec<Laser>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub fireworks: Vec<Firework>,
    /// Particle cap (from quality settings)
    pub max_particles: usize,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
    levels: LevelSet,
}

impl GameSession {
    /// Create a session on the title screen with the built-in levels
    pub fn new(seed: u64) -> Self {
        Self::with_levels(seed, LevelSet::default())
    }

    pub fn with_levels(seed: u64, levels: LevelSet) -> Self {
        let paddle = Paddle::default();
        let ball = Ball::glued_to(&paddle);
        let bricks = levels.build_wall(1);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::TitleScreen,
            score: 0,
            lives: STARTING_LIVES,
            current_level: 1,
            muted: false,
            message: String::new(),
            message_ticks: 0,
            firework_ticks: 0,
            time_ticks: 0,
            phase_ticks: 0,
            paddle,
            balls: vec![ball],
            bricks,
            power_ups: Vec::new(),
            lasers: Vec::new(),
            particles: Vec::new(),
            fireworks: Vec::new(),
            max_particles: MAX_PARTICLES,
            events: Vec::new(),
            levels,
        }
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    /// Back to the title screen with a fresh score, lives, level and entities
    pub fn restart(&mut self) {
        self.paddle.reset();
        self.balls = vec![Ball::glued_to(&self.paddle)];
        self.bricks = self.levels.build_wall(1);
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.current_level = 1;
        self.power_ups.clear();
        self.lasers.clear();
        self.particles.clear();
        self.fireworks.clear();
        self.message.clear();
        self.message_ticks = 0;
        self.firework_ticks = 0;
        self.set_phase(GamePhase::TitleScreen);
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.phase_ticks = 0;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    /// Show a banner for the standard duration, replacing any current one
    pub fn show_message(&mut self, text: impl Into<String>) {
        self.message = text.into();
        self.message_ticks = MESSAGE_TICKS;
    }

    /// Banner text if one is still showing
    pub fn active_message(&self) -> Option<&str> {
        (self.message_ticks > 0).then_some(self.message.as_str())
    }

    pub fn emit_particles(&mut self, origin: Vec2, burst: Burst) {
        emit(&mut self.particles, self.max_particles, &mut self.rng, origin, burst);
    }

    /// Fresh round after a life loss: one glued ball, paddle back to base
    pub fn spawn_round(&mut self) {
        self.paddle.reset();
        self.balls.push(Ball::glued_to(&self.paddle));
    }

    /// Release the first glued ball, if any
    pub fn release_first_glued(&mut self) -> bool {
        match self.balls.iter_mut().find(|b| b.is_glued) {
            Some(ball) => {
                ball.release();
                true
            }
            None => false,
        }
    }

    /// Spawn a laser pair from the paddle top
    pub fn fire_lasers(&mut self) {
        let origin = self.paddle.top_center();
        self.lasers.push(Laser::new(origin - Vec2::new(LASER_SPREAD, 0.0)));
        self.lasers.push(Laser::new(origin + Vec2::new(LASER_SPREAD, 0.0)));
        self.events.push(GameEvent::LaserFired);
    }

    /// Score a removed brick: points, debris, and a chance of a power-up drop
    pub fn reward_brick(&mut self, brick: &Brick, debris: Burst) {
        self.score += BRICK_SCORE;
        let center = brick.rect.center();
        self.emit_particles(center, debris);
        self.events.push(GameEvent::BrickDestroyed);

        if self.rng.random_bool(POWER_UP_DROP_CHANCE) {
            let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
            self.power_ups.push(PowerUp::new(kind, center));
        }
    }

    /// Apply a collected power-up and show its banner
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        log::debug!("Power-up collected: {:?}", kind);
        self.show_message(kind.message());
        self.events.push(GameEvent::PowerUpCollected(kind));

        match kind {
            PowerUpKind::Grow | PowerUpKind::Laser | PowerUpKind::Glue => {
                self.paddle.activate_power_up(kind);
            }
            PowerUpKind::Slow => {
                for ball in self.balls.iter_mut() {
                    ball.activate_slow();
                }
            }
            PowerUpKind::MultiBall => {
                let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
                for _ in 0..2 {
                    let sx = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
                    let sy = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
                    let vel = Vec2::new(sx * BALL_BASE_SPEED, sy * BALL_BASE_SPEED);
                    self.balls.push(Ball::free(center, vel));
                }
            }
            PowerUpKind::LifeUp => {
                self.lives += 1;
            }
        }
    }

    /// Advance past a cleared wall: next level, or the win screen after the last
    pub fn advance_level(&mut self) {
        let next = self.current_level + 1;
        if next as usize > self.levels.len() {
            log::info!("Final level {} cleared, score {}", self.current_level, self.score);
            self.events.push(GameEvent::Won);
            self.set_phase(GamePhase::YouWin);
            return;
        }

        self.current_level = next;
        self.bricks = self.levels.build_wall(next);
        log::info!("Level {}: {} bricks", next, self.bricks.len());
        self.paddle.reset();
        for ball in self.balls.iter_mut() {
            ball.reset(&self.paddle);
        }
        self.power_ups.clear();
        self.lasers.clear();
        self.show_message(format!("LEVEL {}!", next));
        self.events.push(GameEvent::LevelStarted(next));
    }

    /// Toggle mute (the audio layer reacts to the event)
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.events.push(GameEvent::MuteToggled(self.muted));
    }
}
