//! Brickfall - a paddle-and-ball brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `render`: Draw list handed to a platform canvas
//! - `audio`: Sound playback capability with a silent fallback
//! - `settings`: Data-driven configuration loaded at startup

pub mod audio;
pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{AudioError, ConfigError};
pub use settings::{QualityPreset, Settings};

use serde::{Deserialize, Serialize};

/// Game configuration constants
///
/// All speeds are in pixels per tick; the simulation never sees wall-clock time.
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds (used only by the frame loop)
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Distance from the bottom of the screen to the paddle top
    pub const PADDLE_BOTTOM_MARGIN: f32 = 30.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    pub const PADDLE_GROW_FACTOR: f32 = 1.5;
    pub const PADDLE_MAX_GROW: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 6.0;
    /// Horizontal speed added per unit of offset from paddle center
    pub const BALL_ENGLISH: f32 = 4.0;
    pub const BALL_MAX_SPEED_X: f32 = 10.0;
    pub const BALL_SLOW_FACTOR: f32 = 0.5;
    pub const BALL_SLOW_TICKS: u32 = 600;

    /// Brick wall layout
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const WALL_START_Y: f32 = 50.0;
    pub const BRICK_SCORE: u64 = 10;

    /// Power-ups
    pub const POWER_UP_WIDTH: f32 = 30.0;
    pub const POWER_UP_HEIGHT: f32 = 15.0;
    pub const POWER_UP_SPEED: f32 = 3.0;
    pub const POWER_UP_DROP_CHANCE: f64 = 0.3;

    /// Lasers
    pub const LASER_WIDTH: f32 = 4.0;
    pub const LASER_HEIGHT: f32 = 15.0;
    pub const LASER_SPEED: f32 = 10.0;
    /// Horizontal offset of each laser from the paddle center
    pub const LASER_SPREAD: f32 = 30.0;

    /// Particles
    pub const PARTICLE_DECAY: f32 = 0.1;
    pub const DEBRIS_GRAVITY: f32 = 0.05;
    pub const FIREWORK_GRAVITY: f32 = 0.05;
    pub const FIREWORK_PARTICLES: usize = 50;

    /// Session
    pub const STARTING_LIVES: u32 = 3;
    pub const MESSAGE_TICKS: u32 = 120;
    pub const FIREWORK_MIN_TICKS: u32 = 20;
    pub const FIREWORK_MAX_TICKS: u32 = 50;
}

/// RGB color tag carried by entities and handed to the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    /// Background (pygame's "grey12")
    pub const BACKGROUND: Color = Color::rgb(31, 31, 31);
}

/// Brick colors, cycled by row
pub const BRICK_COLORS: [Color; 4] = [
    Color::rgb(178, 34, 34),
    Color::rgb(255, 165, 0),
    Color::rgb(255, 215, 0),
    Color::rgb(50, 205, 50),
];
