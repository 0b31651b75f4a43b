//! Bricks, falling power-ups and lasers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::Color;
use crate::consts::*;

/// A brick (single hit destroys it)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub color: Color,
}

impl Brick {
    pub fn new(rect: Rect, color: Color) -> Self {
        Self { rect, color }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Grow,
    Laser,
    Glue,
    Slow,
    MultiBall,
    LifeUp,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Grow,
        PowerUpKind::Laser,
        PowerUpKind::Glue,
        PowerUpKind::Slow,
        PowerUpKind::MultiBall,
        PowerUpKind::LifeUp,
    ];

    /// Banner shown when the power-up is collected
    pub fn message(&self) -> &'static str {
        match self {
            PowerUpKind::Grow => "Paddle Grow!",
            PowerUpKind::Laser => "Lasers Activated! Press F to fire",
            PowerUpKind::Glue => "Glue Paddle! Press SPACE to launch",
            PowerUpKind::Slow => "Slow Ball!",
            PowerUpKind::MultiBall => "Multi-Ball!",
            PowerUpKind::LifeUp => "Extra Life!",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            PowerUpKind::Grow => Color::rgb(0, 0, 255),
            PowerUpKind::Laser => Color::rgb(255, 0, 0),
            PowerUpKind::Glue => Color::rgb(0, 255, 0),
            PowerUpKind::Slow => Color::rgb(255, 165, 0),
            PowerUpKind::MultiBall => Color::rgb(255, 0, 255),
            PowerUpKind::LifeUp => Color::rgb(0, 255, 255),
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Center position
    pub pos: Vec2,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self { kind, pos }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, POWER_UP_WIDTH, POWER_UP_HEIGHT)
    }

    pub fn update(&mut self) {
        self.pos.y += POWER_UP_SPEED;
    }

    /// Entirely below the bottom edge
    pub fn is_off_screen(&self) -> bool {
        self.rect().top() > SCREEN_HEIGHT
    }
}

/// A paddle-fired projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    /// Bottom-center of the beam
    pub pos: Vec2,
}

impl Laser {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x - LASER_WIDTH / 2.0,
            self.pos.y - LASER_HEIGHT,
            LASER_WIDTH,
            LASER_HEIGHT,
        )
    }

    pub fn update(&mut self) {
        self.pos.y -= LASER_SPEED;
    }

    /// Entirely above the top edge
    pub fn is_off_screen(&self) -> bool {
        self.rect().bottom() < 0.0
    }
}
