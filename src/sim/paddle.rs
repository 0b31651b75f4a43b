//! The player's paddle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entities::PowerUpKind;
use crate::consts::*;

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub base_width: f32,
    /// Laser modifier: fire input spawns laser pairs
    pub has_laser: bool,
    /// Glue modifier: balls stick on contact
    pub has_glue: bool,
}

impl Default for Paddle {
    fn default() -> Self {
        let mut paddle = Self {
            x: 0.0,
            y: SCREEN_HEIGHT - PADDLE_BOTTOM_MARGIN,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            base_width: PADDLE_WIDTH,
            has_laser: false,
            has_glue: false,
        };
        paddle.recenter();
        paddle
    }
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Midpoint of the top edge, where glued balls and lasers originate
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.y)
    }

    /// Move by `axis` (-1.0 left .. 1.0 right) and keep inside the screen
    pub fn update(&mut self, axis: f32) {
        self.x += axis.clamp(-1.0, 1.0) * PADDLE_SPEED;
        self.clamp_to_screen();
    }

    /// Apply a paddle modifier. Kinds that don't affect the paddle are ignored.
    pub fn activate_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Grow => {
                let center = self.center_x();
                self.width = (self.width * PADDLE_GROW_FACTOR)
                    .min(self.base_width * PADDLE_MAX_GROW);
                self.x = center - self.width / 2.0;
                self.clamp_to_screen();
            }
            PowerUpKind::Laser => self.has_laser = true,
            PowerUpKind::Glue => self.has_glue = true,
            PowerUpKind::Slow | PowerUpKind::MultiBall | PowerUpKind::LifeUp => {}
        }
    }

    /// Clear all modifiers, restore base width and recenter
    pub fn reset(&mut self) {
        self.width = self.base_width;
        self.has_laser = false;
        self.has_glue = false;
        self.recenter();
    }

    fn recenter(&mut self) {
        self.x = (SCREEN_WIDTH - self.width) / 2.0;
    }

    fn clamp_to_screen(&mut self) {
        self.x = self.x.clamp(0.0, SCREEN_WIDTH - self.width);
    }
}
