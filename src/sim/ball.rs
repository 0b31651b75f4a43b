//! Ball physics
//!
//! The ball handles its own wall and paddle contacts. Bricks live in the shared
//! collection owned by the session, so brick hits are resolved by the caller,
//! which then asks the ball to bounce.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, circle_rect_overlap};
use super::paddle::Paddle;
use crate::consts::*;

/// Outcome of a ball update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallStatus {
    /// Riding on the paddle, waiting for launch input
    Glued,
    /// Free-moving inside the playfield
    Active,
    /// Fell below the screen; the caller removes it
    Lost,
}

/// Surface the ball bounced off during an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Wall,
    Paddle,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub is_glued: bool,
    /// Horizontal offset from paddle center while glued
    pub glue_offset: f32,
    /// Velocity at the moment the ball got glued, restored on release
    pub stored_vel: Option<Vec2>,
    /// Remaining slow-motion ticks
    pub slow_ticks: u32,
}

impl Ball {
    /// A ball resting on the middle of the paddle
    pub fn glued_to(paddle: &Paddle) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            is_glued: true,
            glue_offset: 0.0,
            stored_vel: None,
            slow_ticks: 0,
        };
        ball.follow(paddle);
        ball
    }

    /// A free ball at `pos` moving with `vel`
    pub fn free(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
            is_glued: false,
            glue_offset: 0.0,
            stored_vel: None,
            slow_ticks: 0,
        }
    }

    pub fn is_slowed(&self) -> bool {
        self.slow_ticks > 0
    }

    /// Circle overlap test against a rectangle (bricks, paddle)
    pub fn overlaps(&self, rect: &Rect) -> bool {
        circle_rect_overlap(self.pos, self.radius, rect)
    }

    /// Reflect vertical velocity after a brick hit reported by the caller
    pub fn bounce_vertical(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Start (or restart) the slow-motion window
    pub fn activate_slow(&mut self) {
        self.slow_ticks = BALL_SLOW_TICKS;
    }

    /// Position the ball where it rests on the paddle
    pub fn follow(&mut self, paddle: &Paddle) {
        let half = paddle.width / 2.0;
        self.glue_offset = self.glue_offset.clamp(-half, half);
        self.pos = Vec2::new(paddle.center_x() + self.glue_offset, paddle.y - self.radius);
        self.vel = Vec2::ZERO;
    }

    /// Put the ball back on the middle of the paddle, dropping all modifiers
    pub fn reset(&mut self, paddle: &Paddle) {
        self.is_glued = true;
        self.glue_offset = 0.0;
        self.stored_vel = None;
        self.slow_ticks = 0;
        self.follow(paddle);
    }

    /// Unglue and restore velocity
    ///
    /// A stored pre-glue velocity is reused pointing upward; otherwise the ball
    /// leaves at the default speed, toward the side it sits on.
    pub fn release(&mut self) {
        if !self.is_glued {
            return;
        }
        self.is_glued = false;
        self.vel = match self.stored_vel.take() {
            Some(v) if v.x != 0.0 || v.y != 0.0 => Vec2::new(v.x, -v.y.abs().max(1.0)),
            _ => {
                let dir = if self.glue_offset < 0.0 { -1.0 } else { 1.0 };
                Vec2::new(dir * BALL_BASE_SPEED, -BALL_BASE_SPEED)
            }
        };
    }

    fn glue(&mut self, paddle: &Paddle) {
        self.stored_vel = Some(self.vel);
        self.glue_offset = self.pos.x - paddle.center_x();
        self.is_glued = true;
        self.follow(paddle);
    }

    /// Advance one tick
    pub fn update(&mut self, paddle: &Paddle, launch: bool) -> (BallStatus, Option<Collision>) {
        if self.is_glued {
            self.follow(paddle);
            if !launch {
                return (BallStatus::Glued, None);
            }
            self.release();
            return (BallStatus::Active, None);
        }

        let factor = if self.slow_ticks > 0 {
            self.slow_ticks -= 1;
            BALL_SLOW_FACTOR
        } else {
            1.0
        };
        self.pos += self.vel * factor;

        let mut hit = None;

        if self.pos.x - self.radius <= 0.0 {
            self.pos.x = self.radius;
            self.vel.x = self.vel.x.abs();
            hit = Some(Collision::Wall);
        } else if self.pos.x + self.radius >= SCREEN_WIDTH {
            self.pos.x = SCREEN_WIDTH - self.radius;
            self.vel.x = -self.vel.x.abs();
            hit = Some(Collision::Wall);
        }

        if self.pos.y - self.radius <= 0.0 {
            self.pos.y = self.radius;
            self.vel.y = self.vel.y.abs();
            hit = Some(Collision::Wall);
        }

        // Only descending balls can hit the paddle (prevents sticking inside it)
        if self.vel.y > 0.0 && self.overlaps(&paddle.rect()) {
            let offset = ((self.pos.x - paddle.center_x()) / (paddle.width / 2.0)).clamp(-1.0, 1.0);
            self.vel.y = -self.vel.y.abs();
            self.vel.x = (self.vel.x + offset * BALL_ENGLISH).clamp(-BALL_MAX_SPEED_X, BALL_MAX_SPEED_X);
            self.pos.y = paddle.y - self.radius;
            hit = Some(Collision::Paddle);

            if paddle.has_glue {
                self.glue(paddle);
            }
        }

        if self.pos.y - self.radius > SCREEN_HEIGHT {
            return (BallStatus::Lost, hit);
        }

        (BallStatus::Active, hit)
    }
}
