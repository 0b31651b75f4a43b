//! Frame drawing
//!
//! `draw_frame` walks a `GameSession` and issues primitive draw calls against a
//! `Canvas`. The platform layer implements `Canvas`; nothing here knows about
//! windows, fonts or GPUs.

use glam::Vec2;

use crate::Color;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{GamePhase, GameSession, MUTE_BUTTON, Rect};

/// Text sizes, matching the three fonts the game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Title,
    Body,
    Small,
}

/// Where a text position sits relative to the rendered string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    Center,
}

/// Drawing capability provided by the platform
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn text(&mut self, text: &str, pos: Vec2, anchor: Anchor, size: TextSize, color: Color);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect(Rect, Color),
    Circle(Vec2, f32, Color),
    Text {
        text: String,
        pos: Vec2,
        anchor: Anchor,
        size: TextSize,
        color: Color,
    },
}

/// Canvas that records calls instead of drawing them
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame, keeping the allocation
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every text string drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect(rect, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle(center, radius, color));
    }

    fn text(&mut self, text: &str, pos: Vec2, anchor: Anchor, size: TextSize, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            anchor,
            size,
            color,
        });
    }
}

const CENTER: Vec2 = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
const LASER_COLOR: Color = Color::RED;

/// Draw one frame of `session`
pub fn draw_frame(canvas: &mut impl Canvas, session: &GameSession) {
    canvas.clear(Color::BACKGROUND);

    match session.phase {
        GamePhase::TitleScreen => draw_title(canvas),
        GamePhase::Playing => {
            draw_playfield(canvas, session);
            draw_hud(canvas, session);
        }
        GamePhase::GameOver | GamePhase::YouWin => draw_end_screen(canvas, session),
    }

    // Overlays shared by every phase
    if let Some(message) = session.active_message() {
        canvas.text(
            message,
            Vec2::new(CENTER.x, SCREEN_HEIGHT - 60.0),
            Anchor::Center,
            TextSize::Small,
            Color::WHITE,
        );
    }
    for p in &session.particles {
        canvas.fill_circle(p.pos, p.size, p.color);
    }
    draw_mute_button(canvas, session.muted);
}

fn draw_title(canvas: &mut impl Canvas) {
    canvas.text(
        "ARKANOID",
        CENTER - Vec2::new(0.0, 50.0),
        Anchor::Center,
        TextSize::Title,
        Color::WHITE,
    );
    canvas.text(
        "Press SPACE to Start",
        CENTER + Vec2::new(0.0, 20.0),
        Anchor::Center,
        TextSize::Body,
        Color::WHITE,
    );
}

fn draw_playfield(canvas: &mut impl Canvas, session: &GameSession) {
    canvas.fill_rect(session.paddle.rect(), Color::WHITE);
    for ball in &session.balls {
        canvas.fill_circle(ball.pos, ball.radius, Color::WHITE);
    }
    for brick in &session.bricks {
        canvas.fill_rect(brick.rect, brick.color);
    }
    for power_up in &session.power_ups {
        canvas.fill_rect(power_up.rect(), power_up.kind.color());
    }
    for laser in &session.lasers {
        canvas.fill_rect(laser.rect(), LASER_COLOR);
    }
}

fn draw_hud(canvas: &mut impl Canvas, session: &GameSession) {
    canvas.text(
        &format!("Score: {}", session.score),
        Vec2::new(10.0, 10.0),
        Anchor::TopLeft,
        TextSize::Body,
        Color::WHITE,
    );
    canvas.text(
        &format!("Lives: {}", session.lives),
        Vec2::new(SCREEN_WIDTH - 10.0, 10.0),
        Anchor::TopRight,
        TextSize::Body,
        Color::WHITE,
    );
    canvas.text(
        &format!("Level: {}", session.current_level),
        Vec2::new(10.0, 50.0),
        Anchor::TopLeft,
        TextSize::Body,
        Color::WHITE,
    );
}

fn draw_end_screen(canvas: &mut impl Canvas, session: &GameSession) {
    for firework in &session.fireworks {
        for p in &firework.particles {
            canvas.fill_circle(p.pos, p.size, p.color);
        }
    }

    let headline = if session.phase == GamePhase::GameOver {
        "GAME OVER"
    } else {
        "YOU WIN!"
    };
    let lines = [
        (headline.to_string(), -20.0),
        (format!("Final Score: {}", session.score), 0.0),
        ("Press SPACE to return to Title".to_string(), 30.0),
    ];
    for (text, dy) in &lines {
        canvas.text(text, CENTER + Vec2::new(0.0, *dy), Anchor::Center, TextSize::Body, Color::WHITE);
    }
}

fn draw_mute_button(canvas: &mut impl Canvas, muted: bool) {
    let (label, color) = if muted {
        ("UNMUTE", Color::GREEN)
    } else {
        ("MUTE", Color::RED)
    };
    canvas.fill_rect(MUTE_BUTTON, color);
    canvas.text(label, MUTE_BUTTON.center(), Anchor::Center, TextSize::Small, Color::WHITE);
}
