//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (speeds are per tick)
//! - Seeded RNG only
//! - Stable iteration order (collections are scanned front to back)
//! - No rendering, audio or platform dependencies

pub mod ball;
pub mod collision;
pub mod effects;
pub mod entities;
pub mod levels;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallStatus, Collision};
pub use collision::{Rect, circle_rect_overlap};
pub use effects::{Burst, Firework, Particle};
pub use entities::{Brick, Laser, PowerUp, PowerUpKind};
pub use levels::{LevelDef, LevelSet};
pub use paddle::Paddle;
pub use state::{GameEvent, GamePhase, GameSession, MUTE_BUTTON};
pub use tick::{TickInput, tick};
