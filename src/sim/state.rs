//! In-flight wager state
//!
//! One `Ball` per accepted drop. The session owns balls exclusively while
//! they are active; external collaborators only ever see `BallSnapshot`s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::RiskLevel;

/// Flash duration after a pin hit (render feedback only)
pub const PIN_FLASH_TICKS: u32 = 10;
/// Flash duration after a wall hit
pub const WALL_FLASH_TICKS: u32 = 5;

/// A ball in flight, carrying its reserved wager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Wager reserved at drop time; fixed for the ball's lifetime
    pub bet: f64,
    /// Risk level selected at drop time; scales the centering bias
    pub risk: RiskLevel,
    /// RGB color hint for renderers
    pub color: (u8, u8, u8),
    /// Cleared exactly once, at settlement. A settled ball keeps falling
    /// until the session removes it.
    pub active: bool,
    /// Ticks since the last registered pin collision. Pin hits are
    /// suppressed until this exceeds the cooldown threshold, so one
    /// physical contact is never double-counted across ticks.
    pub ticks_since_collision: u32,
    /// Collision flash countdown, render feedback only
    pub flash_ticks: u32,
}

impl Ball {
    pub fn snapshot(&self) -> BallSnapshot {
        BallSnapshot {
            id: self.id,
            x: self.pos.x,
            y: self.pos.y,
            radius: self.radius,
            color: self.color,
            flash_ticks: self.flash_ticks,
        }
    }
}

/// Read-only view of a ball for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: (u8, u8, u8),
    pub flash_ticks: u32,
}

/// Emitted when a ball lands in a payout slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettlementEvent {
    pub ball_id: u32,
    /// Index into the board's slot row / multiplier table
    pub slot_index: usize,
    /// The wager the ball carried
    pub bet: f64,
    /// Winnings, already rounded to cents
    pub amount: f64,
}
