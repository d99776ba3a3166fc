//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Balls processed in insertion order
//! - No rendering or platform dependencies

pub mod board;
pub mod physics;
pub mod session;
pub mod state;

pub use board::{Board, MultiplierTable, Slot};
pub use physics::{max_ticks_bound, step};
pub use session::{Session, SettlementCallback};
pub use state::{Ball, BallSnapshot, SettlementEvent};
