//! Plinko - a headless casino Plinko simulation engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (board layout, ball physics, payout resolution)
//! - `ledger`: Player balance with debit/credit rules
//! - `settings`: Explicit configuration passed into the session (no globals)
//!
//! The engine is frame-driven: one `Session::tick()` per fixed timestep.
//! All randomness flows through a seeded `rand_pcg::Pcg32`, so a session
//! constructed with a fixed seed replays identically. That makes the crate
//! usable both headlessly (fairness testing, RTP measurement) and with a
//! renderer attached that only reads `BallSnapshot`s.

pub mod ledger;
pub mod settings;
pub mod sim;

pub use ledger::Ledger;
pub use settings::{BallSkin, BoardConfig, PhysicsParams, RiskLevel, SessionConfig};

/// Simulation tuning constants
///
/// These are the reference values; `PhysicsParams` and `BoardConfig`
/// default to them but everything is overridable per session.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.3;
    /// Per-tick gravity jitter magnitude (simulated air resistance)
    pub const GRAVITY_JITTER: f32 = 0.02;
    /// Vertical speed cap, prevents tunneling through pins
    pub const MAX_FALL_SPEED: f32 = 5.5;
    /// Horizontal drag factor applied while |dx| exceeds DRAG_THRESHOLD
    pub const HORIZONTAL_DRAG: f32 = 0.99;
    pub const DRAG_THRESHOLD: f32 = 0.1;

    /// Velocity kept after a pin bounce (inelastic reflection)
    pub const BOUNCE_DAMPING: f32 = 0.7;
    /// Ticks that must elapse before the same ball can register another pin hit
    pub const COLLISION_COOLDOWN_TICKS: u32 = 3;
    /// Minimum pin-to-ball distance used in the normal calculation
    pub const MIN_SEPARATION: f32 = 0.1;
    /// Penetration push-out overshoot so balls do not re-stick to a pin
    pub const PUSH_OUT: f32 = 1.05;
    /// Cap on the impact-scaled random deflection after a pin bounce
    pub const MAX_DEFLECTION: f32 = 0.3;
    /// Fraction of impact speed converted into deflection range
    pub const DEFLECTION_PER_SPEED: f32 = 0.04;
    /// Post-bounce speed floor; a ball must never come to rest mid-board
    pub const MIN_BOUNCE_SPEED: f32 = 1.6;

    /// Horizontal velocity kept after a wall bounce
    pub const WALL_ELASTICITY: f32 = 0.75;
    /// Per-tick uniform horizontal nudge magnitude
    pub const TICK_JITTER: f32 = 0.01;
    /// Distance from center at which the centering bias reaches full strength
    pub const CENTER_BIAS_RANGE: f32 = 100.0;

    /// Board geometry defaults
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 600.0;
    pub const PIN_ROWS: usize = 16;
    pub const PIN_RADIUS: f32 = 5.0;
    pub const V_SPACING: f32 = 30.0;
    pub const H_SPACING: f32 = 30.0;
    /// Y of the topmost pin row
    pub const PINS_START_Y: f32 = 100.0;
    /// Slot row sits one v-spacing below the bottom pins, raised by this
    /// margin so a ball cannot cross the row untested
    pub const SLOT_OVERLAP_MARGIN: f32 = 15.0;
    pub const SLOT_HEIGHT: f32 = 35.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 9.5;
    /// Y at which new balls spawn, above the first pin row
    pub const DROP_Y: f32 = 70.0;
    /// Initial downward speed of a dropped ball
    pub const DROP_SPEED: f32 = 2.0;
    /// Random horizontal offset range around board center at drop
    pub const DROP_OFFSET: f32 = 20.0;
    /// Initial horizontal velocity range
    pub const DROP_DRIFT: f32 = 0.8;
    /// Narrowed horizontal velocity range with the lucky charm active
    pub const DROP_DRIFT_LUCKY: f32 = 0.5;
}

/// Round a monetary amount to cents
///
/// Applied after every ledger mutation and when computing winnings, so
/// balances never accumulate sub-cent drift.
#[inline]
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(3.14159), 3.14);
        assert_eq!(round_to_cents(10.0 * 0.3), 3.0);
        assert_eq!(round_to_cents(0.005), 0.01);
        assert_eq!(round_to_cents(-1.005), -1.0); // f64 0.005 rounds toward the stored value
        assert_eq!(round_to_cents(0.0), 0.0);
    }
}
