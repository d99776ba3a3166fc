//! Session orchestration
//!
//! The session is the sole owner and mutator of the active-ball set, the
//! board, and the ledger. External collaborators issue `request_drop`,
//! drive `tick`, and read snapshots; they never touch simulation state
//! directly. Drops are serialized with ticks by construction, since both
//! take `&mut self` on a single-threaded owner.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::board::{Board, MultiplierTable};
use super::physics;
use super::state::{Ball, BallSnapshot, SettlementEvent};
use crate::consts::{DROP_DRIFT, DROP_DRIFT_LUCKY, DROP_OFFSET, DROP_SPEED, DROP_Y};
use crate::ledger::Ledger;
use crate::settings::{RiskLevel, SessionConfig};

/// Synchronous settlement observer, fired from within `tick`
pub type SettlementCallback = Box<dyn FnMut(f64)>;

/// One player's Plinko session: board, ledger, and in-flight balls
pub struct Session {
    config: SessionConfig,
    board: Board,
    ledger: Ledger,
    balls: Vec<Ball>,
    rng: Pcg32,
    tick_count: u64,
    next_ball_id: u32,
    on_settlement: Option<SettlementCallback>,
}

impl Session {
    /// Create a session with the default multiplier table
    pub fn new(config: SessionConfig, seed: u64) -> Self {
        Self::with_multipliers(config, MultiplierTable::default(), seed)
    }

    pub fn with_multipliers(
        config: SessionConfig,
        multipliers: MultiplierTable,
        seed: u64,
    ) -> Self {
        let board = Board::generate(&config.board, multipliers);
        let ledger = Ledger::new(config.starting_balance);
        log::info!(
            "session start: seed {seed}, balance {:.2}, {} slots",
            ledger.balance(),
            board.slots.len()
        );
        Self {
            config,
            board,
            ledger,
            balls: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tick_count: 0,
            next_ball_id: 1,
            on_settlement: None,
        }
    }

    /// Register a synchronous settlement observer
    pub fn set_on_settlement(&mut self, callback: SettlementCallback) {
        self.on_settlement = Some(callback);
    }

    /// Attempt to drop a ball carrying `bet` at the given risk level
    ///
    /// Debit happens before the ball is created, so a ball can never exist
    /// without its wager reserved. Returns whether the drop was accepted;
    /// rejection mutates nothing.
    pub fn request_drop(&mut self, bet: f64, risk: RiskLevel) -> bool {
        if !self.ledger.try_debit(bet) {
            log::debug!(
                "drop rejected: bet {bet:.2} against balance {:.2}",
                self.ledger.balance()
            );
            return false;
        }

        let drift = if self.config.lucky_charm {
            DROP_DRIFT_LUCKY
        } else {
            DROP_DRIFT
        };
        let x = self.board.center_x() + self.rng.random_range(-DROP_OFFSET..=DROP_OFFSET);
        let dx = self.rng.random_range(-drift..=drift);
        let color = self.config.ball_skin.color(&mut self.rng);

        let id = self.next_ball_id;
        self.next_ball_id += 1;
        self.balls.push(Ball {
            id,
            pos: Vec2::new(x, DROP_Y),
            vel: Vec2::new(dx, DROP_SPEED),
            radius: crate::consts::BALL_RADIUS,
            bet,
            risk,
            color,
            active: true,
            ticks_since_collision: 0,
            flash_ticks: 0,
        });
        log::debug!("ball {id} dropped: bet {bet:.2}, risk {}", risk.as_str());
        true
    }

    /// Advance the simulation one fixed timestep
    ///
    /// Steps every ball in insertion order, credits settlements, and
    /// removes settled and out-of-bounds balls after the full pass so
    /// removal never disturbs this tick's iteration. Settlement events
    /// are returned and also forwarded to the registered callback.
    pub fn tick(&mut self) -> Vec<SettlementEvent> {
        self.tick_count += 1;
        let mut events = Vec::new();
        let mut removed = Vec::new();

        for ball in &mut self.balls {
            if let Some(event) =
                physics::step(ball, &self.board, &self.config.physics, &mut self.rng)
            {
                self.ledger.credit(event.amount);
                log::debug!(
                    "ball {} settled in slot {} for {:.2} (bet {:.2})",
                    event.ball_id,
                    event.slot_index,
                    event.amount,
                    event.bet
                );
                if let Some(callback) = &mut self.on_settlement {
                    callback(event.amount);
                }
                events.push(event);
                removed.push(ball.id);
            } else if ball.pos.y > self.board.height {
                // Fallback safety net; a correctly configured board
                // settles every ball before it can fall out.
                if ball.active {
                    log::warn!("ball {} left the board unsettled", ball.id);
                }
                removed.push(ball.id);
            }
        }

        if !removed.is_empty() {
            self.balls.retain(|b| !removed.contains(&b.id));
        }
        events
    }

    /// Read-only snapshots of in-flight balls, in insertion order
    pub fn active_balls(&self) -> Vec<BallSnapshot> {
        self.balls.iter().map(Ball::snapshot).collect()
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    pub fn balance(&self) -> f64 {
        self.ledger.balance()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Board layout for rendering and hit-zone visualization
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Regenerate the board for a new play-area size
    ///
    /// The board is pure geometry, so resizing replaces it wholesale.
    /// In-flight balls keep simulating against the new layout.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.board.width = width;
        self.config.board.height = height;
        self.board = Board::generate(&self.config.board, self.board.multipliers.clone());
        log::info!("board regenerated for {width}x{height}");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("balance", &self.ledger.balance())
            .field("balls", &self.balls.len())
            .field("tick_count", &self.tick_count)
            .finish()
    }
}
