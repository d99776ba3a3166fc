//! Headless fairness harness
//!
//! Drops a batch of wagers through the simulation with a fixed seed and
//! reports the slot histogram and return-to-player. Useful for tuning the
//! physics parameters and for checking that risk levels shift the outcome
//! distribution without touching the payout table.
//!
//! Usage: `plinko [drops] [seed] [risk]` (defaults: 1000 drops, seed 42,
//! medium risk). `RUST_LOG=debug` traces individual settlements.

use plinko::settings::{RiskLevel, SessionConfig};
use plinko::sim::{Session, max_ticks_bound};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let drops: u32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let risk = args
        .next()
        .and_then(|s| RiskLevel::from_str(&s))
        .unwrap_or_default();

    let bet = 1.0;
    let config = SessionConfig {
        starting_balance: f64::from(drops) * bet,
        ..Default::default()
    };
    let mut session = Session::new(config, seed);
    let tick_budget = max_ticks_bound(session.board(), &SessionConfig::default().physics);

    log::info!("dropping {drops} balls at {} risk, seed {seed}", risk.as_str());

    let slot_count = session.board().slots.len();
    let mut histogram = vec![0u32; slot_count];
    let mut total_won = 0.0f64;
    let mut unsettled = 0u32;

    for _ in 0..drops {
        if !session.request_drop(bet, risk) {
            log::error!("drop rejected at balance {:.2}", session.balance());
            break;
        }
        let mut settled = false;
        for _ in 0..tick_budget {
            for event in session.tick() {
                histogram[event.slot_index] += 1;
                total_won += event.amount;
                settled = true;
            }
            if session.ball_count() == 0 {
                break;
            }
        }
        if !settled {
            unsettled += 1;
        }
    }

    let wagered = f64::from(drops) * bet;
    println!("slot histogram ({} slots):", slot_count);
    for (i, count) in histogram.iter().enumerate() {
        let multiplier = session.board().multipliers.get(i).unwrap_or(0.0);
        let share = f64::from(*count) / f64::from(drops) * 100.0;
        println!("  [{i:>2}] x{multiplier:<5} {count:>6}  {share:5.2}%");
    }
    println!("wagered: {wagered:.2}");
    println!("returned: {total_won:.2}");
    println!("rtp: {:.2}%", total_won / wagered * 100.0);
    println!("final balance: {:.2}", session.balance());
    if unsettled > 0 {
        println!("warning: {unsettled} balls left the board unsettled");
    }
}
