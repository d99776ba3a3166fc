//! Round ledger
//!
//! Tracks the player balance across drops and settlements. Two rules are
//! enforced here and nowhere else: the balance never goes negative, and
//! every mutation is rounded to cents before it lands.

use serde::{Deserialize, Serialize};

use crate::round_to_cents;

/// Player balance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    balance: f64,
}

impl Ledger {
    pub fn new(starting_balance: f64) -> Self {
        Self {
            balance: round_to_cents(starting_balance.max(0.0)),
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Reserve a wager. Succeeds iff `0 < amount <= balance`; on failure
    /// nothing is mutated. Rejected bets are an expected outcome, not an
    /// error.
    ///
    /// Non-finite amounts are rejected outright: a NaN bet passes both
    /// ordering comparisons and would poison the balance for the rest of
    /// the session.
    #[must_use]
    pub fn try_debit(&mut self, amount: f64) -> bool {
        if !amount.is_finite() || amount <= 0.0 || amount > self.balance {
            return false;
        }
        self.balance = round_to_cents(self.balance - amount);
        true
    }

    /// Credit winnings. Settlement amounts are never negative since
    /// multipliers are non-negative; a negative amount is ignored rather
    /// than allowed to smuggle in an overdraft.
    pub fn credit(&mut self, amount: f64) {
        debug_assert!(amount >= 0.0, "settlement amounts are non-negative");
        if amount > 0.0 {
            self.balance = round_to_cents(self.balance + amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_debit_within_balance() {
        let mut ledger = Ledger::new(100.0);
        assert!(ledger.try_debit(40.0));
        assert_eq!(ledger.balance(), 60.0);
    }

    #[test]
    fn test_debit_exceeding_balance_rejected() {
        let mut ledger = Ledger::new(100.0);
        assert!(!ledger.try_debit(150.0));
        assert_eq!(ledger.balance(), 100.0);
    }

    #[test]
    fn test_zero_and_negative_bets_rejected() {
        let mut ledger = Ledger::new(100.0);
        assert!(!ledger.try_debit(0.0));
        assert!(!ledger.try_debit(-5.0));
        assert_eq!(ledger.balance(), 100.0);
    }

    #[test]
    fn test_non_finite_bets_rejected() {
        let mut ledger = Ledger::new(100.0);
        assert!(!ledger.try_debit(f64::NAN));
        assert!(!ledger.try_debit(f64::INFINITY));
        assert!(!ledger.try_debit(f64::NEG_INFINITY));
        assert_eq!(ledger.balance(), 100.0);
        // The ledger stays usable: later valid bets are still judged
        // against a finite balance.
        assert!(ledger.try_debit(10.0));
        assert_eq!(ledger.balance(), 90.0);
        assert!(!ledger.try_debit(1000.0));
    }

    #[test]
    fn test_exact_balance_bet_allowed() {
        let mut ledger = Ledger::new(25.0);
        assert!(ledger.try_debit(25.0));
        assert_eq!(ledger.balance(), 0.0);
    }

    #[test]
    fn test_credit_rounds_to_cents() {
        let mut ledger = Ledger::new(0.0);
        ledger.credit(3.333333);
        assert_eq!(ledger.balance(), 3.33);
    }

    #[test]
    fn test_negative_starting_balance_clamped() {
        let ledger = Ledger::new(-10.0);
        assert_eq!(ledger.balance(), 0.0);
    }

    proptest! {
        /// No sequence of debits may drive the balance negative.
        #[test]
        fn prop_never_negative(start in 0.0f64..1000.0, bets in prop::collection::vec(-50.0f64..500.0, 0..64)) {
            let mut ledger = Ledger::new(start);
            for bet in bets {
                let _ = ledger.try_debit(bet);
                prop_assert!(ledger.balance() >= 0.0);
            }
        }

        /// balance_after == balance_before - debits + credits, cent-rounded
        /// at each step. Rounding at each mutation means no drift beyond
        /// the final rounded value.
        #[test]
        fn prop_conservation(
            start in 0.0f64..1000.0,
            ops in prop::collection::vec((0.01f64..100.0, 0.0f64..200.0), 0..64),
        ) {
            let mut ledger = Ledger::new(start);
            let mut expected = ledger.balance();
            for (bet, win) in ops {
                let bet = crate::round_to_cents(bet);
                if ledger.try_debit(bet) {
                    expected = crate::round_to_cents(expected - bet);
                }
                let win = crate::round_to_cents(win);
                ledger.credit(win);
                expected = crate::round_to_cents(expected + win);
            }
            prop_assert!((ledger.balance() - expected).abs() < 1e-9);
        }
    }
}
