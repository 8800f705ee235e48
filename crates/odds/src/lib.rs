// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deuce Poker equity and outs estimator.
//!
//! The [Estimator] runs Monte Carlo simulations to estimate the win, tie, and
//! lose rates of a hand against a number of opponents:
//!
//! ```
//! # use deuce_odds::*;
//! # use deuce_cards::parse_cards;
//! let hole = parse_cards("Ah Kh").unwrap();
//! let board = parse_cards("7h 2h 9c").unwrap();
//!
//! let estimate = Estimator::new(1_000)
//!     .with_tasks(2)
//!     .with_seed(42)
//!     .estimate_equity(&hole, &board, 1, Some(CallCost { pot: 100, call: 20 }))
//!     .unwrap();
//!
//! assert_eq!(estimate.trials(), 1_000);
//! assert!(estimate.win_rate > estimate.lose_rate);
//! assert!(estimate.outs.iter().any(|o| o.target == OutsTarget::Flush));
//! ```
//!
//! Outs are estimated with the rule of 4 and 2, see [compute_outs].
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod equity;
pub use equity::{
    CallCost, EquityCounts, EquityEstimate, Estimator, OddsError, expected_value, pot_odds,
};

mod outs;
pub use outs::{Outs, OutsTarget, compute_outs, rule_of_four_two};
