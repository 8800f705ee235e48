// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deuce Poker core types for betting rounds and pots.
//!
//! A hand is driven by the caller: each betting round starts a new
//! [BettingRound](betting::BettingRound), player actions go through
//! [process_action](betting::BettingRound::process_action) and the chips paid
//! go to the hand [Pot](pot::Pot):
//!
//! ```
//! # use deuce_core::{betting::BettingRound, poker::*, pot::Pot};
//! let mut players = vec![
//!     Player::new(PlayerId::new(1), "alice", Chips::new(1_000)),
//!     Player::new(PlayerId::new(2), "bob", Chips::new(1_000)),
//! ];
//!
//! let mut pot = Pot::new();
//! let mut round = BettingRound::start(&mut players, Chips::new(20));
//! let (alice, bob) = (PlayerId::new(1), PlayerId::new(2));
//!
//! let paid = round.post_blind(&mut players, alice, PlayerAction::SmallBlind, Chips::new(10)).unwrap();
//! pot.add_contribution(alice, paid);
//! let paid = round.post_blind(&mut players, bob, PlayerAction::BigBlind, Chips::new(20)).unwrap();
//! pot.add_contribution(bob, paid);
//!
//! let paid = round.process_action(&mut players, alice, PlayerAction::Call, Chips::ZERO).unwrap();
//! pot.add_contribution(alice, paid);
//! assert!(!round.is_complete(&players));
//!
//! round.process_action(&mut players, bob, PlayerAction::Check, Chips::ZERO).unwrap();
//! assert!(round.is_complete(&players));
//! assert_eq!(pot.total(), Chips::new(40));
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod betting;
pub mod poker;
pub mod pot;

#[cfg(feature = "eval")]
pub mod showdown;
