// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deuce Poker hand evaluator.
//!
//! Poker hand evaluator for hands with 5 or more cards, the evaluator finds the
//! best 5 cards subset and returns a [HandValue] with the hand category, the
//! five cards and a tie-break key, hand values are totally ordered:
//!
//! ```
//! # use deuce_eval::*;
//! let v1 = HandValue::eval(&parse_cards("As Ks Qs Js Ts 2h 3d").unwrap()).unwrap();
//! let v2 = HandValue::eval(&parse_cards("Ah 2h 3d 4c 5s 9h 9d").unwrap()).unwrap();
//! assert!(v1 > v2);
//! assert_eq!(v1.display_category(), HandCategory::RoyalFlush);
//! assert_eq!(v2.category(), HandCategory::Straight);
//! assert_eq!(v2.tie_break(), &[5]);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{EvalError, HandCategory, HandValue};

pub mod strength;
pub use strength::{hand_strength, preflop_score, preflop_strength};

// Reexport cards types.
pub use deuce_cards::{Card, CardsError, Deck, Rank, Suit, parse_cards};
