// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deuce Poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use deuce_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let td = "Td".parse::<Card>().unwrap();
//! assert!(ah > td);
//! assert_eq!(ah.rank().value(), 14);
//! ```
//!
//! and a [Deck] type for shuffling, dealing, and sampling cards in the deck.
//!
//! For example to sample 10 random 5-cards hands:
//!
//! ```
//! # use deuce_cards::Deck;
//! let mut counter = 0;
//! Deck::default().sample(&mut rand::rng(), 10, 5, |hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter += 1;
//! }).unwrap();
//! assert_eq!(counter, 10);
//! ```
//!
//! The **`parallel`** feature enables parallel sampling with a given number of
//! tasks, each task owns its random generator and the closure `task_id` can be
//! used to store per task data to reduce contention:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_sample() {
//! # use std::sync::atomic;
//! # use deuce_cards::{Deck, SampleOptions};
//! let counter = atomic::AtomicU64::new(0);
//! Deck::default()
//!     .par_sample(4, 40, 7, &SampleOptions::default(), |_task_id, hand| {
//!         assert_eq!(hand.len(), 7);
//!         counter.fetch_add(1, atomic::Ordering::Relaxed);
//!     })
//!     .unwrap();
//! assert_eq!(counter.load(atomic::Ordering::Relaxed), 40);
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, CardsError, Deck, Rank, Suit};

#[cfg(feature = "parallel")]
pub use deck::parallel::SampleOptions;

mod parse;
pub use parse::parse_cards;
