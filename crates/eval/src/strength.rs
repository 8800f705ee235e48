// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Coarse hand strength scores in the range `[0, 1)`.
//!
//! These scores are an input for heuristics and displays, hands must be
//! compared with [HandValue] ordering.
use deuce_cards::Card;

use crate::{HandCategory, HandValue};

/// Base score and the next category base score.
fn base_score(category: HandCategory) -> (f64, f64) {
    match category {
        HandCategory::HighCard => (0.0, 0.15),
        HandCategory::OnePair => (0.15, 0.30),
        HandCategory::TwoPair => (0.30, 0.45),
        HandCategory::ThreeOfAKind => (0.45, 0.55),
        HandCategory::Straight => (0.55, 0.65),
        HandCategory::Flush => (0.65, 0.75),
        HandCategory::FullHouse => (0.75, 0.88),
        HandCategory::FourOfAKind => (0.88, 0.95),
        HandCategory::StraightFlush => (0.95, 1.0),
        HandCategory::RoyalFlush => (1.0, 1.0),
    }
}

/// Returns the strength of an evaluated hand.
///
/// The score is the category base score plus a bonus from the primary
/// tie-break rank, the bonus is always smaller than the gap to the next
/// category base score and the result is capped at 0.999.
pub fn hand_strength(value: &HandValue) -> f64 {
    let (base, next) = base_score(value.display_category());
    let primary = value.tie_break().first().copied().unwrap_or(2);
    let bonus = f64::from(primary.saturating_sub(2)) / 12.0 * 0.14;
    let max_bonus = (next - base) * 0.99;
    (base + bonus.min(max_bonus)).min(0.999)
}

/// Returns the starting hand score in the range `0..=20`.
pub fn preflop_score(c1: Card, c2: Card) -> u8 {
    use deuce_cards::Rank::*;

    let (hi, lo) = if c1.rank() >= c2.rank() {
        (c1.rank(), c2.rank())
    } else {
        (c2.rank(), c1.rank())
    };
    let suited = c1.suit() == c2.suit();

    if hi == lo {
        return match hi {
            Ace => 20,
            King => 17,
            Queen => 14,
            Jack => 12,
            Ten => 10,
            Nine => 9,
            Eight => 8,
            Seven => 7,
            Six => 6,
            Five => 5,
            Four => 4,
            Trey => 3,
            Deuce => 2,
        };
    }

    match (hi, lo, suited) {
        (Ace, King, true) => 11,
        (Ace, King, false) => 10,
        (Ace, Queen, true) => 10,
        (Ace, Queen, false) => 9,
        (Ace, Jack, true) | (King, Queen, true) => 9,
        (Ace, Ten, true) | (King, Queen, false) | (King, Jack, true) => 8,
        (Ace, Jack, false) | (Ace, Ten, false) | (King, Jack, false) | (Queen, Jack, true) => 7,
        _ => {
            // Rank indices start at 0 for a deuce.
            let mut score = (hi.value() - 2 + lo.value() - 2) / 4;
            if suited {
                score += 2;
            }

            if hi.value() - lo.value() == 1 {
                score += 1;
            }

            score
        }
    }
}

/// Returns the starting hand strength in the range `[0, 1]`.
pub fn preflop_strength(c1: Card, c2: Card) -> f64 {
    f64::from(preflop_score(c1, c2)) / 20.0
}
