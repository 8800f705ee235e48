// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! [HandValue::eval] enumerates every 5 cards subset of a hand, classifies each
//! subset and keeps the best one. A 7 cards hand has 21 subsets, a 6 cards
//! hand 6.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use thiserror::Error;

use deuce_cards::Card;

/// Evaluation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A hand must have at least 5 cards.
    #[error("expected at least 5 cards, got {0}")]
    TooFewCards(usize),
}

/// A hand category ordered from weakest to strongest.
///
/// A royal flush is a straight flush with an ace high card, [HandValue::eval]
/// always reports it as [HandCategory::StraightFlush] and
/// [HandValue::display_category] as [HandCategory::RoyalFlush].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// High card.
    HighCard,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
    /// Ace high straight flush.
    RoyalFlush,
}

impl HandCategory {
    /// Returns all the categories from weakest to strongest.
    pub fn categories() -> impl DoubleEndedIterator<Item = HandCategory> {
        use HandCategory::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            RoyalFlush,
        ]
        .into_iter()
    }

    /// The category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The value of a 5 cards poker hand.
///
/// Values compare by category first and then by the tie-break key, the five
/// cards are not part of the comparison so two values that split a pot are
/// equal.
#[derive(Debug, Clone, Copy)]
pub struct HandValue {
    category: HandCategory,
    cards: [Card; 5],
    key: [u8; 5],
    key_len: u8,
}

impl HandValue {
    /// Evaluates a hand with 5 or more cards.
    ///
    /// Cards are expected to be distinct.
    pub fn eval(cards: &[Card]) -> Result<Self, EvalError> {
        let n = cards.len();
        if n < 5 {
            return Err(EvalError::TooFewCards(n));
        }

        let mut best: Option<HandValue> = None;
        for c1 in 0..n {
            for c2 in (c1 + 1)..n {
                for c3 in (c2 + 1)..n {
                    for c4 in (c3 + 1)..n {
                        for c5 in (c4 + 1)..n {
                            let hand = [cards[c1], cards[c2], cards[c3], cards[c4], cards[c5]];
                            let value = Self::classify(hand);
                            if best.is_none_or(|b| value > b) {
                                best = Some(value);
                            }
                        }
                    }
                }
            }
        }

        best.ok_or(EvalError::TooFewCards(n))
    }

    /// The hand category, a royal flush is a [HandCategory::StraightFlush].
    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// The category to show to a player.
    pub fn display_category(&self) -> HandCategory {
        if self.is_royal_flush() {
            HandCategory::RoyalFlush
        } else {
            self.category
        }
    }

    /// Checks if this hand is an ace high straight flush.
    pub fn is_royal_flush(&self) -> bool {
        self.category == HandCategory::StraightFlush && self.key[0] == 14
    }

    /// The five cards that make this hand, most significant first.
    pub fn cards(&self) -> &[Card; 5] {
        &self.cards
    }

    /// The tie-break rank values, most significant first.
    pub fn tie_break(&self) -> &[u8] {
        &self.key[..self.key_len as usize]
    }

    /// A description of the hand, i.e. "Full House, Kings full of Nines".
    pub fn description(&self) -> String {
        let k = self.tie_break();
        match self.display_category() {
            HandCategory::HighCard => format!("High Card, {}", rank_name(k[0])),
            HandCategory::OnePair => format!("One Pair, {}", rank_plural(k[0])),
            HandCategory::TwoPair => {
                format!("Two Pair, {} and {}", rank_plural(k[0]), rank_plural(k[1]))
            }
            HandCategory::ThreeOfAKind => format!("Three of a Kind, {}", rank_plural(k[0])),
            HandCategory::Straight => format!("Straight, {} high", rank_name(k[0])),
            HandCategory::Flush => format!("Flush, {} high", rank_name(k[0])),
            HandCategory::FullHouse => {
                format!("Full House, {} full of {}", rank_plural(k[0]), rank_plural(k[1]))
            }
            HandCategory::FourOfAKind => format!("Four of a Kind, {}", rank_plural(k[0])),
            HandCategory::StraightFlush => format!("Straight Flush, {} high", rank_name(k[0])),
            HandCategory::RoyalFlush => "Royal Flush".to_string(),
        }
    }

    fn classify(mut cards: [Card; 5]) -> Self {
        cards.sort_unstable_by(|a, b| b.cmp(a));

        let values = cards.map(|c| c.rank().value());
        let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());

        // Rank groups as (count, value), bigger groups first then higher ranks.
        let mut groups = [(0u8, 0u8); 5];
        let mut num_groups = 0;
        for &v in &values {
            if num_groups > 0 && groups[num_groups - 1].1 == v {
                groups[num_groups - 1].0 += 1;
            } else {
                groups[num_groups] = (1, v);
                num_groups += 1;
            }
        }
        groups[..num_groups].sort_by(|a, b| b.0.cmp(&a.0));

        let straight_top = if num_groups == 5 && values[0] - values[4] == 4 {
            Some(values[0])
        } else if values == [14, 5, 4, 3, 2] {
            // The ace plays low in a wheel.
            cards.rotate_left(1);
            Some(5)
        } else {
            None
        };

        let ranks = |n: usize| {
            let mut key = [0u8; 5];
            for (k, g) in key.iter_mut().zip(&groups).take(n) {
                *k = g.1;
            }
            (key, n as u8)
        };

        let (category, (key, key_len)) = match (straight_top, is_flush, groups[0].0, groups[1].0)
        {
            (Some(top), true, _, _) => (HandCategory::StraightFlush, ([top, 0, 0, 0, 0], 1)),
            (_, _, 4, _) => (HandCategory::FourOfAKind, ranks(2)),
            (_, _, 3, 2) => (HandCategory::FullHouse, ranks(2)),
            (_, true, _, _) => (HandCategory::Flush, (values, 5)),
            (Some(top), false, _, _) => (HandCategory::Straight, ([top, 0, 0, 0, 0], 1)),
            (_, _, 3, _) => (HandCategory::ThreeOfAKind, ranks(3)),
            (_, _, 2, 2) => (HandCategory::TwoPair, ranks(3)),
            (_, _, 2, _) => (HandCategory::OnePair, ranks(4)),
            _ => (HandCategory::HighCard, (values, 5)),
        };

        // Show grouped cards first, i.e. pairs before kickers.
        if straight_top.is_none() {
            let group_size = |c: &Card| {
                groups[..num_groups]
                    .iter()
                    .find(|g| g.1 == c.rank().value())
                    .map_or(0, |g| g.0)
            };
            cards.sort_by(|a, b| group_size(b).cmp(&group_size(a)).then(b.cmp(a)));
        }

        Self {
            category,
            cards,
            key,
            key_len,
        }
    }
}

fn rank_name(v: u8) -> &'static str {
    match v {
        2 => "Two",
        3 => "Three",
        4 => "Four",
        5 => "Five",
        6 => "Six",
        7 => "Seven",
        8 => "Eight",
        9 => "Nine",
        10 => "Ten",
        11 => "Jack",
        12 => "Queen",
        13 => "King",
        _ => "Ace",
    }
}

fn rank_plural(v: u8) -> String {
    match v {
        6 => "Sixes".to_string(),
        _ => format!("{}s", rank_name(v)),
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.tie_break().cmp(other.tie_break()))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.display_category())?;
        for c in &self.cards {
            write!(f, " {c}")?;
        }
        Ok(())
    }
}
