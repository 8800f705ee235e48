// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Outs for hands on the flop and on the turn.
use serde::{Deserialize, Serialize};
use std::fmt;

use deuce_cards::{Card, Deck, Rank, Suit};
use deuce_eval::{HandCategory, HandValue};

use crate::equity::{OddsError, check_cards};

/// The hand a set of outs draws to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutsTarget {
    /// Four cards of a suit.
    Flush,
    /// Three cards of a suit on the flop.
    BackdoorFlush,
    /// Straight draw with two or more ranks.
    OpenEndedStraight,
    /// Straight draw with a single inside rank.
    GutshotStraight,
    /// Full house from two pair.
    FullHouse,
    /// Three of a kind from a pair.
    ThreeOfAKind,
    /// Pair one of the hole cards.
    Pair,
}

impl OutsTarget {
    /// The hand category these outs complete.
    pub fn category(&self) -> HandCategory {
        match self {
            OutsTarget::Flush | OutsTarget::BackdoorFlush => HandCategory::Flush,
            OutsTarget::OpenEndedStraight | OutsTarget::GutshotStraight => HandCategory::Straight,
            OutsTarget::FullHouse => HandCategory::FullHouse,
            OutsTarget::ThreeOfAKind => HandCategory::ThreeOfAKind,
            OutsTarget::Pair => HandCategory::OnePair,
        }
    }

    /// The draw name.
    pub fn name(&self) -> &'static str {
        match self {
            OutsTarget::Flush => "Flush",
            OutsTarget::BackdoorFlush => "Backdoor Flush",
            OutsTarget::OpenEndedStraight => "Open-Ended Straight",
            OutsTarget::GutshotStraight => "Gutshot Straight",
            OutsTarget::FullHouse => "Full House",
            OutsTarget::ThreeOfAKind => "Three of a Kind",
            OutsTarget::Pair => "Pair",
        }
    }
}

impl fmt::Display for OutsTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The cards that improve a hand to a target hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outs {
    /// The target hand.
    pub target: OutsTarget,
    /// The cards that complete the target hand.
    pub cards: Vec<Card>,
    /// An estimate of the probability to hit the target.
    pub probability: f64,
}

impl Outs {
    /// The number of outs.
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

impl fmt::Display for Outs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} outs ({:.1}%)",
            self.target,
            self.count(),
            self.probability * 100.0
        )
    }
}

/// Backdoor draws need two running cards.
const BACKDOOR_FLUSH_PROBABILITY: f64 = 0.04;

/// Estimates the probability of hitting one of `outs` cards.
///
/// With two cards to come each out is worth 4%, with one card 2%.
pub fn rule_of_four_two(outs: usize, cards_to_come: usize) -> f64 {
    let per_out = if cards_to_come >= 2 { 4.0 } else { 2.0 };
    (outs as f64 * per_out / 100.0).min(1.0)
}

/// Finds the outs that improve a hand to a stronger category.
///
/// Outs are only defined on the flop and on the turn, for any other board
/// size the list is empty.
pub fn compute_outs(hole: &[Card], board: &[Card]) -> Result<Vec<Outs>, OddsError> {
    check_cards(hole, board)?;

    if !matches!(board.len(), 3 | 4) {
        return Ok(Vec::new());
    }

    let known = hole.iter().chain(board).copied().collect::<Vec<_>>();
    let current = HandValue::eval(&known)?.category();
    let remaining = Deck::remaining(&known);
    let cards_to_come = 5 - board.len();

    let outs_of = |target: OutsTarget, cards: Vec<Card>| {
        (!cards.is_empty() && target.category() > current).then(|| {
            let probability = if target == OutsTarget::BackdoorFlush {
                BACKDOOR_FLUSH_PROBABILITY
            } else {
                rule_of_four_two(cards.len(), cards_to_come)
            };

            Outs {
                target,
                cards,
                probability,
            }
        })
    };

    let mut outs = Vec::new();

    let (target, cards) = flush_draw(&known, &remaining, board.len());
    outs.extend(target.and_then(|t| outs_of(t, cards)));

    let cards = straight_draw(&known, &remaining);
    let target = if cards.len() >= 8 {
        OutsTarget::OpenEndedStraight
    } else {
        OutsTarget::GutshotStraight
    };
    outs.extend(outs_of(target, cards));

    let pairs = rank_counts(&known)
        .into_iter()
        .filter(|(_, count)| *count == 2)
        .map(|(rank, _)| rank)
        .collect::<Vec<_>>();
    let with_ranks = |ranks: &[Rank]| {
        remaining
            .iter()
            .filter(|c| ranks.contains(&c.rank()))
            .copied()
            .collect::<Vec<_>>()
    };

    match current {
        HandCategory::TwoPair => outs.extend(outs_of(OutsTarget::FullHouse, with_ranks(&pairs))),
        HandCategory::OnePair => {
            outs.extend(outs_of(OutsTarget::ThreeOfAKind, with_ranks(&pairs)))
        }
        HandCategory::HighCard => {
            let hole_ranks = hole.iter().map(|c| c.rank()).collect::<Vec<_>>();
            outs.extend(outs_of(OutsTarget::Pair, with_ranks(&hole_ranks)));
        }
        _ => {}
    }

    Ok(outs)
}

fn flush_draw(known: &[Card], remaining: &Deck, board_len: usize) -> (Option<OutsTarget>, Vec<Card>) {
    let suit_count = |suit: Suit| known.iter().filter(|c| c.suit() == suit).count();
    let suit_cards = |suit: Suit| {
        remaining
            .iter()
            .filter(|c| c.suit() == suit)
            .copied()
            .collect::<Vec<_>>()
    };

    if let Some(suit) = Suit::suits().find(|s| suit_count(*s) == 4) {
        return (Some(OutsTarget::Flush), suit_cards(suit));
    }

    if board_len == 3 {
        if let Some(suit) = Suit::suits().find(|s| suit_count(*s) == 3) {
            return (Some(OutsTarget::BackdoorFlush), suit_cards(suit));
        }
    }

    (None, Vec::new())
}

/// Cards that fill a five ranks window with four ranks already in the hand.
fn straight_draw(known: &[Card], remaining: &Deck) -> Vec<Card> {
    // Rank values with the ace also at 1 for the wheel.
    let mut present = [false; 15];
    for c in known {
        let v = c.rank().value() as usize;
        present[v] = true;
        if v == 14 {
            present[1] = true;
        }
    }

    let mut needed = Vec::new();
    for low in 1..=10 {
        let missing = (low..low + 5).filter(|v| !present[*v]).collect::<Vec<_>>();
        if let [v] = missing.as_slice() {
            let value = if *v == 1 { 14 } else { *v as u8 };
            if !needed.contains(&value) {
                needed.push(value);
            }
        }
    }

    remaining
        .iter()
        .filter(|c| needed.contains(&c.rank().value()))
        .copied()
        .collect()
}

fn rank_counts(cards: &[Card]) -> Vec<(Rank, usize)> {
    Rank::ranks()
        .map(|r| (r, cards.iter().filter(|c| c.rank() == r).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deuce_cards::parse_cards;

    fn outs(hole: &str, board: &str) -> Vec<Outs> {
        compute_outs(&parse_cards(hole).unwrap(), &parse_cards(board).unwrap()).unwrap()
    }

    fn find(outs: &[Outs], target: OutsTarget) -> Option<&Outs> {
        outs.iter().find(|o| o.target == target)
    }

    #[test]
    fn no_outs_preflop_and_river() {
        assert!(outs("Ah Kh", "").is_empty());
        assert!(outs("Ah Kh", "Qh Jh 2c 3d 9s").is_empty());
        assert!(outs("Ah Kh", "Qh Jh").is_empty());
    }

    #[test]
    fn flush_draw_on_flop() {
        let outs = outs("Ah Kh", "7h 2h 9c");
        let flush = find(&outs, OutsTarget::Flush).unwrap();
        assert_eq!(flush.count(), 9);
        assert!((flush.probability - 0.36).abs() < 1e-9);
        assert!(flush.cards.iter().all(|c| c.suit() == Suit::Hearts));

        // Overcards to pair.
        let pair = find(&outs, OutsTarget::Pair).unwrap();
        assert_eq!(pair.count(), 6);
        assert!(find(&outs, OutsTarget::BackdoorFlush).is_none());
    }

    #[test]
    fn flush_draw_on_turn() {
        let outs = outs("Ah Kh", "7h 2h 9c Jd");
        let flush = find(&outs, OutsTarget::Flush).unwrap();
        assert_eq!(flush.count(), 9);
        assert!((flush.probability - 0.18).abs() < 1e-9);
    }

    #[test]
    fn backdoor_flush() {
        let outs = outs("Ah Kh", "7h 2c 9c");
        let backdoor = find(&outs, OutsTarget::BackdoorFlush).unwrap();
        assert_eq!(backdoor.count(), 10);
        assert_eq!(backdoor.probability, 0.04);

        // No backdoor draws on the turn.
        let outs = self::outs("Ah Kh", "7h 2c 9c 3d");
        assert!(find(&outs, OutsTarget::BackdoorFlush).is_none());
    }

    #[test]
    fn straight_draws() {
        // 8 9 T J open ended, a 7 or a Q.
        let outs = outs("8c 9d", "Th Js 2c");
        let straight = find(&outs, OutsTarget::OpenEndedStraight).unwrap();
        assert_eq!(straight.count(), 8);
        assert!((straight.probability - 0.32).abs() < 1e-9);

        // 8 9 J Q inside straight, a ten only.
        let outs = self::outs("8c 9d", "Jh Qs 2c");
        let straight = find(&outs, OutsTarget::GutshotStraight).unwrap();
        assert_eq!(straight.count(), 4);
        assert!(straight.cards.iter().all(|c| c.rank() == Rank::Ten));

        // A 2 3 4 needs a five.
        let outs = self::outs("Ac 2d", "3h 4s Kc");
        let straight = find(&outs, OutsTarget::GutshotStraight).unwrap();
        assert_eq!(straight.count(), 4);
        assert!(straight.cards.iter().all(|c| c.rank() == Rank::Five));
    }

    #[test]
    fn made_straight_has_no_straight_outs() {
        let outs = outs("8c 9d", "Th Js Qc");
        assert!(find(&outs, OutsTarget::OpenEndedStraight).is_none());
        assert!(find(&outs, OutsTarget::GutshotStraight).is_none());
    }

    #[test]
    fn pair_and_two_pair_outs() {
        let outs = outs("Kc Kd", "7h 2s 9c");
        let trips = find(&outs, OutsTarget::ThreeOfAKind).unwrap();
        assert_eq!(trips.count(), 2);
        assert!(find(&outs, OutsTarget::Pair).is_none());

        let outs = self::outs("Kc 7d", "7h Ks 9c");
        let full_house = find(&outs, OutsTarget::FullHouse).unwrap();
        assert_eq!(full_house.count(), 4);
        assert!((full_house.probability - 0.16).abs() < 1e-9);
    }

    #[test]
    fn duplicate_cards() {
        let hole = parse_cards("Ah Kh").unwrap();
        let board = parse_cards("Ah 2c 3d").unwrap();
        assert!(matches!(
            compute_outs(&hole, &board),
            Err(OddsError::DuplicateCard(_))
        ));
    }

    #[test]
    fn four_two_rule() {
        assert!((rule_of_four_two(9, 2) - 0.36).abs() < 1e-9);
        assert!((rule_of_four_two(9, 1) - 0.18).abs() < 1e-9);
        assert_eq!(rule_of_four_two(30, 2), 1.0);
    }
}
