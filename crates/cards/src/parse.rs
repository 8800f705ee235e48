// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards notation parsing, accepts both "As" and "A♠" forms.
use std::str::FromStr;

use crate::{Card, CardsError, Rank, Suit};

impl FromStr for Rank {
    type Err = CardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.to_ascii_uppercase().as_str() {
            "2" => Rank::Deuce,
            "3" => Rank::Trey,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(CardsError::UnknownRank(s.to_string())),
        };

        Ok(rank)
    }
}

impl TryFrom<char> for Suit {
    type Error = CardsError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'c' | 'C' | '♣' | '♧' => Ok(Suit::Clubs),
            'd' | 'D' | '♦' | '♢' => Ok(Suit::Diamonds),
            'h' | 'H' | '♥' | '♡' => Ok(Suit::Hearts),
            's' | 'S' | '♠' | '♤' => Ok(Suit::Spades),
            _ => Err(CardsError::UnknownSuit(c.to_string())),
        }
    }
}

impl FromStr for Card {
    type Err = CardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((pos, suit)) = s.char_indices().last() else {
            return Err(CardsError::EmptyCard);
        };

        let suit = Suit::try_from(suit)?;
        let rank = s[..pos].parse::<Rank>()?;
        Ok(Card::new(rank, suit))
    }
}

/// Parses a list of cards separated by whitespace or commas.
///
/// Fails if a card appears more than once.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardsError> {
    let mut cards = Vec::new();

    for token in s.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }

        let card = token.parse::<Card>()?;
        if cards.contains(&card) {
            return Err(CardsError::DuplicateCard(card));
        }

        cards.push(card);
    }

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_card() {
        let kd = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!("Kd".parse::<Card>(), Ok(kd));
        assert_eq!("KD".parse::<Card>(), Ok(kd));
        assert_eq!("k♦".parse::<Card>(), Ok(kd));

        let th = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!("Th".parse::<Card>(), Ok(th));
        assert_eq!("10h".parse::<Card>(), Ok(th));
        assert_eq!("10♥".parse::<Card>(), Ok(th));

        assert_eq!(
            " A♠ ".parse::<Card>(),
            Ok(Card::new(Rank::Ace, Suit::Spades))
        );
    }

    #[test]
    fn parse_card_errors() {
        assert_eq!("".parse::<Card>(), Err(CardsError::EmptyCard));
        assert_eq!(
            "Ax".parse::<Card>(),
            Err(CardsError::UnknownSuit("x".to_string()))
        );
        assert_eq!(
            "1s".parse::<Card>(),
            Err(CardsError::UnknownRank("1".to_string()))
        );
        assert_eq!(
            "s".parse::<Card>(),
            Err(CardsError::UnknownRank("".to_string()))
        );
    }

    #[test]
    fn parse_card_list() {
        let cards = parse_cards("As Ks, Qs  J♠ 10s").unwrap();
        let expected = [Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten]
            .into_iter()
            .map(|r| Card::new(r, Suit::Spades))
            .collect::<Vec<_>>();
        assert_eq!(cards, expected);

        assert!(parse_cards("").unwrap().is_empty());

        let res = parse_cards("As Kd As");
        assert_eq!(
            res,
            Err(CardsError::DuplicateCard(Card::new(Rank::Ace, Suit::Spades)))
        );
    }

    #[test]
    fn display_round_trip() {
        for card in crate::Deck::default() {
            assert_eq!(card.to_string().parse::<Card>(), Ok(card));
            assert_eq!(card.symbol().parse::<Card>(), Ok(card));
        }
    }
}
