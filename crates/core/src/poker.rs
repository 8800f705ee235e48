// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Types used in a Poker hand.
use serde::{Deserialize, Serialize};
use std::{fmt, iter, ops};

pub use deuce_cards::{Card, Deck, Rank, Suit};

#[cfg(feature = "eval")]
pub use deuce_eval::{HandCategory, HandValue};

/// A player identifier, stable for the duration of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a player id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The id value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Chips amount.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Chips(u32);

impl Chips {
    /// The zero chips.
    pub const ZERO: Chips = Chips(0);

    /// Creates chips with the given value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The integer amount.
    pub fn amount(&self) -> u32 {
        self.0
    }

    /// Checks if this is a zero amount.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Chips {
    fn from(val: u32) -> Self {
        Chips(val)
    }
}

impl From<Chips> for u32 {
    fn from(val: Chips) -> Self {
        val.0
    }
}

impl ops::Add for Chips {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl ops::AddAssign for Chips {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl ops::Sub<Chips> for Chips {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl ops::SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl ops::Mul<u32> for Chips {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl ops::Div<u32> for Chips {
    type Output = Self;

    fn div(self, rhs: u32) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl ops::Rem<u32> for Chips {
    type Output = Self;

    fn rem(self, rhs: u32) -> Self::Output {
        Self(self.0 % rhs)
    }
}

impl iter::Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.0;
        if amount >= 10_000_000 {
            write!(f, "{:.1}M", amount as f64 / 1e6)
        } else if amount >= 1_000_000 {
            write!(
                f,
                "{},{:03},{:03}",
                amount / 1_000_000,
                amount % 1_000_000 / 1_000,
                amount % 1000
            )
        } else if amount >= 1_000 {
            write!(f, "{},{:03}", amount / 1000, amount % 1000)
        } else {
            write!(f, "{}", amount)
        }
    }
}

/// A Player action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// No action.
    None,
    /// Player pays small blind.
    SmallBlind,
    /// Player pays big blind.
    BigBlind,
    /// Player calls.
    Call,
    /// Player checks.
    Check,
    /// Player bets.
    Bet,
    /// Player raises.
    Raise,
    /// Player bets all the remaining chips.
    AllIn,
    /// Player folds.
    Fold,
}

impl PlayerAction {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerAction::SmallBlind => "SB",
            PlayerAction::BigBlind => "BB",
            PlayerAction::Call => "CALL",
            PlayerAction::Check => "CHECK",
            PlayerAction::Bet => "BET",
            PlayerAction::Raise => "RAISE",
            PlayerAction::AllIn => "ALL-IN",
            PlayerAction::Fold => "FOLD",
            PlayerAction::None => "",
        }
    }

    /// Checks if this is a voluntary action, blinds are not.
    pub fn is_voluntary(&self) -> bool {
        !matches!(
            self,
            PlayerAction::None | PlayerAction::SmallBlind | PlayerAction::BigBlind
        )
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::None => write!(f, "NONE"),
            action => write!(f, "{}", action.label()),
        }
    }
}

/// The player cards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCards {
    /// The player has no cards.
    #[default]
    None,
    /// The player cards.
    Cards(Card, Card),
}

/// Who decides a player actions, the core treats all players the same.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerRole {
    /// Actions come from a person.
    #[default]
    Human,
    /// Actions come from a decision policy.
    Bot,
}

/// A player in a hand.
#[derive(Debug, Clone)]
pub struct Player {
    /// The player id.
    pub id: PlayerId,
    /// The player nickname.
    pub nickname: String,
    /// The player role.
    pub role: PlayerRole,
    /// This player chips stack.
    pub chips: Chips,
    /// The player bet in the current betting round.
    pub bet: Chips,
    /// The last player action.
    pub action: PlayerAction,
    /// This player private cards.
    pub hole_cards: PlayerCards,
    /// This player is active in the hand.
    pub is_active: bool,
}

impl Player {
    /// Creates a new player.
    pub fn new(id: PlayerId, nickname: impl Into<String>, chips: Chips) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            role: PlayerRole::default(),
            chips,
            bet: Chips::ZERO,
            action: PlayerAction::None,
            hole_cards: PlayerCards::None,
            is_active: chips > Chips::ZERO,
        }
    }

    /// Sets this player role.
    pub fn with_role(mut self, role: PlayerRole) -> Self {
        self.role = role;
        self
    }

    /// Checks if this player is in the hand with no chips left.
    pub fn is_all_in(&self) -> bool {
        self.is_active && self.chips == Chips::ZERO
    }

    /// Checks if this player can still act in the hand.
    pub fn can_act(&self) -> bool {
        self.is_active && self.chips > Chips::ZERO
    }

    /// The maximum bet this player can reach in this round.
    pub fn max_bet(&self) -> Chips {
        self.bet + self.chips
    }

    /// Updates this player bet to the given total and returns the chips paid.
    ///
    /// If the player doesn't have enough chips the player goes all in.
    pub fn bet(&mut self, action: PlayerAction, chips: Chips) -> Chips {
        // How much to bet considering previous bets.
        let remainder = chips - self.bet;

        let paid = remainder.min(self.chips);
        self.bet += paid;
        self.chips -= paid;

        self.action = action;
        paid
    }

    /// Sets this player in fold state.
    pub fn fold(&mut self) {
        self.is_active = false;
        self.action = PlayerAction::Fold;
        self.hole_cards = PlayerCards::None;
    }

    /// Reset state for a new betting round.
    pub fn start_round(&mut self) {
        self.bet = Chips::ZERO;
        if self.is_active {
            self.action = PlayerAction::None;
        }
    }

    /// Reset state for a new hand.
    pub fn start_hand(&mut self) {
        self.is_active = self.chips > Chips::ZERO;
        self.bet = Chips::ZERO;
        self.action = PlayerAction::None;
        self.hole_cards = PlayerCards::None;
    }
}
