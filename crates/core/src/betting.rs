// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Betting round state machine.
//!
//! A [BettingRound] validates players actions against the current bet level
//! and tracks which players acted since the level last changed. Actions update
//! the players bets and stacks and return the chips each player paid, the
//! caller adds them to the [Pot](crate::pot::Pot).
use ahash::AHashSet;
use log::{debug, warn};
use thiserror::Error;

use crate::poker::{Chips, Player, PlayerAction, PlayerId};

/// Errors for rejected actions, a rejected action doesn't change any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The player is not in the players list.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    /// The player has folded.
    #[error("player {0} is not in the hand")]
    PlayerNotActive(PlayerId),
    /// The player has no chips left.
    #[error("player {0} is all in")]
    PlayerAllIn(PlayerId),
    /// The action cannot be used in a betting round.
    #[error("invalid action {0}")]
    InvalidAction(PlayerAction),
    /// Check when there is a bet to call.
    #[error("cannot check, {to_call} to call")]
    CannotCheck {
        /// The chips to call.
        to_call: Chips,
    },
    /// Call when there is nothing to call.
    #[error("nothing to call")]
    NothingToCall,
    /// Bet when there is already a bet.
    #[error("cannot bet, current bet is {last_bet}")]
    BetNotAllowed {
        /// The current bet.
        last_bet: Chips,
    },
    /// Bet smaller than the big blind.
    #[error("bet must be at least {min}")]
    BetTooSmall {
        /// The minimum bet.
        min: Chips,
    },
    /// Raise when there is no bet.
    #[error("no bet to raise")]
    NoBetToRaise,
    /// Raise smaller than the minimum raise.
    #[error("raise must be at least {min}")]
    RaiseTooSmall {
        /// The minimum raise total.
        min: Chips,
    },
    /// Raise from a player whose stack cannot exceed the current bet.
    #[error("not enough chips to raise {last_bet}")]
    CannotRaise {
        /// The current bet.
        last_bet: Chips,
    },
}

/// The state of a betting round.
#[derive(Debug, Clone)]
pub struct BettingRound {
    last_bet: Chips,
    min_raise: Chips,
    big_blind: Chips,
    acted: AHashSet<PlayerId>,
}

impl BettingRound {
    /// Starts a new betting round, resetting the players round bets.
    pub fn start(players: &mut [Player], big_blind: Chips) -> Self {
        for player in players.iter_mut() {
            player.start_round();
        }

        Self {
            last_bet: Chips::ZERO,
            min_raise: big_blind,
            big_blind,
            acted: AHashSet::default(),
        }
    }

    /// The bet level players have to match.
    pub fn last_bet(&self) -> Chips {
        self.last_bet
    }

    /// The minimum raise increment.
    pub fn min_raise(&self) -> Chips {
        self.min_raise
    }

    /// The big blind for this round.
    pub fn big_blind(&self) -> Chips {
        self.big_blind
    }

    /// The minimum total for a bet or a raise.
    pub fn min_raise_to(&self) -> Chips {
        self.last_bet + self.min_raise
    }

    /// The chips a player has to pay to call.
    pub fn amount_to_call(&self, player: &Player) -> Chips {
        (self.last_bet - player.bet).min(player.chips)
    }

    /// Checks if a player acted since the bet level last changed.
    pub fn has_acted(&self, player_id: PlayerId) -> bool {
        self.acted.contains(&player_id)
    }

    /// Posts a blind for a player and returns the chips paid.
    ///
    /// A blind is capped at the player stack and doesn't count as an action,
    /// a big blind sets the bet level to the blind amount.
    pub fn post_blind(
        &mut self,
        players: &mut [Player],
        player_id: PlayerId,
        action: PlayerAction,
        amount: Chips,
    ) -> Result<Chips, ActionError> {
        if !matches!(action, PlayerAction::SmallBlind | PlayerAction::BigBlind) {
            return Err(ActionError::InvalidAction(action));
        }

        let player = find_player(players, player_id)?;
        let paid = player.bet(action, amount);
        let level = if action == PlayerAction::BigBlind {
            amount
        } else {
            player.bet
        };
        self.last_bet = self.last_bet.max(level);

        debug!("Player {player_id} posts {action} {paid}");
        Ok(paid)
    }

    /// Applies a player action and returns the chips the player paid.
    ///
    /// The `amount` is the bet total for [PlayerAction::Bet] and
    /// [PlayerAction::Raise] and is ignored for other actions. Bets and raises
    /// larger than the player stack are capped to an all in, calls are capped
    /// at the player stack.
    pub fn process_action(
        &mut self,
        players: &mut [Player],
        player_id: PlayerId,
        action: PlayerAction,
        amount: Chips,
    ) -> Result<Chips, ActionError> {
        let res = self.apply_action(players, player_id, action, amount);
        match &res {
            Ok(paid) => debug!(
                "Player {player_id} {action} paid {paid}, bet {} min raise {}",
                self.last_bet, self.min_raise
            ),
            Err(e) => warn!("Player {player_id} {action} {amount} rejected: {e}"),
        }

        res
    }

    fn apply_action(
        &mut self,
        players: &mut [Player],
        player_id: PlayerId,
        action: PlayerAction,
        amount: Chips,
    ) -> Result<Chips, ActionError> {
        let player = find_player(players, player_id)?;
        if !player.is_active {
            return Err(ActionError::PlayerNotActive(player_id));
        }

        if player.chips == Chips::ZERO {
            return Err(ActionError::PlayerAllIn(player_id));
        }

        let max_bet = player.max_bet();

        match action {
            PlayerAction::Fold => {
                player.fold();
                Ok(Chips::ZERO)
            }
            PlayerAction::Check => {
                if player.bet < self.last_bet {
                    return Err(ActionError::CannotCheck {
                        to_call: self.last_bet - player.bet,
                    });
                }

                player.action = action;
                self.acted.insert(player_id);
                Ok(Chips::ZERO)
            }
            PlayerAction::Call => {
                if player.bet >= self.last_bet {
                    return Err(ActionError::NothingToCall);
                }

                // A player that cannot match the bet goes all in.
                let paid = player.bet(action, self.last_bet);
                self.acted.insert(player_id);
                Ok(paid)
            }
            PlayerAction::Bet => {
                if self.last_bet > Chips::ZERO {
                    return Err(ActionError::BetNotAllowed {
                        last_bet: self.last_bet,
                    });
                }

                let target = amount.min(max_bet);
                if target < self.big_blind && target < max_bet {
                    return Err(ActionError::BetTooSmall {
                        min: self.big_blind,
                    });
                }

                let paid = player.bet(action, target);
                self.raise_level(player_id, target);
                Ok(paid)
            }
            PlayerAction::Raise => {
                if self.last_bet == Chips::ZERO {
                    return Err(ActionError::NoBetToRaise);
                }

                if max_bet <= self.last_bet {
                    return Err(ActionError::CannotRaise {
                        last_bet: self.last_bet,
                    });
                }

                let target = amount.min(max_bet);
                if target < self.min_raise_to() && target < max_bet {
                    return Err(ActionError::RaiseTooSmall {
                        min: self.min_raise_to(),
                    });
                }

                let paid = player.bet(action, target);
                self.raise_level(player_id, target);
                Ok(paid)
            }
            PlayerAction::AllIn => {
                let paid = player.bet(action, max_bet);
                if max_bet > self.last_bet {
                    self.raise_level(player_id, max_bet);
                } else {
                    self.acted.insert(player_id);
                }

                Ok(paid)
            }
            PlayerAction::None | PlayerAction::SmallBlind | PlayerAction::BigBlind => {
                Err(ActionError::InvalidAction(action))
            }
        }
    }

    /// Sets a new bet level, a full raise also sets the minimum raise.
    fn raise_level(&mut self, player_id: PlayerId, level: Chips) {
        let increment = level - self.last_bet;
        if increment >= self.min_raise {
            self.min_raise = increment;
        }

        self.last_bet = level;

        // Everybody else has to act again.
        self.acted.clear();
        self.acted.insert(player_id);
    }

    /// Checks if all players in the hand have acted.
    ///
    /// The round is complete when there is at most one active player, or when
    /// every active player that is not all in matched the bet level and acted
    /// since the level last changed.
    pub fn is_complete(&self, players: &[Player]) -> bool {
        if players.iter().filter(|p| p.is_active).count() < 2 {
            return true;
        }

        players
            .iter()
            .filter(|p| p.can_act())
            .all(|p| p.bet == self.last_bet && self.acted.contains(&p.id))
    }

    /// The actions a player can take with their amounts.
    ///
    /// The amount is the bet total for bets and raises, and the chips the
    /// player pays for calls and all in.
    pub fn available_actions(&self, player: &Player) -> Vec<(PlayerAction, Chips)> {
        if !player.can_act() {
            return Vec::new();
        }

        let mut actions = vec![(PlayerAction::Fold, Chips::ZERO)];

        if player.bet >= self.last_bet {
            actions.push((PlayerAction::Check, Chips::ZERO));
        } else {
            actions.push((PlayerAction::Call, self.amount_to_call(player)));
        }

        let max_bet = player.max_bet();
        if self.last_bet == Chips::ZERO {
            if max_bet >= self.big_blind {
                actions.push((PlayerAction::Bet, self.big_blind));
            }
        } else if max_bet > self.last_bet {
            actions.push((PlayerAction::Raise, self.min_raise_to().min(max_bet)));
        }

        actions.push((PlayerAction::AllIn, player.chips));
        actions
    }
}

fn find_player(players: &mut [Player], player_id: PlayerId) -> Result<&mut Player, ActionError> {
    players
        .iter_mut()
        .find(|p| p.id == player_id)
        .ok_or(ActionError::UnknownPlayer(player_id))
}
