// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown resolution.
use log::info;
use thiserror::Error;

use deuce_eval::{EvalError, HandValue};

use crate::{
    poker::{Card, Player, PlayerCards, PlayerId},
    pot::{Payoff, Pot},
};

/// Showdown errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShowdownError {
    /// A player in the hand has no cards.
    #[error("player {0} has no cards")]
    MissingCards(PlayerId),
    /// The player hand cannot be evaluated.
    #[error("player {player_id} hand: {source}")]
    Eval {
        /// The player.
        player_id: PlayerId,
        /// The evaluation error.
        source: EvalError,
    },
}

/// The outcome of a showdown.
#[derive(Debug, Clone)]
pub struct Showdown {
    /// The players hands in seat order.
    pub hands: Vec<(PlayerId, HandValue)>,
    /// Players grouped by hand value from best to worst.
    pub standings: Vec<Vec<PlayerId>>,
    /// The chips won by each player.
    pub payoffs: Vec<Payoff>,
}

/// Evaluates the active players hands and pays the pot to the winners.
///
/// The payoffs are added to the players stacks. If only one player is left in
/// the hand the player wins without showing cards.
pub fn showdown(players: &mut [Player], board: &[Card], pot: &Pot) -> Result<Showdown, ShowdownError> {
    let active = players.iter().filter(|p| p.is_active).count();

    let mut hands = Vec::with_capacity(active);
    if active > 1 {
        for player in players.iter().filter(|p| p.is_active) {
            let PlayerCards::Cards(c1, c2) = player.hole_cards else {
                return Err(ShowdownError::MissingCards(player.id));
            };

            let mut cards = vec![c1, c2];
            cards.extend_from_slice(board);
            let value = HandValue::eval(&cards).map_err(|source| ShowdownError::Eval {
                player_id: player.id,
                source,
            })?;

            info!("Player {} shows {value}", player.id);
            hands.push((player.id, value));
        }
    }

    let standings = if hands.is_empty() {
        players
            .iter()
            .filter(|p| p.is_active)
            .map(|p| vec![p.id])
            .collect()
    } else {
        standings(&hands)
    };

    let payoffs = pot.distribute(players, &standings);
    for payoff in &payoffs {
        if let Some(player) = players.iter_mut().find(|p| p.id == payoff.player_id) {
            player.chips += payoff.chips;
        }
    }

    Ok(Showdown {
        hands,
        standings,
        payoffs,
    })
}

/// Groups players with equal hands, best hands first.
fn standings(hands: &[(PlayerId, HandValue)]) -> Vec<Vec<PlayerId>> {
    let mut sorted = hands.to_vec();
    // Stable sort keeps seat order within groups.
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    let mut groups: Vec<(HandValue, Vec<PlayerId>)> = Vec::new();
    for (player_id, value) in sorted {
        match groups.last_mut() {
            Some((best, ids)) if *best == value => ids.push(player_id),
            _ => groups.push((value, vec![player_id])),
        }
    }

    groups.into_iter().map(|(_, ids)| ids).collect()
}
