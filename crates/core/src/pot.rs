// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pot contributions ledger and side pots.
//!
//! The [Pot] records how many chips each player put in the pot during a hand,
//! side pots are computed from the ledger when needed so that folds after a
//! pot was formed are always reflected in the pots eligibility.
use ahash::AHashMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::poker::{Chips, Player, PlayerId};

/// A pot layer and the players that can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePot {
    /// The chips in this pot.
    pub amount: Chips,
    /// The eligible players in seat order.
    pub players: Vec<PlayerId>,
}

/// Chips won by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payoff {
    /// The player that won the chips.
    pub player_id: PlayerId,
    /// The chips won.
    pub chips: Chips,
}

/// The pot for a hand.
#[derive(Debug, Default, Clone)]
pub struct Pot {
    ledger: AHashMap<PlayerId, Chips>,
    total: Chips,
}

impl Pot {
    /// Creates an empty pot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds chips to a player contributions.
    pub fn add_contribution(&mut self, player_id: PlayerId, amount: Chips) {
        if amount.is_zero() {
            return;
        }

        *self.ledger.entry(player_id).or_default() += amount;
        self.total += amount;
        debug!("Pot {} after {player_id} added {amount}", self.total);
    }

    /// The chips a player put in the pot in this hand.
    pub fn contribution(&self, player_id: PlayerId) -> Chips {
        self.ledger.get(&player_id).copied().unwrap_or_default()
    }

    /// The pot total.
    pub fn total(&self) -> Chips {
        self.total
    }

    /// Checks if nobody contributed to this pot.
    pub fn is_empty(&self) -> bool {
        self.total.is_zero()
    }

    /// Clears the pot for a new hand.
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.total = Chips::ZERO;
    }

    /// Splits the pot in layers, one for each distinct contribution level.
    ///
    /// A layer is eligible to the active players in `players` that contributed
    /// at least the layer level, folded players chips stay in the layers they
    /// contributed to. Consecutive layers with the same eligible players are
    /// merged, and a layer that nobody can win is merged with the layer below.
    pub fn side_pots(&self, players: &[Player]) -> Vec<SidePot> {
        let mut levels = self.ledger.values().copied().collect::<Vec<_>>();
        levels.sort();
        levels.dedup();

        let mut pots: Vec<SidePot> = Vec::with_capacity(levels.len());
        let mut prev_level = Chips::ZERO;

        for level in levels {
            let contributors = self.ledger.values().filter(|c| **c >= level).count();
            let amount = (level - prev_level) * contributors as u32;
            prev_level = level;

            let eligible = players
                .iter()
                .filter(|p| p.is_active && self.contribution(p.id) >= level)
                .map(|p| p.id)
                .collect::<Vec<_>>();

            match pots.last_mut() {
                Some(last) if eligible.is_empty() || last.players == eligible => {
                    last.amount += amount;
                }
                _ => pots.push(SidePot {
                    amount,
                    players: eligible,
                }),
            }
        }

        pots
    }

    /// Distributes the pot to the winners.
    ///
    /// The `standings` lists the players from the best to the worst hand, each
    /// entry a group of players with equal hands. Each side pot goes to the
    /// best group with at least one eligible player, split evenly, with the
    /// odd chips going to the first winner in `players` seat order.
    pub fn distribute(&self, players: &[Player], standings: &[Vec<PlayerId>]) -> Vec<Payoff> {
        let mut payoffs: Vec<Payoff> = Vec::new();
        let mut pay = |player_id: PlayerId, chips: Chips| {
            match payoffs.iter_mut().find(|p| p.player_id == player_id) {
                Some(payoff) => payoff.chips += chips,
                None => payoffs.push(Payoff { player_id, chips }),
            }
        };

        for pot in self.side_pots(players) {
            let winners = standings
                .iter()
                .map(|group| {
                    pot.players
                        .iter()
                        .filter(|id| group.contains(id))
                        .copied()
                        .collect::<Vec<_>>()
                })
                .find(|winners| !winners.is_empty());

            let Some(winners) = winners else {
                warn!("No winners for pot {} {:?}", pot.amount, pot.players);
                continue;
            };

            let share = pot.amount / winners.len() as u32;
            let remainder = pot.amount % winners.len() as u32;

            for (idx, &player_id) in winners.iter().enumerate() {
                let chips = if idx == 0 { share + remainder } else { share };
                info!("Player {player_id} wins {chips} from pot {}", pot.amount);
                pay(player_id, chips);
            }
        }

        payoffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn players(n: u32) -> Vec<Player> {
        (1..=n)
            .map(|id| Player::new(PlayerId::new(id), format!("p{id}"), Chips::new(1_000)))
            .collect()
    }

    fn ids(ids: &[u32]) -> Vec<PlayerId> {
        ids.iter().map(|id| PlayerId::new(*id)).collect()
    }

    fn pot_with(contributions: &[(u32, u32)]) -> Pot {
        let mut pot = Pot::new();
        for (id, amount) in contributions {
            pot.add_contribution(PlayerId::new(*id), Chips::new(*amount));
        }
        pot
    }

    #[test]
    fn ledger_total() {
        let mut pot = pot_with(&[(1, 10), (2, 20), (1, 30)]);
        assert_eq!(pot.contribution(PlayerId::new(1)), Chips::new(40));
        assert_eq!(pot.contribution(PlayerId::new(2)), Chips::new(20));
        assert_eq!(pot.contribution(PlayerId::new(3)), Chips::ZERO);
        assert_eq!(pot.total(), Chips::new(60));

        pot.add_contribution(PlayerId::new(3), Chips::ZERO);
        assert_eq!(pot.total(), Chips::new(60));

        pot.reset();
        assert!(pot.is_empty());
        assert_eq!(pot.contribution(PlayerId::new(1)), Chips::ZERO);
    }

    #[test]
    fn short_stack_side_pot() {
        let players = players(3);
        let pot = pot_with(&[(1, 100), (2, 100), (3, 30)]);

        let pots = pot.side_pots(&players);
        assert_eq!(
            pots,
            vec![
                SidePot {
                    amount: Chips::new(90),
                    players: ids(&[1, 2, 3]),
                },
                SidePot {
                    amount: Chips::new(140),
                    players: ids(&[1, 2]),
                },
            ]
        );

        let total = pots.iter().map(|p| p.amount).sum::<Chips>();
        assert_eq!(total, Chips::new(230));
        assert_eq!(total, pot.total());
    }

    #[test]
    fn folded_players_lose_eligibility() {
        let mut players = players(4);
        let pot = pot_with(&[(1, 50), (2, 200), (3, 200), (4, 120)]);

        // Player 3 folds after contributing.
        players[2].fold();

        let pots = pot.side_pots(&players);
        assert_eq!(
            pots,
            vec![
                SidePot {
                    amount: Chips::new(200),
                    players: ids(&[1, 2, 4]),
                },
                SidePot {
                    amount: Chips::new(210),
                    players: ids(&[2, 4]),
                },
                SidePot {
                    amount: Chips::new(160),
                    players: ids(&[2]),
                },
            ]
        );
        assert_eq!(pots.iter().map(|p| p.amount).sum::<Chips>(), pot.total());
    }

    #[test]
    fn unclaimed_layer_merges_down() {
        let mut players = players(3);
        let pot = pot_with(&[(1, 40), (2, 40), (3, 100)]);
        players[2].fold();

        let pots = pot.side_pots(&players);
        assert_eq!(
            pots,
            vec![SidePot {
                amount: Chips::new(180),
                players: ids(&[1, 2]),
            }]
        );
    }

    #[test]
    fn distribute_side_pots() {
        let players = players(3);
        let pot = pot_with(&[(1, 100), (2, 100), (3, 30)]);

        // Short stack has the best hand and wins the main pot only.
        let payoffs = pot.distribute(&players, &[ids(&[3]), ids(&[2]), ids(&[1])]);
        assert_eq!(
            payoffs,
            vec![
                Payoff {
                    player_id: PlayerId::new(3),
                    chips: Chips::new(90),
                },
                Payoff {
                    player_id: PlayerId::new(2),
                    chips: Chips::new(140),
                },
            ]
        );
    }

    #[test]
    fn distribute_split_odd_chips() {
        let players = players(3);
        let pot = pot_with(&[(1, 25), (2, 25), (3, 25)]);

        // Two winners split 75, the first in seat order gets the odd chip.
        let payoffs = pot.distribute(&players, &[ids(&[3, 2]), ids(&[1])]);
        assert_eq!(
            payoffs,
            vec![
                Payoff {
                    player_id: PlayerId::new(2),
                    chips: Chips::new(38),
                },
                Payoff {
                    player_id: PlayerId::new(3),
                    chips: Chips::new(37),
                },
            ]
        );

        // Three way split of 100.
        let pot = pot_with(&[(1, 34), (2, 33), (3, 33)]);
        let payoffs = pot.distribute(&players, &[ids(&[1, 2, 3])]);
        let total = payoffs.iter().map(|p| p.chips).sum::<Chips>();
        assert_eq!(total, Chips::new(100));
        assert_eq!(payoffs[0].chips, Chips::new(34));
    }

    #[test]
    fn random_pots_conserve_chips() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..500 {
            let n = rng.random_range(2..=6);
            let mut players = players(n);
            let mut pot = Pot::new();

            for p in players.iter_mut() {
                pot.add_contribution(p.id, Chips::new(rng.random_range(0..=5) * 25));
                if rng.random_bool(0.3) {
                    p.fold();
                }
            }

            // At least one player must be in the hand.
            players[0].is_active = true;

            let pots = pot.side_pots(&players);
            assert_eq!(pots.iter().map(|p| p.amount).sum::<Chips>(), pot.total());

            for side_pot in &pots {
                for id in &side_pot.players {
                    let p = players.iter().find(|p| p.id == *id).unwrap();
                    assert!(p.is_active);
                }
            }

            let mut standings = players
                .iter()
                .filter(|p| p.is_active)
                .map(|p| vec![p.id])
                .collect::<Vec<_>>();
            standings.shuffle(&mut rng);

            let payoffs = pot.distribute(&players, &standings);
            let paid = payoffs.iter().map(|p| p.chips).sum::<Chips>();
            if pots.iter().all(|p| !p.players.is_empty()) {
                assert_eq!(paid, pot.total());
            }
        }
    }
}
