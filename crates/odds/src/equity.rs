// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Monte Carlo equity estimator.
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};
use thiserror::Error;

use deuce_cards::{Card, CardsError, Deck, SampleOptions};
use deuce_eval::{EvalError, HandValue, hand_strength, preflop_strength};

use crate::outs::{Outs, compute_outs};

/// Estimator errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OddsError {
    /// A hand has exactly two hole cards.
    #[error("expected 2 hole cards, got {0}")]
    HoleCards(usize),
    /// The board has at most five cards.
    #[error("expected at most 5 board cards, got {0}")]
    TooManyBoardCards(usize),
    /// A card is both in the hole and on the board, or repeated.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
    /// The time budget expired before any trial completed.
    #[error("no trials completed")]
    NoTrials,
    /// Deck error, i.e. not enough cards for the opponents.
    #[error(transparent)]
    Cards(#[from] CardsError),
    /// Evaluation error.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Checks the hole cards and board cards are a valid hand.
pub(crate) fn check_cards(hole: &[Card], board: &[Card]) -> Result<(), OddsError> {
    if hole.len() != 2 {
        return Err(OddsError::HoleCards(hole.len()));
    }

    if board.len() > 5 {
        return Err(OddsError::TooManyBoardCards(board.len()));
    }

    let cards = hole.iter().chain(board).collect::<Vec<_>>();
    for (idx, card) in cards.iter().enumerate() {
        if cards[idx + 1..].contains(card) {
            return Err(OddsError::DuplicateCard(**card));
        }
    }

    Ok(())
}

/// Win, tie, and lose counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityCounts {
    /// Trials where the hand beats every opponent.
    pub win: u64,
    /// Trials where no opponent is better and at least one ties.
    pub tie: u64,
    /// Trials where at least one opponent is better.
    pub lose: u64,
}

impl EquityCounts {
    /// The number of trials.
    pub fn total(&self) -> u64 {
        self.win + self.tie + self.lose
    }

    /// The win rate.
    pub fn win_rate(&self) -> f64 {
        self.rate(self.win)
    }

    /// The tie rate.
    pub fn tie_rate(&self) -> f64 {
        self.rate(self.tie)
    }

    /// The lose rate.
    pub fn lose_rate(&self) -> f64 {
        self.rate(self.lose)
    }

    /// The pot share, ties count half.
    pub fn equity(&self) -> f64 {
        self.win_rate() + self.tie_rate() / 2.0
    }

    fn rate(&self, count: u64) -> f64 {
        match self.total() {
            0 => 0.0,
            total => count as f64 / total as f64,
        }
    }
}

/// The pot and the chips to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallCost {
    /// The chips in the pot.
    pub pot: u32,
    /// The chips to call.
    pub call: u32,
}

/// An equity snapshot for a hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityEstimate {
    /// The simulation counts.
    pub counts: EquityCounts,
    /// Rate of trials won.
    pub win_rate: f64,
    /// Rate of trials tied.
    pub tie_rate: f64,
    /// Rate of trials lost.
    pub lose_rate: f64,
    /// Outs on the flop and on the turn.
    pub outs: Vec<Outs>,
    /// The pot odds if there is a call cost.
    pub pot_odds: Option<f64>,
    /// The call expected value if there is a call cost.
    pub expected_value: Option<f64>,
    /// A `[0, 1]` score for the current hand.
    pub hand_strength: f64,
}

impl EquityEstimate {
    /// The number of trials run, lower than requested if the time budget
    /// expired.
    pub fn trials(&self) -> u64 {
        self.counts.total()
    }

    /// The total number of outs.
    pub fn total_outs(&self) -> usize {
        self.outs.iter().map(|o| o.count()).sum()
    }
}

/// Returns the fraction of the final pot a call costs.
pub fn pot_odds(pot: u32, call: u32) -> f64 {
    if call == 0 {
        0.0
    } else {
        f64::from(call) / (f64::from(pot) + f64::from(call))
    }
}

/// Returns the expected chips won by calling.
pub fn expected_value(win_rate: f64, pot: u32, call: u32) -> f64 {
    let win_amount = f64::from(pot) + f64::from(call);
    win_rate * win_amount - (1.0 - win_rate) * f64::from(call)
}

#[derive(Default)]
struct Counter {
    win: AtomicU64,
    tie: AtomicU64,
    lose: AtomicU64,
}

impl Counter {
    fn counts(&self) -> EquityCounts {
        EquityCounts {
            win: self.win.load(Ordering::Relaxed),
            tie: self.tie.load(Ordering::Relaxed),
            lose: self.lose.load(Ordering::Relaxed),
        }
    }
}

/// Monte Carlo equity estimator.
///
/// Each trial completes the board and deals two cards to each opponent from
/// the cards that are not in the hand, trials are split between tasks that
/// own their random generator.
#[derive(Debug, Clone, Copy)]
pub struct Estimator {
    trials: usize,
    tasks: usize,
    budget: Option<Duration>,
    seed: Option<u64>,
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(1_000)
    }
}

impl Estimator {
    const BOARD_SIZE: usize = 5;
    const HAND_SIZE: usize = 7;

    /// Creates an estimator that runs `trials` simulations on one task.
    pub fn new(trials: usize) -> Self {
        Self {
            trials,
            tasks: 1,
            budget: None,
            seed: None,
        }
    }

    /// Splits the trials between `tasks` parallel tasks.
    pub fn with_tasks(mut self, tasks: usize) -> Self {
        self.tasks = tasks.max(1);
        self
    }

    /// Stops the simulation after `budget` time.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Seeds the tasks random generators.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The number of trials.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Estimates a hand win, tie, and lose rates against `opponents` players.
    ///
    /// The estimate includes the hand outs, its strength, and when a call
    /// cost is given the pot odds and the call expected value.
    pub fn estimate_equity(
        &self,
        hole: &[Card],
        board: &[Card],
        opponents: usize,
        call: Option<CallCost>,
    ) -> Result<EquityEstimate, OddsError> {
        check_cards(hole, board)?;

        let now = Instant::now();
        let counts = self.simulate(hole, board, opponents)?;
        if counts.total() == 0 {
            return Err(OddsError::NoTrials);
        }

        let outs = compute_outs(hole, board)?;
        let hand_strength = if board.is_empty() {
            preflop_strength(hole[0], hole[1])
        } else {
            let cards = hole.iter().chain(board).copied().collect::<Vec<_>>();
            match HandValue::eval(&cards) {
                Ok(value) => hand_strength(&value),
                Err(_) => preflop_strength(hole[0], hole[1]),
            }
        };

        let win_rate = counts.win_rate();
        let estimate = EquityEstimate {
            counts,
            win_rate,
            tie_rate: counts.tie_rate(),
            lose_rate: counts.lose_rate(),
            outs,
            pot_odds: call.map(|c| pot_odds(c.pot, c.call)),
            expected_value: call.map(|c| expected_value(win_rate, c.pot, c.call)),
            hand_strength,
        };

        debug!(
            "Equity win {:.3} tie {:.3} lose {:.3} over {} trials in {:.3}s",
            estimate.win_rate,
            estimate.tie_rate,
            estimate.lose_rate,
            estimate.trials(),
            now.elapsed().as_secs_f64()
        );

        Ok(estimate)
    }

    fn simulate(
        &self,
        hole: &[Card],
        board: &[Card],
        opponents: usize,
    ) -> Result<EquityCounts, OddsError> {
        // Create per task counters to avoid contention.
        let task_counters = (0..self.tasks)
            .map(|_| Counter::default())
            .collect::<Vec<_>>();

        // Remove known cards from the deck so that we don't sample them.
        let known = hole.iter().chain(board).copied().collect::<Vec<_>>();
        let deck = Deck::remaining(&known);

        // Two cards for each opponent plus the missing board cards.
        let missing = Self::BOARD_SIZE - board.len();
        let sample_size = opponents * 2 + missing;

        let opts = SampleOptions {
            seed: self.seed,
            deadline: self.budget.map(|b| Instant::now() + b),
        };

        deck.par_sample(self.tasks, self.trials, sample_size, &opts, |task_id, sample| {
            // Hole cards first followed by the full board.
            let mut hand = [hole[0]; Self::HAND_SIZE];
            hand[1] = hole[1];
            hand[2..2 + board.len()].copy_from_slice(board);
            hand[2 + board.len()..].copy_from_slice(&sample[opponents * 2..]);

            // Hands always have 7 cards.
            let Ok(hvalue) = HandValue::eval(&hand) else {
                return;
            };

            let mut has_lost = false;
            let mut has_tied = false;
            for player in 0..opponents {
                hand[0] = sample[player * 2];
                hand[1] = sample[player * 2 + 1];
                let Ok(ovalue) = HandValue::eval(&hand) else {
                    return;
                };

                if ovalue > hvalue {
                    has_lost = true;
                    break;
                } else if ovalue == hvalue {
                    has_tied = true;
                }
            }

            let counter = &task_counters[task_id];
            let outcome = if has_lost {
                &counter.lose
            } else if has_tied {
                &counter.tie
            } else {
                &counter.win
            };

            outcome.fetch_add(1, Ordering::Relaxed);
        })?;

        // Aggregate counters.
        let counts = task_counters
            .iter()
            .map(Counter::counts)
            .fold(EquityCounts::default(), |acc, c| EquityCounts {
                win: acc.win + c.win,
                tie: acc.tie + c.tie,
                lose: acc.lose + c.lose,
            });

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deuce_cards::parse_cards;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    #[test]
    fn pot_odds_and_ev() {
        assert!((pot_odds(100, 20) - 20.0 / 120.0).abs() < 1e-9);
        assert_eq!(pot_odds(100, 0), 0.0);
        assert!((expected_value(0.30, 100, 20) - 22.0).abs() < 1e-9);
        assert!(expected_value(0.1, 100, 50) < 0.0);
    }

    #[test]
    fn counts_rates() {
        let counts = EquityCounts {
            win: 6,
            tie: 2,
            lose: 2,
        };
        assert_eq!(counts.total(), 10);
        assert!((counts.win_rate() - 0.6).abs() < 1e-9);
        assert!((counts.equity() - 0.7).abs() < 1e-9);
        assert_eq!(EquityCounts::default().win_rate(), 0.0);
    }

    #[test]
    fn made_flush_beats_high_card() {
        let board = cards("2h 7h 9h Jc 3d");
        let estimator = Estimator::new(2_000).with_seed(7);

        for _ in 0..3 {
            let flush = estimator
                .estimate_equity(&cards("Ah Kh"), &board, 1, None)
                .unwrap();
            let high_card = estimator
                .estimate_equity(&cards("Qs 5c"), &board, 1, None)
                .unwrap();

            assert!(flush.win_rate > high_card.win_rate + 0.3);
            assert!(flush.win_rate > 0.9);
        }
    }

    #[test]
    fn rates_sum_to_one() {
        let estimate = Estimator::new(1_000)
            .with_tasks(3)
            .with_seed(1)
            .estimate_equity(
                &cards("As Ad"),
                &cards("Kd 7c 2s"),
                3,
                Some(CallCost { pot: 100, call: 20 }),
            )
            .unwrap();

        assert_eq!(estimate.trials(), 1_000);
        let sum = estimate.win_rate + estimate.tie_rate + estimate.lose_rate;
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((estimate.pot_odds.unwrap() - 20.0 / 120.0).abs() < 1e-9);
        let ev = expected_value(estimate.win_rate, 100, 20);
        assert_eq!(estimate.expected_value, Some(ev));

        // Two more aces make three of a kind.
        assert_eq!(estimate.total_outs(), 2);
        assert!((estimate.hand_strength - 0.29).abs() < 1e-9);
    }

    #[test]
    fn seeded_estimates_repeat() {
        let estimator = Estimator::new(500).with_tasks(2).with_seed(99);
        let hole = cards("Tc Jc");

        let e1 = estimator.estimate_equity(&hole, &[], 2, None).unwrap();
        let e2 = estimator.estimate_equity(&hole, &[], 2, None).unwrap();
        assert_eq!(e1.counts, e2.counts);
        assert!(e1.outs.is_empty());
        assert_eq!(e1.hand_strength, preflop_strength(hole[0], hole[1]));
    }

    #[test]
    fn no_opponents_always_wins() {
        let estimate = Estimator::new(100)
            .estimate_equity(&cards("2c 7d"), &cards("As Ks Qs"), 0, None)
            .unwrap();
        assert_eq!(estimate.counts.win, 100);
        assert_eq!(estimate.win_rate, 1.0);
    }

    #[test]
    fn river_tie_on_board() {
        // Royal flush on the board splits every pot.
        let estimate = Estimator::new(200)
            .estimate_equity(&cards("2c 3d"), &cards("As Ks Qs Js Ts"), 2, None)
            .unwrap();
        assert_eq!(estimate.counts.tie, 200);
    }

    #[test]
    fn invalid_hands() {
        let estimator = Estimator::new(10);
        let res = estimator.estimate_equity(&cards("As"), &[], 1, None);
        assert_eq!(res, Err(OddsError::HoleCards(1)));

        let res = estimator.estimate_equity(&cards("As Kd"), &cards("Kd 2c 3c"), 1, None);
        assert!(matches!(res, Err(OddsError::DuplicateCard(_))));

        let board = cards("2c 3c 4c 5c 6c 7c");
        let res = estimator.estimate_equity(&cards("As Kd"), &board, 1, None);
        assert_eq!(res, Err(OddsError::TooManyBoardCards(6)));

        // 2 * 24 + 5 cards cannot be dealt from 50.
        let res = estimator.estimate_equity(&cards("As Kd"), &[], 24, None);
        assert!(matches!(res, Err(OddsError::Cards(_))));
    }

    #[test]
    fn expired_budget() {
        let res = Estimator::new(1_000)
            .with_time_budget(Duration::ZERO)
            .estimate_equity(&cards("As Kd"), &[], 1, None);
        assert_eq!(res, Err(OddsError::NoTrials));
    }
}
