// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deuce CLI, evaluates hands, estimates equity, and splits pots.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use clap::{Parser, Subcommand, value_parser};
use log::info;
use std::{io, time::Duration};

use deuce_cards::{Card, parse_cards};
use deuce_core::{
    poker::{Chips, Player, PlayerId},
    pot::Pot,
};
use deuce_eval::{HandValue, hand_strength};
use deuce_odds::{CallCost, Estimator, compute_outs};

mod report;

#[derive(Debug, Parser)]
#[clap(name = "deuce", version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluates the best five cards hand, i.e. "As Ks Qs Js Ts 2h 3d".
    Eval {
        /// Five to seven cards.
        cards: String,
    },
    /// Estimates a hand equity with Monte Carlo simulations.
    Equity {
        /// The two hole cards, i.e. "Ah Kh".
        hole: String,
        /// Zero to five board cards.
        #[clap(default_value = "")]
        board: String,
        /// The number of opponents.
        #[clap(long, short, default_value_t = 1, value_parser = value_parser!(u8).range(0..=9))]
        opponents: u8,
        /// The number of simulations.
        #[clap(long, short, default_value_t = 10_000)]
        trials: usize,
        /// The number of parallel tasks.
        #[clap(long, default_value_t = 1, value_parser = value_parser!(u8).range(1..=64))]
        tasks: u8,
        /// Stops the simulation after this many milliseconds.
        #[clap(long)]
        budget_ms: Option<u64>,
        /// Seed for reproducible simulations.
        #[clap(long)]
        seed: Option<u64>,
        /// The chips in the pot.
        #[clap(long, default_value_t = 0)]
        pot: u32,
        /// The chips to call.
        #[clap(long)]
        call: Option<u32>,
    },
    /// Lists the outs on the flop or on the turn.
    Outs {
        /// The two hole cards.
        hole: String,
        /// Three or four board cards.
        board: String,
    },
    /// Splits a pot given the players contributions in seat order.
    Pots {
        /// Each player contribution, i.e. "100 100 30".
        #[clap(required = true, num_args = 1..)]
        contributions: Vec<u32>,
        /// Seats (starting from 1) of the players that folded.
        #[clap(long, short, num_args = 1..)]
        folded: Vec<usize>,
    },
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout();

    match cli.command {
        Command::Eval { cards } => {
            let cards = parse_cards(&cards)?;
            let value = HandValue::eval(&cards)?;
            report::print_hand(&mut stdout, &value, hand_strength(&value))?;
        }
        Command::Equity {
            hole,
            board,
            opponents,
            trials,
            tasks,
            budget_ms,
            seed,
            pot,
            call,
        } => {
            let (hole, board) = parse_hand(&hole, &board)?;

            let mut estimator = Estimator::new(trials).with_tasks(tasks as usize);
            if let Some(ms) = budget_ms {
                estimator = estimator.with_time_budget(Duration::from_millis(ms));
            }

            if let Some(seed) = seed {
                estimator = estimator.with_seed(seed);
            }

            let call = call.map(|call| CallCost { pot, call });
            let estimate = estimator.estimate_equity(&hole, &board, opponents as usize, call)?;
            info!("Simulated {} of {trials} trials", estimate.trials());
            report::print_equity(&mut stdout, &estimate)?;
        }
        Command::Outs { hole, board } => {
            let (hole, board) = parse_hand(&hole, &board)?;
            if !matches!(board.len(), 3 | 4) {
                bail!("Outs need 3 or 4 board cards, got {}", board.len());
            }

            let outs = compute_outs(&hole, &board)?;
            report::print_outs(&mut stdout, &outs)?;
        }
        Command::Pots {
            contributions,
            folded,
        } => {
            let mut players = Vec::with_capacity(contributions.len());
            let mut pot = Pot::new();

            for (idx, amount) in contributions.iter().enumerate() {
                let seat = idx + 1;
                let id = PlayerId::new(seat as u32);
                let mut player = Player::new(id, format!("Seat {seat}"), Chips::ZERO);
                player.is_active = !folded.contains(&seat);
                pot.add_contribution(id, Chips::new(*amount));
                players.push(player);
            }

            if let Some(seat) = folded.iter().find(|s| **s == 0 || **s > players.len()) {
                bail!("Invalid folded seat {seat}");
            }

            report::print_pots(&mut stdout, &pot, &pot.side_pots(&players))?;
        }
    }

    Ok(())
}

/// Parses hole and board cards, the hand cannot repeat cards.
fn parse_hand(hole: &str, board: &str) -> Result<(Vec<Card>, Vec<Card>)> {
    let hole = parse_cards(hole)?;
    if hole.len() != 2 {
        bail!("Expected 2 hole cards, got {}", hole.len());
    }

    let board = parse_cards(board)?;
    if let Some(card) = board.iter().find(|c| hole.contains(c)) {
        bail!("Card {card} is both in the hole and on the board");
    }

    Ok((hole, board))
}
