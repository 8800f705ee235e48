// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Terminal reports.
use anyhow::Result;
use crossterm::{
    queue,
    style::{self, Stylize},
};
use std::io;

use deuce_cards::{Card, Suit};
use deuce_core::pot::{Pot, SidePot};
use deuce_eval::HandValue;
use deuce_odds::{EquityEstimate, Outs};

/// Prints cards with the red suits in red.
fn print_cards(w: &mut impl io::Write, cards: &[Card]) -> Result<()> {
    for (idx, card) in cards.iter().enumerate() {
        if idx > 0 {
            queue!(w, style::Print(" "))?;
        }

        let text = card.symbol();
        let styled = match card.suit() {
            Suit::Hearts | Suit::Diamonds => text.as_str().red(),
            Suit::Clubs | Suit::Spades => text.as_str().stylize(),
        };

        queue!(w, style::PrintStyledContent(styled))?;
    }

    Ok(())
}

fn print_row(w: &mut impl io::Write, label: &str, value: String) -> Result<()> {
    queue!(
        w,
        style::PrintStyledContent(format!("{label:<12}").dark_green()),
        style::Print(value),
        style::Print("\n"),
    )?;

    Ok(())
}

fn percent(p: f64) -> String {
    format!("{:6.2}%", p * 100.0)
}

/// Prints a hand value and its strength.
pub fn print_hand(w: &mut impl io::Write, value: &HandValue, strength: f64) -> Result<()> {
    queue!(w, style::PrintStyledContent(format!("{:<12}", "Hand").dark_green()))?;
    print_cards(w, value.cards())?;
    queue!(w, style::Print("\n"))?;

    print_row(w, "Category", value.display_category().to_string())?;
    print_row(w, "Description", value.description())?;
    print_row(w, "Strength", format!("{strength:.3}"))?;

    w.flush()?;
    Ok(())
}

/// Prints an equity estimate.
pub fn print_equity(w: &mut impl io::Write, estimate: &EquityEstimate) -> Result<()> {
    print_row(w, "Trials", estimate.trials().to_string())?;
    print_row(w, "Win", percent(estimate.win_rate))?;
    print_row(w, "Tie", percent(estimate.tie_rate))?;
    print_row(w, "Lose", percent(estimate.lose_rate))?;
    print_row(w, "Strength", format!("{:.3}", estimate.hand_strength))?;

    if let Some(pot_odds) = estimate.pot_odds {
        print_row(w, "Pot odds", percent(pot_odds))?;
    }

    if let Some(ev) = estimate.expected_value {
        let text = format!("{ev:+.2}");
        let styled = if ev >= 0.0 {
            text.as_str().green()
        } else {
            text.as_str().red()
        };

        queue!(
            w,
            style::PrintStyledContent(format!("{:<12}", "EV").dark_green()),
            style::PrintStyledContent(styled),
            style::Print("\n"),
        )?;
    }

    if !estimate.outs.is_empty() {
        print_row(w, "Outs", estimate.total_outs().to_string())?;
        print_outs(w, &estimate.outs)?;
    } else {
        w.flush()?;
    }

    Ok(())
}

/// Prints the outs for each draw.
pub fn print_outs(w: &mut impl io::Write, outs: &[Outs]) -> Result<()> {
    if outs.is_empty() {
        queue!(w, style::Print("No outs\n"))?;
    }

    for draw in outs {
        queue!(
            w,
            style::PrintStyledContent(format!("{:<32}", draw.to_string()).dark_green()),
        )?;
        print_cards(w, &draw.cards)?;
        queue!(w, style::Print("\n"))?;
    }

    w.flush()?;
    Ok(())
}

/// Prints the pot layers.
pub fn print_pots(w: &mut impl io::Write, pot: &Pot, pots: &[SidePot]) -> Result<()> {
    print_row(w, "Total", pot.total().to_string())?;

    for (idx, side) in pots.iter().enumerate() {
        let label = if idx == 0 {
            "Main".to_string()
        } else {
            format!("Side {idx}")
        };

        let players = side
            .players
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        print_row(w, &label, format!("{:<10} {players}", side.amount.to_string()))?;
    }

    w.flush()?;
    Ok(())
}
