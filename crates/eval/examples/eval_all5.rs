// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_all5
// ...
// Total hands      2598960
//
// High Card:       1302540
// One Pair:        1098240
// Two Pair:        123552
// Three of a Kind: 54912
// Straight:        10200
// Flush:           5108
// Full House:      3744
// Four of a Kind:  624
// Straight Flush:  36
// Royal Flush:     4
// ```

use std::time::Instant;

use deuce_eval::*;

fn main() {
    let now = Instant::now();
    let cards = Deck::default().into_iter().collect::<Vec<_>>();
    let mut counts = ahash::AHashMap::new();

    for c1 in 0..52 {
        for c2 in (c1 + 1)..52 {
            for c3 in (c2 + 1)..52 {
                for c4 in (c3 + 1)..52 {
                    for c5 in (c4 + 1)..52 {
                        let hand = [cards[c1], cards[c2], cards[c3], cards[c4], cards[c5]];
                        if let Ok(v) = HandValue::eval(&hand) {
                            *counts.entry(v.display_category()).or_insert(0usize) += 1;
                        }
                    }
                }
            }
        }
    }

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.values().sum::<usize>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for category in HandCategory::categories() {
        let label = format!("{category}:");
        let count = counts.get(&category).copied().unwrap_or_default();
        println!("{label:<17}{count}");
    }
}
