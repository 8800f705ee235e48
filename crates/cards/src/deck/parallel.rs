// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel hand sampling.
use rand::prelude::*;
use std::{thread, time::Instant};

use super::{Card, CardsError, Deck};

/// Options for parallel sampling.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleOptions {
    /// Seed for the tasks generators, task `i` uses `seed + i`.
    pub seed: Option<u64>,
    /// Tasks stop sampling after this instant.
    pub deadline: Option<Instant>,
}

impl SampleOptions {
    fn task_rng(&self, task_id: usize) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(task_id as u64)),
            None => SmallRng::from_os_rng(),
        }
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Splits `total` items in `num_tasks` chunks that differ at most by one.
fn task_share(total: usize, num_tasks: usize, task_id: usize) -> usize {
    total / num_tasks + usize::from(task_id < total % num_tasks)
}

impl Deck {
    /// Calls the given closure from `num_tasks` parallel tasks generating a
    /// total of `samples` samples of size k.
    ///
    /// The closure takes an usize that is the task identifier (0..num_task)
    /// and a slice of k distinct cards drawn from the deck. Each task owns its
    /// random generator, tasks stop early if the options deadline expires.
    ///
    /// Panics if `num_tasks` is zero.
    pub fn par_sample<F>(
        &self,
        num_tasks: usize,
        samples: usize,
        k: usize,
        opts: &SampleOptions,
        f: F,
    ) -> Result<(), CardsError>
    where
        F: Fn(usize, &[Card]) + Send + Sync,
    {
        assert!(num_tasks > 0);
        self.check_sample_size(k)?;

        thread::scope(|s| {
            for task_id in 0..num_tasks {
                let f = &f;
                let count = task_share(samples, num_tasks, task_id);
                s.spawn(move || {
                    let mut h = Vec::with_capacity(k);
                    let mut rng = opts.task_rng(task_id);

                    for _ in 0..count {
                        if opts.expired() {
                            break;
                        }

                        h.clear();
                        h.extend(self.cards.choose_multiple(&mut rng, k));
                        f(task_id, &h);
                    }
                });
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_task_share() {
        assert_eq!(task_share(10, 3, 0), 4);
        assert_eq!(task_share(10, 3, 1), 3);
        assert_eq!(task_share(10, 3, 2), 3);
        assert_eq!((0..7).map(|t| task_share(1000, 7, t)).sum::<usize>(), 1000);
        assert_eq!(task_share(2, 4, 3), 0);
    }

    #[test]
    fn par_sample_counts() {
        let counters = (0..4).map(|_| AtomicU64::new(0)).collect::<Vec<_>>();
        let deck = Deck::default();

        deck.par_sample(4, 1_001, 9, &SampleOptions::default(), |task_id, hand| {
            assert_eq!(hand.len(), 9);
            counters[task_id].fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();

        let total = counters
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .sum::<u64>();
        assert_eq!(total, 1_001);
    }

    #[test]
    fn par_sample_seeded_is_reproducible() {
        let opts = SampleOptions {
            seed: Some(42),
            deadline: None,
        };

        let run = || {
            let sum = AtomicU64::new(0);
            Deck::default()
                .par_sample(2, 200, 5, &opts, |_, hand| {
                    let v = hand.iter().map(|c| c.rank().value() as u64).sum::<u64>();
                    sum.fetch_add(v, Ordering::Relaxed);
                })
                .unwrap();
            sum.load(Ordering::Relaxed)
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn par_sample_expired_deadline() {
        let opts = SampleOptions {
            seed: None,
            deadline: Some(Instant::now()),
        };

        let counter = AtomicU64::new(0);
        Deck::default()
            .par_sample(2, 1_000, 5, &opts, |_, _| {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        assert_eq!(counter.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn par_sample_too_many_cards() {
        let deck = Deck::remaining(&[Card::new(Rank::Ace, Suit::Spades)]);
        let res = deck.par_sample(2, 10, 52, &SampleOptions::default(), |_, _| {});
        assert_eq!(
            res,
            Err(CardsError::NotEnoughCards {
                requested: 52,
                remaining: 51
            })
        );
    }
}
