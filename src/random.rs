// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Uniform random draws from discrete intervals.
//!
//! The random source is always supplied by the caller, so a seeded
//! `StdRng` gives reproducible draws. Elements are addressed by position
//! and resolved with [`Discrete::advance`]; the interval is never
//! materialised.

use crate::element::Discrete;
use crate::error::IntervalResult;
use crate::interval::Interval;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

impl<T: Discrete> Interval<T> {
    /// Position-addressed draw shared by the public helpers.
    fn draw_positions<R, F>(&self, rng: &mut R, mut positions: F) -> IntervalResult<Vec<T>>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R, u128) -> Vec<u128>,
    {
        let Some((first, _)) = self.effective_bounds()? else {
            return Ok(Vec::new());
        };
        let count = self.element_count()?;
        Ok(positions(rng, count)
            .into_iter()
            .filter_map(|position| {
                // Positions are below the element count, which never
                // exceeds 2^64 for the provided element types.
                debug_assert!(position <= u64::MAX as u128);
                first.advance(position as u64)
            })
            .collect())
    }

    /// Up to `n` distinct elements in random order.
    ///
    /// Uses Floyd's sampling, so memory grows with `n`, not with the
    /// interval. Fails with
    /// [`NotIntegerInterval`](crate::IntervalError::NotIntegerInterval) on
    /// infinite intervals.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> IntervalResult<Vec<T>> {
        self.draw_positions(rng, |rng, count| {
            let wanted = (n as u128).min(count);
            // `n` may be far larger than anything worth reserving up front.
            let reserve = wanted.min(1_024) as usize;
            let mut chosen = HashSet::with_capacity(reserve);
            let mut order = Vec::with_capacity(reserve);
            for j in (count - wanted)..count {
                let candidate = rng.gen_range(0..=j);
                let position = if chosen.insert(candidate) {
                    candidate
                } else {
                    chosen.insert(j);
                    j
                };
                order.push(position);
            }
            order.shuffle(rng);
            order
        })
    }

    /// One element, or `None` for an empty interval.
    pub fn pick_one<R: Rng + ?Sized>(&self, rng: &mut R) -> IntervalResult<Option<T>> {
        Ok(self.pick(rng, 1)?.pop())
    }

    /// `n` independent draws with replacement.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> IntervalResult<Vec<T>> {
        self.draw_positions(rng, |rng, count| {
            (0..n).map(|_| rng.gen_range(0..count)).collect()
        })
    }

    /// One draw, or `None` for an empty interval.
    pub fn roll_one<R: Rng + ?Sized>(&self, rng: &mut R) -> IntervalResult<Option<T>> {
        Ok(self.roll(rng, 1)?.pop())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Grapheme, Interval, IntervalError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn pick_returns_distinct_members() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = Interval::new(1, 10);
        let picked = range.pick(&mut rng, 5).unwrap();
        assert_eq!(picked.len(), 5);
        assert!(picked.iter().all(|x| range.contains(x)));
        let distinct: HashSet<_> = picked.iter().collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn pick_all_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut picked = Interval::new('a', 'f').pick(&mut rng, 100).unwrap();
        picked.sort();
        assert_eq!(picked, vec!['a', 'b', 'c', 'd', 'e', 'f']);
    }

    #[test]
    fn pick_with_oversized_request_returns_every_member() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut picked = Interval::new(1, 3).pick(&mut rng, usize::MAX).unwrap();
        picked.sort();
        assert_eq!(picked, vec![1, 2, 3]);
        assert!(Interval::new(3, 1).pick(&mut rng, usize::MAX).unwrap().is_empty());
    }

    #[test]
    fn synthetic_endpoints_refuse_to_draw() {
        let mut rng = StdRng::seed_from_u64(1);
        let accent = Grapheme::new("e\u{0301}").unwrap();
        for range in [
            Interval::new(Grapheme::from('a'), accent.clone()),
            Interval::new(accent, Grapheme::from('z')),
        ] {
            let synthetic = |err: IntervalError| matches!(err, IntervalError::SyntheticCodepoint(_));
            assert!(range.pick(&mut rng, 2).is_err_and(synthetic));
            assert!(range.pick_one(&mut rng).is_err_and(synthetic));
            assert!(range.roll(&mut rng, 2).is_err_and(synthetic));
            assert!(range.roll_one(&mut rng).is_err_and(synthetic));
        }
    }

    #[test]
    fn huge_interval_is_not_materialised() {
        let mut rng = StdRng::seed_from_u64(3);
        let range = Interval::new(i64::MIN, i64::MAX);
        let rolled = range.roll(&mut rng, 1_000).unwrap();
        assert_eq!(rolled.len(), 1_000);
        assert!(range.pick_one(&mut rng).unwrap().is_some());
    }

    #[test]
    fn roll_stays_in_range_and_may_repeat() {
        let mut rng = StdRng::seed_from_u64(42);
        let range = Interval::new(1, 2).excluding_start();
        let rolled = range.roll(&mut rng, 20).unwrap();
        assert!(rolled.iter().all(|&x| x == 2));
        assert_eq!(range.roll_one(&mut rng), Ok(Some(2)));
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let range = Interval::new(0u32, 1_000_000);
        let a = range.roll(&mut StdRng::seed_from_u64(99), 10).unwrap();
        let b = range.roll(&mut StdRng::seed_from_u64(99), 10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_and_infinite_intervals() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Interval::new(3, 1).pick_one(&mut rng), Ok(None));
        assert_eq!(Interval::new(3, 1).roll(&mut rng, 4), Ok(vec![]));
        assert!(matches!(
            Interval::at_least(0).roll_one(&mut rng),
            Err(IntervalError::NotIntegerInterval { .. })
        ));
    }
}
