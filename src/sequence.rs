// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lazy element sequences produced by discrete intervals.
//!
//! A [`Sequence`] is a description (first element and last bound), not a
//! cursor: every call to [`Sequence::iter`] starts a fresh traversal with its
//! own state, so finite and infinite sequences alike can be walked any number
//! of times. Nothing is buffered; each step applies
//! [`Discrete::successor`] once.

use crate::bound::Bound;
use crate::element::Discrete;
use std::iter::FusedIterator;

/// Restartable ascending sequence of the elements of an interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<T> {
    first: Option<T>,
    /// `Finite` is inclusive, `PosInfinite` is unbounded, `NegInfinite` is
    /// empty.
    last: Bound<T>,
}

impl<T: Discrete> Sequence<T> {
    pub(crate) fn new(first: Option<T>, last: Bound<T>) -> Self {
        Self { first, last }
    }

    /// Whether traversal never ends.
    pub fn is_infinite(&self) -> bool {
        self.first.is_some() && matches!(self.last, Bound::PosInfinite)
    }

    /// Start a new traversal.
    pub fn iter(&self) -> Iter<T> {
        Iter {
            next: self.first.clone(),
            last: self.last.clone(),
        }
    }
}

impl<T: Discrete> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            next: self.first,
            last: self.last,
        }
    }
}

impl<'a, T: Discrete> IntoIterator for &'a Sequence<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One traversal of a [`Sequence`].
#[derive(Debug, Clone)]
pub struct Iter<T> {
    next: Option<T>,
    last: Bound<T>,
}

impl<T: Discrete> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next.take()?;
        match &self.last {
            Bound::Finite(last) => {
                if current > *last {
                    return None;
                }
                if current < *last {
                    self.next = current.successor();
                }
            }
            Bound::PosInfinite => self.next = current.successor(),
            Bound::NegInfinite => return None,
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let Some(next) = &self.next else {
            return (0, Some(0));
        };
        match &self.last {
            Bound::Finite(last) => {
                let remaining = (next.distance(last) + 1).max(0);
                match usize::try_from(remaining) {
                    Ok(n) => (n, Some(n)),
                    Err(_) => (usize::MAX, None),
                }
            }
            Bound::PosInfinite => (usize::MAX, None),
            Bound::NegInfinite => (0, Some(0)),
        }
    }
}

impl<T: Discrete> FusedIterator for Iter<T> {}

/// Descending traversal of an interval.
///
/// Items are [`Bound`]s: finite elements for intervals with a finite end,
/// and an endless run of [`Bound::PosInfinite`] for intervals open towards
/// `+Inf`.
#[derive(Debug, Clone)]
pub struct Reversed<T> {
    state: ReverseState<T>,
}

#[derive(Debug, Clone)]
enum ReverseState<T> {
    Descending {
        next: Option<T>,
        /// `Finite` is inclusive, `NegInfinite` is unbounded, `PosInfinite`
        /// is empty.
        floor: Bound<T>,
    },
    Infinite,
}

impl<T: Discrete> Reversed<T> {
    pub(crate) fn new(last: Option<T>, floor: Bound<T>) -> Self {
        Self {
            state: ReverseState::Descending { next: last, floor },
        }
    }

    pub(crate) fn infinite() -> Self {
        Self {
            state: ReverseState::Infinite,
        }
    }
}

impl<T: Discrete> Iterator for Reversed<T> {
    type Item = Bound<T>;

    fn next(&mut self) -> Option<Bound<T>> {
        let ReverseState::Descending { next, floor } = &mut self.state else {
            return Some(Bound::PosInfinite);
        };
        let current = next.take()?;
        match floor {
            Bound::Finite(floor) => {
                if current < *floor {
                    return None;
                }
                if current > *floor {
                    *next = current.predecessor();
                }
            }
            Bound::NegInfinite => *next = current.predecessor(),
            Bound::PosInfinite => return None,
        }
        Some(Bound::Finite(current))
    }
}
