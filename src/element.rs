// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Capabilities an element type supplies to [`Interval`](crate::Interval).
//!
//! - [`Element`] — ordering plus a compile-time discreteness flag. Every
//!   interval element implements it.
//! - [`Discrete`] — successor, predecessor and distance. Only intervals over
//!   discrete elements expose counting, indexing and enumeration.
//! - [`ScalarOrd`] — ordering against a [`Scalar`] of a different kind, used
//!   by heterogeneous membership tests.

use crate::error::{IntervalError, IntervalResult};
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// An ordered value usable as an interval bound.
pub trait Element: PartialOrd + Clone + fmt::Debug {
    /// Whether the type also implements [`Discrete`].
    const DISCRETE: bool = false;

    /// Short human label used in error messages.
    const KIND: &'static str;
}

/// An element type with a well-defined next and previous value.
pub trait Discrete: Element {
    /// The next value, or `None` past the type's maximum.
    fn successor(&self) -> Option<Self>;

    /// The previous value, or `None` before the type's minimum.
    fn predecessor(&self) -> Option<Self>;

    /// Signed number of successor steps from `self` to `other`.
    fn distance(&self, other: &Self) -> i128;

    /// The value `steps` successors after `self`.
    ///
    /// The default walks [`successor`](Discrete::successor) one step at a
    /// time; numeric types override it with direct arithmetic.
    fn advance(&self, steps: u64) -> Option<Self> {
        let mut current = self.clone();
        for _ in 0..steps {
            current = current.successor()?;
        }
        Some(current)
    }

    /// Rejects values that cannot seed an enumeration.
    fn check_enumerable(&self) -> IntervalResult<()> {
        Ok(())
    }
}

/// A scalar of one of the supported foreign kinds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scalar {
    Integer(i128),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Name of the scalar kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Scalar::Integer(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "text",
        }
    }

    pub(crate) fn incomparable<T: Element>(&self) -> IntervalError {
        IntervalError::Incomparable {
            scalar: self.kind(),
            element: T::KIND,
        }
    }
}

macro_rules! scalar_from {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                #[inline]
                fn from(value: $t) -> Self {
                    Scalar::$variant(value as $target)
                }
            }
        )*
    };
}

scalar_from!(Integer as i128: i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);
scalar_from!(Float as f64: f32, f64);

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<char> for Scalar {
    fn from(value: char) -> Self {
        Scalar::Text(value.to_string())
    }
}

/// Ordering of an element against a foreign [`Scalar`].
pub trait ScalarOrd: Element {
    /// How `self` orders relative to `scalar`.
    ///
    /// `Ok(None)` means the kinds are compatible but unordered (NaN);
    /// `Err` means the scalar kind is not supported for this element.
    fn cmp_scalar(&self, scalar: &Scalar) -> IntervalResult<Option<Ordering>>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Integers
// ═══════════════════════════════════════════════════════════════════════════

macro_rules! impl_discrete_int {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                const DISCRETE: bool = true;
                const KIND: &'static str = "integer";
            }

            impl Discrete for $t {
                #[inline]
                fn successor(&self) -> Option<Self> {
                    self.checked_add(1)
                }

                #[inline]
                fn predecessor(&self) -> Option<Self> {
                    self.checked_sub(1)
                }

                #[inline]
                fn distance(&self, other: &Self) -> i128 {
                    *other as i128 - *self as i128
                }

                #[inline]
                fn advance(&self, steps: u64) -> Option<Self> {
                    let target = (*self as i128).checked_add(steps as i128)?;
                    <$t>::try_from(target).ok()
                }
            }

            impl ScalarOrd for $t {
                fn cmp_scalar(&self, scalar: &Scalar) -> IntervalResult<Option<Ordering>> {
                    match scalar {
                        Scalar::Integer(other) => Ok(Some((*self as i128).cmp(other))),
                        Scalar::Float(other) => Ok((*self as f64).partial_cmp(other)),
                        Scalar::Text(_) => Err(scalar.incomparable::<Self>()),
                    }
                }
            }
        )*
    };
}

impl_discrete_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// ═══════════════════════════════════════════════════════════════════════════
// Floats (continuous)
// ═══════════════════════════════════════════════════════════════════════════

macro_rules! impl_continuous_float {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                const KIND: &'static str = "float";
            }

            impl ScalarOrd for $t {
                fn cmp_scalar(&self, scalar: &Scalar) -> IntervalResult<Option<Ordering>> {
                    match scalar {
                        Scalar::Integer(other) => Ok((*self as f64).partial_cmp(&(*other as f64))),
                        Scalar::Float(other) => Ok((*self as f64).partial_cmp(other)),
                        Scalar::Text(_) => Err(scalar.incomparable::<Self>()),
                    }
                }
            }
        )*
    };
}

impl_continuous_float!(f32, f64);

// ═══════════════════════════════════════════════════════════════════════════
// Characters
// ═══════════════════════════════════════════════════════════════════════════

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_LEN: u32 = 0x800;

/// Position of a char in the dense sequence of Unicode scalar values.
#[inline]
fn char_index(c: char) -> i128 {
    let u = c as u32;
    if u >= SURROGATE_START + SURROGATE_LEN {
        (u - SURROGATE_LEN) as i128
    } else {
        u as i128
    }
}

/// Inverse of [`char_index`].
#[inline]
fn char_at(index: i128) -> Option<char> {
    let index = u32::try_from(index).ok()?;
    let u = if index >= SURROGATE_START {
        index.checked_add(SURROGATE_LEN)?
    } else {
        index
    };
    char::from_u32(u)
}

impl Element for char {
    const DISCRETE: bool = true;
    const KIND: &'static str = "character";
}

impl Discrete for char {
    #[inline]
    fn successor(&self) -> Option<Self> {
        char_at(char_index(*self) + 1)
    }

    #[inline]
    fn predecessor(&self) -> Option<Self> {
        char_at(char_index(*self) - 1)
    }

    #[inline]
    fn distance(&self, other: &Self) -> i128 {
        char_index(*other) - char_index(*self)
    }

    #[inline]
    fn advance(&self, steps: u64) -> Option<Self> {
        char_at(char_index(*self) + steps as i128)
    }
}

impl ScalarOrd for char {
    fn cmp_scalar(&self, scalar: &Scalar) -> IntervalResult<Option<Ordering>> {
        match scalar {
            Scalar::Text(other) => {
                let mut buf = [0u8; 4];
                let encoded: &str = self.encode_utf8(&mut buf);
                Ok(Some(encoded.cmp(other.as_str())))
            }
            _ => Err(scalar.incomparable::<Self>()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Graphemes
// ═══════════════════════════════════════════════════════════════════════════

/// Whether `c` is a combining mark from the common diacritic blocks.
pub fn is_combining(c: char) -> bool {
    matches!(
        c as u32,
        0x0300..=0x036F | 0x0483..=0x0489 | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF | 0xFE20..=0xFE2F
    )
}

/// One user-visible character: a base char followed by zero or more
/// combining marks.
///
/// A grapheme made of more than one codepoint is *synthetic*: it has no
/// successor, so intervals whose endpoints are synthetic refuse to enumerate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Grapheme(String);

impl Grapheme {
    /// Parse a single grapheme; `None` for empty text, a leading combining
    /// mark, or more than one base character.
    pub fn new(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let base = chars.next()?;
        if is_combining(base) || !chars.all(is_combining) {
            return None;
        }
        Some(Self(text.to_owned()))
    }

    /// The base character.
    pub fn base(&self) -> char {
        // Construction guarantees at least one char.
        self.0.chars().next().unwrap_or_default()
    }

    /// Whether combining marks follow the base character.
    pub fn is_synthetic(&self) -> bool {
        self.0.chars().nth(1).is_some()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Grapheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Grapheme::new(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("{raw:?} is not a single grapheme")))
    }
}

impl From<char> for Grapheme {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

impl fmt::Display for Grapheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Element for Grapheme {
    const DISCRETE: bool = true;
    const KIND: &'static str = "grapheme";
}

impl Discrete for Grapheme {
    fn successor(&self) -> Option<Self> {
        self.base().successor().map(Self::from)
    }

    fn predecessor(&self) -> Option<Self> {
        self.base().predecessor().map(Self::from)
    }

    fn distance(&self, other: &Self) -> i128 {
        self.base().distance(&other.base())
    }

    fn advance(&self, steps: u64) -> Option<Self> {
        self.base().advance(steps).map(Self::from)
    }

    fn check_enumerable(&self) -> IntervalResult<()> {
        if self.is_synthetic() {
            Err(IntervalError::SyntheticCodepoint(self.0.clone()))
        } else {
            Ok(())
        }
    }
}

impl ScalarOrd for Grapheme {
    fn cmp_scalar(&self, scalar: &Scalar) -> IntervalResult<Option<Ordering>> {
        match scalar {
            Scalar::Text(other) => Ok(Some(self.0.as_str().cmp(other.as_str()))),
            _ => Err(scalar.incomparable::<Self>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_steps() {
        assert_eq!(5i32.successor(), Some(6));
        assert_eq!(i8::MAX.successor(), None);
        assert_eq!(0u8.predecessor(), None);
        assert_eq!(1i64.distance(&5), 4);
        assert_eq!(5i64.distance(&1), -4);
        assert_eq!(250u8.advance(5), Some(255));
        assert_eq!(250u8.advance(6), None);
        assert_eq!(u64::MIN.distance(&u64::MAX), u64::MAX as i128);
    }

    #[test]
    fn char_steps_skip_surrogates() {
        assert_eq!('a'.successor(), Some('b'));
        assert_eq!('\u{D7FF}'.successor(), Some('\u{E000}'));
        assert_eq!('\u{E000}'.predecessor(), Some('\u{D7FF}'));
        assert_eq!('\u{D7FF}'.distance(&'\u{E000}'), 1);
        assert_eq!(char::MAX.successor(), None);
        assert_eq!('\0'.predecessor(), None);
        assert_eq!('a'.advance(25), Some('z'));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn grapheme_deserialization_validates() {
        let accent: Grapheme = serde_json::from_str("\"e\u{0301}\"").unwrap();
        assert!(accent.is_synthetic());
        assert_eq!(accent.base(), 'e');

        let plain = Grapheme::from('a');
        let json = serde_json::to_string(&plain).unwrap();
        assert_eq!(json, "\"a\"");
        assert_eq!(serde_json::from_str::<Grapheme>(&json).unwrap(), plain);

        for bad in ["\"\"", "\"ab\"", "\"\u{0301}\""] {
            assert!(serde_json::from_str::<Grapheme>(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn discreteness_flags() {
        assert!(<i32 as Element>::DISCRETE);
        assert!(<char as Element>::DISCRETE);
        assert!(!<f64 as Element>::DISCRETE);
    }

    #[test]
    fn grapheme_parsing() {
        assert!(Grapheme::new("a").is_some());
        assert!(Grapheme::new("e\u{0301}").is_some_and(|g| g.is_synthetic()));
        assert!(Grapheme::new("").is_none());
        assert!(Grapheme::new("ab").is_none());
        assert!(Grapheme::new("\u{0301}").is_none());
    }

    #[test]
    fn synthetic_grapheme_refuses_enumeration() {
        let plain = Grapheme::from('e');
        let synthetic = Grapheme::new("e\u{0301}").unwrap();
        assert!(plain.check_enumerable().is_ok());
        assert_eq!(
            synthetic.check_enumerable(),
            Err(IntervalError::SyntheticCodepoint("e\u{0301}".into()))
        );
        assert_eq!(plain.successor(), Some(Grapheme::from('f')));
    }

    #[test]
    fn scalar_comparisons() {
        assert_eq!(3i32.cmp_scalar(&Scalar::from(2.5)), Ok(Some(Ordering::Greater)));
        assert_eq!(3u8.cmp_scalar(&Scalar::from(3)), Ok(Some(Ordering::Equal)));
        assert_eq!(2.0f64.cmp_scalar(&Scalar::from(3i64)), Ok(Some(Ordering::Less)));
        assert_eq!(f64::NAN.cmp_scalar(&Scalar::from(1.0)), Ok(None));
        assert_eq!('b'.cmp_scalar(&Scalar::from("a")), Ok(Some(Ordering::Greater)));
        assert_eq!(
            1i32.cmp_scalar(&Scalar::from("x")),
            Err(IntervalError::Incomparable {
                scalar: "text",
                element: "integer"
            })
        );
        assert!('a'.cmp_scalar(&Scalar::from(1)).is_err());
    }
}
