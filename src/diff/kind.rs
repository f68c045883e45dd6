//! Change categories and filter masks.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A set of change categories.
///
/// A single record carries exactly one of [`ADD`](Self::ADD),
/// [`REMOVE`](Self::REMOVE), [`MODIFY`](Self::MODIFY) or
/// [`NONE`](Self::NONE); unions of them are used as filter masks.
///
/// # Examples
///
/// ```rust
/// use ixseq::diff::DiffType;
///
/// let mask = DiffType::ADD | DiffType::MODIFY;
/// assert!(mask.contains(DiffType::ADD));
/// assert!(!mask.contains(DiffType::REMOVE));
/// assert_eq!(mask.to_string(), "ADD|MODIFY");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct DiffType {
    bits: u8,
}

impl DiffType {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };
    /// Present only after the change.
    pub const ADD: Self = Self { bits: 1 };
    /// Present only before the change.
    pub const REMOVE: Self = Self { bits: 1 << 1 };
    /// Matched, with a different value or position.
    pub const MODIFY: Self = Self { bits: 1 << 2 };
    /// Matched and identical.
    pub const NONE: Self = Self { bits: 1 << 3 };
    /// Every category.
    pub const ALL: Self = Self {
        bits: Self::ADD.bits | Self::REMOVE.bits | Self::MODIFY.bits | Self::NONE.bits,
    };

    const NAMES: [(Self, &'static str); 4] = [
        (Self::ADD, "ADD"),
        (Self::REMOVE, "REMOVE"),
        (Self::MODIFY, "MODIFY"),
        (Self::NONE, "NONE"),
    ];

    /// The raw bit representation.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// Builds a set from raw bits, dropping unknown ones.
    #[inline]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self {
            bits: bits & Self::ALL.bits,
        }
    }

    /// Whether every category of `other` is in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }

    /// Whether `self` and `other` share a category.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.bits & other.bits != 0
    }

    /// Whether the set is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Both sets together.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }
}

static_assertions::const_assert_eq!(DiffType::ALL.bits(), 0b1111);

impl BitOr for DiffType {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        self.union(other)
    }
}

impl BitOrAssign for DiffType {
    fn bitor_assign(&mut self, other: Self) {
        *self = self.union(other);
    }
}

impl BitAnd for DiffType {
    type Output = Self;

    fn bitand(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }
}

impl Not for DiffType {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_bits_truncate(!self.bits)
    }
}

impl fmt::Display for DiffType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return formatter.write_str("EMPTY");
        }
        let mut separator = "";
        for (kind, name) in Self::NAMES {
            if self.contains(kind) {
                write!(formatter, "{separator}{name}")?;
                separator = "|";
            }
        }
        Ok(())
    }
}

impl fmt::Debug for DiffType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "DiffType({self})")
    }
}
