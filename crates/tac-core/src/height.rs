//! Ordered height levels for terrain and movement.
//!
//! Heights form a strict total order from the deepest water to a level that
//! blocks all movement.  The engine only ever *raises* a height (terrain,
//! obstacles, and modifiers assert floors), so `Ord` + `max` is the whole
//! arithmetic.  "Height could not be determined" (e.g. a footprint cell off
//! the grid) is expressed as `Option<Height>::None`, never as a variant.

use std::fmt;

/// A terrain or movement height category, ordered low to high.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Height {
    Deep,
    Shallow,
    Flat,
    Low,
    High,
    VeryHigh,
    Blocking,
}

impl Height {
    /// The lowest level — the starting point of every height resolution.
    pub const DEEPEST: Height = Height::Deep;

    /// All levels, lowest first.
    pub const ALL: [Height; 7] = [
        Height::Deep,
        Height::Shallow,
        Height::Flat,
        Height::Low,
        Height::High,
        Height::VeryHigh,
        Height::Blocking,
    ];

    /// Raise to at least `floor` (identity when already above it).
    #[inline]
    pub fn raised_to(self, floor: Height) -> Height {
        self.max(floor)
    }

    /// `true` only for [`Height::Blocking`], which no entity can move at.
    #[inline]
    pub fn is_blocking(self) -> bool {
        matches!(self, Height::Blocking)
    }

    /// Human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            Height::Deep     => "deep",
            Height::Shallow  => "shallow",
            Height::Flat     => "flat",
            Height::Low      => "low",
            Height::High     => "high",
            Height::VeryHigh => "very-high",
            Height::Blocking => "blocking",
        }
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
