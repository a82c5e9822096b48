//! Compass model for square grids: eight step directions and the four
//! diagonal facing sectors.
//!
//! # Coordinate convention
//!
//! `x` grows eastward, `y` grows **southward** (row-major grids), so
//! `North = (0, -1)`.  All geometry in the engine goes through
//! [`Direction::offset`] so the convention lives in exactly one place.

use std::fmt;

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the eight compass directions an entity can face or step toward.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions in clockwise order starting from `North`.
    ///
    /// This order is also the deterministic tie-break for [`toward`](Self::toward):
    /// when two directions are equally close to a delta, the one listed first
    /// wins.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Grid delta `(dx, dy)` of a single step in this direction.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North     => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East      => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South     => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West      => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// The direction pointing the opposite way.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North     => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East      => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South     => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West      => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// Quantise to one of the four diagonal facing sectors.
    ///
    /// Each cardinal joins the sector of the diagonal clockwise from it:
    /// `N, NE → NE`, `E, SE → SE`, `S, SW → SW`, `W, NW → NW`.
    #[inline]
    pub fn sector(self) -> Sector {
        match self {
            Direction::North | Direction::NorthEast => Sector::NorthEast,
            Direction::East | Direction::SouthEast  => Sector::SouthEast,
            Direction::South | Direction::SouthWest => Sector::SouthWest,
            Direction::West | Direction::NorthWest  => Sector::NorthWest,
        }
    }

    /// Exact direction for a unit step delta, or `None` for anything that is
    /// not one of the eight adjacent offsets.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| d.offset() == (dx, dy))
    }

    /// The compass direction closest to an arbitrary non-zero delta.
    ///
    /// Ties (a delta exactly between two directions) are broken by clockwise
    /// order from `North` — the first equally-close direction in
    /// [`ALL`](Self::ALL) wins.
    pub fn toward(dx: i32, dy: i32) -> Direction {
        debug_assert!(dx != 0 || dy != 0, "toward() requires a non-zero delta");
        let len = ((dx * dx + dy * dy) as f64).sqrt();
        let (ux, uy) = (dx as f64 / len, dy as f64 / len);

        let mut best = Direction::North;
        let mut best_dot = f64::NEG_INFINITY;
        for d in Direction::ALL {
            let (ox, oy) = d.offset();
            let olen = ((ox * ox + oy * oy) as f64).sqrt();
            let dot = (ox as f64 * ux + oy as f64 * uy) / olen;
            if dot > best_dot + 1e-12 {
                best = d;
                best_dot = dot;
            }
        }
        best
    }

    /// Human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North     => "N",
            Direction::NorthEast => "NE",
            Direction::East      => "E",
            Direction::SouthEast => "SE",
            Direction::South     => "S",
            Direction::SouthWest => "SW",
            Direction::West      => "W",
            Direction::NorthWest => "NW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Sector ────────────────────────────────────────────────────────────────────

/// One of the four diagonal compass octants.
///
/// Footprint templates are oriented per sector, not per direction: a body
/// occupying several cells distinguishes only which quadrant it extends
/// into.  The occupy-height table is keyed by `(CellId, Sector)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sector {
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Sector {
    /// All sectors in clockwise order starting from `NorthEast`.
    pub const ALL: [Sector; 4] = [
        Sector::NorthEast,
        Sector::SouthEast,
        Sector::SouthWest,
        Sector::NorthWest,
    ];

    /// The diagonal direction at the centre of this sector — used as the
    /// representative entity facing after a turn in place.
    #[inline]
    pub fn diagonal(self) -> Direction {
        match self {
            Sector::NorthEast => Direction::NorthEast,
            Sector::SouthEast => Direction::SouthEast,
            Sector::SouthWest => Direction::SouthWest,
            Sector::NorthWest => Direction::NorthWest,
        }
    }

    /// Sign of the quadrant this sector extends into, as `(sx, sy)` with
    /// each component `+1` or `-1`.
    #[inline]
    pub fn signs(self) -> (i32, i32) {
        match self {
            Sector::NorthEast => (1, -1),
            Sector::SouthEast => (1, 1),
            Sector::SouthWest => (-1, 1),
            Sector::NorthWest => (-1, -1),
        }
    }

    /// The sector mirrored across the vertical axis (east ↔ west).
    #[inline]
    pub fn mirror_h(self) -> Sector {
        match self {
            Sector::NorthEast => Sector::NorthWest,
            Sector::SouthEast => Sector::SouthWest,
            Sector::SouthWest => Sector::SouthEast,
            Sector::NorthWest => Sector::NorthEast,
        }
    }

    /// The sector mirrored across the horizontal axis (north ↔ south).
    #[inline]
    pub fn mirror_v(self) -> Sector {
        match self {
            Sector::NorthEast => Sector::SouthEast,
            Sector::SouthEast => Sector::NorthEast,
            Sector::SouthWest => Sector::NorthWest,
            Sector::NorthWest => Sector::SouthWest,
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diagonal().as_str())
    }
}
