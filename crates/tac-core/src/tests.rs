//! Unit tests for tac-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CellId, EntityId};

    #[test]
    fn index_helper() {
        assert_eq!(CellId(42).index(), 42);
        assert_eq!(EntityId(7).index(), 7);
    }

    #[test]
    fn ordering() {
        assert!(CellId(0) < CellId(1));
        assert!(EntityId(100) > EntityId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(CellId::INVALID.0, u32::MAX);
        assert!(!CellId::INVALID.is_valid());
        assert!(CellId(0).is_valid());
        assert_eq!(EntityId::default(), EntityId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(CellId(7).to_string(), "CellId(7)");
    }
}

#[cfg(test)]
mod direction {
    use crate::{Direction, Sector};

    #[test]
    fn offsets_are_unit_steps() {
        for d in Direction::ALL {
            let (dx, dy) = d.offset();
            assert!(dx.abs() <= 1 && dy.abs() <= 1);
            assert!(dx != 0 || dy != 0);
        }
    }

    #[test]
    fn opposite_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            let (dx, dy) = d.offset();
            assert_eq!(d.opposite().offset(), (-dx, -dy));
        }
    }

    #[test]
    fn from_offset_roundtrip() {
        for d in Direction::ALL {
            let (dx, dy) = d.offset();
            assert_eq!(Direction::from_offset(dx, dy), Some(d));
        }
        assert_eq!(Direction::from_offset(0, 0), None);
        assert_eq!(Direction::from_offset(2, 0), None);
    }

    #[test]
    fn toward_exact_directions() {
        assert_eq!(Direction::toward(0, -5), Direction::North);
        assert_eq!(Direction::toward(3, 3), Direction::SouthEast);
        assert_eq!(Direction::toward(-1, 0), Direction::West);
    }

    #[test]
    fn toward_tie_breaks_clockwise_from_north() {
        // (1, -2): cos to N = 2/√5 ≈ 0.894, to NE = 3/√10 ≈ 0.949 → NE.
        assert_eq!(Direction::toward(1, -2), Direction::NorthEast);
        // (1, -1) is equally close to NE and to nothing else — sanity check.
        assert_eq!(Direction::toward(1, -1), Direction::NorthEast);
        // Deltas straddling the N/NE bisector resolve to the nearer side.
        assert_eq!(Direction::toward(38, -92), Direction::North);
        assert_eq!(Direction::toward(40, -92), Direction::NorthEast);
    }

    #[test]
    fn sector_quantisation() {
        assert_eq!(Direction::North.sector(), Sector::NorthEast);
        assert_eq!(Direction::NorthEast.sector(), Sector::NorthEast);
        assert_eq!(Direction::East.sector(), Sector::SouthEast);
        assert_eq!(Direction::South.sector(), Sector::SouthWest);
        assert_eq!(Direction::West.sector(), Sector::NorthWest);
    }

    #[test]
    fn sector_mirrors() {
        for s in Sector::ALL {
            assert_eq!(s.mirror_h().mirror_h(), s);
            assert_eq!(s.mirror_v().mirror_v(), s);
            // Mirroring both axes is a point reflection.
            assert_ne!(s.mirror_h().mirror_v(), s);
        }
        assert_eq!(Sector::NorthEast.mirror_h(), Sector::NorthWest);
        assert_eq!(Sector::NorthEast.mirror_v(), Sector::SouthEast);
    }

    #[test]
    fn sector_diagonal_is_in_sector() {
        for s in Sector::ALL {
            assert_eq!(s.diagonal().sector(), s);
        }
    }
}

#[cfg(test)]
mod height {
    use crate::Height;

    #[test]
    fn strict_total_order() {
        for pair in Height::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(Height::DEEPEST, Height::Deep);
    }

    #[test]
    fn raised_to_is_max() {
        assert_eq!(Height::Deep.raised_to(Height::Flat), Height::Flat);
        assert_eq!(Height::High.raised_to(Height::Flat), Height::High);
    }

    #[test]
    fn blocking() {
        assert!(Height::Blocking.is_blocking());
        assert!(!Height::VeryHigh.is_blocking());
    }
}

#[cfg(test)]
mod cost {
    use crate::{BASE_STEP_COST, IMPASSABLE_COST, is_impassable};

    #[test]
    fn thresholds() {
        assert!(!is_impassable(BASE_STEP_COST));
        assert!(is_impassable(IMPASSABLE_COST));
        assert!(is_impassable(IMPASSABLE_COST + 1.0));
    }
}
