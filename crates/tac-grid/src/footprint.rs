//! Footprint templates — the set of cells an entity's body occupies.
//!
//! Every symmetry-dependent question the engine asks goes through this one
//! trait (`symmetric_h`/`symmetric_v`, `cells`, `turn_in_place`,
//! `new_cells_on_step`) so no caller re-derives symmetry branching on its
//! own.

use tac_core::{CellId, Direction, Sector};

use crate::grid::TileGrid;

// ── Footprint ─────────────────────────────────────────────────────────────────

/// The query contract for an entity's body shape.
///
/// A footprint is a function of the *main cell* and the *facing sector*;
/// multi-cell bodies rotate by sector, not by full 8-way direction.  All
/// cell queries answer `None` when any body cell would fall off the grid.
pub trait Footprint: Send + Sync {
    /// `true` when mirroring the facing east ↔ west leaves the footprint
    /// unchanged.
    fn symmetric_h(&self) -> bool;

    /// `true` when mirroring the facing north ↔ south leaves the footprint
    /// unchanged.
    fn symmetric_v(&self) -> bool;

    /// The ordered cells occupied with the main cell at `main`, facing
    /// `sector`.  The main cell is first.
    fn cells(&self, grid: &TileGrid, main: CellId, sector: Sector) -> Option<Vec<CellId>>;

    /// The new main cell after turning in place from `from` to `to` without
    /// spatial movement — the occupied cell set stays fixed while the main
    /// cell moves to the corner matching the new sector.
    fn turn_in_place(&self, grid: &TileGrid, main: CellId, from: Sector, to: Sector)
    -> Option<CellId>;

    /// The cells newly entered when the footprint steps one cell toward
    /// `step` while keeping `facing` — the difference between the body at
    /// the destination and the body at `main`.
    fn new_cells_on_step(
        &self,
        grid: &TileGrid,
        main: CellId,
        facing: Sector,
        step: Direction,
    ) -> Option<Vec<CellId>> {
        let next = grid.neighbor(main, step)?;
        let before = self.cells(grid, main, facing)?;
        let after = self.cells(grid, next, facing)?;
        Some(after.into_iter().filter(|c| !before.contains(c)).collect())
    }

    /// `true` when facing never changes the footprint at all.
    fn fully_symmetric(&self) -> bool {
        self.symmetric_h() && self.symmetric_v()
    }

    /// Whether two facing sectors produce the same footprint under this
    /// template's symmetry flags.  Used to scope dominance comparisons and
    /// route facing filters.
    fn equivalent_facing(&self, a: Sector, b: Sector) -> bool {
        if a == b {
            return true;
        }
        (self.symmetric_h() && a.mirror_h() == b)
            || (self.symmetric_v() && a.mirror_v() == b)
            || (self.symmetric_h() && self.symmetric_v() && a.mirror_h().mirror_v() == b)
    }

    /// The representative of `sector`'s facing-equivalence class — the
    /// first equivalent sector in [`Sector::ALL`] order.  Tables keyed by
    /// footprint facing use this so equivalent facings share one entry.
    fn canonical_sector(&self, sector: Sector) -> Sector {
        Sector::ALL
            .into_iter()
            .find(|&s| self.equivalent_facing(s, sector))
            .unwrap_or(sector)
    }
}

// ── SingleCell ────────────────────────────────────────────────────────────────

/// The common case: a body occupying exactly its main cell.  Fully
/// symmetric, so the engine never generates turn-in-place nodes for it.
#[derive(Copy, Clone, Debug, Default)]
pub struct SingleCell;

impl Footprint for SingleCell {
    fn symmetric_h(&self) -> bool {
        true
    }

    fn symmetric_v(&self) -> bool {
        true
    }

    fn cells(&self, grid: &TileGrid, main: CellId, _sector: Sector) -> Option<Vec<CellId>> {
        grid.contains(main).then(|| vec![main])
    }

    fn turn_in_place(
        &self,
        grid: &TileGrid,
        main: CellId,
        _from: Sector,
        _to: Sector,
    ) -> Option<CellId> {
        grid.contains(main).then_some(main)
    }
}

// ── RectTemplate ──────────────────────────────────────────────────────────────

/// A `w` × `h` rectangular body anchored at the main cell, extending into
/// the facing sector's quadrant.
///
/// Symmetry falls out of the dimensions: a 1-wide body looks the same
/// mirrored east ↔ west (`symmetric_h`), a 1-tall body mirrored
/// north ↔ south (`symmetric_v`), and 1×1 degenerates to [`SingleCell`]
/// behavior.
#[derive(Copy, Clone, Debug)]
pub struct RectTemplate {
    w: u32,
    h: u32,
}

impl RectTemplate {
    /// # Panics
    /// Panics if either dimension is zero (caller misuse).
    pub fn new(w: u32, h: u32) -> RectTemplate {
        assert!(w > 0 && h > 0, "footprint dimensions must be non-zero");
        RectTemplate { w, h }
    }

    /// Inclusive bounds `(x0, y0, x1, y1)` of the body with the main cell
    /// at `(mx, my)` facing `sector`.
    fn bounds(&self, mx: i32, my: i32, sector: Sector) -> (i32, i32, i32, i32) {
        let (sx, sy) = sector.signs();
        let fx = mx + sx * (self.w as i32 - 1);
        let fy = my + sy * (self.h as i32 - 1);
        (mx.min(fx), my.min(fy), mx.max(fx), my.max(fy))
    }
}

impl Footprint for RectTemplate {
    fn symmetric_h(&self) -> bool {
        self.w == 1
    }

    fn symmetric_v(&self) -> bool {
        self.h == 1
    }

    fn cells(&self, grid: &TileGrid, main: CellId, sector: Sector) -> Option<Vec<CellId>> {
        if !grid.contains(main) {
            return None;
        }
        let (mx, my) = grid.coords(main);
        let (sx, sy) = sector.signs();

        let mut cells = Vec::with_capacity((self.w * self.h) as usize);
        for j in 0..self.h as i32 {
            for i in 0..self.w as i32 {
                cells.push(grid.cell_at(mx + sx * i, my + sy * j)?);
            }
        }
        // Main cell first: (i, j) = (0, 0) is pushed first by construction.
        Some(cells)
    }

    fn turn_in_place(
        &self,
        grid: &TileGrid,
        main: CellId,
        from: Sector,
        to: Sector,
    ) -> Option<CellId> {
        if !grid.contains(main) {
            return None;
        }
        let (mx, my) = grid.coords(main);
        let (x0, y0, x1, y1) = self.bounds(mx, my, from);
        let (tx, ty) = to.signs();
        // The occupied rectangle stays fixed; the main cell moves to the
        // corner the new sector extends from.
        let nx = if tx > 0 { x0 } else { x1 };
        let ny = if ty > 0 { y0 } else { y1 };
        grid.cell_at(nx, ny)
    }
}
