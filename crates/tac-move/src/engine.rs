//! Engine base: how a cell affects movement cost, movement height, and
//! event outcomes, independent of search order.
//!
//! Every rule here fails soft.  An impossible candidate is `None` (height
//! undetermined), a pruned probe, or an impassable cost — never an `Err`.
//! The search strategy decides what to do with the answers; this module
//! only resolves them.

use std::sync::Arc;

use tac_core::{BASE_STEP_COST, CellId, Direction, Height, IMPASSABLE_COST, Sector, is_impassable};
use tac_grid::{BlockEffect, EventGate, Footprint, MovementEvent, Obstacle, Protection, TileGrid};

use crate::mover::Mover;
use crate::state::RadiusState;

/// Outcome of speculatively probing entering-events for a candidate step.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum EnterProbe {
    /// An affected event refused entry; the candidate does not exist.
    Refused,
    /// Entry is possible at this accumulated risk (≥ 0).
    Risk(f32),
}

/// Stateless resolution rules bound to one grid and one mover.
///
/// All per-search mutability lives in the [`RadiusState`] passed into each
/// method, so two engines over the same grid never share hidden caches.
pub struct MoveEngine<'a> {
    pub grid: &'a TileGrid,
    pub mover: &'a Mover,
}

impl<'a> MoveEngine<'a> {
    pub fn new(grid: &'a TileGrid, mover: &'a Mover) -> MoveEngine<'a> {
        MoveEngine { grid, mover }
    }

    // ── Ignore predicates ─────────────────────────────────────────────────

    fn ignores_obstacle(&self, obstacle: &dyn Obstacle, height: Height) -> bool {
        self.mover
            .modifiers
            .iter()
            .any(|m| m.ignores_obstacle(obstacle, height))
    }

    fn ignores_block(&self, block: &dyn BlockEffect, cell: CellId, height: Height) -> bool {
        self.mover
            .modifiers
            .iter()
            .any(|m| m.ignores_block(block, cell, height))
    }

    fn ignores_event(&self, event: &dyn MovementEvent, cell: CellId) -> bool {
        self.mover.modifiers.iter().any(|m| m.ignores_event(event, cell))
    }

    // ── Height resolution ─────────────────────────────────────────────────

    /// Minimum movement height of a footprint, ignoring terrain.
    ///
    /// Starts from the deepest level, lets every modifier raise it, then
    /// every non-ignored obstacle in the footprint.  `None` when any
    /// footprint cell is off the grid.
    pub fn min_height_no_terrain(&self, cells: &[CellId]) -> Option<Height> {
        let mut height = Height::DEEPEST;
        for m in &self.mover.modifiers {
            height = height.max(m.adjust_height(height));
        }
        for &cell in cells {
            if !self.grid.contains(cell) {
                return None;
            }
            for obstacle in self.grid.obstacles_at(cell) {
                // Ignorability is judged at the height computed so far.
                if self.ignores_obstacle(&**obstacle, height) {
                    continue;
                }
                height = height.max(obstacle.modify_height(height));
            }
        }
        Some(height)
    }

    /// Movement height including terrain.  Terrain is never ignorable: it
    /// always asserts its own floor, whatever modifiers say.
    pub fn terrain_height(&self, cells: &[CellId], min_height: Height) -> Height {
        let mut height = min_height;
        for &cell in cells {
            height = height.max(self.grid.terrain_height[cell.index()]);
        }
        height
    }

    // ── Cost resolution ───────────────────────────────────────────────────

    /// Crossing cost of a single cell for an entity whose minimum movement
    /// height (without terrain) is `min_height`.  Cached per
    /// `(cell, min_height)`.
    ///
    /// Terrain at or above the minimum height charges its (modifier
    /// adjusted) own cost; terrain below it charges [`BASE_STEP_COST`] —
    /// the entity moves over it, not through it.  Obstacles then adjust,
    /// then modifiers' obstacle-cost hooks.
    pub fn cell_cost(&self, state: &mut RadiusState, cell: CellId, min_height: Height) -> f32 {
        if let Some(&cached) = state.cost_cache.get(&(cell, min_height)) {
            return cached;
        }

        let terrain = self.grid.terrain_height[cell.index()];
        let mut cost = if terrain >= min_height {
            let mut c = self.grid.terrain_cost[cell.index()];
            for m in &self.mover.modifiers {
                c = m.adjust_terrain_cost(cell, c);
            }
            c
        } else {
            BASE_STEP_COST
        };

        for obstacle in self.grid.obstacles_at(cell) {
            if self.ignores_obstacle(&**obstacle, min_height) {
                continue;
            }
            cost = obstacle.modify_cost(cost, IMPASSABLE_COST);
        }
        for m in &self.mover.modifiers {
            cost = m.adjust_obstacle_cost(cell, cost);
        }

        state.cost_cache.insert((cell, min_height), cost);
        cost
    }

    /// Additional cost of the step `from → to` contributed by directional
    /// blocks in either cell.  Not cached — direction- and entity-dependent.
    pub fn step_block_cost(
        &self,
        from: CellId,
        to: CellId,
        dir: Direction,
        height: Height,
    ) -> f32 {
        let mut cost = 0.0;
        for cell in [from, to] {
            for block in self.grid.blocks_at(cell) {
                if self.ignores_block(&**block, cell, height) {
                    continue;
                }
                cost = block.modify_cost(from, to, dir, self.mover.id, height, cost);
            }
        }
        for m in &self.mover.modifiers {
            cost = m.adjust_block_cost(from, to, cost);
        }
        cost
    }

    /// Whether every non-ignored block in every footprint cell allows the
    /// footprint's placement.  A single refusal vetoes the whole placement.
    pub fn placement_allowed(&self, cells: &[CellId], height: Height) -> bool {
        for &cell in cells {
            for block in self.grid.blocks_at(cell) {
                if self.ignores_block(&**block, cell, height) {
                    continue;
                }
                if !block.allows_placement(cell, self.mover.id, height, cells) {
                    return false;
                }
            }
        }
        true
    }

    // ── Event protection ──────────────────────────────────────────────────

    /// Protection level of the mover against `event` at `cell` when moving
    /// at `height`: moving strictly above the event grants immunity, cells
    /// of the pre-move starting footprint are at least uninterruptible,
    /// and modifiers can raise the level further.
    pub fn protection(
        &self,
        start_cells: &[CellId],
        event: &dyn MovementEvent,
        cell: CellId,
        height: Height,
    ) -> Protection {
        if height > event.height_at(cell) {
            return Protection::Immune;
        }
        let mut level = if start_cells.contains(&cell) {
            Protection::CannotInterrupt
        } else {
            Protection::Affected
        };
        for m in &self.mover.modifiers {
            level = level.max(m.protection(event, cell, height));
        }
        level
    }

    // ── Speculative event evaluation (radius building) ────────────────────

    /// Probe entering-events for the newly entered cells of a candidate
    /// step.  Deferred events land in the buffer; their risk is collected
    /// by [`drain_risk`](Self::drain_risk) before the candidate is
    /// finalised.
    pub fn probe_enter(
        &self,
        state: &mut RadiusState,
        cells: &[CellId],
        height: Height,
    ) -> EnterProbe {
        let mut risk = 0.0_f32;
        for &cell in cells {
            for event in self.grid.events_at(cell) {
                if self.ignores_event(&**event, cell) {
                    continue;
                }
                let level = self.protection(&state.start_cells, &**event, cell, height);
                if level == Protection::Immune {
                    continue;
                }
                match event.can_enter(self.mover.id, cell, height) {
                    EventGate::Refuse if level == Protection::Affected => {
                        // Buffered entries from earlier cells of this same
                        // candidate must not leak into the next one.
                        state.buffer.clear();
                        return EnterProbe::Refused;
                    }
                    EventGate::Refuse | EventGate::Allow => {
                        risk += event.risk(self.mover.id, cell, height).max(0.0);
                    }
                    EventGate::Defer => {
                        let _ = state.buffer.push(Arc::clone(event), cell);
                    }
                }
            }
        }
        EnterProbe::Risk(risk)
    }

    /// Probe leaving-events for the footprint standing on `cells`.
    /// Returns `false` when an affected event refuses the exit.  `Defer`
    /// is treated as allow — deferral only applies to entry evaluation.
    pub fn probe_leave(&self, state: &RadiusState, cells: &[CellId], height: Height) -> bool {
        for &cell in cells {
            for event in self.grid.events_at(cell) {
                if self.ignores_event(&**event, cell) {
                    continue;
                }
                let level = self.protection(&state.start_cells, &**event, cell, height);
                if level != Protection::Affected {
                    continue;
                }
                if event.can_leave(self.mover.id, cell, height) == EventGate::Refuse {
                    return false;
                }
            }
        }
        true
    }

    /// Drain the buffer in risk mode: sum the deferred events' risk.
    pub fn drain_risk(&self, state: &mut RadiusState, height: Height) -> f32 {
        let entries = state.buffer.take_for_drain();
        let mut risk = 0.0_f32;
        for entry in &entries {
            risk += entry.event.risk(self.mover.id, entry.cell, height).max(0.0);
        }
        state.buffer.finish_drain();
        risk
    }

    // ── Authoritative event evaluation (path execution) ───────────────────

    /// Run entering-hooks for real on the newly entered `cells`.
    ///
    /// With `observed` set the hooks still run (events see the entity) but
    /// refusals are ignored — used for start-cell and unwind re-entries
    /// that cannot refuse again.  Returns `false` on an effective refusal.
    pub fn enter_for_real(
        &self,
        state: &mut RadiusState,
        cells: &[CellId],
        height: Height,
        observed: bool,
    ) -> bool {
        for &cell in cells {
            for event in self.grid.events_at(cell) {
                if self.ignores_event(&**event, cell) {
                    continue;
                }
                let level = self.protection(&state.start_cells, &**event, cell, height);
                if level == Protection::Immune {
                    continue;
                }
                match event.on_enter(self.mover.id, cell, height) {
                    EventGate::Refuse if !observed && level == Protection::Affected => {
                        state.buffer.clear();
                        return false;
                    }
                    EventGate::Refuse | EventGate::Allow => {}
                    EventGate::Defer => {
                        let _ = state.buffer.push(Arc::clone(event), cell);
                    }
                }
            }
        }
        true
    }

    /// Run leaving-hooks for real on the footprint standing on `cells`.
    /// Semantics mirror [`enter_for_real`](Self::enter_for_real), minus
    /// deferral (leave gates never buffer).
    pub fn leave_for_real(
        &self,
        state: &RadiusState,
        cells: &[CellId],
        height: Height,
        observed: bool,
    ) -> bool {
        for &cell in cells {
            for event in self.grid.events_at(cell) {
                if self.ignores_event(&**event, cell) {
                    continue;
                }
                let level = self.protection(&state.start_cells, &**event, cell, height);
                if level == Protection::Immune {
                    continue;
                }
                let gate = event.on_leave(self.mover.id, cell, height);
                if gate == EventGate::Refuse && !observed && level == Protection::Affected {
                    return false;
                }
            }
        }
        true
    }

    /// Drain the buffer in execution mode: run the deferred events'
    /// entering-hooks for real.  A refusal aborts the drain (remaining
    /// entries are dropped) and returns `false`.  Re-deferral from inside
    /// the drain is impossible — the buffer is in its draining state.
    pub fn drain_for_real(&self, state: &mut RadiusState, height: Height, observed: bool) -> bool {
        let entries = state.buffer.take_for_drain();
        let mut proceed = true;
        for entry in &entries {
            let level =
                self.protection(&state.start_cells, &*entry.event, entry.cell, height);
            if level == Protection::Immune {
                continue;
            }
            let gate = entry.event.on_enter(self.mover.id, entry.cell, height);
            if gate == EventGate::Refuse && !observed && level == Protection::Affected {
                proceed = false;
                break;
            }
        }
        state.buffer.finish_drain();
        proceed
    }

    // ── Occupation ────────────────────────────────────────────────────────

    /// Resolve (and cache) the minimum height at which the footprint could
    /// legally come to rest on `cell` facing `sector`; `None` when it
    /// cannot.
    pub fn resolve_occupy(
        &self,
        state: &mut RadiusState,
        cell: CellId,
        sector: Sector,
    ) -> Option<Height> {
        // One entry per facing-equivalence class.
        let sector = self.mover.template.canonical_sector(sector);
        if let Some(&cached) = state.occupy.get(&(cell, sector)) {
            return cached;
        }
        let resolved = self.compute_occupy(state, cell, sector);
        state.occupy.insert((cell, sector), resolved);
        resolved
    }

    fn compute_occupy(
        &self,
        state: &mut RadiusState,
        cell: CellId,
        sector: Sector,
    ) -> Option<Height> {
        let cells = self.mover.template.cells(self.grid, cell, sector)?;
        let min_height = self.min_height_no_terrain(&cells)?;
        let height = self.terrain_height(&cells, min_height);
        if height.is_blocking() {
            return None;
        }

        for &c in &cells {
            // Already occupied by someone else?
            if self.grid.occupant(c).is_some_and(|occ| occ != self.mover.id) {
                return None;
            }
            // An obstacle claiming the cell forbids coming to rest, unless
            // a modifier ignores it outright.
            for obstacle in self.grid.obstacles_at(c) {
                if obstacle.occupies() && !self.ignores_obstacle(&**obstacle, min_height) {
                    return None;
                }
            }
        }

        // The hardest footprint cell must be crossable, unless a modifier
        // overrides occupancy outright.
        let worst = cells
            .iter()
            .map(|&c| self.cell_cost(state, c, min_height))
            .fold(0.0_f32, f32::max);
        if is_impassable(worst)
            && !self.mover.modifiers.iter().any(|m| m.can_occupy(cell, worst))
        {
            return None;
        }

        if !self.placement_allowed(&cells, height) {
            return None;
        }
        Some(height)
    }
}
