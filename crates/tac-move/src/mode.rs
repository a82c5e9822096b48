//! The `MovementMode` trait — the surface the entity-management layer
//! drives — plus the `Route` value and the per-entity mode registry.

use tac_core::{CellId, Direction, Height, Sector};
use tac_grid::TileGrid;

use crate::error::MoveResult;
use crate::mover::Mover;

// ── Route ─────────────────────────────────────────────────────────────────────

/// One position along a computed route.
///
/// Consecutive steps are either adjacent cells (a spatial step) or share
/// their cell set (a turn in place, where only the facings change and the
/// main cell may shift within the body).
#[derive(Clone, Debug)]
pub struct RouteStep {
    /// Main cell at this step.
    pub cell: CellId,
    /// Entity facing on arrival at this step.
    pub facing: Direction,
    /// Footprint facing sector on arrival.
    pub template_facing: Sector,
    /// Resolved movement height at this step, reused by execution hooks.
    pub move_height: Height,
}

/// The result of a route query: ordered steps from just after the search
/// origin (exclusive) to the destination (inclusive), plus the accumulated
/// cost and risk of the chosen way there.
#[derive(Clone, Debug)]
pub struct Route {
    pub steps: Vec<RouteStep>,
    /// Accumulated movement cost at the destination.
    pub cost: f32,
    /// Accumulated risk at the destination.
    pub risk: f32,
}

impl Route {
    /// The ordered main cells of the route.
    pub fn cells(&self) -> Vec<CellId> {
        self.steps.iter().map(|s| s.cell).collect()
    }

    /// The final cell, or `None` for a trivial (already-there) route.
    pub fn destination(&self) -> Option<CellId> {
        self.steps.last().map(|s| s.cell)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// ── MovementMode ──────────────────────────────────────────────────────────────

/// A movement strategy an entity can own.
///
/// The contract is a three-phase conversation:
///
/// 1. [`build_radius`](Self::build_radius) computes the reachable set for a
///    budget (speculative — no game state changes);
/// 2. [`route_to`](Self::route_to) reads the best route to a destination
///    out of the built radius;
/// 3. [`execute_route`](Self::execute_route) walks that route for real,
///    letting events take authoritative effect, and reports the cells
///    actually traversed — possibly short of the destination when the move
///    is interrupted.
///
/// [`clear`](Self::clear) drops the radius and all caches; a cleared mode
/// behaves like a fresh instance.
pub trait MovementMode {
    /// Build the reachable set for `mover` within `budget`.
    ///
    /// Replaces any previously built radius.
    ///
    /// # Errors
    ///
    /// [`InvalidBudget`][crate::MoveError::InvalidBudget] for a
    /// non-positive or non-finite budget;
    /// [`NotPlaced`][crate::MoveError::NotPlaced] when the mover's
    /// footprint does not fit the grid at its current position.
    fn build_radius(&mut self, grid: &TileGrid, mover: &Mover, budget: f32) -> MoveResult<()>;

    /// The best route to `dest` exiting with `facing`, or `None` when the
    /// destination is unreachable or cannot legally be occupied.
    ///
    /// # Errors
    ///
    /// [`RadiusNotBuilt`][crate::MoveError::RadiusNotBuilt] when called
    /// before [`build_radius`](Self::build_radius).
    fn route_to(
        &self,
        grid: &TileGrid,
        mover: &Mover,
        dest: CellId,
        facing: Direction,
    ) -> MoveResult<Option<Route>>;

    /// Execute the best route to `dest` for real, updating the mover's
    /// position and facing.  Returns the ordered cells actually traversed;
    /// an interrupted move ends early at the nearest legal resting cell,
    /// and an unreachable destination traverses nothing.
    fn execute_route(
        &mut self,
        grid: &TileGrid,
        mover: &mut Mover,
        dest: CellId,
        facing: Direction,
    ) -> MoveResult<Vec<CellId>>;

    /// Drop the built radius and every cache.
    fn clear(&mut self);

    // ── Radius accessors ──────────────────────────────────────────────────

    /// All cells with at least one live node, sorted.  Empty before
    /// [`build_radius`](Self::build_radius).
    fn reachable_cells(&self) -> Vec<CellId>;

    /// Lowest accumulated cost over `cell`'s live nodes.
    fn cost_to(&self, cell: CellId) -> Option<f32>;

    /// Lowest accumulated risk over `cell`'s live nodes.
    fn risk_to(&self, cell: CellId) -> Option<f32>;

    /// Whether the footprint was resolved as able to come to rest on `cell`
    /// facing `facing` during the search.
    fn can_occupy(&self, cell: CellId, facing: Direction) -> bool;
}

// ── ModeSet ───────────────────────────────────────────────────────────────────

/// The ordered movement modes an entity owns, one of which is active.
///
/// Thin by design: the engine never consults it, callers drive the active
/// mode through [`active_mut`](Self::active_mut).
#[derive(Default)]
pub struct ModeSet {
    modes: Vec<Box<dyn MovementMode>>,
    active: usize,
}

impl ModeSet {
    pub fn new() -> ModeSet {
        ModeSet::default()
    }

    /// Append a mode, returning its index.  The first mode pushed becomes
    /// active.
    pub fn push(&mut self, mode: Box<dyn MovementMode>) -> usize {
        self.modes.push(mode);
        self.modes.len() - 1
    }

    /// Make the mode at `index` active.  Returns `false` (and leaves the
    /// active mode unchanged) for an out-of-range index.
    pub fn activate(&mut self, index: usize) -> bool {
        if index < self.modes.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// The active mode, or `None` when no modes have been pushed.
    pub fn active(&self) -> Option<&dyn MovementMode> {
        self.modes.get(self.active).map(|m| &**m)
    }

    /// Mutable access to the active mode.
    pub fn active_mut(&mut self) -> Option<&mut (dyn MovementMode + '_)> {
        match self.modes.get_mut(self.active) {
            Some(m) => Some(&mut **m),
            None => None,
        }
    }
}
