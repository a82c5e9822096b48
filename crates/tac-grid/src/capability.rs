//! Capability contracts consumed by the movement engine.
//!
//! Each trait is one axis of influence on movement.  A game object that sits
//! on a cell and both raises the movement height and leaks risk implements
//! `Obstacle` *and* `MovementEvent` and is attached under both axes — there
//! is no common base type.
//!
//! All hooks are failure-soft: a capability never errors, it only adjusts
//! costs/heights or answers a predicate.  Hooks must be deterministic —
//! re-running an identical search against identical state must yield
//! identical output.

use tac_core::{CellId, Direction, EntityId, Height};

// ── Obstacle ──────────────────────────────────────────────────────────────────

/// Something sitting *on* a single cell that raises movement height and may
/// change crossing cost.
pub trait Obstacle: Send + Sync {
    /// Current combined height of the obstacle.
    fn height(&self) -> Height;

    /// Raise (never lower) the movement height computed so far.
    ///
    /// Default: assert the obstacle's own height as a floor.
    fn modify_height(&self, height: Height) -> Height {
        height.raised_to(self.height())
    }

    /// Adjust the crossing cost of the obstacle's cell.  `impassable` is the
    /// threshold at which the cell becomes uncrossable; hooks that want to
    /// forbid crossing return at least that.
    fn modify_cost(&self, cost: f32, impassable: f32) -> f32 {
        let _ = impassable;
        cost
    }

    /// `true` when the obstacle counts as occupying its cell for the
    /// purpose of coming to rest there.
    fn occupies(&self) -> bool {
        true
    }
}

// ── BlockEffect ───────────────────────────────────────────────────────────────

/// A directional effect tied to crossing *between* two cells, as opposed to
/// an [`Obstacle`], which is tied to a single cell.
pub trait BlockEffect: Send + Sync {
    /// The block's height as seen from `cell`.
    fn height_at(&self, cell: CellId) -> Height;

    /// Adjust the cost of the step `from → to` (in direction `dir`) for
    /// `entity` moving at `height`.  Not cached by the engine — the result
    /// may depend on direction and entity.
    #[allow(clippy::too_many_arguments)]
    fn modify_cost(
        &self,
        from: CellId,
        to: CellId,
        dir: Direction,
        entity: EntityId,
        height: Height,
        cost: f32,
    ) -> f32 {
        let _ = (from, to, dir, entity, height);
        cost
    }

    /// Whether `entity`'s footprint may be placed over `cell` at `height`.
    /// A single refusal from any non-ignored block vetoes the placement.
    fn allows_placement(
        &self,
        cell: CellId,
        entity: EntityId,
        height: Height,
        footprint: &[CellId],
    ) -> bool {
        let _ = (cell, entity, height, footprint);
        true
    }
}

// ── MovementEvent ─────────────────────────────────────────────────────────────

/// Outcome of an event gate: may the movement proceed, and should the event
/// be deferred to the event buffer?
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EventGate {
    /// Movement proceeds; the event is done with this invocation.
    Allow,
    /// Movement is refused.  During search this prunes the candidate;
    /// during execution it interrupts the move.
    Refuse,
    /// Movement proceeds for now; the engine buffers `(event, cell)` for a
    /// later batch pass (risk tallying during search, real execution during
    /// path execution).  Asking to defer while the buffer is draining is
    /// treated as [`Allow`](EventGate::Allow) — an event cannot re-queue
    /// itself from within the drain it triggered.
    Defer,
}

/// A hook attached to a cell that can refuse entry/exit and contribute risk.
///
/// The `can_*` pair is speculative — called while the radius is being built,
/// it must not mutate game state.  The `on_*` pair runs during path
/// execution and is the only place an event takes authoritative, stateful
/// effect (implementations use interior mutability for that state).
pub trait MovementEvent: Send + Sync {
    /// The event's height as seen from `cell`.  Entities moving strictly
    /// above it are immune.
    fn height_at(&self, cell: CellId) -> Height;

    /// Speculative: may `entity` enter `cell` at `height`?
    fn can_enter(&self, entity: EntityId, cell: CellId, height: Height) -> EventGate {
        let _ = (entity, cell, height);
        EventGate::Allow
    }

    /// Speculative: may `entity` leave `cell` at `height`?
    fn can_leave(&self, entity: EntityId, cell: CellId, height: Height) -> EventGate {
        let _ = (entity, cell, height);
        EventGate::Allow
    }

    /// Authoritative: `entity` is entering `cell` for real.
    fn on_enter(&self, entity: EntityId, cell: CellId, height: Height) -> EventGate {
        let _ = (entity, cell, height);
        EventGate::Allow
    }

    /// Authoritative: `entity` is leaving `cell` for real.
    fn on_leave(&self, entity: EntityId, cell: CellId, height: Height) -> EventGate {
        let _ = (entity, cell, height);
        EventGate::Allow
    }

    /// Danger score contributed when a non-immune entity crosses `cell`.
    /// Must be ≥ 0; risk accumulates along a route and is the primary
    /// route-selection criterion ahead of raw cost.
    fn risk(&self, entity: EntityId, cell: CellId, height: Height) -> f32 {
        let _ = (entity, cell, height);
        0.0
    }
}

// ── Protection ────────────────────────────────────────────────────────────────

/// The degree to which a modifier shields an entity from a movement event.
///
/// Ordered so the engine can take the `max` across all modifiers.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Protection {
    /// The event applies in full: it may refuse movement and adds risk.
    Affected,
    /// The event cannot refuse movement (no interruption) but still adds
    /// risk.  Cells of the entity's pre-move starting footprint are granted
    /// at least this level automatically.
    CannotInterrupt,
    /// The event is skipped entirely — no refusal, no risk.
    Immune,
}

// ── MovementModifier ──────────────────────────────────────────────────────────

/// A movement-rule modifier owned by the moving entity (flight, wading,
/// ghost-form, siege gear…).  All hooks have identity defaults so a modifier
/// implements only the axes it bends.
pub trait MovementModifier: Send + Sync {
    /// Raise the entity's minimum movement height.  Modifiers may only
    /// raise; the engine folds results with `max`, so returning a lower
    /// height is a no-op.
    fn adjust_height(&self, height: Height) -> Height {
        height
    }

    /// Adjust the terrain crossing cost of `cell`.
    fn adjust_terrain_cost(&self, cell: CellId, cost: f32) -> f32 {
        let _ = cell;
        cost
    }

    /// Adjust the obstacle-modified crossing cost of `cell`.  Runs after
    /// every obstacle's own cost hook.
    fn adjust_obstacle_cost(&self, cell: CellId, cost: f32) -> f32 {
        let _ = cell;
        cost
    }

    /// Adjust the block-modified cost of the step `from → to`.
    fn adjust_block_cost(&self, from: CellId, to: CellId, cost: f32) -> f32 {
        let _ = (from, to);
        cost
    }

    /// Occupancy override: return `true` to let the entity come to rest on
    /// `cell` even though its crossing cost reached the impassable
    /// threshold.
    fn can_occupy(&self, cell: CellId, cost: f32) -> bool {
        let _ = (cell, cost);
        false
    }

    /// `true` to ignore `obstacle` entirely at the movement height computed
    /// so far (no height raise, no cost adjustment, no occupancy claim).
    fn ignores_obstacle(&self, obstacle: &dyn Obstacle, height: Height) -> bool {
        let _ = (obstacle, height);
        false
    }

    /// `true` to ignore `block` at `cell` for an entity moving at `height`.
    fn ignores_block(&self, block: &dyn BlockEffect, cell: CellId, height: Height) -> bool {
        let _ = (block, cell, height);
        false
    }

    /// `true` to ignore `event` at `cell` entirely.
    fn ignores_event(&self, event: &dyn MovementEvent, cell: CellId) -> bool {
        let _ = (event, cell);
        false
    }

    /// Protection level this modifier grants against `event` at `cell`.
    fn protection(&self, event: &dyn MovementEvent, cell: CellId, height: Height) -> Protection {
        let _ = (event, cell, height);
        Protection::Affected
    }
}
