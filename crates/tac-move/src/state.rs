//! Per-search state: the arena, the live index, the work queues, and the
//! caches.
//!
//! One `RadiusState` value is owned by one `build_radius` call and passed by
//! mutable borrow into engine-base functions — there is no hidden instance
//! state to remember to reset.  Dropping the state *is* the clear operation.

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use tac_core::{CellId, Height, Sector};
use tac_grid::Footprint;

use crate::buffer::EventBuffer;
use crate::node::{NodeArena, NodeHandle, SearchNode};

/// All mutable state of a single movement-radius search, kept alive after
/// the build for route lookup and execution.
pub struct RadiusState {
    /// The movement budget the radius was built with.
    pub budget: f32,

    /// Every node created during the search.
    pub arena: NodeArena,

    /// Live (non-evicted) nodes per cell.  A cell may hold several nodes
    /// when an asymmetric footprint needs distinct facings there.
    pub live: FxHashMap<CellId, Vec<NodeHandle>>,

    /// Handle of the origin node.
    pub origin: NodeHandle,

    /// Cells of the entity's pre-move starting footprint — automatically
    /// granted cannot-interrupt protection against events.
    pub start_cells: Vec<CellId>,

    /// The mover's footprint template at build time; canonicalises the
    /// facing keys of the occupy-height table.
    pub(crate) template: Arc<dyn Footprint>,

    // ── Work queues ───────────────────────────────────────────────────────
    /// FIFO of risk-free nodes; drained completely before `risky` starts.
    pub(crate) safe: VecDeque<NodeHandle>,
    /// FIFO of nodes with accumulated risk.
    pub(crate) risky: VecDeque<NodeHandle>,

    // ── Caches ────────────────────────────────────────────────────────────
    /// Single-cell crossing cost per `(cell, min height)`.  Authoritative
    /// once set, until the whole state is dropped.
    pub(crate) cost_cache: FxHashMap<(CellId, Height), f32>,

    /// Minimum legal occupation height per `(cell, footprint sector)`;
    /// inner `None` means the footprint can never come to rest there.
    pub(crate) occupy: FxHashMap<(CellId, Sector), Option<Height>>,

    /// Deferred events, drained between candidate evaluations.
    pub(crate) buffer: EventBuffer,
}

impl RadiusState {
    /// Fresh state around an origin node.
    pub(crate) fn new(
        budget: f32,
        start_cells: Vec<CellId>,
        template: Arc<dyn Footprint>,
        origin_node: SearchNode,
    ) -> RadiusState {
        let mut arena = NodeArena::new();
        let origin_cell = origin_node.cell;
        let origin = arena.push(origin_node);

        let mut live: FxHashMap<CellId, Vec<NodeHandle>> = FxHashMap::default();
        live.entry(origin_cell).or_default().push(origin);

        let mut safe = VecDeque::new();
        safe.push_back(origin);

        RadiusState {
            budget,
            arena,
            live,
            origin,
            start_cells,
            template,
            safe,
            risky: VecDeque::new(),
            cost_cache: FxHashMap::default(),
            occupy: FxHashMap::default(),
            buffer: EventBuffer::new(),
        }
    }

    /// Pop the next node to expand: all safe nodes strictly before any risky
    /// one.  Risky expansion can only enqueue risky successors (risk is
    /// monotone), so the safe queue never refills once empty.
    pub(crate) fn pop(&mut self) -> Option<NodeHandle> {
        self.safe.pop_front().or_else(|| self.risky.pop_front())
    }

    /// Enqueue a freshly registered node on the queue matching its risk.
    pub(crate) fn enqueue(&mut self, handle: NodeHandle) {
        if self.arena.get(handle).is_safe() {
            self.safe.push_back(handle);
        } else {
            self.risky.push_back(handle);
        }
    }

    /// `true` while `handle` is still in the live index for its cell.
    pub(crate) fn is_live(&self, handle: NodeHandle) -> bool {
        let cell = self.arena.get(handle).cell;
        self.live.get(&cell).is_some_and(|nodes| nodes.contains(&handle))
    }

    /// Live nodes registered for `cell` (empty slice when none).
    pub fn live_at(&self, cell: CellId) -> &[NodeHandle] {
        self.live.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The cached occupy height for `(cell, sector)`:
    /// `None` = never resolved, `Some(None)` = resolved as not occupiable.
    ///
    /// The sector is canonicalised through the template, so equivalent
    /// facings of a symmetric footprint share one entry.
    pub fn occupy_height(&self, cell: CellId, sector: Sector) -> Option<Option<Height>> {
        let key = self.template.canonical_sector(sector);
        self.occupy.get(&(cell, key)).copied()
    }
}
