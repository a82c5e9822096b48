//! Search nodes and the arena that owns them.
//!
//! Nodes are immutable once pushed.  "Evicting" a dominated node means
//! removing its handle from the live per-cell index — the node itself stays
//! in the arena so back-links held by other nodes keep resolving, which is
//! what makes route reconstruction safe after eviction.

use tac_core::{CellId, Direction, Height, Sector};

// ── NodeHandle ────────────────────────────────────────────────────────────────

/// Handle into a [`NodeArena`].  Valid for the lifetime of the arena that
/// issued it; never reused.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct NodeHandle(pub(crate) u32);

impl NodeHandle {
    /// Cast to `usize` for direct arena indexing.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ── SearchNode ────────────────────────────────────────────────────────────────

/// One (cell, entity facing, footprint facing) combination reached during a
/// radius search, with the accumulated cost and risk of the best-known way
/// to reach it at creation time.
///
/// Cost and risk are monotonically non-decreasing along any back-link chain
/// from the search origin.
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// The main cell this node stands on.
    pub cell: CellId,

    /// Back-link to the predecessor node; `None` only for the origin.
    pub prev: Option<NodeHandle>,

    /// Accumulated movement cost from the origin.
    pub cost: f32,

    /// Minimum movement height ignoring terrain (modifiers + obstacles).
    pub min_height: Height,

    /// Resolved movement height including terrain's floor.
    pub move_height: Height,

    /// Entity facing on arrival.
    pub facing: Direction,

    /// Footprint facing sector on arrival.
    pub template_facing: Sector,

    /// Accumulated risk from the origin.  Non-negative.
    pub risk: f32,
}

impl SearchNode {
    /// `true` when no risk has been accumulated — the node belongs on the
    /// safe queue.
    #[inline]
    pub fn is_safe(&self) -> bool {
        self.risk <= 0.0
    }
}

// ── NodeArena ─────────────────────────────────────────────────────────────────

/// Append-only storage for every node created during one radius search.
#[derive(Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Store `node` and return its handle.
    pub fn push(&mut self, node: SearchNode) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len() as u32);
        self.nodes.push(node);
        handle
    }

    /// Dereference a handle.  Handles never dangle within the issuing arena.
    #[inline]
    pub fn get(&self, handle: NodeHandle) -> &SearchNode {
        &self.nodes[handle.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate all nodes ever created (live or evicted), in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &SearchNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeHandle(i as u32), n))
    }
}
