//! The event buffer — deferred `(event, cell)` pairs between evaluation and
//! batch application.
//!
//! Two jobs, one mechanism:
//!
//! 1. An event must not take effect (or count as risk) for cells the entity
//!    merely probes; deferral moves the effect to the pass that actually
//!    commits the step.
//! 2. One event shared by several footprint cells entered in the same step
//!    must apply once, not once per cell — the buffer deduplicates by event
//!    identity on insert.
//!
//! The two states make the reentrancy invariant visible in the type: while
//! `Draining` there is no list to push into, so an event cannot re-queue
//! itself from inside the drain pass it triggered.

use std::sync::Arc;

use tac_core::CellId;
use tac_grid::MovementEvent;

/// A deferred event application site.
pub struct BufferedEvent {
    pub event: Arc<dyn MovementEvent>,
    pub cell: CellId,
}

/// Deferred-event store.  Either accepting new entries or mid-drain.
pub enum EventBuffer {
    /// Normal state: deferred entries accumulate here.
    Accepting(Vec<BufferedEvent>),
    /// A drain pass is running; insertion is refused.
    Draining,
}

impl EventBuffer {
    pub fn new() -> EventBuffer {
        EventBuffer::Accepting(Vec::new())
    }

    /// Defer `(event, cell)`.  Returns `false` (and drops the entry) while a
    /// drain is in progress, or when the same event is already buffered —
    /// a shared event entered through several cells applies once.
    pub fn push(&mut self, event: Arc<dyn MovementEvent>, cell: CellId) -> bool {
        match self {
            EventBuffer::Accepting(entries) => {
                if entries.iter().any(|e| Arc::ptr_eq(&e.event, &event)) {
                    return false;
                }
                entries.push(BufferedEvent { event, cell });
                true
            }
            EventBuffer::Draining => false,
        }
    }

    /// `true` when no entries are pending (a mid-drain buffer counts as
    /// empty — its entries have been taken).
    pub fn is_empty(&self) -> bool {
        match self {
            EventBuffer::Accepting(entries) => entries.is_empty(),
            EventBuffer::Draining => true,
        }
    }

    /// Switch to `Draining` and hand the pending entries to the caller.
    /// The caller must invoke [`finish_drain`](Self::finish_drain) when the
    /// pass is done.
    pub fn take_for_drain(&mut self) -> Vec<BufferedEvent> {
        match std::mem::replace(self, EventBuffer::Draining) {
            EventBuffer::Accepting(entries) => entries,
            EventBuffer::Draining => Vec::new(),
        }
    }

    /// Return to `Accepting` with an empty list.
    pub fn finish_drain(&mut self) {
        *self = EventBuffer::Accepting(Vec::new());
    }

    /// Explicitly discard pending entries without applying them.
    pub fn clear(&mut self) {
        *self = EventBuffer::Accepting(Vec::new());
    }
}

impl Default for EventBuffer {
    fn default() -> Self {
        EventBuffer::new()
    }
}
