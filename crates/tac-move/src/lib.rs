//! `tac-move` — movement-radius search, routing, and path execution.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`mover`]  | `Mover` — the engine-side view of the moving entity            |
//! | [`node`]   | `SearchNode`, `NodeHandle`, `NodeArena`                        |
//! | [`buffer`] | `EventBuffer` — deferred events, two-state                     |
//! | [`state`]  | `RadiusState` — per-search arena, queues, and caches           |
//! | [`engine`] | `MoveEngine` — height/cost/block/event resolution rules        |
//! | [`search`] | `DefaultMovement` — radius build, dominance, route lookup      |
//! | [`mode`]   | `MovementMode` trait, `Route`, `ModeSet` registry              |
//! | [`error`]  | `MoveError`, `MoveResult<T>`                                   |
//!
//! # The three-phase model
//!
//! 1. **Build** — `build_radius(budget)` runs the outward search: safe
//!    (risk-free) nodes fully explored before any risky one, per-step cost
//!    as the hardest newly entered footprint cell, dominance pruning per
//!    cell and facing.  Everything is speculative; events are only probed.
//! 2. **Read** — `route_to(cell, facing)` picks the lowest-risk (then
//!    lowest-cost) live node at the destination and walks back-links
//!    through the arena.
//! 3. **Execute** — `execute_route` walks the route for real.  Events now
//!    take authoritative effect and may interrupt; an interrupted move
//!    unwinds backward to the nearest previously-legal resting cell and
//!    reports the shortened path.
//!
//! Searches are synchronous and single-threaded; every mutable structure
//! belongs to one `RadiusState` owned by one build call.

pub mod buffer;
pub mod engine;
pub mod error;
mod exec;
pub mod mode;
pub mod mover;
pub mod node;
pub mod search;
pub mod state;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use buffer::{BufferedEvent, EventBuffer};
pub use engine::{EnterProbe, MoveEngine};
pub use error::{MoveError, MoveResult};
pub use mode::{ModeSet, MovementMode, Route, RouteStep};
pub use mover::Mover;
pub use node::{NodeArena, NodeHandle, SearchNode};
pub use search::DefaultMovement;
pub use state::RadiusState;
