//! `tac-core` — foundational types for the `tac` tactical movement engine.
//!
//! This crate is a dependency of every other `tac-*` crate.  It intentionally
//! has no `tac-*` dependencies and no required external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`ids`]       | `CellId`, `EntityId`                                |
//! | [`direction`] | `Direction` (8-way compass), `Sector` (4 octants)   |
//! | [`height`]    | `Height` — ordered terrain/movement levels          |
//! | [`cost`]      | `BASE_STEP_COST`, `IMPASSABLE_COST`                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |

pub mod cost;
pub mod direction;
pub mod height;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cost::{BASE_STEP_COST, IMPASSABLE_COST, is_impassable};
pub use direction::{Direction, Sector};
pub use height::Height;
pub use ids::{CellId, EntityId};
