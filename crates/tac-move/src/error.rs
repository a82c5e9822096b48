//! Movement-subsystem error type.
//!
//! Only caller misuse is an error here.  Unreachable cells, refused entries,
//! impassable costs, and interrupted moves are all expected outcomes and are
//! reported through `Option`s, pruning, and shortened paths instead.

use thiserror::Error;

use tac_core::EntityId;

/// Errors produced by `tac-move`.
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("no movement radius has been built — call build_radius first")]
    RadiusNotBuilt,

    #[error("entity {0} is not placed on the grid (footprint off-grid or invalid main cell)")]
    NotPlaced(EntityId),

    #[error("movement budget must be positive and finite, got {0}")]
    InvalidBudget(f32),
}

pub type MoveResult<T> = Result<T, MoveError>;
