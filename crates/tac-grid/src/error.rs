//! Grid-subsystem error type.

use thiserror::Error;

use tac_core::CellId;

/// Errors produced by `tac-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("coordinates ({x}, {y}) are outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("cell {0} is not part of this grid")]
    UnknownCell(CellId),

    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },
}

pub type GridResult<T> = Result<T, GridError>;
