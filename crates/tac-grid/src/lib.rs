//! `tac-grid` — the tile grid and the capability contracts the movement
//! engine consumes.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`grid`]       | `TileGrid` — dense SoA terrain + sparse attachments       |
//! | [`capability`] | `Obstacle`, `BlockEffect`, `MovementEvent`,               |
//! |                | `MovementModifier`, `EventGate`, `Protection`             |
//! | [`footprint`]  | `Footprint` trait, `SingleCell`, `RectTemplate`           |
//! | [`error`]      | `GridError`, `GridResult<T>`                              |
//!
//! # Capability model
//!
//! Everything that can influence movement is expressed as a trait object
//! attached to a cell (obstacles, blocks, events) or owned by the moving
//! entity (modifiers).  A single game object that is simultaneously an
//! obstacle and an event source implements both traits and is attached
//! twice — capability axes compose instead of forming an inheritance chain.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on plain data types.      |

pub mod capability;
pub mod error;
pub mod footprint;
pub mod grid;


pub use capability::{BlockEffect, EventGate, MovementEvent, MovementModifier, Obstacle, Protection};
pub use error::{GridError, GridResult};
pub use footprint::{Footprint, RectTemplate, SingleCell};
pub use grid::TileGrid;
