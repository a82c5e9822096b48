//! The engine-side view of a moving entity.

use std::sync::Arc;

use tac_core::{CellId, Direction, EntityId, Sector};
use tac_grid::{Footprint, MovementModifier, TileGrid};

/// Everything the movement engine needs to know about the entity being
/// moved: identity, position, facing, body shape, and the movement
/// modifiers it carries.
///
/// The wider entity-management layer owns the authoritative entity record;
/// a `Mover` is the projection of it that movement cares about.  The engine
/// mutates only `cell` and `facing` (during
/// [`execute_route`][crate::MovementMode::execute_route]).
pub struct Mover {
    pub id: EntityId,

    /// Main cell of the entity's footprint.
    pub cell: CellId,

    /// Current compass facing.
    pub facing: Direction,

    /// Body shape; drives successor generation and occupancy checks.
    pub template: Arc<dyn Footprint>,

    /// Movement modifiers currently active on the entity.
    pub modifiers: Vec<Arc<dyn MovementModifier>>,
}

impl Mover {
    pub fn new(
        id: EntityId,
        cell: CellId,
        facing: Direction,
        template: Arc<dyn Footprint>,
    ) -> Mover {
        Mover { id, cell, facing, template, modifiers: Vec::new() }
    }

    /// Attach a movement modifier (builder-style).
    pub fn with_modifier(mut self, modifier: Arc<dyn MovementModifier>) -> Mover {
        self.modifiers.push(modifier);
        self
    }

    /// The footprint facing sector derived from the entity facing.
    #[inline]
    pub fn template_facing(&self) -> Sector {
        self.facing.sector()
    }

    /// The cells the entity's body currently occupies, or `None` if the
    /// footprint does not fit the grid at its current position.
    pub fn footprint(&self, grid: &TileGrid) -> Option<Vec<CellId>> {
        self.template.cells(grid, self.cell, self.template_facing())
    }
}
