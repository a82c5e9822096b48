//! Movement-cost constants shared by the grid and the engine.

/// Nominal cost of crossing one cell when terrain sits below the entity's
/// movement height (the entity moves *over* the terrain, not through it).
pub const BASE_STEP_COST: f32 = 1.0;

/// The impassable threshold.  Obstacle cost hooks receive it so they can
/// push a cell's cost to "cannot cross"; any accumulated cost at or above
/// it prunes the candidate instead of being reported as an error.
pub const IMPASSABLE_COST: f32 = 1.0e9;

/// `true` when `cost` has reached the impassable threshold.
#[inline]
pub fn is_impassable(cost: f32) -> bool {
    cost >= IMPASSABLE_COST
}
