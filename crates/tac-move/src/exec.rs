//! Route execution and the interruption unwind.
//!
//! Execution re-runs event hooks for real, cell by cell.  An interruption
//! is not an error: the walk backtracks along the already-known route to
//! the nearest cell previously resolved as occupiable and reports the
//! shortened path.

use tracing::trace;

use tac_core::{CellId, Direction};
use tac_grid::Footprint;

use crate::engine::MoveEngine;
use crate::mode::Route;
use crate::state::RadiusState;

/// Where and how a route execution was interrupted.
#[derive(Copy, Clone, Debug)]
enum Interrupt {
    /// Entering step `i` was refused — the entity stands before it.
    Entering(usize),
    /// Leaving step `i` was refused — the entity already occupies it.
    Leaving(usize),
}

/// Walk `route` for real.  Returns the ordered cells actually traversed,
/// the final main cell, and the final facing.
///
/// The mover's fields are not touched here; the caller applies the returned
/// position once the engine borrow ends.
pub(crate) fn run_route(
    engine: &MoveEngine<'_>,
    state: &mut RadiusState,
    route: &Route,
    start_cell: CellId,
    start_facing: Direction,
) -> (Vec<CellId>, CellId, Direction) {
    let grid = engine.grid;
    let template = &engine.mover.template;
    let steps = &route.steps;

    // Leaving the start cell is observed by events but can never refuse.
    let start_sector = start_facing.sector();
    if let Some(body) = template.cells(grid, start_cell, start_sector) {
        if let Some(min_h) = engine.min_height_no_terrain(&body) {
            let height = engine.terrain_height(&body, min_h);
            engine.leave_for_real(state, &body, height, true);
        }
    }

    let mut prev_main = start_cell;
    let mut prev_sector = start_sector;
    let mut facing = start_facing;
    let mut traversed: Vec<CellId> = Vec::new();
    let mut interrupt: Option<Interrupt> = None;

    for (i, step) in steps.iter().enumerate() {
        let before = template
            .cells(grid, prev_main, prev_sector)
            .unwrap_or_default();
        let Some(after) = template.cells(grid, step.cell, step.template_facing) else {
            break;
        };
        let new_cells: Vec<CellId> =
            after.iter().copied().filter(|c| !before.contains(c)).collect();

        if !engine.enter_for_real(state, &new_cells, step.move_height, false) {
            interrupt = Some(Interrupt::Entering(i));
            break;
        }
        if !engine.drain_for_real(state, step.move_height, false) {
            interrupt = Some(Interrupt::Entering(i));
            break;
        }

        traversed.push(step.cell);
        prev_main = step.cell;
        prev_sector = step.template_facing;
        facing = step.facing;

        // Leave-hooks run before advancing further; a refusal here lands
        // *after* the entity has entered, flipping the unwind direction.
        if i + 1 < steps.len()
            && !engine.leave_for_real(state, &after, step.move_height, false)
        {
            interrupt = Some(Interrupt::Leaving(i));
            break;
        }
    }

    match interrupt {
        None => (traversed, prev_main, facing),
        Some(kind) => unwind(engine, state, route, kind, traversed, start_cell, start_facing),
    }
}

/// Backtrack from an interruption to the nearest legal resting cell.
fn unwind(
    engine: &MoveEngine<'_>,
    state: &mut RadiusState,
    route: &Route,
    kind: Interrupt,
    mut traversed: Vec<CellId>,
    start_cell: CellId,
    start_facing: Direction,
) -> (Vec<CellId>, CellId, Direction) {
    let grid = engine.grid;
    let template = &engine.mover.template;
    let steps = &route.steps;

    let mut j: isize = match kind {
        // The refusing cell was touched: its leaving-hooks run, observed.
        Interrupt::Entering(i) => {
            let s = &steps[i];
            if let Some(body) = template.cells(grid, s.cell, s.template_facing) {
                engine.leave_for_real(state, &body, s.move_height, true);
            }
            i as isize - 1
        }
        // The entity already occupies the refusing step and may rest there.
        Interrupt::Leaving(i) => i as isize,
    };

    let mut rest: Option<usize> = None;
    while j >= 0 {
        let s = &steps[j as usize];
        let stays_put = matches!(kind, Interrupt::Leaving(i) if i == j as usize);
        if !stays_put {
            // Walking back re-enters the cell: hooks observe, none refuse.
            if let Some(body) = template.cells(grid, s.cell, s.template_facing) {
                engine.enter_for_real(state, &body, s.move_height, true);
                engine.drain_for_real(state, s.move_height, true);
            }
        }
        if state.occupy_height(s.cell, s.template_facing).flatten().is_some() {
            rest = Some(j as usize);
            break;
        }
        trace!(cell = %s.cell, "unwind: cell not occupiable, walking back");
        j -= 1;
    }

    match rest {
        Some(r) => {
            traversed.truncate(r + 1);
            let stop = &steps[r];
            // Face toward the next cell the move would have advanced to.
            let next_cell = steps[r + 1..]
                .iter()
                .map(|s| s.cell)
                .find(|&c| c != stop.cell);
            let facing = next_cell
                .and_then(|c| grid.direction_to(stop.cell, c))
                .unwrap_or(stop.facing);
            (traversed, stop.cell, facing)
        }
        None => {
            // Unwound all the way back to the start position.
            let next_cell = steps.iter().map(|s| s.cell).find(|&c| c != start_cell);
            let facing = next_cell
                .and_then(|c| grid.direction_to(start_cell, c))
                .unwrap_or(start_facing);
            (Vec::new(), start_cell, facing)
        }
    }
}
