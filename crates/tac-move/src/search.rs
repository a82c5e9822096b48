//! The default movement mode: outward multi-criteria radius search and
//! route lookup.
//!
//! # Search discipline
//!
//! Two FIFOs, safe (risk = 0) and risky (risk > 0); the safe queue is
//! drained completely before the risky queue starts.  A riskier path can
//! therefore never block or out-compete a safe one, even when the safe one
//! costs more — exploration runs in strict risk-then-arrival order rather
//! than uniform-cost order.
//!
//! # Dominance
//!
//! Candidates for a cell compete only against nodes with an equivalent
//! footprint facing (per the template's symmetry flags).  A candidate is
//! discarded when an existing comparable node is at least as good on both
//! cost and risk; an existing node strictly worse on one axis and no better
//! on the other is evicted from the live index.  Exact ties keep the first
//! arrival, which also stops zero-cost turn-in-place cycles from
//! re-registering forever.

use tracing::{debug, trace};

use tac_core::{BASE_STEP_COST, CellId, Direction, Sector, is_impassable};
use tac_grid::{Footprint, TileGrid};

use crate::engine::{EnterProbe, MoveEngine};
use crate::error::{MoveError, MoveResult};
use crate::exec;
use crate::mode::{MovementMode, Route, RouteStep};
use crate::mover::Mover;
use crate::node::{NodeHandle, SearchNode};
use crate::state::RadiusState;

/// The standard search strategy.  Holds the state of the most recently
/// built radius; [`clear`](MovementMode::clear) (or the next
/// [`build_radius`](MovementMode::build_radius)) drops it.
#[derive(Default)]
pub struct DefaultMovement {
    state: Option<RadiusState>,
}

impl DefaultMovement {
    pub fn new() -> DefaultMovement {
        DefaultMovement::default()
    }

    /// Read access to the built radius, for callers that want to inspect
    /// the node graph directly (tests, debug overlays).
    pub fn radius(&self) -> Option<&RadiusState> {
        self.state.as_ref()
    }

    // ── Registration & dominance ──────────────────────────────────────────

    /// Dominance-test `cand` against the live nodes of its cell, register
    /// it if it survives, evict anything it strictly dominates, and
    /// enqueue it.  Returns the new handle, or `None` when discarded.
    fn try_register(
        engine: &MoveEngine<'_>,
        state: &mut RadiusState,
        cand: SearchNode,
    ) -> Option<NodeHandle> {
        let template = &engine.mover.template;
        let cell = cand.cell;

        {
            let RadiusState { live, arena, .. } = state;
            let nodes = live.entry(cell).or_default();

            for &h in nodes.iter() {
                let n = arena.get(h);
                if !template.equivalent_facing(n.template_facing, cand.template_facing) {
                    continue;
                }
                // At least as good on both axes (ties included): discard.
                if n.cost <= cand.cost && n.risk <= cand.risk {
                    return None;
                }
            }

            nodes.retain(|&h| {
                let n = arena.get(h);
                let comparable =
                    template.equivalent_facing(n.template_facing, cand.template_facing);
                let dominated = cand.cost <= n.cost
                    && cand.risk <= n.risk
                    && (cand.cost < n.cost || cand.risk < n.risk);
                !(comparable && dominated)
            });
        }

        let handle = state.arena.push(cand);
        state.live.entry(cell).or_default().push(handle);
        state.enqueue(handle);
        Some(handle)
    }

    // ── Successor generation ──────────────────────────────────────────────

    /// Try to step one cell in `dir` from `node`, keeping the footprint
    /// facing.  Every rejection is silent — the candidate simply does not
    /// exist.
    fn expand_step(
        engine: &MoveEngine<'_>,
        state: &mut RadiusState,
        handle: NodeHandle,
        node: &SearchNode,
        dir: Direction,
    ) {
        let grid = engine.grid;
        let template = &engine.mover.template;

        let Some(next) = grid.neighbor(node.cell, dir) else { return };
        let Some(cells) = template.cells(grid, next, node.template_facing) else { return };
        let Some(min_height) = engine.min_height_no_terrain(&cells) else { return };
        let move_height = engine.terrain_height(&cells, min_height);
        if !engine.placement_allowed(&cells, move_height) {
            return;
        }

        let Some(new_cells) =
            template.new_cells_on_step(grid, node.cell, node.template_facing, dir)
        else {
            return;
        };

        // Events first: the probe may buffer deferred entries, which the
        // drain folds into risk before anything else runs.
        let risk_gain = match engine.probe_enter(state, &new_cells, move_height) {
            EnterProbe::Refused => return,
            EnterProbe::Risk(r) => r + engine.drain_risk(state, move_height),
        };

        // Cost of the step is the hardest single newly entered cell — all
        // footprint cells make the step together.
        let mut step_cost = new_cells
            .iter()
            .map(|&c| engine.cell_cost(state, c, min_height))
            .fold(0.0_f32, f32::max);
        if new_cells.is_empty() {
            step_cost = BASE_STEP_COST;
        }
        step_cost += engine.step_block_cost(node.cell, next, dir, move_height);

        if is_impassable(step_cost) {
            return;
        }
        let cost = node.cost + step_cost;
        if cost > state.budget {
            return;
        }

        let cand = SearchNode {
            cell: next,
            prev: Some(handle),
            cost,
            min_height,
            move_height,
            facing: dir,
            template_facing: node.template_facing,
            risk: node.risk + risk_gain,
        };
        if Self::try_register(engine, state, cand).is_some() {
            engine.resolve_occupy(state, next, node.template_facing);
        }
    }

    /// Generate zero-cost turn-in-place successors: one node per facing
    /// equivalence class other than the current one (three for a fully
    /// asymmetric template, one for a single-axis-symmetric one).
    fn expand_turns(
        engine: &MoveEngine<'_>,
        state: &mut RadiusState,
        handle: NodeHandle,
        node: &SearchNode,
    ) {
        let template = &engine.mover.template;

        let mut targets: Vec<Sector> = Vec::new();
        for s in Sector::ALL {
            if template.equivalent_facing(s, node.template_facing) {
                continue;
            }
            if targets.iter().any(|&t| template.equivalent_facing(s, t)) {
                continue;
            }
            targets.push(s);
        }

        for target in targets {
            let Some(new_main) =
                template.turn_in_place(engine.grid, node.cell, node.template_facing, target)
            else {
                continue;
            };
            let cand = SearchNode {
                cell: new_main,
                prev: Some(handle),
                cost: node.cost,
                min_height: node.min_height,
                move_height: node.move_height,
                facing: target.diagonal(),
                template_facing: target,
                risk: node.risk,
            };
            if Self::try_register(engine, state, cand).is_some() {
                engine.resolve_occupy(state, new_main, target);
            }
        }
    }
}

impl MovementMode for DefaultMovement {
    fn build_radius(&mut self, grid: &TileGrid, mover: &Mover, budget: f32) -> MoveResult<()> {
        if !budget.is_finite() || budget <= 0.0 {
            return Err(MoveError::InvalidBudget(budget));
        }
        self.state = None;

        let engine = MoveEngine::new(grid, mover);
        let start_cells = mover.footprint(grid).ok_or(MoveError::NotPlaced(mover.id))?;
        let min_height = engine
            .min_height_no_terrain(&start_cells)
            .ok_or(MoveError::NotPlaced(mover.id))?;
        let move_height = engine.terrain_height(&start_cells, min_height);

        let origin = SearchNode {
            cell: mover.cell,
            prev: None,
            cost: 0.0,
            min_height,
            move_height,
            facing: mover.facing,
            template_facing: mover.template_facing(),
            risk: 0.0,
        };
        let mut state =
            RadiusState::new(budget, start_cells, mover.template.clone(), origin);
        engine.resolve_occupy(&mut state, mover.cell, mover.template_facing());

        while let Some(handle) = state.pop() {
            if !state.is_live(handle) {
                continue; // evicted since being queued
            }
            let node = state.arena.get(handle).clone();
            trace!(cell = %node.cell, cost = node.cost, risk = node.risk, "expanding node");

            let Some(body) = mover.template.cells(grid, node.cell, node.template_facing)
            else {
                continue;
            };

            // A refused exit pins the entity spatially but it may still
            // reorient.
            if engine.probe_leave(&state, &body, node.move_height) {
                for dir in Direction::ALL {
                    Self::expand_step(&engine, &mut state, handle, &node, dir);
                }
            }
            if !mover.template.fully_symmetric() {
                Self::expand_turns(&engine, &mut state, handle, &node);
            }
        }

        debug!(
            nodes = state.arena.len(),
            cells = state.live.values().filter(|v| !v.is_empty()).count(),
            budget,
            "movement radius built"
        );
        self.state = Some(state);
        Ok(())
    }

    fn route_to(
        &self,
        _grid: &TileGrid,
        mover: &Mover,
        dest: CellId,
        facing: Direction,
    ) -> MoveResult<Option<Route>> {
        let state = self.state.as_ref().ok_or(MoveError::RadiusNotBuilt)?;
        let template = &mover.template;
        let want = facing.sector();

        // Lowest risk wins, cost breaks ties — among nodes whose facing is
        // compatible with the requested exit facing and whose cell can
        // legally be occupied.
        let mut best: Option<NodeHandle> = None;
        for &h in state.live_at(dest) {
            let n = state.arena.get(h);
            if !template.equivalent_facing(n.template_facing, want) {
                continue;
            }
            if state.occupy_height(dest, n.template_facing).flatten().is_none() {
                continue;
            }
            let better = match best {
                None => true,
                Some(b) => {
                    let bn = state.arena.get(b);
                    (n.risk, n.cost) < (bn.risk, bn.cost)
                }
            };
            if better {
                best = Some(h);
            }
        }
        let Some(chosen) = best else { return Ok(None) };

        let (cost, risk) = {
            let n = state.arena.get(chosen);
            (n.cost, n.risk)
        };
        let mut steps = Vec::new();
        let mut h = chosen;
        loop {
            let n = state.arena.get(h);
            let Some(prev) = n.prev else { break }; // origin is excluded
            steps.push(RouteStep {
                cell: n.cell,
                facing: n.facing,
                template_facing: n.template_facing,
                move_height: n.move_height,
            });
            h = prev;
        }
        steps.reverse();

        Ok(Some(Route { steps, cost, risk }))
    }

    fn execute_route(
        &mut self,
        grid: &TileGrid,
        mover: &mut Mover,
        dest: CellId,
        facing: Direction,
    ) -> MoveResult<Vec<CellId>> {
        let Some(route) = self.route_to(grid, mover, dest, facing)? else {
            return Ok(Vec::new());
        };
        let state = self.state.as_mut().ok_or(MoveError::RadiusNotBuilt)?;

        let engine = MoveEngine::new(grid, mover);
        let (traversed, final_cell, final_facing) =
            exec::run_route(&engine, state, &route, mover.cell, mover.facing);

        if traversed.last().copied() != Some(dest) {
            debug!(
                %dest,
                stopped_at = %final_cell,
                steps = traversed.len(),
                "route execution interrupted"
            );
        }

        mover.cell = final_cell;
        mover.facing = final_facing;
        Ok(traversed)
    }

    fn clear(&mut self) {
        self.state = None;
    }

    fn reachable_cells(&self) -> Vec<CellId> {
        let Some(state) = self.state.as_ref() else { return Vec::new() };
        let mut cells: Vec<CellId> = state
            .live
            .iter()
            .filter(|(_, nodes)| !nodes.is_empty())
            .map(|(&cell, _)| cell)
            .collect();
        cells.sort_unstable();
        cells
    }

    fn cost_to(&self, cell: CellId) -> Option<f32> {
        let state = self.state.as_ref()?;
        state
            .live_at(cell)
            .iter()
            .map(|&h| state.arena.get(h).cost)
            .min_by(|a, b| a.total_cmp(b))
    }

    fn risk_to(&self, cell: CellId) -> Option<f32> {
        let state = self.state.as_ref()?;
        state
            .live_at(cell)
            .iter()
            .map(|&h| state.arena.get(h).risk)
            .min_by(|a, b| a.total_cmp(b))
    }

    fn can_occupy(&self, cell: CellId, facing: Direction) -> bool {
        self.state
            .as_ref()
            .and_then(|s| s.occupy_height(cell, facing.sector()))
            .flatten()
            .is_some()
    }
}
