//! Tile grid representation.
//!
//! # Data layout
//!
//! Terrain is dense Structure-of-Arrays storage indexed by `CellId`
//! (row-major, `id = y * width + x`):
//!
//! ```text
//! terrain_cost[cell]    — base crossing cost
//! terrain_height[cell]  — base height category
//! ```
//!
//! Obstacles, blocks, events and occupants are sparse `FxHashMap`s — most
//! cells carry none, and a dense `Vec<Vec<_>>` would waste a heap header
//! per empty cell.
//!
//! The engine treats the grid as read-only; occupant bookkeeping is written
//! by the surrounding obstacle layer between searches.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use tac_core::{BASE_STEP_COST, CellId, Direction, EntityId, Height};

use crate::capability::{BlockEffect, MovementEvent, Obstacle};
use crate::error::{GridError, GridResult};

/// A rectangular tile grid with 8-way adjacency.
///
/// Terrain fields are `pub` for direct indexed access on hot paths.
pub struct TileGrid {
    width: u32,
    height: u32,

    /// Base crossing cost of each cell's terrain.  Indexed by `CellId`.
    pub terrain_cost: Vec<f32>,

    /// Base height category of each cell's terrain.  Indexed by `CellId`.
    pub terrain_height: Vec<Height>,

    // ── Sparse per-cell attachments ───────────────────────────────────────
    obstacles: FxHashMap<CellId, Vec<Arc<dyn Obstacle>>>,
    blocks: FxHashMap<CellId, Vec<Arc<dyn BlockEffect>>>,
    events: FxHashMap<CellId, Vec<Arc<dyn MovementEvent>>>,
    occupants: FxHashMap<CellId, EntityId>,
}

impl TileGrid {
    /// Construct a `width` × `height` grid of flat terrain at
    /// [`BASE_STEP_COST`].
    ///
    /// Grid *generation* (maps, scenarios) is an external concern; this
    /// minimal constructor exists so tests and demos can build a board and
    /// shape it with [`set_terrain`](Self::set_terrain).
    pub fn flat(width: u32, height: u32) -> GridResult<TileGrid> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        let n = (width * height) as usize;
        Ok(TileGrid {
            width,
            height,
            terrain_cost: vec![BASE_STEP_COST; n],
            terrain_height: vec![Height::Flat; n],
            obstacles: FxHashMap::default(),
            blocks: FxHashMap::default(),
            events: FxHashMap::default(),
            occupants: FxHashMap::default(),
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    // ── Coordinate lookup ─────────────────────────────────────────────────

    /// The cell at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn cell_at(&self, x: i32, y: i32) -> Option<CellId> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(CellId(y as u32 * self.width + x as u32))
    }

    /// The `(x, y)` coordinates of `cell`.
    #[inline]
    pub fn coords(&self, cell: CellId) -> (i32, i32) {
        ((cell.0 % self.width) as i32, (cell.0 / self.width) as i32)
    }

    /// `true` when `cell` indexes into this grid.
    #[inline]
    pub fn contains(&self, cell: CellId) -> bool {
        cell.index() < self.cell_count()
    }

    // ── Adjacency ─────────────────────────────────────────────────────────

    /// The cell one step in `dir` from `cell`, or `None` off the edge.
    #[inline]
    pub fn neighbor(&self, cell: CellId, dir: Direction) -> Option<CellId> {
        let (x, y) = self.coords(cell);
        let (dx, dy) = dir.offset();
        self.cell_at(x + dx, y + dy)
    }

    /// Iterator over `(direction, neighbor)` pairs for all in-grid neighbors,
    /// in [`Direction::ALL`] order.
    pub fn adjacent(&self, cell: CellId) -> impl Iterator<Item = (Direction, CellId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(cell, d).map(|c| (d, c)))
    }

    /// `true` when `b` is one of `a`'s eight neighbors.
    pub fn is_adjacent(&self, a: CellId, b: CellId) -> bool {
        self.adjacent(a).any(|(_, c)| c == b)
    }

    /// The compass direction from `a` toward `b`, or `None` when `a == b`.
    ///
    /// Exact for adjacent cells; for distant pairs this is the closest of
    /// the eight directions (ties broken per [`Direction::toward`]).
    pub fn direction_to(&self, a: CellId, b: CellId) -> Option<Direction> {
        if a == b {
            return None;
        }
        let (ax, ay) = self.coords(a);
        let (bx, by) = self.coords(b);
        Some(Direction::toward(bx - ax, by - ay))
    }

    // ── Terrain ───────────────────────────────────────────────────────────

    /// Overwrite the terrain of the cell at `(x, y)`.
    pub fn set_terrain(&mut self, x: i32, y: i32, cost: f32, height: Height) -> GridResult<()> {
        let cell = self.cell_at(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        self.terrain_cost[cell.index()] = cost;
        self.terrain_height[cell.index()] = height;
        Ok(())
    }

    // ── Attachments ───────────────────────────────────────────────────────

    pub fn add_obstacle(&mut self, cell: CellId, obstacle: Arc<dyn Obstacle>) -> GridResult<()> {
        self.check(cell)?;
        self.obstacles.entry(cell).or_default().push(obstacle);
        Ok(())
    }

    pub fn add_block(&mut self, cell: CellId, block: Arc<dyn BlockEffect>) -> GridResult<()> {
        self.check(cell)?;
        self.blocks.entry(cell).or_default().push(block);
        Ok(())
    }

    pub fn add_event(&mut self, cell: CellId, event: Arc<dyn MovementEvent>) -> GridResult<()> {
        self.check(cell)?;
        self.events.entry(cell).or_default().push(event);
        Ok(())
    }

    /// Obstacles attached to `cell` (empty slice when none).
    #[inline]
    pub fn obstacles_at(&self, cell: CellId) -> &[Arc<dyn Obstacle>] {
        self.obstacles.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Blocks attached to `cell` (empty slice when none).
    #[inline]
    pub fn blocks_at(&self, cell: CellId) -> &[Arc<dyn BlockEffect>] {
        self.blocks.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Movement events attached to `cell` (empty slice when none).
    #[inline]
    pub fn events_at(&self, cell: CellId) -> &[Arc<dyn MovementEvent>] {
        self.events.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// The entity currently occupying `cell`, if any.
    #[inline]
    pub fn occupant(&self, cell: CellId) -> Option<EntityId> {
        self.occupants.get(&cell).copied()
    }

    /// Record `entity` as the occupant of `cell`.
    pub fn set_occupant(&mut self, cell: CellId, entity: EntityId) -> GridResult<()> {
        self.check(cell)?;
        self.occupants.insert(cell, entity);
        Ok(())
    }

    /// Remove any occupant record for `cell`.
    pub fn clear_occupant(&mut self, cell: CellId) {
        self.occupants.remove(&cell);
    }

    fn check(&self, cell: CellId) -> GridResult<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(GridError::UnknownCell(cell))
        }
    }
}
