//! Declares the grid in which all cells of a simulation reside.  The grid is a rectangular array of cells stored as
//! a flat row-major buffer together with the edge policy and neighborhood that define its topology.  It answers
//! neighbor queries by combining the two and commits every cell's buffered state in one pass at the end of a step.
//!
//! Cells are addressed by logical coordinates.  For every edge policy but `Infinite` the logical coordinates are
//! exactly `[0, rows) x [0, cols)`.  An infinite grid can grow in any direction; growing up or left moves the
//! grid's origin so that cells never change coordinates once they exist.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use crate::cell::{Cell, Payload};
use crate::edge::EdgePolicy;
use crate::error::{SimError, SimResult};
use crate::neighborhood::Neighborhood;
use crate::state::StateValue;
use crate::util::{get_coords, get_index};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: isize,
    pub col: isize,
}

impl Pos {
    pub fn new(row: isize, col: isize) -> Self {
        Pos { row, col }
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Pos) -> Ordering {
        let row_cmp = self.row.cmp(&other.row);

        if row_cmp == Ordering::Equal {
            self.col.cmp(&other.col)
        } else {
            row_cmp
        }
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Pos) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A resolved neighbor: where it lives and what state it holds in the current generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbor {
    pub pos: Pos,
    pub state: StateValue,
}

#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    origin: Pos,
    cells: Vec<Cell>,
    default_state: StateValue,
    edge: EdgePolicy,
    neighborhood: Neighborhood,
}

impl Grid {
    pub fn new(
        rows: usize,
        cols: usize,
        default_state: StateValue,
        edge: EdgePolicy,
        neighborhood: Neighborhood,
    ) -> SimResult<Grid> {
        if rows == 0 || cols == 0 {
            return Err(SimError::invalid_argument(format!(
                "grid dimensions must be non-zero, got {}x{}",
                rows, cols
            )));
        }
        neighborhood.validate()?;

        Ok(Grid {
            rows,
            cols,
            origin: Pos::new(0, 0),
            cells: vec![Cell::new(default_state); rows * cols],
            default_state,
            edge,
            neighborhood,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Logical coordinate of the top-left cell.  Always `(0, 0)` unless an infinite grid has grown up or left.
    pub fn origin(&self) -> Pos {
        self.origin
    }

    pub fn default_state(&self) -> StateValue {
        self.default_state
    }

    pub fn edge(&self) -> EdgePolicy {
        self.edge
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    pub fn contains(&self, row: isize, col: isize) -> bool {
        let (rel_row, rel_col) = (row - self.origin.row, col - self.origin.col);
        rel_row >= 0 && rel_col >= 0 && (rel_row as usize) < self.rows && (rel_col as usize) < self.cols
    }

    fn index_of(&self, pos: Pos) -> Option<usize> {
        if !self.contains(pos.row, pos.col) {
            return None;
        }

        let rel_row = (pos.row - self.origin.row) as usize;
        let rel_col = (pos.col - self.origin.col) as usize;
        Some(get_index(rel_row, rel_col, self.cols))
    }

    fn pos_of(&self, index: usize) -> Pos {
        let (rel_row, rel_col) = get_coords(index, self.cols);
        Pos::new(rel_row as isize + self.origin.row, rel_col as isize + self.origin.col)
    }

    /// All positions of the grid in row-major order.
    pub fn positions(&self) -> Vec<Pos> {
        (0..self.cells.len()).map(|i| self.pos_of(i)).collect()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.index_of(pos).map(move |i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        match self.index_of(pos) {
            Some(i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    fn cell_or_err(&mut self, pos: Pos) -> SimResult<&mut Cell> {
        let (rows, cols) = (self.rows, self.cols);
        self.cell_mut(pos).ok_or_else(|| {
            SimError::invalid_argument(format!(
                "position ({}, {}) is outside of the {}x{} grid",
                pos.row, pos.col, rows, cols
            ))
        })
    }

    /// Current state of the cell at `pos`, if it exists.
    pub fn state(&self, pos: Pos) -> Option<StateValue> {
        self.cell(pos).map(|c| c.state())
    }

    pub fn set_state(&mut self, pos: Pos, state: StateValue) -> SimResult<()> {
        self.cell_or_err(pos)?.set_state(state);
        Ok(())
    }

    pub fn set_payload(&mut self, pos: Pos, payload: Option<Payload>) -> SimResult<()> {
        self.cell_or_err(pos)?.set_payload(payload);
        Ok(())
    }

    pub fn set_next_state(&mut self, pos: Pos, state: StateValue) -> SimResult<()> {
        self.cell_or_err(pos)?.set_next_state(state);
        Ok(())
    }

    pub fn set_next(&mut self, pos: Pos, state: StateValue, payload: Option<Payload>) -> SimResult<()> {
        self.cell_or_err(pos)?.set_next(state, payload);
        Ok(())
    }

    /// Resolves an arbitrary coordinate through the edge policy.  May grow an infinite grid.
    pub fn resolve(&mut self, row: isize, col: isize) -> Option<Pos> {
        let edge = self.edge;
        edge.resolve(self, row, col)
    }

    /// Resolves every neighbor of `pos` through the edge policy, skipping coordinates that the policy says don't
    /// exist.  Neighbors come back in the neighborhood's enumeration order.  Under a wrapping policy on a very small
    /// grid the same cell (even `pos` itself) may appear more than once.
    pub fn neighbors(&mut self, pos: Pos) -> Vec<Neighbor> {
        let coords = self.neighborhood.neighbor_coordinates(pos.row, pos.col);
        let mut neighbors = Vec::with_capacity(coords.len());
        for (row, col) in coords {
            if let Some(resolved) = self.resolve(row, col) {
                if let Some(cell) = self.cell(resolved) {
                    neighbors.push(Neighbor {
                        pos: resolved,
                        state: cell.state(),
                    });
                }
            }
        }

        neighbors
    }

    pub fn neighbor_states(&mut self, pos: Pos) -> Vec<StateValue> {
        self.neighbors(pos).into_iter().map(|n| n.state).collect()
    }

    /// Number of neighbors of `pos` currently in `state`.
    pub fn count_neighbors(&mut self, pos: Pos, state: StateValue) -> usize {
        self.neighbors(pos).iter().filter(|n| n.state == state).count()
    }

    /// Commits the buffered next state of every cell.
    pub fn apply_next_states(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.apply_next_state();
        }
    }

    /// Drops every buffered next state without committing it.
    pub fn reset_next_states(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reset_next_state();
        }
    }

    /// Extends the grid so that `(row, col)` is inside of it, filling new space with default-state cells.
    pub(crate) fn grow_to_include(&mut self, row: isize, col: isize) {
        let min_row = self.origin.row.min(row);
        let min_col = self.origin.col.min(col);
        let max_row = (self.origin.row + self.rows as isize - 1).max(row);
        let max_col = (self.origin.col + self.cols as isize - 1).max(col);
        let new_rows = (max_row - min_row + 1) as usize;
        let new_cols = (max_col - min_col + 1) as usize;

        let mut cells = vec![Cell::new(self.default_state); new_rows * new_cols];
        for (i, cell) in self.cells.drain(..).enumerate() {
            let (rel_row, rel_col) = get_coords(i, self.cols);
            let dst_row = (rel_row as isize + self.origin.row - min_row) as usize;
            let dst_col = (rel_col as isize + self.origin.col - min_col) as usize;
            cells[get_index(dst_row, dst_col, new_cols)] = cell;
        }

        debug!(
            "Growing infinite grid from {}x{} to {}x{} to reach ({}, {})",
            self.rows, self.cols, new_rows, new_cols, row, col
        );
        self.cells = cells;
        self.rows = new_rows;
        self.cols = new_cols;
        self.origin = Pos::new(min_row, min_col);
    }
}

impl Display for Grid {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let mut buf = String::with_capacity(self.cells.len() + self.rows);
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % self.cols == 0 {
                buf.push('\n');
            }
            buf.push(cell.state().glyph());
        }

        write!(formatter, "{}", buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEAD: StateValue = StateValue::new("test", 0, "DEAD", 0, '.');
    const LIVE: StateValue = StateValue::new("test", 1, "LIVE", 1, '#');

    fn grid(rows: usize, cols: usize, edge: EdgePolicy, hood: Neighborhood) -> Grid {
        Grid::new(rows, cols, DEAD, edge, hood).unwrap()
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(Grid::new(0, 3, DEAD, EdgePolicy::Bounded, Neighborhood::Moore).is_err());
        assert!(Grid::new(3, 0, DEAD, EdgePolicy::Bounded, Neighborhood::Moore).is_err());
        assert!(Grid::new(3, 3, DEAD, EdgePolicy::Bounded, Neighborhood::ExtendedMoore(0)).is_err());
    }

    #[test]
    fn every_coordinate_maps_to_one_cell() {
        let grid = grid(3, 5, EdgePolicy::Bounded, Neighborhood::Moore);
        let positions = grid.positions();
        assert_eq!(positions.len(), 15);
        assert_eq!(positions[0], Pos::new(0, 0));
        assert_eq!(positions[6], Pos::new(1, 1));
        assert!(positions.iter().all(|&p| grid.cell(p).is_some()));
    }

    #[test]
    fn interior_neighbor_counts() {
        let mut moore = grid(5, 5, EdgePolicy::Bounded, Neighborhood::Moore);
        assert_eq!(moore.neighbors(Pos::new(2, 2)).len(), 8);
        let mut von_neumann = grid(5, 5, EdgePolicy::Bounded, Neighborhood::VonNeumann);
        assert_eq!(von_neumann.neighbors(Pos::new(2, 2)).len(), 4);
    }

    #[test]
    fn bounded_corner_omits_missing_neighbors() {
        let mut grid = grid(3, 3, EdgePolicy::Bounded, Neighborhood::Moore);
        let neighbors = grid.neighbors(Pos::new(0, 0));
        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.iter().all(|n| grid.contains(n.pos.row, n.pos.col)));
    }

    #[test]
    fn toroidal_corner_sees_far_side() {
        let mut grid = grid(4, 4, EdgePolicy::Toroidal, Neighborhood::Moore);
        grid.set_state(Pos::new(3, 3), LIVE).unwrap();
        assert_eq!(grid.neighbors(Pos::new(0, 0)).len(), 8);
        assert_eq!(grid.count_neighbors(Pos::new(0, 0), LIVE), 1);
    }

    #[test]
    fn infinite_neighbors_grow_grid() {
        let mut grid = grid(1, 1, EdgePolicy::Infinite, Neighborhood::Moore);
        let neighbors = grid.neighbors(Pos::new(0, 0));
        assert_eq!(neighbors.len(), 8);
        assert_eq!((grid.rows(), grid.cols()), (3, 3));
        assert_eq!(grid.origin(), Pos::new(-1, -1));
        assert!(neighbors.iter().all(|n| n.state == DEAD));
    }

    #[test]
    fn next_states_commit_together() {
        let mut grid = grid(1, 3, EdgePolicy::Bounded, Neighborhood::Moore);
        grid.set_next_state(Pos::new(0, 1), LIVE).unwrap();
        assert_eq!(grid.state(Pos::new(0, 1)), Some(DEAD));
        grid.apply_next_states();
        assert_eq!(grid.state(Pos::new(0, 1)), Some(LIVE));
        assert!(grid.cells().iter().all(|c| c.next_state().is_none()));
    }

    #[test]
    fn writes_outside_grid_fail() {
        let mut grid = grid(2, 2, EdgePolicy::Bounded, Neighborhood::Moore);
        assert!(grid.set_state(Pos::new(2, 0), LIVE).is_err());
        assert!(grid.set_next_state(Pos::new(-1, 0), LIVE).is_err());
    }

    #[test]
    fn display_one_glyph_per_cell() {
        let mut grid = grid(2, 3, EdgePolicy::Bounded, Neighborhood::Moore);
        grid.set_state(Pos::new(1, 2), LIVE).unwrap();
        assert_eq!(grid.to_string(), "...\n..#");
    }
}
