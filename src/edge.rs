//! Policies for resolving coordinates that fall outside of the grid.  Neighborhoods happily produce coordinates
//! like `(-1, 0)`; the edge policy decides whether such a coordinate refers to a cell at all and, if it does, which
//! one.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::cell::Cell;
use crate::error::{SimError, SimResult};
use crate::grid::{Grid, Pos};
use crate::util::{mirror, wrap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Both axes wrap around, so leaving one edge re-enters from the opposite one.
    Toroidal,
    /// Out-of-range coordinates are reflected back across the nearest boundary.
    Mirror,
    /// Only coordinates inside the grid exist.
    Bounded,
    /// Every coordinate exists; touching one outside of the grid grows the grid to include it.
    Infinite,
}

impl Default for EdgePolicy {
    fn default() -> EdgePolicy {
        EdgePolicy::Toroidal
    }
}

impl EdgePolicy {
    pub fn is_valid_position(&self, grid: &Grid, row: isize, col: isize) -> bool {
        match *self {
            EdgePolicy::Bounded => grid.contains(row, col),
            EdgePolicy::Toroidal | EdgePolicy::Mirror | EdgePolicy::Infinite => true,
        }
    }

    /// Maps `(row, col)` onto the position of the cell it refers to without changing the grid.  For `Infinite` this
    /// only succeeds inside the current bounds; use `resolve` to allow growth.
    pub fn locate(&self, grid: &Grid, row: isize, col: isize) -> Option<Pos> {
        let origin = grid.origin();
        match *self {
            EdgePolicy::Toroidal => Some(Pos::new(
                wrap(row - origin.row, grid.rows()) as isize + origin.row,
                wrap(col - origin.col, grid.cols()) as isize + origin.col,
            )),
            EdgePolicy::Mirror => Some(Pos::new(
                mirror(row - origin.row, grid.rows()) as isize + origin.row,
                mirror(col - origin.col, grid.cols()) as isize + origin.col,
            )),
            EdgePolicy::Bounded | EdgePolicy::Infinite => {
                if grid.contains(row, col) {
                    Some(Pos::new(row, col))
                } else {
                    None
                }
            },
        }
    }

    /// Like `locate`, but an `Infinite` grid is grown so that the coordinate always resolves.
    pub fn resolve(&self, grid: &mut Grid, row: isize, col: isize) -> Option<Pos> {
        match *self {
            EdgePolicy::Infinite => {
                if !grid.contains(row, col) {
                    grid.grow_to_include(row, col);
                }
                Some(Pos::new(row, col))
            },
            _ => self.locate(grid, row, col),
        }
    }

    pub fn get_cell<'a>(&self, grid: &'a mut Grid, row: isize, col: isize) -> Option<&'a Cell> {
        let pos = self.resolve(grid, row, col)?;
        grid.cell(pos)
    }

    pub fn kind(&self) -> &'static str {
        match *self {
            EdgePolicy::Toroidal => "toroidal",
            EdgePolicy::Mirror => "mirror",
            EdgePolicy::Bounded => "bounded",
            EdgePolicy::Infinite => "infinite",
        }
    }
}

impl Display for EdgePolicy {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}", self.kind())
    }
}

impl FromStr for EdgePolicy {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<EdgePolicy> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toroidal" | "torus" => Ok(EdgePolicy::Toroidal),
            "mirror" => Ok(EdgePolicy::Mirror),
            "bounded" | "finite" => Ok(EdgePolicy::Bounded),
            "infinite" => Ok(EdgePolicy::Infinite),
            _ => Err(SimError::invalid_argument(format!("unknown edge policy `{}`", s))),
        }
    }
}
