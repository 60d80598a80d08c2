//! Rule kernels for the simulations that ship with the engine.  Each module declares its states as constants tagged
//! with the kernel's registry name, a `build` function used by the registry, and the kernel itself.

use std::collections::BTreeMap;

use crate::error::{SimError, SimResult};
use crate::grid::{Grid, Pos};
use crate::state::{Color, StateValue};

pub mod fire;
pub mod life;
pub mod loops;
pub mod percolation;
pub mod rps;
pub mod segregation;
pub mod wator;

/// Current state of a position taken from `grid.positions()`.
fn state_at(grid: &Grid, pos: Pos) -> SimResult<StateValue> {
    grid.state(pos).ok_or_else(|| {
        SimError::invalid_argument(format!("position ({}, {}) is not part of the grid", pos.row, pos.col))
    })
}

fn color_map(colors: &[(StateValue, [u8; 3])]) -> BTreeMap<StateValue, Color> {
    colors.iter().map(|&(state, rgb)| (state, Color(rgb))).collect()
}
