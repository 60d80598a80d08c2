//! Percolation through a porous grid.  Blocked and percolated cells never change; an open cell touching a percolated
//! one lets the fluid in with the configured `probability` (default 1).

use std::collections::BTreeMap;

use rand::Rng;

use super::{color_map, state_at};
use crate::conf::{check_probability, KernelParams};
use crate::engine::{RuleKernel, SimRng};
use crate::error::SimResult;
use crate::grid::Grid;
use crate::state::{Color, StateValue};

pub const NAME: &str = "percolation";

pub const BLOCKED: StateValue = StateValue::new(NAME, 0, "BLOCKED", 0, '#');
pub const OPEN: StateValue = StateValue::new(NAME, 1, "OPEN", 1, ' ');
pub const PERCOLATED: StateValue = StateValue::new(NAME, 2, "PERCOLATED", 2, '~');

static STATES: [StateValue; 3] = [BLOCKED, OPEN, PERCOLATED];

#[derive(Clone, Debug)]
pub struct Percolation {
    probability: f64,
}

impl Percolation {
    pub fn new(probability: f64) -> SimResult<Self> {
        Ok(Percolation {
            probability: check_probability("probability", probability)?,
        })
    }
}

pub fn build(params: &KernelParams) -> SimResult<Box<dyn RuleKernel>> {
    let probability = params.probability("probability", 1.0)?;
    Ok(Box::new(Percolation::new(probability)?))
}

impl RuleKernel for Percolation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn states(&self) -> &'static [StateValue] {
        &STATES
    }

    fn default_state(&self) -> StateValue {
        BLOCKED
    }

    fn initialize_color_map(&self) -> BTreeMap<StateValue, Color> {
        color_map(&[(BLOCKED, [0, 0, 0]), (OPEN, [255, 255, 255]), (PERCOLATED, [30, 144, 255])])
    }

    fn apply_rules(&self, grid: &mut Grid, rng: &mut SimRng) -> SimResult<()> {
        for pos in grid.positions() {
            if state_at(grid, pos)? != OPEN {
                continue;
            }

            if grid.count_neighbors(pos, PERCOLATED) > 0 && rng.gen_bool(self.probability) {
                grid.set_next_state(pos, PERCOLATED)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::edge::EdgePolicy;
    use crate::error::SimError;
    use crate::grid::Pos;
    use crate::neighborhood::Neighborhood;

    fn corridor() -> Grid {
        // a percolated cell at the top of an open column walled in by blocked cells
        let mut grid = Grid::new(4, 3, BLOCKED, EdgePolicy::Bounded, Neighborhood::VonNeumann).unwrap();
        for row in 0..4 {
            grid.set_state(Pos::new(row, 1), OPEN).unwrap();
        }
        grid.set_state(Pos::new(0, 1), PERCOLATED).unwrap();
        grid
    }

    #[test]
    fn spreads_one_cell_per_step() {
        let kernel = Percolation::new(1.0).unwrap();
        let mut rng = SimRng::seed_from_u64(11);
        let mut grid = corridor();
        for expected_depth in 1..4 {
            kernel.apply_rules(&mut grid, &mut rng).unwrap();
            grid.apply_next_states();
            for row in 0..4 {
                let expected = if row <= expected_depth { PERCOLATED } else { OPEN };
                assert_eq!(grid.state(Pos::new(row, 1)), Some(expected));
            }
        }
        // walls never change
        assert!(grid.positions().iter().filter(|p| p.col != 1).all(|&p| grid.state(p) == Some(BLOCKED)));
    }

    #[test]
    fn zero_probability_freezes_grid() {
        let kernel = Percolation::new(0.0).unwrap();
        let mut rng = SimRng::seed_from_u64(11);
        let mut grid = corridor();
        let before = grid.to_string();
        for _ in 0..5 {
            kernel.apply_rules(&mut grid, &mut rng).unwrap();
            grid.apply_next_states();
        }
        assert_eq!(grid.to_string(), before);
    }

    #[test]
    fn constructor_rejects_out_of_range_probability() {
        assert!(matches!(Percolation::new(1.01), Err(SimError::InvalidArgument(_))));
        assert!(matches!(Percolation::new(-0.2), Err(SimError::InvalidArgument(_))));
        assert!(build(&KernelParams::new().with("probability", 2.0)).is_err());
    }
}
