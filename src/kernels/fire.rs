//! Forest fire spread.  Burning trees always burn out, trees next to a fire catch it, and otherwise trees ignite and
//! empty ground regrows at random.
//!
//! Parameters:
//!  - `ignition`: chance that a tree with no burning neighbor catches fire anyway (default 0)
//!  - `growth`: chance that empty or burnt ground grows a new tree (default 0)

use std::collections::BTreeMap;

use rand::Rng;

use super::{color_map, state_at};
use crate::conf::{check_probability, KernelParams};
use crate::engine::{RuleKernel, SimRng};
use crate::error::SimResult;
use crate::grid::Grid;
use crate::state::{Color, StateValue};

pub const NAME: &str = "fire";

pub const EMPTY: StateValue = StateValue::new(NAME, 0, "EMPTY", 0, ' ');
pub const TREE: StateValue = StateValue::new(NAME, 1, "TREE", 1, 'T');
pub const BURNING: StateValue = StateValue::new(NAME, 2, "BURNING", 2, '*');
pub const BURNT: StateValue = StateValue::new(NAME, 3, "BURNT", 3, '_');

static STATES: [StateValue; 4] = [EMPTY, TREE, BURNING, BURNT];

#[derive(Clone, Debug)]
pub struct Fire {
    ignition: f64,
    growth: f64,
}

impl Fire {
    pub fn new(ignition: f64, growth: f64) -> SimResult<Self> {
        Ok(Fire {
            ignition: check_probability("ignition", ignition)?,
            growth: check_probability("growth", growth)?,
        })
    }
}

pub fn build(params: &KernelParams) -> SimResult<Box<dyn RuleKernel>> {
    let ignition = params.probability("ignition", 0.0)?;
    let growth = params.probability("growth", 0.0)?;
    Ok(Box::new(Fire::new(ignition, growth)?))
}

impl RuleKernel for Fire {
    fn name(&self) -> &'static str {
        NAME
    }

    fn states(&self) -> &'static [StateValue] {
        &STATES
    }

    fn default_state(&self) -> StateValue {
        EMPTY
    }

    fn initialize_color_map(&self) -> BTreeMap<StateValue, Color> {
        color_map(&[
            (EMPTY, [235, 222, 190]),
            (TREE, [34, 139, 34]),
            (BURNING, [255, 69, 0]),
            (BURNT, [64, 64, 64]),
        ])
    }

    fn apply_rules(&self, grid: &mut Grid, rng: &mut SimRng) -> SimResult<()> {
        for pos in grid.positions() {
            let state = state_at(grid, pos)?;
            let next = if state == BURNING {
                BURNT
            } else if state == TREE {
                if grid.count_neighbors(pos, BURNING) > 0 || rng.gen_bool(self.ignition) {
                    BURNING
                } else {
                    TREE
                }
            } else if rng.gen_bool(self.growth) {
                TREE
            } else {
                state
            };

            grid.set_next_state(pos, next)?;
        }

        Ok(())
    }
}
