//! Schelling-style segregation.  Every agent belongs to a group and is satisfied when at least `tolerance` of the
//! agents around it share its group (an agent with no agents around it is always satisfied).  Each step all
//! unsatisfied agents are collected, shuffled, and handed a random empty cell from those that were empty at the start
//! of the step until either runs out.
//!
//! Codes `1..=groups` in an initial-state array all decode to `AGENT`, with the code becoming the agent's group.
//!
//! Parameters:
//!  - `tolerance`: minimum same-group share of agent neighbors, within `[0, 1]` (default 0.3)
//!  - `groups`: number of groups that can appear in an initial-state array (default 2)

use std::collections::BTreeMap;

use rand::seq::SliceRandom;

use super::{color_map, state_at};
use crate::cell::{Cell, Payload};
use crate::conf::{check_probability, KernelParams};
use crate::engine::{RuleKernel, SimRng};
use crate::error::SimResult;
use crate::grid::{Grid, Pos};
use crate::state::{Color, StateValue};

pub const NAME: &str = "segregation";

pub const EMPTY: StateValue = StateValue::new(NAME, 0, "EMPTY", 0, '.');
pub const AGENT: StateValue = StateValue::new(NAME, 1, "AGENT", 1, 'A');

static STATES: [StateValue; 2] = [EMPTY, AGENT];

#[derive(Clone, Debug)]
pub struct Segregation {
    tolerance: f64,
    groups: u32,
}

impl Segregation {
    pub fn new(tolerance: f64, groups: u32) -> SimResult<Self> {
        Ok(Segregation {
            tolerance: check_probability("tolerance", tolerance)?,
            groups,
        })
    }

    /// Decides whether an agent of `group` is content with the agents around `pos`.
    fn satisfied(&self, grid: &mut Grid, pos: Pos, group: u32) -> SimResult<bool> {
        let mut agents = 0;
        let mut same = 0;
        for neighbor in grid.neighbors(pos) {
            if neighbor.state != AGENT {
                continue;
            }
            agents += 1;
            if let Some(cell) = grid.cell(neighbor.pos) {
                if cell.group()? == group {
                    same += 1;
                }
            }
        }

        Ok(agents == 0 || same as f64 / agents as f64 >= self.tolerance)
    }
}

pub fn build(params: &KernelParams) -> SimResult<Box<dyn RuleKernel>> {
    let tolerance = params.probability("tolerance", 0.3)?;
    let groups = params.positive("groups", 2)?;
    Ok(Box::new(Segregation::new(tolerance, groups)?))
}

impl RuleKernel for Segregation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn states(&self) -> &'static [StateValue] {
        &STATES
    }

    fn default_state(&self) -> StateValue {
        EMPTY
    }

    fn initialize_state_map(&self) -> BTreeMap<i32, StateValue> {
        let mut state_map = BTreeMap::new();
        state_map.insert(EMPTY.code(), EMPTY);
        for group in 1..=self.groups as i32 {
            state_map.insert(group, AGENT);
        }
        state_map
    }

    fn initialize_color_map(&self) -> BTreeMap<StateValue, Color> {
        color_map(&[(EMPTY, [255, 255, 255]), (AGENT, [220, 20, 60])])
    }

    fn initial_payload(&self, code: i32, state: StateValue) -> Option<Payload> {
        if state == AGENT {
            Some(Payload::Agent { group: code.max(1) as u32 })
        } else {
            None
        }
    }

    fn encode(&self, cell: &Cell) -> i32 {
        match cell.group() {
            Ok(group) if cell.state() == AGENT => group as i32,
            _ => cell.state().code(),
        }
    }

    fn apply_rules(&self, grid: &mut Grid, rng: &mut SimRng) -> SimResult<()> {
        let mut unsatisfied: Vec<(Pos, u32)> = Vec::new();
        let mut vacancies: Vec<Pos> = Vec::new();
        for pos in grid.positions() {
            let state = state_at(grid, pos)?;
            if state == EMPTY {
                vacancies.push(pos);
            } else if state == AGENT {
                let group = match grid.cell(pos) {
                    Some(cell) => cell.group()?,
                    None => continue,
                };
                if !self.satisfied(grid, pos, group)? {
                    unsatisfied.push((pos, group));
                }
            }
        }

        unsatisfied.shuffle(rng);
        vacancies.shuffle(rng);
        let moves: Vec<(Pos, Pos, u32)> = unsatisfied
            .into_iter()
            .zip(vacancies.into_iter())
            .map(|((src, group), dst)| (src, dst, group))
            .collect();
        trace!("{} segregation agents relocating", moves.len());

        // vacate every source before filling any destination
        for &(src, _, _) in &moves {
            grid.set_next(src, EMPTY, None)?;
        }
        for &(_, dst, group) in &moves {
            grid.set_next(dst, AGENT, Some(Payload::Agent { group }))?;
        }

        Ok(())
    }
}
