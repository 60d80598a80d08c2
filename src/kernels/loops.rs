//! Signal-propagating loops in the spirit of Langton's and Tempesti's self-replicating structures.  A loop is a
//! `CORE` channel wrapped in `SHEATH`; signals (`INIT`, `TURN`, `EXTEND`, `ADVANCE`) travel along the core and make
//! the sheath grow out ahead of them.
//!
//! The rules are a fixed table of transitions checked in order against the Von Neumann neighborhood of each cell.
//! The first transition whose source state and condition both match decides the next state; a cell that matches
//! nothing keeps its state.

use std::collections::BTreeMap;

use super::{color_map, state_at};
use crate::conf::KernelParams;
use crate::engine::{RuleKernel, SimRng};
use crate::error::SimResult;
use crate::grid::Grid;
use crate::neighborhood::Neighborhood;
use crate::state::{Color, StateValue};

pub const NAME: &str = "loops";

pub const EMPTY: StateValue = StateValue::new(NAME, 0, "EMPTY", 0, ' ');
pub const SHEATH: StateValue = StateValue::new(NAME, 1, "SHEATH", 1, '=');
pub const CORE: StateValue = StateValue::new(NAME, 2, "CORE", 2, 'o');
pub const TEMP: StateValue = StateValue::new(NAME, 3, "TEMP", 3, '-');
pub const TURN: StateValue = StateValue::new(NAME, 4, "TURN", 4, 't');
pub const EXTEND: StateValue = StateValue::new(NAME, 5, "EXTEND", 5, 'e');
pub const INIT: StateValue = StateValue::new(NAME, 6, "INIT", 6, 'i');
pub const ADVANCE: StateValue = StateValue::new(NAME, 7, "ADVANCE", 7, 'a');

static STATES: [StateValue; 8] = [EMPTY, SHEATH, CORE, TEMP, TURN, EXTEND, INIT, ADVANCE];

#[derive(Clone, Copy, Debug)]
enum Condition {
    Always,
    /// At least `n` neighbors hold one of the listed states.
    AtLeast(&'static [StateValue], usize),
}

impl Condition {
    fn holds(&self, neighbors: &[StateValue]) -> bool {
        match *self {
            Condition::Always => true,
            Condition::AtLeast(states, n) => neighbors.iter().filter(|s| states.contains(s)).count() >= n,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    from: StateValue,
    to: StateValue,
    when: Condition,
}

const fn transition(from: StateValue, to: StateValue, when: Condition) -> Transition {
    Transition { from, to, when }
}

static TRANSITIONS: [Transition; 11] = [
    transition(EMPTY, SHEATH, Condition::AtLeast(&[ADVANCE], 1)),
    transition(EMPTY, SHEATH, Condition::AtLeast(&[SHEATH, TEMP], 2)),
    transition(SHEATH, TEMP, Condition::AtLeast(&[EXTEND], 1)),
    transition(TEMP, SHEATH, Condition::Always),
    transition(CORE, ADVANCE, Condition::AtLeast(&[ADVANCE], 1)),
    transition(CORE, INIT, Condition::AtLeast(&[SHEATH], 2)),
    transition(INIT, TURN, Condition::AtLeast(&[CORE], 1)),
    transition(INIT, CORE, Condition::Always),
    transition(TURN, EXTEND, Condition::Always),
    transition(EXTEND, ADVANCE, Condition::Always),
    transition(ADVANCE, CORE, Condition::Always),
];

#[derive(Clone, Debug, Default)]
pub struct Loops;

impl Loops {
    /// Looks up the next state of a cell in `state` surrounded by `neighbors`.
    pub fn transition(&self, state: StateValue, neighbors: &[StateValue]) -> StateValue {
        TRANSITIONS
            .iter()
            .find(|t| t.from == state && t.when.holds(neighbors))
            .map(|t| t.to)
            .unwrap_or(state)
    }
}

pub fn build(_: &KernelParams) -> SimResult<Box<dyn RuleKernel>> {
    Ok(Box::new(Loops))
}

impl RuleKernel for Loops {
    fn name(&self) -> &'static str {
        NAME
    }

    fn states(&self) -> &'static [StateValue] {
        &STATES
    }

    fn default_state(&self) -> StateValue {
        EMPTY
    }

    fn preferred_neighborhood(&self) -> Neighborhood {
        Neighborhood::VonNeumann
    }

    fn initialize_color_map(&self) -> BTreeMap<StateValue, Color> {
        color_map(&[
            (EMPTY, [0, 0, 0]),
            (SHEATH, [0, 0, 255]),
            (CORE, [255, 0, 0]),
            (TEMP, [0, 255, 0]),
            (TURN, [255, 255, 0]),
            (EXTEND, [255, 0, 255]),
            (INIT, [255, 255, 255]),
            (ADVANCE, [0, 255, 255]),
        ])
    }

    fn apply_rules(&self, grid: &mut Grid, _: &mut SimRng) -> SimResult<()> {
        for pos in grid.positions() {
            let state = state_at(grid, pos)?;
            let neighbors = grid.neighbor_states(pos);
            let next = self.transition(state, &neighbors);
            if next != state {
                grid.set_next_state(pos, next)?;
            }
        }

        Ok(())
    }
}
