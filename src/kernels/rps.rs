//! Cyclic rock-paper-scissors dominance.  Paper beats rock, scissors beat paper, and rock beats scissors; a cell is
//! taken over by the state that beats it once at least `threshold` of its neighbors (default 3) hold that state.

use std::collections::BTreeMap;

use super::{color_map, state_at};
use crate::conf::KernelParams;
use crate::engine::{RuleKernel, SimRng};
use crate::error::SimResult;
use crate::grid::Grid;
use crate::state::{Color, StateValue};

pub const NAME: &str = "rps";

pub const ROCK: StateValue = StateValue::new(NAME, 0, "ROCK", 0, 'R');
pub const PAPER: StateValue = StateValue::new(NAME, 1, "PAPER", 1, 'P');
pub const SCISSORS: StateValue = StateValue::new(NAME, 2, "SCISSORS", 2, 'S');

static STATES: [StateValue; 3] = [ROCK, PAPER, SCISSORS];

/// The state that beats `state`.
pub fn predator(state: StateValue) -> StateValue {
    if state == ROCK {
        PAPER
    } else if state == PAPER {
        SCISSORS
    } else {
        ROCK
    }
}

#[derive(Clone, Debug)]
pub struct RockPaperScissors {
    threshold: usize,
}

impl RockPaperScissors {
    pub fn new(threshold: usize) -> Self {
        RockPaperScissors { threshold }
    }
}

pub fn build(params: &KernelParams) -> SimResult<Box<dyn RuleKernel>> {
    let threshold = params.positive("threshold", 3)?;
    Ok(Box::new(RockPaperScissors::new(threshold as usize)))
}

impl RuleKernel for RockPaperScissors {
    fn name(&self) -> &'static str {
        NAME
    }

    fn states(&self) -> &'static [StateValue] {
        &STATES
    }

    fn default_state(&self) -> StateValue {
        ROCK
    }

    fn initialize_color_map(&self) -> BTreeMap<StateValue, Color> {
        color_map(&[(ROCK, [128, 128, 128]), (PAPER, [255, 255, 240]), (SCISSORS, [200, 30, 30])])
    }

    fn apply_rules(&self, grid: &mut Grid, _: &mut SimRng) -> SimResult<()> {
        for pos in grid.positions() {
            let winner = predator(state_at(grid, pos)?);
            if grid.count_neighbors(pos, winner) >= self.threshold {
                grid.set_next_state(pos, winner)?;
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
    use crate::grid::Pos;
    use crate::neighborhood::Neighborhood;

    #[test]
    fn dominance_is_cyclic() {
        assert_eq!(predator(ROCK), PAPER);
        assert_eq!(predator(PAPER), SCISSORS);
        assert_eq!(predator(SCISSORS), ROCK);
    }

    #[test]
    fn takeover_needs_threshold() {
        let kernel = RockPaperScissors::new(3);
        let mut rng = SimRng::seed_from_u64(0);
        let mut grid = Grid::new(3, 3, ROCK, EdgePolicy::Bounded, Neighborhood::Moore).unwrap();
        grid.set_state(Pos::new(0, 0), PAPER).unwrap();
        grid.set_state(Pos::new(0, 1), PAPER).unwrap();

        // two paper neighbors aren't enough for the center
        kernel.apply_rules(&mut grid, &mut rng).unwrap();
        grid.apply_next_states();
        assert_eq!(grid.state(Pos::new(1, 1)), Some(ROCK));
        assert_eq!(grid.to_string(), "PPR\nRRR\nRRR");

        grid.set_state(Pos::new(0, 2), PAPER).unwrap();
        kernel.apply_rules(&mut grid, &mut rng).unwrap();
        grid.apply_next_states();
        assert_eq!(grid.to_string(), "PPP\nRPR\nRRR");
    }
}
