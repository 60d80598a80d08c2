//! This is the core of the simulation.  A `Simulation` owns a grid and drives it forward one generation at a time by
//! handing it to a `RuleKernel`, which computes every cell's next state from the frozen current generation, and then
//! committing all of those buffered states at once.
//!
//! Kernels are plain values selected by name from a static registry, so adding a rule set means adding a kernel and
//! a registry entry; neither the grid nor the engine knows anything about what the states mean.

use std::collections::BTreeMap;
use std::fmt::Debug;

use rand_pcg::Pcg64;

use crate::cell::{Cell, Payload};
use crate::error::SimResult;
use crate::grid::Grid;
use crate::neighborhood::Neighborhood;
use crate::state::{Color, StateValue};

pub mod registry;
mod simulation;

pub use self::simulation::Simulation;

/// The random number generator owned by every simulation.  Seeding it makes a run reproducible.
pub type SimRng = Pcg64;

/// Computes the next generation of a grid for one kind of simulation.
pub trait RuleKernel: Debug {
    /// Registry key of the kernel.
    fn name(&self) -> &'static str;

    /// Every state the kernel can produce.
    fn states(&self) -> &'static [StateValue];

    /// State of freshly allocated cells.
    fn default_state(&self) -> StateValue;

    /// Neighborhood used when the configuration doesn't pick one.
    fn preferred_neighborhood(&self) -> Neighborhood {
        Neighborhood::Moore
    }

    /// Maps the integer codes of an initial-state array onto states.
    fn initialize_state_map(&self) -> BTreeMap<i32, StateValue> {
        self.states().iter().map(|&state| (state.code(), state)).collect()
    }

    /// Maps every state onto the color a renderer should draw it with.
    fn initialize_color_map(&self) -> BTreeMap<StateValue, Color>;

    /// Payload for a cell that is being placed into `state` from the integer `code`.
    fn initial_payload(&self, _code: i32, _state: StateValue) -> Option<Payload> {
        None
    }

    /// Integer code that `initialize_state_map` and `initial_payload` would turn back into `cell`.
    fn encode(&self, cell: &Cell) -> i32 {
        cell.state().code()
    }

    /// Evaluates the whole grid, buffering each cell's next state.  Implementations read only current states and
    /// write only through the next-state buffers; the engine commits the buffers afterwards.
    fn apply_rules(&self, grid: &mut Grid, rng: &mut SimRng) -> SimResult<()>;
}
