use std::collections::BTreeMap;

use rand::SeedableRng;

use super::{registry, RuleKernel, SimRng};
use crate::conf::{GridDims, SimulationConf};
use crate::error::{SimError, SimResult};
use crate::generator::Generator;
use crate::grid::{Grid, Pos};
use crate::state::{Color, StateValue};
use crate::util::exact_sqrt;

/// Everything needed to put the simulation back the way it was one generation ago.
#[derive(Clone, Debug)]
struct Generation {
    grid: Grid,
    populations: BTreeMap<StateValue, usize>,
    iteration: usize,
}

#[derive(Debug)]
pub struct Simulation {
    kernel: Box<dyn RuleKernel>,
    grid: Grid,
    rng: SimRng,
    color_map: BTreeMap<StateValue, Color>,
    state_map: BTreeMap<i32, StateValue>,
    populations: BTreeMap<StateValue, usize>,
    iteration: usize,
    previous: Option<Generation>,
}

/// Works out the grid dimensions for an initial-state array of `len` codes.
fn resolve_dims(len: usize, dims: Option<GridDims>) -> SimResult<GridDims> {
    if len == 0 {
        return Err(SimError::invalid_argument("initial state array is empty"));
    }

    match dims {
        Some(dims) => {
            if dims.rows * dims.cols != len {
                return Err(SimError::invalid_argument(format!(
                    "{} initial states don't fill a {}x{} grid",
                    len, dims.rows, dims.cols
                )));
            }
            Ok(dims)
        },
        None => match exact_sqrt(len) {
            Some(side) => Ok(GridDims::new(side, side)),
            None => Err(SimError::invalid_argument(format!(
                "{} initial states can't form a square grid and no dimensions were given",
                len
            ))),
        },
    }
}

impl Simulation {
    /// Builds a simulation from a configuration, looking its kernel up in the registry.
    pub fn new(conf: &SimulationConf) -> SimResult<Simulation> {
        Simulation::with_rng(conf, SimRng::seed_from_u64(conf.seed))
    }

    /// Same as `new` but draws randomness from `rng` instead of seeding a fresh one from `conf.seed`.
    pub fn with_rng(conf: &SimulationConf, rng: SimRng) -> SimResult<Simulation> {
        let kernel = registry::create(&conf.kind, &conf.params)?;
        Simulation::with_kernel(kernel, conf, rng)
    }

    /// Builds a simulation around an already constructed kernel and RNG.  `conf.kind` and `conf.params` are ignored.
    pub fn with_kernel(kernel: Box<dyn RuleKernel>, conf: &SimulationConf, rng: SimRng) -> SimResult<Simulation> {
        let dims = resolve_dims(conf.initial_states.len(), conf.dims)?;
        let neighborhood = conf.neighborhood.unwrap_or_else(|| kernel.preferred_neighborhood());
        let grid = Grid::new(dims.rows, dims.cols, kernel.default_state(), conf.edge, neighborhood)?;

        let mut sim = Simulation {
            color_map: BTreeMap::new(),
            state_map: BTreeMap::new(),
            populations: BTreeMap::new(),
            kernel,
            grid,
            rng,
            iteration: 0,
            previous: None,
        };
        sim.initialize_color_map()?;
        sim.initialize_state_map()?;
        sim.initialize_grid(&conf.initial_states, Some(dims))?;

        info!(
            "Created `{}` simulation on a {}x{} {} grid ({} neighborhood)",
            sim.kernel.name(),
            dims.rows,
            dims.cols,
            conf.edge,
            neighborhood
        );
        Ok(sim)
    }

    /// Builds a simulation whose initial states are produced by `gen` rather than taken from `conf`.
    pub fn from_generator<G: Generator>(conf: &SimulationConf, dims: GridDims, gen: &mut G) -> SimResult<Simulation> {
        let mut rng = SimRng::seed_from_u64(conf.seed);
        let mut conf = conf.clone();
        conf.initial_states = gen.generate(dims, &mut rng);
        conf.dims = Some(dims);
        Simulation::with_rng(&conf, rng)
    }

    /// Throws away the current run and starts over from `conf`.
    pub fn reset(&mut self, conf: &SimulationConf) -> SimResult<()> {
        *self = Simulation::new(conf)?;
        info!("Simulation reset to `{}`", conf.kind);
        Ok(())
    }

    /// Populates the color map from the kernel, checking that it covers every state.
    pub fn initialize_color_map(&mut self) -> SimResult<()> {
        let color_map = self.kernel.initialize_color_map();
        if let Some(missing) = self.kernel.states().iter().find(|s| !color_map.contains_key(*s)) {
            return Err(SimError::invalid_argument(format!(
                "`{}` kernel has no color for {:?}",
                self.kernel.name(),
                missing
            )));
        }

        self.color_map = color_map;
        Ok(())
    }

    /// Populates the code -> state table from the kernel, checking that every state can be decoded.
    pub fn initialize_state_map(&mut self) -> SimResult<()> {
        let state_map = self.kernel.initialize_state_map();
        if let Some(missing) = self
            .kernel
            .states()
            .iter()
            .find(|s| !state_map.values().any(|v| v == *s))
        {
            return Err(SimError::invalid_argument(format!(
                "`{}` kernel has no code for {:?}",
                self.kernel.name(),
                missing
            )));
        }

        self.state_map = state_map;
        Ok(())
    }

    /// Loads a flat row-major array of state codes into the grid.  Cells that have already been moved away from the
    /// default state are left alone.  If `dims` differ from the current grid a fresh grid is built.
    pub fn initialize_grid(&mut self, initial_states: &[i32], dims: Option<GridDims>) -> SimResult<()> {
        let dims = resolve_dims(initial_states.len(), dims)?;
        if dims.rows != self.grid.rows() || dims.cols != self.grid.cols() {
            self.grid = Grid::new(
                dims.rows,
                dims.cols,
                self.kernel.default_state(),
                self.grid.edge(),
                self.grid.neighborhood(),
            )?;
        }

        let default_state = self.grid.default_state();
        for (pos, &code) in self.grid.positions().into_iter().zip(initial_states.iter()) {
            if self.grid.state(pos) != Some(default_state) {
                continue;
            }

            let state = self.decode(code)?;
            let payload = self.kernel.initial_payload(code, state);
            self.grid.set_state(pos, state)?;
            self.grid.set_payload(pos, payload)?;
        }

        self.grid.reset_next_states();
        self.previous = None;
        self.count_populations();
        Ok(())
    }

    /// Runs one generation: evaluate every cell against the frozen grid, then commit all buffered states at once.
    pub fn step(&mut self) -> SimResult<()> {
        let snapshot = Generation {
            grid: self.grid.clone(),
            populations: self.populations.clone(),
            iteration: self.iteration,
        };

        if let Err(err) = self.kernel.apply_rules(&mut self.grid, &mut self.rng) {
            // also undoes any growth of an infinite grid
            self.grid = snapshot.grid;
            return Err(err);
        }
        self.grid.apply_next_states();

        self.previous = Some(snapshot);
        self.iteration += 1;
        self.count_populations();
        debug!("Iteration {} of `{}`: {:?}", self.iteration, self.kernel.name(), self.populations);
        Ok(())
    }

    /// Reverts the most recent step.  Only a single generation is kept, so calling this twice in a row only undoes
    /// one step.  Returns `false` if there was nothing to revert.
    pub fn step_back(&mut self) -> bool {
        match self.previous.take() {
            Some(Generation { grid, populations, iteration }) => {
                self.grid = grid;
                self.populations = populations;
                self.iteration = iteration;
                debug!("Stepped `{}` back to iteration {}", self.kernel.name(), self.iteration);
                true
            },
            None => {
                warn!("No previous generation recorded; ignoring step back");
                false
            },
        }
    }

    /// Decodes an integer code through the state map.
    pub fn decode(&self, code: i32) -> SimResult<StateValue> {
        self.state_map.get(&code).cloned().ok_or_else(|| {
            SimError::invalid_state(format!("code {} is not a `{}` state", code, self.kernel.name()))
        })
    }

    /// Places a cell into `state` from outside of a step, e.g. when a user paints the grid.
    pub fn set_state(&mut self, pos: Pos, state: StateValue) -> SimResult<()> {
        if !self.kernel.states().contains(&state) {
            return Err(SimError::invalid_state(format!(
                "{:?} is not a `{}` state",
                state,
                self.kernel.name()
            )));
        }

        let payload = self.kernel.initial_payload(state.code(), state);
        self.grid.set_state(pos, state)?;
        self.grid.set_payload(pos, payload)?;
        self.count_populations();
        Ok(())
    }

    /// Current grid as row-major state codes.  Loading the result with `initialize_grid` reproduces the grid.
    pub fn encode_states(&self) -> Vec<i32> {
        self.grid.cells().iter().map(|c| self.kernel.encode(c)).collect()
    }

    fn count_populations(&mut self) {
        let mut populations: BTreeMap<StateValue, usize> = self.kernel.states().iter().map(|&s| (s, 0)).collect();
        for cell in self.grid.cells() {
            *populations.entry(cell.state()).or_insert(0) += 1;
        }

        self.populations = populations;
    }

    pub fn kernel(&self) -> &dyn RuleKernel {
        &*self.kernel
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn color_map(&self) -> &BTreeMap<StateValue, Color> {
        &self.color_map
    }

    pub fn color(&self, state: StateValue) -> Option<Color> {
        self.color_map.get(&state).cloned()
    }

    pub fn state_map(&self) -> &BTreeMap<i32, StateValue> {
        &self.state_map
    }

    /// Number of cells in each state, including states with no cells.
    pub fn populations(&self) -> &BTreeMap<StateValue, usize> {
        &self.populations
    }

    pub fn population(&self, state: StateValue) -> usize {
        self.populations.get(&state).cloned().unwrap_or(0)
    }

    /// Number of steps taken since the grid was initialized.
    pub fn iteration(&self) -> usize {
        self.iteration
    }
}
