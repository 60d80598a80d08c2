//! A grid-based, discrete-time cellular automaton engine.
//!
//! A `Simulation` owns a rectangular `Grid` of double-buffered cells and a `RuleKernel` that knows what the cells'
//! states mean.  Every step the kernel reads the frozen current generation and buffers each cell's next state; the
//! engine then commits every buffer at once, so the outcome never depends on the order cells are visited in.
//!
//! How the grid is connected is decided separately from the rules by an `EdgePolicy` (toroidal, mirror, bounded or
//! infinite) and a `Neighborhood` (Moore, Von Neumann or extended Moore), so any kernel can run on any topology.

#[macro_use]
extern crate log;
extern crate rand;
extern crate rand_pcg;
#[macro_use]
extern crate serde_derive;
extern crate thiserror;

pub mod cell;
pub mod conf;
pub mod edge;
pub mod engine;
pub mod error;
pub mod generator;
pub mod grid;
pub mod kernels;
pub mod neighborhood;
pub mod state;
pub mod util;

pub mod prelude {
    pub use crate::cell::{Cell, Payload};
    pub use crate::conf::{GridDims, KernelParams, SimulationConf};
    pub use crate::edge::EdgePolicy;
    pub use crate::engine::{registry, RuleKernel, SimRng, Simulation};
    pub use crate::error::{SimError, SimResult};
    pub use crate::generator::{Generator, RandomGenerator, UniformGenerator};
    pub use crate::grid::{Grid, Neighbor, Pos};
    pub use crate::neighborhood::Neighborhood;
    pub use crate::state::{Color, StateValue};
}
