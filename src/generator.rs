//! Populates the world with an initial layout of cells.  Generators produce the same flat, row-major array of state
//! codes that a configuration loader would, so a generated simulation goes through exactly the same decoding path.

use rand::Rng;

use crate::conf::GridDims;
use crate::engine::SimRng;
use crate::error::{SimError, SimResult};

pub trait Generator {
    fn generate(&mut self, dims: GridDims, rng: &mut SimRng) -> Vec<i32>;
}

/// Fills every cell with the same code.
pub struct UniformGenerator(pub i32);

impl Generator for UniformGenerator {
    fn generate(&mut self, dims: GridDims, _: &mut SimRng) -> Vec<i32> {
        vec![self.0; dims.rows * dims.cols]
    }
}

/// Picks each cell's code independently, weighted by the supplied relative frequencies.
pub struct RandomGenerator {
    weights: Vec<(i32, f64)>,
    total: f64,
}

impl RandomGenerator {
    pub fn new(weights: Vec<(i32, f64)>) -> SimResult<Self> {
        if weights.is_empty() {
            return Err(SimError::invalid_argument("random generator needs at least one code"));
        }
        if let Some(&(code, weight)) = weights.iter().find(|&&(_, w)| !(w >= 0.0) || !w.is_finite()) {
            return Err(SimError::invalid_argument(format!(
                "weight for code {} must be finite and non-negative, got {}",
                code, weight
            )));
        }

        let total: f64 = weights.iter().map(|&(_, w)| w).sum();
        if total <= 0.0 {
            return Err(SimError::invalid_argument("random generator weights sum to zero"));
        }

        Ok(RandomGenerator { weights, total })
    }

    fn pick(&self, rng: &mut SimRng) -> i32 {
        let mut roll = rng.gen::<f64>() * self.total;
        for &(code, weight) in &self.weights {
            if roll < weight {
                return code;
            }
            roll -= weight;
        }

        // only reachable through float rounding on the last bucket
        self.weights[self.weights.len() - 1].0
    }
}

impl Generator for RandomGenerator {
    fn generate(&mut self, dims: GridDims, rng: &mut SimRng) -> Vec<i32> {
        debug!("Generating {}x{} world...", dims.rows, dims.cols);
        (0..dims.rows * dims.cols).map(|_| self.pick(rng)).collect()
    }
}
