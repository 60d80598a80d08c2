//! Configuration values handed to the engine by whatever loads simulations.  The engine never parses files itself;
//! these types only derive serde traits so that a loader can produce them from whichever format it likes.

use std::collections::BTreeMap;

use crate::edge::EdgePolicy;
use crate::error::{SimError, SimResult};
use crate::neighborhood::Neighborhood;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub rows: usize,
    pub cols: usize,
}

impl GridDims {
    pub fn new(rows: usize, cols: usize) -> Self {
        GridDims { rows, cols }
    }
}

/// Named numeric parameters for a rule kernel, plus an optional rule string for kernels that take one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KernelParams {
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
    #[serde(default)]
    pub rule: Option<String>,
}

impl KernelParams {
    pub fn new() -> Self {
        KernelParams::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.values.insert(name.to_owned(), value);
        self
    }

    pub fn with_rule(mut self, rule: &str) -> Self {
        self.rule = Some(rule.to_owned());
        self
    }

    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.values.get(name).cloned().unwrap_or(default)
    }

    /// Reads a parameter that has to lie within `[0, 1]`.
    pub fn probability(&self, name: &str, default: f64) -> SimResult<f64> {
        check_probability(name, self.get_or(name, default))
    }

    /// Reads a parameter that has to be a positive whole number, e.g. a breed time.
    pub fn positive(&self, name: &str, default: u32) -> SimResult<u32> {
        let value = self.get_or(name, default as f64);
        if !(value >= 1.0) || value.fract() != 0.0 || value > u32::MAX as f64 {
            return Err(SimError::invalid_argument(format!(
                "`{}` must be a positive integer, got {}",
                name, value
            )));
        }

        Ok(value as u32)
    }
}

/// Rejects a probability or tolerance named `name` that falls outside of `[0, 1]`.
pub fn check_probability(name: &str, value: f64) -> SimResult<f64> {
    // written this way so that NaN is rejected as well
    if !(0.0..=1.0).contains(&value) {
        return Err(SimError::invalid_argument(format!(
            "`{}` must be within [0, 1], got {}",
            name, value
        )));
    }

    Ok(value)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConf {
    /// Registry key of the rule kernel, e.g. `"life"`.
    pub kind: String,
    /// Explicit grid dimensions.  If absent the initial-state array has to describe a square grid.
    #[serde(default)]
    pub dims: Option<GridDims>,
    #[serde(default)]
    pub edge: EdgePolicy,
    /// Falls back to the kernel's preferred neighborhood when absent.
    #[serde(default)]
    pub neighborhood: Option<Neighborhood>,
    #[serde(default)]
    pub params: KernelParams,
    /// Row-major state codes, decoded through the kernel's state map.
    pub initial_states: Vec<i32>,
    #[serde(default)]
    pub seed: u64,
}

impl Default for SimulationConf {
    fn default() -> SimulationConf {
        SimulationConf {
            kind: "life".to_owned(),
            dims: None,
            edge: EdgePolicy::default(),
            neighborhood: None,
            params: KernelParams::default(),
            initial_states: Vec::new(),
            seed: 0,
        }
    }
}

#[test]
fn probability_bounds() {
    let params = KernelParams::new().with("p", 0.25).with("bad", 1.5).with("nan", f64::NAN);
    assert_eq!(params.probability("p", 0.0), Ok(0.25));
    assert_eq!(params.probability("missing", 0.5), Ok(0.5));
    assert!(params.probability("bad", 0.0).is_err());
    assert!(params.probability("nan", 0.0).is_err());
}

#[test]
fn positive_integers() {
    let params = KernelParams::new().with("ok", 4.0).with("zero", 0.0).with("frac", 2.5);
    assert_eq!(params.positive("ok", 1), Ok(4));
    assert_eq!(params.positive("missing", 7), Ok(7));
    assert!(params.positive("zero", 1).is_err());
    assert!(params.positive("frac", 1).is_err());
}
