//! Static table of every rule kernel the engine knows how to build, keyed by the name used in configurations.

use super::RuleKernel;
use crate::conf::KernelParams;
use crate::error::{SimError, SimResult};
use crate::kernels::{fire, life, loops, percolation, rps, segregation, wator};

pub type KernelFactory = fn(&KernelParams) -> SimResult<Box<dyn RuleKernel>>;

static KERNELS: &[(&str, KernelFactory)] = &[
    (life::NAME, life::build as KernelFactory),
    (fire::NAME, fire::build as KernelFactory),
    (wator::NAME, wator::build as KernelFactory),
    (segregation::NAME, segregation::build as KernelFactory),
    (percolation::NAME, percolation::build as KernelFactory),
    (loops::NAME, loops::build as KernelFactory),
    (rps::NAME, rps::build as KernelFactory),
];

pub fn factory(name: &str) -> Option<KernelFactory> {
    KERNELS
        .iter()
        .find(|&&(key, _)| key.eq_ignore_ascii_case(name.trim()))
        .map(|&(_, factory)| factory)
}

/// Builds the kernel registered under `name` with the supplied parameters.
pub fn create(name: &str, params: &KernelParams) -> SimResult<Box<dyn RuleKernel>> {
    let factory = factory(name).ok_or_else(|| SimError::UnknownKernel(name.to_owned()))?;
    let kernel = factory(params)?;
    info!("Built `{}` kernel", kernel.name());
    Ok(kernel)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    KERNELS.iter().map(|&(name, _)| name)
}

#[test]
fn every_registered_kernel_builds_with_defaults() {
    for name in names() {
        let kernel = create(name, &KernelParams::default()).unwrap();
        assert_eq!(kernel.name(), name);
        // the default state has to be decodable
        let default_state = kernel.default_state();
        assert!(kernel.states().contains(&default_state));
        assert!(kernel.initialize_state_map().values().any(|&s| s == default_state));
        assert_eq!(kernel.initialize_color_map().len(), kernel.states().len());
    }
}

#[test]
fn lookup_is_case_insensitive() {
    assert!(factory("Life").is_some());
    assert!(factory("WaTor").is_some());
    assert!(factory("langton").is_none());
}

#[test]
fn unknown_names_fail() {
    match create("sugarscape", &KernelParams::default()) {
        Err(SimError::UnknownKernel(name)) => assert_eq!(name, "sugarscape"),
        other => panic!("unexpected: {:?}", other),
    }
}
