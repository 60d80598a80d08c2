//! Wa-Tor predator/prey.  Fish wander and breed; sharks hunt fish, starve without them, and breed as well.  Every
//! organism carries a breed counter (and sharks an energy level) in its cell's payload, and the payload travels with
//! the organism when it moves.
//!
//! All sharks act before any fish during a chronon so that a fish can be eaten before it swims off.  Destinations are
//! claimed as they're chosen; a claimed cell can't be targeted again in the same chronon, so two organisms never end
//! up in one cell.
//!
//! Parameters:
//!  - `fish_breed_time`: chronons a fish has to survive before it can breed (default 3)
//!  - `shark_breed_time`: chronons a shark has to survive before it can breed (default 10)
//!  - `shark_energy`: energy of a newly placed or newborn shark (default 5)
//!  - `energy_per_fish`: energy a shark gains from eating a fish (default 3)

use std::collections::{BTreeMap, HashSet};

use rand::seq::SliceRandom;

use super::{color_map, state_at};
use crate::cell::Payload;
use crate::conf::KernelParams;
use crate::engine::{RuleKernel, SimRng};
use crate::error::SimResult;
use crate::grid::{Grid, Pos};
use crate::neighborhood::Neighborhood;
use crate::state::{Color, StateValue};

pub const NAME: &str = "wator";

pub const EMPTY: StateValue = StateValue::new(NAME, 0, "EMPTY", 0, ' ');
pub const FISH: StateValue = StateValue::new(NAME, 1, "FISH", 1, '^');
pub const SHARK: StateValue = StateValue::new(NAME, 2, "SHARK", 2, 'V');

static STATES: [StateValue; 3] = [EMPTY, FISH, SHARK];

#[derive(Clone, Debug)]
pub struct WaTor {
    fish_breed_time: u32,
    shark_breed_time: u32,
    shark_energy: u32,
    energy_per_fish: u32,
}

fn organism(breed: u32, energy: u32) -> Option<Payload> {
    Some(Payload::Organism { breed, energy })
}

/// Empty neighbors of `pos` that nothing has claimed yet this chronon.
fn open_water(grid: &mut Grid, pos: Pos, claimed: &HashSet<Pos>) -> Vec<Pos> {
    grid.neighbors(pos)
        .into_iter()
        .filter(|n| n.state == EMPTY && !claimed.contains(&n.pos))
        .map(|n| n.pos)
        .collect()
}

impl WaTor {
    pub fn new(fish_breed_time: u32, shark_breed_time: u32, shark_energy: u32, energy_per_fish: u32) -> Self {
        WaTor {
            fish_breed_time,
            shark_breed_time,
            shark_energy,
            energy_per_fish,
        }
    }

    fn move_fish(&self, grid: &mut Grid, pos: Pos, claimed: &mut HashSet<Pos>, rng: &mut SimRng) -> SimResult<()> {
        let (breed, _) = match grid.cell(pos) {
            Some(cell) => cell.organism()?,
            None => return Ok(()),
        };
        let breed = breed.saturating_add(1);

        let destination = open_water(grid, pos, claimed).choose(rng).cloned();
        match destination {
            Some(dst) => {
                claimed.insert(dst);
                if breed >= self.fish_breed_time {
                    // the parent swims off and leaves its offspring behind
                    grid.set_next(dst, FISH, organism(0, 0))?;
                    grid.set_next(pos, FISH, organism(0, 0))?;
                } else {
                    grid.set_next(dst, FISH, organism(breed, 0))?;
                    grid.set_next(pos, EMPTY, None)?;
                }
            },
            None => grid.set_next(pos, FISH, organism(breed, 0))?,
        }

        Ok(())
    }

    fn move_shark(&self, grid: &mut Grid, pos: Pos, claimed: &mut HashSet<Pos>, rng: &mut SimRng) -> SimResult<()> {
        let (breed, energy) = match grid.cell(pos) {
            Some(cell) => cell.organism()?,
            None => return Ok(()),
        };
        let breed = breed.saturating_add(1);

        // prefer the first unclaimed fish in enumeration order, otherwise wander into open water
        let prey = grid
            .neighbors(pos)
            .into_iter()
            .find(|n| n.state == FISH && !claimed.contains(&n.pos))
            .map(|n| n.pos);
        let (destination, energy) = match prey {
            Some(fish) => (Some(fish), energy.saturating_add(self.energy_per_fish)),
            None => (open_water(grid, pos, claimed).choose(rng).cloned(), energy),
        };
        let energy = energy.saturating_sub(1);

        if energy == 0 {
            trace!("Shark at ({}, {}) starved", pos.row, pos.col);
            if let Some(fish) = prey {
                // the fish is still eaten
                claimed.insert(fish);
                grid.set_next(fish, EMPTY, None)?;
            }
            return grid.set_next(pos, EMPTY, None);
        }

        match destination {
            Some(dst) => {
                claimed.insert(dst);
                if breed >= self.shark_breed_time {
                    grid.set_next(dst, SHARK, organism(0, energy))?;
                    grid.set_next(pos, SHARK, organism(0, self.shark_energy))?;
                } else {
                    grid.set_next(dst, SHARK, organism(breed, energy))?;
                    grid.set_next(pos, EMPTY, None)?;
                }
            },
            None => grid.set_next(pos, SHARK, organism(breed, energy))?,
        }

        Ok(())
    }
}

pub fn build(params: &KernelParams) -> SimResult<Box<dyn RuleKernel>> {
    Ok(Box::new(WaTor::new(
        params.positive("fish_breed_time", 3)?,
        params.positive("shark_breed_time", 10)?,
        params.positive("shark_energy", 5)?,
        params.positive("energy_per_fish", 3)?,
    )))
}

impl RuleKernel for WaTor {
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
        color_map(&[(EMPTY, [0, 0, 0]), (FISH, [12, 24, 222]), (SHARK, [233, 121, 78])])
    }

    fn initial_payload(&self, _code: i32, state: StateValue) -> Option<Payload> {
        if state == FISH {
            organism(0, 0)
        } else if state == SHARK {
            organism(0, self.shark_energy)
        } else {
            None
        }
    }

    fn apply_rules(&self, grid: &mut Grid, rng: &mut SimRng) -> SimResult<()> {
        let positions = grid.positions();
        let mut claimed: HashSet<Pos> = HashSet::new();

        for &pos in &positions {
            if state_at(grid, pos)? == SHARK {
                self.move_shark(grid, pos, &mut claimed, rng)?;
            }
        }

        for &pos in &positions {
            // a claimed fish has been eaten
            if state_at(grid, pos)? == FISH && !claimed.contains(&pos) {
                self.move_fish(grid, pos, &mut claimed, rng)?;
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
    use crate::error::SimError;

    fn ocean(rows: usize, cols: usize) -> Grid {
        Grid::new(rows, cols, EMPTY, EdgePolicy::Bounded, Neighborhood::VonNeumann).unwrap()
    }

    fn place(grid: &mut Grid, row: isize, col: isize, state: StateValue, breed: u32, energy: u32) {
        let pos = Pos::new(row, col);
        grid.set_state(pos, state).unwrap();
        grid.set_payload(pos, organism(breed, energy)).unwrap();
    }

    fn run(kernel: &WaTor, grid: &mut Grid, seed: u64) {
        let mut rng = SimRng::seed_from_u64(seed);
        kernel.apply_rules(grid, &mut rng).unwrap();
        grid.apply_next_states();
    }

    fn count(grid: &Grid, state: StateValue) -> usize {
        grid.cells().iter().filter(|c| c.state() == state).count()
    }

    #[test]
    fn boxed_in_fish_waits_and_ages() {
        let kernel = WaTor::new(5, 10, 5, 3);
        let mut grid = ocean(1, 1);
        place(&mut grid, 0, 0, FISH, 1, 0);

        run(&kernel, &mut grid, 1);
        assert_eq!(grid.state(Pos::new(0, 0)), Some(FISH));
        assert_eq!(grid.cell(Pos::new(0, 0)).unwrap().organism(), Ok((2, 0)));
    }

    #[test]
    fn fish_swims_into_open_water() {
        let kernel = WaTor::new(5, 10, 5, 3);
        let mut grid = ocean(1, 2);
        place(&mut grid, 0, 0, FISH, 0, 0);

        run(&kernel, &mut grid, 1);
        assert_eq!(grid.state(Pos::new(0, 0)), Some(EMPTY));
        assert_eq!(grid.cell(Pos::new(0, 1)).unwrap().organism(), Ok((1, 0)));
    }

    #[test]
    fn fish_breeds_when_ready() {
        let kernel = WaTor::new(2, 10, 5, 3);
        let mut grid = ocean(1, 2);
        place(&mut grid, 0, 0, FISH, 1, 0);

        run(&kernel, &mut grid, 1);
        assert_eq!(count(&grid, FISH), 2);
        assert!(grid.cells().iter().all(|c| c.organism() == Ok((0, 0))));
    }

    #[test]
    fn shark_eats_adjacent_fish() {
        let kernel = WaTor::new(5, 10, 5, 3);
        let mut grid = ocean(1, 3);
        place(&mut grid, 0, 0, SHARK, 0, 2);
        place(&mut grid, 0, 1, FISH, 0, 0);

        run(&kernel, &mut grid, 1);
        assert_eq!(grid.state(Pos::new(0, 0)), Some(EMPTY));
        // 2 + 3 from the fish - 1 for the chronon
        assert_eq!(grid.cell(Pos::new(0, 1)).unwrap().organism(), Ok((1, 4)));
        assert_eq!(count(&grid, FISH), 0);
    }

    #[test]
    fn shark_starves() {
        let kernel = WaTor::new(5, 10, 5, 3);
        let mut grid = ocean(1, 3);
        place(&mut grid, 0, 1, SHARK, 0, 1);

        run(&kernel, &mut grid, 1);
        assert_eq!(count(&grid, SHARK), 0);
        assert_eq!(count(&grid, EMPTY), 3);
    }

    #[test]
    fn two_fish_never_share_a_cell() {
        // both fish can only go to the middle cell
        let kernel = WaTor::new(5, 10, 5, 3);
        let mut grid = ocean(1, 3);
        place(&mut grid, 0, 0, FISH, 0, 0);
        place(&mut grid, 0, 2, FISH, 0, 0);

        for seed in 0..10 {
            let mut grid = grid.clone();
            run(&kernel, &mut grid, seed);
            assert_eq!(count(&grid, FISH), 2);
            assert_eq!(grid.state(Pos::new(0, 1)), Some(FISH));
        }
    }

    #[test]
    fn populations_are_conserved_without_breeding_or_hunger() {
        let kernel = WaTor::new(1000, 1000, 1000, 1);
        let mut grid = ocean(6, 6);
        place(&mut grid, 0, 0, FISH, 0, 0);
        place(&mut grid, 2, 3, FISH, 0, 0);
        place(&mut grid, 5, 5, FISH, 0, 0);
        place(&mut grid, 3, 0, SHARK, 0, 500);

        for seed in 0..20 {
            let fish_before = count(&grid, FISH);
            run(&kernel, &mut grid, seed);
            assert_eq!(count(&grid, SHARK), 1);
            assert!(count(&grid, FISH) <= fish_before);
        }
    }

    #[test]
    fn missing_payload_is_reported() {
        let kernel = WaTor::new(5, 10, 5, 3);
        let mut grid = ocean(1, 2);
        grid.set_state(Pos::new(0, 0), FISH).unwrap();

        let mut rng = SimRng::seed_from_u64(1);
        assert!(matches!(
            kernel.apply_rules(&mut grid, &mut rng),
            Err(SimError::TypeMismatch { expected: "organism", found: "none" })
        ));
    }

    #[test]
    fn huge_parameters_saturate() {
        let kernel = WaTor::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX);
        let mut grid = ocean(1, 3);
        place(&mut grid, 0, 0, SHARK, u32::MAX, u32::MAX);
        place(&mut grid, 0, 1, FISH, u32::MAX, 0);

        run(&kernel, &mut grid, 1);
        // the shark eats and then pays for the chronon; both counters hit the breed threshold
        assert_eq!(grid.cell(Pos::new(0, 1)).unwrap().organism(), Ok((0, u32::MAX - 1)));
        assert_eq!(grid.cell(Pos::new(0, 0)).unwrap().organism(), Ok((0, u32::MAX)));
    }
}
