//! Conway-style life with a configurable birth/survival rule.  Rules are written either as `B<digits>/S<digits>` or
//! `S<digits>/B<digits>`, where each digit is a live-neighbor count between 0 and 8.  The default is `B3/S23`.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use super::{color_map, state_at};
use crate::conf::KernelParams;
use crate::engine::{RuleKernel, SimRng};
use crate::error::{SimError, SimResult};
use crate::grid::Grid;
use crate::state::{Color, StateValue};

pub const NAME: &str = "life";

pub const DEAD: StateValue = StateValue::new(NAME, 0, "DEAD", 0, '.');
pub const ALIVE: StateValue = StateValue::new(NAME, 1, "ALIVE", 1, '#');

static STATES: [StateValue; 2] = [DEAD, ALIVE];

/// Which live-neighbor counts cause a birth and which let a live cell survive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifeRule {
    birth: [bool; 9],
    survive: [bool; 9],
}

impl Default for LifeRule {
    fn default() -> LifeRule {
        let mut rule = LifeRule {
            birth: [false; 9],
            survive: [false; 9],
        };
        rule.birth[3] = true;
        rule.survive[2] = true;
        rule.survive[3] = true;
        rule
    }
}

impl LifeRule {
    pub fn born(&self, live_neighbors: usize) -> bool {
        self.birth.get(live_neighbors).cloned().unwrap_or(false)
    }

    pub fn survives(&self, live_neighbors: usize) -> bool {
        self.survive.get(live_neighbors).cloned().unwrap_or(false)
    }
}

fn parse_counts(part: &str, rule: &str) -> SimResult<[bool; 9]> {
    let mut counts = [false; 9];
    for c in part.chars() {
        match c.to_digit(10) {
            Some(d) if d <= 8 => counts[d as usize] = true,
            _ => {
                return Err(SimError::invalid_argument(format!(
                    "bad neighbor count `{}` in life rule `{}`",
                    c, rule
                )))
            },
        }
    }

    Ok(counts)
}

impl FromStr for LifeRule {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<LifeRule> {
        let malformed = || SimError::invalid_argument(format!("malformed life rule `{}`", s));

        let mut parts = s.trim().split('/');
        let (first, second) = match (parts.next(), parts.next(), parts.next()) {
            (Some(first), Some(second), None) => (first, second),
            _ => return Err(malformed()),
        };

        let mut birth = None;
        let mut survive = None;
        for part in &[first, second] {
            let mut chars = part.chars();
            let target = match chars.next() {
                Some('B') | Some('b') => &mut birth,
                Some('S') | Some('s') => &mut survive,
                _ => return Err(malformed()),
            };
            if target.is_some() {
                return Err(malformed());
            }
            *target = Some(parse_counts(chars.as_str(), s)?);
        }

        match (birth, survive) {
            (Some(birth), Some(survive)) => Ok(LifeRule { birth, survive }),
            _ => Err(malformed()),
        }
    }
}

impl Display for LifeRule {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let digits = |counts: &[bool; 9]| -> String {
            (0..9).filter(|&n| counts[n]).map(|n| n.to_string()).collect()
        };
        write!(formatter, "B{}/S{}", digits(&self.birth), digits(&self.survive))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Life {
    rule: LifeRule,
}

impl Life {
    pub fn new(rule: LifeRule) -> Self {
        Life { rule }
    }

    pub fn rule(&self) -> LifeRule {
        self.rule
    }
}

pub fn build(params: &KernelParams) -> SimResult<Box<dyn RuleKernel>> {
    let rule = match params.rule {
        Some(ref rule) => rule.parse()?,
        None => LifeRule::default(),
    };

    Ok(Box::new(Life::new(rule)))
}

impl RuleKernel for Life {
    fn name(&self) -> &'static str {
        NAME
    }

    fn states(&self) -> &'static [StateValue] {
        &STATES
    }

    fn default_state(&self) -> StateValue {
        DEAD
    }

    fn initialize_color_map(&self) -> BTreeMap<StateValue, Color> {
        color_map(&[(DEAD, [255, 255, 255]), (ALIVE, [0, 0, 0])])
    }

    fn apply_rules(&self, grid: &mut Grid, _: &mut SimRng) -> SimResult<()> {
        for pos in grid.positions() {
            let live_neighbors = grid.count_neighbors(pos, ALIVE);
            let next = if state_at(grid, pos)? == ALIVE {
                if self.rule.survives(live_neighbors) {
                    ALIVE
                } else {
                    DEAD
                }
            } else if self.rule.born(live_neighbors) {
                ALIVE
            } else {
                DEAD
            };

            grid.set_next_state(pos, next)?;
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
    fn default_rule_is_b3_s23() {
        let rule = LifeRule::default();
        assert_eq!(rule, "B3/S23".parse().unwrap());
        assert_eq!(rule, "S23/B3".parse().unwrap());
        assert_eq!(rule.to_string(), "B3/S23");
        for n in 0..=8 {
            assert_eq!(rule.survives(n), n == 2 || n == 3);
            assert_eq!(rule.born(n), n == 3);
        }
        assert!(!rule.born(12));
    }

    #[test]
    fn parses_other_rules() {
        let highlife: LifeRule = "B36/S23".parse().unwrap();
        assert!(highlife.born(6));
        let seeds: LifeRule = "b2/s".parse().unwrap();
        assert!(seeds.born(2));
        assert!((0..=8).all(|n| !seeds.survives(n)));
    }

    #[test]
    fn malformed_rules_rejected() {
        for bad in &["", "B3", "B3/S23/B1", "B9/S23", "X3/S23", "B3/B23", "S2/S3", "B3/S2a", "23/3"] {
            assert!(
                matches!(bad.parse::<LifeRule>(), Err(SimError::InvalidArgument(_))),
                "accepted `{}`",
                bad
            );
        }
    }

    fn neighbors_with(live: usize) -> Grid {
        let mut grid = Grid::new(3, 3, DEAD, EdgePolicy::Bounded, Neighborhood::Moore).unwrap();
        let ring = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)];
        for &(row, col) in ring.iter().take(live) {
            grid.set_state(Pos::new(row, col), ALIVE).unwrap();
        }
        grid
    }

    #[test]
    fn center_cell_follows_counts() {
        let life = Life::default();
        let mut rng = SimRng::seed_from_u64(0);
        let center = Pos::new(1, 1);
        for live in 0..=8 {
            // dead center
            let mut grid = neighbors_with(live);
            life.apply_rules(&mut grid, &mut rng).unwrap();
            grid.apply_next_states();
            assert_eq!(grid.state(center) == Some(ALIVE), live == 3, "birth with {}", live);

            // live center
            let mut grid = neighbors_with(live);
            grid.set_state(center, ALIVE).unwrap();
            life.apply_rules(&mut grid, &mut rng).unwrap();
            grid.apply_next_states();
            assert_eq!(grid.state(center) == Some(ALIVE), live == 2 || live == 3, "survival with {}", live);
        }
    }
}
