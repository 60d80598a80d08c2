//! Policies deciding which coordinates around a cell count as its neighbors.  A neighborhood only produces raw
//! coordinates; whether those coordinates exist, wrap, or reflect is up to the grid's `EdgePolicy`.
//!
//! Enumeration order is part of the contract: offsets are always produced row by row, top to bottom and left to
//! right, so a kernel that picks "the first matching neighbor" behaves the same on every call.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::{SimError, SimResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Neighborhood {
    /// The 8 cells at Chebyshev distance 1.
    Moore,
    /// The 4 cells sharing an edge.
    VonNeumann,
    /// Every cell in the `(2r+1)x(2r+1)` block around the center, excluding the center itself.
    ExtendedMoore(usize),
}

impl Default for Neighborhood {
    fn default() -> Neighborhood {
        Neighborhood::Moore
    }
}

impl Neighborhood {
    pub fn extended_moore(radius: isize) -> SimResult<Neighborhood> {
        if radius <= 0 {
            return Err(SimError::invalid_argument(format!(
                "extended moore radius must be positive, got {}",
                radius
            )));
        }

        Ok(Neighborhood::ExtendedMoore(radius as usize))
    }

    /// Checks values that didn't come through `extended_moore`, e.g. ones produced by a deserializer.
    pub fn validate(&self) -> SimResult<()> {
        match *self {
            Neighborhood::ExtendedMoore(0) => Err(SimError::invalid_argument("extended moore radius must be positive, got 0")),
            _ => Ok(()),
        }
    }

    pub fn radius(&self) -> usize {
        match *self {
            Neighborhood::Moore | Neighborhood::VonNeumann => 1,
            Neighborhood::ExtendedMoore(radius) => radius,
        }
    }

    /// Number of coordinates produced for every cell.
    pub fn size(&self) -> usize {
        match *self {
            Neighborhood::VonNeumann => 4,
            _ => {
                let side = 2 * self.radius() + 1;
                side * side - 1
            },
        }
    }

    /// Offsets relative to the center cell, in enumeration order.
    pub fn offsets(&self) -> Vec<(isize, isize)> {
        match *self {
            Neighborhood::VonNeumann => vec![(-1, 0), (0, -1), (0, 1), (1, 0)],
            _ => {
                let radius = self.radius() as isize;
                let mut offsets = Vec::with_capacity(self.size());
                for d_row in -radius..=radius {
                    for d_col in -radius..=radius {
                        if d_row != 0 || d_col != 0 {
                            offsets.push((d_row, d_col));
                        }
                    }
                }
                offsets
            },
        }
    }

    /// Returns the absolute coordinates of the neighbors of `(row, col)`.  These may lie outside of the grid.
    pub fn neighbor_coordinates(&self, row: isize, col: isize) -> Vec<(isize, isize)> {
        self.offsets()
            .into_iter()
            .map(|(d_row, d_col)| (row + d_row, col + d_col))
            .collect()
    }
}

impl Display for Neighborhood {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match *self {
            Neighborhood::Moore => write!(formatter, "moore"),
            Neighborhood::VonNeumann => write!(formatter, "von_neumann"),
            Neighborhood::ExtendedMoore(radius) => write!(formatter, "extended_moore:{}", radius),
        }
    }
}

impl FromStr for Neighborhood {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Neighborhood> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "moore" => Ok(Neighborhood::Moore),
            "von_neumann" | "vonneumann" => Ok(Neighborhood::VonNeumann),
            _ => match lower.strip_prefix("extended_moore:") {
                Some(radius) => {
                    let radius: isize = radius
                        .parse()
                        .map_err(|_| SimError::invalid_argument(format!("bad neighborhood radius in `{}`", s)))?;
                    Neighborhood::extended_moore(radius)
                },
                None => Err(SimError::invalid_argument(format!("unknown neighborhood `{}`", s))),
            },
        }
    }
}

#[test]
fn neighborhood_sizes() {
    assert_eq!(Neighborhood::Moore.neighbor_coordinates(5, 5).len(), 8);
    assert_eq!(Neighborhood::VonNeumann.neighbor_coordinates(5, 5).len(), 4);
    for radius in 1..5 {
        let hood = Neighborhood::extended_moore(radius).unwrap();
        let expected = ((2 * radius + 1) * (2 * radius + 1) - 1) as usize;
        assert_eq!(hood.neighbor_coordinates(0, 0).len(), expected);
        assert_eq!(hood.size(), expected);
    }
}

#[test]
fn radius_must_be_positive() {
    assert!(Neighborhood::extended_moore(0).is_err());
    assert!(Neighborhood::extended_moore(-2).is_err());
    assert!(Neighborhood::ExtendedMoore(0).validate().is_err());
    assert!("extended_moore:0".parse::<Neighborhood>().is_err());
}

#[test]
fn enumeration_order_is_stable() {
    let coords = Neighborhood::Moore.neighbor_coordinates(1, 1);
    assert_eq!(coords[0], (0, 0));
    assert_eq!(coords[3], (1, 0));
    assert_eq!(coords[7], (2, 2));
    assert_eq!(coords, Neighborhood::Moore.neighbor_coordinates(1, 1));

    assert_eq!(
        Neighborhood::VonNeumann.neighbor_coordinates(0, 0),
        vec![(-1, 0), (0, -1), (0, 1), (1, 0)]
    );
    assert!(!Neighborhood::ExtendedMoore(2).neighbor_coordinates(3, 3).contains(&(3, 3)));
}

#[test]
fn parse_names() {
    assert_eq!("Moore".parse::<Neighborhood>(), Ok(Neighborhood::Moore));
    assert_eq!("von_neumann".parse::<Neighborhood>(), Ok(Neighborhood::VonNeumann));
    assert_eq!("extended_moore:3".parse::<Neighborhood>(), Ok(Neighborhood::ExtendedMoore(3)));
    assert_eq!(Neighborhood::ExtendedMoore(2).to_string(), "extended_moore:2");
}
