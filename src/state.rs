//! Discrete states that a cell can take on.  Rather than one enum per simulation, every kernel declares its states
//! as `StateValue` constants tagged with the kernel's name.  Two values are the same state when they share a tag and
//! ordinal; the remaining fields are presentation data.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

/// An RGB color used by renderers to draw a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

#[derive(Clone, Copy)]
pub struct StateValue {
    kind: &'static str,
    ordinal: u8,
    name: &'static str,
    code: i32,
    glyph: char,
}

impl StateValue {
    pub const fn new(kind: &'static str, ordinal: u8, name: &'static str, code: i32, glyph: char) -> Self {
        StateValue { kind, ordinal, name, code, glyph }
    }

    /// Name of the kernel that owns this state.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn ordinal(&self) -> u8 {
        self.ordinal
    }

    /// Display token, e.g. `"BURNING"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Numeric code used by the flat initial-state arrays.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Single character used when printing a grid.
    pub fn glyph(&self) -> char {
        self.glyph
    }
}

impl PartialEq for StateValue {
    fn eq(&self, other: &StateValue) -> bool {
        self.kind == other.kind && self.ordinal == other.ordinal
    }
}

impl Eq for StateValue {}

impl Hash for StateValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.ordinal.hash(state);
    }
}

impl Ord for StateValue {
    fn cmp(&self, other: &StateValue) -> Ordering {
        let kind_cmp = self.kind.cmp(other.kind);

        if kind_cmp == Ordering::Equal {
            self.ordinal.cmp(&other.ordinal)
        } else {
            kind_cmp
        }
    }
}

impl PartialOrd for StateValue {
    fn partial_cmp(&self, other: &StateValue) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Debug for StateValue {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}::{}", self.kind, self.name)
    }
}

impl Display for StateValue {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}", self.name)
    }
}
