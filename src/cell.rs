//! Declares a single cell of the grid.  Each cell holds the state it has in the current generation along with a
//! buffer for the state it will take on in the next one.  Rule kernels only ever read the current state and only
//! ever write into the buffer; the buffer is committed for every cell at once after the whole grid has been
//! evaluated, so no kernel can observe a half-updated generation.
//!
//! Some simulations need more than a discrete state to describe a cell (a fish's breeding counter, an agent's
//! group).  That extra data rides along as an optional `Payload` which is buffered the same way as the state.

use crate::error::{SimError, SimResult};
use crate::state::StateValue;

/// Simulation-specific data attached to a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payload {
    /// A fish or shark.  `energy` is only meaningful for sharks.
    Organism { breed: u32, energy: u32 },
    /// A segregation agent belonging to `group`.
    Agent { group: u32 },
}

impl Payload {
    pub fn tag(&self) -> &'static str {
        match *self {
            Payload::Organism { .. } => "organism",
            Payload::Agent { .. } => "agent",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Cell {
    state: StateValue,
    next_state: Option<StateValue>,
    payload: Option<Payload>,
    // `None` means the payload carries over unchanged when the next state is applied
    next_payload: Option<Option<Payload>>,
}

impl Cell {
    pub fn new(state: StateValue) -> Self {
        Cell {
            state,
            next_state: None,
            payload: None,
            next_payload: None,
        }
    }

    pub fn with_payload(state: StateValue, payload: Option<Payload>) -> Self {
        Cell {
            payload,
            ..Cell::new(state)
        }
    }

    pub fn state(&self) -> StateValue {
        self.state
    }

    pub fn payload(&self) -> Option<Payload> {
        self.payload
    }

    /// Returns the state that has been buffered for the next generation, if any.
    pub fn next_state(&self) -> Option<StateValue> {
        self.next_state
    }

    pub fn set_state(&mut self, state: StateValue) {
        self.state = state;
    }

    pub fn set_payload(&mut self, payload: Option<Payload>) {
        self.payload = payload;
    }

    pub fn set_next_state(&mut self, state: StateValue) {
        self.next_state = Some(state);
    }

    /// Buffers both the next state and the payload that goes with it.
    pub fn set_next(&mut self, state: StateValue, payload: Option<Payload>) {
        self.next_state = Some(state);
        self.next_payload = Some(payload);
    }

    /// Commits the buffered next state.  A cell that was never written during the step keeps its current state.
    pub fn apply_next_state(&mut self) {
        if let Some(next) = self.next_state.take() {
            self.state = next;
        }
        if let Some(next_payload) = self.next_payload.take() {
            self.payload = next_payload;
        }
    }

    /// Throws away anything buffered for the next generation.
    pub fn reset_next_state(&mut self) {
        self.next_state = None;
        self.next_payload = None;
    }

    /// Forces the cell into `state` for both the current and next generation.
    pub fn reset_state(&mut self, state: StateValue) {
        self.state = state;
        self.next_state = Some(state);
    }

    /// Reads the breed counter and energy of a fish or shark.
    pub fn organism(&self) -> SimResult<(u32, u32)> {
        match self.payload {
            Some(Payload::Organism { breed, energy }) => Ok((breed, energy)),
            other => Err(mismatch("organism", other)),
        }
    }

    /// Reads the group of a segregation agent.
    pub fn group(&self) -> SimResult<u32> {
        match self.payload {
            Some(Payload::Agent { group }) => Ok(group),
            other => Err(mismatch("agent", other)),
        }
    }
}

fn mismatch(expected: &'static str, found: Option<Payload>) -> SimError {
    SimError::TypeMismatch {
        expected,
        found: found.map(|p| p.tag()).unwrap_or("none"),
    }
}
