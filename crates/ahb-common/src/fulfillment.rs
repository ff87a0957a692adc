//! The quad-valued condition-fulfillment lattice and its AND/OR/XOR monoids.
//!
//! `NEUTRAL` is the two-sided identity of all three operators; `UNKNOWN` is
//! absorbing for AND and OR whenever the other side is not already decisive.
//! See the algebra table this module implements in its test suite.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The outcome of evaluating a condition, carried through the requirement-
/// constraint fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fulfillment {
    Fulfilled,
    Unfulfilled,
    Unknown,
    /// Identity value: hints and pending format constraints start here.
    Neutral,
}

impl Fulfillment {
    /// Quad-valued conjunction.
    pub fn and(self, other: Fulfillment) -> Fulfillment {
        use Fulfillment::*;
        match (self, other) {
            (Neutral, x) | (x, Neutral) => x,
            (Unfulfilled, _) | (_, Unfulfilled) => Unfulfilled,
            (Unknown, _) | (_, Unknown) => Unknown,
            (Fulfilled, Fulfilled) => Fulfilled,
        }
    }

    /// Quad-valued disjunction.
    pub fn or(self, other: Fulfillment) -> Fulfillment {
        use Fulfillment::*;
        match (self, other) {
            (Neutral, x) | (x, Neutral) => x,
            (Fulfilled, _) | (_, Fulfilled) => Fulfilled,
            (Unknown, _) | (_, Unknown) => Unknown,
            (Unfulfilled, Unfulfilled) => Unfulfilled,
        }
    }

    /// Quad-valued exclusive-or.
    pub fn xor(self, other: Fulfillment) -> Fulfillment {
        use Fulfillment::*;
        match (self, other) {
            (Neutral, x) | (x, Neutral) => x,
            (Unknown, _) | (_, Unknown) => Unknown,
            (Fulfilled, Fulfilled) => Unfulfilled,
            (Unfulfilled, Unfulfilled) => Unfulfilled,
            (Fulfilled, Unfulfilled) | (Unfulfilled, Fulfilled) => Fulfilled,
        }
    }

    pub fn is_fulfilled(self) -> bool {
        matches!(self, Fulfillment::Fulfilled)
    }
}

impl fmt::Display for Fulfillment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Fulfillment::Fulfilled => "FULFILLED",
            Fulfillment::Unfulfilled => "UNFULFILLED",
            Fulfillment::Unknown => "UNKNOWN",
            Fulfillment::Neutral => "NEUTRAL",
        };
        f.write_str(s)
    }
}
