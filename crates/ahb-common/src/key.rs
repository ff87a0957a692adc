//! Condition key classification.
//!
//! A condition key is either plain digits (`"45"`), digits followed by `P`
//! (`"123P"`, a package), or one of the three time-condition tokens
//! (`"UB1"`, `"UB2"`, `"UB3"`). [`classify`] maps a key to the [`Category`]
//! that decides how the rest of the engine treats it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The category a condition key belongs to, per the numeric-range table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// `1..=499` -- decides whether a field is required.
    RequirementConstraint,
    /// `500..=900` -- descriptive text, no boolean outcome.
    Hint,
    /// `901..=999` -- validates the format of an already-required value.
    FormatConstraint,
    /// `NNNP` -- an abbreviation that expands to a condition expression.
    Package,
    /// `UB1`, `UB2`, or `UB3`.
    TimeCondition,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::RequirementConstraint => "requirement constraint",
            Category::Hint => "hint",
            Category::FormatConstraint => "format constraint",
            Category::Package => "package",
            Category::TimeCondition => "time condition",
        };
        f.write_str(s)
    }
}

/// Error returned by [`classify`] for a key outside every known range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKeyRange {
    pub key: String,
}

impl fmt::Display for InvalidKeyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "condition key '{}' is not in a valid number range", self.key)
    }
}

impl std::error::Error for InvalidKeyRange {}

/// One of the three German-market time-condition tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeCondition {
    Ub1,
    Ub2,
    Ub3,
}

impl TimeCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeCondition::Ub1 => "UB1",
            TimeCondition::Ub2 => "UB2",
            TimeCondition::Ub3 => "UB3",
        }
    }

    /// Parses `"UB1"`/`"UB2"`/`"UB3"` (case-insensitive). `None` otherwise.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "UB1" => Some(TimeCondition::Ub1),
            "UB2" => Some(TimeCondition::Ub2),
            "UB3" => Some(TimeCondition::Ub3),
            _ => None,
        }
    }
}

impl fmt::Display for TimeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a raw condition key (without surrounding `[ ]`) per the §3 table.
///
/// Accepts plain digits (`"45"`), digits followed by `P` (`"123P"`), or a
/// time-condition token (`"UB1"`, `"UB2"`, `"UB3"`). Anything else -- or
/// digits outside `1..=999` -- is an [`InvalidKeyRange`].
pub fn classify(key: &str) -> Result<Category, InvalidKeyRange> {
    if TimeCondition::parse(key).is_some() {
        return Ok(Category::TimeCondition);
    }
    if let Some(digits) = key.strip_suffix('P').or_else(|| key.strip_suffix('p')) {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Category::Package);
        }
        return Err(InvalidKeyRange { key: key.to_string() });
    }
    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
        let n: u32 = key.parse().map_err(|_| InvalidKeyRange { key: key.to_string() })?;
        return match n {
            1..=499 => Ok(Category::RequirementConstraint),
            500..=900 => Ok(Category::Hint),
            901..=999 => Ok(Category::FormatConstraint),
            _ => Err(InvalidKeyRange { key: key.to_string() }),
        };
    }
    Err(InvalidKeyRange { key: key.to_string() })
}
