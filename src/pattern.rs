//! Rhetorical patterns for rendered conjectures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for pattern-name parsing.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Unsupported rhetorical pattern: {0}")]
    Unsupported(String),
}

/// The recognized sentence structures a conjecture can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhetoricalPattern {
    /// A linear main effect of X on Y.
    DirectCausation,
    /// An effect of X on Y holding only above a critical percentile of X.
    ThresholdEffect,
    /// An effect of X on Y whose strength varies with a moderator.
    ModeratedRelationship,
}

impl RhetoricalPattern {
    pub fn name(&self) -> &'static str {
        match self {
            RhetoricalPattern::DirectCausation => "direct_causation",
            RhetoricalPattern::ThresholdEffect => "threshold_effect",
            RhetoricalPattern::ModeratedRelationship => "moderated_relationship",
        }
    }

    /// Fixed qualitative confidence label for this pattern.
    pub fn confidence(&self) -> &'static str {
        match self {
            RhetoricalPattern::DirectCausation => {
                "High - Linear relationship with clear theoretical foundation"
            }
            RhetoricalPattern::ThresholdEffect => {
                "Medium - Conditional effect requiring threshold validation"
            }
            RhetoricalPattern::ModeratedRelationship => {
                "High - Interaction effect with clear boundary conditions"
            }
        }
    }
}

impl FromStr for RhetoricalPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct_causation" => Ok(RhetoricalPattern::DirectCausation),
            "threshold_effect" => Ok(RhetoricalPattern::ThresholdEffect),
            "moderated_relationship" => Ok(RhetoricalPattern::ModeratedRelationship),
            other => Err(PatternError::Unsupported(other.to_string())),
        }
    }
}

impl fmt::Display for RhetoricalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
