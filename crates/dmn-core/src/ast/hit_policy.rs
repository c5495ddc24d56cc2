//! Hit policy definitions
//!
//! The hit policy of a decision table decides how the set of matching rules
//! reduces to the output entries of the result.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hit policy of a decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HitPolicy {
    /// At most one rule may match
    #[default]
    Unique,
    /// The first matching rule in declaration order wins
    First,
    /// The matching rule with the highest output priority wins
    Priority,
    /// Several rules may match if they all produce the same output
    Any,
    /// All matching rules in declaration order, optionally aggregated
    Collect,
    /// All matching rules in declaration order
    RuleOrder,
    /// All matching rules ordered by output priority
    OutputOrder,
}

/// Aggregator applied to the outputs of a `COLLECT` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuiltinAggregator {
    Sum,
    Min,
    Max,
    Count,
}

impl HitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitPolicy::Unique => "UNIQUE",
            HitPolicy::First => "FIRST",
            HitPolicy::Priority => "PRIORITY",
            HitPolicy::Any => "ANY",
            HitPolicy::Collect => "COLLECT",
            HitPolicy::RuleOrder => "RULE ORDER",
            HitPolicy::OutputOrder => "OUTPUT ORDER",
        }
    }

    /// Single-hit policies produce at most one output entry
    pub fn is_single_hit(&self) -> bool {
        matches!(
            self,
            HitPolicy::Unique | HitPolicy::First | HitPolicy::Priority | HitPolicy::Any
        )
    }

    /// Policies that rank rules by the output values lists
    pub fn requires_output_values(&self) -> bool {
        matches!(self, HitPolicy::Priority | HitPolicy::OutputOrder)
    }
}

impl fmt::Display for HitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HitPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace(|c: char| c == '_' || c == '-', " ");
        match normalized.as_str() {
            "UNIQUE" | "U" => Ok(HitPolicy::Unique),
            "FIRST" | "F" => Ok(HitPolicy::First),
            "PRIORITY" | "P" => Ok(HitPolicy::Priority),
            "ANY" | "A" => Ok(HitPolicy::Any),
            "COLLECT" | "C" => Ok(HitPolicy::Collect),
            "RULE ORDER" | "R" => Ok(HitPolicy::RuleOrder),
            "OUTPUT ORDER" | "O" => Ok(HitPolicy::OutputOrder),
            _ => Err(CoreError::UnknownToken {
                kind: "hit policy".to_string(),
                token: s.to_string(),
            }),
        }
    }
}

impl BuiltinAggregator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinAggregator::Sum => "SUM",
            BuiltinAggregator::Min => "MIN",
            BuiltinAggregator::Max => "MAX",
            BuiltinAggregator::Count => "COUNT",
        }
    }
}

impl fmt::Display for BuiltinAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuiltinAggregator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUM" | "+" => Ok(BuiltinAggregator::Sum),
            "MIN" | "<" => Ok(BuiltinAggregator::Min),
            "MAX" | ">" => Ok(BuiltinAggregator::Max),
            "COUNT" | "#" => Ok(BuiltinAggregator::Count),
            _ => Err(CoreError::UnknownToken {
                kind: "aggregation".to_string(),
                token: s.to_string(),
            }),
        }
    }
}
