//! Optimization goal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the allocator rewards.
///
/// Unrecognized names are kept verbatim; every campaign then scores zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OptimizationGoal {
    #[default]
    Roas,
    Cpa,
    Conversions,
    Other(String),
}

impl OptimizationGoal {
    pub fn as_str(&self) -> &str {
        match self {
            OptimizationGoal::Roas => "roas",
            OptimizationGoal::Cpa => "cpa",
            OptimizationGoal::Conversions => "conversions",
            OptimizationGoal::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, OptimizationGoal::Other(_))
    }

    /// Upper-case label used in recommendation text.
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl From<String> for OptimizationGoal {
    fn from(value: String) -> Self {
        match value.as_str() {
            "roas" => OptimizationGoal::Roas,
            "cpa" => OptimizationGoal::Cpa,
            "conversions" => OptimizationGoal::Conversions,
            _ => OptimizationGoal::Other(value),
        }
    }
}

impl From<&str> for OptimizationGoal {
    fn from(value: &str) -> Self {
        OptimizationGoal::from(value.to_string())
    }
}

impl From<OptimizationGoal> for String {
    fn from(goal: OptimizationGoal) -> Self {
        match goal {
            OptimizationGoal::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OptimizationGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
