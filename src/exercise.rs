// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Built-in exercise identifiers.
//!
//! The evaluator keys rule sets by name, so exercises loaded from a rule book
//! need no variant here. This enum covers the exercises that ship with the
//! crate and the aliases users type for them.

use std::fmt;
use std::str::FromStr;

use crate::rules::RuleSet;

/// Exercises with built-in rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exercise {
    /// Bodyweight squats, judged on back and knee angles.
    Squats,
    /// Push-ups, judged on elbow and hip angles.
    Pushups,
}

impl Exercise {
    /// All built-in exercises.
    pub const ALL: [Self; 2] = [Self::Squats, Self::Pushups];

    /// Identifier used as the rule book key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Squats => "squats",
            Self::Pushups => "pushups",
        }
    }

    /// Built-in rule set for this exercise.
    #[must_use]
    pub fn rule_set(&self) -> RuleSet {
        match self {
            Self::Squats => RuleSet::squats(),
            Self::Pushups => RuleSet::pushups(),
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Exercise {
    type Err = ExerciseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "squats" | "squat" => Ok(Self::Squats),
            "pushups" | "pushup" | "push-ups" | "push-up" | "push_ups" => Ok(Self::Pushups),
            _ => Err(ExerciseParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown exercise string.
#[derive(Debug, Clone)]
pub struct ExerciseParseError(String);

impl fmt::Display for ExerciseParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown exercise '{}', expected one of: squats, pushups",
            self.0
        )
    }
}

impl std::error::Error for ExerciseParseError {}
