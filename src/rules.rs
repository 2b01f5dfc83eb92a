// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Angle rules and exercise rule sets.
//!
//! An [`AngleRule`] measures one joint angle, tests it with a [`Predicate`],
//! and names the joints to flag and the message to show when the predicate
//! holds. A [`RuleSet`] is the ordered list of rules for one exercise.
//!
//! Rule sets are plain data. The built-in tables for squats and push-ups are
//! defined here; more can be loaded from JSON through
//! [`RuleBook`](crate::evaluator::RuleBook).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::landmarks::{
    NUM_LANDMARKS, RIGHT_ANKLE, RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};

/// Condition on a measured angle (degrees) that marks bad form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Fires when the angle is strictly below `threshold`.
    Below { threshold: f32 },
    /// Fires when the angle is strictly above `threshold`.
    Above { threshold: f32 },
    /// Fires when the angle is strictly below `low` or strictly above `high`.
    Outside { low: f32, high: f32 },
}

impl Predicate {
    /// Whether the predicate holds for `angle`.
    ///
    /// A NaN angle never fires.
    #[must_use]
    pub fn fires(&self, angle: f32) -> bool {
        match *self {
            Self::Below { threshold } => angle < threshold,
            Self::Above { threshold } => angle > threshold,
            Self::Outside { low, high } => angle < low || angle > high,
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        match *self {
            Self::Below { threshold } | Self::Above { threshold } if !threshold.is_finite() => {
                Err(format!("threshold must be finite, got {threshold}"))
            }
            Self::Outside { low, high } if !low.is_finite() || !high.is_finite() => {
                Err(format!("range bounds must be finite, got {low}..{high}"))
            }
            Self::Outside { low, high } if low >= high => Err(format!(
                "range low bound {low} must be below high bound {high}"
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Below { threshold } => write!(f, "< {threshold}°"),
            Self::Above { threshold } => write!(f, "> {threshold}°"),
            Self::Outside { low, high } => write!(f, "< {low}° or > {high}°"),
        }
    }
}

/// The three joints that define an angle. The angle is measured at `vertex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointTriple {
    pub proximal: usize,
    pub vertex: usize,
    pub distal: usize,
}

impl JointTriple {
    /// Create a joint triple.
    #[must_use]
    pub const fn new(proximal: usize, vertex: usize, distal: usize) -> Self {
        Self {
            proximal,
            vertex,
            distal,
        }
    }

    /// Joint indices in `(proximal, vertex, distal)` order.
    #[must_use]
    pub const fn indices(&self) -> [usize; 3] {
        [self.proximal, self.vertex, self.distal]
    }
}

/// One form check: measure an angle, test it, flag joints and give feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleRule {
    /// Short identifier, e.g. `knee_angle_high`.
    pub name: String,
    /// Joints defining the measured angle.
    pub joints: JointTriple,
    /// Condition that marks bad form.
    pub predicate: Predicate,
    /// Joints reported as violating when the predicate holds.
    pub flag: Vec<usize>,
    /// Feedback shown when the predicate holds.
    pub message: String,
}

impl AngleRule {
    /// Create a new rule.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        joints: JointTriple,
        predicate: Predicate,
        flag: &[usize],
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            joints,
            predicate,
            flag: flag.to_vec(),
            message: message.into(),
        }
    }

    /// Check that the rule refers only to schema joints and is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ConfigError`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FormError::ConfigError("rule name must not be empty".into()));
        }
        if self.message.trim().is_empty() {
            return Err(FormError::ConfigError(format!(
                "rule '{}' has an empty message",
                self.name
            )));
        }
        if self.flag.is_empty() {
            return Err(FormError::ConfigError(format!(
                "rule '{}' flags no joints",
                self.name
            )));
        }
        if let Some(index) = self
            .joints
            .indices()
            .into_iter()
            .chain(self.flag.iter().copied())
            .find(|&i| i >= NUM_LANDMARKS)
        {
            return Err(FormError::ConfigError(format!(
                "rule '{}' references joint {index}, outside the {NUM_LANDMARKS}-point schema",
                self.name
            )));
        }
        self.predicate
            .validate()
            .map_err(|msg| FormError::ConfigError(format!("rule '{}': {msg}", self.name)))
    }
}

/// Ordered rules for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Exercise identifier the rules apply to.
    pub name: String,
    /// Rules in evaluation order.
    pub rules: Vec<AngleRule>,
}

impl RuleSet {
    /// Create a rule set.
    #[must_use]
    pub fn new(name: impl Into<String>, rules: Vec<AngleRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Validate every rule in the set.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ConfigError`] for an empty name or an invalid rule.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FormError::ConfigError(
                "exercise name must not be empty".into(),
            ));
        }
        self.rules.iter().try_for_each(AngleRule::validate)
    }

    /// Squat form checks.
    #[must_use]
    pub fn squats() -> Self {
        let back = JointTriple::new(RIGHT_SHOULDER, RIGHT_HIP, RIGHT_KNEE);
        let knee = JointTriple::new(RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE);
        Self::new(
            "squats",
            vec![
                AngleRule::new(
                    "back_angle",
                    back,
                    Predicate::Below { threshold: 100.0 },
                    &[RIGHT_SHOULDER, RIGHT_HIP],
                    "Keep your back straighter.",
                ),
                AngleRule::new(
                    "knee_angle_high",
                    knee,
                    Predicate::Above { threshold: 120.0 },
                    &[RIGHT_KNEE, RIGHT_ANKLE],
                    "Don't bend your knees too much.",
                ),
                AngleRule::new(
                    "knee_angle_low",
                    knee,
                    Predicate::Below { threshold: 60.0 },
                    &[RIGHT_KNEE, RIGHT_ANKLE],
                    "Try to bend knees more.",
                ),
            ],
        )
    }

    /// Push-up form checks.
    #[must_use]
    pub fn pushups() -> Self {
        Self::new(
            "pushups",
            vec![
                AngleRule::new(
                    "elbow_angle",
                    JointTriple::new(RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST),
                    Predicate::Outside {
                        low: 70.0,
                        high: 160.0,
                    },
                    &[RIGHT_ELBOW, RIGHT_WRIST],
                    "Maintain proper elbow angle during push-ups.",
                ),
                AngleRule::new(
                    "hip_angle",
                    JointTriple::new(RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE),
                    Predicate::Below { threshold: 160.0 },
                    &[RIGHT_HIP, RIGHT_KNEE],
                    "Keep your hips aligned with your torso.",
                ),
            ],
        )
    }
}
