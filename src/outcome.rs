// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Per-frame evaluation results.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::landmarks::landmark_name;

/// Angle measured for one rule during an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AngleMeasurement {
    /// Name of the rule that requested the measurement.
    pub rule: String,
    /// Measured angle in degrees, `None` if the geometry was degenerate.
    pub angle: Option<f32>,
    /// Whether the rule's predicate held.
    pub fired: bool,
}

/// Result of evaluating one skeleton against one exercise.
///
/// Created fresh for every frame and never merged across frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationOutcome {
    /// Joints flagged by at least one fired rule.
    pub violating_joints: BTreeSet<usize>,
    /// Feedback from fired rules, in rule order. Repeats are kept.
    pub messages: Vec<String>,
    /// One entry per evaluated rule, in rule order.
    pub measurements: Vec<AngleMeasurement>,
}

impl EvaluationOutcome {
    /// Create an empty outcome.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fired rule.
    pub(crate) fn flag(&mut self, joints: &[usize], message: &str) {
        self.violating_joints.extend(joints.iter().copied());
        self.messages.push(message.to_string());
    }

    /// `true` when no rule fired.
    #[must_use]
    pub fn is_correct_form(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether the joint at `index` was flagged.
    #[must_use]
    pub fn is_flagged(&self, index: usize) -> bool {
        self.violating_joints.contains(&index)
    }

    /// Names of the flagged joints, in index order.
    #[must_use]
    pub fn violating_joint_names(&self) -> Vec<&'static str> {
        self.violating_joints
            .iter()
            .map(|&i| landmark_name(i).unwrap_or("unknown"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_correct() {
        let outcome = EvaluationOutcome::new();
        assert!(outcome.is_correct_form());
        assert!(outcome.violating_joints.is_empty());
    }

    #[test]
    fn test_flag_collapses_joints_keeps_messages() {
        let mut outcome = EvaluationOutcome::new();
        outcome.flag(&[26, 28], "same");
        outcome.flag(&[28, 26], "same");

        assert_eq!(outcome.violating_joints.len(), 2);
        assert_eq!(outcome.messages, vec!["same", "same"]);
        assert!(outcome.is_flagged(26));
        assert!(!outcome.is_flagged(12));
        assert!(!outcome.is_correct_form());
        assert_eq!(
            outcome.violating_joint_names(),
            vec!["right_knee", "right_ankle"]
        );
    }

    #[test]
    fn test_serialize() {
        let mut outcome = EvaluationOutcome::new();
        outcome.flag(&[14, 16], "elbow");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["violating_joints"], serde_json::json!([14, 16]));
        assert_eq!(json["messages"], serde_json::json!(["elbow"]));
    }
}
