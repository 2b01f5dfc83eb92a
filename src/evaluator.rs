// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Form rule engine.
//!
//! A [`RuleBook`] maps exercise identifiers to their [`RuleSet`]s and
//! evaluates skeletons against them. Evaluation is a pure function of the
//! skeleton, the exercise identifier and the book: nothing is cached or
//! carried between frames, so one book can be shared across threads.
//!
//! # Example
//!
//! ```rust
//! use form_evaluator::{JointPosition, RuleBook, Skeleton};
//!
//! let mut joints = vec![JointPosition::default(); 33];
//! joints[12] = JointPosition::new(0.5, 0.2); // right shoulder
//! joints[24] = JointPosition::new(0.5, 0.5); // right hip
//! joints[26] = JointPosition::new(0.5, 0.8); // right knee
//! joints[28] = JointPosition::new(0.5, 1.0); // right ankle
//!
//! let outcome = RuleBook::builtin().evaluate(&Skeleton::new(joints), "squats")?;
//! assert_eq!(outcome.messages, vec!["Don't bend your knees too much."]);
//! # Ok::<(), form_evaluator::FormError>(())
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::angle::angle_at;
use crate::error::{FormError, Result};
use crate::exercise::Exercise;
use crate::outcome::{AngleMeasurement, EvaluationOutcome};
use crate::rules::{AngleRule, RuleSet};
use crate::skeleton::Skeleton;

static BUILTIN: LazyLock<RuleBook> = LazyLock::new(RuleBook::builtin);

/// On-disk rule book layout.
#[derive(Serialize, Deserialize)]
struct RuleBookFile {
    exercises: Vec<RuleSet>,
}

/// Rule sets keyed by exercise identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleBook {
    sets: BTreeMap<String, RuleSet>,
}

impl RuleBook {
    /// Create an empty rule book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule book holding every [`Exercise`] rule set.
    #[must_use]
    pub fn builtin() -> Self {
        let mut book = Self::new();
        for exercise in Exercise::ALL {
            book.insert(exercise.rule_set());
        }
        book
    }

    /// Shared read-only built-in rule book.
    #[must_use]
    pub fn shared() -> &'static Self {
        &BUILTIN
    }

    /// Parse and validate a rule book from JSON.
    ///
    /// The document has the form `{"exercises": [{"name": ..., "rules": [...]}]}`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ParseError`] for malformed JSON and
    /// [`FormError::ConfigError`] for invalid rules or duplicate exercise names.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: RuleBookFile = serde_json::from_str(json)?;
        let mut book = Self::new();
        for set in file.exercises {
            set.validate()?;
            if book.sets.contains_key(&set.name) {
                return Err(FormError::ConfigError(format!(
                    "exercise '{}' is defined more than once",
                    set.name
                )));
            }
            book.insert(set);
        }
        Ok(book)
    }

    /// Load a rule book from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, otherwise the errors of
    /// [`RuleBook::from_json_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FormError::IoError(format!("failed to read rule book {}: {e}", path.display()))
        })?;
        Self::from_json_str(&content)
    }

    /// Serialize the rule book to pretty JSON in the format read by
    /// [`RuleBook::from_json_str`].
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ParseError`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        let file = RuleBookFile {
            exercises: self.sets.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Add or replace a rule set.
    pub fn insert(&mut self, set: RuleSet) {
        self.sets.insert(set.name.clone(), set);
    }

    /// Overlay `other` on this book. Sets in `other` replace same-named sets.
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        self.sets.extend(other.sets);
        self
    }

    /// Rule set for `exercise`, if configured.
    #[must_use]
    pub fn get(&self, exercise: &str) -> Option<&RuleSet> {
        self.sets.get(exercise)
    }

    /// Whether `exercise` has a rule set.
    #[must_use]
    pub fn contains(&self, exercise: &str) -> bool {
        self.sets.contains_key(exercise)
    }

    /// Configured exercise identifiers in sorted order.
    pub fn exercises(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Number of rule sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if the book has no rule sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Evaluate `skeleton` against the rules for `exercise`.
    ///
    /// Rules run in their configured order. A rule whose angle cannot be
    /// measured (degenerate geometry) does not fire. Identical messages from
    /// different rules are all kept.
    ///
    /// An unknown `exercise` is not an error: it yields an empty outcome, so a
    /// caller with no exercise selected yet needs no special case.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::LandmarkOutOfRange`] if a rule references a joint
    /// the skeleton does not have.
    pub fn evaluate(&self, skeleton: &Skeleton, exercise: &str) -> Result<EvaluationOutcome> {
        let mut outcome = EvaluationOutcome::new();
        let Some(set) = self.get(exercise) else {
            return Ok(outcome);
        };

        for rule in &set.rules {
            let angle = measure(skeleton, rule)?;
            let fired = angle.is_some_and(|a| rule.predicate.fires(a));
            if fired {
                outcome.flag(&rule.flag, &rule.message);
            }
            outcome.measurements.push(AngleMeasurement {
                rule: rule.name.clone(),
                angle,
                fired,
            });
        }

        Ok(outcome)
    }
}

fn measure(skeleton: &Skeleton, rule: &AngleRule) -> Result<Option<f32>> {
    let proximal = skeleton.joint(rule.joints.proximal)?;
    let vertex = skeleton.joint(rule.joints.vertex)?;
    let distal = skeleton.joint(rule.joints.distal)?;
    Ok(angle_at(proximal, vertex, distal))
}

/// Evaluate `skeleton` against the built-in rule set for `exercise`.
///
/// # Errors
///
/// See [`RuleBook::evaluate`].
pub fn evaluate(skeleton: &Skeleton, exercise: &str) -> Result<EvaluationOutcome> {
    RuleBook::shared().evaluate(skeleton, exercise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{
        NUM_LANDMARKS, RIGHT_ANKLE, RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER,
        RIGHT_WRIST,
    };
    use crate::rules::{JointTriple, Predicate};
    use crate::skeleton::JointPosition;

    fn skeleton(points: &[(usize, f32, f32)]) -> Skeleton {
        let mut joints = vec![JointPosition::default(); NUM_LANDMARKS];
        for &(i, x, y) in points {
            joints[i] = JointPosition::new(x, y);
        }
        Skeleton::new(joints)
    }

    #[test]
    fn test_builtin_book() {
        let book = RuleBook::builtin();
        assert_eq!(book.len(), 2);
        assert_eq!(book.exercises().collect::<Vec<_>>(), vec!["pushups", "squats"]);
        assert!(RuleBook::shared().contains("squats"));
    }

    #[test]
    fn test_knee_too_bent() {
        // Knee angle 45 degrees
        let s = skeleton(&[
            (RIGHT_SHOULDER, 0.5, 0.1),
            (RIGHT_HIP, 0.5, 0.5),
            (RIGHT_KNEE, 0.5, 0.8),
            (RIGHT_ANKLE, 0.2, 0.5),
        ]);
        let outcome = evaluate(&s, "squats").unwrap();
        assert_eq!(outcome.messages, vec!["Try to bend knees more."]);
        assert_eq!(outcome.violating_joints.iter().copied().collect::<Vec<_>>(), vec![26, 28]);
    }

    #[test]
    fn test_measurements_recorded_in_rule_order() {
        let s = skeleton(&[
            (RIGHT_SHOULDER, 0.5, 0.2),
            (RIGHT_HIP, 0.5, 0.5),
            (RIGHT_KNEE, 0.5, 0.8),
            (RIGHT_ANKLE, 0.5, 1.0),
        ]);
        let outcome = evaluate(&s, "squats").unwrap();
        let names: Vec<_> = outcome.measurements.iter().map(|m| m.rule.as_str()).collect();
        assert_eq!(names, vec!["back_angle", "knee_angle_high", "knee_angle_low"]);
        assert_eq!(
            outcome.measurements.iter().map(|m| m.fired).collect::<Vec<_>>(),
            vec![false, true, false]
        );
    }

    #[test]
    fn test_degenerate_angle_does_not_fire() {
        // Shoulder on top of hip: back angle unknown
        let s = skeleton(&[
            (RIGHT_SHOULDER, 0.5, 0.5),
            (RIGHT_HIP, 0.5, 0.5),
            (RIGHT_KNEE, 0.8, 0.5),
            (RIGHT_ANKLE, 0.8, 0.8),
        ]);
        let outcome = evaluate(&s, "squats").unwrap();
        assert!(outcome.is_correct_form());
        assert_eq!(outcome.measurements[0].angle, None);
        assert!(!outcome.measurements[0].fired);
    }

    #[test]
    fn test_out_of_range_is_error() {
        let s = Skeleton::new(vec![JointPosition::default(); 17]);
        let err = evaluate(&s, "pushups").unwrap_err();
        assert!(matches!(
            err,
            FormError::LandmarkOutOfRange { index: 24, len: 17 }
        ));
    }

    #[test]
    fn test_unknown_exercise_short_skeleton() {
        let s = Skeleton::new(Vec::new());
        let outcome = evaluate(&s, "lunges").unwrap();
        assert_eq!(outcome, EvaluationOutcome::new());
    }

    #[test]
    fn test_duplicate_messages_kept() {
        let message = "Straighten up.";
        let set = RuleSet::new(
            "plank",
            vec![
                AngleRule::new(
                    "hip",
                    JointTriple::new(RIGHT_SHOULDER, RIGHT_HIP, RIGHT_KNEE),
                    Predicate::Below { threshold: 170.0 },
                    &[RIGHT_HIP],
                    message,
                ),
                AngleRule::new(
                    "elbow",
                    JointTriple::new(RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST),
                    Predicate::Below { threshold: 170.0 },
                    &[RIGHT_ELBOW],
                    message,
                ),
            ],
        );
        let mut book = RuleBook::new();
        book.insert(set);

        let s = skeleton(&[
            (RIGHT_SHOULDER, 0.5, 0.2),
            (RIGHT_HIP, 0.5, 0.5),
            (RIGHT_KNEE, 0.8, 0.5),
            (RIGHT_ELBOW, 0.5, 0.5),
            (RIGHT_WRIST, 0.8, 0.5),
        ]);
        let outcome = book.evaluate(&s, "plank").unwrap();
        assert_eq!(outcome.messages, vec![message, message]);
        assert_eq!(outcome.violating_joints.len(), 2);
    }

    #[test]
    fn test_json_round_trip_and_merge() {
        let json = RuleBook::builtin().to_json_string().unwrap();
        let loaded = RuleBook::from_json_str(&json).unwrap();
        assert_eq!(loaded, RuleBook::builtin());

        let custom = RuleBook::from_json_str(
            r#"{"exercises": [{"name": "squats", "rules": []}]}"#,
        )
        .unwrap();
        let merged = RuleBook::builtin().merged(custom);
        assert_eq!(merged.len(), 2);
        assert!(merged.get("squats").unwrap().rules.is_empty());
        assert_eq!(merged.get("pushups").unwrap().rules.len(), 2);
    }

    #[test]
    fn test_duplicate_exercise_rejected() {
        let err = RuleBook::from_json_str(
            r#"{"exercises": [{"name": "a", "rules": []}, {"name": "a", "rules": []}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, FormError::ConfigError(_)));
    }

    #[test]
    fn test_invalid_rule_rejected() {
        let err = RuleBook::from_json_str(
            r#"{"exercises": [{"name": "a", "rules": [{
                "name": "r",
                "joints": {"proximal": 12, "vertex": 24, "distal": 99},
                "predicate": {"kind": "below", "threshold": 100},
                "flag": [12],
                "message": "m"
            }]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, FormError::ConfigError(_)));
    }
}
