// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Overlay data for renderers.
//!
//! Renderers only need to know which joints are flagged. These helpers turn an
//! [`EvaluationOutcome`] into per-joint colors and arrow markers in pixel
//! space so 2D and 3D drawing layers agree on what to highlight.

use crate::outcome::EvaluationOutcome;
use crate::skeleton::Skeleton;
use crate::visualizer::Color;

/// Length of a flag arrow in pixels.
pub const ARROW_LENGTH: f32 = 40.0;

/// Arrow pointing at a flagged joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlagMarker {
    /// Index of the flagged joint.
    pub joint: usize,
    /// Arrow origin in pixels (the joint position).
    pub origin: (f32, f32),
    /// Unit direction in pixel space. Image y grows downward.
    pub direction: (f32, f32),
    /// Arrow length in pixels.
    pub length: f32,
    /// Arrow color.
    pub color: Color,
}

impl FlagMarker {
    /// End point of the arrow shaft.
    #[must_use]
    pub fn tip(&self) -> (f32, f32) {
        (
            self.origin.0 + self.direction.0 * self.length,
            self.origin.1 + self.direction.1 * self.length,
        )
    }
}

/// Color for each of the first `count` joints: red if flagged, green otherwise.
#[must_use]
pub fn joint_colors(outcome: &EvaluationOutcome, count: usize) -> Vec<Color> {
    (0..count)
        .map(|i| Color::for_joint(outcome.is_flagged(i)))
        .collect()
}

/// One upward arrow per flagged joint present in `skeleton`.
///
/// Joints are mapped from normalized coordinates to a `width` x `height`
/// frame. Flagged indices the skeleton does not have are skipped.
#[must_use]
pub fn flag_markers(
    skeleton: &Skeleton,
    outcome: &EvaluationOutcome,
    width: u32,
    height: u32,
) -> Vec<FlagMarker> {
    outcome
        .violating_joints
        .iter()
        .filter_map(|&joint| {
            let position = skeleton.joint(joint).ok()?;
            Some(FlagMarker {
                joint,
                origin: position.to_pixels(width, height),
                direction: (0.0, -1.0),
                length: ARROW_LENGTH,
                color: Color::FLAGGED,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate;
    use crate::landmarks::{NUM_LANDMARKS, RIGHT_ANKLE, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER};
    use crate::skeleton::JointPosition;

    fn straight_squat() -> Skeleton {
        let mut joints = vec![JointPosition::default(); NUM_LANDMARKS];
        joints[RIGHT_SHOULDER] = JointPosition::new(0.5, 0.2);
        joints[RIGHT_HIP] = JointPosition::new(0.5, 0.5);
        joints[RIGHT_KNEE] = JointPosition::new(0.5, 0.8);
        joints[RIGHT_ANKLE] = JointPosition::new(0.5, 1.0);
        Skeleton::new(joints)
    }

    #[test]
    fn test_joint_colors() {
        let outcome = evaluate(&straight_squat(), "squats").unwrap();
        let colors = joint_colors(&outcome, NUM_LANDMARKS);
        assert_eq!(colors.len(), NUM_LANDMARKS);
        assert_eq!(colors[RIGHT_KNEE], Color::RED);
        assert_eq!(colors[RIGHT_ANKLE], Color::RED);
        assert_eq!(colors[RIGHT_HIP], Color::GREEN);
        assert_eq!(colors.iter().filter(|&&c| c == Color::RED).count(), 2);
    }

    #[test]
    fn test_flag_markers() {
        let skeleton = straight_squat();
        let outcome = evaluate(&skeleton, "squats").unwrap();
        let markers = flag_markers(&skeleton, &outcome, 640, 480);

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].joint, RIGHT_KNEE);
        assert!((markers[0].origin.0 - 320.0).abs() < 1e-3);
        assert!((markers[0].origin.1 - 384.0).abs() < 1e-3);
        let tip = markers[0].tip();
        assert!((tip.1 - 344.0).abs() < 1e-3);
        assert_eq!(markers[1].joint, RIGHT_ANKLE);
    }

    #[test]
    fn test_no_markers_for_good_form() {
        let skeleton = straight_squat();
        let outcome = EvaluationOutcome::new();
        assert!(flag_markers(&skeleton, &outcome, 640, 480).is_empty());
    }
}
