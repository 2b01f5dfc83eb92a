// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Per-frame skeleton types.
//!
//! A [`Skeleton`] is produced by the pose-estimation engine once per detected
//! person per frame. The evaluator only ever reads it.

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::landmarks::NUM_LANDMARKS;

/// One landmark position in normalized image coordinates.
///
/// `x` and `y` are in `[0, 1]` relative to frame width and height. `z` is the
/// engine's relative depth and is ignored by angle measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JointPosition {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl JointPosition {
    /// Create a joint position with zero depth.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Create a joint position with depth.
    #[must_use]
    pub const fn with_depth(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Position in pixel space for a frame of the given size.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_pixels(&self, width: u32, height: u32) -> (f32, f32) {
        (self.x * width as f32, self.y * height as f32)
    }
}

/// Ordered landmark positions for one detected person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skeleton {
    joints: Vec<JointPosition>,
}

impl Skeleton {
    /// Wrap an ordered list of joint positions.
    #[must_use]
    pub const fn new(joints: Vec<JointPosition>) -> Self {
        Self { joints }
    }

    /// Build a skeleton from a flat `[x, y, z, x, y, z, ...]` buffer.
    ///
    /// The buffer must hold exactly [`NUM_LANDMARKS`] triples.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ParseError`] if the buffer length is wrong.
    pub fn from_flat(data: &[f32]) -> Result<Self> {
        let expected = NUM_LANDMARKS * 3;
        if data.len() != expected {
            return Err(FormError::ParseError(format!(
                "invalid landmark data length: {} (expected {expected})",
                data.len()
            )));
        }

        let joints = data
            .chunks_exact(3)
            .map(|c| JointPosition::with_depth(c[0], c[1], c[2]))
            .collect();
        Ok(Self { joints })
    }

    /// Number of joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Check if the skeleton has no joints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Joint at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::LandmarkOutOfRange`] if the skeleton is shorter
    /// than `index + 1`.
    pub fn joint(&self, index: usize) -> Result<&JointPosition> {
        self.joints.get(index).ok_or(FormError::LandmarkOutOfRange {
            index,
            len: self.joints.len(),
        })
    }

    /// All joints in schema order.
    #[must_use]
    pub fn joints(&self) -> &[JointPosition] {
        &self.joints
    }
}

impl From<Vec<JointPosition>> for Skeleton {
    fn from(joints: Vec<JointPosition>) -> Self {
        Self::new(joints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat() {
        let mut data = vec![0.0_f32; NUM_LANDMARKS * 3];
        data[12 * 3] = 0.25;
        data[12 * 3 + 1] = 0.5;
        data[12 * 3 + 2] = -0.1;

        let skeleton = Skeleton::from_flat(&data).unwrap();
        assert_eq!(skeleton.len(), NUM_LANDMARKS);
        assert_eq!(
            *skeleton.joint(12).unwrap(),
            JointPosition::with_depth(0.25, 0.5, -0.1)
        );
    }

    #[test]
    fn test_from_flat_wrong_length() {
        let err = Skeleton::from_flat(&[0.0; 98]).unwrap_err();
        assert!(matches!(err, FormError::ParseError(_)));
    }

    #[test]
    fn test_joint_out_of_range() {
        let skeleton = Skeleton::new(vec![JointPosition::default(); 17]);
        match skeleton.joint(24) {
            Err(FormError::LandmarkOutOfRange { index, len }) => {
                assert_eq!(index, 24);
                assert_eq!(len, 17);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_without_depth() {
        let skeleton: Skeleton =
            serde_json::from_str(r#"[{"x": 0.1, "y": 0.2}, {"x": 0.3, "y": 0.4, "z": 0.5}]"#)
                .unwrap();
        assert_eq!(skeleton.len(), 2);
        assert!(skeleton.joint(0).unwrap().z.abs() < f32::EPSILON);
        assert!((skeleton.joint(1).unwrap().z - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_to_pixels() {
        let (x, y) = JointPosition::new(0.5, 0.25).to_pixels(640, 480);
        assert!((x - 320.0).abs() < f32::EPSILON);
        assert!((y - 120.0).abs() < f32::EPSILON);
    }
}
