// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Joint angle measurement.

use crate::skeleton::JointPosition;

/// Vectors shorter than this are treated as zero length.
const MIN_VECTOR_LENGTH: f32 = 1e-6;

/// Angle at `vertex` between the rays towards `proximal` and `distal`, in degrees.
///
/// Only `x` and `y` are used; depth is ignored. The result lies in `[0, 180]`.
///
/// Uses `cos(θ) = (v1 · v2) / (|v1| × |v2|)` with the ratio clamped to
/// `[-1, 1]` so nearly parallel vectors never push `acos` out of its domain.
///
/// # Returns
///
/// * `None` if either ray has zero length or any coordinate is not finite.
///   Callers treat this as "angle unknown".
#[must_use]
pub fn angle_at(proximal: &JointPosition, vertex: &JointPosition, distal: &JointPosition) -> Option<f32> {
    let v1 = (proximal.x - vertex.x, proximal.y - vertex.y);
    let v2 = (distal.x - vertex.x, distal.y - vertex.y);

    let mag1 = v1.0.hypot(v1.1);
    let mag2 = v2.0.hypot(v2.1);

    if !mag1.is_finite() || !mag2.is_finite() || mag1 < MIN_VECTOR_LENGTH || mag2 < MIN_VECTOR_LENGTH {
        return None;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);

    Some(cos_angle.acos().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> JointPosition {
        JointPosition::new(x, y)
    }

    #[test]
    fn test_straight_line() {
        let angle = angle_at(&p(0.0, 0.0), &p(0.5, 0.0), &p(1.0, 0.0)).unwrap();
        assert!((angle - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_right_angle() {
        let angle = angle_at(&p(0.0, 0.0), &p(0.5, 0.0), &p(0.5, 0.5)).unwrap();
        assert!((angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_same_direction() {
        let angle = angle_at(&p(0.2, 0.2), &p(0.1, 0.1), &p(0.4, 0.4)).unwrap();
        assert!(angle.abs() < 0.05);
    }

    #[test]
    fn test_symmetric() {
        let (a, v, d) = (p(0.3, 0.2), p(0.5, 0.5), p(0.9, 0.45));
        let forward = angle_at(&a, &v, &d).unwrap();
        let backward = angle_at(&d, &v, &a).unwrap();
        assert!((forward - backward).abs() < 1e-4);
    }

    #[test]
    fn test_depth_ignored() {
        let flat = angle_at(&p(0.0, 0.0), &p(0.5, 0.0), &p(0.5, 0.5)).unwrap();
        let deep = angle_at(
            &JointPosition::with_depth(0.0, 0.0, 3.0),
            &JointPosition::with_depth(0.5, 0.0, -1.0),
            &JointPosition::with_depth(0.5, 0.5, 0.7),
        )
        .unwrap();
        assert!((flat - deep).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate() {
        assert_eq!(angle_at(&p(0.5, 0.5), &p(0.5, 0.5), &p(0.9, 0.1)), None);
        assert_eq!(angle_at(&p(0.1, 0.5), &p(0.5, 0.5), &p(0.5, 0.5)), None);
        assert_eq!(angle_at(&p(f32::NAN, 0.5), &p(0.5, 0.5), &p(0.9, 0.1)), None);
        assert_eq!(angle_at(&p(f32::INFINITY, 0.5), &p(0.5, 0.5), &p(0.9, 0.1)), None);
    }

    #[test]
    fn test_near_antiparallel_stays_in_domain() {
        let angle = angle_at(&p(0.1, 0.3), &p(0.2, 0.3), &p(0.3, 0.300_000_01)).unwrap();
        assert!(angle.is_finite());
        assert!(angle <= 180.0);
    }
}
