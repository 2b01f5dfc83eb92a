// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Visualization data for evaluated skeletons.

/// Color definitions.
pub mod color;

/// Per-joint colors and flag markers.
pub mod overlay;

/// Pose skeleton connections.
pub mod skeleton;

pub use color::Color;
pub use overlay::{flag_markers, joint_colors, FlagMarker};
