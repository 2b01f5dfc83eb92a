// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Utility functions for reporting evaluation results

use crate::landmarks::landmark_name;

/// Pluralize a noun for a count, e.g. `pluralize("frame", 2)` -> `"frames"`.
#[must_use]
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        return word.to_string();
    }
    if word.ends_with('s') || word.ends_with("ch") || word.ends_with("sh") {
        format!("{word}es")
    } else if word.ends_with('y') && !word.ends_with("ey") && !word.ends_with("ay") {
        format!("{}ies", &word[..word.len() - 1])
    } else {
        format!("{word}s")
    }
}

/// Comma-separated joint names, falling back to the index for unknown joints.
pub fn format_joints<I: IntoIterator<Item = usize>>(joints: I) -> String {
    joints
        .into_iter()
        .map(|i| landmark_name(i).map_or_else(|| format!("#{i}"), str::to_string))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format an optional angle for display.
#[must_use]
pub fn format_angle(angle: Option<f32>) -> String {
    angle.map_or_else(|| "n/a".to_string(), |a| format!("{a:.1}°"))
}
