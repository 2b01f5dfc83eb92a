// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Draw evaluated skeletons onto images.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::error::{FormError, Result};
use crate::outcome::EvaluationOutcome;
use crate::skeleton::Skeleton;
use crate::visualizer::skeleton::POSE_CONNECTIONS;
use crate::visualizer::{flag_markers, joint_colors, Color, FlagMarker};

/// Radius of a joint dot in pixels.
const JOINT_RADIUS: i32 = 4;
/// Connector line thickness in pixels.
const CONNECTOR_THICKNESS: i32 = 2;
/// Arrow head side length in pixels.
const ARROW_HEAD: f32 = 10.0;

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Self(color.to_array())
    }
}

/// Black canvas of the given size.
#[must_use]
pub fn blank_canvas(width: u32, height: u32) -> RgbImage {
    RgbImage::new(width, height)
}

/// Load an image to draw skeletons on.
///
/// # Errors
///
/// Returns [`FormError::ImageError`] if the image cannot be opened or decoded.
pub fn load_backdrop<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    image::open(path)
        .map(|img| img.to_rgb8())
        .map_err(|e| FormError::ImageError(format!("failed to load {}: {e}", path.display())))
}

/// Find the next available run directory (frames, frames2, frames3, etc.)
pub fn find_next_run_dir(base: &str, prefix: &str) -> String {
    let base_path = Path::new(base);

    let first = base_path.join(prefix);
    if !first.exists() {
        return first.to_string_lossy().to_string();
    }

    for i in 2.. {
        let numbered = base_path.join(format!("{prefix}{i}"));
        if !numbered.exists() {
            return numbered.to_string_lossy().to_string();
        }
    }

    base_path.join(prefix).to_string_lossy().to_string()
}

/// Draw `skeleton` onto `canvas`, highlighting the joints flagged in `outcome`.
///
/// Connectors are gray, joints green or red, and each flagged joint gets an
/// upward red arrow. Joints further than one frame size outside the canvas
/// are not drawn, nor is anything attached to them.
#[allow(clippy::cast_possible_truncation)]
pub fn annotate_skeleton(canvas: &mut RgbImage, skeleton: &Skeleton, outcome: &EvaluationOutcome) {
    let (width, height) = canvas.dimensions();
    let points: Vec<Option<(f32, f32)>> = skeleton
        .joints()
        .iter()
        .map(|j| Some(j.to_pixels(width, height)).filter(|&p| is_drawable(p, width, height)))
        .collect();

    for [a, b] in POSE_CONNECTIONS {
        if let (Some(Some(start)), Some(Some(end))) = (points.get(a), points.get(b)) {
            draw_thick_line(canvas, *start, *end, Color::CONNECTOR.into());
        }
    }

    for (point, color) in points.iter().zip(joint_colors(outcome, points.len())) {
        if let Some((x, y)) = point {
            let center = (x.round() as i32, y.round() as i32);
            draw_filled_circle_mut(canvas, center, JOINT_RADIUS, color.into());
        }
    }

    for marker in flag_markers(skeleton, outcome, width, height) {
        if is_drawable(marker.origin, width, height) {
            draw_arrow(canvas, &marker);
        }
    }
}

/// Whether a pixel position is finite and within one frame size of the canvas.
#[allow(clippy::cast_precision_loss)]
fn is_drawable(point: (f32, f32), width: u32, height: u32) -> bool {
    let (w, h) = (width as f32, height as f32);
    (-w..=2.0 * w).contains(&point.0) && (-h..=2.0 * h).contains(&point.1)
}

/// Save an annotated frame as `frame_<idx>.png` inside `dir`.
///
/// # Errors
///
/// Returns [`FormError::ImageError`] if encoding or writing fails.
pub fn save_frame(canvas: &RgbImage, dir: &Path, frame_idx: usize) -> Result<PathBuf> {
    let path = dir.join(format!("frame_{frame_idx:06}.png"));
    canvas.save(&path)?;
    Ok(path)
}

#[allow(clippy::cast_precision_loss)]
fn draw_thick_line(canvas: &mut RgbImage, start: (f32, f32), end: (f32, f32), color: Rgb<u8>) {
    let half = CONNECTOR_THICKNESS / 2;
    for offset in -half..CONNECTOR_THICKNESS - half {
        let d = offset as f32;
        draw_line_segment_mut(canvas, (start.0 + d, start.1), (end.0 + d, end.1), color);
        draw_line_segment_mut(canvas, (start.0, start.1 + d), (end.0, end.1 + d), color);
    }
}

fn draw_arrow(canvas: &mut RgbImage, marker: &FlagMarker) {
    let color: Rgb<u8> = marker.color.into();
    let tip = marker.tip();
    draw_thick_line(canvas, marker.origin, tip, color);

    // Head: two strokes back from the tip, rotated +-30 degrees off the shaft
    let (dx, dy) = (-marker.direction.0, -marker.direction.1);
    let (sin, cos) = 30.0_f32.to_radians().sin_cos();
    for sign in [1.0, -1.0] {
        let rx = dx * cos - sign * dy * sin;
        let ry = sign * dx * sin + dy * cos;
        let end = (tip.0 + rx * ARROW_HEAD, tip.1 + ry * ARROW_HEAD);
        draw_thick_line(canvas, tip, end, color);
    }
}
