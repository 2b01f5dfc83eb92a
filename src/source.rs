// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton frame sources.
//!
//! The pose-estimation engine runs outside this crate. Its per-frame output is
//! read as JSON Lines, one frame per line, either from a file or from stdin:
//!
//! ```text
//! {"timestamp_ms": 33.3, "landmarks": [{"x": 0.51, "y": 0.22, "z": -0.1}, ...]}
//! {"timestamp_ms": 66.6, "landmarks": null}
//! [{"x": 0.51, "y": 0.22}, ...]
//! ```
//!
//! A frame with missing or empty `landmarks` means no person was detected.
//! A bare array is shorthand for a frame with landmarks and no timestamp.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::skeleton::Skeleton;

/// One frame of pose-estimation output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkeletonFrame {
    /// Capture timestamp in milliseconds, if the producer supplied one.
    #[serde(default)]
    pub timestamp_ms: Option<f64>,
    /// Detected skeleton, `None` when no person was found.
    #[serde(default)]
    pub landmarks: Option<Skeleton>,
}

impl SkeletonFrame {
    /// Frame holding `skeleton`.
    #[must_use]
    pub const fn with_skeleton(skeleton: Skeleton) -> Self {
        Self {
            timestamp_ms: None,
            landmarks: Some(skeleton),
        }
    }

    /// The detected skeleton, if any.
    #[must_use]
    pub fn skeleton(&self) -> Option<&Skeleton> {
        self.landmarks.as_ref().filter(|s| !s.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FrameLine {
    Bare(Skeleton),
    Frame(SkeletonFrame),
}

impl From<FrameLine> for SkeletonFrame {
    fn from(line: FrameLine) -> Self {
        match line {
            FrameLine::Bare(skeleton) => Self::with_skeleton(skeleton),
            FrameLine::Frame(frame) => frame,
        }
    }
}

/// Parse a single JSON Lines record into a frame.
///
/// # Errors
///
/// Returns [`FormError::ParseError`] if the line is neither a frame object nor
/// a landmark array.
pub fn parse_frame(line: &str) -> Result<SkeletonFrame> {
    let parsed: FrameLine = serde_json::from_str(line).map_err(|e| {
        FormError::ParseError(format!("expected a frame object or landmark array: {e}"))
    })?;
    Ok(parsed.into())
}

/// Where skeleton frames are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSource {
    /// Standard input.
    Stdin,
    /// JSON Lines file.
    File(PathBuf),
}

impl FrameSource {
    /// Human-readable name for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Open the source for iteration.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::IoError`] if the file cannot be opened.
    pub fn open(&self) -> Result<FrameIterator> {
        let reader: Box<dyn BufRead> = match self {
            Self::Stdin => Box::new(BufReader::new(io::stdin())),
            Self::File(path) => {
                let file = File::open(path).map_err(|e| {
                    FormError::IoError(format!("failed to open {}: {e}", path.display()))
                })?;
                Box::new(BufReader::new(file))
            }
        };
        Ok(FrameIterator::new(reader))
    }
}

/// Convert from a string path to a source. `-` means stdin.
impl From<&str> for FrameSource {
    fn from(s: &str) -> Self {
        if s == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(s))
        }
    }
}

impl From<&Path> for FrameSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

/// Metadata about a frame read from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMeta {
    /// Zero-based frame index, counting only non-blank lines.
    pub frame_idx: usize,
    /// One-based line number in the source.
    pub line: usize,
}

/// Iterator over frames of a JSON Lines reader. Blank lines are skipped.
pub struct FrameIterator {
    reader: Box<dyn BufRead>,
    buffer: Vec<u8>,
    line: usize,
    frame_idx: usize,
}

impl FrameIterator {
    /// Wrap any buffered reader.
    #[must_use]
    pub fn new(reader: Box<dyn BufRead>) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line: 0,
            frame_idx: 0,
        }
    }
}

impl Iterator for FrameIterator {
    type Item = Result<(FrameMeta, SkeletonFrame)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line += 1;

            let text = std::str::from_utf8(&self.buffer).map(str::trim);
            if matches!(text, Ok("")) {
                continue;
            }

            let meta = FrameMeta {
                frame_idx: self.frame_idx,
                line: self.line,
            };
            self.frame_idx += 1;

            let Ok(text) = text else {
                return Some(Err(FormError::ParseError(format!(
                    "line {}: invalid UTF-8",
                    meta.line
                ))));
            };

            return Some(
                parse_frame(text)
                    .map(|frame| (meta, frame))
                    .map_err(|e| match e {
                        FormError::ParseError(msg) => {
                            FormError::ParseError(format!("line {}: {msg}", meta.line))
                        }
                        other => other,
                    }),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn iter(text: &'static str) -> FrameIterator {
        FrameIterator::new(Box::new(Cursor::new(text)))
    }

    #[test]
    fn test_source_from_str() {
        assert_eq!(FrameSource::from("-"), FrameSource::Stdin);
        assert_eq!(
            FrameSource::from("frames.jsonl"),
            FrameSource::File(PathBuf::from("frames.jsonl"))
        );
        assert_eq!(FrameSource::Stdin.describe(), "<stdin>");
    }

    #[test]
    fn test_parse_frame_object() {
        let frame =
            parse_frame(r#"{"timestamp_ms": 12.5, "landmarks": [{"x": 0.1, "y": 0.2}]}"#).unwrap();
        assert_eq!(frame.timestamp_ms, Some(12.5));
        assert_eq!(frame.skeleton().map(Skeleton::len), Some(1));
    }

    #[test]
    fn test_parse_bare_array() {
        let frame = parse_frame(r#"[{"x": 0.1, "y": 0.2, "z": 0.0}, {"x": 0.3, "y": 0.4}]"#).unwrap();
        assert_eq!(frame.timestamp_ms, None);
        assert_eq!(frame.skeleton().map(Skeleton::len), Some(2));
    }

    #[test]
    fn test_no_detection() {
        assert!(parse_frame(r#"{"timestamp_ms": 1.0, "landmarks": null}"#)
            .unwrap()
            .skeleton()
            .is_none());
        assert!(parse_frame(r#"{"landmarks": []}"#).unwrap().skeleton().is_none());
        assert!(parse_frame("{}").unwrap().skeleton().is_none());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_frame("42"), Err(FormError::ParseError(_))));
    }

    #[test]
    fn test_iterator_skips_blank_lines() {
        let frames: Vec<_> = iter("[{\"x\":0.1,\"y\":0.1}]\n\n   \n{\"landmarks\":null}\n")
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].0, FrameMeta { frame_idx: 0, line: 1 });
        assert_eq!(frames[1].0, FrameMeta { frame_idx: 1, line: 4 });
    }

    #[test]
    fn test_iterator_skips_invalid_utf8() {
        let text: &'static [u8] = b"not json\n{\"landmarks\": \xff}\n{\"landmarks\": null}\n";
        let mut frames = FrameIterator::new(Box::new(Cursor::new(text)));

        assert!(frames.next().unwrap().is_err());
        let err = frames.next().unwrap().unwrap_err();
        assert!(matches!(&err, FormError::ParseError(msg) if msg == "line 2: invalid UTF-8"));
        let (meta, frame) = frames.next().unwrap().unwrap();
        assert_eq!(meta, FrameMeta { frame_idx: 2, line: 3 });
        assert!(frame.skeleton().is_none());
        assert!(frames.next().is_none());
    }

    #[test]
    fn test_iterator_reports_line() {
        let mut frames = iter("{}\nnot json\n");
        assert!(frames.next().unwrap().is_ok());
        let err = frames.next().unwrap().unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(frames.next().is_none());
    }
}
