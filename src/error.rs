// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the form evaluation library.

use std::fmt;

/// Result type alias for form evaluation operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Main error type for the form evaluation library.
#[derive(Debug)]
pub enum FormError {
    /// A rule referenced a joint index the skeleton does not have.
    ///
    /// This means the rule tables and the pose schema disagree, so it is
    /// treated as fatal rather than as bad frame data.
    LandmarkOutOfRange {
        /// Joint index requested by the rule.
        index: usize,
        /// Number of joints in the skeleton.
        len: usize,
    },
    /// Invalid rule book or evaluator configuration.
    ConfigError(String),
    /// Malformed skeleton or frame data.
    ParseError(String),
    /// IO error (file not found, permission denied, etc.).
    IoError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
    /// Error reading or writing images.
    ImageError(String),
    /// Feature not enabled.
    FeatureNotEnabled(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LandmarkOutOfRange { index, len } => write!(
                f,
                "Landmark out of range: index {index} requested but skeleton has {len} joints"
            ),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
            Self::IoError(msg) => write!(f, "IO error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::FeatureNotEnabled(msg) => write!(f, "Feature not enabled: {msg}"),
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

#[cfg(feature = "annotate")]
impl From<image::ImageError> for FormError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FormError::ConfigError("test".to_string());
        assert_eq!(err.to_string(), "Config error: test");

        let err = FormError::LandmarkOutOfRange { index: 28, len: 17 };
        assert_eq!(
            err.to_string(),
            "Landmark out of range: index 28 requested but skeleton has 17 joints"
        );
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error;

        let err = FormError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(FormError::ParseError("x".into()).source().is_none());
    }

    #[test]
    fn test_from_serde_json() {
        let json_err = serde_json::from_str::<Vec<f32>>("[1.0,").unwrap_err();
        let err: FormError = json_err.into();
        assert!(matches!(err, FormError::ParseError(_)));
    }
}
