// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Evaluator configuration.
//!
//! This module defines the [`EvaluatorConfig`] struct, which controls how the
//! frame loop runs: which exercise is selected, which rule book to use, how
//! results are reported and how annotated frames are rendered.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::evaluator::RuleBook;
use crate::exercise::Exercise;

/// Default canvas width for annotated frames, in pixels.
pub const DEFAULT_FRAME_WIDTH: u32 = 640;
/// Default canvas height for annotated frames, in pixels.
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;

/// Configuration for a form evaluation run.
///
/// It uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use form_evaluator::EvaluatorConfig;
///
/// let config = EvaluatorConfig::new()
///     .with_exercise("squats")
///     .with_frame_size(1280, 720)
///     .with_json_output(true);
/// ```
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Selected exercise identifier.
    /// If `None`, frames are read but not evaluated.
    pub exercise: Option<String>,
    /// Optional JSON rule book, merged over the built-in rule sets.
    pub rule_book: Option<PathBuf>,
    /// Frame size (width, height) used to map normalized joints to pixels.
    pub frame_size: (u32, u32),
    /// Emit one JSON outcome per frame instead of human-readable feedback.
    pub json_output: bool,
    /// Save annotated frames as PNG images.
    pub save: bool,
    /// Optional image drawn beneath annotated skeletons.
    pub backdrop: Option<PathBuf>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            exercise: None,
            rule_book: None,
            frame_size: (DEFAULT_FRAME_WIDTH, DEFAULT_FRAME_HEIGHT),
            json_output: false,
            save: false,
            backdrop: None,
        }
    }
}

impl EvaluatorConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the exercise to evaluate.
    ///
    /// Built-in aliases (`squat`, `push-ups`, ...) are mapped to their
    /// canonical identifiers. Other names are kept as given so exercises from
    /// a rule book can be selected.
    #[must_use]
    pub fn with_exercise(mut self, exercise: &str) -> Self {
        let id = exercise
            .parse::<Exercise>()
            .map_or_else(|_| exercise.trim().to_string(), |e| e.as_str().to_string());
        self.exercise = Some(id);
        self
    }

    /// Use a JSON rule book in addition to the built-in rule sets.
    #[must_use]
    pub fn with_rule_book<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.rule_book = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the frame size used for pixel-space overlays.
    #[must_use]
    pub const fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_size = (width, height);
        self
    }

    /// Enable or disable JSON output.
    #[must_use]
    pub const fn with_json_output(mut self, json: bool) -> Self {
        self.json_output = json;
        self
    }

    /// Enable or disable saving annotated frames.
    #[must_use]
    pub const fn with_save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    /// Draw annotated frames on top of this image.
    #[must_use]
    pub fn with_backdrop<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.backdrop = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the rule book for this configuration.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`RuleBook::load`] if a rule book path is set.
    pub fn load_rule_book(&self) -> Result<RuleBook> {
        match &self.rule_book {
            Some(path) => Ok(RuleBook::builtin().merged(RuleBook::load(path)?)),
            None => Ok(RuleBook::builtin()),
        }
    }
}
