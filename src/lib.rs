// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Form Evaluator
//!
//! Real-time exercise form evaluation from pose-estimation skeletons.
//!
//! A pose-estimation engine produces 33 normalized body landmarks per video
//! frame. This crate measures joint angles on those landmarks, checks them
//! against per-exercise rules, and reports which joints are out of form along
//! with feedback messages a trainee can act on.
//!
//! ## Features
//!
//! - **Angle Calculator** - Unsigned angle at a joint vertex, robust to degenerate input
//! - **Data-Driven Rules** - Squat and push-up rule sets built in, more loadable from JSON
//! - **Deterministic** - Same skeleton and exercise always produce the same outcome
//! - **Frame Streams** - JSON Lines from a file or stdin, one skeleton per line
//! - **Annotation** - Flagged joints drawn in red with arrow markers (optional)
//!
//! ## Quick Start (Library)
//!
//! ```
//! use form_evaluator::{evaluate, JointPosition, Skeleton};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut joints = vec![JointPosition::new(0.0, 0.0); 33];
//!     joints[12] = JointPosition::new(0.5, 0.2); // right shoulder
//!     joints[24] = JointPosition::new(0.5, 0.5); // right hip
//!     joints[26] = JointPosition::new(0.5, 0.8); // right knee
//!     joints[28] = JointPosition::new(0.5, 1.0); // right ankle
//!
//!     let outcome = evaluate(&Skeleton::new(joints), "squats")?;
//!     for message in &outcome.messages {
//!         println!("{message}");
//!     }
//!     assert!(outcome.violating_joints.contains(&26));
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Evaluate a recorded session
//! form-evaluator evaluate --exercise squats --source frames.jsonl
//!
//! # Stream from a pose producer, one JSON outcome per frame
//! pose-producer | form-evaluator evaluate -e pushups --json
//!
//! # Save annotated frames
//! form-evaluator evaluate -e squats -s frames.jsonl --save --backdrop gym.jpg
//!
//! # List configured exercises
//! form-evaluator exercises --rules my_rules.json
//! ```
//!
//! **Evaluate Options:**
//!
//! | Option | Short | Description | Default |
//! |--------|-------|-------------|---------|
//! | `--exercise` | `-e` | Exercise to check | none |
//! | `--source` | `-s` | JSON Lines frames, `-` for stdin | `-` |
//! | `--rules` | | JSON rule book merged over the built-ins | |
//! | `--json` | | One JSON outcome per frame | `false` |
//! | `--save` | | Save annotated frames | `false` |
//! | `--backdrop` | | Image beneath annotated skeletons | black |
//! | `--width` | | Frame width in pixels | `640` |
//! | `--height` | | Frame height in pixels | `480` |
//! | `--verbose` | | Per-frame output | `true` |
//!
//! ## Rule Books
//!
//! Rule sets are plain JSON, keyed by exercise name:
//!
//! ```json
//! {"exercises": [{"name": "lunges", "rules": [{
//!     "name": "front_knee",
//!     "joints": {"proximal": 23, "vertex": 25, "distal": 27},
//!     "predicate": {"kind": "below", "threshold": 80},
//!     "flag": [25, 27],
//!     "message": "Don't let your front knee collapse."
//! }]}]}
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`angle`] | Joint angle calculation ([`angle_at`]) |
//! | [`evaluator`] | [`RuleBook`] and [`evaluate`] |
//! | [`rules`] | [`AngleRule`], [`Predicate`], [`RuleSet`] |
//! | [`outcome`] | [`EvaluationOutcome`] and per-rule measurements |
//! | [`skeleton`] | [`Skeleton`] and [`JointPosition`] |
//! | [`landmarks`] | 33-point landmark schema |
//! | [`exercise`] | Built-in [`Exercise`] names |
//! | [`source`] | JSON Lines frame input ([`FrameSource`]) |
//! | [`config`] | [`EvaluatorConfig`] for the frame loop |
//! | [`error`] | Error types ([`FormError`], [`Result`]) |
//! | [`visualizer`] | Colors, connections and flag markers |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `annotate` | Draw evaluated skeletons onto PNG frames (default) |
//!
//! ## License
//!
//! This project is licensed under [AGPL-3.0](https://ultralytics.com/license).

// Modules
pub mod angle;
#[cfg(feature = "annotate")]
pub mod annotate;
pub mod cli;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod exercise;
pub mod landmarks;
pub mod outcome;
pub mod rules;
pub mod skeleton;
pub mod source;
pub mod utils;
pub mod visualizer;

// Re-export main types for convenience
pub use angle::angle_at;
pub use config::EvaluatorConfig;
pub use error::{FormError, Result};
pub use evaluator::{evaluate, RuleBook};
pub use exercise::Exercise;
pub use outcome::{AngleMeasurement, EvaluationOutcome};
pub use rules::{AngleRule, JointTriple, Predicate, RuleSet};
pub use skeleton::{JointPosition, Skeleton};
pub use source::{FrameSource, SkeletonFrame};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
