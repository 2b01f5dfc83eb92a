// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for evaluating exercise form.
//!
//! This module contains the command-line interface logic, including argument parsing,
//! the `evaluate` frame loop and the `exercises` listing.

// Modules
/// CLI arguments.
pub mod args;

/// Frame evaluation logic.
pub mod evaluate;

/// Rule book listing.
pub mod exercises;

/// Console logging macros.
pub mod logging;
