// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Console output for the CLI.
//!
//! Warnings and errors go to stderr so `--json` output on stdout stays
//! machine readable. Per-frame lines and section headers are suppressed when
//! verbosity is off.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::{ColoredString, Colorize};

/// Global verbosity flag.
static VERBOSE: AtomicBool = AtomicBool::new(true);

/// Set the global verbosity flag.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Check if verbose output is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Kind of console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Verbose,
    Section,
    Feedback,
    Success,
    Warn,
    Error,
}

impl Level {
    /// Whether the message is dropped when verbosity is off.
    #[must_use]
    pub const fn is_verbose_only(self) -> bool {
        matches!(self, Self::Verbose | Self::Section | Self::Feedback)
    }

    /// Whether the message goes to stderr.
    #[must_use]
    pub const fn is_diagnostic(self) -> bool {
        matches!(self, Self::Warn | Self::Error)
    }

    fn tag(self) -> Option<ColoredString> {
        match self {
            Self::Info | Self::Verbose | Self::Section => None,
            Self::Feedback => Some("  ✗".red().bold()),
            Self::Success => Some("✅".green()),
            Self::Warn => Some("WARNING ⚠️".yellow().bold()),
            Self::Error => Some("Error:".red().bold()),
        }
    }
}

/// Write one message at `level`. Used by the logging macros.
pub fn emit(level: Level, args: fmt::Arguments<'_>) {
    if level.is_verbose_only() && !is_verbose() {
        return;
    }
    let text = match level {
        Level::Section => format!("\n{}", args.to_string().cyan().bold()),
        Level::Feedback => args.to_string().yellow().to_string(),
        _ => args.to_string(),
    };
    let line = match level.tag() {
        Some(tag) => format!("{tag} {text}"),
        None => text,
    };
    if level.is_diagnostic() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Macro for standard info messages.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Level::Info, format_args!($($arg)*))
    };
}

/// Macro for warning messages.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Level::Warn, format_args!($($arg)*))
    };
}

/// Macro for error messages.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Level::Error, format_args!($($arg)*))
    };
}

/// Macro for success messages.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Level::Success, format_args!($($arg)*))
    };
}

/// Macro for form feedback lines, printed only in verbose mode.
#[macro_export]
macro_rules! feedback {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Level::Feedback, format_args!($($arg)*))
    };
}

/// Macro for verbose messages.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Level::Verbose, format_args!($($arg)*))
    };
}

/// Macro for section headers.
#[macro_export]
macro_rules! section {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Level::Section, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_toggle() {
        set_verbose(true);
        assert!(is_verbose());

        set_verbose(false);
        assert!(!is_verbose());

        set_verbose(true);
        assert!(is_verbose());
    }

    #[test]
    fn test_levels() {
        assert!(Level::Feedback.is_verbose_only());
        assert!(Level::Section.is_verbose_only());
        assert!(!Level::Warn.is_verbose_only());
        assert!(Level::Warn.is_diagnostic());
        assert!(Level::Error.is_diagnostic());
        assert!(!Level::Info.is_diagnostic());
    }
}
