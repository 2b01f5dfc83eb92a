// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::io::{self, Write};
use std::process;

#[cfg(feature = "annotate")]
use std::fs;
#[cfg(feature = "annotate")]
use std::path::PathBuf;

#[cfg(feature = "annotate")]
use image::RgbImage;

#[cfg(feature = "annotate")]
use crate::annotate::{annotate_skeleton, blank_canvas, find_next_run_dir, load_backdrop, save_frame};

use crate::cli::args::EvaluateArgs;
use crate::cli::logging::set_verbose;
use crate::error::{FormError, Result};
use crate::source::{FrameMeta, FrameSource, SkeletonFrame};
use crate::utils::{format_angle, format_joints, pluralize};
use crate::{EvaluationOutcome, EvaluatorConfig, RuleBook, VERSION};
use crate::{error, feedback, info, section, success, verbose, warn};

/// Counts collected over one run of the frame loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-blank lines read from the source.
    pub frames: usize,
    /// Frames that carried a skeleton.
    pub detected: usize,
    /// Frames evaluated against the selected exercise.
    pub evaluated: usize,
    /// Evaluated frames with at least one feedback message.
    pub with_feedback: usize,
    /// Lines that could not be parsed.
    pub skipped: usize,
    /// How often each message was emitted, in order of first appearance.
    pub message_counts: Vec<(String, usize)>,
}

impl RunSummary {
    fn record(&mut self, outcome: &EvaluationOutcome) {
        self.evaluated += 1;
        if !outcome.is_correct_form() {
            self.with_feedback += 1;
        }
        for message in &outcome.messages {
            match self.message_counts.iter_mut().find(|(m, _)| m == message) {
                Some((_, count)) => *count += 1,
                None => self.message_counts.push((message.clone(), 1)),
            }
        }
    }
}

/// Run the evaluate command.
pub fn run_evaluation(args: &EvaluateArgs) {
    // Per-frame lines would interleave with JSON records on stdout.
    set_verbose(args.verbose && !args.json);

    let mut config = EvaluatorConfig::new()
        .with_frame_size(args.width, args.height)
        .with_json_output(args.json)
        .with_save(args.save);
    if let Some(exercise) = &args.exercise {
        config = config.with_exercise(exercise);
    }
    if let Some(rules) = &args.rules {
        config = config.with_rule_book(rules);
    }
    if let Some(backdrop) = &args.backdrop {
        config = config.with_backdrop(backdrop);
    }

    let book = match config.load_rule_book() {
        Ok(book) => book,
        Err(e) => {
            error!("Error loading rule book: {e}");
            process::exit(1);
        }
    };

    match &config.exercise {
        None => {
            warn!("'exercise' argument is missing. Frames will be read but not evaluated.");
        }
        Some(exercise) if !book.contains(exercise) => {
            let known = book.exercises().collect::<Vec<_>>().join(", ");
            warn!("No rules configured for '{exercise}' (known: {known}). Every frame will pass.");
        }
        Some(_) => {}
    }

    let source = FrameSource::from(args.source.as_str());
    let frames = match source.open() {
        Ok(frames) => frames,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    if !config.json_output {
        info!(
            "Form Evaluator {VERSION} 🏋️ exercise={} source={}",
            config.exercise.as_deref().unwrap_or("none"),
            source.describe()
        );
    }

    let mut renderer = if config.save {
        match FrameRenderer::new(&config) {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        }
    } else {
        None
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = evaluate_frames(&book, &config, frames, &mut out, |meta, frame, outcome| {
        if let Some(renderer) = renderer.as_mut() {
            renderer.render(meta, frame, outcome)
        } else {
            Ok(())
        }
    });

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    if !config.json_output {
        print_summary(&summary);
        if let Some(renderer) = &renderer {
            renderer.report();
        }
    }
}

/// Drive the frame loop over `frames`, writing JSON outcomes to `out` when
/// enabled and calling `on_frame` for every frame with a skeleton.
///
/// Lines that fail to parse are skipped with a warning. Schema mismatches
/// ([`FormError::LandmarkOutOfRange`]) and IO errors stop the loop.
///
/// # Errors
///
/// Returns the first fatal error.
pub fn evaluate_frames<I, W, F>(
    book: &RuleBook,
    config: &EvaluatorConfig,
    frames: I,
    out: &mut W,
    mut on_frame: F,
) -> Result<RunSummary>
where
    I: IntoIterator<Item = Result<(FrameMeta, SkeletonFrame)>>,
    W: Write,
    F: FnMut(FrameMeta, &SkeletonFrame, Option<&EvaluationOutcome>) -> Result<()>,
{
    let mut summary = RunSummary::default();

    for item in frames {
        let (meta, frame) = match item {
            Ok(pair) => pair,
            Err(FormError::ParseError(msg)) => {
                summary.frames += 1;
                summary.skipped += 1;
                warn!("Skipping frame: {msg}");
                continue;
            }
            Err(e) => return Err(e),
        };
        summary.frames += 1;

        let Some(skeleton) = frame.skeleton() else {
            if config.json_output {
                let line = serde_json::json!({
                    "frame": meta.frame_idx,
                    "timestamp_ms": frame.timestamp_ms,
                    "detected": false,
                });
                writeln!(out, "{line}")?;
            } else {
                verbose!("frame {}: no person detected", meta.frame_idx);
            }
            continue;
        };
        summary.detected += 1;

        let outcome = match &config.exercise {
            Some(exercise) => Some(book.evaluate(skeleton, exercise)?),
            None => None,
        };

        if let Some(outcome) = &outcome {
            summary.record(outcome);
            if config.json_output {
                let line = serde_json::json!({
                    "frame": meta.frame_idx,
                    "timestamp_ms": frame.timestamp_ms,
                    "detected": true,
                    "outcome": outcome,
                });
                writeln!(out, "{line}")?;
            } else {
                report_frame(meta, outcome);
            }
        }

        on_frame(meta, &frame, outcome.as_ref())?;
    }

    out.flush()?;
    Ok(summary)
}

fn report_frame(meta: FrameMeta, outcome: &EvaluationOutcome) {
    let angles = outcome
        .measurements
        .iter()
        .map(|m| format!("{}={}", m.rule, format_angle(m.angle)))
        .collect::<Vec<_>>()
        .join(" ");

    if outcome.is_correct_form() {
        verbose!("frame {}: good form ({angles})", meta.frame_idx);
    } else {
        verbose!(
            "frame {}: {} [{}] ({angles})",
            meta.frame_idx,
            pluralize("issue", outcome.messages.len()),
            format_joints(outcome.violating_joints.iter().copied())
        );
        for message in &outcome.messages {
            feedback!("{message}");
        }
    }
}

fn print_summary(summary: &RunSummary) {
    section!("Summary");
    info!(
        "{} {} read, {} with a person, {} evaluated, {} with feedback",
        summary.frames,
        pluralize("frame", summary.frames),
        summary.detected,
        summary.evaluated,
        summary.with_feedback
    );
    if summary.skipped > 0 {
        warn!(
            "{} {} could not be parsed",
            summary.skipped,
            pluralize("line", summary.skipped)
        );
    }
    for (message, count) in &summary.message_counts {
        info!("  {count:>5}x {message}");
    }
    if summary.evaluated > 0 && summary.with_feedback == 0 {
        success!("Good form on every evaluated frame");
    }
}

/// Writes annotated PNGs for evaluated frames.
#[cfg(feature = "annotate")]
struct FrameRenderer {
    dir: PathBuf,
    backdrop: Option<RgbImage>,
    frame_size: (u32, u32),
    saved: usize,
}

#[cfg(feature = "annotate")]
impl FrameRenderer {
    fn new(config: &EvaluatorConfig) -> Result<Self> {
        let backdrop = config.backdrop.as_ref().map(load_backdrop).transpose()?;
        let dir = PathBuf::from(find_next_run_dir("runs/evaluate", "frames"));
        fs::create_dir_all(&dir).map_err(|e| {
            FormError::IoError(format!("failed to create {}: {e}", dir.display()))
        })?;
        Ok(Self {
            dir,
            backdrop,
            frame_size: config.frame_size,
            saved: 0,
        })
    }

    fn render(
        &mut self,
        meta: FrameMeta,
        frame: &SkeletonFrame,
        outcome: Option<&EvaluationOutcome>,
    ) -> Result<()> {
        let Some(skeleton) = frame.skeleton() else {
            return Ok(());
        };
        let mut canvas = self
            .backdrop
            .clone()
            .unwrap_or_else(|| blank_canvas(self.frame_size.0, self.frame_size.1));
        let empty = EvaluationOutcome::new();
        annotate_skeleton(&mut canvas, skeleton, outcome.unwrap_or(&empty));
        save_frame(&canvas, &self.dir, meta.frame_idx)?;
        self.saved += 1;
        Ok(())
    }

    fn report(&self) {
        verbose!(
            "{} annotated {} saved to {}",
            self.saved,
            pluralize("frame", self.saved),
            self.dir.display()
        );
    }
}

/// Stand-in used when the crate is built without annotation support.
#[cfg(not(feature = "annotate"))]
struct FrameRenderer;

#[cfg(not(feature = "annotate"))]
impl FrameRenderer {
    fn new(_config: &EvaluatorConfig) -> Result<Self> {
        Err(FormError::FeatureNotEnabled(
            "--save requires the 'annotate' feature".to_string(),
        ))
    }

    fn render(
        &mut self,
        _meta: FrameMeta,
        _frame: &SkeletonFrame,
        _outcome: Option<&EvaluationOutcome>,
    ) -> Result<()> {
        Ok(())
    }

    fn report(&self) {}
}
