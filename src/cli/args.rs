// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Evaluate Options:
    --exercise, -e <EXERCISE>  Exercise to check (squats, pushups, or a rule book name)
    --source, -s <SOURCE>      JSON Lines skeleton frames, '-' for stdin [default: -]
    --rules <RULES>            JSON rule book merged over the built-in rule sets
    --json                     Print one JSON outcome per frame
    --save                     Save annotated frames to runs/evaluate/frames
    --backdrop <IMAGE>         Image drawn beneath annotated skeletons
    --width <WIDTH>            Frame width in pixels [default: 640]
    --height <HEIGHT>          Frame height in pixels [default: 480]
    --verbose                  Show per-frame output

Examples:
    form-evaluator evaluate --exercise squats --source frames.jsonl
    form-evaluator evaluate -e pushups -s frames.jsonl --json
    pose-producer | form-evaluator evaluate -e squats --save --width 1280 --height 720
    form-evaluator evaluate -e lunges --rules my_rules.json -s frames.jsonl
    form-evaluator exercises --rules my_rules.json"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate exercise form for a stream of skeleton frames
    Evaluate(EvaluateArgs),
    /// List the configured exercises and their rules
    Exercises(ExercisesArgs),
}

/// Arguments for the evaluate command.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Exercise to check (squats, pushups, or a name from --rules)
    #[arg(short, long)]
    pub exercise: Option<String>,

    /// JSON Lines file of skeleton frames, '-' for stdin
    #[arg(short, long, default_value = "-")]
    pub source: String,

    /// JSON rule book merged over the built-in rule sets
    #[arg(long)]
    pub rules: Option<String>,

    /// Print one JSON outcome per frame
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Save annotated frames to runs/evaluate/frames
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// Image drawn beneath annotated skeletons
    #[arg(long)]
    pub backdrop: Option<String>,

    /// Frame width in pixels
    #[arg(long, default_value_t = DEFAULT_FRAME_WIDTH)]
    pub width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = DEFAULT_FRAME_HEIGHT)]
    pub height: u32,

    /// Show per-frame output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

/// Arguments for the exercises command.
#[derive(Args, Debug)]
pub struct ExercisesArgs {
    /// JSON rule book merged over the built-in rule sets
    #[arg(long)]
    pub rules: Option<String>,
}
