// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;

use form_evaluator::cli::args::{Cli, Commands};
use form_evaluator::cli::evaluate::run_evaluation;
use form_evaluator::cli::exercises::list_exercises;

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Evaluate(args) => run_evaluation(args),
        Commands::Exercises(args) => list_exercises(args),
    }
}
