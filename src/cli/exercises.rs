// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;

use crate::cli::args::ExercisesArgs;
use crate::config::EvaluatorConfig;
use crate::evaluator::RuleBook;
use crate::rules::AngleRule;
use crate::utils::{format_joints, pluralize};
use crate::{error, info, section};

/// Run the exercises command.
pub fn list_exercises(args: &ExercisesArgs) {
    let mut config = EvaluatorConfig::new();
    if let Some(rules) = &args.rules {
        config = config.with_rule_book(rules);
    }

    let book = match config.load_rule_book() {
        Ok(book) => book,
        Err(e) => {
            error!("Error loading rule book: {e}");
            process::exit(1);
        }
    };

    for line in describe_book(&book) {
        if let Some(header) = line.strip_prefix('#') {
            section!("{header}");
        } else {
            info!("{line}");
        }
    }
}

/// Render the book as display lines. Lines starting with `#` are headers.
fn describe_book(book: &RuleBook) -> Vec<String> {
    let mut lines = Vec::new();
    for name in book.exercises() {
        let Some(set) = book.get(name) else {
            continue;
        };
        lines.push(format!(
            "#{name} ({} {})",
            set.rules.len(),
            pluralize("rule", set.rules.len())
        ));
        lines.extend(set.rules.iter().map(describe_rule));
    }
    lines
}

fn describe_rule(rule: &AngleRule) -> String {
    format!(
        "  {:<16} angle({}) {}  flag [{}]  \"{}\"",
        rule.name,
        format_joints(rule.joints.indices()),
        rule.predicate,
        format_joints(rule.flag.iter().copied()),
        rule.message
    )
}
