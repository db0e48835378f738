// Colored terminal output for predictions and training reports.
//
// The main.rs command handlers delegate here so formatting stays in one place.

use std::path::Path;

use colored::Colorize;

use crate::inference::{Label, PredictionResult};
use crate::training::metrics::Evaluation;
use crate::training::pipeline::TrainingOutcome;

use super::truncate_chars;

/// Display a single prediction.
pub fn display_prediction(input: &str, result: &PredictionResult) {
    println!();
    println!("  {} {}", "Input:".dimmed(), truncate_chars(input.trim(), 120));

    if let Some(err) = &result.error {
        println!("  {} {}", colorize_label(result.label), err);
        return;
    }

    println!(
        "  {} {}  ({:.1}% confidence)",
        "Verdict:".bold(),
        colorize_label(result.label),
        result.probability * 100.0
    );
    if let Some(processed) = &result.processed_text {
        println!(
            "  {} {}",
            "Tokens:".dimmed(),
            truncate_chars(processed, 120).dimmed()
        );
    }
}

/// Display the summary printed after `newscheck train`.
pub fn display_training_summary(outcome: &TrainingOutcome, model_dir: &Path) {
    println!("\n{}", "=== Training complete ===".bold());
    println!(
        "  Documents: {} train / {} test",
        outcome.train_size, outcome.test_size
    );
    println!("  Vocabulary: {} terms", outcome.vectorizer.vocabulary().len());
    println!(
        "  Optimizer: {} iterations, final loss {:.4}",
        outcome.classifier.iterations, outcome.classifier.final_loss
    );

    display_evaluation(&outcome.evaluation);

    println!("\n  Artifacts written to {}", model_dir.display());
}

/// Accuracy, per-class report and confusion matrix.
pub fn display_evaluation(eval: &Evaluation) {
    println!(
        "\n  {} {}",
        "Accuracy:".bold(),
        format!("{:.4}", eval.accuracy).cyan()
    );

    println!();
    println!(
        "  {:<8} {:>9} {:>9} {:>9} {:>9}",
        "".dimmed(),
        "precision".dimmed(),
        "recall".dimmed(),
        "f1-score".dimmed(),
        "support".dimmed(),
    );
    for report in &eval.reports {
        println!(
            "  {:<8} {:>9.2} {:>9.2} {:>9.2} {:>9}",
            report.class.as_str(),
            report.precision,
            report.recall,
            report.f1,
            report.support,
        );
    }

    // Rows are the true class, columns the predicted one
    let m = &eval.confusion.counts;
    println!("\n  {}", "Confusion matrix (rows = actual):".dimmed());
    println!("  {:<8} {:>8} {:>8}", "", "Real", "Fake");
    println!("  {:<8} {:>8} {:>8}", "Real", m[0][0], m[0][1]);
    println!("  {:<8} {:>8} {:>8}", "Fake", m[1][0], m[1][1]);
}

fn colorize_label(label: Label) -> colored::ColoredString {
    match label {
        Label::Fake => label.as_str().red().bold(),
        Label::Real => label.as_str().green().bold(),
        Label::Error => label.as_str().yellow(),
    }
}
