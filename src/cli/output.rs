//! CLI output formatting

use crate::repo::PushOutcome;
use crate::secrets::SyncReport;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static SKIP: Emoji<'_, '_> = Emoji("⏭️  ", "- ");

/// Create a progress bar for a batch push
pub fn create_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    if let Ok(template) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        progress.set_style(template.progress_chars("#>-"));
    }
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// One line per pushed file
pub fn format_push_result(file: &str, outcome: Option<&PushOutcome>) -> String {
    match outcome {
        Some(outcome @ (PushOutcome::Created(_) | PushOutcome::Updated(_))) => format!(
            "{}{} {}",
            CHECK,
            style(file).bold(),
            style(outcome.label()).green()
        ),
        Some(outcome @ PushOutcome::Unchanged(_)) => format!(
            "{}{} {}",
            SKIP,
            style(file).bold(),
            style(outcome.label()).dim()
        ),
        None => format!("{}{} {}", CROSS, style(file).bold(), style("failed").red()),
    }
}

/// Summary of a secret sync
pub fn format_sync_report(report: &SyncReport) -> String {
    let mut lines = Vec::new();

    if report.is_empty() {
        lines.push(format!("{}No secure properties matched", INFO));
    }
    for name in &report.updated {
        lines.push(format!("{}{} {}", CHECK, style(name).bold(), style("updated").green()));
    }
    for name in &report.skipped_hardcoded {
        lines.push(format!(
            "{}{} {}",
            WARN,
            style(name).bold(),
            style("hardcoded in pipeline, left unchanged").yellow()
        ));
    }

    lines.join("\n")
}
