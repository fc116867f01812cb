//! Styled terminal output helpers for status lines and the run summary.

use decant_core::{display_name, format_bytes, format_duration, BatchSummary, ConversionResult};
use owo_colors::OwoColorize;
use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

/// Print a heading with a separator line.
pub fn print_heading(text: &str) {
    println!("{}", "=".repeat(50).blue());
    println!("{}", text.bold());
    println!("{}", "=".repeat(50).blue());
}

/// Print an info line with a colored label.
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("{}: {}", label.cyan(), value);
}

/// Print a success message with green styling.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a warning with yellow styling.
pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message.yellow());
}

/// Print an error message with red styling to stderr.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print the status line for one finished job.
pub fn print_job_result(index: usize, total: usize, result: &ConversionResult) {
    let source = display_name(&result.job.source);
    match &result.outcome {
        Ok(stats) => {
            println!(
                "{} [{}/{}] {} -> {} ({} -> {}, {})",
                "✓".green(),
                index,
                total,
                source,
                display_name(&result.job.dest).bold(),
                format_bytes(stats.input_size),
                format_bytes(stats.output_size),
                format_duration(stats.elapsed),
            );
        }
        Err(e) => {
            println!("{} [{}/{}] {}: {}", "✗".red().bold(), index, total, source, e);
        }
    }
}

/// Print the final summary block for a run.
pub fn print_summary(summary: &BatchSummary, output_dir: &Path, elapsed: Duration) {
    println!("{}", "=".repeat(50).blue());

    let succeeded = summary.succeeded();
    let failed = summary.failed();
    println!(
        "Completed: {} succeeded, {} failed, {} skipped",
        succeeded.to_string().green().bold(),
        if failed > 0 {
            failed.to_string().red().bold().to_string()
        } else {
            failed.to_string()
        },
        summary.skipped,
    );

    if failed > 0 {
        println!("{}", "Failed files:".red());
        for result in summary.failures() {
            if let Err(e) = &result.outcome {
                println!("  {}: {}", display_name(&result.job.source), e);
            }
        }
    }

    let bytes_in: u64 = summary
        .results
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok())
        .map(|s| s.input_size)
        .sum();
    let bytes_out: u64 = summary
        .results
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok())
        .map(|s| s.output_size)
        .sum();
    if succeeded > 0 {
        print_info(
            "Converted",
            format!("{} -> {}", format_bytes(bytes_in), format_bytes(bytes_out)),
        );
    }

    print_info("Output saved to", output_dir.display());
    print_info("Total time", format_duration(elapsed));
}
