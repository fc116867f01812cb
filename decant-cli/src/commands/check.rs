//! `--check` mode: verify external dependency availability without touching
//! any input files.

use crate::output;
use owo_colors::OwoColorize;

/// Probes every dependency and reports pass/fail per entry.
///
/// Returns the process exit code: 0 when everything is available, 1 when
/// anything is missing.
pub fn run_check() -> i32 {
    output::print_heading("Dependency check");

    let statuses = decant_core::verify_dependencies();
    let mut all_ok = true;

    for status in &statuses {
        let label = format!("{} ({})", status.name, status.purpose);
        if status.available {
            match &status.detail {
                Some(detail) => output::print_success(&format!("{label}: {detail}")),
                None => output::print_success(&label),
            }
        } else {
            all_ok = false;
            let detail = status.detail.as_deref().unwrap_or("not found");
            println!("{} {}: {}", "✗".red().bold(), label, detail);
        }
    }

    if all_ok {
        output::print_success("All dependencies are available.");
        0
    } else {
        output::print_warning("Some dependencies are missing; the affected conversions will fail.");
        1
    }
}
