//! Pure formatting functions for UI output.
//!
//! Styling goes through `console`, which drops colours when the stream is
//! not a terminal. Diagnostics go to stderr so stdout carries only the
//! requested output.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::orchestration::WorkflowResult;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Lines describing how a version was derived, without styling
///
/// # Arguments
/// * `result` - Outcome of the version workflow
pub fn resolution_lines(result: &WorkflowResult) -> Vec<String> {
    let mut lines = vec![
        format!("Version:  {}", result.version),
        format!("Strategy: {}", result.strategy),
    ];

    if let Some(state) = &result.state {
        lines.push(format!("Tag:      {}", state.tag));
        lines.push(format!("Commits:  {}", state.commits));
        lines.push(format!("Branch:   {}", state.refs.branch));
        lines.push(format!("Hash:     {}", state.refs.hash));
        lines.push(format!(
            "Dirty:    {}",
            if state.dirty { "yes" } else { "no" }
        ));
    }

    lines
}

/// Display how a version was derived.
pub fn display_resolution(result: &WorkflowResult) {
    eprintln!("\n{}", style("Version resolution:").bold());
    for line in resolution_lines(result) {
        eprintln!("  {}", line);
    }
}
