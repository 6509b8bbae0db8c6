//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use anyhow::Result;
use console::{style, Term};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_resolution, display_status,
    display_success, resolution_lines,
};

/// Whether a confirmation answer means yes
///
/// Accepts "y" or "yes", case-insensitive; anything else, including an
/// empty answer, is no.
pub fn is_affirmative(answer: &str) -> bool {
    let response = answer.trim().to_lowercase();
    response == "y" || response == "yes"
}

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Default is "no" if user presses Enter. When stderr is not a terminal
/// there is nobody to ask and the answer is no.
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise
/// * `Err` - If input error occurs
pub fn confirm_action(prompt: &str) -> Result<bool> {
    let term = Term::stderr();
    if !term.is_term() {
        return Ok(false);
    }

    term.write_str(&format!("\n{} {} ", prompt, style("(y/N):").dim()))?;
    let input = term.read_line()?;
    Ok(is_affirmative(&input))
}
