//! Utility functions for terminal output formatting
//!
//! Consistent colored output for progress, success, warning, and error
//! messages.

use colored::*;
use std::io::{self, Write};

use crate::constants::HEADER_SEPARATOR_WIDTH;

/// Displays a progress message without a trailing newline so it can be
/// overwritten by the matching success or error message.
pub fn print_progress(message: &str) {
    print!("{} {}", "⏳".yellow(), message);
    let _ = io::stdout().flush();
}

/// Displays a success message with a green checkmark, overwriting any
/// pending progress message on the same line.
pub fn print_success(message: &str) {
    println!("\r{} {}", "✓".green(), message);
}

/// Displays a warning message with a yellow marker.
pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow(), message.yellow());
}

/// Displays an error message with a red X mark.
pub fn print_error(message: &str) {
    println!("\r{} {}", "✗".red(), message);
}

/// Creates a section header with title and separator line.
pub fn section_header(title: &str) -> String {
    let title_formatted = title.bright_cyan().bold();
    let separator = "=".repeat(HEADER_SEPARATOR_WIDTH).bright_blue();
    format!("{title_formatted}\n{separator}")
}
