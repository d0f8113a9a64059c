//! Console helpers shared by the binary and the report printer.

use owo_colors::OwoColorize;

/// Whether colored output is allowed for this process.
pub fn colors_enabled(requested: bool) -> bool {
    requested && std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix(color: bool) -> String {
    if colors_enabled(color) {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix(color: bool) -> String {
    if colors_enabled(color) {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}
