//! Output formatting utilities

use colored::Colorize;

/// Color mode selected with `--color`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// Set up color output based on user preference
pub fn setup_colors(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        // colored already checks the terminal and NO_COLOR
        ColorMode::Auto => colored::control::unset_override(),
    }
}

/// Format an error for display, including its cause chain
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Format a `label: value` line
pub fn format_field(label: &str, value: impl std::fmt::Display) -> String {
    format!("{}: {}", label.cyan(), value)
}

/// Format a boolean result
pub fn format_bool(value: bool) -> String {
    if value {
        "true".green().to_string()
    } else {
        "false".yellow().to_string()
    }
}
