//! Spinner helpers for long-running commands

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a ticking spinner with `message`
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Stop and erase the spinner
pub fn complete_spinner_and_clear(spinner: ProgressBar) {
    spinner.finish_and_clear();
}

/// Stop the spinner, leaving an error line in its place
pub fn complete_spinner_error(spinner: ProgressBar, message: &str) {
    spinner.abandon_with_message(format!("✗ {message}"));
}
