use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinners for the slow steps (reading and writing files).
///
/// Disabled managers hand out hidden bars so callers never branch.
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.set_message(message.to_string());
        pb
    }
}

/// Clears a spinner once its step is over; the outcome is reported by the formatter.
pub fn finish_spinner(pb: &ProgressBar) {
    pb.finish_and_clear();
}
