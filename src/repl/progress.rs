use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub const ANALYZING_MESSAGE: &str = "Analyzing... This may take a moment.";
pub const THINKING_MESSAGE: &str = "Thinking...";
pub const CHECKING_MESSAGE: &str = "Checking backend...";

/// Spinner shown while a request is outstanding. Draws to stderr and hides
/// itself when stderr is not a terminal.
pub struct LoadingIndicator {
    bar: ProgressBar,
}

impl LoadingIndicator {
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg} {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
