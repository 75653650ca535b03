//! Progress display for long-running searches

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::io::configuration::PROGRESS_UPDATE_INTERVAL;

/// Spinner-based progress display for search runs
///
/// The spinner refreshes only every [`PROGRESS_UPDATE_INTERVAL`] steps so
/// display cost stays negligible next to the search itself.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a progress display with a steadily ticking spinner
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Announce the puzzle file being solved
    pub fn start_file(&self, path: &Path) {
        self.bar.set_message(format!("Solving {}", path.display()));
    }

    /// Refresh the step and placement counters
    pub fn update_steps(&self, steps: u64, placed: usize) {
        if steps % PROGRESS_UPDATE_INTERVAL == 0 {
            self.bar
                .set_message(format!("{steps} steps, {placed} pieces on board"));
        }
    }

    /// Print a per-file summary line above the spinner
    pub fn finish_file(&self, summary: &str) {
        self.bar.println(summary);
    }

    /// Remove the spinner once all files are processed
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}
