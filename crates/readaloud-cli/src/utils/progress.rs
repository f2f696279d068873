//! Download progress bar.

use indicatif::{ProgressBar, ProgressStyle};

/// Terminal progress bar fed by download progress callbacks.
///
/// Nothing is drawn until the first update, so interactive prompts shown
/// before the download are not overwritten.
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl DownloadProgress {
    pub fn new(message: &str) -> Self {
        let mut bar = ProgressBar::new(0).with_message(message.to_string());
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
        ) {
            bar = bar.with_style(style.progress_chars("█▓░"));
        }
        Self { bar }
    }

    /// Progress callback: `(downloaded, total)` for the current file.
    pub fn update(&self, downloaded: u64, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(downloaded);
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
