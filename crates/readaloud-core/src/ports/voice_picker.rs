//! Interactive choice port.
//!
//! Voice selection, download and removal each ask the user to pick from a
//! list. The adapter decides how: a terminal prompt, a GUI list, a fixed
//! answer in tests.

/// Presents a list of options and returns the chosen index.
pub trait VoicePicker: Send + Sync {
    /// `None` means the user dismissed the prompt.
    fn pick(&self, title: &str, options: &[String]) -> Option<usize>;
}
