//! Terminal helpers.

pub mod input;
pub mod progress;
