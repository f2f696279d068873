//! User input utilities for interactive command-line prompts.

use std::io::{self, Write};

use anyhow::{Context, Result};
use readaloud_core::VoicePicker;
use tracing::warn;

/// Prompts the user for a string input.
///
/// The input is read from stdin and returned with whitespace trimmed.
pub fn prompt_string(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush().context("Failed to flush prompt")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read user input")?;

    Ok(input.trim().to_string())
}

/// Result of interpreting one line typed at a numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAnswer {
    /// Zero-based index of the chosen option.
    Chosen(usize),
    Cancelled,
    Invalid,
}

/// Interpret a 1-based menu answer. Blank input, `q` and `quit` cancel.
pub fn parse_menu_answer(input: &str, option_count: usize) -> MenuAnswer {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return MenuAnswer::Cancelled;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=option_count).contains(&n) => MenuAnswer::Chosen(n - 1),
        _ => MenuAnswer::Invalid,
    }
}

/// Numbered-menu picker on stdin/stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPicker;

impl VoicePicker for TerminalPicker {
    fn pick(&self, title: &str, options: &[String]) -> Option<usize> {
        println!("{title}:");
        for (i, option) in options.iter().enumerate() {
            println!("  {:>3}) {option}", i + 1);
        }

        loop {
            let input = match prompt_string(&format!("Choose 1-{} (blank to cancel)", options.len())) {
                Ok(input) => input,
                Err(e) => {
                    warn!(error = %e, "Prompt aborted");
                    return None;
                }
            };
            match parse_menu_answer(&input, options.len()) {
                MenuAnswer::Chosen(index) => return Some(index),
                MenuAnswer::Cancelled => return None,
                MenuAnswer::Invalid => {
                    eprintln!("Please enter a number between 1 and {}.", options.len());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_answers() {
        assert_eq!(parse_menu_answer("2", 3), MenuAnswer::Chosen(1));
        assert_eq!(parse_menu_answer(" 1 \n", 1), MenuAnswer::Chosen(0));
        assert_eq!(parse_menu_answer("", 3), MenuAnswer::Cancelled);
        assert_eq!(parse_menu_answer("Q", 3), MenuAnswer::Cancelled);
        assert_eq!(parse_menu_answer("0", 3), MenuAnswer::Invalid);
        assert_eq!(parse_menu_answer("4", 3), MenuAnswer::Invalid);
        assert_eq!(parse_menu_answer("amy", 3), MenuAnswer::Invalid);
    }
}
