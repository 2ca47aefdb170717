//! Terminal output for subcommands
//!
//! Results go to stdout; logs and errors go to stderr.
//! Styling is dropped automatically when stdout is not a terminal.

use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Output handler for consistent CLI formatting
#[derive(Debug, Default)]
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    /// Print a plain line
    pub fn line(&self, message: &str) {
        println!("{message}");
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str) {
        println!("  {} {}", style(key).dim(), value);
    }

    /// Ask for user confirmation. Anything but y/yes (including EOF) is a no.
    pub fn confirm(&self, message: &str) -> Result<bool> {
        print!("{} {} (y/N): ", style("❯").cyan(), message);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;

        Ok(is_yes(&input))
    }
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
