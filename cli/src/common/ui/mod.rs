//! # COESI UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Everything the commands show to the operator goes through the `Reporter`
//! trait. Handlers receive a `&mut dyn Reporter`, so tests can inject a
//! recording sink with a scripted confirmation answer instead of patching a
//! global console.
//!
//! `Console` is the terminal implementation:
//! - headings, warnings and errors are styled with `colored`
//! - tables are rendered with `comfy-table`
//! - confirmations use `dialoguer::Confirm`, defaulting to "no". When stdin is
//!   not a terminal the answer is read as one line from stdin instead, so
//!   `echo y | coesi clean` works
//!
//! Diagnostics for developers go to `tracing`, not through this trait.
//!
use crate::core::error::Result;
use anyhow::Context;
use colored::Colorize;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use dialoguer::Confirm;
use std::io::{self, BufRead, IsTerminal, Write};

/// Output sink for user-facing messages.
pub trait Reporter {
    /// A section heading, e.g. `=== Deployment Status ===`.
    fn heading(&mut self, text: &str);
    /// A plain line. An empty string prints a blank line.
    fn line(&mut self, text: &str);
    fn success(&mut self, text: &str);
    fn warning(&mut self, text: &str);
    fn error(&mut self, text: &str);
    /// A table with a header row.
    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]);
    /// Asks a yes/no question. Declining returns `Ok(false)`.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Terminal reporter writing to stdout (errors to stderr).
#[derive(Debug, Default)]
pub struct Console;

impl Reporter for Console {
    fn heading(&mut self, text: &str) {
        println!("{}", format!("=== {} ===", text).blue().bold());
    }

    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn success(&mut self, text: &str) {
        println!("{} {}", "Success:".green(), text);
    }

    fn warning(&mut self, text: &str) {
        println!("{} {}", "Warning:".yellow(), text);
    }

    fn error(&mut self, text: &str) {
        eprintln!("{} {}", "Error:".red(), text);
    }

    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(headers.to_vec());
        for row in rows {
            table.add_row(row.clone());
        }
        println!("{table}");
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        if !io::stdin().is_terminal() {
            print!("{} [y/N]: ", prompt);
            io::stdout().flush().context("Failed to flush stdout")?;
            let answer = read_answer(io::stdin().lock())?;
            println!();
            return Ok(answer);
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("Failed to get user input")
    }
}

/// Reads one line and accepts `y` or `yes` (any case). Anything else,
/// including end of input, declines.
fn read_answer<R: BufRead>(mut reader: R) -> Result<bool> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to get user input")?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// A reporter that records every message, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Recorder {
    /// Messages prefixed with their kind, e.g. `heading: Deploying COESI Platform`.
    pub messages: Vec<String>,
    /// Prompts that were asked.
    pub prompts: Vec<String>,
    /// Answer given to every confirmation.
    pub answer: bool,
}

#[cfg(test)]
impl Recorder {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Default::default()
        }
    }

    /// True when any recorded message contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

#[cfg(test)]
impl Reporter for Recorder {
    fn heading(&mut self, text: &str) {
        self.messages.push(format!("heading: {}", text));
    }

    fn line(&mut self, text: &str) {
        self.messages.push(format!("line: {}", text));
    }

    fn success(&mut self, text: &str) {
        self.messages.push(format!("success: {}", text));
    }

    fn warning(&mut self, text: &str) {
        self.messages.push(format!("warning: {}", text));
    }

    fn error(&mut self, text: &str) {
        self.messages.push(format!("error: {}", text));
    }

    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        self.messages.push(format!("table: {}", headers.join(" | ")));
        for row in rows {
            self.messages.push(format!("row: {}", row.join(" | ")));
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.prompts.push(prompt.to_string());
        Ok(self.answer)
    }
}
