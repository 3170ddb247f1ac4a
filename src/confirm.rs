//! Confirmation gating for destructive operations.
//!
//! Pruning asks before it acts unless the caller opts out. The gate is a
//! trait so tests and other frontends can script the answer.
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Yes/no gate consulted before destructive operations.
pub trait ConfirmationGate {
    /// Present `prompt` and return whether the operation may proceed.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Interactive gate reading the answer from stdin.
///
/// Accepts `y` or `yes` (ASCII case-insensitive); anything else denies.
#[derive(Debug, Default)]
pub struct StdinGate;

impl ConfirmationGate for StdinGate {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        print!("{prompt} [yN]: ");
        io::stdout().flush().context("flush confirmation prompt")?;
        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("read confirmation answer")?;
        let answer = answer.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }
}
