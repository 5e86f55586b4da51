//! Terminal implementation of the [`Prompt`] port.
//!
//! `confirm` prints the question followed by `[y/N]` and reads one line;
//! only `y` or `yes` (any case) counts as consent.  `alert` prints the
//! message on its own line.  Both are generic over the reader and writer so
//! tests can drive them with in-memory buffers.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::application::ports::Prompt;

pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, message: &str) -> io::Result<bool> {
        write!(self.output, "{message} [y/N] ")?;
        self.output.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        let answer = answer.trim().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        // An unreadable terminal declines.
        self.ask(message).unwrap_or_else(|e| {
            warn!("confirmation prompt failed: {e}");
            false
        })
    }

    fn alert(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{message}") {
            warn!("could not show alert: {e}");
        }
    }
}
