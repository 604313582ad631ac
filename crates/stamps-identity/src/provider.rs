//! The login/logout boundary.

use std::io::{BufRead, Write};

use crate::identity::Identity;

#[derive(thiserror::Error, Debug)]
pub enum IdentityError {
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("decoding seed: {0}")]
    Decode(#[from] data_encoding::DecodeError),

    #[error("key rejected: {0}")]
    KeyRejected(String),

    #[error("invalid principal: '{0}'")]
    InvalidPrincipal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed identity file: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Issues identities after an interactive login and remembers active sessions.
pub trait IdentityProvider {
    /// Returns the identity of a session that is still active, if any.
    fn restore(&mut self) -> Result<Option<Identity>, IdentityError>;

    /// Runs the interactive login flow. Resolves to `None` when the user cancels.
    fn login(&mut self, prompt: &mut dyn LoginPrompt) -> Result<Option<Identity>, IdentityError>;

    /// Ends the active session, if any.
    fn logout(&mut self) -> Result<(), IdentityError>;
}

/// Asks the user yes/no questions during login.
pub trait LoginPrompt {
    fn confirm(&mut self, question: &str) -> std::io::Result<bool>;
}

/// A [`LoginPrompt`] on a line based terminal. Only `y` or `yes` (any case) confirms.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> LoginPrompt for TerminalPrompt<R, W> {
    fn confirm(&mut self, question: &str) -> std::io::Result<bool> {
        write!(self.output, "{question} [y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        let answer = answer.trim().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let answer = {
            let mut prompt = TerminalPrompt::new(input.as_bytes(), &mut output);
            prompt.confirm("Continue?").unwrap()
        };
        (answer, String::from_utf8(output).unwrap())
    }

    #[test]
    fn yes_confirms() {
        assert!(ask("y\n").0);
        assert!(ask("YES\n").0);
        assert!(ask("  yes  \n").0);
    }

    #[test]
    fn anything_else_cancels() {
        assert!(!ask("\n").0);
        assert!(!ask("n\n").0);
        assert!(!ask("sure\n").0);
        assert!(!ask("").0);
    }

    #[test]
    fn question_is_written() {
        assert_eq!(ask("n\n").1, "Continue? [y/N] ");
    }
}
