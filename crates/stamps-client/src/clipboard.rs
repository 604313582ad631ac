//! Putting text on the user's clipboard.

use std::io::{self, Write};

use data_encoding::BASE64;

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> io::Result<()>;
}

/// Sets the system clipboard through the terminal with an OSC 52 escape sequence.
///
/// Works wherever the terminal emulator honours OSC 52, including over SSH.
pub struct Osc52Clipboard<W: Write> {
    terminal: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(terminal: W) -> Self {
        Self { terminal }
    }

    pub fn into_inner(self) -> W {
        self.terminal
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> io::Result<()> {
        write!(self.terminal, "\x1b]52;c;{}\x07", BASE64.encode(text.as_bytes()))?;
        self.terminal.flush()
    }
}

/// Keeps the last copied text in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> io::Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
