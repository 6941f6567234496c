//! Line sources for the overwrite prompt.
//!
//! Prompts go to stderr so stdout carries only rendered output.

use std::io::{self, BufRead, Write};

use packout_core::application::ports::LineSource;

/// Reads answers line by line from any buffered reader.
///
/// End of input is an error, which the confirmation gate treats as the user
/// cancelling.
pub struct ReaderLineSource<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> ReaderLineSource<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl ReaderLineSource<io::StdinLock<'static>, io::Stderr> {
    /// Read from the process's stdin, prompting on stderr.
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> LineSource for ReaderLineSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.prompt_out, "{prompt} ")?;
        self.prompt_out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line)
    }
}

/// Terminal prompt backed by `dialoguer`, with line editing.
#[cfg(feature = "interactive")]
#[derive(Debug, Default)]
pub struct DialoguerLineSource;

#[cfg(feature = "interactive")]
impl DialoguerLineSource {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "interactive")]
impl LineSource for DialoguerLineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .report(false)
            .interact_text()
            .map_err(io::Error::other)
    }
}
