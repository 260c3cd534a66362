//! Line-oriented terminal I/O for the shell.

use std::io::{self, BufRead, Write};

use anyhow::bail;

use super::menu::parse_id;

/// Reads answers from `input` and writes everything the shell prints to
/// `out`. Tests drive it with a `Cursor` and a `Vec<u8>`.
#[derive(Debug)]
pub struct Prompt<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub const fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Print `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Print `text` as is.
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    /// Print `question` and read one trimmed line. `None` at end of input.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        self.print(question)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`Self::ask`], but running out of input is an error.
    pub fn require(&mut self, question: &str) -> anyhow::Result<String> {
        match self.ask(question)? {
            Some(answer) => Ok(answer),
            None => bail!("input closed"),
        }
    }

    pub fn ask_id(&mut self, question: &str) -> anyhow::Result<u64> {
        let answer = self.require(question)?;
        parse_id(&answer)
    }

    /// Only `yes` (any case) confirms.
    pub fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        let answer = self.ask(&format!("{question} (yes/no): "))?;
        Ok(answer.is_some_and(|answer| answer.eq_ignore_ascii_case("yes")))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }
}
