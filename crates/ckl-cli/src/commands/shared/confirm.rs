use std::io::{self, BufRead, Write};

/// Ask `question` and read one line; only `yes` (any case) confirms.
pub fn ask<R: BufRead, W: Write>(question: &str, input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "{question} Type 'yes' to confirm: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("yes"))
}

/// Skip the prompt when `--yes` was passed, otherwise ask on the terminal.
pub fn confirm(question: &str, yes: bool) -> anyhow::Result<bool> {
    if yes {
        return Ok(true);
    }
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stderr();
    Ok(ask(question, &mut input, &mut out)?)
}
