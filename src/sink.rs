//! Where the final diagram (or the failure message) goes.
//!
//! Inside a workflow, outputs are appended to the file named by `GITHUB_OUTPUT`
//! using the heredoc form `name<<DELIM\nvalue\nDELIM\n`, and failures are
//! printed as `::error::` workflow commands.

use crate::Result;

use anyhow::Context;
use std::fs::OpenOptions;
use std::io::{self, Stderr, Write};
use std::path::PathBuf;

pub const OUTPUT_NAME: &str = "mermaid";

const DELIMITER: &str = "MERMAID_EOF";

pub trait ResultSink {
    fn succeed(&mut self, diagram: &str) -> Result<()>;
    fn fail(&mut self, message: &str) -> Result<()>;
}

/// Sink for running as a GitHub Action.
pub struct ActionsSink<W: Write> {
    output_file: Option<PathBuf>,
    console: W,
}

impl<W: Write> ActionsSink<W> {
    /// With no output file (running outside a workflow) the diagram is
    /// printed to `console` instead.
    pub fn new(output_file: Option<PathBuf>, console: W) -> Self {
        Self {
            output_file,
            console,
        }
    }
}

impl<W: Write> ResultSink for ActionsSink<W> {
    fn succeed(&mut self, diagram: &str) -> Result<()> {
        let Some(path) = &self.output_file else {
            writeln!(self.console, "{diagram}")?;
            return Ok(());
        };

        let delim = delimiter_for(diagram);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open output file {}", path.display()))?;
        write!(file, "{OUTPUT_NAME}<<{delim}\n{diagram}\n{delim}\n")
            .with_context(|| format!("write output file {}", path.display()))?;
        Ok(())
    }

    fn fail(&mut self, message: &str) -> Result<()> {
        writeln!(self.console, "::error::{}", escape_command_data(message))?;
        Ok(())
    }
}

/// Sink for local runs: diagram to `out`, failures to `err` (stderr by
/// default) whatever the log level.
pub struct WriterSink<W: Write, E: Write = Stderr> {
    out: W,
    err: E,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self::with_errors(out, io::stderr())
    }
}

impl<W: Write, E: Write> WriterSink<W, E> {
    pub fn with_errors(out: W, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write, E: Write> ResultSink for WriterSink<W, E> {
    fn succeed(&mut self, diagram: &str) -> Result<()> {
        writeln!(self.out, "{diagram}")?;
        self.out.flush()?;
        Ok(())
    }

    fn fail(&mut self, message: &str) -> Result<()> {
        writeln!(self.err, "error: {message}")?;
        self.err.flush()?;
        Ok(())
    }
}

/// A delimiter line that does not occur in `value`.
fn delimiter_for(value: &str) -> String {
    let mut delim = DELIMITER.to_string();
    while value.lines().any(|line| line == delim) {
        delim.push('_');
    }
    delim
}

/// Workflow command data escaping: `%`, CR and LF.
fn escape_command_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
