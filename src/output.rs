//! Diagnostic output for the runners.
//!
//! Runners never print directly; they emit lines into an [`OutputSink`].
//! [`StdoutSink`] colors the outcome labels with `termcolor`, [`OutputBuffer`]
//! collects plain lines for tests and programmatic capture.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::results::Outcome;

pub trait OutputSink {
    fn emit(&mut self, line: &str);

    /// Emits `<label> <detail>` for a case outcome.
    fn emit_outcome(&mut self, outcome: Outcome, detail: &str) {
        self.emit(&format!("{} {}", outcome.label(), detail));
    }
}

/// OutputBuffer: collects emitted lines.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    lines: Vec<String>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn as_string(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// StdoutSink: writes to stdout, coloring outcome labels when enabled.
pub struct StdoutSink {
    stream: StandardStream,
}

impl StdoutSink {
    pub fn new(use_colors: bool) -> Self {
        let choice = if use_colors {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stream: StandardStream::stdout(choice),
        }
    }
}

fn outcome_color(outcome: Outcome) -> Color {
    match outcome {
        Outcome::Pass => Color::Green,
        Outcome::Fail => Color::Yellow,
        Outcome::Error => Color::Red,
    }
}

impl OutputSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        let _ = writeln!(self.stream, "{}", line);
    }

    fn emit_outcome(&mut self, outcome: Outcome, detail: &str) {
        let _ = self
            .stream
            .set_color(ColorSpec::new().set_fg(Some(outcome_color(outcome))).set_bold(true));
        let _ = write!(self.stream, "{}", outcome.label());
        let _ = self.stream.reset();
        let _ = writeln!(self.stream, " {}", detail);
    }
}
