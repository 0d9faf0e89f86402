//! Handles all user-facing output for harness binaries.
//!
//! This module is responsible for colorizing output and rendering assertion
//! diagnostics, including line diffs for multi-line string mismatches.

// ============================================================================
// OUTPUT SINKS: OutputBuffer and StdoutSink implementations
// ============================================================================

use std::io::Write;

use difference::{Changeset, Difference};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::assertion::Diagnostic;
use crate::output::{Channel, OutputSink};

/// OutputBuffer: collects output in memory for tests or programmatic capture.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    pub buffer: String,
    entries: Vec<(Channel, String)>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, one entry per line joined with `\n`.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn entries(&self) -> &[(Channel, String)] {
        &self.entries
    }

    pub fn lines_on(&self, channel: Channel) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.entries.clear();
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, channel: Channel, text: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(text);
        self.entries.push((channel, text.to_string()));
    }
}

/// StdoutSink: writes to stdout, failures in red and passing checks dimmed.
pub struct StdoutSink {
    stdout: StandardStream,
}

impl StdoutSink {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

impl OutputSink for StdoutSink {
    fn emit(&mut self, channel: Channel, text: &str) {
        write_line(&mut self.stdout, channel, text);
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        write_diagnostic(&mut self.stdout, diagnostic);
    }
}

/// Writes one diagnostic, followed by a line diff when a failed string
/// assertion spans several lines.
pub fn write_diagnostic<W: WriteColor>(out: &mut W, diagnostic: &Diagnostic) {
    write_line(out, diagnostic.channel(), &diagnostic.to_string());
    if let Some((expected, actual)) = multiline_texts(diagnostic) {
        let changeset = Changeset::new(expected, actual, "\n");
        print_diff(out, &changeset.diffs);
        let _ = out.reset();
    }
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn write_line<W: WriteColor>(out: &mut W, channel: Channel, text: &str) {
    let _ = out.set_color(&channel_color(channel));
    let _ = writeln!(out, "{}", text);
    let _ = out.reset();
}

fn channel_color(channel: Channel) -> ColorSpec {
    let mut spec = ColorSpec::new();
    match channel {
        Channel::Normal => {}
        Channel::Warning => {
            spec.set_fg(Some(Color::Red));
        }
        Channel::Debug => {
            spec.set_dimmed(true);
        }
    }
    spec
}

/// Expected and actual strings of a failed string assertion, when either
/// side spans several lines.
fn multiline_texts(diagnostic: &Diagnostic) -> Option<(&str, &str)> {
    if diagnostic.outcome {
        return None;
    }
    let (expected, actual) = diagnostic.assertion.texts.as_ref()?;
    let multiline = expected.contains('\n') || actual.contains('\n');
    multiline.then_some((expected.as_str(), actual.as_str()))
}

fn print_diff<W: WriteColor>(out: &mut W, diffs: &[Difference]) {
    for diff in diffs {
        match diff {
            Difference::Same(ref x) => {
                let _ = out.reset();
                let _ = writeln!(out, "     {}", x);
            }
            Difference::Add(ref x) => {
                let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                let _ = writeln!(out, "    +{}", x);
            }
            Difference::Rem(ref x) => {
                let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                let _ = writeln!(out, "    -{}", x);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::{Assertion, Label, Location};
    use termcolor::Buffer;

    fn failed_with(texts: Option<(&str, &str)>) -> Diagnostic {
        let texts = texts.map(|(e, a)| (e.to_string(), a.to_string()));
        Diagnostic {
            sequence: 1,
            label: Label::Failed,
            outcome: false,
            elapsed_micros: None,
            assertion: Assertion {
                title: "expect_eq_str!(a, b)".to_string(),
                location: Location::new("x.rs", "x", 1),
                expression: "equal_strings(a, b)".to_string(),
                values: texts
                    .as_ref()
                    .map(|(e, a)| (format!("{e:?}"), format!("{a:?}"))),
                texts,
                relation: "==",
                message: None,
            },
        }
    }

    fn rendered(diagnostic: &Diagnostic) -> String {
        let mut out = Buffer::no_color();
        write_diagnostic(&mut out, diagnostic);
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn buffer_records_channels() {
        let mut buffer = OutputBuffer::new();
        buffer.emit(Channel::Normal, "one");
        buffer.emit(Channel::Warning, "two");
        assert_eq!(buffer.as_str(), "one\ntwo");
        assert_eq!(buffer.lines_on(Channel::Warning), vec!["two"]);
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn buffer_renders_diagnostics_on_their_channel() {
        let mut buffer = OutputBuffer::new();
        buffer.diagnostic(&failed_with(None));
        assert_eq!(buffer.lines_on(Channel::Warning).len(), 1);
        assert!(buffer.as_str().contains("FAILED"));
    }

    #[test]
    fn multiline_strings_are_diffed() {
        let text = rendered(&failed_with(Some(("a\nb", "a\nc"))));
        assert!(text.contains("\n     a\n"));
        assert!(text.contains("\n    -b\n"));
        assert!(text.ends_with("    +c\n"));
    }

    #[test]
    fn backslashes_survive_the_diff() {
        let text = rendered(&failed_with(Some(("C:\\new\nline", "C:\\new\nlane"))));
        assert!(text.contains("\n     C:\\new\n"));
        assert!(text.contains("\n    -line\n"));
        assert!(text.contains("\n    +lane\n"));
        assert!(!text.contains("    -new"));
    }

    #[test]
    fn single_line_and_non_string_values_are_not_diffed() {
        assert!(multiline_texts(&failed_with(Some(("a", "b")))).is_none());
        assert!(multiline_texts(&failed_with(None)).is_none());
        let mut passed = failed_with(Some(("a\nb", "a\nb")));
        passed.outcome = true;
        passed.label = Label::Passed;
        assert!(multiline_texts(&passed).is_none());
        assert_eq!(rendered(&passed).lines().count(), 5);
    }
}
