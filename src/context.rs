//! The run context threaded through every case, unit and entry.
//!
//! It owns the per-case counters, the permanent "has anything failed" flag,
//! the verbosity flags, the output sink and the clock. Nothing in the crate
//! keeps global state; everything reads and writes through this object.

use bitflags::bitflags;

use crate::assertion::{Assertion, Diagnostic, Label, Severity};
use crate::config::HarnessConfig;
use crate::errors::Aborted;
use crate::output::{Channel, OutputSink};
use crate::timer::{elapsed, Clock, MonotonicClock};

bitflags! {
    /// Which passing results are shown. Failures are always shown.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OutputFlags: u8 {
        /// Passing assertions.
        const TEST_OUTPUT = 0b0000_0001;
        /// Passing case summaries and case banners.
        const CASE_OUTPUT = 0b0000_0010;
        /// Passing unit summaries and unit banners.
        const UNIT_OUTPUT = 0b0000_0100;
    }
}

impl Default for OutputFlags {
    fn default() -> Self {
        if cfg!(feature = "debug-output") {
            OutputFlags::TEST_OUTPUT
        } else {
            OutputFlags::empty()
        }
    }
}

pub struct RunContext {
    total_passed_ever: bool,
    current_count: u32,
    current_pass: u32,
    flags: OutputFlags,
    assertion_timing: bool,
    output: Box<dyn OutputSink>,
    clock: Box<dyn Clock>,
}

impl RunContext {
    pub fn new(flags: OutputFlags, output: impl OutputSink + 'static) -> Self {
        Self {
            total_passed_ever: true,
            current_count: 0,
            current_pass: 0,
            flags,
            assertion_timing: false,
            output: Box::new(output),
            clock: Box::new(MonotonicClock::new()),
        }
    }

    pub fn from_config(config: &HarnessConfig, output: impl OutputSink + 'static) -> Self {
        Self::new(config.flags, output).with_assertion_timing(config.assertion_timing)
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Include each assertion's own elapsed time in its diagnostic.
    pub fn with_assertion_timing(mut self, enabled: bool) -> Self {
        self.assertion_timing = enabled;
        self
    }

    // ========================================================================
    // COUNTERS
    // ========================================================================

    /// Records one boolean outcome and returns it unchanged.
    pub fn evaluate(&mut self, outcome: bool) -> bool {
        self.current_count += 1;
        if outcome {
            self.current_pass += 1;
        } else {
            self.total_passed_ever = false;
        }
        outcome
    }

    /// Clears the case counters. The permanent failure flag is untouched.
    pub fn reset(&mut self) {
        self.current_count = 0;
        self.current_pass = 0;
    }

    pub fn count(&self) -> u32 {
        self.current_count
    }

    pub fn pass(&self) -> u32 {
        self.current_pass
    }

    /// `false` once any assertion in this run has failed.
    pub fn passed_ever(&self) -> bool {
        self.total_passed_ever
    }

    pub fn flags(&self) -> OutputFlags {
        self.flags
    }

    pub fn shows(&self, flag: OutputFlags) -> bool {
        self.flags.contains(flag)
    }

    // ========================================================================
    // SEVERITY HANDLING
    // ========================================================================

    /// Records an outcome and reports it according to `severity`.
    ///
    /// `describe` is only called when the assertion has to be printed.
    pub fn check(
        &mut self,
        severity: Severity,
        outcome: bool,
        elapsed_micros: Option<u64>,
        describe: impl FnOnce() -> Assertion,
    ) -> Result<bool, Aborted> {
        let outcome = self.evaluate(outcome);
        let label = Label::for_outcome(severity, outcome);
        if outcome && !self.shows(OutputFlags::TEST_OUTPUT) {
            return Ok(true);
        }

        let diagnostic = Diagnostic {
            sequence: self.current_count,
            label,
            outcome,
            elapsed_micros,
            assertion: describe(),
        };
        self.output.diagnostic(&diagnostic);

        match label {
            Label::Aborted => Err(Aborted::new(
                diagnostic.assertion.title,
                diagnostic.assertion.location,
            )),
            Label::Passed | Label::Failed => Ok(outcome),
        }
    }

    /// Soft assertion: failures are reported and execution continues.
    pub fn expect(
        &mut self,
        outcome: bool,
        elapsed_micros: Option<u64>,
        describe: impl FnOnce() -> Assertion,
    ) -> bool {
        self.check(Severity::Expect, outcome, elapsed_micros, describe)
            .unwrap_or(false)
    }

    /// Hard assertion: a failure is reported and returned as [`Aborted`].
    pub fn require(
        &mut self,
        outcome: bool,
        elapsed_micros: Option<u64>,
        describe: impl FnOnce() -> Assertion,
    ) -> Result<(), Aborted> {
        self.check(Severity::Require, outcome, elapsed_micros, describe)
            .map(|_| ())
    }

    // ========================================================================
    // CLOCK AND OUTPUT
    // ========================================================================

    pub fn tick(&self) -> u64 {
        self.clock.now_micros()
    }

    /// Elapsed time since `start`, if per-assertion timing is enabled.
    pub fn since(&self, start: u64) -> Option<u64> {
        self.assertion_timing
            .then(|| elapsed(start, self.clock.now_micros()))
    }

    pub fn emit(&mut self, channel: Channel, text: &str) {
        self.output.emit(channel, text);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::assertion::Location;
    use crate::cli::output::OutputBuffer;
    use crate::output::NullSink;
    use crate::timer::SteppingClock;

    fn describe() -> Assertion {
        Assertion {
            title: "expect!(flag)".to_string(),
            location: Location::new("src/context.rs", "tests", 1),
            expression: "flag".to_string(),
            values: None,
            texts: None,
            relation: "",
            message: None,
        }
    }

    #[test]
    fn evaluate_counts_passes_and_failures() {
        let mut ctx = RunContext::new(OutputFlags::empty(), NullSink);
        assert!(ctx.evaluate(true));
        assert!(!ctx.evaluate(false));
        assert!(ctx.evaluate(true));
        assert_eq!(ctx.count(), 3);
        assert_eq!(ctx.pass(), 2);
        assert!(!ctx.passed_ever());
    }

    #[test]
    fn reset_keeps_failure_flag() {
        let mut ctx = RunContext::new(OutputFlags::empty(), NullSink);
        ctx.evaluate(false);
        ctx.reset();
        assert_eq!((ctx.count(), ctx.pass()), (0, 0));
        assert!(!ctx.passed_ever());
        ctx.evaluate(true);
        assert!(!ctx.passed_ever());
    }

    #[test]
    fn soft_failure_reports_and_continues() {
        let buffer = Rc::new(RefCell::new(OutputBuffer::new()));
        let mut ctx = RunContext::new(OutputFlags::empty(), buffer.clone());
        assert!(!ctx.expect(false, None, describe));
        assert!(ctx.expect(true, None, describe));

        let buffer = buffer.borrow();
        let lines = buffer.lines_on(Channel::Warning);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("  [1] context.rs:tests:1: FAILED"));
        assert!(buffer.lines_on(Channel::Debug).is_empty());
    }

    #[test]
    fn hard_failure_returns_aborted() {
        let buffer = Rc::new(RefCell::new(OutputBuffer::new()));
        let mut ctx = RunContext::new(OutputFlags::empty(), buffer.clone());
        let err = ctx.require(false, None, describe).unwrap_err();
        assert_eq!(err.title, "expect!(flag)");
        assert_eq!(err.location.line, 1);
        assert!(buffer.borrow().as_str().contains("ABORTED"));
    }

    #[test]
    fn passing_assertions_shown_only_with_test_output() {
        let buffer = Rc::new(RefCell::new(OutputBuffer::new()));
        let mut ctx = RunContext::new(OutputFlags::TEST_OUTPUT, buffer.clone());
        ctx.require(true, None, describe).unwrap();
        let buffer = buffer.borrow();
        assert_eq!(buffer.lines_on(Channel::Debug).len(), 1);
        assert!(buffer.as_str().contains("PASSED"));
    }

    #[test]
    fn assertion_timing_is_optional() {
        let ctx = RunContext::new(OutputFlags::empty(), NullSink).with_clock(SteppingClock::new(7));
        let start = ctx.tick();
        assert_eq!(ctx.since(start), None);

        let ctx = ctx.with_assertion_timing(true);
        let start = ctx.tick();
        assert_eq!(ctx.since(start), Some(7));
    }

    #[test]
    fn default_flags_follow_debug_feature() {
        let flags = OutputFlags::default();
        assert_eq!(
            flags.contains(OutputFlags::TEST_OUTPUT),
            cfg!(feature = "debug-output")
        );
    }
}
