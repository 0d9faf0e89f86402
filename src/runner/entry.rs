use std::process::ExitCode;

use crate::config::HarnessConfig;
use crate::context::RunContext;
use crate::errors::Aborted;
use crate::output::Channel;
use crate::summary::EntrySummary;
use crate::timer::elapsed;

use super::Unit;

/// The top-level list of units; its completion decides the exit status.
///
/// ```no_run
/// use simpletest::{expect_eq, Entry, Unit};
///
/// fn main() -> std::process::ExitCode {
///     Entry::new()
///         .unit(Unit::new("math").case("sum", |t| {
///             expect_eq!(t, 4, 2 + 2);
///             Ok(())
///         }))
///         .main()
/// }
/// ```
#[derive(Debug, Default)]
pub struct Entry {
    units: Vec<Unit>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    pub fn push(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn run(&mut self, ctx: &mut RunContext) -> Result<EntrySummary, Aborted> {
        run_entry(ctx, &mut self.units)
    }

    /// Runs against `ctx` and reduces the outcome to an exit status.
    pub fn exit_status(&mut self, ctx: &mut RunContext) -> u8 {
        exit_status(&self.run(ctx))
    }

    /// Parses harness flags from the command line, runs on stdout and
    /// returns the process exit code.
    pub fn main(self) -> ExitCode {
        crate::cli::run(self)
    }

    /// Like [`Entry::main`] with an explicit configuration.
    pub fn main_with_config(self, config: &HarnessConfig) -> ExitCode {
        crate::cli::run_with_config(self, config)
    }
}

/// Runs every unit in order, then prints the overall result line.
pub fn run_entry(ctx: &mut RunContext, units: &mut [Unit]) -> Result<EntrySummary, Aborted> {
    let start = ctx.tick();
    let mut summaries = Vec::with_capacity(units.len());
    for unit in units.iter_mut() {
        summaries.push(unit.run(ctx)?);
    }
    let end = ctx.tick();

    let summary = EntrySummary {
        units: summaries,
        elapsed_micros: elapsed(start, end),
        passed: ctx.passed_ever(),
    };
    let channel = if summary.passed {
        Channel::Normal
    } else {
        Channel::Warning
    };
    ctx.emit(channel, &summary.to_string());
    Ok(summary)
}

/// `0` for a clean run, the failure status otherwise, or the abort's own
/// status if a hard assertion stopped the run.
pub fn exit_status(result: &Result<EntrySummary, Aborted>) -> u8 {
    match result {
        Ok(summary) => summary.status(),
        Err(aborted) => aborted.status,
    }
}
