use std::fmt;

use crate::context::{OutputFlags, RunContext};
use crate::errors::{Aborted, CaseResult};
use crate::output::Channel;
use crate::summary::{CaseSummary, RepeatedCaseSummary};
use crate::timer::elapsed;

use super::report;

pub type CaseBody = Box<dyn FnMut(&mut RunContext) -> CaseResult>;

/// Result of running one [`Case`].
#[derive(Debug, Clone, PartialEq)]
pub enum CaseOutcome {
    Single(CaseSummary),
    Repeated(RepeatedCaseSummary),
}

impl CaseOutcome {
    pub fn summary(&self) -> &CaseSummary {
        match self {
            CaseOutcome::Single(summary) => summary,
            CaseOutcome::Repeated(repeated) => &repeated.case,
        }
    }
}

/// A named block of assertions, optionally repeated.
pub struct Case {
    name: String,
    iterations: Option<u32>,
    body: CaseBody,
}

impl Case {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: FnMut(&mut RunContext) -> CaseResult + 'static,
    {
        Self {
            name: name.into(),
            iterations: None,
            body: Box::new(body),
        }
    }

    /// A case whose body runs `iterations` times with accumulated counters.
    pub fn repeated<F>(name: impl Into<String>, iterations: u32, body: F) -> Self
    where
        F: FnMut(&mut RunContext) -> CaseResult + 'static,
    {
        Self {
            name: name.into(),
            iterations: Some(iterations),
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the case. `Ok(None)` means a repeated case with zero iterations.
    pub fn run(&mut self, ctx: &mut RunContext) -> Result<Option<CaseOutcome>, Aborted> {
        match self.iterations {
            None => run_case(ctx, &self.name, &mut self.body).map(|s| Some(CaseOutcome::Single(s))),
            Some(iterations) => run_case_repeated(ctx, &self.name, &mut self.body, iterations)
                .map(|s| s.map(CaseOutcome::Repeated)),
        }
    }
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("name", &self.name)
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

fn announce(ctx: &mut RunContext, name: &str) {
    if ctx.shows(OutputFlags::CASE_OUTPUT) {
        ctx.emit(Channel::Normal, &format!("RUN_CASE: {name}"));
    }
}

/// Runs one case with fresh counters and reports its summary.
pub fn run_case<F>(ctx: &mut RunContext, name: &str, body: F) -> Result<CaseSummary, Aborted>
where
    F: FnOnce(&mut RunContext) -> CaseResult,
{
    announce(ctx, name);
    ctx.reset();
    let start = ctx.tick();
    body(ctx)?;
    let end = ctx.tick();

    let summary = CaseSummary {
        name: name.to_string(),
        count: ctx.count(),
        pass: ctx.pass(),
        elapsed_micros: elapsed(start, end),
    };
    report(ctx, summary.passed(), OutputFlags::CASE_OUTPUT, &summary.to_string());
    Ok(summary)
}

/// Runs a case body `iterations` times without resetting counters between
/// iterations, tracking best, worst and average iteration time.
pub fn run_case_repeated<F>(
    ctx: &mut RunContext,
    name: &str,
    mut body: F,
    iterations: u32,
) -> Result<Option<RepeatedCaseSummary>, Aborted>
where
    F: FnMut(&mut RunContext) -> CaseResult,
{
    if iterations == 0 {
        return Ok(None);
    }

    announce(ctx, name);
    ctx.reset();
    let mut best = u64::MAX;
    let mut worst = 0;
    // Each iteration ends on the tick the next one starts from, so the
    // intervals add up to the total elapsed time.
    let start = ctx.tick();
    let mut begin = start;
    for _ in 0..iterations {
        body(ctx)?;
        let now = ctx.tick();
        let interval = elapsed(begin, now);
        worst = worst.max(interval);
        best = best.min(interval);
        begin = now;
    }
    let total = elapsed(start, begin);

    let summary = RepeatedCaseSummary {
        case: CaseSummary {
            name: name.to_string(),
            count: ctx.count(),
            pass: ctx.pass(),
            elapsed_micros: total,
        },
        iterations,
        best_micros: best,
        worst_micros: worst,
        average_micros: total / u64::from(iterations),
    };
    report(ctx, summary.passed(), OutputFlags::CASE_OUTPUT, &summary.to_string());
    Ok(Some(summary))
}
