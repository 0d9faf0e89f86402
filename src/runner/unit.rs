use crate::context::{OutputFlags, RunContext};
use crate::errors::{Aborted, CaseResult};
use crate::output::Channel;
use crate::summary::UnitSummary;
use crate::timer::elapsed;

use super::{report, Case, RULE};

/// An ordered list of cases reported as one block.
#[derive(Debug)]
pub struct Unit {
    name: String,
    cases: Vec<Case>,
}

impl Unit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    pub fn case<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: FnMut(&mut RunContext) -> CaseResult + 'static,
    {
        self.cases.push(Case::new(name, body));
        self
    }

    pub fn repeated_case<F>(mut self, name: impl Into<String>, iterations: u32, body: F) -> Self
    where
        F: FnMut(&mut RunContext) -> CaseResult + 'static,
    {
        self.cases.push(Case::repeated(name, iterations, body));
        self
    }

    pub fn push(&mut self, case: Case) {
        self.cases.push(case);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn run(&mut self, ctx: &mut RunContext) -> Result<UnitSummary, Aborted> {
        run_unit(ctx, &self.name, &mut self.cases)
    }
}

/// Runs `cases` in order and sums their counters into a unit summary.
///
/// A soft failure in one case does not stop the others.
pub fn run_unit(
    ctx: &mut RunContext,
    name: &str,
    cases: &mut [Case],
) -> Result<UnitSummary, Aborted> {
    let banners = ctx.shows(OutputFlags::UNIT_OUTPUT);
    if banners {
        ctx.emit(Channel::Normal, RULE);
        ctx.emit(Channel::Normal, &format!("RUN_UNIT: {name}"));
    }

    let start = ctx.tick();
    let mut count = 0;
    let mut pass = 0;
    for case in cases.iter_mut() {
        // Counters are read before the next case resets them.
        if case.run(ctx)?.is_some() {
            count += ctx.count();
            pass += ctx.pass();
        }
    }
    let end = ctx.tick();

    let summary = UnitSummary {
        name: name.to_string(),
        cases: cases.len(),
        count,
        pass,
        elapsed_micros: elapsed(start, end),
    };
    report(ctx, summary.passed(), OutputFlags::UNIT_OUTPUT, &summary.to_string());
    if banners {
        ctx.emit(Channel::Normal, RULE);
    }
    Ok(summary)
}
