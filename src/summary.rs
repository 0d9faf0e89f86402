//! Result summaries produced at case, unit and entry level.

use std::fmt;

use crate::errors::FAILURE_STATUS;
use crate::timer::format_millis;

/// Pass percentage, pinned to 100 for cases with fewer than two assertions.
pub fn pass_percent(pass: u32, count: u32) -> f64 {
    if count > 1 {
        f64::from(pass) * 100.0 / f64::from(count)
    } else {
        100.0
    }
}

fn status(passed: bool) -> &'static str {
    if passed {
        "PASSED"
    } else {
        "FAILED"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseSummary {
    pub name: String,
    pub count: u32,
    pub pass: u32,
    pub elapsed_micros: u64,
}

impl CaseSummary {
    pub fn passed(&self) -> bool {
        self.pass >= self.count
    }

    pub fn pass_percent(&self) -> f64 {
        pass_percent(self.pass, self.count)
    }
}

impl fmt::Display for CaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  CASE {}: {} {}/{} ({:.2}%) in {}",
            self.name,
            status(self.passed()),
            self.pass,
            self.count,
            self.pass_percent(),
            format_millis(self.elapsed_micros)
        )
    }
}

/// A case run several times; counters accumulate across iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatedCaseSummary {
    pub case: CaseSummary,
    pub iterations: u32,
    pub best_micros: u64,
    pub worst_micros: u64,
    pub average_micros: u64,
}

impl RepeatedCaseSummary {
    pub fn passed(&self) -> bool {
        self.case.passed()
    }
}

impl fmt::Display for RepeatedCaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x{} (best {}, worst {}, average {})",
            self.case,
            self.iterations,
            format_millis(self.best_micros),
            format_millis(self.worst_micros),
            format_millis(self.average_micros)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitSummary {
    pub name: String,
    pub cases: usize,
    pub count: u32,
    pub pass: u32,
    pub elapsed_micros: u64,
}

impl UnitSummary {
    pub fn passed(&self) -> bool {
        self.pass >= self.count
    }

    pub fn pass_percent(&self) -> f64 {
        pass_percent(self.pass, self.count)
    }
}

impl fmt::Display for UnitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UNIT {}: {} {}/{} ({:.2}%) in {}",
            self.name,
            status(self.passed()),
            self.pass,
            self.count,
            self.pass_percent(),
            format_millis(self.elapsed_micros)
        )
    }
}

/// Totals of a completed entry run.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySummary {
    pub units: Vec<UnitSummary>,
    pub elapsed_micros: u64,
    /// Copy of the context's permanent failure flag at completion.
    pub passed: bool,
}

impl EntrySummary {
    pub fn count(&self) -> u32 {
        self.units.iter().map(|u| u.count).sum()
    }

    pub fn pass(&self) -> u32 {
        self.units.iter().map(|u| u.pass).sum()
    }

    /// Process exit status for this run.
    pub fn status(&self) -> u8 {
        if self.passed {
            0
        } else {
            FAILURE_STATUS
        }
    }
}

impl fmt::Display for EntrySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALL TESTS FINISHED: {}", status(self.passed))
    }
}
