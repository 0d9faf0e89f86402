//! Hierarchical runners: assertions roll up into cases, cases into units and
//! units into a single entry point.
//!
//! A hard assertion failure surfaces as `Err(Aborted)` and is passed straight
//! up with `?`; no summary above the failing case is produced.

pub mod case;
pub mod entry;
pub mod unit;

pub use case::{run_case, run_case_repeated, Case, CaseBody, CaseOutcome};
pub use entry::{exit_status, run_entry, Entry};
pub use unit::{run_unit, Unit};

use crate::context::{OutputFlags, RunContext};
use crate::output::Channel;

const RULE: &str = "==========================================================";

/// Failures are always reported; successes only when `flag` is enabled.
fn report(ctx: &mut RunContext, passed: bool, flag: OutputFlags, line: &str) {
    if !passed {
        ctx.emit(Channel::Warning, line);
    } else if ctx.shows(flag) {
        ctx.emit(Channel::Normal, line);
    }
}
