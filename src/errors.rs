//! Error types surfaced by the harness.
//!
//! The only failure that leaves the normal flow of a run is a hard
//! (`require`-class) assertion. It travels up through the case, unit and entry
//! runners as [`Aborted`] and is turned into a process exit status at the
//! binary boundary.

use miette::Diagnostic;
use thiserror::Error;

use crate::assertion::Location;

/// Exit status used when a hard assertion stops the run.
pub const ABORT_STATUS: u8 = 1;

/// Exit status used when the run completes with at least one failure.
pub const FAILURE_STATUS: u8 = 1;

/// A hard assertion failed; nothing after it may run.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{title} aborted the run at {location}")]
#[diagnostic(
    code(simpletest::require),
    help("a `require` assertion failed; later assertions, cases and units were skipped")
)]
pub struct Aborted {
    pub title: String,
    pub location: Location,
    pub status: u8,
}

impl Aborted {
    pub fn new(title: impl Into<String>, location: Location) -> Self {
        Self {
            title: title.into(),
            location,
            status: ABORT_STATUS,
        }
    }
}

/// Result type returned by case bodies.
pub type CaseResult = Result<(), Aborted>;
