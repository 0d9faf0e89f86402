//! The command-line boundary of a harness binary.
//!
//! This is the only place where a run is turned into a process exit code and
//! where an abort is rendered as a `miette` report.

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;

use crate::cli::args::HarnessCli;
use crate::cli::output::StdoutSink;
use crate::config::HarnessConfig;
use crate::context::RunContext;
use crate::runner::{exit_status, Entry};

pub mod args;
pub mod output;

/// Parses harness flags and runs `entry` on stdout.
pub fn run(entry: Entry) -> ExitCode {
    ExitCode::from(status_from(entry, std::env::args_os()))
}

/// Runs `entry` on stdout with an explicit configuration.
pub fn run_with_config(entry: Entry, config: &HarnessConfig) -> ExitCode {
    ExitCode::from(execute(entry, config))
}

/// Parses `args` as harness flags, runs `entry` and returns the exit status.
pub fn status_from<I, T>(entry: Entry, args: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = HarnessCli::parse_from(args);
    execute(entry, &cli.harness.to_config())
}

fn execute(mut entry: Entry, config: &HarnessConfig) -> u8 {
    let mut ctx = RunContext::from_config(config, StdoutSink::new(config.color_choice()));
    let result = entry.run(&mut ctx);
    if let Err(aborted) = &result {
        eprintln!("{:?}", miette::Report::new(aborted.clone()));
    }
    exit_status(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ABORT_STATUS, FAILURE_STATUS};
    use crate::runner::Unit;
    use crate::{expect, require};

    fn entry(passing: bool) -> Entry {
        Entry::new().unit(Unit::new("cli").case("c", move |t| {
            expect!(t, passing);
            Ok(())
        }))
    }

    #[test]
    fn status_follows_the_run() {
        assert_eq!(status_from(entry(true), ["bin", "--color", "never"]), 0);
        assert_eq!(status_from(entry(false), ["bin", "--color", "never"]), FAILURE_STATUS);
    }

    #[test]
    fn abort_maps_to_its_status() {
        let aborting = Entry::new().unit(Unit::new("cli").case("c", |t| {
            require!(t, false);
            Ok(())
        }));
        assert_eq!(status_from(aborting, ["bin", "--color", "never"]), ABORT_STATUS);
    }

    #[test]
    fn explicit_config_skips_parsing() {
        let config = HarnessConfig {
            color: crate::config::ColorMode::Never,
            ..HarnessConfig::default()
        };
        assert_eq!(execute(entry(true), &config), 0);
    }
}
