//! Defines the command-line flags understood by a harness binary.
//!
//! This module uses the `clap` crate with its "derive" feature. The flags are
//! meant to be `#[command(flatten)]`-ed into a binary's own argument struct.

use clap::{Args, Parser};

use crate::config::{ColorMode, HarnessConfig};
use crate::context::OutputFlags;

/// Verbosity and presentation flags shared by every harness binary.
#[derive(Debug, Clone, Default, Args)]
pub struct HarnessArgs {
    /// Show passing assertions.
    #[arg(long)]
    pub test_output: bool,

    /// Show passing case summaries.
    #[arg(long)]
    pub case_output: bool,

    /// Show unit banners and passing unit summaries.
    #[arg(long)]
    pub unit_output: bool,

    /// Shorthand for all three output flags.
    #[arg(short, long)]
    pub verbose: bool,

    /// Include each assertion's own elapsed time in its diagnostic.
    #[arg(long)]
    pub timing: bool,

    /// When to color output.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

impl HarnessArgs {
    pub fn to_config(&self) -> HarnessConfig {
        let mut flags = OutputFlags::default();
        if self.verbose {
            flags = OutputFlags::all();
        }
        if self.test_output {
            flags |= OutputFlags::TEST_OUTPUT;
        }
        if self.case_output {
            flags |= OutputFlags::CASE_OUTPUT;
        }
        if self.unit_output {
            flags |= OutputFlags::UNIT_OUTPUT;
        }
        HarnessConfig {
            flags,
            color: self.color,
            assertion_timing: self.timing,
        }
    }
}

/// Argument parser for binaries that only need the harness flags.
#[derive(Debug, Parser)]
#[command(about = "Runs the embedded unit tests of this program.")]
pub struct HarnessCli {
    #[command(flatten)]
    pub harness: HarnessArgs,
}
