//! Harness configuration: verbosity, color and per-assertion timing.

use clap::ValueEnum;
use termcolor::ColorChoice;

use crate::context::OutputFlags;

/// When to color terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    /// Color only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub flags: OutputFlags,
    pub color: ColorMode,
    pub assertion_timing: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            flags: OutputFlags::default(),
            color: ColorMode::Auto,
            assertion_timing: false,
        }
    }
}

impl HarnessConfig {
    pub fn verbose() -> Self {
        Self {
            flags: OutputFlags::all(),
            ..Self::default()
        }
    }

    pub fn color_choice(&self) -> ColorChoice {
        match self.color {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}
