//! # simpletest
//!
//! A small unit-testing harness meant to live next to the code it tests.
//! Assertions roll up into cases, cases into units and units into a single
//! entry point whose result becomes the process exit status.
//!
//! ```no_run
//! use simpletest::{expect_eq, expect_eq_str, require, Entry, Unit};
//!
//! fn sum(a: i32, b: i32) -> i32 {
//!     a + b
//! }
//!
//! fn main() -> std::process::ExitCode {
//!     Entry::new()
//!         .unit(
//!             Unit::new("demo")
//!                 .case("sum", |t| {
//!                     expect_eq!(t, 0, sum(1, -1));
//!                     require!(t, sum(2, 2) == 4, "sum is {}", sum(2, 2));
//!                     Ok(())
//!                 })
//!                 .case("concat", |t| {
//!                     let s = format!("{}{}", "abc", "def");
//!                     expect_eq_str!(t, "abcdef", s);
//!                     Ok(())
//!                 }),
//!         )
//!         .main()
//! }
//! ```

pub use crate::context::{OutputFlags, RunContext};
pub use crate::errors::{Aborted, CaseResult};
pub use crate::runner::{Case, Entry, Unit};

pub mod assertion;
pub mod cli;
pub mod compare;
pub mod config;
pub mod context;
pub mod errors;
pub mod output;
pub mod runner;
pub mod summary;
pub mod timer;
