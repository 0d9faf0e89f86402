//! Assertion descriptors, diagnostics and the assertion macros.
//!
//! Every macro takes the [`RunContext`](crate::RunContext) as its first
//! argument and an optional trailing `format!`-style message.
//!
//! - `expect*!` macros record a soft failure and evaluate to `bool`.
//! - `require*!` macros record a hard failure and `return Err(Aborted)` from
//!   the enclosing case body, so nothing after them runs.
//!
//! ```
//! use simpletest::{expect_eq, require, CaseResult, RunContext};
//!
//! fn check_sum(t: &mut RunContext) -> CaseResult {
//!     expect_eq!(t, 4, 2 + 2);
//!     require!(t, 1 < 2, "ordering is broken");
//!     Ok(())
//! }
//! ```

use std::fmt;

use crate::compare::truncate_path;
use crate::output::Channel;
use crate::timer::format_millis;

/// How a failing assertion affects the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Soft: record, report and continue.
    Expect,
    /// Hard: record, report and stop the whole run.
    Require,
}

/// Outcome label printed in a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Passed,
    Failed,
    Aborted,
}

impl Label {
    pub fn for_outcome(severity: Severity, outcome: bool) -> Self {
        match (outcome, severity) {
            (true, _) => Label::Passed,
            (false, Severity::Expect) => Label::Failed,
            (false, Severity::Require) => Label::Aborted,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Passed => "PASSED",
            Label::Failed => "FAILED",
            Label::Aborted => "ABORTED",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an assertion was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: &'static str,
    pub function: &'static str,
    pub line: u32,
}

impl Location {
    pub fn new(file: &'static str, function: &'static str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
        }
    }

    /// File name without its directory prefix.
    pub fn file_name(&self) -> &'static str {
        truncate_path(self.file)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_name(), self.function, self.line)
    }
}

/// What an assertion checked, built lazily only when it has to be reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Assertion {
    pub title: String,
    pub location: Location,
    /// Source text of the checked expression, e.g. `0 == sum(0, 0)`.
    pub expression: String,
    /// Rendered `(expected, actual)` values for comparison assertions.
    pub values: Option<(String, String)>,
    /// Unescaped `(expected, actual)` strings, set by string assertions when
    /// both sides are present.
    pub texts: Option<(String, String)>,
    /// Comparison operator or predicate joining the rendered values.
    pub relation: &'static str,
    pub message: Option<String>,
}

/// A fully resolved assertion report handed to the output sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Position of the assertion within the current case.
    pub sequence: u32,
    pub label: Label,
    pub outcome: bool,
    pub elapsed_micros: Option<u64>,
    pub assertion: Assertion,
}

impl Diagnostic {
    pub fn channel(&self) -> Channel {
        match self.label {
            Label::Passed => Channel::Debug,
            Label::Failed | Label::Aborted => Channel::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.assertion;
        write!(f, "  [{}] {}: {}", self.sequence, a.location, self.label)?;
        if let Some(micros) = self.elapsed_micros {
            write!(f, " ({})", format_millis(micros))?;
        }
        write!(f, "\n  {}\n    ==>  {}", a.title, a.expression)?;
        if let Some((expected, actual)) = &a.values {
            write!(f, "\n    ==>  {} {} {}", expected, a.relation, actual)?;
        }
        write!(f, "\n    ==>  {}", self.outcome)?;
        if let Some(message) = &a.message {
            write!(f, "\n  {}", message.trim_end())?;
        }
        Ok(())
    }
}

/// Renders an optional string the way diagnostics show it.
pub fn render_str(value: Option<&str>) -> String {
    match value {
        Some(s) => format!("{s:?}"),
        None => "(null)".to_string(),
    }
}

/// Renders at most `len` bytes as an escaped byte-string literal.
pub fn render_bytes(value: Option<&[u8]>, len: usize) -> String {
    match value {
        Some(bytes) => {
            let shown = &bytes[..len.min(bytes.len())];
            format!("b\"{}\"", shown.escape_ascii())
        }
        None => "(null)".to_string(),
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __location {
    () => {
        $crate::assertion::Location::new(file!(), module_path!(), line!())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __message {
    () => {
        ::core::option::Option::None
    };
    ($($arg:tt)+) => {
        ::core::option::Option::Some(::std::format!($($arg)+))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bool_assertion {
    ($method:ident, $ctx:expr, $title:expr, $text:expr, $outcome:expr, [$($arg:tt)*]) => {{
        let __start = $crate::RunContext::tick(&*$ctx);
        let __outcome: bool = $outcome;
        let __elapsed = $crate::RunContext::since(&*$ctx, __start);
        $crate::RunContext::$method(&mut *$ctx, __outcome, __elapsed, || {
            $crate::assertion::Assertion {
                title: ::std::string::ToString::to_string($title),
                location: $crate::__location!(),
                expression: ::std::string::ToString::to_string($text),
                values: ::core::option::Option::None,
                texts: ::core::option::Option::None,
                relation: "",
                message: $crate::__message!($($arg)*),
            }
        })
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __cmp_assertion {
    ($method:ident, $ctx:expr, $title:expr, $op:tt, $expected:expr, $actual:expr, [$($arg:tt)*]) => {{
        let __start = $crate::RunContext::tick(&*$ctx);
        match (&$expected, &$actual) {
            (__expected, __actual) => {
                let __outcome: bool = *__expected $op *__actual;
                let __elapsed = $crate::RunContext::since(&*$ctx, __start);
                $crate::RunContext::$method(&mut *$ctx, __outcome, __elapsed, || {
                    $crate::assertion::Assertion {
                        title: ::std::string::ToString::to_string($title),
                        location: $crate::__location!(),
                        expression: ::std::string::ToString::to_string(::core::concat!(
                            ::core::stringify!($expected),
                            " ",
                            ::core::stringify!($op),
                            " ",
                            ::core::stringify!($actual)
                        )),
                        values: ::core::option::Option::Some((
                            ::std::format!("{:?}", __expected),
                            ::std::format!("{:?}", __actual),
                        )),
                        texts: ::core::option::Option::None,
                        relation: ::core::stringify!($op),
                        message: $crate::__message!($($arg)*),
                    }
                })
            }
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __str_assertion {
    ($method:ident, $ctx:expr, $title:expr, $expected:expr, $actual:expr, [$($arg:tt)*]) => {{
        let __start = $crate::RunContext::tick(&*$ctx);
        match (&$expected, &$actual) {
            (__expected, __actual) => {
                let __expected = $crate::compare::MaybeStr::maybe_str(__expected);
                let __actual = $crate::compare::MaybeStr::maybe_str(__actual);
                let __outcome = $crate::compare::equal_strings(__expected, __actual);
                let __elapsed = $crate::RunContext::since(&*$ctx, __start);
                $crate::RunContext::$method(&mut *$ctx, __outcome, __elapsed, || {
                    $crate::assertion::Assertion {
                        title: ::std::string::ToString::to_string($title),
                        location: $crate::__location!(),
                        expression: ::std::string::ToString::to_string(::core::concat!(
                            "equal_strings(",
                            ::core::stringify!($expected),
                            ", ",
                            ::core::stringify!($actual),
                            ")"
                        )),
                        values: ::core::option::Option::Some((
                            $crate::assertion::render_str(__expected),
                            $crate::assertion::render_str(__actual),
                        )),
                        texts: __expected.zip(__actual).map(|(__e, __a)| {
                            (::std::string::ToString::to_string(__e), ::std::string::ToString::to_string(__a))
                        }),
                        relation: "==",
                        message: $crate::__message!($($arg)*),
                    }
                })
            }
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __strn_assertion {
    ($method:ident, $ctx:expr, $title:expr, $expected:expr, $actual:expr, $len:expr, [$($arg:tt)*]) => {{
        let __start = $crate::RunContext::tick(&*$ctx);
        let __len: usize = $len;
        match (&$expected, &$actual) {
            (__expected, __actual) => {
                let __expected = $crate::compare::MaybeStr::maybe_str(__expected);
                let __actual = $crate::compare::MaybeStr::maybe_str(__actual);
                let __outcome = $crate::compare::equal_string_prefix(__expected, __actual, __len);
                let __elapsed = $crate::RunContext::since(&*$ctx, __start);
                $crate::RunContext::$method(&mut *$ctx, __outcome, __elapsed, || {
                    $crate::assertion::Assertion {
                        title: ::std::string::ToString::to_string($title),
                        location: $crate::__location!(),
                        expression: ::std::format!(
                            "equal_string_prefix({}, {}, {})",
                            ::core::stringify!($expected),
                            ::core::stringify!($actual),
                            __len
                        ),
                        values: ::core::option::Option::Some((
                            $crate::assertion::render_str(__expected),
                            $crate::assertion::render_str(__actual),
                        )),
                        texts: __expected.zip(__actual).map(|(__e, __a)| {
                            (::std::string::ToString::to_string(__e), ::std::string::ToString::to_string(__a))
                        }),
                        relation: "==",
                        message: $crate::__message!($($arg)*),
                    }
                })
            }
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __mem_assertion {
    ($method:ident, $ctx:expr, $title:expr, $expected:expr, $actual:expr, $len:expr, [$($arg:tt)*]) => {{
        let __start = $crate::RunContext::tick(&*$ctx);
        let __len: usize = $len;
        match (&$expected, &$actual) {
            (__expected, __actual) => {
                let __expected = $crate::compare::MaybeBytes::maybe_bytes(__expected);
                let __actual = $crate::compare::MaybeBytes::maybe_bytes(__actual);
                let __outcome = $crate::compare::equal_bytes(__expected, __actual, __len);
                let __elapsed = $crate::RunContext::since(&*$ctx, __start);
                $crate::RunContext::$method(&mut *$ctx, __outcome, __elapsed, || {
                    $crate::assertion::Assertion {
                        title: ::std::string::ToString::to_string($title),
                        location: $crate::__location!(),
                        expression: ::std::format!(
                            "equal_bytes({}, {}, {})",
                            ::core::stringify!($expected),
                            ::core::stringify!($actual),
                            __len
                        ),
                        values: ::core::option::Option::Some((
                            $crate::assertion::render_bytes(__expected, __len),
                            $crate::assertion::render_bytes(__actual, __len),
                        )),
                        texts: ::core::option::Option::None,
                        relation: "==",
                        message: $crate::__message!($($arg)*),
                    }
                })
            }
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __propagate {
    ($result:expr) => {
        if let ::core::result::Result::Err(__aborted) = $result {
            return ::core::result::Result::Err(::core::convert::From::from(__aborted));
        }
    };
}

/// Soft check that an expression is true.
#[macro_export]
macro_rules! expect {
    ($ctx:expr, $cond:expr $(, $($arg:tt)+)?) => {
        $crate::__bool_assertion!(
            expect,
            $ctx,
            ::core::concat!("expect!(", ::core::stringify!($cond), ")"),
            ::core::stringify!($cond),
            $cond,
            [$($($arg)+)?]
        )
    };
}

/// Hard check that an expression is true.
#[macro_export]
macro_rules! require {
    ($ctx:expr, $cond:expr $(, $($arg:tt)+)?) => {
        $crate::__propagate!($crate::__bool_assertion!(
            require,
            $ctx,
            ::core::concat!("require!(", ::core::stringify!($cond), ")"),
            ::core::stringify!($cond),
            $cond,
            [$($($arg)+)?]
        ))
    };
}

/// Soft check that an expression is false.
#[macro_export]
macro_rules! expect_false {
    ($ctx:expr, $cond:expr $(, $($arg:tt)+)?) => {
        $crate::__bool_assertion!(
            expect,
            $ctx,
            ::core::concat!("expect_false!(", ::core::stringify!($cond), ")"),
            ::core::concat!("!(", ::core::stringify!($cond), ")"),
            !($cond),
            [$($($arg)+)?]
        )
    };
}

/// Hard check that an expression is false.
#[macro_export]
macro_rules! require_false {
    ($ctx:expr, $cond:expr $(, $($arg:tt)+)?) => {
        $crate::__propagate!($crate::__bool_assertion!(
            require,
            $ctx,
            ::core::concat!("require_false!(", ::core::stringify!($cond), ")"),
            ::core::concat!("!(", ::core::stringify!($cond), ")"),
            !($cond),
            [$($($arg)+)?]
        ))
    };
}

/// Soft check that two values are equal.
#[macro_export]
macro_rules! expect_eq {
    ($ctx:expr, $expected:expr, $actual:expr $(, $($arg:tt)+)?) => {
        $crate::__cmp_assertion!(
            expect,
            $ctx,
            ::core::concat!(
                "expect_eq!(", ::core::stringify!($expected), ", ", ::core::stringify!($actual), ")"
            ),
            ==,
            $expected,
            $actual,
            [$($($arg)+)?]
        )
    };
}

/// Hard check that two values are equal.
#[macro_export]
macro_rules! require_eq {
    ($ctx:expr, $expected:expr, $actual:expr $(, $($arg:tt)+)?) => {
        $crate::__propagate!($crate::__cmp_assertion!(
            require,
            $ctx,
            ::core::concat!(
                "require_eq!(", ::core::stringify!($expected), ", ", ::core::stringify!($actual), ")"
            ),
            ==,
            $expected,
            $actual,
            [$($($arg)+)?]
        ))
    };
}

/// Soft check that two values differ.
#[macro_export]
macro_rules! expect_ne {
    ($ctx:expr, $expected:expr, $actual:expr $(, $($arg:tt)+)?) => {
        $crate::__cmp_assertion!(
            expect,
            $ctx,
            ::core::concat!(
                "expect_ne!(", ::core::stringify!($expected), ", ", ::core::stringify!($actual), ")"
            ),
            !=,
            $expected,
            $actual,
            [$($($arg)+)?]
        )
    };
}

/// Hard check that two values differ.
#[macro_export]
macro_rules! require_ne {
    ($ctx:expr, $expected:expr, $actual:expr $(, $($arg:tt)+)?) => {
        $crate::__propagate!($crate::__cmp_assertion!(
            require,
            $ctx,
            ::core::concat!(
                "require_ne!(", ::core::stringify!($expected), ", ", ::core::stringify!($actual), ")"
            ),
            !=,
            $expected,
            $actual,
            [$($($arg)+)?]
        ))
    };
}

/// Soft check that two optional strings are equal.
#[macro_export]
macro_rules! expect_eq_str {
    ($ctx:expr, $expected:expr, $actual:expr $(, $($arg:tt)+)?) => {
        $crate::__str_assertion!(
            expect,
            $ctx,
            ::core::concat!(
                "expect_eq_str!(", ::core::stringify!($expected), ", ", ::core::stringify!($actual), ")"
            ),
            $expected,
            $actual,
            [$($($arg)+)?]
        )
    };
}

/// Hard check that two optional strings are equal.
#[macro_export]
macro_rules! require_eq_str {
    ($ctx:expr, $expected:expr, $actual:expr $(, $($arg:tt)+)?) => {
        $crate::__propagate!($crate::__str_assertion!(
            require,
            $ctx,
            ::core::concat!(
                "require_eq_str!(", ::core::stringify!($expected), ", ", ::core::stringify!($actual), ")"
            ),
            $expected,
            $actual,
            [$($($arg)+)?]
        ))
    };
}

/// Soft check that two optional strings share their first `len` bytes.
#[macro_export]
macro_rules! expect_eq_strn {
    ($ctx:expr, $expected:expr, $actual:expr, $len:expr $(, $($arg:tt)+)?) => {
        $crate::__strn_assertion!(
            expect,
            $ctx,
            ::core::concat!(
                "expect_eq_strn!(", ::core::stringify!($expected), ", ", ::core::stringify!($actual), ")"
            ),
            $expected,
            $actual,
            $len,
            [$($($arg)+)?]
        )
    };
}

/// Hard check that two optional strings share their first `len` bytes.
#[macro_export]
macro_rules! require_eq_strn {
    ($ctx:expr, $expected:expr, $actual:expr, $len:expr $(, $($arg:tt)+)?) => {
        $crate::__propagate!($crate::__strn_assertion!(
            require,
            $ctx,
            ::core::concat!(
                "require_eq_strn!(", ::core::stringify!($expected), ", ", ::core::stringify!($actual), ")"
            ),
            $expected,
            $actual,
            $len,
            [$($($arg)+)?]
        ))
    };
}

/// Soft check that two byte ranges match over `len` bytes.
#[macro_export]
macro_rules! expect_eq_mem {
    ($ctx:expr, $expected:expr, $actual:expr, $len:expr $(, $($arg:tt)+)?) => {
        $crate::__mem_assertion!(
            expect,
            $ctx,
            ::core::concat!(
                "expect_eq_mem!(", ::core::stringify!($expected), ", ", ::core::stringify!($actual), ")"
            ),
            $expected,
            $actual,
            $len,
            [$($($arg)+)?]
        )
    };
}

/// Hard check that two byte ranges match over `len` bytes.
#[macro_export]
macro_rules! require_eq_mem {
    ($ctx:expr, $expected:expr, $actual:expr, $len:expr $(, $($arg:tt)+)?) => {
        $crate::__propagate!($crate::__mem_assertion!(
            require,
            $ctx,
            ::core::concat!(
                "require_eq_mem!(", ::core::stringify!($expected), ", ", ::core::stringify!($actual), ")"
            ),
            $expected,
            $actual,
            $len,
            [$($($arg)+)?]
        ))
    };
}
