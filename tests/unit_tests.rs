//! Tests for the assertion macro surface and the comparator library.

use std::cell::RefCell;
use std::rc::Rc;

use simpletest::cli::output::OutputBuffer;
use simpletest::compare::{equal_bytes, equal_string_prefix, equal_strings};
use simpletest::assertion::Diagnostic;
use simpletest::output::{Channel, OutputSink};
use simpletest::runner::run_case;
use simpletest::{
    expect, expect_eq, expect_eq_mem, expect_eq_str, expect_eq_strn, expect_false, expect_ne,
    require_eq, require_eq_mem, require_eq_str, require_eq_strn, require_false, require_ne,
    CaseResult, OutputFlags, RunContext,
};

fn quiet() -> (RunContext, Rc<RefCell<OutputBuffer>>) {
    let buffer = Rc::new(RefCell::new(OutputBuffer::new()));
    (RunContext::new(OutputFlags::empty(), buffer.clone()), buffer)
}

#[cfg(test)]
mod comparator_tests {
    use super::*;

    #[test]
    fn string_equality_properties() {
        assert!(equal_strings(None, None));
        assert!(!equal_strings(None, Some("x")));
        let a = String::from("a");
        let b = String::from("a");
        assert!(equal_strings(Some(a.as_str()), Some(b.as_str())));
    }

    #[test]
    fn prefix_properties() {
        assert!(equal_string_prefix(Some("abc"), Some("abcdef"), 3));
        assert!(!equal_string_prefix(Some("abc"), Some("abd"), 3));
        assert!(equal_string_prefix(Some("abc"), Some("xyz"), 0));
        assert!(equal_string_prefix(None, None, 3));
    }

    #[test]
    fn byte_properties() {
        let data = [1u8, 2, 3];
        assert!(equal_bytes(Some(&data[..]), Some(&data[..]), 3));
        assert!(equal_bytes(Some(&data[..2]), Some(&[1, 2, 9][..]), 2));
        assert!(!equal_bytes(None, Some(&data[..]), 1));
    }
}

#[cfg(test)]
mod macro_tests {
    use super::*;

    #[test]
    fn expect_macros_evaluate_to_outcome() {
        let (mut ctx, _) = quiet();
        let t = &mut ctx;
        assert!(expect!(t, 1 + 1 == 2));
        assert!(!expect!(t, 1 + 1 == 3, "math is {}", "broken"));
        assert!(expect_false!(t, false));
        assert!(expect_eq!(t, "a", "a"));
        assert!(expect_ne!(t, 1, 2));
        assert!(expect_eq_str!(t, None::<&str>, None::<String>));
        assert!(!expect_eq_str!(t, Some("x"), None::<&str>));
        assert!(expect_eq_strn!(t, "abc", String::from("abcdef"), 3));
        assert!(expect_eq_mem!(t, b"abc", vec![b'a', b'b', b'c'], 3));
        assert_eq!(t.count(), 9);
        assert_eq!(t.pass(), 7);
    }

    #[test]
    fn require_macros_pass_through_on_success() {
        let (mut ctx, buffer) = quiet();
        let summary = run_case(&mut ctx, "requires", |t| {
            require_false!(t, 2 < 1);
            require_eq!(t, 4, 2 * 2);
            require_ne!(t, 4, 5);
            require_eq_str!(t, "abc", String::from("abc"));
            require_eq_strn!(t, "abX", "abY", 2);
            require_eq_mem!(t, [0u8, 1], [0u8, 1], 2, "bytes differ");
            Ok(())
        })
        .unwrap();
        assert_eq!((summary.count, summary.pass), (6, 6));
        assert!(buffer.borrow().is_empty());
    }

    #[test]
    fn require_returns_from_helper_functions() {
        fn helper(t: &mut RunContext, value: i32) -> CaseResult {
            require_eq!(t, 10, value, "value was {}", value);
            expect!(t, value > 0);
            Ok(())
        }

        let (mut ctx, buffer) = quiet();
        let err = helper(&mut ctx, 3).unwrap_err();
        assert!(err.title.starts_with("require_eq!(10, value)"));
        assert_eq!(ctx.count(), 1);

        let buffer = buffer.borrow();
        let text = buffer.lines_on(Channel::Warning)[0];
        assert!(text.contains("ABORTED"));
        assert!(text.contains("==>  10 == value"));
        assert!(text.contains("==>  10 == 3"));
        assert!(text.ends_with("value was 3"));
    }

    #[test]
    fn user_errors_convert_from_aborted() {
        #[derive(Debug)]
        enum SuiteError {
            Stopped(simpletest::Aborted),
        }

        impl From<simpletest::Aborted> for SuiteError {
            fn from(err: simpletest::Aborted) -> Self {
                SuiteError::Stopped(err)
            }
        }

        fn body(t: &mut RunContext) -> Result<(), SuiteError> {
            require_ne!(t, 1, 1);
            Ok(())
        }

        let (mut ctx, _) = quiet();
        assert!(matches!(body(&mut ctx), Err(SuiteError::Stopped(_))));
    }

    #[test]
    fn string_diagnostics_render_null() {
        let (mut ctx, buffer) = quiet();
        let missing: Option<&str> = None;
        expect_eq_str!(&mut ctx, "abc", missing);
        let buffer = buffer.borrow();
        assert!(buffer.as_str().contains("==>  \"abc\" == (null)"));
        assert!(buffer.as_str().contains("equal_strings(\"abc\", missing)"));
    }

    #[test]
    fn passing_assertions_shown_with_test_output() {
        let buffer = Rc::new(RefCell::new(OutputBuffer::new()));
        let mut ctx = RunContext::new(OutputFlags::TEST_OUTPUT, buffer.clone());
        expect_eq!(&mut ctx, 1, 1);
        let buffer = buffer.borrow();
        let debug = buffer.lines_on(Channel::Debug);
        assert_eq!(debug.len(), 1);
        assert!(debug[0].contains("PASSED"));
        assert!(debug[0].contains("unit_tests.rs"));
    }

    #[test]
    fn assertion_timing_appears_when_enabled() {
        let buffer = Rc::new(RefCell::new(OutputBuffer::new()));
        let mut ctx = RunContext::new(OutputFlags::empty(), buffer.clone())
            .with_clock(simpletest::timer::SteppingClock::new(1500))
            .with_assertion_timing(true);
        expect!(&mut ctx, false);
        assert!(buffer.borrow().as_str().contains("FAILED (1.500 ms)"));
    }

    #[derive(Default)]
    struct Recorded(Vec<Diagnostic>);

    impl OutputSink for Recorded {
        fn emit(&mut self, _channel: Channel, _text: &str) {}

        fn diagnostic(&mut self, diagnostic: &Diagnostic) {
            self.0.push(diagnostic.clone());
        }
    }

    #[test]
    fn string_assertions_keep_unescaped_texts() {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let mut ctx = RunContext::new(OutputFlags::empty(), recorded.clone());
        let actual = String::from("C:\\new\nlane");
        expect_eq_str!(&mut ctx, "C:\\new\nline", actual);
        expect_eq_strn!(&mut ctx, "C:\\old", None::<&str>, 3);
        expect_eq!(&mut ctx, "a\nb", "a\nc");

        let recorded = recorded.borrow();
        assert_eq!(recorded.0.len(), 3);
        assert_eq!(
            recorded.0[0].assertion.texts,
            Some(("C:\\new\nline".to_string(), "C:\\new\nlane".to_string()))
        );
        assert_eq!(recorded.0[1].assertion.texts, None);
        assert_eq!(recorded.0[2].assertion.texts, None);
    }
}
