// Demo harness binary: the classic sum/divide/concat/step cases.
// Usage: cargo run --bin simpletest-demo -- [--fail] [--abort] [-v]

use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use simpletest::cli::args::HarnessArgs;
use simpletest::{
    expect, expect_eq, expect_eq_mem, expect_eq_str, expect_eq_strn, expect_false, require,
    require_eq, Entry, Unit,
};

#[derive(Debug, Parser)]
#[command(name = "simpletest-demo", about = "Runs the bundled demo test suite.")]
struct DemoArgs {
    #[command(flatten)]
    harness: HarnessArgs,

    /// Add a case with a failing soft assertion.
    #[arg(long)]
    fail: bool,

    /// Add a unit that aborts on its first assertion, followed by one that never runs.
    #[arg(long)]
    abort: bool,
}

fn sum(a: i32, b: i32) -> i32 {
    a + b
}

fn divide(a: f64, b: f64) -> f64 {
    a / b
}

fn demo_unit(fail: bool) -> Unit {
    let step = Rc::new(Cell::new(0));
    let next_step = move || {
        step.set(step.get() + 1);
        step.get()
    };

    let mut unit = Unit::new("test_demo_entry")
        .case("test_sum", |t| {
            expect_eq!(t, 0, sum(0, 0));
            expect_eq!(t, 0, sum(1, -1));
            expect_eq!(t, 1, sum(0, 1));
            expect_eq!(t, -1, sum(-1, 0));
            Ok(())
        })
        .case("test_divide", |t| {
            expect_eq!(t, 0.0, divide(0.0, 2.0));
            expect_eq!(t, 1.0, divide(2.0, 2.0));
            expect_eq!(t, 2.0, divide(4.0, 2.0));
            Ok(())
        })
        .case("test_concat", |t| {
            let mut string = String::new();
            expect_eq_str!(t, "", string);

            string.push_str("abc");
            expect_eq_str!(t, "abc", string);

            string.push_str("def");
            expect_eq_str!(t, "abcdef", string);
            expect_eq_strn!(t, "abc", string, 3);
            expect_eq_mem!(t, "abcdef", string, 6);
            Ok(())
        })
        .case("test_step", move |t| {
            require_eq!(t, 1, next_step());
            for expected in 2..=5 {
                let step = next_step();
                require!(t, step == expected, "step is {}", step);
            }
            expect_false!(t, next_step() == 5);
            Ok(())
        })
        .repeated_case("test_sum_repeated", 5, |t| {
            expect_eq!(t, 4, sum(2, 2));
            Ok(())
        });

    if fail {
        unit = unit.case("test_broken_sum", |t| {
            expect_eq!(t, 3, sum(1, 1));
            expect!(t, sum(1, 1) == 2);
            Ok(())
        })
        .case("test_broken_path", |t| {
            let path = format!("C:\\new\n{}", "lane");
            expect_eq_str!(t, "C:\\new\nline", path);
            Ok(())
        });
    }
    unit
}

fn abort_units() -> [Unit; 2] {
    [
        Unit::new("test_abort").case("test_require", |t| {
            require_eq!(t, 5, sum(2, 2), "sum(2, 2) is not 5");
            expect!(t, true, "unreachable");
            Ok(())
        }),
        Unit::new("test_never_runs").case("test_after_abort", |t| {
            expect!(t, true, "unreachable");
            Ok(())
        }),
    ]
}

fn main() -> ExitCode {
    let args = DemoArgs::parse();
    let mut entry = Entry::new().unit(demo_unit(args.fail));
    if args.abort {
        for unit in abort_units() {
            entry.push(unit);
        }
    }
    entry.main_with_config(&args.harness.to_config())
}
