mod common;

use predicates::prelude::*;
use tabletest::prelude::*;
use tabletest::{args, function, kwargs};

use common::{color, div, greet, quiet};

fn run(function: &Function, case: Case, config: &RunConfig) -> (CaseReport, OutputBuffer) {
    let mut sink = OutputBuffer::new();
    let report = run_case(function, &case, config, None, &mut sink).unwrap();
    (report, sink)
}

#[test]
fn matching_value_passes() {
    let (report, _) = run(&function!(div), Case::new("EQ", args![10, 2], kwargs!(), 5), &quiet());
    assert_eq!(report.outcome, Outcome::Pass);
    assert_eq!(
        report.counts,
        Counts {
            count: 1,
            success: 1,
            failures: 0,
            errors: 0
        }
    );
    assert_eq!(report.function, "div");
    assert_eq!(report.code, "div(10, 2)");
}

#[test]
fn different_value_fails() {
    let (report, _) = run(&function!(div), Case::new("EQ", args![12, 2], kwargs!(), 5), &quiet());
    assert_eq!(report.counts.failures, 1);
}

#[test]
fn raising_against_a_value_is_an_error() {
    let (report, _) = run(&function!(div), Case::new("EQ", args![1, 0], kwargs!(), 5), &quiet());
    assert_eq!(report.counts.errors, 1);
}

#[test]
fn expected_error_kind_passes() {
    let case = Case::new("RAISE", args!["blue"], kwargs!(), ErrorKind::Key);
    let (report, _) = run(&function!(color), case, &quiet());
    assert_eq!(report.counts.success, 1);

    // any ancestor kind matches too
    let case = Case::new("RAISE", args!["blue"], kwargs!(), ErrorKind::Lookup);
    let (report, _) = run(&function!(color), case, &quiet());
    assert_eq!(report.counts.success, 1);
}

#[test]
fn error_kind_given_as_a_type_value_is_an_error_expectation() {
    let case = Case::new("RAISE", args![1, 0], kwargs!(), Value::from(ErrorKind::Arithmetic));
    let (report, _) = run(&function!(div), case, &quiet());
    assert_eq!(report.outcome, Outcome::Pass);
}

#[test]
fn named_arguments_reach_the_function() {
    let case = Case::new("EQ", args!["Ann"], kwargs!("greeting" => "Hi"), "Hi, Ann!");
    let (report, _) = run(&function!(greet), case, &quiet().with_shorten_args(None));
    assert_eq!(report.outcome, Outcome::Pass);
    assert_eq!(report.code, "greet(\"Ann\", greeting=\"Hi\")");
}

#[test]
fn resolved_tags_are_accepted() {
    let case = Case::new(op::EQ, args![9, 3], kwargs!(), 3);
    let (report, _) = run(&function!(div), case, &quiet());
    assert_eq!(report.outcome, Outcome::Pass);
}

#[test]
fn unsupported_tag_names_function_and_tag() {
    let mut sink = OutputBuffer::new();
    let case = Case::new("NOPE", args![1, 1], kwargs!(), 1);
    let err = run_case(&function!(div), &case, &quiet(), None, &mut sink).unwrap_err();
    assert!(matches!(
        &err,
        TableTestError::UnsupportedTag { function, tag } if function == "div" && tag == "NOPE"
    ));
    assert!(sink.is_empty());
}

#[test]
fn malformed_containers_name_the_received_type() {
    let mut sink = OutputBuffer::new();
    let case = Case::new("EQ", Value::from("1, 1"), kwargs!(), 1);
    let err = run_case(&function!(div), &case, &quiet(), None, &mut sink).unwrap_err();
    assert_eq!(err.to_string(), "for div, args must be a list, not str");

    let case = Case::new("EQ", args![1, 1], args![], 1);
    let err = run_case(&function!(div), &case, &quiet(), None, &mut sink).unwrap_err();
    assert_eq!(err.to_string(), "for div, kwargs must be a map, not list");
}

#[test]
fn diagnostic_lines_follow_verbosity() {
    let config = quiet().with_verbosity(3);
    let (_, sink) = run(&function!(div), Case::new("EQ", args![4, 2], kwargs!(), 2), &config);
    assert!(predicate::str::starts_with("[PASS] \"div(4, 2)\" expects 2, actual 2")
        .eval(&sink.as_string()));

    let (_, sink) = run(&function!(div), Case::new("EQ", args![4, 2], kwargs!(), 3), &config);
    assert!(predicate::str::contains("[FAIL]")
        .and(predicate::str::contains("expects 3, actual 2"))
        .eval(&sink.as_string()));

    let (_, sink) = run(&function!(div), Case::new("EQ", args![4, 0], kwargs!(), 3), &config);
    assert_eq!(
        sink.as_string(),
        "[ERROR] \"div(4, 0)\" ZeroDivision: integer division by zero"
    );

    let (_, sink) = run(&function!(div), Case::new("EQ", args![4, 2], kwargs!(), 3), &quiet());
    assert!(sink.is_empty());
}

#[test]
fn panics_count_as_errors() {
    let exploding = Function::new("explode", |_: &[Value], _: &Kwargs| -> Result<Value, Raised> {
        panic!("unreachable state")
    });
    let (report, _) = run(&exploding, Case::new("EQ", args![], kwargs!(), 1), &quiet());
    assert_eq!(report.outcome, Outcome::Error);

    let (report, _) = run(&exploding, Case::new("RAISE", args![], kwargs!(), ErrorKind::Panic), &quiet());
    assert_eq!(report.outcome, Outcome::Pass);
}

#[test]
fn case_results_land_on_the_given_node() {
    let mut node = Aggregate::new();
    let mut sink = OutputBuffer::new();
    for (b, expected) in [(1, 6), (2, 3), (0, 0)] {
        let case = Case::new("EQ", args![6, b], kwargs!(), expected);
        run_case(&function!(div), &case, &quiet(), Some(&mut node), &mut sink).unwrap();
    }
    assert_eq!(
        node.counts,
        Counts {
            count: 3,
            success: 2,
            failures: 0,
            errors: 1
        }
    );
    assert_eq!(node.function("div"), Some(&node.counts));
    assert!(node.tests.is_empty());
    assert!(node.is_consistent());
}
