mod common;

use predicates::prelude::*;
use tabletest::prelude::*;
use tabletest::{args, function, kwargs};

use common::{color, div, quiet};

fn div_cases() -> Vec<Case> {
    vec![
        Case::new("EQ", args![6, 3], kwargs!(), 2),
        Case::new("EQ", args![7, 2], kwargs!(), 3),
        Case::new("RAISE", args![1, 0], kwargs!(), ErrorKind::ZeroDivision),
        Case::new("RAISE", args![1, "x"], kwargs!(), ErrorKind::Type),
    ]
}

#[test]
fn functions_sharing_a_name_share_an_entry() {
    let mut results = Aggregate::new();
    let mut sink = OutputBuffer::new();
    let first = Function::new("f", |_: &[Value], _: &Kwargs| Ok(Value::from(1)));
    let second = Function::new("f", |_: &[Value], _: &Kwargs| Ok(Value::from(2)));
    let cases = vec![Case::new("EQ", args![], kwargs!(), 1)];
    for function in [&first, &second] {
        run_tests("test_f", function, &cases, &quiet(), Some(&mut results), &mut sink).unwrap();
    }

    let node = results.test("test_f").unwrap();
    assert_eq!(node.functions.len(), 1);
    assert_eq!(
        node.function("f"),
        Some(&Counts {
            count: 2,
            success: 1,
            failures: 1,
            errors: 0
        })
    );
}

#[test]
fn all_passing_batch_reports_n_of_n() {
    let mut sink = OutputBuffer::new();
    let report = run_tests("test_div", &function!(div), &div_cases(), &quiet(), None, &mut sink)
        .unwrap();
    assert_eq!(
        report,
        BatchReport {
            test_name: "test_div".to_string(),
            counts: Counts {
                count: 4,
                success: 4,
                failures: 0,
                errors: 0
            }
        }
    );
    assert!(sink.is_empty());
}

#[test]
fn repeated_runs_accumulate_per_test_and_per_function() {
    let mut results = Aggregate::new();
    let mut sink = OutputBuffer::new();
    let cases = div_cases();
    for _ in 0..2 {
        run_tests("test_div", &function!(div), &cases, &quiet(), Some(&mut results), &mut sink)
            .unwrap();
    }

    let node = results.test("test_div").unwrap();
    assert_eq!(node.counts.count, 8);
    assert_eq!(node.function("div").unwrap().count, 8);
    assert!(node.tests.is_empty());
    // the root only holds test nodes
    assert_eq!(results.counts, Counts::default());
    assert!(results.functions.is_empty());
    assert!(results.is_consistent());
}

#[test]
fn separate_tests_and_functions_get_separate_entries() {
    let mut results = Aggregate::new();
    let mut sink = OutputBuffer::new();
    run_tests("test_div", &function!(div), &div_cases(), &quiet(), Some(&mut results), &mut sink)
        .unwrap();
    let color_cases = vec![
        Case::new("EQ", args!["red"], kwargs!(), 0xff0000),
        Case::new("EQ", args!["green"], kwargs!(), 0),
        Case::new("EQ", args!["blue"], kwargs!(), 0),
    ];
    run_tests("test_color", &function!(color), &color_cases, &quiet(), Some(&mut results), &mut sink)
        .unwrap();

    assert_eq!(results.tests.len(), 2);
    let node = results.test("test_color").unwrap();
    assert_eq!(
        node.counts,
        Counts {
            count: 3,
            success: 1,
            failures: 1,
            errors: 1
        }
    );
    assert!(node.function("div").is_none());
    assert!(results.is_consistent());
}

#[test]
fn summary_printed_for_failing_batches() {
    let cases = vec![
        Case::new("EQ", args![6, 3], kwargs!(), 2),
        Case::new("EQ", args![6, 3], kwargs!(), 9),
    ];
    let mut sink = OutputBuffer::new();
    run_tests("test_div", &function!(div), &cases, &quiet().with_verbosity(1), None, &mut sink)
        .unwrap();
    let output = sink.as_string();
    assert!(predicate::str::contains("test_div: 2 tests").eval(&output));
    assert!(predicate::str::contains("      1 failed").eval(&output));
    assert!(predicate::str::contains("[FAIL]").not().eval(&output));
}

#[test]
fn macro_labels_batches_with_the_calling_function() {
    let mut results = Aggregate::new();
    let mut sink = OutputBuffer::new();
    let report = tabletest::run_tests!(
        &function!(div),
        &div_cases(),
        &quiet(),
        Some(&mut results),
        &mut sink
    )
    .unwrap();
    assert_eq!(report.test_name, "macro_labels_batches_with_the_calling_function");
    assert!(results
        .test("macro_labels_batches_with_the_calling_function")
        .is_some());
}

#[test]
fn macro_without_results_prints_to_stdout() {
    let report = tabletest::run_tests!(&function!(div), &div_cases(), &quiet()).unwrap();
    assert!(report.counts.all_passed());
}

#[test]
fn results_serialize_for_display() {
    let mut results = Aggregate::new();
    let mut sink = OutputBuffer::new();
    run_tests("test_div", &function!(div), &div_cases(), &quiet(), Some(&mut results), &mut sink)
        .unwrap();
    let json = results.to_json_pretty().unwrap();
    let parsed: Aggregate = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, results);
}
