//! Batch runner.

use crate::config::RunConfig;
use crate::diagnostics::TableResult;
use crate::output::OutputSink;
use crate::results::{Aggregate, Counts};

use super::{run_case, BatchReport, Case, Function};

/// Runs every case of a table against `function`, in order.
///
/// `test_name` labels the batch in the summary and in the aggregation tree;
/// [`run_tests!`](crate::run_tests!) fills it in from the calling function.
/// With `results`, every case is recorded under `results.tests[test_name]`,
/// which is created empty when missing.
///
/// The summary is printed when not every case passed and verbosity is above
/// zero, or always above one. An invalid case aborts the batch.
pub fn run_tests<'a, I>(
    test_name: &str,
    function: &Function,
    cases: I,
    config: &RunConfig,
    results: Option<&mut Aggregate>,
    sink: &mut dyn OutputSink,
) -> TableResult<BatchReport>
where
    I: IntoIterator<Item = &'a Case>,
{
    if config.verbosity > 2 {
        sink.emit(&format!("Running {}", test_name));
    }

    let mut node = results.map(|root| root.test_node(test_name));
    let mut totals = Counts::default();
    for case in cases {
        let report = run_case(function, case, config, node.as_deref_mut(), sink)?;
        totals += report.counts;
    }

    if (!totals.all_passed() && config.verbosity > 0) || config.verbosity > 1 {
        sink.emit(&format!("{}: {} tests", test_name, totals.count));
        sink.emit(&format!("{:7} passed", totals.success));
        sink.emit(&format!("{:7} failed", totals.failures));
        sink.emit(&format!("{:7} errors", totals.errors));
    }

    Ok(BatchReport {
        test_name: test_name.to_string(),
        counts: totals,
    })
}

/// Reduces a `type_name` path of a marker item to the name of the function
/// enclosing it, skipping closure segments.
pub fn caller_label(marker_path: &'static str) -> &'static str {
    marker_path
        .rsplit("::")
        .skip(1)
        .find(|segment| *segment != "{{closure}}")
        .unwrap_or(marker_path)
}

/// The name of the enclosing function.
///
/// ```rust
/// fn test_parsing() -> &'static str {
///     tabletest::test_name!()
/// }
/// assert_eq!(test_parsing(), "test_parsing");
/// ```
#[macro_export]
macro_rules! test_name {
    () => {{
        fn marker() {}
        fn path_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::runner::batch::caller_label(path_of(marker))
    }};
}

/// [`run_tests`] labeled with the enclosing function's name.
///
/// `run_tests!(function, cases, config)` prints to stdout and keeps no
/// results; `run_tests!(function, cases, config, results, sink)` passes both
/// through.
#[macro_export]
macro_rules! run_tests {
    ($function:expr, $cases:expr, $config:expr, $results:expr, $sink:expr $(,)?) => {
        $crate::runner::run_tests(
            $crate::test_name!(),
            $function,
            $cases,
            $config,
            $results,
            $sink,
        )
    };
    ($function:expr, $cases:expr, $config:expr $(,)?) => {{
        let config: &$crate::config::RunConfig = $config;
        let mut sink = config.stdout_sink();
        $crate::runner::run_tests(
            $crate::test_name!(),
            $function,
            $cases,
            config,
            None,
            &mut sink,
        )
    }};
}
