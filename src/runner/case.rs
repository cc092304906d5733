//! Single-case runner.

use crate::config::{RunConfig, TagMode};
use crate::diagnostics::{TableResult, TableTestError};
use crate::format::argrepr;
use crate::output::OutputSink;
use crate::raised::Raised;
use crate::results::{Aggregate, Outcome};
use crate::tags::Comparator;
use crate::value::Value;

use super::{Case, CaseReport, Expect, Function};

/// Runs one case against `function`.
///
/// Fails only when the case itself is invalid: an unknown tag name, `args`
/// that is not a list or `kwargs` that is not a map. Errors raised by the
/// function are classified instead:
///
/// - returned a value: `FAIL` if an error was expected or the value differs
///   from the expectation, else `PASS`;
/// - raised: `PASS` if an error of the expected kind was expected, else
///   `ERROR`.
///
/// With [`TagMode::Predicate`] the resolved tag decides value expectations;
/// a predicate that raises makes the case an `ERROR`.
///
/// When `results` is given the outcome is added to that node and to its entry
/// for the function.
pub fn run_case(
    function: &Function,
    case: &Case,
    config: &RunConfig,
    results: Option<&mut Aggregate>,
    sink: &mut dyn OutputSink,
) -> TableResult<CaseReport> {
    let name = function.name();
    let comparator = case
        .tag
        .resolve()
        .map_err(|_| TableTestError::UnsupportedTag {
            function: name.to_string(),
            tag: case.tag.to_string(),
        })?;
    let args = case.args.as_list().ok_or_else(|| TableTestError::InvalidArgs {
        function: name.to_string(),
        found: case.args.type_name(),
    })?;
    let kwargs = case
        .kwargs
        .as_map()
        .ok_or_else(|| TableTestError::InvalidKwargs {
            function: name.to_string(),
            found: case.kwargs.type_name(),
        })?;

    let code = format!("{}({})", name, argrepr(args, kwargs, config.shorten_args));

    let (outcome, detail) = match function.call(args, kwargs) {
        Ok(actual) => {
            let outcome = judge_value(&comparator, &actual, &case.expects, config.tag_mode);
            let detail = match &outcome {
                Err(raised) => format!("\"{}\" {}", code, raised),
                Ok(_) => format!("\"{}\" expects {}, actual {}", code, case.expects, actual),
            };
            (outcome.unwrap_or(Outcome::Error), detail)
        }
        Err(raised) => {
            let outcome = match case.expects.raises() {
                Some(kind) if raised.is_instance_of(kind) => Outcome::Pass,
                _ => Outcome::Error,
            };
            (outcome, format!("\"{}\" {}", code, raised))
        }
    };

    if config.verbosity > outcome.verbosity_threshold() {
        sink.emit_outcome(outcome, &detail);
    }

    let counts = outcome.counts();
    if let Some(node) = results {
        node.record(name, counts);
    }

    Ok(CaseReport {
        function: name.to_string(),
        code,
        outcome,
        counts,
    })
}

/// Judges a returned value. `Err` carries an error raised by the predicate.
fn judge_value(
    comparator: &Comparator,
    actual: &Value,
    expects: &Expect,
    mode: TagMode,
) -> Result<Outcome, Raised> {
    let expected = match expects {
        Expect::Value(expected) if expects.raises().is_none() => expected,
        _ => return Ok(Outcome::Fail),
    };
    let matched = match mode {
        TagMode::Equality => actual == expected,
        TagMode::Predicate => comparator.check(actual, expected)?,
    };
    Ok(if matched { Outcome::Pass } else { Outcome::Fail })
}
