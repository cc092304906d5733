//! Case tables written as JSON.
//!
//! ```json
//! [
//!   ["EQ",    [6, 3], {},           2],
//!   ["RAISE", [1, 0], {},           {"raises": "ZeroDivision"}],
//!   ["EQ",    [1],    {"scale": 3}, 3]
//! ]
//! ```
//!
//! Only the table layout is checked here. Tag names and the shapes of `args`
//! and `kwargs` are checked when a case runs, like any other case.

use crate::diagnostics::{TableResult, TableTestError};
use crate::raised::ErrorKind;
use crate::value::Value;

use super::{Case, Expect};

pub fn cases_from_json(text: &str) -> TableResult<Vec<Case>> {
    let table: serde_json::Value =
        serde_json::from_str(text).map_err(|e| TableTestError::Table {
            message: "invalid JSON".to_string(),
            source: Some(e),
        })?;
    let serde_json::Value::Array(rows) = table else {
        return Err(TableTestError::table("expected an array of cases"));
    };
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| case_from_row(index, row))
        .collect()
}

fn case_from_row(index: usize, row: serde_json::Value) -> TableResult<Case> {
    let shape_error = || {
        TableTestError::table(format!(
            "case {}: expected [tag, args, kwargs, expects]",
            index
        ))
    };
    let serde_json::Value::Array(fields) = row else {
        return Err(shape_error());
    };
    let Ok([tag, args, kwargs, expects]) = <[serde_json::Value; 4]>::try_from(fields) else {
        return Err(shape_error());
    };
    let serde_json::Value::String(tag) = tag else {
        return Err(TableTestError::table(format!(
            "case {}: tag must be a string",
            index
        )));
    };

    Ok(Case::new(
        tag,
        Value::from(args),
        Value::from(kwargs),
        expectation(expects),
    ))
}

/// `{"raises": "<kind>"}` is an error expectation, anything else a value.
fn expectation(json: serde_json::Value) -> Expect {
    if let serde_json::Value::Object(fields) = &json {
        if fields.len() == 1 {
            if let Some(serde_json::Value::String(kind)) = fields.get("raises") {
                return Expect::Raises(ErrorKind::named(kind));
            }
        }
    }
    Expect::Value(Value::from(json))
}
