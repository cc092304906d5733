//! # Diagnostics
//!
//! Errors that abort a run. These are validation failures of the case table
//! itself; failures of the function under test are never reported here, they
//! are classified and counted by the runners.

use miette::Diagnostic;
use thiserror::Error;

pub type TableResult<T> = Result<T, TableTestError>;

#[derive(Debug, Error, Diagnostic)]
pub enum TableTestError {
    #[error("for {function}, tag {tag} is not supported")]
    #[diagnostic(
        code(tabletest::tag),
        help("registered tags: BOOL, INT, FLOAT, STR, REPR, EQ, NE, IS, ISNOT, INSTANCE, NOTINSTANCE, SUBCLASS, NOTSUBCLASS, RAISE, ELSE")
    )]
    UnsupportedTag { function: String, tag: String },

    #[error("for {function}, args must be a list, not {found}")]
    #[diagnostic(code(tabletest::args), help("pass positional arguments as a list value"))]
    InvalidArgs { function: String, found: String },

    #[error("for {function}, kwargs must be a map, not {found}")]
    #[diagnostic(code(tabletest::kwargs), help("pass named arguments as a map value"))]
    InvalidKwargs { function: String, found: String },

    #[error("malformed case table: {message}")]
    #[diagnostic(
        code(tabletest::table),
        help("a table is a JSON array of [tag, args, kwargs, expects] rows")
    )]
    Table {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl TableTestError {
    pub(crate) fn table(message: impl Into<String>) -> Self {
        TableTestError::Table {
            message: message.into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_function() {
        let err = TableTestError::UnsupportedTag {
            function: "add".to_string(),
            tag: "NOPE".to_string(),
        };
        assert_eq!(err.to_string(), "for add, tag NOPE is not supported");
        assert_eq!(err.code().unwrap().to_string(), "tabletest::tag");

        let err = TableTestError::InvalidKwargs {
            function: "add".to_string(),
            found: "list".to_string(),
        };
        assert_eq!(err.to_string(), "for add, kwargs must be a map, not list");
        assert!(err.help().is_some());
    }
}
