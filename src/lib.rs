//! # Tabletest
//!
//! Table-driven test execution: run a function against a list of
//! `(tag, args, kwargs, expects)` cases, classify each call as pass, fail or
//! error, and aggregate the counts per test and per function.
//!
//! - [`value`]: dynamic values for arguments, results and expectations
//! - [`raised`]: errors raised by functions under test, and their kinds
//! - [`format`]: argument rendering and truncation for diagnostics
//! - [`tags`]: the fixed tag registry
//! - [`runner`]: single-case and batch runners, JSON case tables
//! - [`results`]: outcomes and the aggregation tree
//! - [`output`], [`config`], [`diagnostics`]: reporting, settings, errors

pub use crate::diagnostics::{TableResult, TableTestError};

pub mod config;
pub mod diagnostics;
pub mod format;
pub mod output;
pub mod raised;
pub mod results;
pub mod runner;
pub mod tags;
pub mod value;

pub mod prelude {
    pub use crate::config::{RunConfig, TagMode};
    pub use crate::diagnostics::{TableResult, TableTestError};
    pub use crate::output::{OutputBuffer, OutputSink, StdoutSink};
    pub use crate::raised::{ErrorKind, Raised};
    pub use crate::results::{Aggregate, Counts, Outcome};
    pub use crate::runner::{run_case, run_tests, BatchReport, Case, CaseReport, Expect, Function};
    pub use crate::tags::{op, Tag, TagSpec};
    pub use crate::value::{Kwargs, Value, ValueType};
}
