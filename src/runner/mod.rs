//! # Runners
//!
//! A [`Function`] under test is run against a table of [`Case`]s. Each case
//! names a tag, the positional and named arguments, and what the call should
//! produce: a value, or an error of some [`ErrorKind`].
//!
//! ```rust
//! use tabletest::prelude::*;
//! use tabletest::{args, kwargs};
//!
//! fn div(args: &[Value], _: &Kwargs) -> Result<Value, Raised> {
//!     match (&args[0], &args[1]) {
//!         (Value::Int(_), Value::Int(0)) => Err(Raised::zero_division("division by zero")),
//!         (Value::Int(a), Value::Int(b)) => Ok(Value::from(a / b)),
//!         _ => Err(Raised::type_error("div expects ints")),
//!     }
//! }
//!
//! let cases = vec![
//!     Case::new("EQ", args![6, 3], kwargs!(), 2),
//!     Case::new("RAISE", args![1, 0], kwargs!(), ErrorKind::ZeroDivision),
//! ];
//! let mut results = Aggregate::new();
//! let mut sink = OutputBuffer::new();
//! let report = run_tests(
//!     "test_div",
//!     &Function::new("div", div),
//!     &cases,
//!     &RunConfig::quiet(),
//!     Some(&mut results),
//!     &mut sink,
//! )
//! .unwrap();
//! assert!(report.counts.all_passed());
//! assert_eq!(results.test("test_div").unwrap().function("div").unwrap().count, 2);
//! ```

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::raised::{ErrorKind, Raised};
use crate::results::{Counts, Outcome};
use crate::tags::TagSpec;
use crate::value::{Kwargs, Value, ValueType};

pub mod batch;
pub mod case;
pub mod table;

pub use batch::run_tests;
pub use case::run_case;
pub use table::cases_from_json;

type CallFn = dyn Fn(&[Value], &Kwargs) -> Result<Value, Raised>;

/// A named function under test. The name is its identity in the
/// aggregation tree: two functions built with the same name share one
/// `functions` entry.
pub struct Function {
    name: String,
    call: Box<CallFn>,
}

impl Function {
    pub fn new<F>(name: impl Into<String>, call: F) -> Self
    where
        F: Fn(&[Value], &Kwargs) -> Result<Value, Raised> + 'static,
    {
        Self {
            name: name.into(),
            call: Box::new(call),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calls the function. A panic is caught and returned as a `Panic` error.
    pub fn call(&self, args: &[Value], kwargs: &Kwargs) -> Result<Value, Raised> {
        catch_unwind(AssertUnwindSafe(|| (self.call)(args, kwargs)))
            .unwrap_or_else(|payload| Err(Raised::from_panic(payload)))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("name", &self.name).finish()
    }
}

/// What a case expects the call to produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Expect {
    Value(Value),
    /// The call must fail with an error of this kind (or a sub-kind).
    Raises(ErrorKind),
}

impl Expect {
    /// The error kind asked for, whether written as [`Expect::Raises`] or as
    /// an error type value.
    pub fn raises(&self) -> Option<&ErrorKind> {
        match self {
            Expect::Raises(kind) | Expect::Value(Value::Type(ValueType::Error(kind))) => Some(kind),
            Expect::Value(_) => None,
        }
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expect::Value(value) => write!(f, "{}", value),
            Expect::Raises(kind) => write!(f, "{}", ValueType::Error(kind.clone())),
        }
    }
}

/// An error type given as a value is an error expectation.
impl From<Value> for Expect {
    fn from(value: Value) -> Self {
        match value {
            Value::Type(ValueType::Error(kind)) => Expect::Raises(kind),
            other => Expect::Value(other),
        }
    }
}

impl From<ErrorKind> for Expect {
    fn from(kind: ErrorKind) -> Self {
        Expect::Raises(kind)
    }
}

macro_rules! impl_expect_from_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Expect {
                fn from(value: $ty) -> Self {
                    Expect::Value(Value::from(value))
                }
            }
        )+
    };
}

impl_expect_from_value!(bool, i32, i64, usize, f64, &str, String, Vec<Value>, Kwargs);

/// One row of a test table: `(tag, args, kwargs, expects)`.
///
/// `args` must be a list and `kwargs` a map; both are checked when the case
/// runs, not when it is built.
#[derive(Debug, Clone)]
pub struct Case {
    pub tag: TagSpec,
    pub args: Value,
    pub kwargs: Value,
    pub expects: Expect,
}

impl Case {
    pub fn new(
        tag: impl Into<TagSpec>,
        args: impl Into<Value>,
        kwargs: impl Into<Value>,
        expects: impl Into<Expect>,
    ) -> Self {
        Self {
            tag: tag.into(),
            args: args.into(),
            kwargs: kwargs.into(),
            expects: expects.into(),
        }
    }
}

/// What [`run_case`] reports for one case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    pub function: String,
    /// `name(args...)`, as printed in diagnostics.
    pub code: String,
    pub outcome: Outcome,
    pub counts: Counts,
}

/// What [`run_tests`] reports for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub test_name: String,
    pub counts: Counts,
}

/// Wraps a plain function as a [`Function`] named after it.
#[macro_export]
macro_rules! function {
    ($f:path) => {
        $crate::runner::Function::new(stringify!($f), $f)
    };
}

/// Positional arguments as a list value: `args![1, "a"]`.
#[macro_export]
macro_rules! args {
    () => {
        $crate::value::Value::list(::std::vec::Vec::new())
    };
    ($($v:expr),+ $(,)?) => {
        $crate::value::Value::list(vec![$($crate::value::Value::from($v)),+])
    };
}

/// Named arguments as a map value: `kwargs!("x" => 1, "y" => 2)`.
#[macro_export]
macro_rules! kwargs {
    () => {
        $crate::value::Value::map($crate::value::Kwargs::new())
    };
    ($($k:expr => $v:expr),+ $(,)?) => {{
        let mut map = $crate::value::Kwargs::new();
        $(
            map.insert(::std::string::String::from($k), $crate::value::Value::from($v));
        )+
        $crate::value::Value::map(map)
    }};
}
