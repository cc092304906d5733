//! # Raised Errors
//!
//! Failures produced by a function under test. A function returns
//! `Result<Value, Raised>`; the runner classifies the `Err` side against an
//! expected [`ErrorKind`] instead of unwinding through the harness.
//!
//! ## Kind Hierarchy
//!
//! ```text
//! Exception
//! ├── Arithmetic ── ZeroDivision, Overflow
//! ├── Lookup ────── Index, Key
//! ├── Value
//! ├── Type
//! ├── Runtime ───── NotImplemented
//! ├── Assertion
//! ├── Panic
//! └── Custom(name)
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// A kind of raised error. `Exception` is the universal kind every other kind
/// descends from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    Exception,
    Arithmetic,
    ZeroDivision,
    Overflow,
    Lookup,
    Index,
    Key,
    Value,
    Type,
    Runtime,
    NotImplemented,
    Assertion,
    /// A panic caught while calling the function under test.
    Panic,
    /// A caller-defined kind, placed directly under `Exception`.
    Custom(Arc<str>),
}

impl ErrorKind {
    const BUILTIN: [ErrorKind; 13] = [
        ErrorKind::Exception,
        ErrorKind::Arithmetic,
        ErrorKind::ZeroDivision,
        ErrorKind::Overflow,
        ErrorKind::Lookup,
        ErrorKind::Index,
        ErrorKind::Key,
        ErrorKind::Value,
        ErrorKind::Type,
        ErrorKind::Runtime,
        ErrorKind::NotImplemented,
        ErrorKind::Assertion,
        ErrorKind::Panic,
    ];

    /// Resolves a kind by name. Unknown names become `Custom` kinds.
    pub fn named(name: &str) -> ErrorKind {
        Self::BUILTIN
            .iter()
            .find(|kind| kind.name() == name)
            .cloned()
            .unwrap_or_else(|| ErrorKind::Custom(Arc::from(name)))
    }

    pub fn name(&self) -> &str {
        match self {
            ErrorKind::Exception => "Exception",
            ErrorKind::Arithmetic => "Arithmetic",
            ErrorKind::ZeroDivision => "ZeroDivision",
            ErrorKind::Overflow => "Overflow",
            ErrorKind::Lookup => "Lookup",
            ErrorKind::Index => "Index",
            ErrorKind::Key => "Key",
            ErrorKind::Value => "Value",
            ErrorKind::Type => "Type",
            ErrorKind::Runtime => "Runtime",
            ErrorKind::NotImplemented => "NotImplemented",
            ErrorKind::Assertion => "Assertion",
            ErrorKind::Panic => "Panic",
            ErrorKind::Custom(name) => name,
        }
    }

    /// The direct parent kind; `None` only for `Exception`.
    pub fn parent(&self) -> Option<ErrorKind> {
        match self {
            ErrorKind::Exception => None,
            ErrorKind::ZeroDivision | ErrorKind::Overflow => Some(ErrorKind::Arithmetic),
            ErrorKind::Index | ErrorKind::Key => Some(ErrorKind::Lookup),
            ErrorKind::NotImplemented => Some(ErrorKind::Runtime),
            _ => Some(ErrorKind::Exception),
        }
    }

    /// True if `self` is `other` or descends from it.
    pub fn is_subkind_of(&self, other: &ErrorKind) -> bool {
        let mut current = Some(self.clone());
        while let Some(kind) = current {
            if &kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error raised by a function under test (or by a tag predicate).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct Raised {
    pub kind: ErrorKind,
    pub message: String,
}

impl Raised {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn value_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Value, message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, message)
    }

    pub fn zero_division(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ZeroDivision, message)
    }

    pub fn key_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Key, message)
    }

    pub fn index_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Index, message)
    }

    /// True if this error is an instance of `kind` (or one of its sub-kinds).
    pub fn is_instance_of(&self, kind: &ErrorKind) -> bool {
        self.kind.is_subkind_of(kind)
    }

    /// Builds a `Panic` error from a `catch_unwind` payload.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        Self::new(ErrorKind::Panic, message)
    }
}
