//! # Tag Registry
//!
//! Tags name the comparison used to judge a case. The set is fixed: every tag
//! is a variant of [`Tag`], registered once in a process-wide lookup table and
//! mirrored as named constants in [`op`].
//!
//! | Tag | Predicate over `(actual, expected)` |
//! |---|---|
//! | `BOOL` | truthiness of `actual` equals `expected` |
//! | `INT` | integer cast of `actual` equals `expected` |
//! | `FLOAT` | integer cast of `actual` equals `expected` (truncating) |
//! | `STR` | display string of `actual` equals `expected` |
//! | `REPR` | repr of `actual` equals `expected` |
//! | `EQ` / `NE` | equality / inequality |
//! | `IS` / `ISNOT` | identity / non-identity |
//! | `INSTANCE` / `NOTINSTANCE` | `actual` is (not) an instance of a type or list of types |
//! | `SUBCLASS` / `NOTSUBCLASS` | type `actual` is (not) a subtype |
//! | `RAISE` / `ELSE` | `actual` is (not) an error of a kind, default `Exception` |
//!
//! Registry invariant: [`registry`] is built once and never mutated.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::raised::{ErrorKind, Raised};
use crate::value::{Value, ValueType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Bool,
    Int,
    Float,
    Str,
    Repr,
    Eq,
    Ne,
    Is,
    IsNot,
    Instance,
    NotInstance,
    Subclass,
    NotSubclass,
    Raise,
    Else,
}

static REGISTRY: Lazy<BTreeMap<&'static str, Tag>> =
    Lazy::new(|| Tag::ALL.iter().map(|tag| (tag.name(), *tag)).collect());

/// The process-wide name → tag table.
pub fn registry() -> &'static BTreeMap<&'static str, Tag> {
    &REGISTRY
}

/// Named constants for every registered tag.
pub mod op {
    use super::Tag;

    pub const BOOL: Tag = Tag::Bool;
    pub const INT: Tag = Tag::Int;
    pub const FLOAT: Tag = Tag::Float;
    pub const STR: Tag = Tag::Str;
    pub const REPR: Tag = Tag::Repr;
    pub const EQ: Tag = Tag::Eq;
    pub const NE: Tag = Tag::Ne;
    pub const IS: Tag = Tag::Is;
    pub const ISNOT: Tag = Tag::IsNot;
    pub const INSTANCE: Tag = Tag::Instance;
    pub const NOTINSTANCE: Tag = Tag::NotInstance;
    pub const SUBCLASS: Tag = Tag::Subclass;
    pub const NOTSUBCLASS: Tag = Tag::NotSubclass;
    pub const RAISE: Tag = Tag::Raise;
    pub const ELSE: Tag = Tag::Else;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tag {0} is not supported")]
pub struct UnknownTag(pub String);

impl Tag {
    pub const ALL: [Tag; 15] = [
        Tag::Bool,
        Tag::Int,
        Tag::Float,
        Tag::Str,
        Tag::Repr,
        Tag::Eq,
        Tag::Ne,
        Tag::Is,
        Tag::IsNot,
        Tag::Instance,
        Tag::NotInstance,
        Tag::Subclass,
        Tag::NotSubclass,
        Tag::Raise,
        Tag::Else,
    ];

    /// The registered name, e.g. `"NOTINSTANCE"`.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Bool => "BOOL",
            Tag::Int => "INT",
            Tag::Float => "FLOAT",
            Tag::Str => "STR",
            Tag::Repr => "REPR",
            Tag::Eq => "EQ",
            Tag::Ne => "NE",
            Tag::Is => "IS",
            Tag::IsNot => "ISNOT",
            Tag::Instance => "INSTANCE",
            Tag::NotInstance => "NOTINSTANCE",
            Tag::Subclass => "SUBCLASS",
            Tag::NotSubclass => "NOTSUBCLASS",
            Tag::Raise => "RAISE",
            Tag::Else => "ELSE",
        }
    }

    pub fn lookup(name: &str) -> Option<Tag> {
        registry().get(name).copied()
    }

    /// The expectation used when none is given: the universal error kind for
    /// `RAISE`/`ELSE`, nothing for every other tag.
    pub fn default_expected(self) -> Option<Value> {
        match self {
            Tag::Raise | Tag::Else => Some(Value::from(ErrorKind::Exception)),
            _ => None,
        }
    }

    /// Applies the predicate. Casts that cannot be performed raise, the same
    /// way the function under test would.
    pub fn check(self, actual: &Value, expected: Option<&Value>) -> Result<bool, Raised> {
        let default;
        let expected = match expected {
            Some(expected) => expected,
            None => {
                default = self.default_expected().ok_or_else(|| {
                    Raised::type_error(format!("{} requires an expected value", self.name()))
                })?;
                &default
            }
        };

        match self {
            Tag::Bool => Ok(Value::Bool(actual.is_truthy()) == *expected),
            Tag::Int | Tag::Float => Ok(Value::Int(int_cast(actual)?) == *expected),
            Tag::Str => Ok(Value::from(actual.to_string()) == *expected),
            Tag::Repr => Ok(Value::from(actual.repr()) == *expected),
            Tag::Eq => Ok(actual == expected),
            Tag::Ne => Ok(actual != expected),
            Tag::Is => Ok(actual.is_identical(expected)),
            Tag::IsNot => Ok(!actual.is_identical(expected)),
            Tag::Instance | Tag::Raise => is_instance(actual, expected),
            Tag::NotInstance | Tag::Else => is_instance(actual, expected).map(|b| !b),
            Tag::Subclass => is_subclass(actual, expected),
            Tag::NotSubclass => is_subclass(actual, expected).map(|b| !b),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::lookup(s).ok_or_else(|| UnknownTag(s.to_string()))
    }
}

fn int_cast(value: &Value) -> Result<i64, Raised> {
    match value {
        Value::Int(n) => Ok(*n),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Float(n) if n.is_nan() => Err(Raised::value_error("cannot convert NaN to int")),
        Value::Float(n) if n.is_infinite() || n.trunc().abs() >= i64::MAX as f64 => Err(
            Raised::new(ErrorKind::Overflow, format!("cannot convert {} to int", n)),
        ),
        Value::Float(n) => Ok(n.trunc() as i64),
        Value::Str(s) => s.trim().parse().map_err(|_| {
            Raised::value_error(format!("invalid literal for int: {}", value.repr()))
        }),
        other => Err(Raised::type_error(format!(
            "cannot convert {} to int",
            other.type_name()
        ))),
    }
}

/// A single type or a list of types.
fn type_list(expected: &Value, role: &str) -> Result<Vec<ValueType>, Raised> {
    let not_a_type = || Raised::type_error(format!("{} must be a type or a list of types", role));
    match expected {
        Value::Type(ty) => Ok(vec![ty.clone()]),
        Value::List(items) => items
            .iter()
            .map(|item| match item {
                Value::Type(ty) => Ok(ty.clone()),
                _ => Err(not_a_type()),
            })
            .collect(),
        _ => Err(not_a_type()),
    }
}

fn is_instance(actual: &Value, expected: &Value) -> Result<bool, Raised> {
    let actual_type = actual.type_of();
    Ok(type_list(expected, "instance check argument")?
        .iter()
        .any(|ty| actual_type.is_subtype_of(ty)))
}

fn is_subclass(actual: &Value, expected: &Value) -> Result<bool, Raised> {
    let Value::Type(actual_type) = actual else {
        return Err(Raised::type_error(format!(
            "subclass check needs a type, not {}",
            actual.type_name()
        )));
    };
    Ok(type_list(expected, "subclass check argument")?
        .iter()
        .any(|ty| actual_type.is_subtype_of(ty)))
}

/// A caller-supplied predicate over `(actual, expected)`.
pub type CustomPredicate = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// How a case names its comparison: a registry name resolved at run time, an
/// already resolved tag, or a custom predicate.
#[derive(Clone)]
pub enum TagSpec {
    Named(String),
    Tag(Tag),
    Custom(CustomPredicate),
}

impl TagSpec {
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        TagSpec::Custom(Arc::new(predicate))
    }

    pub fn resolve(&self) -> Result<Comparator, UnknownTag> {
        match self {
            TagSpec::Named(name) => name.parse().map(Comparator::Builtin),
            TagSpec::Tag(tag) => Ok(Comparator::Builtin(*tag)),
            TagSpec::Custom(predicate) => Ok(Comparator::Custom(predicate.clone())),
        }
    }
}

impl fmt::Debug for TagSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagSpec::Named(name) => f.debug_tuple("Named").field(name).finish(),
            TagSpec::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            TagSpec::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl fmt::Display for TagSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagSpec::Named(name) => f.write_str(name),
            TagSpec::Tag(tag) => write!(f, "{}", tag),
            TagSpec::Custom(_) => f.write_str("<custom>"),
        }
    }
}

impl From<&str> for TagSpec {
    fn from(name: &str) -> Self {
        TagSpec::Named(name.to_string())
    }
}

impl From<String> for TagSpec {
    fn from(name: String) -> Self {
        TagSpec::Named(name)
    }
}

impl From<Tag> for TagSpec {
    fn from(tag: Tag) -> Self {
        TagSpec::Tag(tag)
    }
}

/// A resolved [`TagSpec`].
#[derive(Clone)]
pub enum Comparator {
    Builtin(Tag),
    Custom(CustomPredicate),
}

impl Comparator {
    pub fn check(&self, actual: &Value, expected: &Value) -> Result<bool, Raised> {
        match self {
            Comparator::Builtin(tag) => tag.check(actual, Some(expected)),
            Comparator::Custom(predicate) => Ok(predicate(actual, expected)),
        }
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Builtin(tag) => f.debug_tuple("Builtin").field(tag).finish(),
            Comparator::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
