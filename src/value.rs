use std::fmt;
use std::sync::Arc;

use im::OrdMap;

use crate::raised::{ErrorKind, Raised};

/// Named arguments, ordered by name.
pub type Kwargs = OrdMap<String, Value>;

/// A value passed to, or returned from, a function under test.
///
/// Strings, lists and maps are reference counted so that identity (the `IS`
/// tag) can be observed through pointer equality.
///
/// # Examples
///
/// ```rust
/// use tabletest::value::{Value, ValueType};
/// let n = Value::from(3);
/// assert_eq!(n.type_of(), ValueType::Int);
/// assert_eq!(Value::from("hi").repr(), "\"hi\"");
/// assert!(Value::default().is_nil());
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    List(Arc<Vec<Value>>),
    Map(Arc<Kwargs>),
    Type(ValueType),
    Error(Raised),
}

/// The type of a [`Value`], usable as a value itself (`Value::Type`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    /// Supertype of every type.
    Object,
    Nil,
    Bool,
    Int,
    Float,
    Str,
    List,
    Map,
    Type,
    Error(ErrorKind),
}

impl ValueType {
    pub fn name(&self) -> &str {
        match self {
            ValueType::Object => "object",
            ValueType::Nil => "nil",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Str => "str",
            ValueType::List => "list",
            ValueType::Map => "map",
            ValueType::Type => "type",
            ValueType::Error(kind) => kind.name(),
        }
    }

    pub fn is_subtype_of(&self, other: &ValueType) -> bool {
        match (self, other) {
            (_, ValueType::Object) => true,
            (ValueType::Error(a), ValueType::Error(b)) => a.is_subkind_of(b),
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<type {}>", self.name())
    }
}

impl Value {
    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Arc::new(items))
    }

    pub fn map(kwargs: Kwargs) -> Value {
        Value::Map(Arc::new(kwargs))
    }

    pub fn type_of(&self) -> ValueType {
        match self {
            Value::Nil => ValueType::Nil,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::Str,
            Value::List(_) => ValueType::List,
            Value::Map(_) => ValueType::Map,
            Value::Type(_) => ValueType::Type,
            Value::Error(raised) => ValueType::Error(raised.kind.clone()),
        }
    }

    /// Type name used in diagnostics.
    pub fn type_name(&self) -> String {
        self.type_of().name().to_string()
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Kwargs> {
        match self {
            Value::Map(map) => Some(map.as_ref()),
            _ => None,
        }
    }

    /// Truthiness: nil, false, zero and empty containers are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::Type(_) | Value::Error(_) => true,
        }
    }

    /// Identity: shared strings, lists and maps must be the same allocation;
    /// every other value is identical to an equal value.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Arc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            (Value::Int(_), Value::Float(_)) | (Value::Float(_), Value::Int(_)) => false,
            (a, b) => a == b,
        }
    }

    /// Unambiguous rendering used in call texts and by the `REPR` tag.
    pub fn repr(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => format!("{:?}", n),
            Value::Str(s) => format!("{:?}", s),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::repr).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Map(map) => {
                let inner: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{:?}: {}", k, v.repr()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            Value::Type(ty) => ty.to_string(),
            Value::Error(raised) => format!("{}({:?})", raised.kind, raised.message),
        }
    }
}

/// Human rendering (the `STR` tag): strings print bare, errors print as
/// `Kind: message`, everything else as its repr.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Error(raised) => write!(f, "{}", raised),
            other => f.write_str(&other.repr()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (Value::Bool(a), Value::Int(b)) | (Value::Int(b), Value::Bool(a)) => {
                i64::from(*a) == *b
            }
            (Value::Bool(a), Value::Float(b)) | (Value::Float(b), Value::Bool(a)) => {
                f64::from(u8::from(*a)) == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! impl_from_for_value {
    ($($ty:ty => |$v:ident| $body:expr),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from($v: $ty) -> Self {
                    $body
                }
            }
        )+
    };
}

impl_from_for_value! {
    bool => |b| Value::Bool(b),
    i32 => |n| Value::Int(n as i64),
    i64 => |n| Value::Int(n),
    usize => |n| Value::Int(n as i64),
    f64 => |n| Value::Float(n),
    &str => |s| Value::Str(Arc::from(s)),
    String => |s| Value::Str(Arc::from(s)),
    Vec<Value> => |items| Value::list(items),
    Kwargs => |map| Value::map(map),
    ValueType => |ty| Value::Type(ty),
    ErrorKind => |kind| Value::Type(ValueType::Error(kind)),
    Raised => |raised| Value::Error(raised),
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(items) => {
                Value::list(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => {
                Value::map(fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
