use crate::any_value::AnyValue;
use crate::error::SetError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::Arc;

/// A dynamically typed set element
///
/// Every set in this crate stores `Value`s, which lets a single set hold
/// integers, floats, strings and user types side by side. Values of different
/// variants are never equal, so `Value::Int(1)`, `Value::Uint(1)` and
/// `Value::Float(1.0)` are three distinct elements.
///
/// `List` and `Map` can be represented but are never admissible as set
/// elements; inserting one (or a `Tuple` containing one) fails with
/// [`SetError::InadmissibleElement`]. They exist so that dynamic input can be
/// rejected cleanly, and so that a `List` can serve as an extension source.
///
/// # Float identity
///
/// Floats are compared by a canonical bit pattern: `-0.0` equals `0.0`, and
/// every NaN equals every other NaN, so a NaN that was inserted can be found
/// and removed again.
#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
    Str(Arc<str>),
    /// A fixed composite, admissible when all of its members are
    Tuple(Vec<Value>),
    /// A slice or array; never admissible
    List(Vec<Value>),
    /// A map; never admissible
    Map(Vec<(Value, Value)>),
    /// A user type carrying its own equality and hash
    Any(AnyValue),
}

/// Routing label used by [`TypedSetGroup`](crate::TypedSetGroup)
///
/// Integers, floats and strings each get a dedicated partition. Everything
/// else shares the `Any` partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Int,
    Float,
    String,
    Any,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeTag::Int => write!(f, "int"),
            TypeTag::Float => write!(f, "float"),
            TypeTag::String => write!(f, "string"),
            TypeTag::Any => write!(f, "any"),
        }
    }
}

fn float_bits(value: f64) -> u64 {
    if value == 0.0 {
        0
    } else if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

impl Value {
    /// Wrap a user type as a set element
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_set::{Set, Value};
    ///
    /// #[derive(Debug, PartialEq, Eq, Hash)]
    /// struct Empty;
    ///
    /// let mut set = Set::new();
    /// set.add(Value::any(Empty)).unwrap();
    /// assert!(set.contains(&Value::any(Empty)));
    /// ```
    pub fn any<T>(value: T) -> Self
    where
        T: std::any::Any + Eq + Hash + fmt::Debug + Send + Sync,
    {
        Value::Any(AnyValue::new(value))
    }

    /// Build a tuple from any sequence of values
    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// A short name for the kind of this value, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Any(any) => any.type_name(),
        }
    }

    /// Classify the value for type-partitioned storage
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Int(_) | Value::Uint(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Str(_) => TypeTag::String,
            _ => TypeTag::Any,
        }
    }

    /// Check whether the value may be stored in a set
    ///
    /// # Errors
    ///
    /// Returns `SetError::InadmissibleElement` naming the first list or map
    /// found in the value.
    pub fn check_admissible(&self) -> Result<(), SetError> {
        match self {
            Value::List(_) | Value::Map(_) => {
                Err(SetError::InadmissibleElement(self.kind().to_string()))
            }
            Value::Tuple(items) => items.iter().try_for_each(Value::check_admissible),
            _ => Ok(()),
        }
    }

    /// Returns true if the value may be stored in a set
    pub fn is_admissible(&self) -> bool {
        self.check_admissible().is_ok()
    }

    /// The signed integer held by an `Int`
    ///
    /// Unsigned integers share the `Int` partition of a group but are a
    /// separate variant; read them with [`Value::as_uint`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The unsigned integer held by a `Uint`
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// The float held by a `Float`
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The text held by a `Str`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    /// Returns true for `Nil`
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_bits(*a) == float_bits(*b),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Any(a), Value::Any(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Value::Nil => {}
            Value::Bool(v) => v.hash(state),
            Value::Int(v) => v.hash(state),
            Value::Uint(v) => v.hash(state),
            Value::Float(v) => float_bits(*v).hash(state),
            Value::Char(v) => v.hash(state),
            Value::Str(v) => v.hash(state),
            Value::Tuple(items) | Value::List(items) => items.hash(state),
            Value::Map(entries) => entries.hash(state),
            Value::Any(v) => v.hash(state),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter, items: &[Value], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i != 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Uint(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_joined(f, items, ", ")?;
                write!(f, ")")
            }
            Value::List(items) => {
                write!(f, "[")?;
                write_joined(f, items, " ")?;
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "map[")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i != 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}:{}", key, value)?;
                }
                write!(f, "]")
            }
            Value::Any(v) => write!(f, "{:?}", v),
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($source:ty),*) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::$variant(value as $target)
                }
            }
        )*
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64, isize);
impl_from_int!(Uint, u64, u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<Arc<str>> for Value {
    fn from(value: Arc<str>) -> Self {
        Value::Str(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl From<AnyValue> for Value {
    fn from(value: AnyValue) -> Self {
        Value::Any(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(values: [T; N]) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}
