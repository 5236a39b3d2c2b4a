use std::{collections::HashMap, fmt, sync::Arc};

use chrono::NaiveDateTime;

use crate::{context::Context, evaluator::EvalError};

/// Display format for timestamps (also accepted by `datetime()`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A runtime value.
///
/// Expressions can only produce the scalar kinds, timestamps and arrays.
/// `Object` and `Function` values enter through context bindings: objects
/// are the nested mappings that dotted variable paths descend into, and
/// functions can be handed to `reduce`.
///
/// # Examples
///
/// ```
/// use anise_lang::Value;
///
/// let integer = Value::Integer(42);
/// let float = Value::Float(2.5);
/// let list = Value::Array(vec![integer.clone(), float.clone()]);
///
/// assert_eq!(list.type_name(), "array");
/// assert_eq!(list.to_string(), "[42, 2.5]");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer
    Integer(i64),

    /// 64-bit float
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Boolean (true/false)
    Boolean(bool),

    /// Point in time without a time zone
    Timestamp(NaiveDateTime),

    /// Ordered list of values; element kinds may differ
    Array(Vec<Value>),

    /// Nested mapping, addressable with dotted variable paths
    Object(HashMap<String, Value>),

    /// Host function passed in through the context
    Function(NativeFunction),
}

impl Value {
    /// Human-readable name of the value's kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Boolean(_) => "bool",
            Value::Timestamp(_) => "time",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    /// Numeric value with integers promoted to float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Timestamp(t) => write!(f, "{}", t.format(TIMESTAMP_FORMAT)),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                // Sort keys for deterministic output
                let mut keys: Vec<_> = map.keys().collect();
                keys.sort();
                f.write_str("{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {}", map[key])?;
                }
                f.write_str("}")
            }
            Value::Function(func) => write!(f, "<function {}>", func.name()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(t: NaiveDateTime) -> Self {
        Value::Timestamp(t)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

/// Signature shared by every builtin and host function.
pub type HostFn = dyn Fn(&Context, &[Value]) -> Result<Value, EvalError> + Send + Sync;

/// A named host function. Cloning shares the underlying closure.
#[derive(Clone)]
pub struct NativeFunction {
    name: Arc<str>,
    func: Arc<HostFn>,
}

impl NativeFunction {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Context, &[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        NativeFunction {
            name: Arc::from(name.into()),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, ctx: &Context, args: &[Value]) -> Result<Value, EvalError> {
        (self.func)(ctx, args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NativeFunction").field(&self.name).finish()
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.func, &other.func)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_display_nested() {
        let value = Value::Array(vec![
            Value::Integer(1),
            Value::String("two".into()),
            Value::Array(vec![Value::Boolean(true)]),
        ]);
        assert_eq!(value.to_string(), "[1, two, [true]]");
    }

    #[test]
    fn test_display_timestamp() {
        let t = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(12, 30, 0))
            .unwrap();
        assert_eq!(Value::Timestamp(t).to_string(), "2024-03-01 12:30:00");
    }

    #[test]
    fn test_object_display_sorted() {
        let mut map = HashMap::new();
        map.insert("b".to_string(), Value::Integer(2));
        map.insert("a".to_string(), Value::Integer(1));
        assert_eq!(Value::Object(map).to_string(), "{a: 1, b: 2}");
    }

    #[test]
    fn test_function_equality_is_identity() {
        let f = NativeFunction::new("f", |_, _| Ok(Value::Integer(1)));
        let g = NativeFunction::new("f", |_, _| Ok(Value::Integer(1)));
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }
}
