use std::collections::HashSet;

use serde_json::Value as JsonValue;

use crate::{
    error::{OperandError, OperandResult},
    util::num::{f64_to_i64_exact, i64_to_f64_checked},
    value::set_value::SetValue,
};

/// Represents a resolved domain value.
///
/// This is what an operand produces under a context, and what the right-hand
/// side of every comparison is expressed as. Comparisons never assume the
/// right-hand side already has the operand's type: they coerce it with one of
/// the `as_*` helpers below, which fail with
/// [`OperandError::CoercionFailure`] instead of guessing.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64 bit integer.
    Integer(i64),
    /// A double precision floating-point number.
    Real(f64),
    /// A boolean value.
    Bool(bool),
    /// A piece of text.
    Text(String),
    /// An unordered collection of unique values.
    Set(HashSet<SetValue>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<HashSet<SetValue>> for Value {
    fn from(v: HashSet<SetValue>) -> Self {
        Self::Set(v)
    }
}

impl<V: Into<Self>> FromIterator<V> for Value {
    /// Collects values into a `Value::Set`; duplicates collapse.
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        Self::Set(iter.into_iter().map(|v| SetValue::from(v.into())).collect())
    }
}

impl Value {
    /// Converts the value to an `f64`, or returns an error if it has no
    /// numeric reading.
    ///
    /// Integers convert when they are exactly representable, booleans become
    /// `1.0`/`0.0`, and text is parsed after trimming surrounding whitespace.
    ///
    /// # Example
    /// ```
    /// use operanda::value::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_real().unwrap(), 10.0);
    /// assert_eq!(Value::from(" 2.5 ").as_real().unwrap(), 2.5);
    /// assert!(Value::from("ten").as_real().is_err());
    /// ```
    pub fn as_real(&self) -> OperandResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => i64_to_f64_checked(*n, self.coercion_failure("a number")),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Text(t) => t.trim()
                              .parse::<f64>()
                              .map_err(|_| self.coercion_failure("a number")),
            Self::Set(_) => Err(self.coercion_failure("a number")),
        }
    }

    /// Converts the value to an `i64`, requiring the conversion to be exact.
    ///
    /// `2.0` and `"2"` convert; `2.5` is an error rather than being truncated.
    ///
    /// # Example
    /// ```
    /// use operanda::value::Value;
    ///
    /// assert_eq!(Value::Real(2.0).as_exact_integer().unwrap(), 2);
    /// assert!(Value::Real(2.5).as_exact_integer().is_err());
    /// ```
    pub fn as_exact_integer(&self) -> OperandResult<i64> {
        let error = || self.coercion_failure("an integer");
        match self {
            Self::Integer(n) => Ok(*n),
            Self::Real(r) => f64_to_i64_exact(*r, error()),
            Self::Bool(b) => Ok(i64::from(*b)),
            Self::Text(t) => t.trim().parse::<i64>().map_err(|_| error()),
            Self::Set(_) => Err(error()),
        }
    }

    /// Returns the set held by this value, or an error for scalars.
    pub fn as_set(&self) -> OperandResult<&HashSet<SetValue>> {
        match self {
            Self::Set(set) => Ok(set),
            _ => Err(self.coercion_failure("a set")),
        }
    }

    /// Returns the truth value: non-zero numbers, `true`, non-empty text and
    /// non-empty sets are true.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Integer(n) => *n != 0,
            Self::Real(r) => *r != 0.0,
            Self::Bool(b) => *b,
            Self::Text(t) => !t.is_empty(),
            Self::Set(set) => !set.is_empty(),
        }
    }

    /// Returns the canonical text form of the value.
    ///
    /// Integral reals print without a fraction, so `Real(5.0)` and
    /// `Integer(5)` both read `"5"`.
    ///
    /// # Example
    /// ```
    /// use operanda::value::Value;
    ///
    /// assert_eq!(Value::Real(5.0).to_text(), "5");
    /// assert_eq!(Value::Real(-0.25).to_text(), "-0.25");
    /// assert_eq!(Value::Bool(true).to_text(), "true");
    /// ```
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(t) => t.clone(),
            other => other.to_string(),
        }
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "an integer",
            Self::Real(_) => "a real",
            Self::Bool(_) => "a boolean",
            Self::Text(_) => "text",
            Self::Set(_) => "a set",
        }
    }

    /// Converts a JSON leaf into a value.
    ///
    /// Numbers, booleans and strings map onto their obvious variants and
    /// arrays become sets. `null` and objects have no value representation
    /// and yield `None`.
    ///
    /// # Example
    /// ```
    /// use operanda::value::Value;
    /// use serde_json::json;
    ///
    /// assert_eq!(Value::from_json(&json!(3)), Some(Value::Integer(3)));
    /// assert_eq!(Value::from_json(&json!(["a", "a", "b"])),
    ///            Some(["a", "b"].into_iter().collect()));
    /// assert_eq!(Value::from_json(&json!({ "a": 1 })), None);
    /// ```
    #[must_use]
    pub fn from_json(json: &JsonValue) -> Option<Self> {
        match json {
            JsonValue::Bool(b) => Some(Self::Bool(*b)),
            JsonValue::Number(n) => n.as_i64().map(Self::Integer).or_else(|| n.as_f64().map(Self::Real)),
            JsonValue::String(s) => Some(Self::Text(s.clone())),
            JsonValue::Array(items) => items.iter()
                                            .map(|item| Self::from_json(item).map(SetValue::from))
                                            .collect::<Option<HashSet<_>>>()
                                            .map(Self::Set),
            JsonValue::Null | JsonValue::Object(_) => None,
        }
    }

    fn coercion_failure(&self, expected: &'static str) -> OperandError {
        OperandError::CoercionFailure { value: self.to_text(),
                                        expected }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(t) => write!(f, "{t}"),
            Self::Set(set) => {
                let mut items: Vec<String> = set.iter().map(ToString::to_string).collect();
                items.sort();
                write!(f, "{{{}}}", items.join(", "))
            },
        }
    }
}
