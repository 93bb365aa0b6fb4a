use std::{
    collections::HashSet,
    fmt::Display,
    hash::{DefaultHasher, Hash, Hasher},
};

use ordered_float::OrderedFloat;

use crate::value::core::Value;

/// Enum representing values allowed in resolved sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetValue {
    /// Any number; integers are widened to doubles.
    Number(OrderedFloat<f64>),
    /// A boolean such as `true`.
    Bool(bool),
    /// A piece of text such as `"AAPL"`.
    Text(String),
    /// A nested set.
    Set(HashSet<SetValue>),
}

impl From<&Value> for SetValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: &Value) -> Self {
        match v {
            Value::Integer(i) => Self::Number(OrderedFloat(*i as f64)),
            Value::Real(r) => Self::Number(OrderedFloat(*r)),
            Value::Bool(b) => Self::Bool(*b),
            Value::Text(t) => Self::Text(t.clone()),
            Value::Set(set) => Self::Set(set.clone()),
        }
    }
}

impl From<Value> for SetValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Text(t) => Self::Text(t),
            Value::Set(set) => Self::Set(set),
            other => Self::from(&other),
        }
    }
}

impl From<SetValue> for Value {
    fn from(s: SetValue) -> Self {
        match s {
            SetValue::Number(n) => Self::Real(n.into_inner()),
            SetValue::Bool(b) => Self::Bool(b),
            SetValue::Text(t) => Self::Text(t),
            SetValue::Set(set) => Self::Set(set),
        }
    }
}

impl Hash for SetValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Number(n) => {
                state.write_u8(0);
                n.hash(state);
            },
            Self::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            },
            Self::Text(t) => {
                state.write_u8(2);
                t.hash(state);
            },
            Self::Set(set) => {
                state.write_u8(3);
                // Order independent: sum of the element hashes.
                let combined = set.iter()
                                  .map(|item| {
                                      let mut hasher = DefaultHasher::new();
                                      item.hash(&mut hasher);
                                      hasher.finish()
                                  })
                                  .fold(0u64, u64::wrapping_add);
                combined.hash(state);
            },
        }
    }
}

impl Display for SetValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: Value = self.clone().into();
        write!(f, "{value}")
    }
}
