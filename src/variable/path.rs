use crate::{
    context::Context,
    error::{OperandError, OperandResult},
    operand::{Capabilities, Capability},
    value::Value,
    variable::core::Variable,
};

/// How a [`PathVariable`] reads the JSON found at its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A double; numeric text is accepted.
    Number,
    /// An exact integer; numeric text is accepted.
    Integer,
    /// A truth value; non-boolean JSON is read by truthiness.
    Bool,
    /// Text; other scalars are read through their text form.
    Text,
    /// An array, read as a set.
    Set,
}

impl FieldKind {
    /// Capabilities of variables of this kind.
    #[must_use]
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::Number | Self::Integer => {
                Capabilities::of(&[Capability::Equality, Capability::Inequality])
            },
            Self::Bool => Capabilities::of(&[Capability::Equality, Capability::Boolean]),
            Self::Text => Capabilities::of(&[Capability::Equality]),
            Self::Set => Capabilities::of(&[Capability::Equality, Capability::Membership]),
        }
    }

    const fn expected(self) -> &'static str {
        match self {
            Self::Number => "a number",
            Self::Integer => "an integer",
            Self::Bool => "a boolean",
            Self::Text => "text",
            Self::Set => "an array",
        }
    }
}

/// A variable read from a fixed path in the context.
///
/// With a history attached, index `0` reads the path as is, while index `n`
/// reads the same field from the `n`-th entry of the history collection that
/// sits next to it: `stock.price` with history `data` and index `3` reads
/// `stock.data.3.price`.
///
/// # Example
/// ```
/// use operanda::{
///     context::Context,
///     value::Value,
///     variable::{FieldKind, PathVariable, Variable},
/// };
/// use serde_json::json;
///
/// let context = Context::new(json!({
///     "stock": { "price": 12.5, "data": { "3": { "price": 10.0 } } }
/// }));
///
/// let today = PathVariable::new(["stock", "price"], FieldKind::Number);
/// let earlier = today.clone().with_history("data", 3);
///
/// assert_eq!(today.to_value(&context).unwrap(), Value::Real(12.5));
/// assert_eq!(earlier.to_value(&context).unwrap(), Value::Real(10.0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathVariable {
    name:    String,
    path:    Vec<String>,
    kind:    FieldKind,
    history: Option<(String, usize)>,
}

impl PathVariable {
    pub fn new<S: Into<String>>(path: impl IntoIterator<Item = S>, kind: FieldKind) -> Self {
        let path: Vec<String> = path.into_iter().map(Into::into).collect();
        Self { name: path.join("."),
               path,
               kind,
               history: None }
    }

    /// Reads the field from entry `index` of the sibling collection `key`.
    #[must_use]
    pub fn with_history(mut self, key: impl Into<String>, index: usize) -> Self {
        self.history = Some((key.into(), index));
        self
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The path actually looked up, with the history step applied.
    #[must_use]
    pub fn resolved_path(&self) -> Vec<String> {
        match (&self.history, self.path.split_last()) {
            (Some((key, index)), Some((leaf, parents))) if *index != 0 => {
                let mut path = parents.to_vec();
                path.push(key.clone());
                path.push(index.to_string());
                path.push(leaf.clone());
                path
            },
            _ => self.path.clone(),
        }
    }

    fn mismatch(&self, path: &[String], found: String) -> OperandError {
        OperandError::ContextTypeMismatch { path: path.join("."),
                                            found,
                                            expected: self.kind.expected() }
    }
}

impl Variable for PathVariable {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    fn to_value(&self, context: &Context) -> OperandResult<Value> {
        let path = self.resolved_path();
        let json = context.lookup(&path)
                          .ok_or_else(|| OperandError::MissingContextValue { path: path.join(".") })?;
        let raw = Value::from_json(json).ok_or_else(|| self.mismatch(&path, json.to_string()))?;

        match self.kind {
            FieldKind::Number => raw.as_real()
                                    .map(Value::Real)
                                    .map_err(|_| self.mismatch(&path, raw.to_text())),
            FieldKind::Integer => raw.as_exact_integer()
                                     .map(Value::Integer)
                                     .map_err(|_| self.mismatch(&path, raw.to_text())),
            FieldKind::Bool => Ok(Value::Bool(raw.as_bool())),
            FieldKind::Text => Ok(Value::Text(raw.to_text())),
            FieldKind::Set => match raw {
                Value::Set(_) => Ok(raw),
                other => Err(self.mismatch(&path, other.to_text())),
            },
        }
    }
}
