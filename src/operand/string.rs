use std::fmt::Display;

use crate::{
    operand::capability::{Capabilities, Capability},
    value::Value,
};

/// Constant text.
///
/// Strings only support equality. Ordering and membership are deliberately
/// left out: reading a string as a collection of characters makes "is a
/// substring of" and "is a member of" indistinguishable, so callers that need
/// either must use a dedicated operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringConstant {
    value: String,
}

impl StringConstant {
    pub const CAPABILITIES: Capabilities = Capabilities::of(&[Capability::Equality]);

    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { value: text.into() }
    }

    /// Builds a string from any value, using its canonical text form.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self { value: value.to_text() }
    }

    #[must_use]
    pub fn constant_value(&self) -> &str {
        &self.value
    }

    /// Compares the text form of `value` with this string.
    ///
    /// # Example
    /// ```
    /// use operanda::{operand::StringConstant, value::Value};
    ///
    /// let five = StringConstant::new("5");
    ///
    /// assert!(five.equals(&Value::Integer(5)));
    /// assert!(!five.equals(&Value::Real(5.5)));
    /// ```
    #[must_use]
    pub fn equals(&self, value: &Value) -> bool {
        value.to_text() == self.value
    }
}

impl Display for StringConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.value)
    }
}
