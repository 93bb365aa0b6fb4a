use std::fmt::Display;

use crate::{
    error::{OperandError, OperandResult},
    operand::capability::{Capabilities, Capability},
    value::Value,
};

/// Constant number.
///
/// The literal is converted to a double once, at construction. Comparisons
/// coerce the right-hand value to a double as well and fail with
/// [`OperandError::CoercionFailure`] when that is impossible. Ordering follows
/// IEEE semantics, NaN included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberConstant {
    value: f64,
}

impl NumberConstant {
    pub const CAPABILITIES: Capabilities =
        Capabilities::of(&[Capability::Equality, Capability::Inequality]);

    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self { value }
    }

    /// Builds a number from a literal that may still be text.
    ///
    /// # Errors
    /// Returns [`OperandError::NonNumericLiteral`] if `literal` has no numeric
    /// reading.
    ///
    /// # Example
    /// ```
    /// use operanda::{operand::NumberConstant, value::Value};
    ///
    /// let n = NumberConstant::try_from_value(&Value::from("2.5")).unwrap();
    /// assert_eq!(n.constant_value(), 2.5);
    ///
    /// assert!(NumberConstant::try_from_value(&Value::from("abc")).is_err());
    /// ```
    pub fn try_from_value(literal: &Value) -> OperandResult<Self> {
        literal.as_real()
               .map(Self::new)
               .map_err(|_| OperandError::NonNumericLiteral { value: literal.to_text() })
    }

    #[must_use]
    pub const fn constant_value(&self) -> f64 {
        self.value
    }

    /// # Errors
    /// Fails if `value` cannot be turned into a double.
    #[allow(clippy::float_cmp)]
    pub fn equals(&self, value: &Value) -> OperandResult<bool> {
        Ok(self.value == value.as_real()?)
    }

    /// # Errors
    /// Fails if `value` cannot be turned into a double.
    pub fn greater_than(&self, value: &Value) -> OperandResult<bool> {
        Ok(self.value > value.as_real()?)
    }

    /// # Errors
    /// Fails if `value` cannot be turned into a double.
    pub fn less_than(&self, value: &Value) -> OperandResult<bool> {
        Ok(self.value < value.as_real()?)
    }
}

impl Display for NumberConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
