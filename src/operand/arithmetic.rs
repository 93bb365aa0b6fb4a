use std::fmt::Display;

use crate::{
    arithmetic::{ArithmeticExpression, TokenTree},
    context::Context,
    error::OperandResult,
    namespace::Namespace,
    operand::capability::{Capabilities, Capability},
    value::Value,
};

/// Number-like constant whose value is an arithmetic expression over
/// variables.
///
/// The expression is fixed at construction; its value is computed afresh
/// under each context. Comparisons behave like [`NumberConstant`]'s, against
/// the evaluated result.
///
/// [`NumberConstant`]: crate::operand::NumberConstant
#[derive(Debug, Clone)]
pub struct ArithmeticConstant {
    expression: ArithmeticExpression,
}

impl ArithmeticConstant {
    pub const CAPABILITIES: Capabilities =
        Capabilities::of(&[Capability::Equality, Capability::Inequality]);

    /// Resolves the identifiers of `tokens` through `namespace`.
    ///
    /// # Errors
    /// See [`ArithmeticExpression::with_separator`].
    pub fn new(tokens: Vec<TokenTree>,
               namespace: &dyn Namespace,
               separator: &str)
               -> OperandResult<Self> {
        ArithmeticExpression::with_separator(tokens, namespace, separator).map(Self::from)
    }

    #[must_use]
    pub const fn constant_value(&self) -> &ArithmeticExpression {
        &self.expression
    }

    /// # Errors
    /// See [`ArithmeticExpression::evaluate`].
    pub fn evaluate(&self, context: &Context) -> OperandResult<f64> {
        self.expression.evaluate(context)
    }

    /// # Errors
    /// Fails if `value` cannot be turned into a double or the expression
    /// cannot be evaluated.
    #[allow(clippy::float_cmp)]
    pub fn equals(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        let expected = value.as_real()?;
        Ok(self.evaluate(context)? == expected)
    }

    /// # Errors
    /// Fails if `value` cannot be turned into a double or the expression
    /// cannot be evaluated.
    pub fn greater_than(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        let expected = value.as_real()?;
        Ok(self.evaluate(context)? > expected)
    }

    /// # Errors
    /// Fails if `value` cannot be turned into a double or the expression
    /// cannot be evaluated.
    pub fn less_than(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        let expected = value.as_real()?;
        Ok(self.evaluate(context)? < expected)
    }
}

impl From<ArithmeticExpression> for ArithmeticConstant {
    fn from(expression: ArithmeticExpression) -> Self {
        Self { expression }
    }
}

impl Display for ArithmeticConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}
