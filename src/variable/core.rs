use std::fmt::Debug;

use crate::{
    context::Context,
    error::OperandResult,
    operand::Capabilities,
    value::{SetValue, Value},
};

/// An operand whose value lives in the context.
///
/// Implementations never cache a value: every method reads `context` afresh,
/// which is what makes one instance reusable across any number of contexts
/// and threads.
///
/// Only [`Variable::to_value`] is required. The comparison methods default to
/// comparing the freshly resolved value with the right-hand side: numerically
/// for numbers, by text for text, by truth value for booleans and by content
/// for sets. Which of them may actually be called is governed by
/// [`Variable::capabilities`], checked by [`Operand`] before dispatching.
///
/// [`Operand`]: crate::operand::Operand
///
/// # Example
/// ```
/// use operanda::{
///     context::Context,
///     error::{OperandError, OperandResult},
///     operand::{Capabilities, Capability, Operand},
///     value::Value,
///     variable::Variable,
/// };
/// use serde_json::json;
///
/// #[derive(Debug)]
/// struct Temperature;
///
/// impl Variable for Temperature {
///     fn name(&self) -> &str {
///         "temperature"
///     }
///
///     fn capabilities(&self) -> Capabilities {
///         Capabilities::of(&[Capability::Equality, Capability::Inequality])
///     }
///
///     fn to_value(&self, context: &Context) -> OperandResult<Value> {
///         context.lookup(&["temperature"])
///                .and_then(Value::from_json)
///                .ok_or_else(|| OperandError::MissingContextValue { path: "temperature".into() })
///     }
/// }
///
/// let temperature = Operand::variable(Temperature);
/// let hot = Context::new(json!({ "temperature": 31 }));
/// let cold = Context::new(json!({ "temperature": 4 }));
///
/// assert!(temperature.greater_than(&Value::Integer(25), &hot).unwrap());
/// assert!(!temperature.greater_than(&Value::Integer(25), &cold).unwrap());
/// ```
pub trait Variable: Debug + Send + Sync {
    /// Name used when the variable is displayed.
    fn name(&self) -> &str;

    /// The comparison categories this variable supports.
    fn capabilities(&self) -> Capabilities;

    /// Reads the value from `context`.
    ///
    /// # Errors
    /// Fails if `context` does not hold a suitable value.
    fn to_value(&self, context: &Context) -> OperandResult<Value>;

    /// # Errors
    /// Fails if the value cannot be read or `value` cannot be coerced.
    #[allow(clippy::float_cmp)]
    fn equals(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        match self.to_value(context)? {
            Value::Text(actual) => Ok(actual == value.to_text()),
            Value::Bool(actual) => Ok(actual == value.as_bool()),
            Value::Set(actual) => Ok(actual == *value.as_set()?),
            actual => Ok(actual.as_real()? == value.as_real()?),
        }
    }

    /// # Errors
    /// Fails if either side has no numeric reading.
    fn greater_than(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        Ok(self.to_value(context)?.as_real()? > value.as_real()?)
    }

    /// # Errors
    /// Fails if either side has no numeric reading.
    fn less_than(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        Ok(self.to_value(context)?.as_real()? < value.as_real()?)
    }

    /// # Errors
    /// Fails if the variable does not resolve to a set.
    fn belongs_to(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        let actual = self.to_value(context)?;
        Ok(actual.as_set()?.contains(&SetValue::from(value)))
    }

    /// # Errors
    /// Fails if the variable or `value` is not a set.
    fn is_subset(&self, value: &Value, context: &Context) -> OperandResult<bool> {
        let actual = self.to_value(context)?;
        Ok(value.as_set()?.is_subset(actual.as_set()?))
    }

    /// # Errors
    /// Fails if the value cannot be read.
    fn is_true(&self, context: &Context) -> OperandResult<bool> {
        Ok(self.to_value(context)?.as_bool())
    }
}
