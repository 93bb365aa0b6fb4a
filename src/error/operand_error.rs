use thiserror::Error;

use crate::{
    error::ExpressionError,
    operand::{Capability, OperandKind},
};

/// Represents all errors raised by operands, variables and namespaces.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperandError {
    /// A comparison was invoked outside the capability set of the operand
    /// kind.
    #[error("{kind} operands do not support {capability} operations (called '{operation}').")]
    UnsupportedOperation {
        /// Kind of the operand that was asked.
        kind:       OperandKind,
        /// Capability the operation belongs to.
        capability: Capability,
        /// Name of the operation that was called.
        operation:  &'static str,
    },
    /// The right-hand value cannot be converted to the type the comparison
    /// needs.
    #[error("\"{value}\" is not {expected}.")]
    CoercionFailure {
        /// Text form of the offending value.
        value:    String,
        /// What the value should have been, e.g. `"a number"`.
        expected: &'static str,
    },
    /// A set was built with an item that is not an operand.
    #[error("Item \"{item}\" is not an operand, so it cannot be a member of a set.")]
    NonOperandMember {
        /// Text form of the rejected item.
        item: String,
    },
    /// A numeric literal could not be converted to a double.
    #[error("Literal \"{value}\" is not a number.")]
    NonNumericLiteral {
        /// Text form of the rejected literal.
        value: String,
    },
    /// An identifier could not be resolved by the namespace.
    #[error("Cannot resolve '{name}' in scope '{}'.", .scopes.join(":"))]
    UnresolvedIdentifier {
        /// Bare name that was looked up.
        name:   String,
        /// Scope chain the name was looked up in, outermost first.
        scopes: Vec<String>,
    },
    /// A token looks like a variable reference (it holds a letter or the
    /// separator) but is not a well-formed identifier.
    #[error("Token \"{token}\" is not a valid identifier.")]
    InvalidIdentifier {
        /// The rejected token.
        token: String,
    },
    /// A namespace separator must be a non-empty string.
    #[error("The namespace separator cannot be empty.")]
    EmptySeparator,
    /// Raw expression text could not be split into tokens.
    #[error("Cannot tokenize expression: {0}")]
    Tokenize(#[source] ExpressionError),
    /// The substituted arithmetic expression is outside the restricted
    /// numeric grammar, or failed while being evaluated.
    #[error("Cannot evaluate '{expression}': {source}")]
    UnsafeExpression {
        /// The expression text after variable substitution.
        expression: String,
        /// What the restricted evaluator rejected.
        #[source]
        source:     ExpressionError,
    },
    /// Two operands are not structurally equivalent.
    #[error("{details}")]
    EquivalenceMismatch {
        /// Human readable description of the mismatch.
        details:   String,
        /// Elements that could not be matched, if the mismatch is between
        /// sets.
        unmatched: Vec<String>,
    },
    /// The context has no value at the requested path.
    #[error("Context has no value at '{path}'.")]
    MissingContextValue {
        /// Dotted path that was looked up.
        path: String,
    },
    /// The context holds a value of the wrong shape at the requested path.
    #[error("Context value at '{path}' is {found}, expected {expected}.")]
    ContextTypeMismatch {
        /// Dotted path that was looked up.
        path:     String,
        /// Description of what was found.
        found:    String,
        /// Description of what was expected.
        expected: &'static str,
    },
}

impl OperandError {
    /// Whether this error only says that a value does not fit the operand it
    /// was compared against.
    ///
    /// Set membership treats such failures as "this member does not match"
    /// and keeps scanning; every other error aborts the comparison.
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::CoercionFailure { .. } | Self::UnsupportedOperation { .. })
    }
}
