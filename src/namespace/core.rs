use std::sync::Arc;

use crate::{error::OperandResult, variable::Variable};

/// Resolves a possibly scope-qualified name to a variable.
///
/// `scopes` is the chain of scope names written before the bare `name`,
/// outermost first: `market:stock:price` arrives as
/// `("price", ["market", "stock"])`.
pub trait Namespace {
    /// # Errors
    /// Returns [`OperandError::UnresolvedIdentifier`] if nothing is bound to
    /// `name` in the given scope chain.
    ///
    /// [`OperandError::UnresolvedIdentifier`]: crate::error::OperandError::UnresolvedIdentifier
    fn get_object(&self, name: &str, scopes: &[&str]) -> OperandResult<Arc<dyn Variable>>;
}
