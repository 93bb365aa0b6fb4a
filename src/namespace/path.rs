use std::sync::Arc;

use crate::{
    error::{OperandError, OperandResult},
    namespace::core::Namespace,
    variable::{FieldKind, PathVariable, Variable},
};

/// A namespace that maps every identifier onto the context path it spells.
///
/// `ns:x` resolves to a [`PathVariable`] reading `ns.x`, bare `x` to one
/// reading `x`. Nothing is checked at resolution time; a missing path only
/// surfaces when the variable is evaluated.
///
/// # Example
/// ```
/// use operanda::{
///     context::Context,
///     namespace::{Namespace, PathNamespace},
///     value::Value,
///     variable::Variable,
/// };
/// use serde_json::json;
///
/// let namespace = PathNamespace::default();
/// let variable = namespace.get_object("price", &["stock"]).unwrap();
/// let context = Context::new(json!({ "stock": { "price": 3 } }));
///
/// assert_eq!(variable.to_value(&context).unwrap(), Value::Real(3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathNamespace {
    kind: FieldKind,
}

impl PathNamespace {
    /// Resolves names to variables of the given kind.
    #[must_use]
    pub const fn new(kind: FieldKind) -> Self {
        Self { kind }
    }
}

impl Default for PathNamespace {
    fn default() -> Self {
        Self::new(FieldKind::Number)
    }
}

impl Namespace for PathNamespace {
    fn get_object(&self, name: &str, scopes: &[&str]) -> OperandResult<Arc<dyn Variable>> {
        if name.is_empty() || scopes.iter().any(|scope| scope.is_empty()) {
            return Err(OperandError::UnresolvedIdentifier { name:   name.to_string(),
                                                            scopes: scopes.iter()
                                                                          .map(ToString::to_string)
                                                                          .collect(), });
        }
        let path = scopes.iter().copied().chain(std::iter::once(name));
        Ok(Arc::new(PathVariable::new(path, self.kind)))
    }
}
