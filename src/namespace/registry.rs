use std::{collections::HashMap, sync::Arc};

use crate::{
    error::{OperandError, OperandResult},
    namespace::core::Namespace,
    variable::Variable,
};

/// A tree of explicitly bound variables.
///
/// Each registry level holds the variables bound directly in it plus named
/// sub-scopes, so the same bare name may mean different variables in
/// different scopes.
///
/// # Example
/// ```
/// use operanda::{
///     namespace::{Namespace, Registry},
///     variable::{FieldKind, PathVariable, Variable},
/// };
///
/// let mut registry = Registry::new();
/// registry.bind("x", PathVariable::new(["x"], FieldKind::Number));
/// registry.scope_mut("ns")
///         .bind("x", PathVariable::new(["other", "x"], FieldKind::Number));
///
/// assert_eq!(registry.get_object("x", &[]).unwrap().name(), "x");
/// assert_eq!(registry.get_object("x", &["ns"]).unwrap().name(), "other.x");
/// assert!(registry.get_object("y", &["ns"]).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    variables: HashMap<String, Arc<dyn Variable>>,
    scopes:    HashMap<String, Registry>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `variable` to `name` at this level, replacing any previous
    /// binding.
    pub fn bind(&mut self, name: impl Into<String>, variable: impl Variable + 'static) -> &mut Self {
        self.bind_shared(name, Arc::new(variable))
    }

    /// Binds an already shared variable.
    pub fn bind_shared(&mut self,
                       name: impl Into<String>,
                       variable: Arc<dyn Variable>)
                       -> &mut Self {
        self.variables.insert(name.into(), variable);
        self
    }

    /// The sub-scope `name`, created empty if it does not exist yet.
    pub fn scope_mut(&mut self, name: impl Into<String>) -> &mut Self {
        self.scopes.entry(name.into()).or_default()
    }

    #[must_use]
    pub fn scope(&self, name: &str) -> Option<&Self> {
        self.scopes.get(name)
    }
}

impl Namespace for Registry {
    fn get_object(&self, name: &str, scopes: &[&str]) -> OperandResult<Arc<dyn Variable>> {
        scopes.iter()
              .try_fold(self, |level, scope| level.scope(scope))
              .and_then(|level| level.variables.get(name))
              .cloned()
              .ok_or_else(|| OperandError::UnresolvedIdentifier { name:   name.to_string(),
                                                                  scopes: scopes.iter()
                                                                                .map(ToString::to_string)
                                                                                .collect(), })
    }
}
