/// The name-resolution contract.
pub mod core;

/// Explicit, scoped variable bindings.
pub mod registry;

/// Identifiers read as context paths.
pub mod path;

pub use self::{core::Namespace, path::PathNamespace, registry::Registry};
