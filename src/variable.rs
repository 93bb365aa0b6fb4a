/// The variable contract.
pub mod core;

/// Variables read from a fixed path in the context.
pub mod path;

pub use self::{
    core::Variable,
    path::{FieldKind, PathVariable},
};
