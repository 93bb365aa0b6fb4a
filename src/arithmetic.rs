/// Nested token input.
pub mod token_tree;

/// Arithmetic expressions over variables: identifier resolution and the
/// two-stage substitution pipeline.
pub mod expression;

pub use self::{
    expression::{ArithmeticExpression, DEFAULT_SEPARATOR, SubstitutionStage},
    token_tree::TokenTree,
};
