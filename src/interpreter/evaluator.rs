/// Expression tree evaluation.
///
/// Walks the AST and folds it into a double.
pub mod core;

/// Binary operator evaluation.
///
/// Implements the arithmetic of `+`, `-`, `*`, `/` and `**`, including the
/// error cases (division by zero, complex powers, overflow).
pub mod binary;
