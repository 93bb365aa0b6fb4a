/// Restricted arithmetic errors.
///
/// Defines every failure of the safe numeric evaluator: characters outside
/// the grammar, malformed expressions, and arithmetic faults such as division
/// by zero.
pub mod expression_error;
/// Operand errors.
///
/// Contains the errors surfaced by operand methods: unsupported operations,
/// failed coercions, construction failures, unsafe expressions, structural
/// mismatches and context lookups.
pub mod operand_error;

pub use expression_error::ExpressionError;
pub use operand_error::OperandError;

/// Result type used by operands, variables and namespaces.
pub type OperandResult<T> = Result<T, OperandError>;
