use crate::{
    ast::{Expr, UnaryOperator},
    error::ExpressionError,
    interpreter::evaluator::binary::eval_binary_op,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `ExpressionError` describing the failure.
pub type EvalResult<T> = Result<T, ExpressionError>;

/// Evaluates an expression tree to a double.
///
/// # Example
/// ```
/// use operanda::{
///     ast::{BinaryOperator, Expr},
///     interpreter::evaluator::core::eval,
/// };
///
/// let expr = Expr::BinaryOp { left:     Box::new(Expr::Literal { value: 6.0, position: 0 }),
///                             op:       BinaryOperator::Div,
///                             right:    Box::new(Expr::Literal { value: 4.0, position: 4 }),
///                             position: 2, };
///
/// assert_eq!(eval(&expr).unwrap(), 1.5);
/// ```
pub fn eval(expr: &Expr) -> EvalResult<f64> {
    match expr {
        Expr::Literal { value, .. } => Ok(*value),
        Expr::UnaryOp { op: UnaryOperator::Negate,
                        expr,
                        .. } => Ok(-eval(expr)?),
        Expr::BinaryOp { left, op, right, .. } => eval_binary_op(*op, eval(left)?, eval(right)?),
    }
}
