use crate::{
    ast::BinaryOperator,
    error::ExpressionError,
    interpreter::evaluator::core::EvalResult,
};

/// Applies a binary operator to two evaluated operands.
///
/// Division by zero is an error rather than an infinity.
///
/// # Example
/// ```
/// use operanda::{ast::BinaryOperator, interpreter::evaluator::binary::eval_binary_op};
///
/// assert_eq!(eval_binary_op(BinaryOperator::Sub, 2.0, 5.0).unwrap(), -3.0);
/// assert!(eval_binary_op(BinaryOperator::Div, 1.0, 0.0).is_err());
/// ```
pub fn eval_binary_op(op: BinaryOperator, left: f64, right: f64) -> EvalResult<f64> {
    match op {
        BinaryOperator::Add => Ok(left + right),
        BinaryOperator::Sub => Ok(left - right),
        BinaryOperator::Mul => Ok(left * right),
        BinaryOperator::Div => {
            if right == 0.0 {
                Err(ExpressionError::DivisionByZero)
            } else {
                Ok(left / right)
            }
        },
        BinaryOperator::Pow => eval_pow(left, right),
    }
}

/// Evaluates `base ** exponent` over the reals.
///
/// `0 ** negative` is a division by zero, a negative base with a fractional
/// exponent has no real result, and a finite power that overflows is an
/// error.
///
/// # Example
/// ```
/// use operanda::{error::ExpressionError, interpreter::evaluator::binary::eval_pow};
///
/// assert_eq!(eval_pow(2.0, -1.0).unwrap(), 0.5);
/// assert_eq!(eval_pow(-8.0, 0.5), Err(ExpressionError::ComplexResult { base: -8.0, exponent: 0.5 }));
/// assert_eq!(eval_pow(0.0, -2.0), Err(ExpressionError::DivisionByZero));
/// ```
pub fn eval_pow(base: f64, exponent: f64) -> EvalResult<f64> {
    if base == 0.0 && exponent < 0.0 {
        return Err(ExpressionError::DivisionByZero);
    }
    if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
        return Err(ExpressionError::ComplexResult { base, exponent });
    }

    let result = base.powf(exponent);
    if result.is_infinite() && base.is_finite() && exponent.is_finite() {
        return Err(ExpressionError::Overflow { base, exponent });
    }
    Ok(result)
}
