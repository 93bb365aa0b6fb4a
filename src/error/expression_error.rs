use thiserror::Error;

/// Represents all errors that can occur while lexing, parsing or evaluating a
/// restricted arithmetic expression.
///
/// Positions are byte offsets into the expression text that was handed to the
/// evaluator (after variable substitution).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    /// Found text that is not part of the arithmetic grammar.
    #[error("Unexpected input '{text}' at position {position}.")]
    UnexpectedCharacter {
        /// The offending slice of the expression.
        text:     String,
        /// Byte offset of the slice.
        position: usize,
    },
    /// Found a valid token in a place where it is not allowed.
    #[error("Unexpected token '{token}' at position {position}.")]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// The expression has more tokens than the evaluator accepts.
    #[error("Expression has more than {limit} tokens.")]
    TooManyTokens {
        /// The token limit.
        limit: usize,
    },
    /// Reached the end of input while an operand was still expected.
    #[error("Unexpected end of expression.")]
    UnexpectedEndOfInput,
    /// A closing parenthesis `)` was expected but not found.
    #[error("Expected closing parenthesis ')' for the group opened at position {position}.")]
    ExpectedClosingParen {
        /// Byte offset of the unmatched `(`.
        position: usize,
    },
    /// Found extra tokens after a complete expression.
    #[error("Extra tokens after expression at position {position}: {token}")]
    TrailingTokens {
        /// The first extra token.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// A numeric literal does not fit in a double.
    #[error("Literal '{text}' is too large.")]
    LiteralTooLarge {
        /// The literal as written.
        text: String,
    },
    /// Attempted division by zero (also raised for `0 ** negative`).
    #[error("Division by zero.")]
    DivisionByZero,
    /// A power of a negative base with a fractional exponent has no real
    /// result.
    #[error("{base} ** {exponent} has no real result.")]
    ComplexResult {
        /// The base of the power.
        base:     f64,
        /// The exponent of the power.
        exponent: f64,
    },
    /// A power of finite operands overflowed to infinity.
    #[error("Numerical result out of range while computing {base} ** {exponent}.")]
    Overflow {
        /// The base of the power.
        base:     f64,
        /// The exponent of the power.
        exponent: f64,
    },
}
