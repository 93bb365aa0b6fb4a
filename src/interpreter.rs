use logos::Logos;

use crate::{
    error::ExpressionError,
    interpreter::{evaluator::core::eval, lexer::Token, parser::core::parse},
};

/// The evaluator module folds a parsed expression into a number.
///
/// # Responsibilities
/// - Evaluates literals, negation and the five binary operators.
/// - Reports arithmetic faults such as division by zero.
pub mod evaluator;
/// The lexer module tokenizes expression text.
///
/// Only numeric literals, `+ - * / **` and parentheses are tokens. Any other
/// character, letters included, makes lexing fail, so identifiers, calls and
/// statements never reach the parser.
pub mod lexer;
/// The parser module builds the expression tree from tokens.
///
/// A recursive-descent parser with the usual precedence: additive,
/// multiplicative, unary minus, right-associative power, primary.
pub mod parser;

/// Upper bound on the number of tokens one expression may have.
///
/// Keeps the recursive-descent parser's stack depth bounded.
pub const MAX_TOKENS: usize = 1024;

/// Tokenizes `source`, pairing every token with its byte offset.
///
/// # Errors
/// Fails on the first slice that is not a token of the grammar, and on
/// expressions longer than [`MAX_TOKENS`].
///
/// # Example
/// ```
/// use operanda::{error::ExpressionError, interpreter::lex};
///
/// assert_eq!(lex("1 + 2").unwrap().len(), 3);
/// assert!(matches!(lex("1; import os"),
///                  Err(ExpressionError::UnexpectedCharacter { position: 1, .. })));
/// ```
pub fn lex(source: &str) -> Result<Vec<(Token, usize)>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = lexer.span().start;
        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(()) => {
                let text = lexer.slice().to_string();
                if text.parse::<f64>().is_ok_and(f64::is_infinite) {
                    return Err(ExpressionError::LiteralTooLarge { text });
                }
                return Err(ExpressionError::UnexpectedCharacter { text, position });
            },
        }
        if tokens.len() > MAX_TOKENS {
            return Err(ExpressionError::TooManyTokens { limit: MAX_TOKENS });
        }
    }

    Ok(tokens)
}

/// Evaluates an expression of the restricted numeric grammar.
///
/// The grammar accepts numeric literals, `+`, `-`, `*`, `/`, `**`,
/// parentheses and unary minus, nothing else. Text containing names,
/// calls, attribute access or statements is rejected before anything is
/// evaluated.
///
/// # Errors
/// Returns the lexing, parsing or arithmetic error that stopped evaluation.
///
/// # Example
/// ```
/// use operanda::interpreter::evaluate;
///
/// assert_eq!(evaluate("2 ** 3 ** 2").unwrap(), 512.0);
/// assert_eq!(evaluate("-2**2").unwrap(), -4.0);
/// assert_eq!(evaluate("(1 + 2) * 3 / 2").unwrap(), 4.5);
/// assert!(evaluate("__import__('os')").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<f64, ExpressionError> {
    let tokens = lex(source)?;
    let expr = parse(&tokens)?;
    eval(&expr)
}
