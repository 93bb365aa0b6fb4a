use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ExpressionError,
    interpreter::{lexer::Token, parser::binary::parse_additive},
};

pub type ParseResult<T> = Result<T, ExpressionError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, addition, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := additive`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_additive(tokens)
}

/// Parses a complete token sequence into a single expression.
///
/// # Errors
/// Fails on any grammar violation, including tokens left over after a
/// complete expression (`1 2`).
///
/// # Example
/// ```
/// use operanda::interpreter::{lex, parser::core::parse};
///
/// let tokens = lex("2 * (3 + 4)").unwrap();
/// assert!(parse(&tokens).is_ok());
///
/// let tokens = lex("2 3").unwrap();
/// assert!(parse(&tokens).is_err());
/// ```
pub fn parse(tokens: &[(Token, usize)]) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter)?;

    if let Some((token, position)) = iter.next() {
        return Err(ExpressionError::TrailingTokens { token:    token.to_string(),
                                                     position: *position, });
    }
    Ok(expr)
}
