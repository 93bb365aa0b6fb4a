use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::ExpressionError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_expression},
    },
};

/// Parses a unary expression.
///
/// A leading `-` negates everything up to the next `*`, `/`, `+` or `-`,
/// powers included: `-2 ** 2` is `-(2 ** 2)`.
///
/// Grammar:
/// ```text
///     unary := "-" unary
///            | power
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, position)) = tokens.peek() {
        let position = *position;
        tokens.next();
        let expr = parse_unary(tokens)?;
        Ok(Expr::UnaryOp { op: UnaryOperator::Negate,
                           expr: Box::new(expr),
                           position })
    } else {
        parse_power(tokens)
    }
}

/// Parses exponentiation.
///
/// `**` is right-associative and its right operand may carry its own sign:
/// `2 ** 3 ** 2` is `2 ** (3 ** 2)` and `2 ** -1` is `0.5`.
///
/// Grammar: `power := primary ("**" unary)?`
fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_primary(tokens)?;
    if let Some((Token::DoubleStar, position)) = tokens.peek() {
        let position = *position;
        tokens.next();
        let exponent = parse_unary(tokens)?;
        return Ok(Expr::BinaryOp { left: Box::new(base),
                                   op: BinaryOperator::Pow,
                                   right: Box::new(exponent),
                                   position });
    }
    Ok(base)
}

/// Parses a primary (atomic) expression: a numeric literal or a
/// parenthesized expression.
///
/// Grammar: `primary := number | "(" expression ")"`
fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(value), position)) => Ok(Expr::Literal { value:    *value,
                                                                     position: *position, }),
        Some((Token::LParen, position)) => {
            let expr = parse_expression(tokens)?;
            match tokens.next() {
                Some((Token::RParen, _)) => Ok(expr),
                _ => Err(ExpressionError::ExpectedClosingParen { position: *position }),
            }
        },
        Some((token, position)) => Err(ExpressionError::UnexpectedToken { token:    token.to_string(),
                                                                          position: *position, }),
        None => Err(ExpressionError::UnexpectedEndOfInput),
    }
}
