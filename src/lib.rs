//! # operanda
//!
//! operanda is the operand layer of a boolean rule engine written in Rust.
//! It provides typed constants and context-bound variables, each exposing a
//! capability-gated set of comparisons (equality, ordering, membership,
//! truth) that are evaluated lazily against a context supplied at call time,
//! and an arithmetic operand that evaluates numeric expressions over
//! variables without ever executing code.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    arithmetic::ArithmeticExpression,
    context::Context,
    error::{ExpressionError, OperandError, OperandResult},
    namespace::{Namespace, PathNamespace},
    operand::ArithmeticConstant,
};

/// Arithmetic expressions over variables.
///
/// This module turns a grammar's nested token tree into an
/// `ArithmeticExpression`: identifiers are resolved to variables once, and
/// each evaluation substitutes their current values (qualified names first,
/// bare names second) before handing the purely numeric text to the
/// restricted evaluator.
///
/// # Responsibilities
/// - Flattens nested token groups in order.
/// - Resolves qualified and bare identifiers through a namespace.
/// - Runs the two-stage substitution pipeline and evaluates the result.
pub mod arithmetic;
/// Defines the tree of the restricted arithmetic grammar.
///
/// The tree only has literals, negation and the five arithmetic operators,
/// so there is nothing in it that could name or call anything.
pub mod ast;
/// The data operands are evaluated against.
///
/// Wraps a JSON document and offers read-only path lookup.
pub mod context;
/// Provides unified error types.
///
/// # Responsibilities
/// - `OperandError` for everything an operand method can fail with.
/// - `ExpressionError` for the restricted arithmetic evaluator.
pub mod error;
/// The restricted numeric evaluator.
///
/// A lexer, a recursive-descent parser and a tree evaluator for numeric
/// literals, `+ - * / **`, parentheses and unary minus. Anything else is
/// rejected before evaluation starts.
pub mod interpreter;
/// Name resolution.
///
/// The `Namespace` contract plus two implementations: an explicit scoped
/// registry and a namespace that reads identifiers as context paths.
pub mod namespace;
/// Operands and their capabilities.
///
/// # Responsibilities
/// - Declares the capability set of every operand kind.
/// - Implements the String, Number, Arithmetic and Set constants.
/// - Dispatches comparisons on the operand variant after checking
///   capabilities.
pub mod operand;
/// Splits arithmetic source text into token trees.
pub mod tokenizer;
/// General utilities for safe numeric conversion.
pub mod util;
/// Resolved domain values and their coercions.
pub mod value;
/// Operands whose value is read from the context.
pub mod variable;

/// Parses `source` into an arithmetic operand whose identifiers are resolved
/// through `namespace`.
///
/// # Errors
/// Returns [`OperandError::UnsafeExpression`] if `source` holds characters
/// outside the arithmetic grammar (`1; import os`),
/// [`OperandError::Tokenize`] for unbalanced parentheses, and the
/// construction errors of [`ArithmeticExpression::with_separator`].
///
/// # Example
/// ```
/// use operanda::{context::Context, namespace::PathNamespace, parse_arithmetic};
/// use serde_json::json;
///
/// let operand = parse_arithmetic("(high + low) / 2", &PathNamespace::default(), ":").unwrap();
/// let context = Context::new(json!({ "high": 12, "low": 8 }));
///
/// assert_eq!(operand.evaluate(&context).unwrap(), 10.0);
/// ```
pub fn parse_arithmetic(source: &str,
                        namespace: &dyn Namespace,
                        separator: &str)
                        -> OperandResult<ArithmeticConstant> {
    let tokens = tokenizer::tokenize(source, separator).map_err(|e| tokenize_failure(source, e))?;
    ArithmeticExpression::with_separator(tokens, namespace, separator).map(ArithmeticConstant::from)
}

/// Evaluates `source` against `context`, reading every identifier as a
/// context path (`stock:price` reads `stock.price`).
///
/// # Errors
/// Returns an error if parsing, variable lookup or evaluation fails.
///
/// # Example
/// ```
/// use operanda::{context::Context, get_result};
/// use serde_json::json;
///
/// let context = Context::new(json!({ "stock": { "price": 4 }, "price": 1 }));
///
/// assert_eq!(get_result("stock:price + price", &context, ":").unwrap(), 5.0);
/// assert!(get_result("volume * 2", &context, ":").is_err());
/// ```
pub fn get_result(source: &str, context: &Context, separator: &str) -> OperandResult<f64> {
    parse_arithmetic(source, &PathNamespace::default(), separator)?.evaluate(context)
}

/// Characters outside the grammar make the source unsafe; anything else is a
/// structural tokenizer failure.
fn tokenize_failure(source: &str, error: ExpressionError) -> OperandError {
    match error {
        ExpressionError::UnexpectedCharacter { .. } => {
            OperandError::UnsafeExpression { expression: source.to_string(),
                                             source:     error, }
        },
        other => OperandError::Tokenize(other),
    }
}
