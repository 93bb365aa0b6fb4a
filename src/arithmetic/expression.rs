use std::{collections::HashMap, fmt::Display, sync::Arc};

use tracing::{debug, trace};

use crate::{
    arithmetic::token_tree::TokenTree,
    context::Context,
    error::{OperandError, OperandResult},
    interpreter,
    namespace::Namespace,
    variable::Variable,
};

/// Separator between scope names and the variable name in a qualified
/// identifier, as in `stock:price`.
pub const DEFAULT_SEPARATOR: &str = ":";

/// One stage of the substitution pipeline.
///
/// Qualified identifiers are replaced before bare ones. The order is part of
/// the contract: a bare name may be the tail of a qualified one (`x` and
/// `ns:x`), and both must keep denoting their own variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionStage {
    /// Identifiers containing the separator.
    Qualified,
    /// Identifiers without it.
    Bare,
}

impl SubstitutionStage {
    /// The stages, in the order they run.
    pub const PIPELINE: [Self; 2] = [Self::Qualified, Self::Bare];

    fn applies_to(self, identifier: &str, separator: &str) -> bool {
        identifier.contains(separator) == matches!(self, Self::Qualified)
    }
}

/// Whether `token` is a well-formed identifier.
///
/// An identifier does not start with a digit or `.`, is made of
/// alphanumerics, `_` and separators only, and contains at least one letter
/// or separator.
///
/// # Example
/// ```
/// use operanda::arithmetic::expression::is_identifier;
///
/// assert!(is_identifier("price", ":"));
/// assert!(is_identifier("stock:price", ":"));
/// assert!(is_identifier("sma_20", ":"));
/// assert!(!is_identifier("1e5", ":"));
/// assert!(!is_identifier("**", ":"));
/// assert!(!is_identifier("a.b", ":"));
/// ```
#[must_use]
pub fn is_identifier(token: &str, separator: &str) -> bool {
    if token.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return false;
    }
    invalid_character(token, separator).is_none()
    && (token.chars().any(char::is_alphabetic) || contains_separator(token, separator))
}

/// Whether `token` must be resolved as a variable reference.
///
/// Any token holding a letter or the separator refers to a variable, except
/// numeric literals such as `1e5` (or `1.5` when the separator is `.`).
/// Candidates that are not [well formed](is_identifier) make construction
/// fail.
///
/// # Example
/// ```
/// use operanda::arithmetic::expression::is_identifier_candidate;
///
/// assert!(is_identifier_candidate("price", ":"));
/// assert!(is_identifier_candidate("os.system", ":"));
/// assert!(is_identifier_candidate("__import__('os')", ":"));
/// assert!(!is_identifier_candidate("1e5", ":"));
/// assert!(!is_identifier_candidate("1.5", "."));
/// assert!(!is_identifier_candidate("**", ":"));
/// ```
#[must_use]
pub fn is_identifier_candidate(token: &str, separator: &str) -> bool {
    let numeric = token.starts_with(|c: char| c.is_ascii_digit() || c == '.')
                  && token.parse::<f64>().is_ok();
    !numeric && (token.chars().any(char::is_alphabetic) || contains_separator(token, separator))
}

/// Byte offset and value of the first character of `token` that cannot
/// appear in an identifier.
pub(crate) fn invalid_character(token: &str, separator: &str) -> Option<(usize, char)> {
    let mut offset = 0;
    while let Some(c) = token[offset..].chars().next() {
        if !separator.is_empty() && token[offset..].starts_with(separator) {
            offset += separator.len();
            continue;
        }
        if !(c.is_alphanumeric() || c == '_') {
            return Some((offset, c));
        }
        offset += c.len_utf8();
    }
    None
}

fn contains_separator(token: &str, separator: &str) -> bool {
    !separator.is_empty() && token.contains(separator)
}

/// A numeric expression that refers to variables.
///
/// Built once from the grammar's token tree: every identifier is resolved to
/// a [`Variable`] through a [`Namespace`] at construction, and that mapping
/// is all the expression keeps. Values are never cached; each
/// [`evaluate`](Self::evaluate) reads every variable from the context it is
/// given, substitutes the values, and hands the purely numeric text to the
/// restricted evaluator in [`crate::interpreter`].
///
/// # Example
/// ```
/// use operanda::{
///     arithmetic::{ArithmeticExpression, TokenTree},
///     context::Context,
///     namespace::PathNamespace,
/// };
/// use serde_json::json;
///
/// let tokens = vec![TokenTree::token("stock:price"),
///                   TokenTree::token("*"),
///                   TokenTree::token("qty")];
/// let expression = ArithmeticExpression::new(tokens, &PathNamespace::default()).unwrap();
///
/// let monday = Context::new(json!({ "stock": { "price": 2.5 }, "qty": 4 }));
/// let tuesday = Context::new(json!({ "stock": { "price": 3 }, "qty": 4 }));
///
/// assert_eq!(expression.evaluate(&monday).unwrap(), 10.0);
/// assert_eq!(expression.evaluate(&tuesday).unwrap(), 12.0);
/// ```
#[derive(Debug, Clone)]
pub struct ArithmeticExpression {
    tokens:    Vec<TokenTree>,
    flattened: Vec<String>,
    variables: HashMap<String, Arc<dyn Variable>>,
    separator: String,
}

impl ArithmeticExpression {
    /// Builds an expression using [`DEFAULT_SEPARATOR`].
    ///
    /// # Errors
    /// See [`Self::with_separator`].
    pub fn new(tokens: Vec<TokenTree>, namespace: &dyn Namespace) -> OperandResult<Self> {
        Self::with_separator(tokens, namespace, DEFAULT_SEPARATOR)
    }

    /// Builds an expression, resolving its identifiers through `namespace`.
    ///
    /// Each identifier is split on `separator`: the last piece is the name,
    /// the pieces before it the scope chain. The same identifier text always
    /// maps to one variable.
    ///
    /// # Errors
    /// Returns [`OperandError::EmptySeparator`] for an empty separator,
    /// [`OperandError::InvalidIdentifier`] for a token that refers to a
    /// variable but is malformed (`os.system`, `x$`), and the namespace's
    /// error for the first identifier it cannot resolve.
    pub fn with_separator(tokens: Vec<TokenTree>,
                          namespace: &dyn Namespace,
                          separator: impl Into<String>)
                          -> OperandResult<Self> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(OperandError::EmptySeparator);
        }

        let mut variables = HashMap::new();
        resolve_identifiers(&tokens, namespace, &separator, &mut variables)?;
        let flattened = TokenTree::flatten(&tokens);
        debug!(expression = %flattened.join(" "),
               variables = variables.len(),
               "arithmetic expression built");

        Ok(Self { tokens,
                  flattened,
                  variables,
                  separator })
    }

    /// The token tree the expression was built from.
    #[must_use]
    pub fn tokens(&self) -> &[TokenTree] {
        &self.tokens
    }

    /// The tokens in evaluation order, identifiers still in place.
    #[must_use]
    pub fn flattened(&self) -> &[String] {
        &self.flattened
    }

    /// Identifier text to resolved variable.
    #[must_use]
    pub const fn variables(&self) -> &HashMap<String, Arc<dyn Variable>> {
        &self.variables
    }

    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Runs one substitution stage over `tokens`.
    ///
    /// Every token that is an identifier of the stage's sort is replaced by
    /// the text of its variable's value under `context`; everything else is
    /// kept. Negative values are parenthesized so that the substituted text
    /// reads as the value it stands for (`x ** 2` with `x = -3` becomes
    /// `(-3) ** 2`).
    ///
    /// # Errors
    /// Propagates the first variable that fails to resolve.
    pub fn substitute(&self,
                      tokens: Vec<String>,
                      stage: SubstitutionStage,
                      context: &Context)
                      -> OperandResult<Vec<String>> {
        let mut resolved: HashMap<&str, String> = HashMap::new();
        let mut output = Vec::with_capacity(tokens.len());

        for token in tokens {
            let Some((identifier, variable)) = self.variables.get_key_value(token.as_str()) else {
                output.push(token);
                continue;
            };
            if !stage.applies_to(identifier, &self.separator) {
                output.push(token);
                continue;
            }
            if let Some(text) = resolved.get(identifier.as_str()) {
                output.push(text.clone());
                continue;
            }

            let mut text = variable.to_value(context)?.to_text();
            if text.starts_with('-') {
                text = format!("({text})");
            }
            resolved.insert(identifier.as_str(), text.clone());
            output.push(text);
        }

        Ok(output)
    }

    /// Produces the purely numeric expression text for `context`.
    ///
    /// Runs [`SubstitutionStage::PIPELINE`] in order, joins the tokens with
    /// single spaces and rewrites `^` as `**`. Adjacent operands therefore
    /// stay apart (`2 3` never reads as `23`) and are rejected by the
    /// evaluator.
    ///
    /// # Errors
    /// Propagates variable failures unchanged.
    pub fn substituted(&self, context: &Context) -> OperandResult<String> {
        let mut tokens = self.flattened.clone();
        for stage in SubstitutionStage::PIPELINE {
            tokens = self.substitute(tokens, stage, context)?;
        }
        Ok(tokens.join(" ").replace('^', "**"))
    }

    /// Evaluates the expression under `context`.
    ///
    /// # Errors
    /// Propagates variable failures, and returns
    /// [`OperandError::UnsafeExpression`] if the substituted text is not a
    /// well-formed numeric expression or its arithmetic fails.
    pub fn evaluate(&self, context: &Context) -> OperandResult<f64> {
        let expression = self.substituted(context)?;
        trace!(%expression, "evaluating substituted expression");
        interpreter::evaluate(&expression).map_err(|source| OperandError::UnsafeExpression { expression,
                                                                                              source })
    }

    /// Structural equality: same tokens, same separator, and every
    /// identifier bound to the very same variable.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.flattened == other.flattened
        && self.separator == other.separator
        && self.variables.len() == other.variables.len()
        && self.variables.iter().all(|(identifier, variable)| {
                                    other.variables
                                         .get(identifier)
                                         .is_some_and(|candidate| Arc::ptr_eq(variable, candidate))
                                })
    }
}

impl Display for ArithmeticExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.flattened.join(" "))
    }
}

/// Walks the nested token structure and resolves every identifier once,
/// rejecting malformed ones.
fn resolve_identifiers(trees: &[TokenTree],
                       namespace: &dyn Namespace,
                       separator: &str,
                       variables: &mut HashMap<String, Arc<dyn Variable>>)
                       -> OperandResult<()> {
    for tree in trees {
        match tree {
            TokenTree::Group(items) => resolve_identifiers(items, namespace, separator, variables)?,
            TokenTree::Token(text)
                if is_identifier_candidate(text, separator) && !variables.contains_key(text) =>
            {
                if !is_identifier(text, separator) {
                    return Err(OperandError::InvalidIdentifier { token: text.clone() });
                }
                let mut scopes: Vec<&str> = text.split(separator).collect();
                let name = scopes.pop().unwrap_or_default();
                let variable = namespace.get_object(name, &scopes)?;
                trace!(identifier = %text, variable = variable.name(), "identifier resolved");
                variables.insert(text.clone(), variable);
            },
            TokenTree::Token(_) => {},
        }
    }
    Ok(())
}
