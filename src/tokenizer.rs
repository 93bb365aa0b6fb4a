use logos::Logos;

use crate::{
    arithmetic::{
        TokenTree,
        expression::{invalid_character, is_identifier},
    },
    error::ExpressionError,
};

/// Lexical classes of arithmetic source text.
///
/// Words are everything between operators, parentheses and whitespace that
/// does not start like a number; they are checked against the runtime
/// separator once lexed.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum SourceToken {
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,
    #[token("**")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("^")]
    Operator,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[regex(r"[^ \t\r\n\f0-9.+\-*/^()][^ \t\r\n\f+\-*/^()]*")]
    Word,
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

/// Splits arithmetic source text into a [`TokenTree`].
///
/// Numbers, identifiers (letters, digits, `_` and `separator`) and the
/// operators `+ - * / ^ **` become tokens; every parenthesized
/// sub-expression becomes a group that keeps its parentheses as its first
/// and last tokens. Whitespace only separates tokens.
///
/// Operators and parentheses split words before the separator is looked at,
/// so a separator made of those characters cannot appear in source text.
///
/// # Errors
/// Fails on characters that fit no token or no identifier, on a `)` without
/// a matching `(`, and on a `(` that is never closed.
///
/// # Example
/// ```
/// use operanda::{arithmetic::TokenTree, tokenizer::tokenize};
///
/// let trees = tokenize("2 * (ns:x ^ 2)", ":").unwrap();
///
/// assert_eq!(trees,
///            vec![TokenTree::token("2"),
///                 TokenTree::token("*"),
///                 TokenTree::group([TokenTree::token("("),
///                                   TokenTree::token("ns:x"),
///                                   TokenTree::token("^"),
///                                   TokenTree::token("2"),
///                                   TokenTree::token(")")])]);
///
/// assert!(tokenize("1; import os", ":").is_err());
/// ```
pub fn tokenize(source: &str, separator: &str) -> Result<Vec<TokenTree>, ExpressionError> {
    // Innermost group last; each entry remembers where its `(` was.
    let mut stack: Vec<(Vec<TokenTree>, usize)> = vec![(Vec::new(), 0)];
    let mut lexer = SourceToken::lexer(source);

    while let Some(token) = lexer.next() {
        let position = lexer.span().start;
        let text = lexer.slice();

        match token {
            Err(()) => {
                return Err(ExpressionError::UnexpectedCharacter { text: text.to_string(),
                                                                  position });
            },
            Ok(SourceToken::LParen) => stack.push((vec![TokenTree::token("(")], position)),
            Ok(SourceToken::RParen) => {
                if stack.len() < 2 {
                    return Err(ExpressionError::UnexpectedToken { token: ")".to_string(),
                                                                  position });
                }
                if let Some((mut group, _)) = stack.pop()
                   && let Some((parent, _)) = stack.last_mut()
                {
                    group.push(TokenTree::token(")"));
                    parent.push(TokenTree::Group(group));
                }
            },
            Ok(kind) => {
                if kind == SourceToken::Word {
                    check_word(text, position, separator)?;
                }
                if let Some((current, _)) = stack.last_mut() {
                    current.push(TokenTree::token(text));
                }
            },
        }
    }

    match stack.pop() {
        Some((trees, _)) if stack.is_empty() => Ok(trees),
        Some((_, open)) => Err(ExpressionError::ExpectedClosingParen { position: open }),
        None => Ok(Vec::new()),
    }
}

/// Accepts `word` only if it is an identifier; otherwise points at its first
/// offending character.
fn check_word(word: &str, position: usize, separator: &str) -> Result<(), ExpressionError> {
    if is_identifier(word, separator) {
        return Ok(());
    }
    let (offset, text) = invalid_character(word, separator).map_or_else(|| (0, word.to_string()),
                                                                          |(offset, c)| {
                                                                              (offset, c.to_string())
                                                                          });
    Err(ExpressionError::UnexpectedCharacter { text,
                                               position: position + offset })
}
