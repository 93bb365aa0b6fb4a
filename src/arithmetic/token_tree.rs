/// A possibly nested sequence of text tokens, as produced by a grammar.
///
/// Groups mirror the grammar's nesting (typically parenthesized
/// sub-expressions); they carry no meaning of their own beyond order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenTree {
    /// A single token: a number, an operator or an identifier.
    Token(String),
    /// A nested group of tokens.
    Group(Vec<TokenTree>),
}

impl TokenTree {
    #[must_use]
    pub fn token(text: impl Into<String>) -> Self {
        Self::Token(text.into())
    }

    #[must_use]
    pub fn group(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Group(items.into_iter().collect())
    }

    /// Flattens `trees` depth-first, keeping left-to-right order.
    ///
    /// # Example
    /// ```
    /// use operanda::arithmetic::TokenTree;
    ///
    /// let trees = [TokenTree::token("2"),
    ///              TokenTree::token("*"),
    ///              TokenTree::group([TokenTree::token("("),
    ///                                TokenTree::token("x"),
    ///                                TokenTree::token("+"),
    ///                                TokenTree::group([TokenTree::token("1")]),
    ///                                TokenTree::token(")")])];
    ///
    /// assert_eq!(TokenTree::flatten(&trees), ["2", "*", "(", "x", "+", "1", ")"]);
    /// ```
    #[must_use]
    pub fn flatten(trees: &[Self]) -> Vec<String> {
        let mut tokens = Vec::new();
        for tree in trees {
            tree.flatten_into(&mut tokens);
        }
        tokens
    }

    fn flatten_into(&self, tokens: &mut Vec<String>) {
        match self {
            Self::Token(text) => tokens.push(text.clone()),
            Self::Group(items) => {
                for item in items {
                    item.flatten_into(tokens);
                }
            },
        }
    }
}

impl From<&str> for TokenTree {
    fn from(text: &str) -> Self {
        Self::token(text)
    }
}

impl From<Vec<Self>> for TokenTree {
    fn from(items: Vec<Self>) -> Self {
        Self::Group(items)
    }
}
