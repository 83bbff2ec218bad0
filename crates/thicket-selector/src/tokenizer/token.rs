//! Selector token types.
//!
//! The token set is the slice of
//! [CSS Syntax § 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization)
//! that selectors need, with the attribute operators and combinator symbols
//! pre-combined so the parser never has to look at raw delimiters.

use strum_macros::Display;

/// What a [`Token`] is. The `Display` form is used in parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenKind {
    /// "`<ident-token>`" - a name, with escapes already resolved.
    #[strum(serialize = "identifier")]
    Ident,

    /// "`<hash-token>`" - `#` followed by a name; the text excludes the `#`.
    #[strum(serialize = "`#` identifier")]
    Hash,

    /// `.`
    #[strum(serialize = "`.`")]
    Dot,

    /// `:`
    #[strum(serialize = "`:`")]
    Colon,

    /// `[`
    #[strum(serialize = "`[`")]
    LeftBracket,

    /// `]`
    #[strum(serialize = "`]`")]
    RightBracket,

    /// `(`
    #[strum(serialize = "`(`")]
    LeftParen,

    /// `)`
    #[strum(serialize = "`)`")]
    RightParen,

    /// One of `=`, `~=`, `|=`, `^=`, `$=`, `*=`.
    #[strum(serialize = "attribute operator")]
    AttributeOperator,

    /// One of `>`, `+`, `~`.
    #[strum(serialize = "combinator")]
    Combinator,

    /// `*`
    #[strum(serialize = "`*`")]
    Star,

    /// `,`
    #[strum(serialize = "`,`")]
    Comma,

    /// "`<string-token>`" - a quoted string; the text excludes the quotes.
    #[strum(serialize = "string")]
    String,

    /// A run of whitespace, collapsed into one token.
    #[strum(serialize = "whitespace")]
    Whitespace,

    /// "`<EOF-token>`"
    #[strum(serialize = "end of selector")]
    Eof,
}

/// One token of selector text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token type.
    pub kind: TokenKind,
    /// The token's value: the unescaped name for identifiers and hashes, the
    /// string contents for strings, the symbol itself for punctuation.
    pub text: String,
    /// Character offset of the token's first character in the input.
    pub position: usize,
}

impl Token {
    /// Create a token.
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Whether this token is of the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
