//! Recursive-descent selector parser.
//!
//! Grammar, lowest precedence first:
//! ```text
//! group    := selector ( ',' selector )*
//! selector := compound ( combinator compound )*
//! compound := ( type | '*' )? ( '#' id | '.' class | attribute | pseudo )*
//! ```
//! with at least one simple selector per compound. Whitespace is only
//! significant between two compounds with no explicit combinator, where it
//! is the descendant combinator.

use super::ast::{
    AttributeOperator, AttributeSelector, Combinator, CompoundSelector, PseudoArgument,
    PseudoClassSelector, Selector, SelectorGroup, SimpleSelector,
};
use crate::error::{Result, SelectorError};
use crate::tokenizer::{Token, TokenKind, tokenize};

/// Selector parser over a token stream.
pub struct SelectorParser {
    tokens: Vec<Token>,
    position: usize,
}

impl SelectorParser {
    /// Create a parser. A missing trailing [`TokenKind::Eof`] is supplied.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let end = tokens.last().map_or(0, |t| t.position + t.text.chars().count());
            tokens.push(Token::new(TokenKind::Eof, "", end));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// [§ 4.1 Selector Lists](https://www.w3.org/TR/selectors-4/#grouping)
    ///
    /// Parse the entire token stream as a selector group.
    ///
    /// # Errors
    ///
    /// [`SelectorError::Syntax`] if the tokens are not a selector group,
    /// including when they are empty.
    pub fn parse_group(&mut self) -> Result<SelectorGroup> {
        let group = self.consume_group()?;
        let _ = self.skip_whitespace();
        if !self.at(TokenKind::Eof) {
            return Err(self.error("`,` or end of selector"));
        }
        Ok(group)
    }

    fn consume_group(&mut self) -> Result<SelectorGroup> {
        let _ = self.skip_whitespace();
        let mut selectors = vec![self.consume_selector("selector")?];

        loop {
            let _ = self.skip_whitespace();
            if !self.at(TokenKind::Comma) {
                return Ok(SelectorGroup { selectors });
            }
            let _ = self.consume();
            let _ = self.skip_whitespace();
            selectors.push(self.consume_selector("selector after `,`")?);
        }
    }

    /// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
    fn consume_selector(&mut self, expected: &str) -> Result<Selector> {
        let first = self
            .consume_compound()?
            .ok_or_else(|| self.error(expected))?;
        let mut rest = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();

            let combinator = if self.at(TokenKind::Combinator) {
                let token = self.consume();
                let combinator = token
                    .text
                    .parse::<Combinator>()
                    .map_err(|_| SelectorError::syntax(token.position, "combinator"))?;
                let _ = self.skip_whitespace();
                combinator
            } else if had_whitespace && self.starts_compound() {
                // "A descendant combinator is whitespace that separates two
                // compound selectors."
                Combinator::Descendant
            } else {
                return Ok(Selector { first, rest });
            };

            let compound = self
                .consume_compound()?
                .ok_or_else(|| self.error("selector after combinator"))?;
            rest.push((combinator, compound));
        }
    }

    /// Returns `None` when the next token cannot start a compound selector.
    fn consume_compound(&mut self) -> Result<Option<CompoundSelector>> {
        let mut simple_selectors = Vec::new();

        loop {
            let kind = self.peek().kind;
            let simple = match kind {
                // A type or universal selector may only lead the compound
                TokenKind::Ident | TokenKind::Star => {
                    if !simple_selectors.is_empty() {
                        return Err(
                            self.error("type selector only at the start of a compound selector")
                        );
                    }
                    let token = self.consume();
                    if token.is(TokenKind::Star) {
                        SimpleSelector::Universal
                    } else {
                        SimpleSelector::Type(token.text)
                    }
                }
                TokenKind::Hash => SimpleSelector::Id(self.consume().text),
                TokenKind::Dot => {
                    let _ = self.consume();
                    SimpleSelector::Class(self.expect(TokenKind::Ident, "class name after `.`")?.text)
                }
                TokenKind::LeftBracket => self.consume_attribute()?,
                TokenKind::Colon => self.consume_pseudo()?,
                _ => break,
            };
            simple_selectors.push(simple);
        }

        Ok((!simple_selectors.is_empty()).then_some(CompoundSelector { simple_selectors }))
    }

    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// Whitespace is allowed anywhere between the brackets.
    fn consume_attribute(&mut self) -> Result<SimpleSelector> {
        let _ = self.consume(); // '['
        let _ = self.skip_whitespace();
        let name = self.expect(TokenKind::Ident, "attribute name")?.text;
        let _ = self.skip_whitespace();

        let kind = self.peek().kind;
        match kind {
            TokenKind::RightBracket => {
                let _ = self.consume();
                Ok(SimpleSelector::Attribute(AttributeSelector::Exists(name)))
            }
            TokenKind::AttributeOperator => {
                let token = self.consume();
                let operator = token
                    .text
                    .parse::<AttributeOperator>()
                    .map_err(|_| SelectorError::syntax(token.position, "attribute operator"))?;
                let _ = self.skip_whitespace();
                let kind = self.peek().kind;
                let value = match kind {
                    TokenKind::Ident | TokenKind::String => self.consume().text,
                    _ => return Err(self.error("attribute value")),
                };
                let _ = self.skip_whitespace();
                let _ = self.expect(TokenKind::RightBracket, "`]`")?;
                Ok(SimpleSelector::Attribute(AttributeSelector::with_operator(
                    name, operator, value,
                )))
            }
            _ => Err(self.error("`]` or attribute operator")),
        }
    }

    /// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    ///
    /// `:not(...)` takes a nested selector list; every other functional
    /// pseudo-class keeps its argument as text for the compiler to interpret.
    fn consume_pseudo(&mut self) -> Result<SimpleSelector> {
        let _ = self.consume(); // ':'

        if self.at(TokenKind::Colon) {
            let _ = self.consume();
            let name = self.expect(TokenKind::Ident, "pseudo-element name")?.text;
            return Ok(SimpleSelector::PseudoElement(name));
        }

        let name = self.expect(TokenKind::Ident, "pseudo-class name")?.text;
        if !self.at(TokenKind::LeftParen) {
            return Ok(SimpleSelector::PseudoClass(PseudoClassSelector {
                name,
                argument: None,
            }));
        }
        let _ = self.consume(); // '('

        let argument = if name.eq_ignore_ascii_case("not") {
            let group = self.consume_group()?;
            let _ = self.skip_whitespace();
            let _ = self.expect(TokenKind::RightParen, "`)`")?;
            PseudoArgument::Selectors(group)
        } else {
            PseudoArgument::Raw(self.consume_raw_argument()?)
        };

        Ok(SimpleSelector::PseudoClass(PseudoClassSelector {
            name,
            argument: Some(argument),
        }))
    }

    /// Collect tokens up to the matching `)`, which is consumed.
    fn consume_raw_argument(&mut self) -> Result<String> {
        let mut text = String::new();
        let mut depth = 1usize;

        loop {
            let kind = self.peek().kind;
            match kind {
                TokenKind::Eof => return Err(self.error("`)`")),
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        let _ = self.consume();
                        return Ok(text.trim().to_string());
                    }
                }
                _ => {}
            }

            let token = self.consume();
            match token.kind {
                TokenKind::String => {
                    text.push('"');
                    text.push_str(&token.text);
                    text.push('"');
                }
                TokenKind::Hash => {
                    text.push('#');
                    text.push_str(&token.text);
                }
                _ => text.push_str(&token.text),
            }
        }
    }

    fn starts_compound(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Ident
                | TokenKind::Star
                | TokenKind::Hash
                | TokenKind::Dot
                | TokenKind::LeftBracket
                | TokenKind::Colon
        )
    }

    /// Skip whitespace tokens, returning whether any were skipped.
    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while self.at(TokenKind::Whitespace) {
            let _ = self.consume();
            skipped = true;
        }
        skipped
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        if self.at(kind) {
            Ok(self.consume())
        } else {
            Err(self.error(expected))
        }
    }

    fn error(&self, expected: &str) -> SelectorError {
        SelectorError::syntax(self.peek().position, expected)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    /// Take the current token. The trailing `Eof` is never consumed past.
    fn consume(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
        token
    }
}

/// Parse a token stream into a selector group.
///
/// # Errors
///
/// See [`SelectorParser::parse_group`].
pub fn parse(tokens: Vec<Token>) -> Result<SelectorGroup> {
    SelectorParser::new(tokens).parse_group()
}

/// Tokenize and parse selector text.
///
/// # Errors
///
/// Any [`SelectorError::Lexical`] or [`SelectorError::Syntax`] from the
/// tokenizer or parser.
pub fn parse_selector_group(text: &str) -> Result<SelectorGroup> {
    parse(tokenize(text)?)
}
