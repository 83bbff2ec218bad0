use super::token::{Token, TokenKind};
use crate::error::{Result, SelectorError};

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// Selector tokenizer. Unlike a stylesheet tokenizer it never recovers from
/// bad input: the first character it cannot place is an error.
pub struct SelectorTokenizer {
    /// The input being tokenized
    input: Vec<char>,
    /// Current position in the input
    position: usize,
}

impl SelectorTokenizer {
    /// Create a new tokenizer over `input`.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the whole input. The last token is always [`TokenKind::Eof`].
    ///
    /// # Errors
    ///
    /// [`SelectorError::Lexical`] for a character outside the grammar,
    /// [`SelectorError::Syntax`] for an unterminated string or a `#` with no
    /// name after it.
    pub fn run(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.consume_token()?;
            let is_eof = token.is(TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> Result<Token> {
        let start = self.position;

        let Some(c) = self.consume() else {
            return Ok(Token::new(TokenKind::Eof, "", start));
        };

        let token = match c {
            // "Consume as much whitespace as possible. Return a <whitespace-token>."
            c if is_whitespace(c) => {
                while self.peek().is_some_and(is_whitespace) {
                    let _ = self.consume();
                }
                Token::new(TokenKind::Whitespace, " ", start)
            }

            '"' | '\'' => {
                let value = self.consume_string(c, start)?;
                Token::new(TokenKind::String, value, start)
            }

            // "If the next input code point is an ident code point or the next
            // two input code points are a valid escape..."
            '#' => {
                if !self.would_start_ident() {
                    return Err(SelectorError::syntax(
                        self.position,
                        "identifier after `#`",
                    ));
                }
                let name = self.consume_ident_sequence();
                Token::new(TokenKind::Hash, name, start)
            }

            '.' => Token::new(TokenKind::Dot, ".", start),
            ':' => Token::new(TokenKind::Colon, ":", start),
            '[' => Token::new(TokenKind::LeftBracket, "[", start),
            ']' => Token::new(TokenKind::RightBracket, "]", start),
            '(' => Token::new(TokenKind::LeftParen, "(", start),
            ')' => Token::new(TokenKind::RightParen, ")", start),
            ',' => Token::new(TokenKind::Comma, ",", start),
            '=' => Token::new(TokenKind::AttributeOperator, "=", start),
            '>' | '+' => Token::new(TokenKind::Combinator, c.to_string(), start),

            // `~` is a combinator unless it opens `~=`; `*` likewise for `*=`
            '~' | '*' => {
                if self.peek() == Some('=') {
                    let _ = self.consume();
                    Token::new(TokenKind::AttributeOperator, format!("{c}="), start)
                } else if c == '~' {
                    Token::new(TokenKind::Combinator, "~", start)
                } else {
                    Token::new(TokenKind::Star, "*", start)
                }
            }

            // Only meaningful as the first half of an attribute operator
            '|' | '^' | '$' => {
                if self.peek() != Some('=') {
                    return Err(SelectorError::Lexical {
                        position: start,
                        character: c,
                    });
                }
                let _ = self.consume();
                Token::new(TokenKind::AttributeOperator, format!("{c}="), start)
            }

            '\\' if is_valid_escape(Some(c), self.peek()) => {
                self.reconsume();
                let name = self.consume_ident_sequence();
                Token::new(TokenKind::Ident, name, start)
            }

            c if is_ident_code_point(c) => {
                self.reconsume();
                let name = self.consume_ident_sequence();
                Token::new(TokenKind::Ident, name, start)
            }

            other => {
                return Err(SelectorError::Lexical {
                    position: start,
                    character: other,
                });
            }
        };

        Ok(token)
    }

    /// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Unlike CSS proper, a string cut off by EOF or a raw newline is an
    /// error rather than a `<bad-string-token>`.
    fn consume_string(&mut self, ending_code_point: char, start: usize) -> Result<String> {
        let mut value = String::new();

        loop {
            match self.consume() {
                Some(c) if c == ending_code_point => return Ok(value),

                None => {
                    return Err(SelectorError::syntax(
                        self.position,
                        format!("closing {ending_code_point} for string starting at {start}"),
                    ));
                }

                Some('\n') => {
                    return Err(SelectorError::syntax(
                        self.position - 1,
                        format!("closing {ending_code_point} before newline"),
                    ));
                }

                // "U+005C REVERSE SOLIDUS (\)"
                Some('\\') => match self.peek() {
                    // "If the next input code point is EOF, do nothing."
                    None => {}
                    // "Otherwise, if the next input code point is a newline, consume it."
                    Some('\n') => {
                        let _ = self.consume();
                    }
                    Some(_) => value.push(self.consume_escaped_code_point()),
                },

                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self) -> String {
        let mut result = String::new();

        loop {
            match self.peek() {
                Some(c) if is_ident_code_point(c) => {
                    let _ = self.consume();
                    result.push(c);
                }
                Some('\\') if is_valid_escape(Some('\\'), self.peek_at(1)) => {
                    let _ = self.consume();
                    result.push(self.consume_escaped_code_point());
                }
                _ => return result,
            }
        }
    }

    /// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Assumes the backslash has already been consumed.
    fn consume_escaped_code_point(&mut self) -> char {
        match self.consume() {
            Some(c) if c.is_ascii_hexdigit() => {
                let mut hex = String::from(c);
                // "Consume as many hex digits as possible, but no more than 5."
                while hex.len() < 6 {
                    match self.peek() {
                        Some(d) if d.is_ascii_hexdigit() => {
                            let _ = self.consume();
                            hex.push(d);
                        }
                        _ => break,
                    }
                }
                // "If the next input code point is whitespace, consume it."
                if self.peek().is_some_and(is_whitespace) {
                    let _ = self.consume();
                }
                // "If this number is zero, or is for a surrogate, or is greater than
                // the maximum allowed code point, return U+FFFD REPLACEMENT CHARACTER."
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|&code_point| code_point != 0)
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            // "EOF: This is a parse error. Return U+FFFD REPLACEMENT CHARACTER."
            None => char::REPLACEMENT_CHARACTER,
            Some(c) => c,
        }
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    ///
    /// Selector identifiers are looser than CSS idents: a leading digit is
    /// allowed so that `nth-child` arguments like `2n` stay one token.
    fn would_start_ident(&self) -> bool {
        match self.peek() {
            Some('\\') => is_valid_escape(Some('\\'), self.peek_at(1)),
            Some(c) => is_ident_code_point(c),
            None => false,
        }
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    const fn reconsume(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

/// Tokenize selector text.
///
/// # Errors
///
/// See [`SelectorTokenizer::run`].
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    SelectorTokenizer::new(text).run()
}

/// [§ 4.2 whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// [§ 4.2 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_code_point(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    first == Some('\\') && second.is_some_and(|c| c != '\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_resolves_hex_code_point() {
        let mut tokenizer = SelectorTokenizer::new("41 rest");
        assert_eq!(tokenizer.consume_escaped_code_point(), 'A');
        assert_eq!(tokenizer.peek(), Some('r'));
    }

    #[test]
    fn escape_of_zero_is_replacement_character() {
        let mut tokenizer = SelectorTokenizer::new("0");
        assert_eq!(
            tokenizer.consume_escaped_code_point(),
            char::REPLACEMENT_CHARACTER
        );
    }

    #[test]
    fn escape_of_surrogate_is_replacement_character() {
        let mut tokenizer = SelectorTokenizer::new("D800");
        assert_eq!(
            tokenizer.consume_escaped_code_point(),
            char::REPLACEMENT_CHARACTER
        );
    }

    #[test]
    fn escape_stops_after_six_hex_digits() {
        let mut tokenizer = SelectorTokenizer::new("0000411");
        assert_eq!(tokenizer.consume_escaped_code_point(), 'A');
        assert_eq!(tokenizer.peek(), Some('1'));
    }
}
