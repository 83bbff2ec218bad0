//! Selector tokenizer module.

/// Selector tokenizer implementation.
pub mod selector_tokenizer;
/// Token types produced by the tokenizer.
pub mod token;

pub use selector_tokenizer::{SelectorTokenizer, tokenize};
pub use token::{Token, TokenKind};
