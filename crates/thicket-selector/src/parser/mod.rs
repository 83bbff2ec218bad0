//! Selector parser module.

/// Selector syntax tree.
pub mod ast;
/// Recursive-descent parser producing [`ast::SelectorGroup`].
pub mod selector_parser;

pub use ast::{
    AttributeOperator, AttributeSelector, Combinator, CompoundSelector, PseudoArgument,
    PseudoClassSelector, Selector, SelectorGroup, SimpleSelector,
};
pub use selector_parser::{SelectorParser, parse, parse_selector_group};
