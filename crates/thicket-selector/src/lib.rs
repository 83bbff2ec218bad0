//! Selector tokenizer, parser and query compiler for thicket.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selector Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - Identifiers with escapes, hashes, quoted strings
//!   - Attribute operators and combinator symbols
//!
//! - **Selector Parser** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Selector groups, combinators (descendant, child, next and subsequent sibling)
//!   - Type, universal, id, class and attribute selectors
//!   - Pseudo-classes, including a nested selector list for `:not()`
//!
//! - **Query Compiler**
//!   - Left-to-right lazy pipeline over any [`TreeNode`](thicket_tree::TreeNode) backend
//!   - Structural pseudo-classes: `:root`, `:empty`, `:first-child`,
//!     `:last-child`, `:only-child`, `:first-of-type`, `:last-of-type`,
//!     `:nth-child(an+b)`, `:nth-last-child(an+b)`
//!   - Negation with `:not(selector-list)`
//!
//! # Not Implemented
//!
//! - Pseudo-elements (rejected as unsupported)
//! - Namespaces, `:is()`, `:where()`, `:has()`
//! - Specificity
//!
//! # Example
//!
//! ```
//! use thicket_dom::{DomTree, ElementData, NodeId};
//!
//! let mut tree = DomTree::new();
//! let list = tree.append_element(NodeId::ROOT, ElementData::new("ul"));
//! for _ in 0..3 {
//!     let _ = tree.append_element(list, ElementData::new("li"));
//! }
//!
//! let odd = thicket_selector::select("ul > li:nth-child(odd)", [tree.document()])?;
//! assert_eq!(odd.count(), 2);
//! # Ok::<(), thicket_selector::SelectorError>(())
//! ```

/// Query compilation and execution.
pub mod compiler;
/// Error types.
pub mod error;
/// Selector parser producing a [`SelectorGroup`].
pub mod parser;
/// Selector tokenizer.
pub mod tokenizer;

pub use compiler::{Matches, Query};
pub use error::{Result, SelectorError};
pub use parser::{
    AttributeOperator, AttributeSelector, Combinator, CompoundSelector, PseudoArgument,
    PseudoClassSelector, Selector, SelectorGroup, SimpleSelector, parse_selector_group,
};
pub use tokenizer::{Token, TokenKind, tokenize};

use thicket_tree::TreeNode;

/// Compile `selector` and run it over `roots`.
///
/// For repeated use, compile once with [`Query::parse`] instead.
///
/// # Errors
///
/// Any [`SelectorError`]; see [`Query::parse`].
pub fn select<'a, N, I>(selector: &str, roots: I) -> Result<Matches<'a, N>>
where
    N: TreeNode + 'a,
    I: IntoIterator<Item = N>,
{
    Ok(Query::parse(selector)?.select(roots))
}

/// Compile `selector` and return its first match under `roots`, if any.
///
/// # Errors
///
/// Any [`SelectorError`]; see [`Query::parse`]. No match is `Ok(None)`.
pub fn select_first<N, I>(selector: &str, roots: I) -> Result<Option<N>>
where
    N: TreeNode,
    I: IntoIterator<Item = N>,
{
    Ok(Query::parse(selector)?.first(roots))
}
