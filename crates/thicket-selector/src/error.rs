//! Errors raised while turning selector text into a [`Query`](crate::Query).
//!
//! Every error is produced eagerly, before any tree is touched. Running a
//! compiled query never fails on its own; an empty result is not an error.

use thiserror::Error;

/// Result alias used throughout the selector crate.
pub type Result<T, E = SelectorError> = std::result::Result<T, E>;

/// Why a selector could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// A character the selector grammar has no use for.
    #[error("unexpected character {character:?} at position {position}")]
    Lexical {
        /// Character offset of the offending character.
        position: usize,
        /// The offending character.
        character: char,
    },

    /// The tokens do not form a selector: an unterminated bracket or paren,
    /// a missing selector after a combinator or comma, an empty group, ...
    #[error("expected {expected} at position {position}")]
    Syntax {
        /// Character offset where the parser gave up.
        position: usize,
        /// What the parser was looking for.
        expected: String,
    },

    /// Well-formed, but names something the matcher does not support, such
    /// as an unknown pseudo-class or a pseudo-element.
    #[error("unsupported selector `{selector}`")]
    Unsupported {
        /// The offending simple selector, re-serialized.
        selector: String,
    },
}

impl SelectorError {
    /// Build a [`SelectorError::Syntax`].
    pub(crate) fn syntax(position: usize, expected: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            expected: expected.into(),
        }
    }

    /// Build a [`SelectorError::Unsupported`] from anything displayable.
    pub(crate) fn unsupported(selector: &impl ToString) -> Self {
        Self::Unsupported {
            selector: selector.to_string(),
        }
    }
}
