//! Tree capability contract and traversal primitives for thicket.
//!
//! # Design
//!
//! The selector engine never sees a concrete tree type. Everything it needs
//! goes through [`TreeNode`], a small handle-based contract modelled on the
//! [DOM tree concepts](https://dom.spec.whatwg.org/#trees): parent, ordered
//! children, previous sibling, and a handful of element accessors.
//!
//! On top of that contract this crate provides:
//! - **Traversal** - lazy, restartable walks ([`descendants`], [`elements`],
//!   sibling and ancestor iterators)
//! - **Node sets** - identity-based deduplication that keeps first-occurrence
//!   order ([`flatten_unique`], [`unique`])

/// The node capability contract.
pub mod node;
/// Identity-keyed node-set utilities.
pub mod node_set;
/// Lazy tree traversal built only on [`TreeNode`].
pub mod traversal;

pub use node::TreeNode;
pub use node_set::{FlattenUnique, Unique, flatten_unique, unique};
pub use traversal::{
    Ancestors, Descendants, DescendantsAndSelf, Elements, FollowingSiblings, PrecedingSiblings,
    ancestors, descendants, descendants_and_self, element_index, element_index_from_end,
    elements, following_siblings, next_element_sibling, preceding_siblings,
    previous_element_sibling,
};
