//! The capability contract every queryable tree exposes.
//!
//! [§ 4.2.1 Trees](https://dom.spec.whatwg.org/#trees)
//!
//! "A tree is a finite hierarchical tree structure. In tree order is
//! preorder, depth-first traversal of a tree."
//!
//! Implementors hand out lightweight handles (an index plus a tree
//! reference, an `Rc`, ...). The engine clones handles freely and never
//! caches anything it gets back, so `parent`, `children` and
//! `previous_sibling` should be cheap.

use std::borrow::Cow;
use std::hash::Hash;

/// A handle to one node of a backend tree.
///
/// Only element nodes can match a selector. Non-element nodes (text,
/// comments, documents) still take part in traversal, which is why
/// [`TreeNode::is_element`] exists instead of the contract hiding them.
pub trait TreeNode: Clone {
    /// Identity key used for deduplication.
    ///
    /// Two handles denote the same node exactly when their keys are equal.
    /// This is reference identity, never structural equality: two distinct
    /// `<p>` elements with identical attributes must have different keys.
    type Identity: Eq + Hash + Clone;

    /// Iterator over a node's children in document order.
    type Children: Iterator<Item = Self>;

    /// The identity key of this node.
    fn identity(&self) -> Self::Identity;

    /// Whether this node is an element (and therefore selectable).
    fn is_element(&self) -> bool;

    /// The element's type name (tag name, control type, ...).
    ///
    /// `None` for non-element nodes.
    fn name(&self) -> Option<Cow<'_, str>>;

    /// The element's unique identifier, if it has one.
    fn id(&self) -> Option<Cow<'_, str>>;

    /// The element's class list, in any order.
    fn classes(&self) -> Vec<Cow<'_, str>>;

    /// Look up an attribute value by name.
    fn attribute(&self, name: &str) -> Option<Cow<'_, str>>;

    /// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    fn parent(&self) -> Option<Self>;

    /// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "An object that participates in a tree ... has children, which is an
    /// ordered set of objects."
    fn children(&self) -> Self::Children;

    /// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    /// "The previous sibling of an object is its first preceding sibling or
    /// null if it has no preceding sibling."
    fn previous_sibling(&self) -> Option<Self>;

    /// Whether `self` and `other` are the same node.
    fn same_node(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}
