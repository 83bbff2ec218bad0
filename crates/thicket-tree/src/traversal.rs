//! Lazy tree walks over any [`TreeNode`].
//!
//! Every function here returns a fresh iterator, so walks are restartable.
//! Nothing is fetched from the backend until the caller pulls: in particular
//! [`descendants`] asks a node for its children only once the caller has
//! moved past that node, which lets a consumer that stops early leave whole
//! subtrees untouched.
//!
//! The walks terminate for finite acyclic trees. Cyclic backends are not
//! supported.

use std::iter::{Chain, Once};

use crate::node::TreeNode;

/// Iterator over the element children of a node.
pub struct Elements<N: TreeNode> {
    inner: N::Children,
}

impl<N: TreeNode> Iterator for Elements<N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find(TreeNode::is_element)
    }
}

/// The direct children of `node` for which [`TreeNode::is_element`] holds,
/// in document order.
#[must_use]
pub fn elements<N: TreeNode>(node: &N) -> Elements<N> {
    Elements {
        inner: node.children(),
    }
}

/// [§ 4.2.1 Tree order](https://dom.spec.whatwg.org/#concept-tree-order)
///
/// Pre-order, depth-first iterator over all descendants of a node.
///
/// The stack holds one child iterator per open level. `pending` is the node
/// most recently yielded; its children are requested on the following pull.
pub struct Descendants<N: TreeNode> {
    stack: Vec<N::Children>,
    pending: Option<N>,
}

impl<N: TreeNode> Iterator for Descendants<N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(node) = self.pending.take() {
            self.stack.push(node.children());
        }

        loop {
            let level = self.stack.last_mut()?;
            if let Some(child) = level.next() {
                self.pending = Some(child.clone());
                return Some(child);
            }
            let _ = self.stack.pop();
        }
    }
}

/// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-descendant)
/// "An object A is called a descendant of an object B, if either A is a
/// child of B or A is a child of an object C that is a descendant of B."
///
/// All descendants of `node` (elements or not) in tree order. `node` itself
/// is not included.
#[must_use]
pub fn descendants<N: TreeNode>(node: &N) -> Descendants<N> {
    Descendants {
        stack: Vec::new(),
        pending: Some(node.clone()),
    }
}

/// Iterator returned by [`descendants_and_self`].
pub type DescendantsAndSelf<N> = Chain<Once<N>, Descendants<N>>;

/// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-inclusive-descendant)
/// "An inclusive descendant is an object or one of its descendants."
#[must_use]
pub fn descendants_and_self<N: TreeNode>(node: &N) -> DescendantsAndSelf<N> {
    std::iter::once(node.clone()).chain(descendants(node))
}

/// Iterator over ancestors of a node, from parent to root.
pub struct Ancestors<N> {
    current: Option<N>,
}

impl<N: TreeNode> Iterator for Ancestors<N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current.take()?;
        self.current = node.parent();
        Some(node)
    }
}

/// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-ancestor)
/// "An object A is called an ancestor of an object B if and only if B is a
/// descendant of A."
#[must_use]
pub fn ancestors<N: TreeNode>(node: &N) -> Ancestors<N> {
    Ancestors {
        current: node.parent(),
    }
}

/// Iterator over preceding siblings (from immediately before to first child).
pub struct PrecedingSiblings<N> {
    current: Option<N>,
}

impl<N: TreeNode> Iterator for PrecedingSiblings<N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current.take()?;
        self.current = node.previous_sibling();
        Some(node)
    }
}

/// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-preceding)
///
/// Siblings before `node`, nearest first. Includes non-element siblings.
#[must_use]
pub fn preceding_siblings<N: TreeNode>(node: &N) -> PrecedingSiblings<N> {
    PrecedingSiblings {
        current: node.previous_sibling(),
    }
}

/// Iterator over the siblings that follow a node, in document order.
///
/// The contract has no next-sibling accessor, so the first pull asks the
/// parent for its children and skips past the origin node.
pub struct FollowingSiblings<N: TreeNode> {
    origin: Option<N>,
    siblings: Option<N::Children>,
}

impl<N: TreeNode> Iterator for FollowingSiblings<N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(origin) = self.origin.take() {
            let parent = origin.parent()?;
            let key = origin.identity();
            let mut siblings = parent.children();
            for sibling in siblings.by_ref() {
                if sibling.identity() == key {
                    break;
                }
            }
            self.siblings = Some(siblings);
        }
        self.siblings.as_mut()?.next()
    }
}

/// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-following)
///
/// Siblings after `node` in document order. Includes non-element siblings.
/// A node without a parent has no following siblings.
#[must_use]
pub fn following_siblings<N: TreeNode>(node: &N) -> FollowingSiblings<N> {
    FollowingSiblings {
        origin: Some(node.clone()),
        siblings: None,
    }
}

/// The nearest element sibling after `node`, skipping text and comments.
#[must_use]
pub fn next_element_sibling<N: TreeNode>(node: &N) -> Option<N> {
    following_siblings(node).find(TreeNode::is_element)
}

/// The nearest element sibling before `node`, skipping text and comments.
#[must_use]
pub fn previous_element_sibling<N: TreeNode>(node: &N) -> Option<N> {
    preceding_siblings(node).find(TreeNode::is_element)
}

/// 1-based position of `node` among its parent's element children.
///
/// Non-element siblings are not counted. Returns `None` for a node without a
/// parent.
#[must_use]
pub fn element_index<N: TreeNode>(node: &N) -> Option<usize> {
    if node.parent().is_none() {
        return None;
    }
    Some(preceding_siblings(node).filter(TreeNode::is_element).count() + 1)
}

/// 1-based position of `node` among its parent's element children, counted
/// from the last one.
#[must_use]
pub fn element_index_from_end<N: TreeNode>(node: &N) -> Option<usize> {
    if node.parent().is_none() {
        return None;
    }
    Some(following_siblings(node).filter(TreeNode::is_element).count() + 1)
}
