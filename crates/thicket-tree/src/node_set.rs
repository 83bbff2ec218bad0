//! Identity-keyed node sets.
//!
//! Both adapters here are lazy and keep the order in which nodes are first
//! seen. Identity comes from [`TreeNode::identity`], so two structurally
//! equal nodes are still distinct members.

use std::collections::HashSet;

use crate::node::TreeNode;
use crate::traversal::{DescendantsAndSelf, descendants_and_self};

/// Iterator returned by [`unique`].
pub struct Unique<N: TreeNode, I> {
    inner: I,
    seen: HashSet<N::Identity>,
}

impl<N, I> Iterator for Unique<N, I>
where
    N: TreeNode,
    I: Iterator<Item = N>,
{
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        let seen = &mut self.seen;
        self.inner.find(|node| seen.insert(node.identity()))
    }
}

/// Drop every node already yielded earlier in `nodes`.
#[must_use]
pub fn unique<N, I>(nodes: I) -> Unique<N, I::IntoIter>
where
    N: TreeNode,
    I: IntoIterator<Item = N>,
{
    Unique {
        inner: nodes.into_iter(),
        seen: HashSet::new(),
    }
}

/// Iterator returned by [`flatten_unique`].
pub struct FlattenUnique<N: TreeNode, I> {
    roots: I,
    walk: Option<DescendantsAndSelf<N>>,
    seen: HashSet<N::Identity>,
}

impl<N, I> Iterator for FlattenUnique<N, I>
where
    N: TreeNode,
    I: Iterator<Item = N>,
{
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(walk) = self.walk.as_mut() {
                let seen = &mut self.seen;
                if let Some(node) = walk.find(|node| seen.insert(node.identity())) {
                    return Some(node);
                }
                self.walk = None;
            }
            let root = self.roots.next()?;
            self.walk = Some(descendants_and_self(&root));
        }
    }
}

/// Every node in `roots` together with its full subtree, each node once.
///
/// Roots are walked in order, each in tree order. A node that was already
/// produced is skipped, but its subtree is still walked so descendants not
/// seen before are still produced. Overlapping inputs (a node and one of its
/// ancestors, the same root twice) therefore collapse into one ordered set.
///
/// Applying `flatten_unique` to its own output yields the same sequence.
#[must_use]
pub fn flatten_unique<N, I>(roots: I) -> FlattenUnique<N, I::IntoIter>
where
    N: TreeNode,
    I: IntoIterator<Item = N>,
{
    FlattenUnique {
        roots: roots.into_iter(),
        walk: None,
        seen: HashSet::new(),
    }
}
