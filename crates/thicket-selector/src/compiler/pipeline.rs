//! Left-to-right execution.
//!
//! An alternative runs as a chain of lazy stages:
//! ```text
//! flatten_unique(roots) -> filter(head)
//!   -> unique(expand by combinator) -> filter(next compound)
//!   -> ...
//! ```
//! and a group is the deduplicated concatenation of its alternatives. No
//! stage pulls more from the one before it than the caller has asked for.

use std::fmt;
use std::sync::Arc;

use thicket_tree::{
    Descendants, Elements, FollowingSiblings, TreeNode, descendants, elements, flatten_unique,
    following_siblings, next_element_sibling, unique,
};

use super::matcher::CompiledSelector;
use crate::parser::Combinator;

type Stage<'a, N> = Box<dyn Iterator<Item = N> + 'a>;

/// Lazy sequence of nodes matched by a [`Query`](crate::Query).
///
/// Nodes come out once each, in the order the pipeline first reaches them.
/// Dropping the iterator early stops all tree traversal.
pub struct Matches<'a, N> {
    inner: Stage<'a, N>,
}

impl<N> Iterator for Matches<'_, N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<N> fmt::Debug for Matches<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matches").finish_non_exhaustive()
    }
}

/// The nodes one combinator reaches from one candidate. Elements only.
enum Axis<N: TreeNode> {
    /// `A B`
    Descendants(Descendants<N>),
    /// `A > B`
    Children(Elements<N>),
    /// `A + B`
    Next(Option<N>),
    /// `A ~ B`
    Following(FollowingSiblings<N>),
}

impl<N: TreeNode> Axis<N> {
    fn new(combinator: Combinator, node: &N) -> Self {
        match combinator {
            Combinator::Descendant => Self::Descendants(descendants(node)),
            Combinator::Child => Self::Children(elements(node)),
            Combinator::NextSibling => Self::Next(next_element_sibling(node)),
            Combinator::SubsequentSibling => Self::Following(following_siblings(node)),
        }
    }
}

impl<N: TreeNode> Iterator for Axis<N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Descendants(walk) => walk.find(TreeNode::is_element),
            Self::Children(children) => children.next(),
            Self::Next(next) => next.take(),
            Self::Following(siblings) => siblings.find(TreeNode::is_element),
        }
    }
}

/// Run one alternative over `roots` and everything beneath them.
fn run_selector<'a, N>(selector: &Arc<CompiledSelector>, roots: Vec<N>) -> Stage<'a, N>
where
    N: TreeNode + 'a,
{
    let seed = Arc::clone(selector);
    let mut stage: Stage<'a, N> =
        Box::new(flatten_unique(roots).filter(move |node| seed.head.matches(node)));

    for index in 0..selector.steps.len() {
        let combinator = selector.steps[index].0;
        let step = Arc::clone(selector);

        // Expanding overlapping candidates (nested `div`s under `div p`)
        // reaches the same node more than once.
        let expanded = unique(stage.flat_map(move |node| Axis::new(combinator, &node)));
        stage = Box::new(expanded.filter(move |node| step.steps[index].1.matches(node)));
    }

    stage
}

/// Run every alternative over `roots`, concatenate, and keep first
/// occurrences.
pub(super) fn run_group<'a, N, I>(
    alternatives: &Arc<[Arc<CompiledSelector>]>,
    roots: I,
) -> Matches<'a, N>
where
    N: TreeNode + 'a,
    I: IntoIterator<Item = N>,
{
    let roots: Vec<N> = roots.into_iter().collect();

    if let [only] = alternatives.as_ref() {
        return Matches {
            inner: run_selector(only, roots),
        };
    }

    let alternatives = Arc::clone(alternatives);
    let count = alternatives.len();
    let concatenated =
        (0..count).flat_map(move |index| run_selector(&alternatives[index], roots.clone()));

    Matches {
        inner: Box::new(unique(concatenated)),
    }
}
