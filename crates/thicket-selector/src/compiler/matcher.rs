//! Compiled per-node predicates.
//!
//! A [`CompiledSelector`] answers "does this node match?" for one
//! alternative of a selector group, with full tree context. The left-to-right
//! pipeline in [`super::pipeline`] uses the per-compound predicates; `:not()`
//! and [`Query::matches`](crate::Query::matches) use the whole chain,
//! evaluated right to left from the subject.

use std::collections::HashSet;

use thicket_tree::{
    TreeNode, ancestors, element_index, element_index_from_end, following_siblings,
    next_element_sibling, preceding_siblings, previous_element_sibling,
};

use super::nth::Nth;
use crate::parser::{AttributeSelector, Combinator};

/// One alternative of a selector group, ready to run.
#[derive(Debug)]
pub struct CompiledSelector {
    /// The leftmost compound.
    pub head: CompiledCompound,
    /// Each following compound with the combinator before it, left to right.
    pub steps: Vec<(Combinator, CompiledCompound)>,
}

/// The conjunction of one compound selector's predicates.
#[derive(Debug)]
pub struct CompiledCompound {
    pub predicates: Vec<Predicate>,
}

/// A test on a single node.
#[derive(Debug)]
pub enum Predicate {
    /// Type selector; exact name equality. Case folding, if any, is the
    /// backend's business.
    Type(String),
    Id(String),
    Class(String),
    Attribute(AttributeSelector),
    Structural(Structural),
    /// Matches when none of the inner alternatives match.
    Not(Vec<CompiledSelector>),
}

/// [§ 14 Tree-Structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
#[derive(Debug, Clone, Copy)]
pub enum Structural {
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    NthChild(Nth),
    NthLastChild(Nth),
}

/// `(compound index, node)` pairs already known not to match during one
/// right-to-left evaluation.
type Failures<N> = HashSet<(usize, <N as TreeNode>::Identity)>;

impl CompiledSelector {
    /// Whether `node` is matched by this selector, looking at as much of the
    /// surrounding tree as the combinators require.
    pub fn matches<N: TreeNode>(&self, node: &N) -> bool {
        let mut failures = Failures::<N>::new();
        self.matches_at(self.steps.len(), node, &mut failures)
    }

    fn compound(&self, index: usize) -> &CompiledCompound {
        match index.checked_sub(1) {
            None => &self.head,
            Some(step) => &self.steps[step].1,
        }
    }

    /// Match compound `index` against `node`, then look for a node matching
    /// the compound before it in the relationship its combinator demands.
    ///
    /// Backtracks: for `a > b c`, every `b` ancestor of the subject is tried,
    /// not just the nearest one. Whether compounds `0..=index` match ending at
    /// `node` depends only on `node`, so a failure is recorded and not retried.
    fn matches_at<N: TreeNode>(
        &self,
        index: usize,
        node: &N,
        failures: &mut Failures<N>,
    ) -> bool {
        let key = (index, node.identity());
        if failures.contains(&key) {
            return false;
        }

        let matched = self.compound(index).matches(node)
            && index
                .checked_sub(1)
                .is_none_or(|previous| self.matches_previous(previous, node, failures));

        if !matched {
            let _ = failures.insert(key);
        }
        matched
    }

    fn matches_previous<N: TreeNode>(
        &self,
        previous: usize,
        node: &N,
        failures: &mut Failures<N>,
    ) -> bool {
        match self.steps[previous].0 {
            // "an element B that is an arbitrary descendant of some ancestor element A"
            Combinator::Descendant => {
                ancestors(node).any(|ancestor| self.matches_at(previous, &ancestor, failures))
            }
            // "an element B that is a direct child of element A"
            Combinator::Child => node
                .parent()
                .is_some_and(|parent| self.matches_at(previous, &parent, failures)),
            // "an element B that immediately follows element A"
            Combinator::NextSibling => previous_element_sibling(node)
                .is_some_and(|sibling| self.matches_at(previous, &sibling, failures)),
            // "an element B that follows element A (not necessarily immediately)"
            Combinator::SubsequentSibling => preceding_siblings(node)
                .filter(TreeNode::is_element)
                .any(|sibling| self.matches_at(previous, &sibling, failures)),
        }
    }
}

impl CompiledCompound {
    /// All predicates hold on `node`, which must be an element.
    /// Stops at the first failing predicate.
    pub fn matches<N: TreeNode>(&self, node: &N) -> bool {
        node.is_element() && self.predicates.iter().all(|predicate| predicate.matches(node))
    }
}

impl Predicate {
    fn matches<N: TreeNode>(&self, node: &N) -> bool {
        match self {
            Self::Type(name) => node.name().is_some_and(|n| n == name.as_str()),
            Self::Id(id) => node.id().is_some_and(|v| v.as_ref() == id.as_str()),
            Self::Class(class) => node.classes().iter().any(|c| c.as_ref() == class.as_str()),
            Self::Attribute(attribute) => attribute_matches(attribute, node),
            Self::Structural(structural) => structural.matches(node),
            Self::Not(alternatives) => !alternatives.iter().any(|alt| alt.matches(node)),
        }
    }
}

/// [§ 6.1](https://www.w3.org/TR/selectors-4/#attribute-representation)
/// [§ 6.2](https://www.w3.org/TR/selectors-4/#attribute-substrings)
fn attribute_matches<N: TreeNode>(selector: &AttributeSelector, node: &N) -> bool {
    let Some(actual) = node.attribute(selector.name()) else {
        return false;
    };
    let actual = actual.as_ref();

    match selector {
        AttributeSelector::Exists(_) => true,
        AttributeSelector::Equals(_, value) => actual == value,
        // "If 'val' contains whitespace, it will never represent anything
        // (since the words are separated by spaces). Also if 'val' is the
        // empty string, it will never represent anything."
        AttributeSelector::Includes(_, value) => {
            !value.is_empty()
                && !value.contains(char::is_whitespace)
                && actual.split_whitespace().any(|word| word == value)
        }
        AttributeSelector::DashMatch(_, value) => actual
            .strip_prefix(value.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('-')),
        // "If 'val' is the empty string then the selector does not represent
        // anything."
        AttributeSelector::PrefixMatch(_, value) => {
            !value.is_empty() && actual.starts_with(value.as_str())
        }
        AttributeSelector::SuffixMatch(_, value) => {
            !value.is_empty() && actual.ends_with(value.as_str())
        }
        AttributeSelector::SubstringMatch(_, value) => {
            !value.is_empty() && actual.contains(value.as_str())
        }
    }
}

impl Structural {
    fn matches<N: TreeNode>(self, node: &N) -> bool {
        match self {
            // "The :root pseudo-class represents an element that is the root of
            // the document." Here: an element with no element parent.
            Self::Root => !node.parent().is_some_and(|parent| parent.is_element()),

            // "The :empty pseudo-class represents an element that has no children"
            Self::Empty => node.children().next().is_none(),

            // "first among its inclusive siblings"
            Self::FirstChild => {
                node.parent().is_some() && previous_element_sibling(node).is_none()
            }

            // "last among its inclusive siblings"
            Self::LastChild => node.parent().is_some() && next_element_sibling(node).is_none(),

            Self::OnlyChild => {
                node.parent().is_some()
                    && previous_element_sibling(node).is_none()
                    && next_element_sibling(node).is_none()
            }

            // "the first sibling of its type"
            Self::FirstOfType => {
                node.parent().is_some()
                    && !preceding_siblings(node).any(|sibling| same_type(node, &sibling))
            }

            // "the last sibling of its type"
            Self::LastOfType => {
                node.parent().is_some()
                    && !following_siblings(node).any(|sibling| same_type(node, &sibling))
            }

            Self::NthChild(nth) => element_index(node).is_some_and(|index| nth.matches(index)),

            Self::NthLastChild(nth) => {
                element_index_from_end(node).is_some_and(|index| nth.matches(index))
            }
        }
    }
}

fn same_type<N: TreeNode>(node: &N, sibling: &N) -> bool {
    sibling.is_element()
        && match (node.name(), sibling.name()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
}
