//! Selector compilation.
//!
//! Turns a [`SelectorGroup`] into a [`Query`]: per compound selector a
//! predicate over one node, per combinator an expansion of the candidate
//! set. Everything that can go wrong is found here, before any tree is
//! seen.

mod matcher;
mod nth;
mod pipeline;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thicket_tree::TreeNode;
use tracing::{debug, trace};

use self::matcher::{CompiledCompound, CompiledSelector, Predicate, Structural};
use self::nth::Nth;
pub use self::pipeline::Matches;
use crate::error::{Result, SelectorError};
use crate::parser::{
    CompoundSelector, PseudoArgument, PseudoClassSelector, Selector, SelectorGroup,
    SimpleSelector, parse_selector_group,
};

/// A compiled selector group.
///
/// Holds no reference to any tree and no per-run state: one `Query` can be
/// cloned, shared between threads, and run against any number of trees of
/// any [`TreeNode`] backend.
///
/// ```
/// # use thicket_selector::Query;
/// let query: Query = "ul > li:nth-child(odd)".parse()?;
/// assert_eq!(query.selector(), "ul > li:nth-child(odd)");
/// # Ok::<(), thicket_selector::SelectorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    selector: Arc<str>,
    alternatives: Arc<[Arc<CompiledSelector>]>,
}

impl Query {
    /// Tokenize, parse and compile selector text.
    ///
    /// # Errors
    ///
    /// [`SelectorError::Lexical`] or [`SelectorError::Syntax`] if the text is
    /// not a selector group, [`SelectorError::Unsupported`] if it names a
    /// pseudo-class this engine does not implement or a pseudo-element.
    pub fn parse(selector: &str) -> Result<Self> {
        let group = parse_selector_group(selector)?;
        Self::build(selector.into(), &group)
    }

    /// Compile an already parsed selector group.
    ///
    /// # Errors
    ///
    /// [`SelectorError::Unsupported`], as for [`Query::parse`].
    pub fn compile(group: &SelectorGroup) -> Result<Self> {
        Self::build(group.to_string().into(), group)
    }

    fn build(selector: Arc<str>, group: &SelectorGroup) -> Result<Self> {
        let alternatives = compile_group(group)?
            .into_iter()
            .map(Arc::new)
            .collect::<Arc<[_]>>();

        debug!(
            selector = %selector,
            alternatives = alternatives.len(),
            "compiled selector"
        );

        Ok(Self {
            selector,
            alternatives,
        })
    }

    /// The selector text this query was built from.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Run the query over `roots` and all of their descendants.
    ///
    /// Roots that overlap (one inside another, or the same root twice) are
    /// walked once. The result is lazy: nothing is visited until it is
    /// pulled, and each node is yielded at most once.
    pub fn select<'a, N, I>(&self, roots: I) -> Matches<'a, N>
    where
        N: TreeNode + 'a,
        I: IntoIterator<Item = N>,
    {
        trace!(selector = %self.selector, "running query");
        pipeline::run_group(&self.alternatives, roots)
    }

    /// The first node [`Query::select`] would yield, without looking any
    /// further.
    #[must_use]
    pub fn first<N, I>(&self, roots: I) -> Option<N>
    where
        N: TreeNode,
        I: IntoIterator<Item = N>,
    {
        self.select(roots).next()
    }

    /// Whether `node` itself is matched, judged right to left from the node
    /// with whatever ancestors and siblings the combinators need.
    ///
    /// Unlike [`Query::select`] this is not confined to a set of roots: `div p`
    /// matches a `p` whose `div` ancestor is anywhere above it.
    #[must_use]
    pub fn matches<N: TreeNode>(&self, node: &N) -> bool {
        self.alternatives
            .iter()
            .any(|alternative| alternative.matches(node))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector)
    }
}

impl FromStr for Query {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn compile_group(group: &SelectorGroup) -> Result<Vec<CompiledSelector>> {
    group.selectors.iter().map(compile_selector).collect()
}

fn compile_selector(selector: &Selector) -> Result<CompiledSelector> {
    let head = compile_compound(&selector.first)?;
    let steps = selector
        .rest
        .iter()
        .map(|(combinator, compound)| Ok((*combinator, compile_compound(compound)?)))
        .collect::<Result<_>>()?;
    Ok(CompiledSelector { head, steps })
}

/// A compound is the conjunction of its simple selectors, evaluated in
/// written order. The universal selector contributes nothing.
fn compile_compound(compound: &CompoundSelector) -> Result<CompiledCompound> {
    let mut predicates = Vec::with_capacity(compound.simple_selectors.len());
    for simple in &compound.simple_selectors {
        if let Some(predicate) = compile_simple(simple)? {
            predicates.push(predicate);
        }
    }
    Ok(CompiledCompound { predicates })
}

fn compile_simple(simple: &SimpleSelector) -> Result<Option<Predicate>> {
    let predicate = match simple {
        SimpleSelector::Universal => return Ok(None),
        SimpleSelector::Type(name) => Predicate::Type(name.clone()),
        SimpleSelector::Id(id) => Predicate::Id(id.clone()),
        SimpleSelector::Class(class) => Predicate::Class(class.clone()),
        SimpleSelector::Attribute(attribute) => Predicate::Attribute(attribute.clone()),
        SimpleSelector::PseudoClass(pseudo) => compile_pseudo_class(pseudo)?,
        // "Pseudo-elements ... represent elements not directly present in the
        // document tree." There is nothing in a backend tree to return.
        SimpleSelector::PseudoElement(_) => return Err(SelectorError::unsupported(simple)),
    };
    Ok(Some(predicate))
}

/// [§ 14 Tree-Structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
/// and [§ 4.3 The Negation pseudo-class](https://www.w3.org/TR/selectors-4/#negation)
///
/// Names are ASCII case-insensitive. A known name with the wrong form
/// (`:first-child(2)`, a bare `:nth-child`) is as unsupported as an unknown
/// one.
fn compile_pseudo_class(pseudo: &PseudoClassSelector) -> Result<Predicate> {
    let unsupported = || SelectorError::unsupported(pseudo);
    let name = pseudo.name.to_ascii_lowercase();

    let structural = match (name.as_str(), &pseudo.argument) {
        ("not", Some(PseudoArgument::Selectors(group))) => {
            // Anything unsupported inside the negation fails the whole selector.
            return Ok(Predicate::Not(compile_group(group)?));
        }
        ("root", None) => Structural::Root,
        ("empty", None) => Structural::Empty,
        ("first-child", None) => Structural::FirstChild,
        ("last-child", None) => Structural::LastChild,
        ("only-child", None) => Structural::OnlyChild,
        ("first-of-type", None) => Structural::FirstOfType,
        ("last-of-type", None) => Structural::LastOfType,
        ("nth-child", Some(PseudoArgument::Raw(text))) => {
            Structural::NthChild(Nth::parse(text).ok_or_else(unsupported)?)
        }
        ("nth-last-child", Some(PseudoArgument::Raw(text))) => {
            Structural::NthLastChild(Nth::parse(text).ok_or_else(unsupported)?)
        }
        _ => return Err(unsupported()),
    };

    Ok(Predicate::Structural(structural))
}
