//! Selector syntax tree.
//!
//! [§ 3 Selector Syntax and Structure](https://www.w3.org/TR/selectors-4/#syntax)
//!
//! The tree is purely syntactic: pseudo-class names are kept as written and
//! only resolved by the compiler. Every node implements `Display`, which
//! writes the selector back out in a normalized form.

use std::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// [§ 4.1 Selector Lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// "A comma-separated list of selectors represents the union of all elements
/// selected by each of the individual selectors in the selector list."
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorGroup {
    /// The alternatives, in written order. Never empty.
    pub selectors: Vec<Selector>,
}

/// [§ 3.1 Structure and Terminology](https://www.w3.org/TR/selectors-4/#complex)
///
/// A chain of compound selectors joined by combinators, stored left to
/// right as written.
///
/// Example: `div.container > ul li` is stored as
/// ```text
/// first: [div.container]
/// rest:  [(Child, [ul]), (Descendant, [li])]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selector {
    /// The leftmost compound selector.
    pub first: CompoundSelector,
    /// Each following compound with the combinator that precedes it.
    pub rest: Vec<(Combinator, CompoundSelector)>,
}

impl Selector {
    /// The rightmost compound, whose elements the selector represents.
    #[must_use]
    pub fn subject(&self) -> &CompoundSelector {
        self.rest.last().map_or(&self.first, |(_, compound)| compound)
    }

    /// Check if this is a single compound selector (no combinators).
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        self.rest.is_empty()
    }
}

/// [§ 3.1](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompoundSelector {
    /// The simple selectors, in written order. Never empty.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// The `Display`/`FromStr` forms are the written symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
pub enum Combinator {
    /// [§ 16.1](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// `A B`: B is an arbitrary descendant of A.
    #[strum(serialize = " ")]
    Descendant,

    /// [§ 16.2](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// `A > B`: B is a direct child of A.
    #[strum(serialize = ">")]
    Child,

    /// [§ 16.3](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
    /// `A + B`: B immediately follows A.
    #[strum(serialize = "+")]
    NextSibling,

    /// [§ 16.4](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
    /// `A ~ B`: B follows A, not necessarily immediately.
    #[strum(serialize = "~")]
    SubsequentSibling,
}

/// A single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    ///
    /// Examples: `div`, `p`, `Button`
    Type(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    ///
    /// Example: `*`
    Universal,

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    ///
    /// Examples: `.highlight`, `.nav-item`
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    ///
    /// Examples: `#main`, `#nav-bar`
    Id(String),

    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// Examples: `[href]`, `[type=text]`, `[lang|=en]`
    Attribute(AttributeSelector),

    /// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    ///
    /// Examples: `:first-child`, `:nth-child(2n+1)`, `:not(.skip)`
    PseudoClass(PseudoClassSelector),

    /// [§ 3.6 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
    ///
    /// Parsed so the error can name it; never matchable.
    ///
    /// Example: `::before`
    PseudoElement(String),
}

/// [§ 6.1 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttributeSelector {
    /// `[attr]` - "Represents an element with the att attribute"
    Exists(String),

    /// `[attr=value]` - value is exactly `value`.
    Equals(String, String),

    /// `[attr~=value]` - value is a whitespace-separated list of words, one
    /// of which is exactly `value`.
    Includes(String, String),

    /// `[attr|=value]` - value is exactly `value` or starts with `value-`.
    DashMatch(String, String),

    /// `[attr^=value]` - value begins with `value`.
    PrefixMatch(String, String),

    /// `[attr$=value]` - value ends with `value`.
    SuffixMatch(String, String),

    /// `[attr*=value]` - value contains `value`.
    SubstringMatch(String, String),
}

/// The operator between attribute name and value, as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
pub enum AttributeOperator {
    /// `=`
    #[strum(serialize = "=")]
    Equals,
    /// `~=`
    #[strum(serialize = "~=")]
    Includes,
    /// `|=`
    #[strum(serialize = "|=")]
    DashMatch,
    /// `^=`
    #[strum(serialize = "^=")]
    PrefixMatch,
    /// `$=`
    #[strum(serialize = "$=")]
    SuffixMatch,
    /// `*=`
    #[strum(serialize = "*=")]
    SubstringMatch,
}

impl AttributeSelector {
    /// Build a value-testing attribute selector.
    #[must_use]
    pub fn with_operator(name: String, operator: AttributeOperator, value: String) -> Self {
        match operator {
            AttributeOperator::Equals => Self::Equals(name, value),
            AttributeOperator::Includes => Self::Includes(name, value),
            AttributeOperator::DashMatch => Self::DashMatch(name, value),
            AttributeOperator::PrefixMatch => Self::PrefixMatch(name, value),
            AttributeOperator::SuffixMatch => Self::SuffixMatch(name, value),
            AttributeOperator::SubstringMatch => Self::SubstringMatch(name, value),
        }
    }

    /// The attribute name being tested.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Exists(name)
            | Self::Equals(name, _)
            | Self::Includes(name, _)
            | Self::DashMatch(name, _)
            | Self::PrefixMatch(name, _)
            | Self::SuffixMatch(name, _)
            | Self::SubstringMatch(name, _) => name,
        }
    }

    /// The operator and expected value, or `None` for `[attr]`.
    #[must_use]
    pub fn test(&self) -> Option<(AttributeOperator, &str)> {
        match self {
            Self::Exists(_) => None,
            Self::Equals(_, value) => Some((AttributeOperator::Equals, value)),
            Self::Includes(_, value) => Some((AttributeOperator::Includes, value)),
            Self::DashMatch(_, value) => Some((AttributeOperator::DashMatch, value)),
            Self::PrefixMatch(_, value) => Some((AttributeOperator::PrefixMatch, value)),
            Self::SuffixMatch(_, value) => Some((AttributeOperator::SuffixMatch, value)),
            Self::SubstringMatch(_, value) => Some((AttributeOperator::SubstringMatch, value)),
        }
    }
}

/// A pseudo-class as written: its name and, for the functional form, its
/// argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PseudoClassSelector {
    /// The name without the leading `:`, case preserved.
    pub name: String,
    /// The parenthesized argument, if any.
    pub argument: Option<PseudoArgument>,
}

/// The argument of a functional pseudo-class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PseudoArgument {
    /// A nested selector list, as taken by `:not()`.
    Selectors(SelectorGroup),
    /// Any other argument, kept as text with whitespace collapsed
    /// (for example the `an+b` of `:nth-child()`).
    Raw(String),
}

impl fmt::Display for SelectorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        for (combinator, compound) in &self.rest {
            match combinator {
                Combinator::Descendant => write!(f, " {compound}")?,
                other => write!(f, " {other} {compound}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for simple in &self.simple_selectors {
            write!(f, "{simple}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => f.write_str(name),
            Self::Universal => f.write_str("*"),
            Self::Class(name) => write!(f, ".{name}"),
            Self::Id(name) => write!(f, "#{name}"),
            Self::Attribute(attribute) => write!(f, "{attribute}"),
            Self::PseudoClass(pseudo) => write!(f, "{pseudo}"),
            Self::PseudoElement(name) => write!(f, "::{name}"),
        }
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.test() {
            None => write!(f, "[{}]", self.name()),
            Some((operator, value)) => {
                let quoted = value.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "[{}{operator}\"{quoted}\"]", self.name())
            }
        }
    }
}

impl fmt::Display for PseudoClassSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name)?;
        match &self.argument {
            None => Ok(()),
            Some(PseudoArgument::Selectors(group)) => write!(f, "({group})"),
            Some(PseudoArgument::Raw(text)) => write!(f, "({text})"),
        }
    }
}
