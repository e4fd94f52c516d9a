//! CSS Selectors Module
//!
//! Selector data model and per-component matching.

use nativeview_dom::{DomTree, NodeId};

/// Comma-separated list of complex selectors
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

/// Compound selectors joined by combinators, left to right.
///
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// Sequence of simple selectors with no combinator between them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

/// Combinator between compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// A component of a selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (lowercased tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Structural and logical pseudo-classes
    PseudoClass(PseudoClass),
}

/// Supported pseudo-classes
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    Not(Vec<CompoundSelector>),
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse "2n+1", "odd", "even", "3", "-n+3"
    pub fn parse(s: &str) -> Option<Self> {
        let s: String = s.trim().to_ascii_lowercase().split_whitespace().collect();

        match s.as_str() {
            "odd" => return Some(Self::new(2, 1)),
            "even" => return Some(Self::new(2, 0)),
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::new(0, n));
        }

        let n_pos = s.find('n')?;
        let a = match &s[..n_pos] {
            "" | "+" => 1,
            "-" => -1,
            a => a.parse().ok()?,
        };
        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() {
            0
        } else {
            rest.strip_prefix('+').unwrap_or(rest).parse().ok()?
        };

        Some(Self::new(a, b))
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }

        // Widened so extreme offsets cannot overflow
        let a = i64::from(self.a);
        let diff = i64::from(n) - i64::from(self.b);
        if a > 0 {
            diff >= 0 && diff % a == 0
        } else {
            diff <= 0 && diff % a == 0
        }
    }
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    /// Lowercased attribute name
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        let Some(matcher) = &self.matcher else {
            return true;
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let val = fold(value);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                !expected.is_empty() && val.split_ascii_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                val == expected || val.starts_with(&format!("{}-", expected))
            }
            // Empty operands never match for the substring family
            AttributeMatcher::Prefix(expected) => !expected.is_empty() && val.starts_with(&fold(expected)),
            AttributeMatcher::Suffix(expected) => !expected.is_empty() && val.ends_with(&fold(expected)),
            AttributeMatcher::Substring(expected) => !expected.is_empty() && val.contains(&fold(expected)),
        }
    }
}

/// Match a selector component against an element
pub fn match_component(tree: &DomTree, element: NodeId, component: &SelectorComponent) -> bool {
    match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(tag) => tree.tag_name(element) == Some(tag.as_str()),
        SelectorComponent::Id(id) => tree.get_attribute(element, "id") == Some(id.as_str()),
        SelectorComponent::Class(class) => tree.has_class(element, class),
        SelectorComponent::Attribute(attr) => attr.matches(tree.get_attribute(element, &attr.name)),
        SelectorComponent::PseudoClass(pseudo) => match_pseudo_class(tree, element, pseudo),
    }
}

/// Match every component of a compound selector
pub fn match_compound(tree: &DomTree, element: NodeId, compound: &CompoundSelector) -> bool {
    tree.is_element(element)
        && compound.components.iter().all(|c| match_component(tree, element, c))
}

/// Match a pseudo-class against an element
pub fn match_pseudo_class(tree: &DomTree, element: NodeId, pseudo: &PseudoClass) -> bool {
    match pseudo {
        PseudoClass::Root => tree.parent(element) == Some(tree.root()),
        PseudoClass::Empty => tree.children(element).all(|(_, n)| {
            !n.is_element() && n.as_text().is_none_or(str::is_empty)
        }),
        PseudoClass::FirstChild => previous_elements(tree, element) == 0,
        PseudoClass::LastChild => following_elements(tree, element) == 0,
        PseudoClass::OnlyChild => {
            previous_elements(tree, element) == 0 && following_elements(tree, element) == 0
        }
        PseudoClass::NthChild(expr) => expr.matches(previous_elements(tree, element) as i32 + 1),
        PseudoClass::NthLastChild(expr) => expr.matches(following_elements(tree, element) as i32 + 1),
        PseudoClass::Not(compounds) => !compounds.iter().any(|c| match_compound(tree, element, c)),
    }
}

/// Element siblings before `element`
fn previous_elements(tree: &DomTree, element: NodeId) -> usize {
    std::iter::successors(tree.prev_sibling(element), |&n| tree.prev_sibling(n))
        .filter(|&n| tree.is_element(n))
        .count()
}

/// Element siblings after `element`
fn following_elements(tree: &DomTree, element: NodeId) -> usize {
    std::iter::successors(tree.next_sibling(element), |&n| tree.next_sibling(n))
        .filter(|&n| tree.is_element(n))
        .count()
}
