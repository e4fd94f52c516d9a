//! NativeView CSS - Selector engine
//!
//! Parses selector lists and matches them against the DOM. This crate is
//! the "native" selector primitive the view binding relies on: element
//! matching, scoped queries and the element method table probed at startup.

mod parser;
mod selectors;
mod matching;

pub use parser::SelectorParser;
pub use selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, SelectorComponent, SelectorList,
};
pub use matching::{matches, matches_in, query_selector, query_selector_all, ElementQuery};

use nativeview_dom::{Document, NodeId};

impl SelectorList {
    /// Parse a selector list such as `"h1, .item > a[href]"`
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        tracing::trace!("Parsing selector '{}'", selector);
        SelectorParser::new(selector).parse()
    }
}

impl std::str::FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Signature of the element "matches selector" primitive
pub type MatchesFn = fn(&Document, NodeId, &SelectorList) -> bool;

/// Element methods this platform exposes, by name
const ELEMENT_METHODS: &[(&str, MatchesFn)] = &[("matches", matches)];

/// Look up an element method by name, as a capability probe would.
/// Vendor-prefixed aliases are not exposed by this platform.
pub fn element_method(name: &str) -> Option<MatchesFn> {
    ELEMENT_METHODS
        .iter()
        .find(|(method, _)| *method == name)
        .map(|&(_, f)| f)
}

/// Selector errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("'{selector}' is not a valid selector: {reason}")]
    Invalid { selector: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_method_table() {
        assert!(element_method("matches").is_some());
        assert!(element_method("webkitMatchesSelector").is_none());
        assert!(element_method("querySelector").is_none());
    }

    #[test]
    fn test_from_str() {
        let list: SelectorList = "a, b".parse().unwrap();
        assert_eq!(list.selectors.len(), 2);
        assert!("a[".parse::<SelectorList>().is_err());
    }
}
