//! Element input
//!
//! What a view's root can be given as: a selector, a markup string, an
//! element handle or a list of handles.

use nativeview_dom::{NodeId, NodeList};

/// Anything a view element can be resolved from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ElementInput {
    /// Selector, or markup when it starts with `<` after optional whitespace
    Str(String),
    Node(NodeId),
    /// Only the first entry is used
    Nodes(Vec<NodeId>),
    #[default]
    Empty,
}

impl ElementInput {
    /// Check whether a string input is markup rather than a selector
    pub fn is_markup(s: &str) -> bool {
        s.trim_start().starts_with('<')
    }
}

impl From<&str> for ElementInput {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ElementInput {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<NodeId> for ElementInput {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<Option<NodeId>> for ElementInput {
    fn from(node: Option<NodeId>) -> Self {
        node.map_or(Self::Empty, Self::Node)
    }
}

impl From<Vec<NodeId>> for ElementInput {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::Nodes(nodes)
    }
}

impl From<&[NodeId]> for ElementInput {
    fn from(nodes: &[NodeId]) -> Self {
        Self::Nodes(nodes.to_vec())
    }
}

impl From<NodeList> for ElementInput {
    fn from(list: NodeList) -> Self {
        Self::Nodes(list.into_vec())
    }
}
