//! NativeView DOM - Document Object Model
//!
//! Arena-based DOM tree with native event listener registration and
//! bubbling dispatch. This is the platform layer the view binding talks to.

mod node;
mod tree;
mod document;
mod interner;
mod element;
mod events;
mod operations;

pub use node::{Node, NodeData, ElementData, Attribute};
pub use tree::{DomTree, Children};
pub use document::Document;
pub use interner::{StringInterner, InternedString};
pub use element::NodeList;
pub use events::{Event, EventListener, EventPhase, ListenerOptions};
pub use operations::{DomError, DomResult, NodeOperations};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node)
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Convert sentinel links into `Option`
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }

    /// Raw arena index
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
