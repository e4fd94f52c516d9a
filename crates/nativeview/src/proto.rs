//! Element primitives
//!
//! The selector match primitive and the listener add/remove primitives are
//! looked up once per process and cached. Nothing re-probes after the first
//! call to [`ElementProto::get`].

use nativeview_css::MatchesFn;
use nativeview_dom::{Document, DomResult, EventListener, ListenerOptions, NodeId};
use std::fmt;
use std::sync::OnceLock;

/// Native `addEventListener`
pub type AddListenerFn = fn(&Document, NodeId, &str, EventListener, ListenerOptions) -> DomResult<()>;

/// Native `removeEventListener`
pub type RemoveListenerFn = fn(&Document, NodeId, &str, &EventListener, bool) -> bool;

/// Names the match primitive may be exposed under, in preference order
pub const MATCHES_CANDIDATES: &[&str] = &[
    "matches",
    "webkitMatchesSelector",
    "mozMatchesSelector",
    "msMatchesSelector",
    "oMatchesSelector",
];

static PROTO: OnceLock<ElementProto> = OnceLock::new();

/// Resolved element primitives
#[derive(Clone, Copy)]
pub struct ElementProto {
    /// Name the match primitive was found under
    pub matches_name: Option<&'static str>,
    /// `None` when the platform exposes none of the candidates; selectors
    /// then never match
    pub matches: Option<MatchesFn>,
    pub add_listener: AddListenerFn,
    pub remove_listener: RemoveListenerFn,
}

impl ElementProto {
    /// Process-wide primitives, resolved on first use
    pub fn get() -> &'static ElementProto {
        PROTO.get_or_init(|| {
            let proto = Self::resolve_with(nativeview_css::element_method);
            match proto.matches_name {
                Some(name) => tracing::debug!("Element match primitive resolved as '{}'", name),
                None => tracing::warn!("No element match primitive available"),
            }
            proto
        })
    }

    /// Probe `lookup` for each candidate name; the first hit wins
    pub fn resolve_with(lookup: impl Fn(&str) -> Option<MatchesFn>) -> Self {
        let found = MATCHES_CANDIDATES
            .iter()
            .find_map(|&name| lookup(name).map(|f| (name, f)));

        Self {
            matches_name: found.map(|(name, _)| name),
            matches: found.map(|(_, f)| f),
            add_listener: Document::add_event_listener,
            remove_listener: Document::remove_event_listener,
        }
    }

    /// Run the match primitive
    pub fn matches(&self, document: &Document, node: NodeId, selector: &nativeview_css::SelectorList) -> bool {
        self.matches.is_some_and(|m| m(document, node, selector))
    }
}

impl fmt::Debug for ElementProto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementProto")
            .field("matches_name", &self.matches_name)
            .finish_non_exhaustive()
    }
}
