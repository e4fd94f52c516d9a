//! HTML5 Parser implementation
//!
//! Uses html5ever's built-in RcDom and converts the parsed nodes into
//! nodes of an existing document. Markup goes through the fragment
//! algorithm against a context element, the same way `innerHTML` does, so
//! head-only tags such as `<style>` stay in place and whitespace is kept.

use crate::ParseError;
use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, QualName, ns};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use nativeview_dom::{Document, DomTree, NodeId};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse markup into detached nodes of `document`, as if assigned to
    /// the `innerHTML` of a `<div>`.
    ///
    /// Returns the top-level nodes in source order. Each is the root of a
    /// fully built subtree; none of them is attached anywhere yet.
    pub fn parse_fragment(&self, document: &Document, html: &str) -> Result<Vec<NodeId>, ParseError> {
        self.parse_fragment_in(document, "div", html)
    }

    /// Parse markup as the contents of a `context` element.
    ///
    /// The context decides the tree builder's insertion mode, so `<tr>`
    /// under `table` gains its implied `<tbody>` and text under `title`
    /// stays raw.
    pub fn parse_fragment_in(
        &self,
        document: &Document,
        context: &str,
        html: &str,
    ) -> Result<Vec<NodeId>, ParseError> {
        tracing::debug!("Parsing HTML fragment in <{}> ({} bytes)", context, html.len());

        let context_name = QualName::new(None, ns!(html), LocalName::from(context));
        let dom = html5ever::parse_fragment(RcDom::default(), Default::default(), context_name, Vec::new(), false)
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        // The tree builder puts the fragment under a synthetic <html> root
        let Some(root) = dom.document.children.borrow().first().cloned() else {
            return Ok(Vec::new());
        };

        let mut tree = document.tree_mut();
        let mut nodes = Vec::new();
        for child in root.children.borrow().iter() {
            if let Some(id) = self.convert_node(child, &mut tree)? {
                nodes.push(id);
            }
        }

        tracing::debug!("Parsed {} top-level nodes", nodes.len());
        Ok(nodes)
    }

    /// Convert an RcDom node (and its subtree) into our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree) -> Result<Option<NodeId>, ParseError> {
        let id = match &handle.data {
            RcNodeData::Text { contents } => tree.create_text(&contents.borrow()),
            RcNodeData::Comment { contents } => tree.create_comment(contents),
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value)?;
                }
                for child in handle.children.borrow().iter() {
                    if let Some(child_id) = self.convert_node(child, tree)? {
                        tree.append_child(id, child_id)?;
                    }
                }
                id
            }
            // Doctypes and processing instructions are dropped
            _ => return Ok(None),
        };
        Ok(Some(id))
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}
