//! NativeView HTML
//!
//! HTML5 fragment parsing (built on html5ever) into an existing
//! [`Document`](nativeview_dom::Document), plus innerHTML/outerHTML
//! serialization.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, inner_html, outer_html};

use nativeview_dom::{Document, DomError, NodeId, NodeOperations};

/// Parse `html` into detached nodes owned by `document`
pub fn parse_fragment(document: &Document, html: &str) -> Result<Vec<NodeId>, ParseError> {
    HtmlParser::new().parse_fragment(document, html)
}

/// Parse `html` as the contents of a `context` element
pub fn parse_fragment_in(document: &Document, context: &str, html: &str) -> Result<Vec<NodeId>, ParseError> {
    HtmlParser::new().parse_fragment_in(document, context, html)
}

/// Replace every child of `node` with the parsed markup (`innerHTML = html`).
///
/// `node`'s own tag is the parsing context; non-elements parse as `<div>`.
pub fn set_inner_html(document: &Document, node: NodeId, html: &str) -> Result<(), ParseError> {
    let context = document.tag_name(node).unwrap_or_else(|| "div".to_string());
    let nodes = parse_fragment_in(document, &context, html)?;
    document.clear_children(node);
    for child in nodes {
        document.append_child(node, child)?;
    }
    Ok(())
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read markup: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Dom(#[from] DomError),
}
