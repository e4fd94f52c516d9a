//! Element binding
//!
//! Resolves a view's root element and exposes the small DOM surface views
//! use around it. [`NativeDom`] is the same surface without a view.

use crate::input::ElementInput;
use crate::ViewResult;
use nativeview_css::{query_selector, query_selector_all, SelectorList};
use nativeview_dom::{Document, DomError, NodeId, NodeList, NodeOperations};

/// A view that owns a root element
pub trait ElementBound {
    /// Document the element lives in
    fn document(&self) -> &Document;

    /// The bound root element (`el`)
    fn element(&self) -> Option<NodeId>;

    /// Replace the stored root. Use [`set_element`](Self::set_element)
    /// instead; this only writes the slot.
    fn store_element(&self, element: Option<NodeId>);

    /// The root as a list (`$el`): one entry, or empty when unbound
    fn el_list(&self) -> NodeList {
        self.element().map(NodeList::single).unwrap_or_default()
    }

    /// Resolve `input` and bind the result as the root.
    ///
    /// Delegated listeners stay on the previous root; undelegate first.
    fn set_element(&self, input: impl Into<ElementInput>) -> ViewResult<&Self>
    where
        Self: Sized,
    {
        let element = self.resolve_root(input.into())?;
        tracing::debug!("Binding view element {:?}", element);
        self.store_element(element);
        Ok(self)
    }

    /// Resolve `input` to a node without binding it.
    ///
    /// Markup is parsed as the contents of a `<div>` and only its first
    /// top-level node is kept, whitespace text included. A selector
    /// resolves to the first match in the document, or `None`.
    fn resolve_root(&self, input: ElementInput) -> ViewResult<Option<NodeId>> {
        let document = self.document();
        match input {
            ElementInput::Str(s) if ElementInput::is_markup(&s) => {
                let nodes = nativeview_html::parse_fragment(document, &s)?;
                Ok(nodes.first().copied())
            }
            ElementInput::Str(s) => {
                let selector = SelectorList::parse(&s)?;
                Ok(query_selector(document, document.root(), &selector))
            }
            ElementInput::Node(node) => Ok(Some(node)),
            ElementInput::Nodes(nodes) => Ok(nodes.first().copied()),
            ElementInput::Empty => Ok(None),
        }
    }

    /// Descendants of the root matching `selector` (`$`)
    fn find(&self, selector: &str) -> ViewResult<NodeList> {
        let root = self.element().ok_or(DomError::NotFound)?;
        self.dom().find_el(root, selector)
    }

    /// Write each attribute onto the root. Reflected property names such
    /// as `className` and `htmlFor` write their content attribute.
    fn set_attributes<K, V>(&self, attrs: impl IntoIterator<Item = (K, V)>) -> ViewResult<()>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        Self: Sized,
    {
        let root = self.element().ok_or(DomError::NotFound)?;
        for (name, value) in attrs {
            self.document().set_attribute(root, attribute_name(name.as_ref()), value.as_ref())?;
        }
        Ok(())
    }

    /// DOM helpers bound to this view's document
    fn dom(&self) -> NativeDom<'_> {
        NativeDom::new(self.document())
    }
}

/// Content attribute behind a reflected element property
fn attribute_name(name: &str) -> &str {
    match name {
        "className" => "class",
        "htmlFor" => "for",
        "tabIndex" => "tabindex",
        "accessKey" => "accesskey",
        other => other,
    }
}

/// DOM helpers over native primitives
#[derive(Debug, Clone, Copy)]
pub struct NativeDom<'a> {
    document: &'a Document,
}

impl<'a> NativeDom<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Every document element matching a selector, or a handle wrapped as a list
    pub fn get_el(&self, input: impl Into<ElementInput>) -> ViewResult<NodeList> {
        match input.into() {
            ElementInput::Str(s) => {
                let selector = SelectorList::parse(&s)?;
                Ok(query_selector_all(self.document, self.document.root(), &selector))
            }
            ElementInput::Node(node) => Ok(NodeList::single(node)),
            ElementInput::Nodes(nodes) => Ok(NodeList::from_vec(nodes)),
            ElementInput::Empty => Ok(NodeList::new()),
        }
    }

    /// Descendants of `el` matching `selector`, in document order
    pub fn find_el(&self, el: NodeId, selector: &str) -> ViewResult<NodeList> {
        let selector = SelectorList::parse(selector)?;
        Ok(query_selector_all(self.document, el, &selector))
    }

    /// Remove `el` from its parent; listeners stay registered
    pub fn detach_el(&self, el: NodeId) {
        self.document.detach(el);
    }

    /// Replace the children of `el` with parsed markup. Empty markup keeps
    /// the current children.
    pub fn set_contents(&self, el: NodeId, html: &str) -> ViewResult<()> {
        if html.is_empty() {
            return Ok(());
        }
        nativeview_html::set_inner_html(self.document, el, html)?;
        Ok(())
    }

    /// Append `contents` as the last child of `el`
    pub fn append_contents(&self, el: NodeId, contents: NodeId) -> ViewResult<()> {
        self.document.append_child(el, contents)?;
        Ok(())
    }

    /// Remove every child of `el`, leaving `el` in place
    pub fn detach_contents(&self, el: NodeId) {
        self.document.clear_children(el);
    }
}
