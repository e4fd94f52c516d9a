//! Native view
//!
//! A view bound to one root element, with element binding and event
//! delegation composed from [`ElementBound`] and [`EventDelegating`].

use crate::binder::ElementBound;
use crate::delegator::{DelegationTable, EventDelegating};
use crate::input::ElementInput;
use crate::ViewResult;
use nativeview_dom::{Document, EventListener, NodeId};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// View construction options
#[derive(Clone)]
pub struct ViewOptions {
    /// Existing element to bind; when `None` an element is created
    pub el: Option<ElementInput>,
    /// Tag of the created element
    pub tag_name: String,
    pub id: Option<String>,
    pub class_name: Option<String>,
    /// Extra attributes for the created element
    pub attributes: Vec<(String, String)>,
    /// Delegated on construction, keyed `"event.ns selector"`
    pub events: Vec<(String, EventListener)>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            el: None,
            tag_name: "div".to_string(),
            id: None,
            class_name: None,
            attributes: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn el(mut self, el: impl Into<ElementInput>) -> Self {
        self.el = Some(el.into());
        self
    }

    pub fn tag_name(mut self, tag_name: &str) -> Self {
        self.tag_name = tag_name.to_string();
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class_name(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    pub fn attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn event(mut self, key: &str, listener: impl Into<EventListener>) -> Self {
        self.events.push((key.to_string(), listener.into()));
        self
    }
}

impl fmt::Debug for ViewOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewOptions")
            .field("el", &self.el)
            .field("tag_name", &self.tag_name)
            .field("id", &self.id)
            .field("class_name", &self.class_name)
            .field("attributes", &self.attributes)
            .field("events", &self.events.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}

/// View over native DOM primitives
#[derive(Debug)]
pub struct NativeView {
    document: Rc<Document>,
    el: Cell<Option<NodeId>>,
    dom_events: DelegationTable,
}

impl NativeView {
    /// Create a view and make sure it has an element.
    ///
    /// With `options.el` the element is resolved from it (and may resolve to
    /// nothing). Otherwise a detached `tag_name` element is created carrying
    /// `id`, `class_name` and `attributes`. `events` are delegated last.
    pub fn new(document: Rc<Document>, options: ViewOptions) -> ViewResult<Self> {
        let view = Self {
            document,
            el: Cell::new(None),
            dom_events: DelegationTable::new(),
        };

        match options.el {
            Some(el) => {
                view.set_element(el)?;
            }
            None => {
                let el = view.document.create_element(&options.tag_name);
                view.set_element(el)?;

                let mut attrs = options.attributes;
                if let Some(id) = options.id {
                    attrs.push(("id".to_string(), id));
                }
                if let Some(class_name) = options.class_name {
                    attrs.push(("class".to_string(), class_name));
                }
                view.set_attributes(attrs)?;
            }
        }

        if !options.events.is_empty() {
            view.delegate_events(options.events)?;
        }
        Ok(view)
    }

    /// Shared handle to the document
    pub fn document_rc(&self) -> &Rc<Document> {
        &self.document
    }
}

impl ElementBound for NativeView {
    fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self) -> Option<NodeId> {
        self.el.get()
    }

    fn store_element(&self, element: Option<NodeId>) {
        self.el.set(element);
    }
}

impl EventDelegating for NativeView {
    fn delegation_table(&self) -> &DelegationTable {
        &self.dom_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nativeview_dom::Event;
    use std::cell::RefCell;

    #[test]
    fn test_creates_element_from_options() {
        let doc = Rc::new(Document::default());
        let options = ViewOptions::new()
            .tag_name("ul")
            .id("list")
            .class_name("items open")
            .attribute("role", "menu");
        let view = NativeView::new(doc.clone(), options).unwrap();

        let el = view.element().unwrap();
        assert_eq!(doc.tag_name(el).as_deref(), Some("ul"));
        assert_eq!(doc.get_attribute(el, "id").as_deref(), Some("list"));
        assert_eq!(doc.get_attribute(el, "class").as_deref(), Some("items open"));
        assert_eq!(doc.get_attribute(el, "role").as_deref(), Some("menu"));
        assert!(!doc.contains(el));
    }

    #[test]
    fn test_default_tag_is_div() {
        let doc = Rc::new(Document::default());
        let view = NativeView::new(doc.clone(), ViewOptions::default()).unwrap();
        assert_eq!(doc.tag_name(view.element().unwrap()).as_deref(), Some("div"));
        assert!(view.delegation_table().is_empty());
    }

    #[test]
    fn test_existing_element_option() {
        let doc = Rc::new(Document::default());
        let view = NativeView::new(doc.clone(), ViewOptions::new().el("body")).unwrap();
        assert_eq!(view.element(), Some(doc.body()));

        let none = NativeView::new(doc, ViewOptions::new().el("#nope")).unwrap();
        assert_eq!(none.element(), None);
    }

    #[test]
    fn test_events_option_delegates() {
        let doc = Rc::new(Document::default());
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let log = clicks.clone();
        let options = ViewOptions::new().event("click.menu", move |_: &Document, e: &mut Event| {
            log.borrow_mut().push(e.target());
        });

        let view = NativeView::new(doc.clone(), options).unwrap();
        let el = view.element().unwrap();
        doc.dispatch_event(el, &mut Event::bubbling("click")).unwrap();

        assert_eq!(*clicks.borrow(), vec![el]);
        assert_eq!(view.delegation_table().len(), 1);
        assert_eq!(view.delegation_table().snapshot()[0].event_name, "click");
    }
}
