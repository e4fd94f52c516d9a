//! Event delegation
//!
//! Every delegated listener is registered once on the view's root element.
//! With a selector, the registered handler is a wrapper that walks from the
//! event target up to (not including) the root and calls the listener for
//! each ancestor matching the selector. Each registration is recorded in the
//! view's [`DelegationTable`] so it can be removed selectively or all at once.

use crate::binder::ElementBound;
use crate::proto::ElementProto;
use crate::ViewResult;
use nativeview_css::SelectorList;
use nativeview_dom::{DomError, EventListener, ListenerOptions, NodeId};
use std::cell::RefCell;

/// One native registration made through a view
#[derive(Debug, Clone)]
pub struct DelegationRecord {
    /// Element the handler was added to
    pub root: NodeId,
    /// Event name with any namespace suffix removed
    pub event_name: String,
    pub selector: Option<String>,
    /// Caller's listener; the identity used for removal
    pub listener: EventListener,
    /// What was registered with the platform
    pub handler: EventListener,
}

/// Registrations of one view, in insertion order
#[derive(Debug, Default)]
pub struct DelegationTable {
    records: RefCell<Vec<DelegationRecord>>,
}

impl DelegationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Copy of the records, so callers can scan while the table changes
    pub fn snapshot(&self) -> Vec<DelegationRecord> {
        self.records.borrow().clone()
    }

    fn contains(&self, root: NodeId, event_name: &str, handler: &EventListener) -> bool {
        self.records
            .borrow()
            .iter()
            .any(|r| r.root == root && r.event_name == event_name && r.handler == *handler)
    }

    fn push(&self, record: DelegationRecord) {
        self.records.borrow_mut().push(record);
    }

    /// Remove the last record registered on `root` with this name and handler
    fn remove(&self, root: NodeId, event_name: &str, handler: &EventListener) {
        let mut records = self.records.borrow_mut();
        if let Some(pos) = records
            .iter()
            .rposition(|r| r.root == root && r.event_name == event_name && r.handler == *handler)
        {
            records.remove(pos);
        }
    }

    fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

/// Drop a `.namespace` suffix: `"click.menu"` becomes `"click"`.
/// A leading dot is not a namespace separator.
pub fn strip_namespace(event_name: &str) -> &str {
    match event_name.find('.') {
        Some(dot) if dot > 0 => event_name[..dot].trim(),
        _ => event_name,
    }
}

/// Split a `"event.ns selector"` key at the first whitespace
pub fn split_event_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once(char::is_whitespace) {
        Some((event_name, selector)) => {
            let selector = selector.trim_start();
            (event_name, (!selector.is_empty()).then_some(selector))
        }
        None => (key, None),
    }
}

/// Handler that invokes `listener` for each node between the event target
/// and `root` (exclusive) matching `selector`, innermost first
fn delegated_handler(root: NodeId, selector: SelectorList, listener: EventListener) -> EventListener {
    let proto = ElementProto::get();
    EventListener::new(move |document, event| {
        let mut node = Some(event.target());
        while let Some(current) = node {
            if current == root {
                break;
            }
            if proto.matches(document, current, &selector) {
                tracing::trace!("Delegated '{}' matched {:?}", event.event_type(), current);
                event.delegate_target = Some(current);
                listener.call(document, event);
            }
            node = document.parent(current);
        }
    })
}

/// Scoped, revocable event delegation on a view's root element
pub trait EventDelegating: ElementBound {
    /// This view's registrations
    fn delegation_table(&self) -> &DelegationTable;

    /// Listen for `event_name` on the root, or on descendants matching
    /// `selector` when one is given.
    ///
    /// Returns the handler registered with the platform. Fails with
    /// [`DomError::NotFound`] when the view has no element and with the
    /// selector error when `selector` does not parse.
    fn delegate(&self, event_name: &str, selector: Option<&str>, listener: EventListener) -> ViewResult<EventListener> {
        let root = self.element().ok_or(DomError::NotFound)?;
        let selector = selector.filter(|s| !s.is_empty());
        let event_name = strip_namespace(event_name);

        let handler = match selector {
            Some(s) => delegated_handler(root, SelectorList::parse(s)?, listener.clone()),
            None => listener.clone(),
        };

        let table = self.delegation_table();
        if table.contains(root, event_name, &handler) {
            // The platform ignores a second registration on the same element
            tracing::trace!("'{}' listener already delegated on {:?}", event_name, root);
            return Ok(handler);
        }

        let proto = ElementProto::get();
        (proto.add_listener)(self.document(), root, event_name, handler.clone(), ListenerOptions::default())?;
        table.push(DelegationRecord {
            root,
            event_name: event_name.to_string(),
            selector: selector.map(str::to_string),
            listener,
            handler: handler.clone(),
        });

        tracing::debug!("Delegated '{}' (selector {:?}) on {:?}", event_name, selector, root);
        Ok(handler)
    }

    /// Remove delegated listeners registered for exactly `event_name`,
    /// narrowed by `selector` and `listener` when given.
    ///
    /// Records delegated without a selector never match a selector filter.
    /// Does nothing when the view has no element.
    fn undelegate(&self, event_name: &str, selector: Option<&str>, listener: Option<&EventListener>) -> &Self
    where
        Self: Sized,
    {
        let Some(root) = self.element() else {
            return self;
        };
        let table = self.delegation_table();
        if table.is_empty() {
            return self;
        }

        let selector = selector.filter(|s| !s.is_empty());
        let proto = ElementProto::get();
        let mut removed = 0;

        for record in table.snapshot().iter().rev() {
            let matched = record.event_name == event_name
                && listener.is_none_or(|l| record.listener == *l)
                && selector.is_none_or(|s| record.selector.as_deref() == Some(s));
            if !matched {
                continue;
            }

            (proto.remove_listener)(self.document(), root, &record.event_name, &record.handler, false);
            table.remove(record.root, &record.event_name, &record.handler);
            removed += 1;
        }

        tracing::debug!("Undelegated {} '{}' listener(s) from {:?}", removed, event_name, root);
        self
    }

    /// Remove every delegated listener. Does nothing when the view has no element.
    fn undelegate_events(&self) -> &Self
    where
        Self: Sized,
    {
        let Some(root) = self.element() else {
            return self;
        };
        let table = self.delegation_table();
        if table.is_empty() {
            return self;
        }

        let proto = ElementProto::get();
        let records = table.snapshot();
        for record in &records {
            (proto.remove_listener)(self.document(), root, &record.event_name, &record.handler, false);
        }
        table.clear();

        tracing::debug!("Undelegated all {} listener(s) from {:?}", records.len(), root);
        self
    }

    /// Replace all delegated listeners with `events`, keyed `"event.ns selector"`
    fn delegate_events<K>(&self, events: impl IntoIterator<Item = (K, EventListener)>) -> ViewResult<&Self>
    where
        K: AsRef<str>,
        Self: Sized,
    {
        self.undelegate_events();
        for (key, listener) in events {
            let (event_name, selector) = split_event_key(key.as_ref());
            self.delegate(event_name, selector, listener)?;
        }
        Ok(self)
    }

    /// Undelegate everything, then detach the root from its parent
    fn remove_element(&self) -> &Self
    where
        Self: Sized,
    {
        self.undelegate_events();
        if let Some(root) = self.element() {
            self.dom().detach_el(root);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nativeview_dom::Document;

    #[test]
    fn test_strip_namespace() {
        assert_eq!(strip_namespace("click"), "click");
        assert_eq!(strip_namespace("click.menu"), "click");
        assert_eq!(strip_namespace("click .menu.more"), "click");
        assert_eq!(strip_namespace(".menu"), ".menu");
        assert_eq!(strip_namespace(""), "");
    }

    #[test]
    fn test_split_event_key() {
        assert_eq!(split_event_key("click"), ("click", None));
        assert_eq!(split_event_key("click.ns .item a"), ("click.ns", Some(".item a")));
        assert_eq!(split_event_key("keyup   input"), ("keyup", Some("input")));
        assert_eq!(split_event_key("focus "), ("focus", None));
    }

    #[test]
    fn test_table_remove_targets_last_match() {
        let doc = Document::default();
        let (body, other) = (doc.body(), doc.create_element("div"));
        let table = DelegationTable::new();
        let a = EventListener::new(|_, _| {});
        let b = EventListener::new(|_, _| {});
        for (root, name, l) in [(body, "click", &a), (body, "keyup", &a), (body, "click", &b), (other, "click", &a)] {
            table.push(DelegationRecord {
                root,
                event_name: name.to_string(),
                selector: None,
                listener: l.clone(),
                handler: l.clone(),
            });
        }

        table.remove(body, "click", &a);
        let left: Vec<_> = table.snapshot().into_iter().map(|r| (r.root, r.event_name)).collect();
        assert_eq!(
            left,
            [(body, "keyup".to_string()), (body, "click".to_string()), (other, "click".to_string())]
        );
        assert!(table.contains(body, "keyup", &a));
        assert!(!table.contains(body, "click", &a));
        assert!(table.contains(other, "click", &a));
    }
}
