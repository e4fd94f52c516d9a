//! Document - High-level document API
//!
//! Every method takes `&self`: listeners receive the document while it is
//! dispatching and may add, remove or mutate nodes and listeners from there.
//! No `RefCell` borrow is held while a listener runs.

use crate::events::{ListenerRegistry, Registration};
use crate::{
    DomError, DomResult, DomTree, Event, EventListener, EventPhase, ListenerOptions,
    NodeId, NodeOperations,
};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// HTML Document
#[derive(Debug)]
pub struct Document {
    tree: RefCell<DomTree>,
    listeners: RefCell<ListenerRegistry>,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with an empty `html > (head, body)` skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh detached nodes under an element always link successfully
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree: RefCell::new(tree),
            listeners: RefCell::new(ListenerRegistry::default()),
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// The document node itself
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Borrow the DOM tree
    pub fn tree(&self) -> Ref<'_, DomTree> {
        self.tree.borrow()
    }

    /// Borrow the DOM tree mutably
    pub fn tree_mut(&self) -> RefMut<'_, DomTree> {
        self.tree.borrow_mut()
    }

    pub fn create_element(&self, tag: &str) -> NodeId {
        self.tree.borrow_mut().create_element(tag)
    }

    pub fn create_text(&self, text: &str) -> NodeId {
        self.tree.borrow_mut().create_text(text)
    }

    pub fn create_comment(&self, text: &str) -> NodeId {
        self.tree.borrow_mut().create_comment(text)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.borrow().parent(node)
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.tree.borrow().first_child(node)
    }

    /// Child IDs in order
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.borrow().children(node).map(|(id, _)| id).collect()
    }

    /// Check whether the node is attached to this document
    pub fn contains(&self, node: NodeId) -> bool {
        self.tree.borrow().is_inclusive_ancestor(NodeId::ROOT, node)
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.tree.borrow().is_element(node)
    }

    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.tree.borrow().tag_name(node).map(str::to_string)
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree.borrow().get_attribute(node, name).map(str::to_string)
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.tree.borrow_mut().set_attribute(node, name, value)
    }

    pub fn remove_attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree.borrow_mut().remove_attribute(node, name)
    }

    pub fn text_content(&self, node: NodeId) -> String {
        self.tree.borrow().text_content(node)
    }

    /// Remove a node from its parent; no-op when detached
    pub fn detach(&self, node: NodeId) {
        self.tree.borrow_mut().detach(node);
    }

    /// Remove every child of a node
    pub fn clear_children(&self, node: NodeId) {
        self.tree.borrow_mut().clear_children(node);
    }

    /// Get element by ID (attached elements only)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(NodeId::ROOT)
            .into_iter()
            .find(|&node| tree.get_attribute(node, "id") == Some(id))
    }

    /// Register a listener on a node
    pub fn add_event_listener(
        &self,
        node: NodeId,
        event_type: &str,
        listener: EventListener,
        options: ListenerOptions,
    ) -> DomResult<()> {
        if self.tree.borrow().get(node).is_none() {
            return Err(DomError::NotFound);
        }
        let added = self.listeners.borrow_mut().add(node, event_type, listener, options);
        if !added {
            tracing::trace!("Ignoring duplicate '{}' listener on {:?}", event_type, node);
        }
        Ok(())
    }

    /// Remove a listener registered with the same type, listener and phase
    pub fn remove_event_listener(
        &self,
        node: NodeId,
        event_type: &str,
        listener: &EventListener,
        capture: bool,
    ) -> bool {
        self.listeners.borrow_mut().remove(node, event_type, listener, capture)
    }

    /// Number of listeners for `event_type` registered on `node`
    pub fn listener_count(&self, node: NodeId, event_type: &str) -> usize {
        self.listeners.borrow().count(node, event_type)
    }

    /// Number of listeners of any type registered on `node`
    pub fn total_listener_count(&self, node: NodeId) -> usize {
        self.listeners.borrow().count_all(node)
    }

    /// Dispatch `event` at `target`.
    ///
    /// The propagation path is fixed before any listener runs. Returns
    /// `false` if a listener prevented the default action.
    pub fn dispatch_event(&self, target: NodeId, event: &mut Event) -> DomResult<bool> {
        let path: Vec<NodeId> = {
            let tree = self.tree.borrow();
            if tree.get(target).is_none() {
                return Err(DomError::NotFound);
            }
            std::iter::once(target).chain(tree.ancestors(target)).collect()
        };

        tracing::trace!("Dispatching '{}' at {:?} (path length {})", event.event_type(), target, path.len());
        event.begin_dispatch(target);

        for &node in path.iter().skip(1).rev() {
            event.enter(node, EventPhase::Capturing);
            self.invoke(node, event, Some(true));
            if event.is_propagation_stopped() {
                break;
            }
        }

        if !event.is_propagation_stopped() {
            event.enter(target, EventPhase::AtTarget);
            self.invoke(target, event, None);
        }

        if event.bubbles() && !event.is_propagation_stopped() {
            for &node in path.iter().skip(1) {
                event.enter(node, EventPhase::Bubbling);
                self.invoke(node, event, Some(false));
                if event.is_propagation_stopped() {
                    break;
                }
            }
        }

        event.end_dispatch();
        Ok(!event.is_default_prevented())
    }

    /// Run one node's listeners. `capture` filters by phase; `None` runs all.
    fn invoke(&self, node: NodeId, event: &mut Event, capture: Option<bool>) {
        let snapshot: Vec<Rc<Registration>> = self.listeners.borrow().snapshot(node, event.event_type());

        for reg in snapshot {
            if reg.removed.get() {
                continue;
            }
            if capture.is_some_and(|c| c != reg.options.capture) {
                continue;
            }
            if reg.options.once {
                self.listeners.borrow_mut().remove_registration(node, &reg);
            }

            event.set_passive(reg.options.passive);
            reg.listener.call(self, event);
            event.set_passive(false);

            if event.is_immediate_propagation_stopped() {
                break;
            }
        }
    }
}

impl NodeOperations for Document {
    fn append_child(&self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.borrow_mut().append_child(parent, child)
    }

    fn remove_child(&self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.borrow_mut().remove_child(parent, child)
    }

    fn insert_before(&self, parent: NodeId, new_child: NodeId, ref_child: Option<NodeId>) -> DomResult<NodeId> {
        self.tree.borrow_mut().insert_before(parent, new_child, ref_child)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
