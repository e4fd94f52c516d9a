//! DOM Events
//!
//! Event objects, listener handles and the per-node listener registry.
//! Dispatch itself lives on [`Document`](crate::Document) because listeners
//! receive the document they fired in.

use crate::{Document, NodeId};
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Event phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPhase {
    #[default]
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

/// A DOM event as seen by listeners
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    bubbles: bool,
    cancelable: bool,
    target: NodeId,
    current_target: Option<NodeId>,
    /// Node matched by a delegated listener's selector for this invocation
    pub delegate_target: Option<NodeId>,
    phase: EventPhase,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
    in_passive_listener: bool,
}

impl Event {
    /// Create an event that neither bubbles nor is cancelable
    pub fn new(event_type: &str) -> Self {
        Self::with_flags(event_type, false, false)
    }

    /// Create a bubbling, cancelable event (what user input produces)
    pub fn bubbling(event_type: &str) -> Self {
        Self::with_flags(event_type, true, true)
    }

    pub fn with_flags(event_type: &str, bubbles: bool, cancelable: bool) -> Self {
        Self {
            event_type: event_type.to_string(),
            bubbles,
            cancelable,
            target: NodeId::NONE,
            current_target: None,
            delegate_target: None,
            phase: EventPhase::None,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
            in_passive_listener: false,
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Node the event was dispatched at
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Node whose listeners are currently running
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    /// Prevent default action (ignored for non-cancelable events and
    /// inside passive listeners)
    pub fn prevent_default(&mut self) {
        if self.cancelable && !self.in_passive_listener {
            self.default_prevented = true;
        }
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop propagation after the current node's listeners
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop propagation and skip the remaining listeners on this node
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn begin_dispatch(&mut self, target: NodeId) {
        self.target = target;
        self.delegate_target = None;
        self.propagation_stopped = false;
        self.immediate_propagation_stopped = false;
    }

    pub(crate) fn enter(&mut self, node: NodeId, phase: EventPhase) {
        self.current_target = Some(node);
        self.phase = phase;
    }

    pub(crate) fn set_passive(&mut self, passive: bool) {
        self.in_passive_listener = passive;
    }

    pub(crate) fn is_immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped
    }

    pub(crate) fn end_dispatch(&mut self) {
        self.current_target = None;
        self.phase = EventPhase::None;
    }
}

/// Listener handle.
///
/// Two handles are the same listener only if they share the same
/// allocation, mirroring function identity for `removeEventListener`.
#[derive(Clone)]
pub struct EventListener(Rc<dyn Fn(&Document, &mut Event)>);

impl EventListener {
    pub fn new(f: impl Fn(&Document, &mut Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the listener
    pub fn call(&self, document: &Document, event: &mut Event) {
        (self.0)(document, event)
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }

    pub fn ptr_eq(&self, other: &EventListener) -> bool {
        self.addr() == other.addr()
    }
}

impl PartialEq for EventListener {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for EventListener {}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventListener({:p})", self.addr())
    }
}

impl<F> From<F> for EventListener
where
    F: Fn(&Document, &mut Event) + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

/// Listener options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub capture: bool,
    pub passive: bool,
    pub once: bool,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self { capture: true, ..Self::default() }
    }
}

/// One native registration
#[derive(Debug)]
pub(crate) struct Registration {
    pub event_type: String,
    pub listener: EventListener,
    pub options: ListenerOptions,
    /// Set when removed, so in-flight dispatch snapshots skip it
    pub removed: Cell<bool>,
}

/// Listeners by target node, in registration order
#[derive(Debug, Default)]
pub(crate) struct ListenerRegistry {
    by_node: HashMap<NodeId, Vec<Rc<Registration>>>,
}

impl ListenerRegistry {
    /// Add a listener; an identical (type, listener, capture) triple is ignored
    pub fn add(
        &mut self,
        node: NodeId,
        event_type: &str,
        listener: EventListener,
        options: ListenerOptions,
    ) -> bool {
        let list = self.by_node.entry(node).or_default();
        let duplicate = list.iter().any(|r| {
            r.event_type == event_type && r.listener == listener && r.options.capture == options.capture
        });
        if duplicate {
            return false;
        }

        list.push(Rc::new(Registration {
            event_type: event_type.to_string(),
            listener,
            options,
            removed: Cell::new(false),
        }));
        true
    }

    /// Remove a listener by (type, listener, capture)
    pub fn remove(
        &mut self,
        node: NodeId,
        event_type: &str,
        listener: &EventListener,
        capture: bool,
    ) -> bool {
        let Some(list) = self.by_node.get_mut(&node) else {
            return false;
        };
        let Some(pos) = list.iter().position(|r| {
            r.event_type == event_type && r.listener == *listener && r.options.capture == capture
        }) else {
            return false;
        };

        let reg = list.remove(pos);
        reg.removed.set(true);
        if list.is_empty() {
            self.by_node.remove(&node);
        }
        true
    }

    /// Remove one specific registration (used for `once` listeners)
    pub fn remove_registration(&mut self, node: NodeId, reg: &Rc<Registration>) {
        if let Some(list) = self.by_node.get_mut(&node) {
            list.retain(|r| !Rc::ptr_eq(r, reg));
            if list.is_empty() {
                self.by_node.remove(&node);
            }
        }
        reg.removed.set(true);
    }

    /// Snapshot of a node's listeners for one event type
    pub fn snapshot(&self, node: NodeId, event_type: &str) -> Vec<Rc<Registration>> {
        self.by_node
            .get(&node)
            .map(|list| {
                list.iter()
                    .filter(|r| r.event_type == event_type)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn count(&self, node: NodeId, event_type: &str) -> usize {
        self.by_node
            .get(&node)
            .map(|list| list.iter().filter(|r| r.event_type == event_type).count())
            .unwrap_or(0)
    }

    pub fn count_all(&self, node: NodeId) -> usize {
        self.by_node.get(&node).map(Vec::len).unwrap_or(0)
    }
}
