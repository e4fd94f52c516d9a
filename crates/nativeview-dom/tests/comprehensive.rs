//! Comprehensive tests for nativeview-dom
//!
//! Tree mutation through the document and event dispatch across it.

use nativeview_dom::{
    Document, DomError, Event, EventListener, EventPhase, ListenerOptions, NodeId, NodeOperations,
};
use std::cell::RefCell;
use std::rc::Rc;

fn list(doc: &Document, n: usize) -> (NodeId, Vec<NodeId>) {
    let ul = doc.create_element("UL");
    doc.append_child(doc.body(), ul).unwrap();
    let items = (0..n)
        .map(|i| {
            let li = doc.create_element("li");
            let text = doc.create_text(&format!("item {}", i));
            doc.append_child(li, text).unwrap();
            doc.append_child(ul, li).unwrap();
            li
        })
        .collect();
    (ul, items)
}

#[test]
fn test_build_and_read_back() {
    let doc = Document::default();
    let (ul, items) = list(&doc, 3);

    assert_eq!(doc.tag_name(ul).as_deref(), Some("ul"));
    assert_eq!(doc.children(ul), items);
    assert_eq!(doc.text_content(ul), "item 0item 1item 2");
    assert!(doc.contains(items[2]));
}

#[test]
fn test_append_moves_existing_child() {
    let doc = Document::default();
    let (ul, items) = list(&doc, 3);

    doc.append_child(ul, items[0]).unwrap();
    assert_eq!(doc.children(ul), vec![items[1], items[2], items[0]]);
}

#[test]
fn test_insert_before_and_remove() {
    let doc = Document::default();
    let (ul, items) = list(&doc, 2);
    let first = doc.create_element("li");

    doc.insert_before(ul, first, Some(items[0])).unwrap();
    assert_eq!(doc.first_child(ul), Some(first));

    doc.remove_child(ul, items[1]).unwrap();
    assert_eq!(doc.children(ul), vec![first, items[0]]);
    assert_eq!(doc.parent(items[1]), None);
    assert_eq!(doc.remove_child(ul, items[1]), Err(DomError::NotAChild));
}

#[test]
fn test_hierarchy_errors() {
    let doc = Document::default();
    let (ul, items) = list(&doc, 1);
    let text = doc.first_child(items[0]).unwrap();

    assert_eq!(doc.append_child(items[0], ul), Err(DomError::HierarchyRequest));
    assert_eq!(doc.append_child(ul, ul), Err(DomError::HierarchyRequest));
    assert_eq!(doc.append_child(text, doc.create_element("b")), Err(DomError::HierarchyRequest));
    assert_eq!(doc.append_child(ul, doc.root()), Err(DomError::HierarchyRequest));
}

#[test]
fn test_attributes_are_case_insensitive() {
    let doc = Document::default();
    let div = doc.create_element("div");
    doc.set_attribute(div, "Data-Id", "7").unwrap();

    assert_eq!(doc.get_attribute(div, "data-id").as_deref(), Some("7"));
    assert_eq!(doc.remove_attribute(div, "DATA-ID").as_deref(), Some("7"));
    assert_eq!(doc.get_attribute(div, "data-id"), None);

    let text = doc.create_text("x");
    assert_eq!(doc.set_attribute(text, "a", "b"), Err(DomError::InvalidNodeType));
}

#[test]
fn test_capture_target_bubble_sequence() {
    let doc = Document::default();
    let (ul, items) = list(&doc, 1);
    let li = items[0];
    let log = Rc::new(RefCell::new(Vec::new()));

    let record = |name: &'static str| {
        let log = log.clone();
        EventListener::new(move |_, e: &mut Event| {
            log.borrow_mut().push((name, e.phase(), e.current_target()));
        })
    };

    doc.add_event_listener(ul, "click", record("ul-bubble"), ListenerOptions::default()).unwrap();
    doc.add_event_listener(ul, "click", record("ul-capture"), ListenerOptions::capture()).unwrap();
    doc.add_event_listener(li, "click", record("li-1"), ListenerOptions::default()).unwrap();
    doc.add_event_listener(li, "click", record("li-2"), ListenerOptions::capture()).unwrap();

    let mut event = Event::bubbling("click");
    doc.dispatch_event(li, &mut event).unwrap();

    assert_eq!(*log.borrow(), vec![
        ("ul-capture", EventPhase::Capturing, Some(ul)),
        ("li-1", EventPhase::AtTarget, Some(li)),
        ("li-2", EventPhase::AtTarget, Some(li)),
        ("ul-bubble", EventPhase::Bubbling, Some(ul)),
    ]);
    assert_eq!(event.target(), li);
    assert_eq!(event.current_target(), None);
    assert_eq!(event.phase(), EventPhase::None);
}

#[test]
fn test_stop_immediate_propagation() {
    let doc = Document::default();
    let (ul, _) = list(&doc, 0);
    let hits = Rc::new(RefCell::new(0));

    doc.add_event_listener(ul, "click", EventListener::new(|_, e| e.stop_immediate_propagation()), ListenerOptions::default()).unwrap();
    let h = hits.clone();
    doc.add_event_listener(ul, "click", EventListener::new(move |_, _| *h.borrow_mut() += 1), ListenerOptions::default()).unwrap();

    doc.dispatch_event(ul, &mut Event::bubbling("click")).unwrap();
    assert_eq!(*hits.borrow(), 0);
}

#[test]
fn test_listener_added_during_dispatch_waits_for_next_event() {
    let doc = Document::default();
    let (ul, _) = list(&doc, 0);
    let hits = Rc::new(RefCell::new(0));

    let h = hits.clone();
    let late = EventListener::new(move |_, _| *h.borrow_mut() += 1);
    doc.add_event_listener(ul, "click", EventListener::new(move |doc, _| {
        doc.add_event_listener(ul, "click", late.clone(), ListenerOptions::default()).unwrap();
    }), ListenerOptions::default()).unwrap();

    doc.dispatch_event(ul, &mut Event::bubbling("click")).unwrap();
    assert_eq!(*hits.borrow(), 0);
    doc.dispatch_event(ul, &mut Event::bubbling("click")).unwrap();
    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn test_duplicate_registration_ignored() {
    let doc = Document::default();
    let (ul, _) = list(&doc, 0);
    let listener = EventListener::new(|_, _| {});

    doc.add_event_listener(ul, "click", listener.clone(), ListenerOptions::default()).unwrap();
    doc.add_event_listener(ul, "click", listener.clone(), ListenerOptions::default()).unwrap();
    assert_eq!(doc.listener_count(ul, "click"), 1);

    assert!(doc.remove_event_listener(ul, "click", &listener, false));
    assert!(!doc.remove_event_listener(ul, "click", &listener, false));
    assert_eq!(doc.total_listener_count(ul), 0);
}

#[test]
fn test_dispatch_on_detached_subtree() {
    let doc = Document::default();
    let div = doc.create_element("div");
    let span = doc.create_element("span");
    doc.append_child(div, span).unwrap();
    let hits = Rc::new(RefCell::new(0));
    let h = hits.clone();
    doc.add_event_listener(div, "click", EventListener::new(move |_, _| *h.borrow_mut() += 1), ListenerOptions::default()).unwrap();

    doc.dispatch_event(span, &mut Event::bubbling("click")).unwrap();
    assert_eq!(*hits.borrow(), 1);
}
