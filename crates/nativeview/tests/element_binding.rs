//! Element binding tests for nativeview
//!
//! Root resolution, scoped queries and the DOM helper surface, plus the
//! full h1/div view scenario.

use nativeview::{
    Document, ElementBound, ElementInput, Event, EventDelegating, EventListener, NativeDom,
    NativeView, NodeId, ViewOptions,
};
use nativeview_html::{inner_html, outer_html};
use std::cell::Cell;
use std::rc::Rc;

const FIXTURE: &str = r#"<div id="testElement"><h1>Test</h1></div>"#;

fn document() -> Rc<Document> {
    let doc = Rc::new(Document::default());
    nativeview_html::set_inner_html(&doc, doc.body(), FIXTURE).unwrap();
    doc
}

fn view(doc: &Rc<Document>) -> NativeView {
    NativeView::new(doc.clone(), ViewOptions::new().el("#testElement")).unwrap()
}

#[test]
fn test_view_find() {
    let doc = document();
    let view = view(&doc);

    let result = view.find("h1").unwrap();
    assert_eq!(result.length(), 1);
    let h1 = result.item(0).unwrap();
    assert_eq!(doc.tag_name(h1).as_deref(), Some("h1"));
    assert!(doc.is_element(h1));
}

#[test]
fn test_view_set_element() {
    let doc = document();
    let view = view(&doc);

    let result = view.find("h1").unwrap();
    view.set_element(result.clone()).unwrap();
    assert_eq!(view.element(), result.first());
    assert_eq!(view.el_list().as_slice(), result.as_slice());
}

#[test]
fn test_resolve_from_selector_handle_and_markup() {
    let doc = document();
    let view = view(&doc);
    let test_element = doc.get_element_by_id("testElement");

    assert_eq!(view.resolve_root("#testElement".into()).unwrap(), test_element);
    assert_eq!(view.resolve_root(doc.body().into()).unwrap(), Some(doc.body()));
    assert_eq!(view.resolve_root(ElementInput::Empty).unwrap(), None);
    assert_eq!(view.resolve_root("article".into()).unwrap(), None);

    let single = view.resolve_root("<p>one</p>".into()).unwrap().unwrap();
    assert_eq!(outer_html(&doc, single), "<p>one</p>");

    let first = view.resolve_root("<li>a</li><li>b</li>".into()).unwrap().unwrap();
    assert_eq!(outer_html(&doc, first), "<li>a</li>");
    assert_eq!(doc.parent(first), None);

    // The first top-level node wins even when it is whitespace
    let text = view.resolve_root("\n  <li>a</li>".into()).unwrap().unwrap();
    assert!(!doc.is_element(text));
}

#[test]
fn test_markup_root_may_be_head_content() {
    let doc = document();
    let view = view(&doc);

    let style = view.resolve_root("<style>p { margin: 0 }</style>".into()).unwrap().unwrap();
    assert_eq!(outer_html(&doc, style), "<style>p { margin: 0 }</style>");

    view.set_element("<title>Inbox</title>").unwrap();
    let title = view.element().unwrap();
    assert_eq!(doc.tag_name(title).as_deref(), Some("title"));
    assert_eq!(doc.text_content(title), "Inbox");
}

#[test]
fn test_set_contents_parses_in_target_context() {
    let doc = document();
    let dom = NativeDom::new(&doc);
    let table = doc.create_element("table");
    dom.append_contents(doc.body(), table).unwrap();

    dom.set_contents(table, "<tr><td>1</td></tr>").unwrap();
    assert_eq!(dom.find_el(table, "tbody > tr > td").unwrap().length(), 1);

    let test_element = doc.get_element_by_id("testElement").unwrap();
    dom.set_contents(test_element, "<style>a{}</style><p>x</p>").unwrap();
    assert_eq!(inner_html(&doc, test_element), "<style>a{}</style><p>x</p>");
}

#[test]
fn test_resolve_rejects_bad_selector() {
    let doc = document();
    let view = view(&doc);
    assert!(view.resolve_root("div[".into()).is_err());
    assert_eq!(view.element(), doc.get_element_by_id("testElement"));
}

#[test]
fn test_markup_view_can_be_attached() {
    let doc = document();
    let view = NativeView::new(doc.clone(), ViewOptions::new().el("<section class=\"panel\"><b>hi</b></section>")).unwrap();
    let el = view.element().unwrap();
    assert!(!doc.contains(el));

    view.dom().append_contents(doc.body(), el).unwrap();
    assert!(doc.contains(el));
    assert_eq!(view.find("b").unwrap().length(), 1);
}

#[test]
fn test_native_dom_standalone() {
    let doc = document();
    let dom = NativeDom::new(&doc);
    let test_element = doc.get_element_by_id("testElement").unwrap();

    assert_eq!(dom.get_el("h1").unwrap().length(), 1);
    assert_eq!(dom.find_el(test_element, "h1").unwrap().length(), 1);
    assert!(dom.find_el(test_element, "#testElement").unwrap().is_empty());

    dom.set_contents(test_element, "<ul><li>1</li><li>2</li></ul>").unwrap();
    assert_eq!(inner_html(&doc, test_element), "<ul><li>1</li><li>2</li></ul>");

    dom.set_contents(test_element, "").unwrap();
    assert_eq!(inner_html(&doc, test_element), "<ul><li>1</li><li>2</li></ul>");

    dom.detach_contents(test_element);
    assert_eq!(inner_html(&doc, test_element), "");
    assert!(doc.contains(test_element));
}

#[test]
fn test_set_attributes_on_existing_element() {
    let doc = document();
    let view = view(&doc);
    view.set_attributes(vec![("data-role".to_string(), "main".to_string())]).unwrap();

    let el = view.element().unwrap();
    assert_eq!(
        outer_html(&doc, el),
        r#"<div id="testElement" data-role="main"><h1>Test</h1></div>"#
    );
}

/// A view bound to `#testElement` delegates clicks on `h1` and `div`,
/// drops the `h1` one, and is then torn down.
#[test]
fn test_h1_div_scenario() {
    let doc = document();
    let view = view(&doc);
    let el = view.element().unwrap();

    // An inner div to click besides the h1
    let inner = doc.create_element("div");
    view.dom().append_contents(el, inner).unwrap();

    let h1_hits = Rc::new(Cell::new(0));
    let div_hits = Rc::new(Cell::new(0));
    let h = h1_hits.clone();
    let d = div_hits.clone();
    view.delegate("click", Some("h1"), EventListener::new(move |_, _| h.set(h.get() + 1))).unwrap();
    view.delegate("click", Some("div"), EventListener::new(move |_, _| d.set(d.get() + 1))).unwrap();

    let click_all = |view: &NativeView| {
        let targets: Vec<NodeId> = view.find("h1, div").unwrap().into_vec();
        for node in targets {
            doc.dispatch_event(node, &mut Event::bubbling("click")).unwrap();
        }
    };

    click_all(&view);
    assert_eq!((h1_hits.get(), div_hits.get()), (1, 1));

    view.undelegate("click", Some("h1"), None);
    click_all(&view);
    assert_eq!((h1_hits.get(), div_hits.get()), (1, 2));

    view.remove_element();
    assert!(!doc.contains(el));
    assert_eq!(doc.total_listener_count(el), 0);
    assert!(view.delegation_table().is_empty());
}
