//! Element matching and queries
//!
//! Complex selectors are matched right to left: the last compound must
//! match the element, then each combinator walks parent or sibling links
//! looking for a node that matches the compound to its left.

use crate::selectors::{match_compound, Combinator, ComplexSelector, SelectorList};
use crate::SelectorError;
use nativeview_dom::{Document, DomTree, NodeId, NodeList};

/// Check whether `element` matches any selector in the list
pub fn matches(document: &Document, element: NodeId, selectors: &SelectorList) -> bool {
    matches_in(&document.tree(), element, selectors)
}

/// Tree-level variant of [`matches`]
pub fn matches_in(tree: &DomTree, element: NodeId, selectors: &SelectorList) -> bool {
    tree.is_element(element)
        && selectors.selectors.iter().any(|s| match_complex(tree, element, s, s.compounds.len() - 1))
}

/// Match `selector.compounds[..=index]` with `compounds[index]` anchored at `element`
fn match_complex(tree: &DomTree, element: NodeId, selector: &ComplexSelector, index: usize) -> bool {
    if !match_compound(tree, element, &selector.compounds[index]) {
        return false;
    }
    if index == 0 {
        return true;
    }

    let next = index - 1;
    match selector.combinators[next] {
        Combinator::Child => tree
            .parent(element)
            .is_some_and(|p| match_complex(tree, p, selector, next)),
        Combinator::Descendant => tree
            .ancestors(element)
            .any(|a| match_complex(tree, a, selector, next)),
        Combinator::NextSibling => previous_element(tree, element)
            .is_some_and(|s| match_complex(tree, s, selector, next)),
        Combinator::SubsequentSibling => {
            std::iter::successors(previous_element(tree, element), |&s| previous_element(tree, s))
                .any(|s| match_complex(tree, s, selector, next))
        }
    }
}

fn previous_element(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    std::iter::successors(tree.prev_sibling(node), |&n| tree.prev_sibling(n))
        .find(|&n| tree.is_element(n))
}

/// All descendants of `scope` matching the list, in document order
pub fn query_selector_all(document: &Document, scope: NodeId, selectors: &SelectorList) -> NodeList {
    let tree = document.tree();
    tree.descendants(scope)
        .into_iter()
        .filter(|&node| matches_in(&tree, node, selectors))
        .collect::<Vec<_>>()
        .into()
}

/// First descendant of `scope` matching the list
pub fn query_selector(document: &Document, scope: NodeId, selectors: &SelectorList) -> Option<NodeId> {
    let tree = document.tree();
    tree.descendants(scope)
        .into_iter()
        .find(|&node| matches_in(&tree, node, selectors))
}

/// Element query trait over selector strings
pub trait ElementQuery {
    /// Query single element by CSS selector
    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;

    /// Query all elements by CSS selector
    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<NodeList, SelectorError>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError>;
}

impl ElementQuery for Document {
    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(query_selector(self, root, &list))
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<NodeList, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(query_selector_all(self, root, &list))
    }

    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(matches(self, element, &list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nativeview_dom::NodeOperations;

    /// body > div#app > (ul.list > li*3, p.note > span)
    fn fixture() -> (Document, NodeId, Vec<NodeId>, NodeId, NodeId) {
        let doc = Document::default();
        let app = doc.create_element("div");
        doc.set_attribute(app, "id", "app").unwrap();
        doc.append_child(doc.body(), app).unwrap();

        let list = doc.create_element("ul");
        doc.set_attribute(list, "class", "list").unwrap();
        doc.append_child(app, list).unwrap();
        let items: Vec<NodeId> = (0..3)
            .map(|i| {
                let li = doc.create_element("li");
                doc.set_attribute(li, "data-index", &i.to_string()).unwrap();
                doc.append_child(list, li).unwrap();
                li
            })
            .collect();

        let note = doc.create_element("p");
        doc.set_attribute(note, "class", "note").unwrap();
        doc.append_child(app, note).unwrap();
        let span = doc.create_element("span");
        doc.append_child(note, span).unwrap();

        (doc, app, items, note, span)
    }

    fn sel(s: &str) -> SelectorList {
        SelectorList::parse(s).unwrap()
    }

    #[test]
    fn test_descendant_and_child() {
        let (doc, _, items, _, span) = fixture();
        assert!(matches(&doc, span, &sel("#app span")));
        assert!(matches(&doc, span, &sel("p.note > span")));
        assert!(!matches(&doc, span, &sel("#app > span")));
        assert!(matches(&doc, items[0], &sel("body li")));
    }

    #[test]
    fn test_sibling_combinators() {
        let (doc, _, items, note, _) = fixture();
        assert!(matches(&doc, items[1], &sel("li + li")));
        assert!(!matches(&doc, items[0], &sel("li + li")));
        assert!(matches(&doc, items[2], &sel("[data-index='0'] ~ li")));
        assert!(matches(&doc, note, &sel("ul ~ p")));
    }

    #[test]
    fn test_structural_pseudo_classes() {
        let (doc, _, items, _, span) = fixture();
        assert!(matches(&doc, items[0], &sel("li:first-child")));
        assert!(matches(&doc, items[2], &sel("li:last-child")));
        assert!(matches(&doc, items[1], &sel("li:nth-child(2)")));
        assert!(matches(&doc, items[0], &sel("li:nth-last-child(3)")));
        assert!(matches(&doc, span, &sel("span:only-child:empty")));
        assert!(matches(&doc, items[1], &sel("li:not([data-index='0'], :last-child)")));
        assert!(matches(&doc, doc.document_element(), &sel(":root")));
    }

    #[test]
    fn test_query_selector_all_document_order() {
        let (doc, app, items, note, _) = fixture();
        let found = query_selector_all(&doc, app, &sel("p, li"));
        assert_eq!(found.as_slice(), &[items[0], items[1], items[2], note]);
    }

    #[test]
    fn test_query_excludes_scope() {
        let (doc, app, _, _, _) = fixture();
        assert!(query_selector_all(&doc, app, &sel("#app")).is_empty());
        assert_eq!(query_selector(&doc, doc.root(), &sel("#app")), Some(app));
    }

    #[test]
    fn test_non_elements_never_match() {
        let (doc, app, _, _, _) = fixture();
        let text = doc.create_text("hi");
        doc.append_child(app, text).unwrap();
        assert!(!matches(&doc, text, &sel("*")));
    }

    #[test]
    fn test_element_query_trait() {
        let (doc, app, _, note, span) = fixture();
        assert_eq!(doc.query_selector(note, "span").unwrap(), Some(span));
        assert!(ElementQuery::matches(&doc, note, ".note").unwrap());
        assert_eq!(doc.query_selector_all(app, "li").unwrap().length(), 3);
        assert!(ElementQuery::matches(&doc, app, "div[").is_err());
    }
}
