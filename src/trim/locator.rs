//! Footer lookup and detachment.
//!
//! Locating is a pure lookup over the tree. Detaching is a separate step that
//! takes the parent's child list out as a snapshot before rebuilding it, so no
//! list is ever mutated while it is being scanned.

use crate::model::{Document, Element, Node};

use super::options::ScanDepth;

/// Where the footer sits and what goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterMatch {
    /// Child-node indices from the root down to the footer's parent
    pub parent_path: Vec<usize>,

    /// Index of the footer among its parent's child nodes
    pub index: usize,

    /// Child-node indices of every element in the removal set
    pub removal: Vec<usize>,

    /// Other elements in the scanned scope carrying the same id
    pub duplicates: usize,
}

impl FooterMatch {
    /// Number of elements that will be removed (footer included).
    pub fn removed_count(&self) -> usize {
        self.removal.len()
    }

    /// Path from the root to the footer element itself.
    pub fn footer_path(&self) -> Vec<usize> {
        let mut path = self.parent_path.clone();
        path.push(self.index);
        path
    }

    /// Resolve the footer element in a document.
    pub fn footer<'a>(&self, doc: &'a Document) -> Option<&'a Element> {
        doc.element_at(&self.footer_path())
    }
}

/// Find the footer and its removal set.
///
/// Returns `None` when no element in scope carries `footer_id`. The root
/// element itself is never a candidate.
pub fn locate_footer(doc: &Document, footer_id: &str, depth: ScanDepth) -> Option<FooterMatch> {
    let (parent_path, index) = match depth {
        ScanDepth::RootChildren => (Vec::new(), first_child_with_id(&doc.root, footer_id)?),
        ScanDepth::AnyDepth => find_in_tree(&doc.root, footer_id, &mut Vec::new())?,
    };

    let parent = doc.element_at(&parent_path)?;
    let removal: Vec<usize> = parent
        .children
        .iter()
        .enumerate()
        .skip(index)
        .filter(|(_, node)| matches!(node, Node::Element(_)))
        .map(|(i, _)| i)
        .collect();

    let in_scope = match depth {
        ScanDepth::RootChildren => doc
            .root
            .elements()
            .filter(|el| has_id(el, footer_id))
            .count(),
        ScanDepth::AnyDepth => doc
            .root
            .descendants()
            .filter(|el| has_id(el, footer_id))
            .count(),
    };
    let duplicates = in_scope.saturating_sub(1);
    if duplicates > 0 {
        log::warn!(
            "{} more element(s) carry id=\"{}\"; trimming at the first one",
            duplicates,
            footer_id
        );
    }

    Some(FooterMatch {
        parent_path,
        index,
        removal,
        duplicates,
    })
}

/// Remove the matched footer and its trailing siblings from the document.
///
/// Returns the removed elements in document order. Whitespace that closes
/// the parent is kept so the output stays formatted.
pub fn detach_footer(doc: &mut Document, footer: &FooterMatch) -> Vec<Element> {
    let Some(parent) = doc.element_at_mut(&footer.parent_path) else {
        return Vec::new();
    };

    let snapshot = std::mem::take(&mut parent.children);
    let closing = snapshot
        .last()
        .filter(|node| snapshot.len() > footer.index + 1 && node.is_whitespace())
        .cloned();

    let mut removed = Vec::with_capacity(footer.removal.len());
    for (i, node) in snapshot.into_iter().enumerate() {
        if i < footer.index {
            parent.children.push(node);
        } else if let Node::Element(element) = node {
            removed.push(element);
        }
    }

    if let Some(closing) = closing {
        // Indentation that led into the footer now leads into the closing tag.
        if parent.children.last().is_some_and(Node::is_whitespace) {
            parent.children.pop();
        }
        parent.children.push(closing);
    }

    log::debug!(
        "Detached {} element(s) starting at <{}>",
        removed.len(),
        removed.first().map(|el| el.name.as_str()).unwrap_or("?")
    );
    removed
}

fn has_id(element: &Element, id: &str) -> bool {
    element.id().as_deref() == Some(id)
}

fn first_child_with_id(parent: &Element, id: &str) -> Option<usize> {
    parent
        .children
        .iter()
        .position(|node| node.as_element().is_some_and(|el| has_id(el, id)))
}

/// Parent-by-parent search: every child of `element` is checked before
/// any of their descendants, then each child is searched in document order.
fn find_in_tree(
    element: &Element,
    id: &str,
    path: &mut Vec<usize>,
) -> Option<(Vec<usize>, usize)> {
    if let Some(index) = first_child_with_id(element, id) {
        return Some((path.clone(), index));
    }
    for (index, node) in element.children.iter().enumerate() {
        let Node::Element(child) = node else {
            continue;
        };
        path.push(index);
        if let Some(found) = find_in_tree(child, id, path) {
            return Some(found);
        }
        path.pop();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseOptions, SvgParser};

    fn parse(text: &str) -> Document {
        SvgParser::from_str_with_options(text, ParseOptions::default())
            .parse()
            .unwrap()
    }

    const ROOT_LEVEL: &str = "<svg>\n  <g id=\"plot\"/>\n  <g id=\"footer\"/>\n  <g id=\"logo\"/>\n  <text y=\"590\">src</text>\n</svg>";

    const NESTED: &str = "<svg><g id=\"wrapper\"><rect y=\"1\"/><g id=\"footer\"/><g id=\"after\"/></g><g id=\"outside\"/></svg>";

    #[test]
    fn test_locate_root_level() {
        let doc = parse(ROOT_LEVEL);
        let found = locate_footer(&doc, "footer", ScanDepth::RootChildren).unwrap();

        assert!(found.parent_path.is_empty());
        assert_eq!(found.removed_count(), 3);
        assert_eq!(found.duplicates, 0);
        assert_eq!(
            found.footer(&doc).and_then(|e| e.id()).as_deref(),
            Some("footer")
        );
    }

    #[test]
    fn test_locate_not_found() {
        let doc = parse(ROOT_LEVEL);
        assert!(locate_footer(&doc, "missing", ScanDepth::RootChildren).is_none());
    }

    #[test]
    fn test_root_children_ignores_nested_footer() {
        let doc = parse(NESTED);
        assert!(locate_footer(&doc, "footer", ScanDepth::RootChildren).is_none());
    }

    #[test]
    fn test_any_depth_finds_nested_footer() {
        let doc = parse(NESTED);
        let found = locate_footer(&doc, "footer", ScanDepth::AnyDepth).unwrap();

        assert_eq!(found.parent_path, vec![0]);
        assert_eq!(found.index, 1);
        assert_eq!(found.removal, vec![1, 2]);
    }

    #[test]
    fn test_root_is_never_a_candidate() {
        let doc = parse("<svg id=\"footer\"><g/></svg>");
        assert!(locate_footer(&doc, "footer", ScanDepth::AnyDepth).is_none());
        assert!(locate_footer(&doc, "footer", ScanDepth::RootChildren).is_none());
    }

    #[test]
    fn test_duplicates_counted() {
        let doc = parse("<svg><g id=\"footer\"/><g id=\"footer\"/></svg>");
        let found = locate_footer(&doc, "footer", ScanDepth::RootChildren).unwrap();
        assert_eq!(found.index, 0);
        assert_eq!(found.duplicates, 1);
    }

    #[test]
    fn test_any_depth_prefers_shallower_siblings() {
        let doc = parse(
            "<svg><g id=\"chart\"><g id=\"footer\"/></g><g id=\"footer\"/><rect y=\"9\"/></svg>",
        );
        let found = locate_footer(&doc, "footer", ScanDepth::AnyDepth).unwrap();

        assert!(found.parent_path.is_empty());
        assert_eq!(found.index, 1);
        assert_eq!(found.removal, vec![1, 2]);
        assert_eq!(found.duplicates, 1);
    }

    #[test]
    fn test_detach_root_level() {
        let mut doc = parse(ROOT_LEVEL);
        let found = locate_footer(&doc, "footer", ScanDepth::RootChildren).unwrap();
        let removed = detach_footer(&mut doc, &found);

        let ids: Vec<_> = removed
            .iter()
            .map(|e| e.id().unwrap_or_default().into_owned())
            .collect();
        assert_eq!(ids, ["footer", "logo", ""]);
        assert_eq!(doc.root.element_count(), 1);
        assert_eq!(
            doc.root.children,
            vec![
                Node::Text("\n  ".into()),
                Node::Element(Element::new("g").with_attr("id", "plot").self_closing()),
                Node::Text("\n".into()),
            ]
        );
    }

    #[test]
    fn test_detach_nested_keeps_other_levels() {
        let mut doc = parse(NESTED);
        let found = locate_footer(&doc, "footer", ScanDepth::AnyDepth).unwrap();
        let removed = detach_footer(&mut doc, &found);

        assert_eq!(removed.len(), 2);
        let wrapper = doc.root.elements().next().unwrap();
        assert_eq!(wrapper.element_count(), 1);
        assert!(doc.find_by_id("outside").is_some());
        assert!(doc.find_by_id("after").is_none());
    }
}
