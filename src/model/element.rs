//! Element-level types.

use quick_xml::escape::{escape, unescape};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A single attribute as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Qualified name exactly as written (`id`, `xmlns:xlink`, `xlink:href`)
    pub name: String,

    /// Escaped value, ready to be written between double quotes
    pub raw: String,
}

impl Attribute {
    /// Create an attribute from an unescaped value.
    pub fn new(name: impl Into<String>, value: &str) -> Self {
        Self {
            name: name.into(),
            raw: escape(value).into_owned(),
        }
    }

    /// Create an attribute from an already escaped value.
    pub fn from_raw(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw: raw.into(),
        }
    }

    /// Get the unescaped value.
    ///
    /// Values with unknown entity references are returned as written.
    pub fn value(&self) -> Cow<'_, str> {
        unescape(&self.raw).unwrap_or(Cow::Borrowed(self.raw.as_str()))
    }
}

/// A node in the document tree.
///
/// Text-like payloads are stored in their raw source form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data (still escaped)
    Text(String),
    /// CDATA section content
    CData(String),
    /// Comment content
    Comment(String),
    /// Processing instruction content (target and data)
    ProcessingInstruction(String),
    /// Document type declaration content
    DocType(String),
}

impl Node {
    /// Get the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Get the element mutably if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Check if this is a text node made only of whitespace.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }
}

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Qualified tag name exactly as written
    pub name: String,

    /// Attributes in source order
    pub attributes: Vec<Attribute>,

    /// Child nodes in document order
    pub children: Vec<Node>,

    /// Whether the element was written as `<name/>`
    pub self_closing: bool,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    /// Builder: add an attribute.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Builder: mark the element as self-closing.
    pub fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }

    /// Get an attribute's unescaped value.
    pub fn attr(&self, name: &str) -> Option<Cow<'_, str>> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(Attribute::value)
    }

    /// Check whether an attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing it in place or appending it.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.raw = escape(value).into_owned(),
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Get the `id` attribute.
    pub fn id(&self) -> Option<Cow<'_, str>> {
        self.attr("id")
    }

    /// Append a child node.
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Iterate over direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Number of direct child elements.
    pub fn element_count(&self) -> usize {
        self.elements().count()
    }

    /// Iterate over all descendant elements in pre-order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<&'a Element> {
        while let Some(iter) = self.stack.last_mut() {
            match iter.next() {
                Some(Node::Element(el)) => {
                    self.stack.push(el.children.iter());
                    return Some(el);
                }
                Some(_) => continue,
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("svg")
            .with_child(
                Element::new("g")
                    .with_attr("id", "plot")
                    .with_child(Element::new("rect").with_attr("y", "5")),
            )
            .with_child(Element::new("g").with_attr("id", "footer"))
    }

    #[test]
    fn test_attribute_escaping() {
        let attr = Attribute::new("title", "a < b & \"c\"");
        assert_eq!(attr.raw, "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(attr.value(), "a < b & \"c\"");
    }

    #[test]
    fn test_attribute_unknown_entity_kept() {
        let attr = Attribute::from_raw("title", "&custom;");
        assert_eq!(attr.value(), "&custom;");
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut el = Element::new("svg")
            .with_attr("width", "850")
            .with_attr("height", "600")
            .with_attr("viewBox", "0 0 850 600");
        el.set_attr("height", "160");

        let names: Vec<_> = el.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["width", "height", "viewBox"]);
        assert_eq!(el.attr("height").as_deref(), Some("160"));
    }

    #[test]
    fn test_descendants_preorder() {
        let root = sample();
        let order: Vec<_> = root.descendants().map(|e| e.name.as_str()).collect();
        assert_eq!(order, ["g", "rect", "g"]);
    }

    #[test]
    fn test_elements_skips_text() {
        let mut root = sample();
        root.children.insert(0, Node::Text("\n  ".into()));
        assert_eq!(root.element_count(), 2);
        assert!(root.children[0].is_whitespace());
    }
}
