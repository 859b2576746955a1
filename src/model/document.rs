//! Document-level types.

use super::{Element, Node};
use serde::{Deserialize, Serialize};

/// A parsed SVG document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// XML declaration found in the source, if any
    pub declaration: Option<XmlDeclaration>,

    /// Comments, processing instructions and doctype before the root
    pub prolog: Vec<Node>,

    /// The root element (normally `<svg>`)
    pub root: Element,

    /// Comments and processing instructions after the root
    pub epilog: Vec<Node>,
}

/// Fields of an `<?xml ...?>` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlDeclaration {
    /// XML version
    pub version: String,

    /// Declared encoding
    pub encoding: Option<String>,

    /// Declared standalone flag
    pub standalone: Option<String>,
}

impl Document {
    /// Create a document around a root element.
    pub fn new(root: Element) -> Self {
        Self {
            declaration: None,
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    /// Total number of elements, root included.
    pub fn element_count(&self) -> usize {
        1 + self.root.descendants().count()
    }

    /// Find the first element (root included) carrying the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        std::iter::once(&self.root)
            .chain(self.root.descendants())
            .find(|el| el.id().as_deref() == Some(id))
    }

    /// Resolve a path of child-node indices starting at the root.
    ///
    /// An empty path yields the root. Returns `None` if an index is out of
    /// range or does not point at an element.
    pub fn element_at(&self, path: &[usize]) -> Option<&Element> {
        let mut current = &self.root;
        for &index in path {
            current = current.children.get(index)?.as_element()?;
        }
        Some(current)
    }

    /// Mutable variant of [`Document::element_at`].
    pub fn element_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut current = &mut self.root;
        for &index in path {
            current = current.children.get_mut(index)?.as_element_mut()?;
        }
        Some(current)
    }
}
