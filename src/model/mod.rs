//! Document model types for SVG content representation.
//!
//! The model is an owned, ordered XML tree. It keeps names and attribute
//! values exactly as they were written (prefixes included) so that a document
//! can be mutated in place and serialized back without disturbing anything
//! the trim did not touch.

mod document;
mod element;

pub use document::{Document, XmlDeclaration};
pub use element::{Attribute, Descendants, Element, Node};
