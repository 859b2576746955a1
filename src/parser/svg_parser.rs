//! SVG document parser using quick-xml.

use std::fs;
use std::io::Read;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::{Attribute, Document, Element, Node, XmlDeclaration};

use super::options::ParseOptions;

/// SVG document parser.
///
/// Builds an owned [`Document`] tree without resolving namespaces, so
/// prefixes and declarations come back out exactly as they went in.
pub struct SvgParser {
    source: String,
    options: ParseOptions,
}

impl SvgParser {
    /// Open an SVG file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open an SVG file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse an SVG from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse an SVG from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let text = std::str::from_utf8(data).map_err(|e| Error::Encoding(e.to_string()))?;
        Ok(Self::from_str_with_options(text, options))
    }

    /// Parse an SVG from a string.
    pub fn from_str_with_options(text: &str, options: ParseOptions) -> Self {
        let source = text.strip_prefix('\u{feff}').unwrap_or(text).to_string();
        Self { source, options }
    }

    /// Parse an SVG from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse an SVG from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse the source and return the document tree.
    pub fn parse(&self) -> Result<Document> {
        let mut reader = Reader::from_str(&self.source);
        let mut builder = TreeBuilder::default();

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(Error::XmlParse {
                        position: reader.error_position() as u64,
                        message: e.to_string(),
                    })
                }
            };

            match event {
                Event::Decl(decl) => {
                    if self.options.keep_declaration {
                        builder.declaration = Some(read_declaration(&decl));
                    }
                }
                Event::Start(start) => builder.open(read_element(&start, false)?),
                Event::Empty(start) => builder.attach(Node::Element(read_element(&start, true)?))?,
                Event::End(_) => builder.close()?,
                Event::Text(text) => builder.append_text(&String::from_utf8_lossy(&text))?,
                Event::GeneralRef(entity) => {
                    builder.append_text(&format!("&{};", String::from_utf8_lossy(&entity)))?
                }
                Event::CData(data) => {
                    builder.attach(Node::CData(String::from_utf8_lossy(&data).into_owned()))?
                }
                Event::Comment(comment) => {
                    if !self.options.strip_comments {
                        builder.attach(Node::Comment(
                            String::from_utf8_lossy(&comment).into_owned(),
                        ))?;
                    }
                }
                Event::PI(pi) => builder.attach(Node::ProcessingInstruction(
                    String::from_utf8_lossy(&pi).into_owned(),
                ))?,
                Event::DocType(doctype) => {
                    builder.attach(Node::DocType(String::from_utf8_lossy(&doctype).into_owned()))?
                }
                Event::Eof => break,
            }
        }

        let document = builder.finish()?;
        log::debug!(
            "Parsed <{}> with {} elements",
            document.root.name,
            document.element_count()
        );
        Ok(document)
    }
}

/// Accumulates parser events into an owned tree.
#[derive(Default)]
struct TreeBuilder {
    declaration: Option<XmlDeclaration>,
    prolog: Vec<Node>,
    epilog: Vec<Node>,
    stack: Vec<Element>,
    root: Option<Element>,
}

impl TreeBuilder {
    fn open(&mut self, element: Element) {
        self.stack.push(element);
    }

    fn close(&mut self) -> Result<()> {
        let element = self
            .stack
            .pop()
            .ok_or_else(|| Error::InvalidDocument("closing tag without an open element".into()))?;
        self.attach(Node::Element(element))
    }

    fn append_text(&mut self, text: &str) -> Result<()> {
        if let Some(parent) = self.stack.last_mut() {
            if let Some(Node::Text(previous)) = parent.children.last_mut() {
                previous.push_str(text);
                return Ok(());
            }
        }
        self.attach(Node::Text(text.to_string()))
    }

    fn attach(&mut self, node: Node) -> Result<()> {
        if let Some(parent) = self.stack.last_mut() {
            parent.push(node);
            return Ok(());
        }

        match node {
            Node::Element(element) => {
                if self.root.is_some() {
                    return Err(Error::InvalidDocument(format!(
                        "second root element <{}>",
                        element.name
                    )));
                }
                self.root = Some(element);
            }
            Node::Text(text) => {
                if !text.trim().is_empty() {
                    return Err(Error::InvalidDocument(
                        "text content outside the root element".into(),
                    ));
                }
            }
            other if self.root.is_none() => self.prolog.push(other),
            other => self.epilog.push(other),
        }
        Ok(())
    }

    fn finish(self) -> Result<Document> {
        if let Some(open) = self.stack.last() {
            return Err(Error::InvalidDocument(format!(
                "unclosed element <{}>",
                open.name
            )));
        }
        let root = self
            .root
            .ok_or_else(|| Error::InvalidDocument("no root element".into()))?;

        Ok(Document {
            declaration: self.declaration,
            prolog: self.prolog,
            root,
            epilog: self.epilog,
        })
    }
}

fn read_element(start: &BytesStart<'_>, self_closing: bool) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    element.self_closing = self_closing;

    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        // Values are re-emitted inside double quotes.
        let raw = String::from_utf8_lossy(&attr.value).replace('"', "&quot;");
        element.attributes.push(Attribute::from_raw(name, raw));
    }

    Ok(element)
}

fn read_declaration(decl: &BytesDecl<'_>) -> XmlDeclaration {
    let lossy = |bytes: &[u8]| String::from_utf8_lossy(bytes).into_owned();
    XmlDeclaration {
        version: decl
            .version()
            .map(|v| lossy(&v))
            .unwrap_or_else(|_| "1.0".to_string()),
        encoding: decl.encoding().and_then(|r| r.ok()).map(|v| lossy(&v)),
        standalone: decl.standalone().and_then(|r| r.ok()).map(|v| lossy(&v)),
    }
}
