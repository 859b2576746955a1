//! XML serialization for SVG documents.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use quick_xml::events::attributes::Attribute as XmlAttribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::model::{Document, Element, Node};

use super::OutputMode;

/// Serialize a document as text without an XML declaration.
pub fn to_string(doc: &Document) -> Result<String> {
    let bytes = to_bytes(doc, OutputMode::Unicode)?;
    String::from_utf8(bytes).map_err(|e| Error::Encoding(e.to_string()))
}

/// Serialize a document to UTF-8 bytes in the given mode.
pub fn to_bytes(doc: &Document, mode: OutputMode) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_to(doc, mode, &mut out)?;
    Ok(out)
}

/// Serialize a document into any writer.
pub fn write_to<W: Write>(doc: &Document, mode: OutputMode, out: W) -> Result<()> {
    let mut writer = Writer::new(out);

    if mode.writes_declaration() {
        let standalone = doc
            .declaration
            .as_ref()
            .and_then(|d| d.standalone.as_deref());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), standalone)))?;
        writer.get_mut().write_all(b"\n")?;
    }

    for node in &doc.prolog {
        write_node(&mut writer, node)?;
        writer.get_mut().write_all(b"\n")?;
    }

    write_element(&mut writer, &doc.root)?;

    for node in &doc.epilog {
        writer.get_mut().write_all(b"\n")?;
        write_node(&mut writer, node)?;
    }

    Ok(())
}

/// Write a document to a file.
///
/// The document is serialized in full, written to a temporary file next to
/// `path` and then renamed into place, so `path` either keeps its previous
/// content or receives the complete new one.
pub fn write_file<P: AsRef<Path>>(doc: &Document, path: P, mode: OutputMode) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(doc, mode)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> Result<()> {
    match node {
        Node::Element(element) => return write_element(writer, element),
        Node::Text(raw) => writer.write_event(Event::Text(BytesText::from_escaped(raw.as_str())))?,
        Node::CData(data) => writer.write_event(Event::CData(BytesCData::new(data.as_str())))?,
        Node::Comment(raw) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(raw.as_str())))?
        }
        Node::ProcessingInstruction(content) => {
            writer.write_event(Event::PI(BytesPI::new(content.as_str())))?
        }
        Node::DocType(raw) => {
            writer.write_event(Event::DocType(BytesText::from_escaped(raw.as_str())))?
        }
    }
    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for attr in &element.attributes {
        // Raw values are already escaped; push them through untouched.
        start.push_attribute(XmlAttribute {
            key: QName(attr.name.as_bytes()),
            value: Cow::Borrowed(attr.raw.as_bytes()),
        });
    }

    if element.children.is_empty() && element.self_closing {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
