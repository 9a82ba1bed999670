// crates/cps-xml/src/parser.rs

use crate::builder::ObjectBuilder;
use crate::error::CpsXmlError;
use crate::types::{Attributes, Node, ROOT_NAME};
use log::debug;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Settings for loading a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Name given to the synthetic root node.
    pub root_name: String,
    /// Reject end tags whose name does not match the open element.
    pub check_end_names: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            root_name: ROOT_NAME.into(),
            check_end_names: true,
        }
    }
}

/// Parses an XML string slice into an object tree.
///
/// The returned node is the synthetic root; the document element is its only
/// field.
///
/// # Errors
/// Returns a `CpsXmlError` if the XML is malformed, contains an unknown
/// entity, or has no root element.
pub fn load_from_str(xml_content: &str) -> Result<Node, CpsXmlError> {
    load_from_str_with_options(xml_content, &LoadOptions::default())
}

/// Same as [`load_from_str`] with explicit [`LoadOptions`].
pub fn load_from_str_with_options(
    xml_content: &str,
    options: &LoadOptions,
) -> Result<Node, CpsXmlError> {
    load_internal(Reader::from_str(xml_content), options)
}

/// Parses XML from any buffered reader into an object tree.
///
/// # Errors
/// Same as [`load_from_str`], plus `CpsXmlError::XmlParsing` for read
/// failures reported by the XML reader.
pub fn load_from_reader<R: BufRead>(source: R) -> Result<Node, CpsXmlError> {
    load_from_reader_with_options(source, &LoadOptions::default())
}

/// Same as [`load_from_reader`] with explicit [`LoadOptions`].
pub fn load_from_reader_with_options<R: BufRead>(
    source: R,
    options: &LoadOptions,
) -> Result<Node, CpsXmlError> {
    load_internal(Reader::from_reader(source), options)
}

/// Opens and parses the XML file at `path`.
///
/// # Errors
/// Returns `CpsXmlError::Io` if the file cannot be opened, otherwise the
/// same errors as [`load_from_str`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Node, CpsXmlError> {
    load_from_path_with_options(path, &LoadOptions::default())
}

/// Same as [`load_from_path`] with explicit [`LoadOptions`].
pub fn load_from_path_with_options(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<Node, CpsXmlError> {
    let path = path.as_ref();
    debug!("Loading {}", path.display());
    let file = File::open(path)?;
    load_from_reader_with_options(BufReader::new(file), options)
}

/// Pulls events from `reader` and forwards them to a fresh builder.
fn load_internal<R: BufRead>(
    mut reader: Reader<R>,
    options: &LoadOptions,
) -> Result<Node, CpsXmlError> {
    reader.config_mut().check_end_names = options.check_end_names;

    let mut builder = ObjectBuilder::with_root_name(options.root_name.as_str());
    let mut buf = Vec::new();
    // Raw character data gathered since the last structural event. Entity
    // references arrive as separate events and are re-joined here so the
    // whole run is unescaped at once.
    let mut text = String::new();
    let mut elements = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                flush_text(&mut text, &mut builder)?;
                let (tag, attributes) = element_parts(&e)?;
                builder.open(&tag, attributes);
                elements += 1;
            }
            Event::Empty(e) => {
                flush_text(&mut text, &mut builder)?;
                let (tag, attributes) = element_parts(&e)?;
                builder.open(&tag, attributes);
                builder.close();
                elements += 1;
            }
            Event::End(_) => {
                flush_text(&mut text, &mut builder)?;
                builder.close();
            }
            Event::Text(e) => text.push_str(core::str::from_utf8(&e)?),
            Event::GeneralRef(e) => {
                text.push('&');
                text.push_str(core::str::from_utf8(&e)?);
                text.push(';');
            }
            Event::CData(e) => {
                flush_text(&mut text, &mut builder)?;
                builder.text(core::str::from_utf8(&e)?);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry nothing for the tree.
            _ => {}
        }
        buf.clear();
    }
    flush_text(&mut text, &mut builder)?;

    if elements == 0 {
        return Err(CpsXmlError::MissingRootElement);
    }
    let depth = builder.depth();
    if depth > 0 {
        return Err(CpsXmlError::UnclosedElements { depth });
    }

    debug!("Built tree from {} element(s)", elements);
    Ok(builder.finish())
}

fn flush_text(text: &mut String, builder: &mut ObjectBuilder) -> Result<(), CpsXmlError> {
    if text.trim().is_empty() {
        text.clear();
        return Ok(());
    }
    builder.text(&quick_xml::escape::unescape(text)?);
    text.clear();
    Ok(())
}

/// Extracts the tag name and unescaped attributes of a start tag.
fn element_parts(e: &BytesStart<'_>) -> Result<(String, Attributes), CpsXmlError> {
    let tag = core::str::from_utf8(e.name().as_ref())?.to_owned();
    let mut attributes = Attributes::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = core::str::from_utf8(attr.key.as_ref())?.to_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }
    Ok((tag, attributes))
}
