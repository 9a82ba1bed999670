// crates/cps-xml/src/error.rs

use core::fmt;
use core::str::Utf8Error;
use quick_xml::Error as XmlError;
use quick_xml::escape::EscapeError;
use quick_xml::events::attributes::AttrError;
use std::io;

/// Errors that can occur while loading a control panel XML document.
///
/// The object builder itself never fails; every variant originates in the
/// event source that feeds it.
#[derive(Debug)]
pub enum CpsXmlError {
    /// An error from the underlying `quick-xml` reader (malformed markup,
    /// mismatched end tags, ...).
    XmlParsing(XmlError),

    /// A malformed attribute on an element.
    Attribute(AttrError),

    /// Character data or an attribute value contained an unknown or
    /// malformed entity reference.
    Escape(EscapeError),

    /// An element name, attribute name or text run was not valid UTF-8.
    Utf8(Utf8Error),

    /// The input file could not be read.
    Io(io::Error),

    /// The document contained no element at all.
    MissingRootElement,

    /// The input ended while elements were still open.
    UnclosedElements { depth: usize },
}

impl From<XmlError> for CpsXmlError {
    fn from(e: XmlError) -> Self {
        CpsXmlError::XmlParsing(e)
    }
}

impl From<AttrError> for CpsXmlError {
    fn from(e: AttrError) -> Self {
        CpsXmlError::Attribute(e)
    }
}

impl From<EscapeError> for CpsXmlError {
    fn from(e: EscapeError) -> Self {
        CpsXmlError::Escape(e)
    }
}

impl From<Utf8Error> for CpsXmlError {
    fn from(e: Utf8Error) -> Self {
        CpsXmlError::Utf8(e)
    }
}

impl From<io::Error> for CpsXmlError {
    fn from(e: io::Error) -> Self {
        CpsXmlError::Io(e)
    }
}

impl fmt::Display for CpsXmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpsXmlError::XmlParsing(e) => write!(f, "XML parsing error: {}", e),
            CpsXmlError::Attribute(e) => write!(f, "XML attribute error: {}", e),
            CpsXmlError::Escape(e) => write!(f, "XML escape error: {}", e),
            CpsXmlError::Utf8(e) => write!(f, "Invalid UTF-8 in document: {}", e),
            CpsXmlError::Io(e) => write!(f, "I/O error: {}", e),
            CpsXmlError::MissingRootElement => write!(f, "Document contains no root element"),
            CpsXmlError::UnclosedElements { depth } => {
                write!(f, "Document ended with {} element(s) still open", depth)
            }
        }
    }
}

impl std::error::Error for CpsXmlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CpsXmlError::XmlParsing(e) => Some(e),
            CpsXmlError::Attribute(e) => Some(e),
            CpsXmlError::Escape(e) => Some(e),
            CpsXmlError::Utf8(e) => Some(e),
            CpsXmlError::Io(e) => Some(e),
            CpsXmlError::MissingRootElement | CpsXmlError::UnclosedElements { .. } => None,
        }
    }
}
