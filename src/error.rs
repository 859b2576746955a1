//! Error types for unfooter library.

use std::io;
use thiserror::Error;

/// Result type alias for unfooter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, trimming or writing SVG documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Low-level error reported by the XML reader or writer.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The input is not well-formed XML.
    #[error("XML parsing error at byte {position}: {message}")]
    XmlParse {
        /// Byte offset where the reader gave up
        position: u64,
        /// Reader diagnostic
        message: String,
    },

    /// The input is not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The XML is well-formed but does not form a single-rooted document.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A trim or batch option is out of range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Error during rendering (JSON reports).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error came from reading malformed input rather than from I/O.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::Xml(_) | Error::XmlParse { .. } | Error::Encoding(_) | Error::InvalidDocument(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidOption("padding must be non-negative".into());
        assert_eq!(err.to_string(), "Invalid option: padding must be non-negative");

        let err = Error::XmlParse {
            position: 42,
            message: "unexpected end".into(),
        };
        assert_eq!(err.to_string(), "XML parsing error at byte 42: unexpected end");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_parse_error_classification() {
        assert!(Error::Encoding("bad byte".into()).is_parse_error());
        assert!(Error::InvalidDocument("no root".into()).is_parse_error());
        assert!(!Error::Other("x".into()).is_parse_error());
    }
}
