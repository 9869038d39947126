//! xCal reader error types.

use thiserror::Error;

/// Result type for xCal reading.
pub type XCalResult<T> = Result<T, XCalError>;

/// A fatal error while reading an xCal stream.
///
/// Only malformed underlying XML (or undecodable text) is fatal; data-level
/// problems inside a well-formed document surface as warnings instead.
#[derive(Debug, Error)]
pub enum XCalError {
    /// The underlying XML stream is malformed.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Text content could not be decoded in the document encoding.
    #[error("text decoding failed: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
    /// An element or attribute name is not valid UTF-8.
    #[error("invalid UTF-8 in XML name: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
