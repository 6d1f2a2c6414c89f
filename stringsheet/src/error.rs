//! All error types for the stringsheet crate.
//!
//! These are returned from all fallible operations (parsing, spreadsheet I/O, packaging, etc.).
//! Every variant is fatal for the current run; recoverable conditions (such as a `<string>`
//! without a `name`) are logged and skipped instead of being raised.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("XML entity error: {0}")]
    XmlEscape(#[from] quick_xml::escape::EscapeError),

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("spreadsheet write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("spreadsheet read error: {0}")]
    XlsxRead(#[from] calamine::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("cannot infer locale from `{0}`")]
    UnknownLocale(String),
}

impl Error {
    /// Creates a new malformed-document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedDocument(message.into())
    }
}
