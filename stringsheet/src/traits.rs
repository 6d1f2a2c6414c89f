//! Traits for reading and writing a single resource document.

use std::{
    fs::File,
    io::{BufRead, BufWriter, Read, Write},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing and writing one resource document from/to one file.
///
/// # Example
///
/// ```rust,no_run
/// use stringsheet::traits::Parser;
/// let format = stringsheet::formats::AndroidStringsFormat::read_from("values/strings.xml")?;
/// format.write_to("values-copy/strings.xml")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from any reader.
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_str(&content)
    }

    /// Parse from file path. A byte order mark, if present, selects the decoding.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let content =
            std::str::from_utf8(bytes).map_err(|e| Error::DataMismatch(e.to_string()))?;
        Self::from_str(content)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path, replacing whatever was there.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
