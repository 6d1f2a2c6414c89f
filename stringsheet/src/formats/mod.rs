//! All supported file formats for stringsheet.
//!
//! `android_strings` handles one per-locale `strings.xml`; `xlsx` handles the flat review
//! sheet shared by all locales.

pub mod android_strings;
pub mod xlsx;

// Reexporting the formats for easier access
pub use android_strings::{Format as AndroidStringsFormat, RESOURCE_FILE_NAME};
pub use xlsx::{read_workbook, write_workbook};
