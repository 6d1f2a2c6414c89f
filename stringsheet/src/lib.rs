#![forbid(unsafe_code)]
//! Lossless conversion between Android `strings.xml` resource trees and a translator-friendly
//! Excel review sheet.
//!
//! Both directions go through one canonical model, [`Translations`]:
//!
//! - `res/<locale>/strings.xml` files → [`Codec`] → [`Translations`] → `.xlsx`
//! - `.xlsx` → [`Translations`] → regenerated `res/<locale>/strings.xml` files
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringsheet::{ExportOptions, export_to_xlsx, import_from_xlsx};
//!
//! // Export all locales into one sheet for review
//! export_to_xlsx(
//!     ["res/values/strings.xml", "res/values-de/strings.xml"],
//!     "translations.xlsx",
//!     &ExportOptions::new(),
//! )?;
//!
//! // ...and regenerate the resource tree from the reviewed sheet
//! import_from_xlsx("translations.xlsx", "res")?;
//! # Ok::<(), stringsheet::Error>(())
//! ```
//!
//! # Features
//!
//! - Plural groups flattened to one row per quantity (`name#PLURALS#one`, ...)
//! - Missing plural quantities kept distinct from empty translations
//! - Optional review layout: highlighted gaps, hidden non-translatable rows, comments,
//!   frozen panes and auto-filters
//! - Byte-for-byte reproducible spreadsheet output

pub mod codec;
pub mod converter;
pub mod error;
pub mod escape;
pub mod formats;
pub mod options;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{Codec, write_resource_dirs},
    converter::{export_to_xlsx, import_from_xlsx, read_resource_files},
    error::Error,
    escape::{escape, unescape},
    formats::{AndroidStringsFormat, RESOURCE_FILE_NAME},
    options::ExportOptions,
    types::{Entry, LocaleId, PLURALS_KEY_MARKER, Quantity, TranslationKey, Translations},
};
