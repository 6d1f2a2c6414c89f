//! Support for the Excel (`.xlsx`) review sheet.
//!
//! One worksheet named `Translations`; the header row is `Key`, `Translatable` and one
//! column per locale, followed by one row per key. Plural groups appear as one row per
//! quantity (`name#PLURALS#one`, ...).

pub mod export;
pub mod import;
pub mod reproducible;

pub use export::{
    CellFormatting, CellStyle, FIRST_LOCALE_COLUMN, KEY_COLUMN, SHEET_NAME, Sheet, SheetRow,
    StyleRegistry, TRANSLATABLE_COLUMN, cell_formatting, write_workbook,
};
pub use import::{read_workbook, translations_from_rows};
pub use reproducible::save_reproducible;
