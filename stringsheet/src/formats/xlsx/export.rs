//! Writes a [`Translations`] model to a single review worksheet.
//!
//! The table is built first ([`Sheet`]), then written cell by cell. When formatting is
//! enabled every cell is styled from a [`StyleRegistry`] according to [`cell_formatting`].

use std::path::Path;

use rust_xlsxwriter::{
    Color, ColNum, DocProperties, Format, FormatBorder, Note, RowNum, Workbook, Worksheet,
};
use tracing::{debug, info};

use super::reproducible::save_reproducible;
use crate::{
    error::Error,
    escape::unescape,
    options::ExportOptions,
    types::{Translations, split_plural_key},
};

pub const SHEET_NAME: &str = "Translations";
pub const KEY_COLUMN: &str = "Key";
pub const TRANSLATABLE_COLUMN: &str = "Translatable";

/// Column of the first locale, which is treated as the default language.
pub const FIRST_LOCALE_COLUMN: usize = 2;

const DOCUMENT_AUTHOR: &str = "stringsheet";
const DEFAULT_FONT: &str = "Calibri";
const TEXT_NUMBER_FORMAT: &str = "@";

const DEFAULT_COLUMN_WIDTH: f64 = 50.0;
const KEY_COLUMN_WIDTH: f64 = 40.0;

const EMPTY_CELL_COLOR: u32 = 0xFF8080;
const EMPTY_PLURALS_CELL_COLOR: u32 = 0xFFFFCC;
const HIDDEN_CELL_COLOR: u32 = 0xC0C0C0;

const NOT_TRANSLATABLE_NOTE: &str =
    "This key is marked as not-translatable, do not add translations in this row.";

/// Table view of a model: the header and one row per entry, in model order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub header: Vec<String>,
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub is_translatable: bool,
    /// Every cell of the row, starting with the key and the translatable flag.
    pub cells: Vec<String>,
}

impl Sheet {
    /// Lays out the model. Locale cells are unescaped; absent values become empty cells.
    pub fn from_translations(translations: &Translations) -> Self {
        let mut header = vec![KEY_COLUMN.to_string(), TRANSLATABLE_COLUMN.to_string()];
        header.extend(translations.locales().iter().cloned());

        let rows = translations
            .iter()
            .map(|entry| {
                let mut cells = vec![entry.key.clone(), entry.is_translatable.to_string()];
                cells.extend(
                    translations
                        .locales()
                        .iter()
                        .map(|locale| entry.value(locale).map(unescape).unwrap_or_default()),
                );
                SheetRow {
                    is_translatable: entry.is_translatable,
                    cells,
                }
            })
            .collect();

        Sheet { header, rows }
    }
}

impl SheetRow {
    pub fn key(&self) -> &str {
        &self.cells[0]
    }

    /// The quantity of a plural row whose default-language cell is blank.
    pub fn plural_without_default(&self) -> Option<&str> {
        let (_, quantity) = split_plural_key(self.key())?;
        let default_is_blank = self
            .cells
            .get(FIRST_LOCALE_COLUMN)
            .is_none_or(|text| text.trim().is_empty());
        default_is_blank.then_some(quantity)
    }
}

/// Named cell styles of the review layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Header,
    Default,
    Empty,
    EmptyPlural,
    Hidden,
}

/// The cell formats shared by every cell of one export.
pub struct StyleRegistry {
    header: Format,
    default: Format,
    empty: Format,
    empty_plural: Format,
    hidden: Format,
}

impl StyleRegistry {
    pub fn new() -> Self {
        StyleRegistry {
            header: base_format()
                .set_background_color(Color::RGB(HIDDEN_CELL_COLOR))
                .set_bold(),
            default: base_format(),
            empty: base_format().set_background_color(Color::RGB(EMPTY_CELL_COLOR)),
            empty_plural: base_format().set_background_color(Color::RGB(EMPTY_PLURALS_CELL_COLOR)),
            hidden: base_format().set_background_color(Color::RGB(HIDDEN_CELL_COLOR)),
        }
    }

    pub fn get(&self, style: CellStyle) -> &Format {
        match style {
            CellStyle::Header => &self.header,
            CellStyle::Default => &self.default,
            CellStyle::Empty => &self.empty,
            CellStyle::EmptyPlural => &self.empty_plural,
            CellStyle::Hidden => &self.hidden,
        }
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn base_format() -> Format {
    Format::new()
        .set_font_name(DEFAULT_FONT)
        .set_num_format(TEXT_NUMBER_FORMAT)
        .set_border(FormatBorder::Thin)
        .set_text_wrap()
}

/// Style and optional comment for one data cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFormatting {
    pub style: CellStyle,
    pub note: Option<String>,
}

/// Decides how the data cell at `col` of `row` is presented.
pub fn cell_formatting(row: &SheetRow, col: usize) -> CellFormatting {
    if !row.is_translatable {
        return CellFormatting {
            style: CellStyle::Hidden,
            note: (col == FIRST_LOCALE_COLUMN).then(|| NOT_TRANSLATABLE_NOTE.to_string()),
        };
    }

    let blank = row.cells.get(col).is_none_or(|text| text.trim().is_empty());
    match (blank, row.plural_without_default()) {
        (true, Some(quantity)) => CellFormatting {
            style: CellStyle::EmptyPlural,
            note: Some(missing_default_quantity_note(quantity)),
        },
        (true, None) => CellFormatting {
            style: CellStyle::Empty,
            note: None,
        },
        (false, _) => CellFormatting {
            style: CellStyle::Default,
            note: None,
        },
    }
}

fn missing_default_quantity_note(quantity: &str) -> String {
    format!(
        "The default language does not need/have a translation for the quantity '{}'.\n\
         If this language needs a different translation for this quantity, add it, otherwise ignore this row.",
        quantity
    )
}

/// Writes the model to `path` as a reproducible `.xlsx` file.
pub fn write_workbook<P: AsRef<Path>>(
    translations: &Translations,
    path: P,
    options: &ExportOptions,
) -> Result<(), Error> {
    let sheet = Sheet::from_translations(translations);
    let mut workbook = Workbook::new();
    workbook.set_properties(&DocProperties::new().set_author(DOCUMENT_AUTHOR));

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;
        if options.format_sheet {
            let styles = StyleRegistry::new();
            write_cells(worksheet, &sheet, Some(&styles))?;
            apply_layout(worksheet, &sheet)?;
        } else {
            write_cells(worksheet, &sheet, None)?;
        }
    }

    save_reproducible(&mut workbook, path.as_ref())?;
    info!(
        "Exported {} keys in {} locales to {}",
        sheet.rows.len(),
        translations.locales().len(),
        path.as_ref().display()
    );
    Ok(())
}

fn write_cells(
    worksheet: &mut Worksheet,
    sheet: &Sheet,
    styles: Option<&StyleRegistry>,
) -> Result<(), Error> {
    for (col, caption) in sheet.header.iter().enumerate() {
        let col = column_index(col)?;
        match styles {
            Some(styles) => {
                worksheet.write_string_with_format(0, col, caption, styles.get(CellStyle::Header))?;
            }
            None => {
                worksheet.write_string(0, col, caption)?;
            }
        }
    }

    let total = sheet.rows.len();
    for (idx, row) in sheet.rows.iter().enumerate() {
        let row_num = row_index(idx + 1)?;
        for (col, text) in row.cells.iter().enumerate() {
            let col_num = column_index(col)?;
            let Some(styles) = styles else {
                if !text.is_empty() {
                    worksheet.write_string(row_num, col_num, text)?;
                }
                continue;
            };

            let formatting = cell_formatting(row, col);
            let format = styles.get(formatting.style);
            if text.is_empty() {
                worksheet.write_blank(row_num, col_num, format)?;
            } else {
                worksheet.write_string_with_format(row_num, col_num, text, format)?;
            }
            if let Some(note) = formatting.note {
                worksheet.insert_note(row_num, col_num, &Note::new(note))?;
            }
        }
        if styles.is_some() && !row.is_translatable {
            worksheet.set_row_hidden(row_num)?;
        }
        debug!("Processed {} of {} translations", idx + 1, total);
    }
    Ok(())
}

/// Column widths, hidden flag column, frozen panes and the auto-filter.
fn apply_layout(worksheet: &mut Worksheet, sheet: &Sheet) -> Result<(), Error> {
    let last_col = column_index(sheet.header.len() - 1)?;
    for col in 0..=last_col {
        worksheet.set_column_width(col, DEFAULT_COLUMN_WIDTH)?;
    }
    worksheet.set_column_width(0, KEY_COLUMN_WIDTH)?;
    worksheet.set_column_hidden(1)?;
    worksheet.set_freeze_panes(1, 3)?;
    worksheet.autofilter(0, 0, row_index(sheet.rows.len())?, last_col)?;
    Ok(())
}

fn row_index(idx: usize) -> Result<RowNum, Error> {
    RowNum::try_from(idx)
        .map_err(|_| Error::DataMismatch(format!("row {} exceeds the sheet size", idx)))
}

fn column_index(idx: usize) -> Result<ColNum, Error> {
    ColNum::try_from(idx)
        .map_err(|_| Error::DataMismatch(format!("column {} exceeds the sheet size", idx)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Translations {
        let mut translations = Translations::new();
        translations.set_value("app_name", "values", Some("Don\\'t".into()), true);
        translations.set_value("app_name", "values-de", None, true);
        translations.set_value("steps#PLURALS#few", "values", None, true);
        translations.set_value("steps#PLURALS#few", "values-de", Some("ein paar".into()), true);
        translations.set_value("steps#PLURALS#one", "values", Some("one".into()), true);
        translations.set_value("internal", "values", Some("x".into()), false);
        translations
    }

    #[test]
    fn test_sheet_layout() {
        let sheet = Sheet::from_translations(&sample());
        assert_eq!(sheet.header, vec!["Key", "Translatable", "values", "values-de"]);
        assert_eq!(sheet.rows.len(), 4);
        assert_eq!(sheet.rows[0].cells, vec!["app_name", "true", "Don't", ""]);
        assert_eq!(sheet.rows[1].cells, vec!["steps#PLURALS#few", "true", "", "ein paar"]);
        assert_eq!(sheet.rows[3].cells, vec!["internal", "false", "x", ""]);
    }

    #[test]
    fn test_plural_without_default() {
        let sheet = Sheet::from_translations(&sample());
        assert_eq!(sheet.rows[0].plural_without_default(), None);
        assert_eq!(sheet.rows[1].plural_without_default(), Some("few"));
        assert_eq!(sheet.rows[2].plural_without_default(), None);
    }

    #[test]
    fn test_blank_cells_are_highlighted() {
        let sheet = Sheet::from_translations(&sample());
        let plain = &sheet.rows[0];
        assert_eq!(cell_formatting(plain, 0).style, CellStyle::Default);
        assert_eq!(cell_formatting(plain, 2).style, CellStyle::Default);
        assert_eq!(
            cell_formatting(plain, 3),
            CellFormatting {
                style: CellStyle::Empty,
                note: None
            }
        );
    }

    #[test]
    fn test_plural_without_default_gets_note_on_blank_cell() {
        let sheet = Sheet::from_translations(&sample());
        let row = &sheet.rows[1];
        let blank = cell_formatting(row, 2);
        assert_eq!(blank.style, CellStyle::EmptyPlural);
        assert!(blank.note.unwrap().contains("quantity 'few'"));

        let filled = cell_formatting(row, 3);
        assert_eq!(filled.style, CellStyle::Default);
        assert_eq!(filled.note, None);
    }

    #[test]
    fn test_non_translatable_row_is_hidden() {
        let sheet = Sheet::from_translations(&sample());
        let row = &sheet.rows[3];
        for col in 0..row.cells.len() {
            assert_eq!(cell_formatting(row, col).style, CellStyle::Hidden);
        }
        assert_eq!(
            cell_formatting(row, FIRST_LOCALE_COLUMN).note.as_deref(),
            Some(NOT_TRANSLATABLE_NOTE)
        );
        assert_eq!(cell_formatting(row, 0).note, None);
    }

    #[test]
    fn test_whitespace_only_counts_as_blank() {
        let row = SheetRow {
            is_translatable: true,
            cells: vec!["k".into(), "true".into(), "  ".into()],
        };
        assert_eq!(cell_formatting(&row, 2).style, CellStyle::Empty);
    }

    #[test]
    fn test_sheet_without_locales() {
        let mut translations = Translations::new();
        translations.insert_entry(crate::types::Entry::new("p#PLURALS#one", true));
        let sheet = Sheet::from_translations(&translations);
        assert_eq!(sheet.header, vec!["Key", "Translatable"]);
        assert_eq!(sheet.rows[0].plural_without_default(), Some("one"));
    }
}
