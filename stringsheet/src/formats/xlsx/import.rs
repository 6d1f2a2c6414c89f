//! Reads a review worksheet back into a [`Translations`] model.
//!
//! The first sheet is used. Its header row names the locale columns, starting after `Key`
//! and `Translatable`. Every locale cell of a data row is stored as a present value: a blank
//! cell becomes an empty string, never an absent one. The resource writer omits empty values,
//! so the two end up identical in the regenerated documents.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::{debug, info};

use super::export::FIRST_LOCALE_COLUMN;
use crate::{
    error::Error,
    types::{Entry, Translations},
};

/// Reads the first worksheet of the workbook at `path`.
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Translations, Error> {
    let mut workbook = open_workbook_auto(path.as_ref())?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::InvalidResource("workbook contains no worksheet".to_string()))??;

    let translations = translations_from_rows(range.rows())?;
    info!(
        "Read {} keys in {} locales from {}",
        translations.len(),
        translations.locales().len(),
        path.as_ref().display()
    );
    Ok(translations)
}

/// Builds a model from sheet rows, the first of which is the header.
pub fn translations_from_rows<'a, I>(mut rows: I) -> Result<Translations, Error>
where
    I: Iterator<Item = &'a [Data]>,
{
    let header = rows
        .next()
        .ok_or_else(|| Error::InvalidResource("sheet has no header row".to_string()))?;

    let locale_columns: Vec<(usize, String)> = header
        .iter()
        .enumerate()
        .skip(FIRST_LOCALE_COLUMN)
        .map(|(idx, cell)| (idx, cell_text(cell)))
        .filter(|(_, locale)| !locale.trim().is_empty())
        .collect();

    let mut translations = Translations::new();
    for (_, locale) in &locale_columns {
        translations.add_locale(locale.clone());
    }

    for (idx, row) in rows.enumerate() {
        let key = row.first().map(cell_text).unwrap_or_default();
        if key.is_empty() {
            continue;
        }
        let is_translatable = row.get(1).is_none_or(parse_translatable);

        let mut entry = Entry::new(key, is_translatable);
        for (col, locale) in &locale_columns {
            let value = row.get(*col).map(cell_text).unwrap_or_default();
            entry.values.insert(locale.clone(), Some(value));
        }
        translations.insert_entry(entry);
        debug!("Parsed row {} of the sheet", idx + 1);
    }
    Ok(translations)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Only the exact words `true` and `false` count; anything else means translatable.
fn parse_translatable(cell: &Data) -> bool {
    match cell {
        Data::Bool(b) => *b,
        other => cell_text(other).parse::<bool>().unwrap_or(true),
    }
}
