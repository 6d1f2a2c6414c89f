//! End-to-end conversions for stringsheet.
//!
//! This module wires the pieces together: resource documents → model → review sheet, and
//! review sheet → model → resource tree. Each function runs one complete pass and returns
//! the model it moved, so callers can report what happened.

use std::path::Path;

use tracing::{info, warn};

use crate::{
    codec::{Codec, write_resource_dirs},
    error::Error,
    formats::xlsx::{read_workbook, write_workbook},
    options::ExportOptions,
    types::Translations,
};

/// Parse every `strings.xml` in `files` and export them to one spreadsheet.
///
/// The locale of each file is the name of the folder containing it.
///
/// # Example
///
/// ```rust,no_run
/// use stringsheet::{ExportOptions, converter::export_to_xlsx};
///
/// let files = ["res/values/strings.xml", "res/values-de/strings.xml"];
/// let translations = export_to_xlsx(files, "translations.xlsx", &ExportOptions::new())?;
/// println!("exported {} keys", translations.len());
/// # Ok::<(), stringsheet::Error>(())
/// ```
pub fn export_to_xlsx<I, P, Q>(
    files: I,
    output_path: Q,
    options: &ExportOptions,
) -> Result<Translations, Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut codec = Codec::new();
    for file in files {
        codec.read_file(file)?;
    }
    if codec.documents.is_empty() {
        warn!("No resource documents given, exporting an empty sheet");
    }
    let document_count = codec.documents.len();

    let translations = codec.into_translations();
    write_workbook(&translations, output_path.as_ref(), options)?;
    info!(
        "Finished export of {} translation keys (from {} documents) to {}",
        translations.len(),
        document_count,
        output_path.as_ref().display()
    );
    Ok(translations)
}

/// Read a spreadsheet and regenerate `output_dir/<locale>/strings.xml` for every locale column.
///
/// # Example
///
/// ```rust,no_run
/// use stringsheet::converter::import_from_xlsx;
///
/// let translations = import_from_xlsx("translations.xlsx", "app/src/main/res")?;
/// println!("imported {} locales", translations.locales().len());
/// # Ok::<(), stringsheet::Error>(())
/// ```
pub fn import_from_xlsx<P, Q>(input_path: P, output_dir: Q) -> Result<Translations, Error>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let translations = read_workbook(input_path.as_ref())?;
    write_resource_dirs(&translations, output_dir.as_ref())?;
    info!(
        "Finished import of {} translation keys (in {} locales) to {}",
        translations.len(),
        translations.locales().len(),
        output_dir.as_ref().display()
    );
    Ok(translations)
}

/// Parse resource documents into a model without writing anything.
pub fn read_resource_files<I, P>(files: I) -> Result<Translations, Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut codec = Codec::new();
    for file in files {
        codec.read_file(file)?;
    }
    Ok(codec.into_translations())
}
