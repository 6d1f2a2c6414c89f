use std::path::{Path, PathBuf};

use stringsheet::{ExportOptions, RESOURCE_FILE_NAME, export_to_xlsx, import_from_xlsx};
use tracing::info;

use crate::config::{
    Config, DEFAULT_EXPORT_INPUT_DIR, DEFAULT_EXPORT_OUTPUT, DEFAULT_IMPORT_INPUT,
    DEFAULT_IMPORT_OUTPUT_DIR,
};
use crate::path_glob::find_resource_documents;

/// Export settings after merging flags, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub format_sheet: bool,
    pub file_name: String,
}

impl ExportSettings {
    pub fn resolve(
        input_dir: Option<PathBuf>,
        output: Option<PathBuf>,
        no_format: bool,
        file_name: Option<String>,
        config: &Config,
    ) -> Self {
        let section = &config.export;
        Self {
            input_dir: input_dir
                .or_else(|| section.input_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_INPUT_DIR)),
            output: output
                .or_else(|| section.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_OUTPUT)),
            format_sheet: !no_format && section.format_sheet.unwrap_or(true),
            file_name: file_name
                .or_else(|| section.file_name.clone())
                .unwrap_or_else(|| RESOURCE_FILE_NAME.to_string()),
        }
    }
}

/// Import settings after merging flags, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSettings {
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

impl ImportSettings {
    pub fn resolve(input: Option<PathBuf>, output_dir: Option<PathBuf>, config: &Config) -> Self {
        let section = &config.import;
        Self {
            input: input
                .or_else(|| section.input.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMPORT_INPUT)),
            output_dir: output_dir
                .or_else(|| section.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMPORT_OUTPUT_DIR)),
        }
    }
}

pub fn run_export_command(settings: &ExportSettings) -> Result<(), String> {
    let files = find_resource_documents(&settings.input_dir, &settings.file_name)?;
    info!(
        "Exporting {} documents from {}",
        files.len(),
        settings.input_dir.display()
    );

    let options = ExportOptions::new().with_formatting(settings.format_sheet);
    let translations = export_to_xlsx(&files, &settings.output, &options)
        .map_err(|e| format!("Error exporting to {}: {}", settings.output.display(), e))?;

    println!(
        "✅ Exported {} keys in {} locales to {}",
        translations.len(),
        translations.locales().len(),
        settings.output.display()
    );
    Ok(())
}

pub fn run_import_command(settings: &ImportSettings) -> Result<(), String> {
    if !Path::new(&settings.input).is_file() {
        return Err(format!("Input file {} does not exist", settings.input.display()));
    }

    let translations = import_from_xlsx(&settings.input, &settings.output_dir)
        .map_err(|e| format!("Error importing {}: {}", settings.input.display(), e))?;

    println!(
        "✅ Imported {} keys in {} locales into {}",
        translations.len(),
        translations.locales().len(),
        settings.output_dir.display()
    );
    Ok(())
}
