//! Optional `stringsheet.toml` settings.
//!
//! ```toml
//! [export]
//! input_dir = "app/src/main/res"
//! output = "translations.xlsx"
//! format_sheet = true
//! file_name = "strings.xml"
//!
//! [import]
//! input = "translations.xlsx"
//! output_dir = "src/main/res"
//! ```
//!
//! Command-line flags win over the file, and the file wins over the built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "stringsheet.toml";
pub const DEFAULT_EXPORT_INPUT_DIR: &str = "app/src/main/res";
pub const DEFAULT_EXPORT_OUTPUT: &str = "translations.xlsx";
pub const DEFAULT_IMPORT_INPUT: &str = "translations.xlsx";
pub const DEFAULT_IMPORT_OUTPUT_DIR: &str = "src/main/res";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub export: ExportConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub input_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format_sheet: Option<bool>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid configuration: {}", e))
    }

    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, `stringsheet.toml` in the working directory
    /// is used when present, and the defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Error reading config {}: {}", path.display(), e))?;
        let config = Self::from_toml(&content)
            .map_err(|e| format!("{} ({})", e, path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
