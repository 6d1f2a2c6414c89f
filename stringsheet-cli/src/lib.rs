//! CLI library for testing purposes

pub mod config;
pub mod convert;
pub mod debug;
pub mod path_glob;

pub use config::Config;
pub use convert::{ExportSettings, ImportSettings};
pub use path_glob::find_resource_documents;
