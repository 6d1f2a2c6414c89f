//! Byte-reproducible `.xlsx` packaging.
//!
//! A workbook is saved into a scratch directory, unpacked, stripped of its creation and
//! modification timestamps, and repacked with entries sorted by path and a fixed entry
//! timestamp. The scratch directory is removed when this module returns, on every path.

use std::{
    borrow::Cow,
    fs::{self, File},
    io,
    path::Path,
};

use lazy_static::lazy_static;
use regex::Regex;
use rust_xlsxwriter::Workbook;
use tracing::debug;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter, write::SimpleFileOptions};

use crate::error::Error;

lazy_static! {
    static ref CORE_TIMESTAMP_REGEX: Regex = Regex::new(
        r"<dcterms:(?:created|modified)\b[^>]*>[^<]*</dcterms:(?:created|modified)>"
    )
    .unwrap();
}

const SCRATCH_PREFIX: &str = "stringsheet";
const CORE_PROPERTIES_ENTRY: &str = "docProps/core.xml";
const ENTRY_PERMISSIONS: u32 = 0o644;

/// Saves `workbook` to `output` so that identical workbooks produce identical bytes.
pub fn save_reproducible(workbook: &mut Workbook, output: &Path) -> Result<(), Error> {
    let scratch = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir()?;

    let raw = scratch.path().join("raw.xlsx");
    workbook.save(&raw)?;

    let unpacked = scratch.path().join("unpacked");
    let mut entries = unpack(&raw, &unpacked)?;
    strip_timestamps_in_file(&unpacked.join(CORE_PROPERTIES_ENTRY))?;
    entries.sort();

    let repacked = scratch.path().join("reproducible.xlsx");
    repack(&unpacked, &entries, &repacked)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::copy(&repacked, output)?;
    debug!("Packed {} entries into {}", entries.len(), output.display());
    Ok(())
}

/// Extracts every file entry below `dir` and returns the entry names.
fn unpack(archive_path: &Path, dir: &Path) -> Result<Vec<String>, Error> {
    let mut archive = ZipArchive::new(File::open(archive_path)?)?;
    let mut names = Vec::with_capacity(archive.len());

    for idx in 0..archive.len() {
        let mut entry = archive.by_index(idx)?;
        if entry.is_dir() {
            continue;
        }
        let relative = entry.enclosed_name().ok_or_else(|| {
            Error::DataMismatch(format!("archive entry `{}` escapes its folder", entry.name()))
        })?;
        let target = dir.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        names.push(entry.name().to_string());
    }
    Ok(names)
}

/// Writes the named files of `dir` into a new archive, in the given order.
fn repack(dir: &Path, entries: &[String], output: &Path) -> Result<(), Error> {
    let mut zip = ZipWriter::new(File::create(output)?);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(ENTRY_PERMISSIONS);

    for name in entries {
        zip.start_file(name.as_str(), options)?;
        let mut file = File::open(dir.join(name))?;
        io::copy(&mut file, &mut zip)?;
    }
    zip.finish()?;
    Ok(())
}

fn strip_timestamps_in_file(path: &Path) -> Result<(), Error> {
    if !path.exists() {
        return Ok(());
    }
    let content = fs::read_to_string(path)?;
    fs::write(path, strip_core_timestamps(&content).as_bytes())?;
    Ok(())
}

/// Removes `dcterms:created` and `dcterms:modified` from document core properties.
pub fn strip_core_timestamps(xml: &str) -> Cow<'_, str> {
    CORE_TIMESTAMP_REGEX.replace_all(xml, "")
}
