//! This module provides the `Codec` struct, which collects the per-locale `strings.xml`
//! documents of one resource tree and merges them into a [`Translations`] model, and
//! [`write_resource_dirs`], which regenerates a resource tree from a model.
//!
//! The locale of a document is the name of the folder it lives in (`values`, `values-de`,
//! `values-b+sr+Latn`, ...).

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    error::Error,
    formats::{
        AndroidStringsFormat,
        android_strings::{RESOURCE_FILE_NAME, Resource},
    },
    traits::Parser,
    types::{LocaleId, Quantity, Translations, plural_key},
};

/// A set of resource documents, each tagged with its locale.
#[derive(Debug, Default)]
pub struct Codec {
    /// The documents read so far, in the order they were added.
    pub documents: Vec<AndroidStringsFormat>,
}

impl Codec {
    /// Creates a new, empty `Codec`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an iterator over all documents.
    pub fn iter(&self) -> std::slice::Iter<'_, AndroidStringsFormat> {
        self.documents.iter()
    }

    /// Adds an already parsed document.
    pub fn add_document(&mut self, document: AndroidStringsFormat) {
        self.documents.push(document);
    }

    /// Reads a document and takes its locale from the parent folder name.
    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let locale = infer_locale_from_path(path.as_ref())?;
        self.read_file_with_locale(path, locale)
    }

    /// Reads a document with an explicit locale.
    pub fn read_file_with_locale<P: AsRef<Path>>(
        &mut self,
        path: P,
        locale: impl Into<LocaleId>,
    ) -> Result<(), Error> {
        let document = AndroidStringsFormat::read_from(path.as_ref())?.with_locale(locale);
        debug!(
            "Read {} resources for '{}' from {}",
            document.resources.len(),
            document.locale,
            path.as_ref().display()
        );
        self.documents.push(document);
        Ok(())
    }

    /// Merges all documents into one model.
    ///
    /// Documents are visited sorted by locale. Every plural group is flattened into six
    /// keys; quantities without an item are recorded as absent. When the same key appears in
    /// several locales, the translatable flag of the last visited locale is kept.
    pub fn into_translations(mut self) -> Translations {
        self.documents.sort_by(|a, b| a.locale.cmp(&b.locale));

        let total = self.documents.len();
        let mut translations = Translations::new();
        for (idx, document) in self.documents.iter().enumerate() {
            merge_document(&mut translations, document);
            debug!("Parsed {} of {} documents", idx + 1, total);
        }
        info!(
            "Merged {} documents into {} keys across {} locales",
            total,
            translations.len(),
            translations.locales().len()
        );
        translations
    }
}

fn merge_document(translations: &mut Translations, document: &AndroidStringsFormat) {
    let locale = document.locale.as_str();
    translations.add_locale(locale);

    for resource in &document.resources {
        match resource {
            Resource::String(sr) => {
                translations.set_value(&sr.name, locale, Some(sr.value.clone()), sr.translatable);
            }
            Resource::Plurals(pr) => {
                for quantity in Quantity::ALL {
                    translations.set_value(
                        &plural_key(&pr.name, quantity),
                        locale,
                        pr.item(quantity).map(str::to_string),
                        pr.translatable,
                    );
                }
            }
        }
    }
}

/// Regenerates `root/<locale>/strings.xml` for every locale of the model.
///
/// Existing files are replaced wholesale. A failure aborts immediately; files written for
/// earlier locales are left in place.
pub fn write_resource_dirs<P: AsRef<Path>>(
    translations: &Translations,
    root: P,
) -> Result<Vec<PathBuf>, Error> {
    let root = root.as_ref();
    fs::create_dir_all(root)?;

    let total = translations.locales().len();
    let mut written = Vec::with_capacity(total);
    for (idx, locale) in translations.locales().iter().enumerate() {
        let document = AndroidStringsFormat::for_locale(translations, locale);
        let dir = root.join(locale);
        fs::create_dir_all(&dir)?;
        let path = dir.join(RESOURCE_FILE_NAME);
        document.write_to(&path)?;
        debug!("Imported {} of {} locales ({})", idx + 1, total, path.display());
        written.push(path);
    }
    info!("Wrote {} resource files to {}", written.len(), root.display());
    Ok(written)
}

/// The locale is the name of the folder containing the document.
fn infer_locale_from_path(path: &Path) -> Result<LocaleId, Error> {
    path.parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::UnknownLocale(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn document(locale: &str, xml: &str) -> AndroidStringsFormat {
        AndroidStringsFormat::from_str(xml).unwrap().with_locale(locale)
    }

    #[test]
    fn test_translatable_flag_from_last_locale() {
        let mut codec = Codec::new();
        codec.add_document(document(
            "values-de",
            r#"<resources><string name="app_name" translatable="false">Bar</string></resources>"#,
        ));
        codec.add_document(document(
            "values",
            r#"<resources><string name="app_name">Foo</string></resources>"#,
        ));
        let translations = codec.into_translations();

        let entry = translations.get("app_name").unwrap();
        assert_eq!(entry.value("values"), Some("Foo"));
        assert_eq!(entry.value("values-de"), Some("Bar"));
        assert!(!entry.is_translatable);
    }

    #[test]
    fn test_plurals_expand_to_six_keys() {
        let mut codec = Codec::new();
        codec.add_document(document(
            "values",
            r#"<resources>
                <plurals name="onboarding_steps">
                    <item quantity="one">%d step</item>
                    <item quantity="other">%d steps</item>
                </plurals>
            </resources>"#,
        ));
        let translations = codec.into_translations();
        assert_eq!(translations.len(), 6);

        let one = translations.get("onboarding_steps#PLURALS#one").unwrap();
        assert_eq!(one.value("values"), Some("%d step"));
        let other = translations.get("onboarding_steps#PLURALS#other").unwrap();
        assert_eq!(other.value("values"), Some("%d steps"));
        for quantity in ["few", "many", "two", "zero"] {
            let entry = translations
                .get(&format!("onboarding_steps#PLURALS#{}", quantity))
                .unwrap();
            assert_eq!(entry.values.get("values"), Some(&None));
        }
    }

    #[test]
    fn test_empty_plural_item_is_not_absent() {
        let mut codec = Codec::new();
        codec.add_document(document(
            "values",
            r#"<resources><plurals name="p"><item quantity="zero"></item></plurals></resources>"#,
        ));
        let translations = codec.into_translations();
        let zero = translations.get("p#PLURALS#zero").unwrap();
        assert_eq!(zero.values.get("values"), Some(&Some(String::new())));
    }

    #[test]
    fn test_locale_without_entries_is_recorded() {
        let mut codec = Codec::new();
        codec.add_document(document("values", r#"<resources><string name="a">A</string></resources>"#));
        codec.add_document(document("values-fr", "<resources/>"));
        let translations = codec.into_translations();
        assert!(translations.locales().contains("values-fr"));
        assert_eq!(translations.len(), 1);
    }

    #[test]
    fn test_insertion_order_follows_sorted_locales() {
        let mut codec = Codec::new();
        codec.add_document(document(
            "values-de",
            r#"<resources><string name="only_de">x</string></resources>"#,
        ));
        codec.add_document(document(
            "values",
            r#"<resources><string name="zz">z</string><string name="aa">a</string></resources>"#,
        ));
        let translations = codec.into_translations();
        let keys: Vec<&str> = translations.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["zz", "aa", "only_de"]);
    }

    #[test]
    fn test_read_file_infers_locale() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("values-de");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("strings.xml");
        fs::write(&path, r#"<resources><string name="a">A</string></resources>"#).unwrap();

        let mut codec = Codec::new();
        codec.read_file(&path).unwrap();
        assert_eq!(codec.documents[0].locale, "values-de");
    }

    #[test]
    fn test_read_missing_file_fails() {
        let mut codec = Codec::new();
        let result = codec.read_file("does/not/exist/strings.xml");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_infer_locale_without_parent_fails() {
        assert!(infer_locale_from_path(Path::new("strings.xml")).is_err());
    }

    #[test]
    fn test_write_resource_dirs_replaces_files() {
        let temp_dir = TempDir::new().unwrap();
        let stale_dir = temp_dir.path().join("values");
        fs::create_dir_all(&stale_dir).unwrap();
        fs::write(stale_dir.join("strings.xml"), "stale content that is much longer than the new file").unwrap();

        let mut translations = Translations::new();
        translations.set_value("greeting", "values", Some("Hi @you".into()), true);
        translations.set_value("greeting", "values-de", Some(String::new()), true);

        let written = write_resource_dirs(&translations, temp_dir.path()).unwrap();
        assert_eq!(written.len(), 2);

        let values = fs::read_to_string(stale_dir.join("strings.xml")).unwrap();
        assert!(values.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"yes\"?>"));
        assert!(values.contains(r#"<string name="greeting">Hi \@you</string>"#));
        assert!(!values.contains("stale"));

        let de = fs::read_to_string(temp_dir.path().join("values-de/strings.xml")).unwrap();
        assert!(!de.contains("greeting"));
    }
}
