//! Core, format-agnostic types for stringsheet.
//! The resource parser and the sheet importer decode into these; the sheet exporter and the
//! resource writer read from these.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt::Display,
    str::FromStr,
};

use serde::Serialize;

/// Identifier of a locale variant, i.e. the resource folder name (`values`, `values-de`, ...).
pub type LocaleId = String;

/// Identifier of a translation. Plural groups are flattened into one key per quantity.
pub type TranslationKey = String;

/// Separator between a plural base name and its quantity inside a flattened key.
pub const PLURALS_KEY_MARKER: &str = "#PLURALS#";

/// Builds the flattened key for one quantity of a plural group.
pub fn plural_key(base: &str, quantity: Quantity) -> TranslationKey {
    format!("{}{}{}", base, PLURALS_KEY_MARKER, quantity.as_str())
}

/// Splits a flattened plural key into `(base, quantity)`.
///
/// Returns `None` for keys of plain strings. The quantity is returned verbatim; it is not
/// validated against [`Quantity`].
pub fn split_plural_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(PLURALS_KEY_MARKER)
}

/// Android plural quantity categories.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Few,
    Many,
    One,
    Other,
    Two,
    Zero,
}

impl Quantity {
    /// Every category, in the order flattened keys are generated.
    pub const ALL: [Quantity; 6] = [
        Quantity::Few,
        Quantity::Many,
        Quantity::One,
        Quantity::Other,
        Quantity::Two,
        Quantity::Zero,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::Few => "few",
            Quantity::Many => "many",
            Quantity::One => "one",
            Quantity::Other => "other",
            Quantity::Two => "two",
            Quantity::Zero => "zero",
        }
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quantity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FEW" => Ok(Quantity::Few),
            "MANY" => Ok(Quantity::Many),
            "ONE" => Ok(Quantity::One),
            "OTHER" => Ok(Quantity::Other),
            "TWO" => Ok(Quantity::Two),
            "ZERO" => Ok(Quantity::Zero),
            _ => Err(format!("Unknown plural quantity: {}", s)),
        }
    }
}

/// All recorded values of one key across locales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Flattened translation key.
    pub key: TranslationKey,

    /// One slot per locale. `None` means nothing was recorded for this locale, which is
    /// different from a recorded empty string.
    pub values: BTreeMap<LocaleId, Option<String>>,

    /// Whether translators should provide values for this key.
    pub is_translatable: bool,
}

impl Entry {
    pub fn new(key: impl Into<TranslationKey>, is_translatable: bool) -> Self {
        Entry {
            key: key.into(),
            values: BTreeMap::new(),
            is_translatable,
        }
    }

    /// Value recorded for `locale`, flattening "no slot" and "absent slot" together.
    pub fn value(&self, locale: &str) -> Option<&str> {
        self.values.get(locale).and_then(|v| v.as_deref())
    }

    /// Whether this entry is one quantity of a plural group.
    pub fn is_plural(&self) -> bool {
        split_plural_key(&self.key).is_some()
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Entry {{ key: {}, locales: {}, translatable: {} }}",
            self.key,
            self.values.len(),
            self.is_translatable
        )
    }
}

/// The canonical model of one conversion run.
///
/// Entries keep first-encounter order. The locale set holds every locale that was visited,
/// including locales that contributed no entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Translations {
    entries: Vec<Entry>,

    #[serde(skip)]
    index: HashMap<TranslationKey, usize>,

    locales: BTreeSet<LocaleId>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a locale even if it never receives a value.
    pub fn add_locale(&mut self, locale: impl Into<LocaleId>) {
        self.locales.insert(locale.into());
    }

    pub fn locales(&self) -> &BTreeSet<LocaleId> {
        &self.locales
    }

    /// Stores `value` for `(key, locale)`, creating the entry on first encounter.
    ///
    /// The translatable flag is overwritten on every call, so across locales the last
    /// writer wins.
    pub fn set_value(
        &mut self,
        key: &str,
        locale: &str,
        value: Option<String>,
        is_translatable: bool,
    ) {
        self.locales.insert(locale.to_string());
        let idx = match self.index.get(key) {
            Some(idx) => *idx,
            None => {
                self.entries.push(Entry::new(key, is_translatable));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[idx];
        entry.values.insert(locale.to_string(), value);
        entry.is_translatable = is_translatable;
    }

    /// Inserts a complete entry. An existing entry with the same key is replaced in place.
    pub fn insert_entry(&mut self, entry: Entry) {
        self.locales.extend(entry.values.keys().cloned());
        match self.index.get(&entry.key) {
            Some(idx) => self.entries[*idx] = entry,
            None => {
                self.index.insert(entry.key.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.index.get(key).map(|idx| &self.entries[*idx])
    }

    /// Entries in first-encounter order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Entries ordered by key.
    pub fn sorted_entries(&self) -> Vec<&Entry> {
        let mut sorted: Vec<&Entry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.key.cmp(&b.key));
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Translations {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
