//! Support for Android `strings.xml` resource documents.
//!
//! Handles `<string>` and `<plurals>` elements that are direct children of the root element.
//! String values are kept as the verbatim inner content of the element (nested markup, CDATA
//! sections and comments stay text), with character entities decoded in plain text only.
//! Provides parsing, serialization, and
//! conversion from the [`Translations`] model for one locale.

use quick_xml::{
    Reader, Writer,
    escape::partial_escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    io::Write,
    str::FromStr,
};
use tracing::warn;

use crate::{
    error::Error,
    escape::escape,
    traits::Parser,
    types::{LocaleId, Quantity, Translations, split_plural_key},
};

/// File name of every resource document.
pub const RESOURCE_FILE_NAME: &str = "strings.xml";

const RESOURCES_TAG: &str = "resources";
const STRING_TAG: &str = "string";
const PLURALS_TAG: &str = "plurals";
const ITEM_TAG: &str = "item";

const NAME_ATTRIBUTE: &str = "name";
const TRANSLATABLE_ATTRIBUTE: &str = "translatable";
const QUANTITY_ATTRIBUTE: &str = "quantity";

/// One parsed `strings.xml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Format {
    /// Locale of the document. Empty until assigned by the caller, since the document itself
    /// does not carry it.
    pub locale: LocaleId,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Resource {
    String(StringResource),
    Plurals(PluralsResource),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringResource {
    pub name: String,
    pub value: String,
    pub translatable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluralsResource {
    pub name: String,
    pub items: Vec<PluralItem>,
    pub translatable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluralItem {
    pub quantity: String,
    pub value: String,
}

impl PluralsResource {
    /// Text of the first item with the given quantity.
    pub fn item(&self, quantity: Quantity) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.quantity == quantity.as_str())
            .map(|item| item.value.as_str())
    }
}

impl Format {
    pub fn with_locale(mut self, locale: impl Into<LocaleId>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Builds the document for `locale` from the model.
    ///
    /// Entries are visited in key order. Absent and empty values are left out. Values are
    /// backslash-escaped. Plural quantities are collected per base name first and each group
    /// is emitted once, at the position of its first quantity.
    pub fn for_locale(translations: &Translations, locale: &str) -> Self {
        enum Slot {
            String(StringResource),
            Plurals(String),
        }

        let mut slots = Vec::new();
        let mut groups: BTreeMap<String, PluralsResource> = BTreeMap::new();

        for entry in translations.sorted_entries() {
            let Some(value) = entry.value(locale).filter(|v| !v.is_empty()) else {
                continue;
            };
            let value = escape(value);

            match split_plural_key(&entry.key) {
                Some((base, quantity)) => {
                    let group = groups.entry(base.to_string()).or_insert_with(|| {
                        slots.push(Slot::Plurals(base.to_string()));
                        PluralsResource {
                            name: base.to_string(),
                            items: Vec::new(),
                            translatable: true,
                        }
                    });
                    group.items.push(PluralItem {
                        quantity: quantity.to_string(),
                        value,
                    });
                    group.translatable &= entry.is_translatable;
                }
                None => slots.push(Slot::String(StringResource {
                    name: entry.key.clone(),
                    value,
                    translatable: entry.is_translatable,
                })),
            }
        }

        let resources = slots
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::String(sr) => Some(Resource::String(sr)),
                Slot::Plurals(name) => groups.remove(&name).map(Resource::Plurals),
            })
            .collect();

        Format {
            locale: locale.to_string(),
            resources,
        }
    }
}

impl Parser for Format {
    fn from_str(s: &str) -> Result<Self, Error> {
        let mut reader = Reader::from_str(s);
        let mut resources = Vec::new();
        let mut depth = 0usize;
        let mut seen_root = false;

        loop {
            match reader.read_event()? {
                Event::Start(_) if depth == 0 => {
                    if seen_root {
                        return Err(Error::malformed("more than one root element"));
                    }
                    seen_root = true;
                    depth = 1;
                }
                Event::Start(e) => {
                    if let Some(resource) = parse_child(&e, &mut reader, false)? {
                        resources.push(resource);
                    }
                }
                Event::Empty(_) if depth == 0 => {
                    if seen_root {
                        return Err(Error::malformed("more than one root element"));
                    }
                    seen_root = true;
                }
                Event::Empty(e) => {
                    if let Some(resource) = parse_child(&e, &mut reader, true)? {
                        resources.push(resource);
                    }
                }
                Event::End(_) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| Error::malformed("unmatched end tag"))?;
                }
                Event::Text(t) if depth == 0 => {
                    if !t.iter().all(u8::is_ascii_whitespace) {
                        return Err(Error::malformed("text outside of the root element"));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth != 0 {
            return Err(Error::malformed("unexpected end of document"));
        }
        if !seen_root {
            return Err(Error::malformed("document has no root element"));
        }

        Ok(Format {
            locale: String::new(),
            resources,
        })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(&mut writer, b' ', 4);

        xml_writer.write_event(Event::Decl(BytesDecl::new(
            "1.0",
            Some("utf-8"),
            Some("yes"),
        )))?;
        xml_writer.write_event(Event::Start(BytesStart::new(RESOURCES_TAG)))?;

        for resource in &self.resources {
            match resource {
                Resource::String(sr) => {
                    let mut elem = BytesStart::new(STRING_TAG);
                    elem.push_attribute((NAME_ATTRIBUTE, sr.name.as_str()));
                    if !sr.translatable {
                        elem.push_attribute((TRANSLATABLE_ATTRIBUTE, "false"));
                    }
                    write_text_element(&mut xml_writer, elem, STRING_TAG, &sr.value)?;
                }
                Resource::Plurals(pr) => {
                    let mut group = BytesStart::new(PLURALS_TAG);
                    group.push_attribute((NAME_ATTRIBUTE, pr.name.as_str()));
                    if !pr.translatable {
                        group.push_attribute((TRANSLATABLE_ATTRIBUTE, "false"));
                    }
                    xml_writer.write_event(Event::Start(group))?;
                    for item in &pr.items {
                        let mut elem = BytesStart::new(ITEM_TAG);
                        elem.push_attribute((QUANTITY_ATTRIBUTE, item.quantity.as_str()));
                        write_text_element(&mut xml_writer, elem, ITEM_TAG, &item.value)?;
                    }
                    xml_writer.write_event(Event::End(BytesEnd::new(PLURALS_TAG)))?;
                }
            }
        }

        xml_writer.write_event(Event::End(BytesEnd::new(RESOURCES_TAG)))?;
        xml_writer.get_mut().write_all(b"\n")?;
        Ok(())
    }
}

fn write_text_element<W: Write>(
    xml_writer: &mut Writer<W>,
    elem: BytesStart,
    tag: &str,
    value: &str,
) -> Result<(), Error> {
    xml_writer.write_event(Event::Start(elem))?;
    xml_writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(value))))?;
    xml_writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Looks up an attribute by name and decodes its value.
fn attribute(element: &BytesStart, name: &str) -> Result<Option<String>, Error> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Missing or empty attribute means translatable; anything but `true` otherwise does not.
fn is_translatable(element: &BytesStart) -> Result<bool, Error> {
    Ok(attribute(element, TRANSLATABLE_ATTRIBUTE)?.is_none_or(|v| v.is_empty() || v == "true"))
}

/// Reads everything up to the matching end tag.
///
/// Character entities are decoded in text only. CDATA sections, comments and nested markup
/// are kept as written.
fn inner_text<'i>(start: &BytesStart, reader: &mut Reader<&'i [u8]>) -> Result<String, Error> {
    let mut out = String::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event()? {
            Event::Text(t) => out.push_str(&t.unescape()?),
            Event::CData(c) => push_raw(&mut out, "<![CDATA[", &c, "]]>"),
            Event::Comment(c) => push_raw(&mut out, "<!--", &c, "-->"),
            Event::Start(e) => {
                depth += 1;
                push_raw(&mut out, "<", &e, ">");
            }
            Event::Empty(e) => push_raw(&mut out, "<", &e, "/>"),
            Event::End(_) if depth == 0 => break,
            Event::End(e) => {
                depth -= 1;
                push_raw(&mut out, "</", &e, ">");
            }
            Event::Eof => {
                return Err(Error::malformed(format!(
                    "unexpected end of document inside <{}>",
                    String::from_utf8_lossy(start.name().as_ref())
                )));
            }
            _ => {}
        }
    }
    Ok(out)
}

fn push_raw(out: &mut String, open: &str, content: &[u8], close: &str) {
    out.push_str(open);
    out.push_str(&String::from_utf8_lossy(content));
    out.push_str(close);
}

fn parse_child<'i>(
    start: &BytesStart,
    reader: &mut Reader<&'i [u8]>,
    is_empty: bool,
) -> Result<Option<Resource>, Error> {
    match start.name().as_ref() {
        b"string" => {
            let value = if is_empty {
                String::new()
            } else {
                inner_text(start, reader)?
            };
            let Some(name) = attribute(start, NAME_ATTRIBUTE)? else {
                warn!("Skipping <{}> without a '{}' attribute", STRING_TAG, NAME_ATTRIBUTE);
                return Ok(None);
            };
            Ok(Some(Resource::String(StringResource {
                name,
                value,
                translatable: is_translatable(start)?,
            })))
        }
        b"plurals" => {
            let items = if is_empty {
                Vec::new()
            } else {
                parse_plural_items(reader)?
            };
            let Some(name) = attribute(start, NAME_ATTRIBUTE)? else {
                warn!("Skipping <{}> without a '{}' attribute", PLURALS_TAG, NAME_ATTRIBUTE);
                return Ok(None);
            };
            Ok(Some(Resource::Plurals(PluralsResource {
                name,
                items,
                translatable: is_translatable(start)?,
            })))
        }
        _ => {
            if !is_empty {
                reader.read_to_end(start.name())?;
            }
            Ok(None)
        }
    }
}

fn parse_plural_items<'i>(reader: &mut Reader<&'i [u8]>) -> Result<Vec<PluralItem>, Error> {
    let mut items = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == ITEM_TAG.as_bytes() => {
                let value = inner_text(&e, reader)?;
                push_item(&e, value, &mut items)?;
            }
            Event::Start(e) => {
                reader.read_to_end(e.name())?;
            }
            Event::Empty(e) if e.name().as_ref() == ITEM_TAG.as_bytes() => {
                push_item(&e, String::new(), &mut items)?;
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(Error::malformed(format!(
                    "unexpected end of document inside <{}>",
                    PLURALS_TAG
                )));
            }
            _ => {}
        }
    }
    Ok(items)
}

fn push_item(item: &BytesStart, value: String, items: &mut Vec<PluralItem>) -> Result<(), Error> {
    let Some(quantity) = attribute(item, QUANTITY_ATTRIBUTE)? else {
        warn!("Skipping <{}> without a '{}' attribute", ITEM_TAG, QUANTITY_ATTRIBUTE);
        return Ok(());
    };
    if Quantity::from_str(&quantity).is_err() {
        warn!("Ignoring <{}> with unknown quantity '{}'", ITEM_TAG, quantity);
        return Ok(());
    }
    items.push(PluralItem { quantity, value });
    Ok(())
}
