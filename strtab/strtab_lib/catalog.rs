//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Resolved string catalog
//!
//! A [`StringCatalog`] resolves every key of the mapping table once, at
//! construction, and is read-only afterwards. Catalogs are `Send + Sync` and
//! can be shared freely between threads.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::strtab_lib::component::Component;
use crate::strtab_lib::format::{
    extract_placeholders, format_printf, substitute, ArgumentRange, FormatError, Formatted,
};
use crate::strtab_lib::lookup::Resources;
use crate::strtab_lib::mapping::MappingTable;
use crate::strtab_lib::plural::{classify, locale_fingerprint, PluralForm};
use crate::strtab_lib::resolve::Resolver;

/// Slot of a plural variant: `group * 6 + form ordinal`
pub fn plural_slot(group: u32, form: PluralForm) -> u64 {
    u64::from(group) * PluralForm::COUNT as u64 + form.ordinal() as u64
}

/// Error type for catalog queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No simple string with this ID
    UnknownString(u32),
    /// No plural group with this ID
    UnknownPlural(u32),
    /// No string or plural group with this key
    UnknownKey(String),
    /// Substitution failed
    Format(FormatError),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::UnknownString(id) => write!(f, "unknown string id {}", id),
            CatalogError::UnknownPlural(id) => write!(f, "unknown plural id {}", id),
            CatalogError::UnknownKey(key) => write!(f, "unknown key: {}", key),
            CatalogError::Format(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FormatError> for CatalogError {
    fn from(e: FormatError) -> Self {
        CatalogError::Format(e)
    }
}

/// Query-ready strings for one language selection
#[derive(Debug, Clone)]
pub struct StringCatalog {
    lc: u32,
    primary: Component,
    secondary: Option<Component>,
    base_language_code: String,
    mapping: Arc<MappingTable>,
    strings: HashMap<u32, String>,
    ranges: HashMap<u32, Vec<ArgumentRange>>,
    plurals: HashMap<u64, String>,
}

impl StringCatalog {
    /// Resolve every mapped key for a primary and optional secondary
    /// component
    pub fn new(resources: &Resources, primary: Component, secondary: Option<Component>) -> Self {
        let lc = locale_fingerprint(primary.pluralization_rules_code());
        let base_language_code = secondary
            .as_ref()
            .unwrap_or(&primary)
            .language_code()
            .to_string();

        let mapping = Arc::clone(resources.mapping());
        let resolver = Resolver::new(&primary, secondary.as_ref(), resources.fallback());

        let mut strings = HashMap::with_capacity(mapping.strings().len());
        for entry in mapping.strings() {
            strings.insert(entry.id, resolver.resolve(&entry.key));
        }

        let mut ranges = HashMap::new();
        for id in mapping.argument_ids() {
            if let Some(value) = strings.get(&id) {
                ranges.insert(id, extract_placeholders(value));
            }
        }

        let mut plurals = HashMap::with_capacity(mapping.plurals().len() * PluralForm::COUNT);
        for entry in mapping.plurals() {
            for form in PluralForm::ALL {
                plurals.insert(
                    plural_slot(entry.id, form),
                    resolver.resolve_form(&entry.key_prefix, form),
                );
            }
        }

        debug!(
            language = primary.language_code(),
            fingerprint = lc,
            strings = strings.len(),
            plurals = plurals.len(),
            "built string catalog"
        );

        StringCatalog {
            lc,
            primary,
            secondary,
            base_language_code,
            mapping,
            strings,
            ranges,
            plurals,
        }
    }

    /// Packed fingerprint of the plural rules code
    pub fn locale_fingerprint(&self) -> u32 {
        self.lc
    }

    pub fn primary(&self) -> &Component {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&Component> {
        self.secondary.as_ref()
    }

    /// The secondary's language code if present, else the primary's
    pub fn base_language_code(&self) -> &str {
        &self.base_language_code
    }

    /// The mapping table the catalog was built from
    pub fn mapping(&self) -> &MappingTable {
        &self.mapping
    }

    /// Resolved string for an ID
    pub fn get(&self, id: u32) -> Option<&str> {
        self.strings.get(&id).map(|s| s.as_str())
    }

    /// Placeholders of a string with arguments
    pub fn placeholders(&self, id: u32) -> Option<&[ArgumentRange]> {
        self.ranges.get(&id).map(|r| r.as_slice())
    }

    /// Substitute arguments into a string
    pub fn format<S: AsRef<str>>(&self, id: u32, args: &[S]) -> Result<Formatted, CatalogError> {
        let template = self.get(id).ok_or(CatalogError::UnknownString(id))?;
        let placeholders = self.placeholders(id).unwrap_or(&[]);
        Ok(substitute(template, placeholders, args)?)
    }

    /// Plural form the catalog's language uses for a quantity
    pub fn plural_form(&self, quantity: i32) -> PluralForm {
        classify(self.lc, quantity)
    }

    /// Resolved template of one plural variant
    pub fn plural_variant(&self, group: u32, form: PluralForm) -> Option<&str> {
        self.plurals
            .get(&plural_slot(group, form))
            .map(|s| s.as_str())
    }

    /// Pluralized string with the quantity substituted, and its ranges
    ///
    /// Plural variants are printf-style templates, so `%%` becomes `%`.
    pub fn plural_formatted(&self, group: u32, quantity: i32) -> Result<Formatted, CatalogError> {
        let form = self.plural_form(quantity);
        let template = self
            .plural_variant(group, form)
            .ok_or(CatalogError::UnknownPlural(group))?;
        Ok(format_printf(template, &[quantity.to_string()])?)
    }

    /// Pluralized string with the quantity substituted
    pub fn plural(&self, group: u32, quantity: i32) -> Result<String, CatalogError> {
        self.plural_formatted(group, quantity).map(|f| f.text)
    }

    /// ID of a simple string key
    pub fn string_id(&self, key: &str) -> Option<u32> {
        self.mapping.string_id(key)
    }

    /// ID of a plural key prefix
    pub fn plural_id(&self, key_prefix: &str) -> Option<u32> {
        self.mapping.plural_id(key_prefix)
    }

    /// Resolved string for a key
    pub fn get_by_key(&self, key: &str) -> Option<&str> {
        self.string_id(key).and_then(|id| self.get(id))
    }

    /// Substitute arguments into the string of a key
    pub fn format_by_key<S: AsRef<str>>(
        &self,
        key: &str,
        args: &[S],
    ) -> Result<Formatted, CatalogError> {
        let id = self
            .string_id(key)
            .ok_or_else(|| CatalogError::UnknownKey(key.to_string()))?;
        self.format(id, args)
    }

    /// Pluralized string for a key prefix
    pub fn plural_by_key(&self, key_prefix: &str, quantity: i32) -> Result<String, CatalogError> {
        let group = self
            .plural_id(key_prefix)
            .ok_or_else(|| CatalogError::UnknownKey(key_prefix.to_string()))?;
        self.plural(group, quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strtab_lib::component::FallbackDictionary;
    use crate::strtab_lib::mapping::{PluralEntry, StringEntry};
    use std::thread;

    fn dict(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn resources() -> Resources {
        let strings = vec![
            StringEntry {
                id: 0,
                key: "Common.Close".to_string(),
                has_arguments: false,
            },
            StringEntry {
                id: 4,
                key: "Cache.Clear".to_string(),
                has_arguments: true,
            },
            StringEntry {
                id: 9,
                key: "Chat.Message".to_string(),
                has_arguments: true,
            },
            StringEntry {
                id: 12,
                key: "Never.Translated".to_string(),
                has_arguments: false,
            },
        ];
        let plurals = vec![
            PluralEntry {
                id: 0,
                key_prefix: "Call.Minutes".to_string(),
            },
            PluralEntry {
                id: 3,
                key_prefix: "Photos".to_string(),
            },
        ];
        let mapping = MappingTable::new(strings, plurals).unwrap();
        let fallback = FallbackDictionary::from(dict(&[
            ("Common.Close", "Close"),
            ("Cache.Clear", "Clear %@"),
            ("Chat.Message", "%2$@ wrote to %1$@"),
            ("Call.Minutes_1", "%@ minute"),
            ("Call.Minutes_any", "%@ minutes"),
            ("Photos_1", "one photo"),
            ("Photos_any", "%@ photos"),
        ]));
        Resources::new(mapping, fallback)
    }

    fn russian() -> Component {
        Component::new(
            "ru",
            "Русский",
            None,
            dict(&[
                ("Common.Close", "Закрыть"),
                ("Call.Minutes_1", "%@ минута"),
                ("Call.Minutes_3_10", "%@ минуты"),
                ("Call.Minutes_many", "%@ минут"),
                ("Call.Minutes_any", "%@ минуты"),
            ]),
        )
    }

    #[test]
    fn test_plain_lookup_and_fallback() {
        let catalog = StringCatalog::new(&resources(), russian(), None);

        assert_eq!(catalog.get(0), Some("Закрыть"));
        assert_eq!(catalog.get(4), Some("Clear %@"));
        assert_eq!(catalog.get(12), Some("Never.Translated"));
        assert_eq!(catalog.get(1), None);
        assert_eq!(catalog.get_by_key("Common.Close"), Some("Закрыть"));
    }

    #[test]
    fn test_secondary_component() {
        let primary = Component::new("pt-br", "Português (Brasil)", None, dict(&[]));
        let secondary = Component::new("pt", "Português", None, dict(&[("Common.Close", "Fechar")]));
        let catalog = StringCatalog::new(&resources(), primary, Some(secondary));

        assert_eq!(catalog.get(0), Some("Fechar"));
        assert_eq!(catalog.base_language_code(), "pt");
        assert_eq!(catalog.primary().language_code(), "pt-br");
        assert_eq!(catalog.secondary().map(|c| c.language_code()), Some("pt"));
    }

    #[test]
    fn test_base_language_without_secondary() {
        let catalog = StringCatalog::new(&resources(), russian(), None);
        assert_eq!(catalog.base_language_code(), "ru");
        assert_eq!(catalog.locale_fingerprint(), locale_fingerprint("ru"));
    }

    #[test]
    fn test_fingerprint_uses_rules_code() {
        let primary = Component::new("classic", "Classic", Some("pl_PL".to_string()), dict(&[]));
        let catalog = StringCatalog::new(&resources(), primary, None);
        assert_eq!(catalog.locale_fingerprint(), locale_fingerprint("pl"));
        assert_eq!(catalog.plural_form(5), PluralForm::Many);
    }

    #[test]
    fn test_formatted_lookup() {
        let catalog = StringCatalog::new(&resources(), russian(), None);

        let out = catalog.format(9, &["Bob", "Alice"]).unwrap();
        assert_eq!(out.text, "Alice wrote to Bob");
        assert_eq!(
            out.ranges,
            vec![
                ArgumentRange {
                    index: 1,
                    range: 0..5
                },
                ArgumentRange {
                    index: 0,
                    range: 15..18
                },
            ]
        );

        let out = catalog.format_by_key("Cache.Clear", &["2 MB"]).unwrap();
        assert_eq!(out.text, "Clear 2 MB");

        // strings without arguments come back verbatim
        let out = catalog.format::<&str>(0, &[]).unwrap();
        assert_eq!(out.text, "Закрыть");
        assert!(out.ranges.is_empty());
    }

    #[test]
    fn test_formatted_lookup_errors() {
        let catalog = StringCatalog::new(&resources(), russian(), None);

        assert_eq!(
            catalog.format(9, &["Bob"]).unwrap_err(),
            CatalogError::Format(FormatError::MissingArgument {
                index: 1,
                supplied: 1
            })
        );
        assert_eq!(
            catalog.format(77, &["x"]).unwrap_err(),
            CatalogError::UnknownString(77)
        );
        assert_eq!(
            catalog.format_by_key("Missing", &["x"]).unwrap_err(),
            CatalogError::UnknownKey("Missing".to_string())
        );
    }

    #[test]
    fn test_plural_slots() {
        let catalog = StringCatalog::new(&resources(), russian(), None);

        assert_eq!(plural_slot(3, PluralForm::Zero), 18);
        assert_eq!(plural_slot(3, PluralForm::Other), 23);
        assert_eq!(catalog.plurals.get(&1), Some(&"%@ минута".to_string()));
        assert_eq!(catalog.plurals.get(&3), Some(&"%@ минуты".to_string()));
        assert_eq!(catalog.plurals.get(&4), Some(&"%@ минут".to_string()));
        // missing at every tier: bare prefix
        assert_eq!(catalog.plurals.get(&0), Some(&"Call.Minutes".to_string()));
        assert_eq!(catalog.plurals.get(&19), Some(&"one photo".to_string()));
        assert_eq!(catalog.plurals.len(), 12);
    }

    #[test]
    fn test_pluralized_lookup() {
        let catalog = StringCatalog::new(&resources(), russian(), None);

        assert_eq!(catalog.plural(0, 1).unwrap(), "1 минута");
        assert_eq!(catalog.plural(0, 3).unwrap(), "3 минуты");
        assert_eq!(catalog.plural(0, 11).unwrap(), "11 минут");
        assert_eq!(catalog.plural(0, 21).unwrap(), "21 минута");
        assert_eq!(catalog.plural_by_key("Call.Minutes", 25).unwrap(), "25 минут");

        let out = catalog.plural_formatted(0, 42).unwrap();
        assert_eq!(out.text, "42 минуты");
        assert_eq!(out.ranges[0].range, 0..2);

        assert_eq!(catalog.plural(8, 1).unwrap_err(), CatalogError::UnknownPlural(8));
    }

    #[test]
    fn test_plural_without_placeholder() {
        let english = Component::new("en", "English", None, dict(&[]));
        let catalog = StringCatalog::new(&resources(), english, None);

        assert_eq!(catalog.plural(3, 1).unwrap(), "one photo");
        assert_eq!(catalog.plural(3, 0).unwrap(), "0 photos");
        assert_eq!(catalog.plural(3, -1).unwrap(), "-1 photos");
    }

    #[test]
    fn test_plural_percent_escape() {
        let mapping = MappingTable::new(
            vec![StringEntry {
                id: 0,
                key: "Upload.Status".to_string(),
                has_arguments: true,
            }],
            vec![PluralEntry {
                id: 0,
                key_prefix: "Upload.Progress".to_string(),
            }],
        )
        .unwrap();
        let fallback = FallbackDictionary::from(dict(&[
            ("Upload.Status", "%@%% uploaded"),
            ("Upload.Progress_any", "%@%% done"),
        ]));
        let english = Component::new("en", "English", None, dict(&[]));
        let catalog = StringCatalog::new(&Resources::new(mapping, fallback), english, None);

        let out = catalog.plural_formatted(0, 42).unwrap();
        assert_eq!(out.text, "42% done");
        assert_eq!(out.ranges[0].range, 0..2);
        assert_eq!(catalog.format(0, &["42"]).unwrap().text, "42%% uploaded");
    }

    #[test]
    fn test_construction_is_deterministic() {
        let res = resources();
        let a = StringCatalog::new(&res, russian(), None);
        let b = StringCatalog::new(&res, russian(), None);

        for entry in res.mapping().strings() {
            assert_eq!(a.get(entry.id), b.get(entry.id));
        }
        assert_eq!(a.plurals, b.plurals);
        assert_eq!(a.ranges, b.ranges);
    }

    #[test]
    fn test_shared_across_threads() {
        let res = resources();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let res = res.clone();
                thread::spawn(move || {
                    let catalog = Arc::new(StringCatalog::new(&res, russian(), None));
                    let reader = Arc::clone(&catalog);
                    thread::spawn(move || reader.plural(0, 5).unwrap())
                        .join()
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "5 минут");
        }
    }
}
