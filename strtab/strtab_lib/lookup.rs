//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Bundle discovery and shared resources
//!
//! Bundles live under a root directory as
//! `<root>/<lang>.lproj/Localizable.strings`. The binary mapping resource
//! sits next to them as `<root>/strings.mapping`.

use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::strtab_lib::bundle::{self, BundleError};
use crate::strtab_lib::catalog::StringCatalog;
use crate::strtab_lib::component::{Component, FallbackDictionary};
use crate::strtab_lib::mapping::{MappingError, MappingTable};

/// Language of the fallback bundle
pub const BASE_LANGUAGE: &str = "en";

/// File name of a language bundle inside its `.lproj` directory
pub const BUNDLE_FILE: &str = "Localizable.strings";

/// File name of the binary mapping resource
pub const MAPPING_FILE: &str = "strings.mapping";

/// Default bundle search paths
const DEFAULT_BUNDLE_PATHS: &[&str] = &["/usr/share/strtab", "/usr/local/share/strtab"];

/// Read-only data shared by every catalog of a process
#[derive(Debug, Clone)]
pub struct Resources {
    mapping: Arc<MappingTable>,
    fallback: Arc<FallbackDictionary>,
}

impl Resources {
    pub fn new(mapping: MappingTable, fallback: FallbackDictionary) -> Self {
        Resources::from_shared(Arc::new(mapping), Arc::new(fallback))
    }

    /// Build from already shared tables
    pub fn from_shared(mapping: Arc<MappingTable>, fallback: Arc<FallbackDictionary>) -> Self {
        Resources { mapping, fallback }
    }

    /// Load the mapping resource and the base language bundle
    ///
    /// The mapping is required. A missing fallback bundle leaves the
    /// fallback tier empty.
    pub fn load(mapping_path: &Path, fallback_path: Option<&Path>) -> Result<Self, MappingError> {
        let mapping = MappingTable::load(mapping_path)?;
        let fallback = match fallback_path {
            Some(path) => FallbackDictionary::load(path),
            None => FallbackDictionary::empty(),
        };
        Ok(Resources::new(mapping, fallback))
    }

    pub fn mapping(&self) -> &Arc<MappingTable> {
        &self.mapping
    }

    pub fn fallback(&self) -> &FallbackDictionary {
        &self.fallback
    }
}

/// Bundle lookup service
#[derive(Debug, Clone)]
pub struct BundleLookup {
    search_paths: Vec<PathBuf>,
}

impl Default for BundleLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl BundleLookup {
    /// Search `STRTABDIR` first, then the default paths
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Ok(dir) = env::var("STRTABDIR") {
            if !dir.is_empty() {
                search_paths.push(PathBuf::from(dir));
            }
        }

        for path in DEFAULT_BUNDLE_PATHS {
            search_paths.push(PathBuf::from(path));
        }

        BundleLookup { search_paths }
    }

    /// Search only the given paths
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        BundleLookup {
            search_paths: paths,
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Get the current locale from environment
    pub fn get_current_locale() -> String {
        for var in ["LC_ALL", "LC_MESSAGES", "LANG"] {
            if let Ok(locale) = env::var(var) {
                if !locale.is_empty() {
                    return locale;
                }
            }
        }
        "C".to_string()
    }

    /// Candidate language codes for a locale, most specific first
    ///
    /// For "pt_BR.UTF-8@mod", returns:
    /// - "pt_BR"
    /// - "pt-br"
    /// - "pt"
    ///
    /// "C" and "POSIX" select the base language.
    pub fn locale_variants(locale: &str) -> Vec<String> {
        let base = locale.split('@').next().unwrap_or("");
        let base = base.split('.').next().unwrap_or("");

        if base.is_empty() || base == "C" || base == "POSIX" {
            return vec![BASE_LANGUAGE.to_string()];
        }

        let mut variants = vec![
            base.to_string(),
            base.replace('_', "-").to_lowercase(),
        ];
        if let Some(pos) = base.find(['_', '-']) {
            variants.push(base[..pos].to_lowercase());
        }

        let mut seen = HashSet::new();
        variants.retain(|v| seen.insert(v.clone()));
        variants
    }

    /// Path of the bundle for a language code, if one exists
    pub fn bundle_path(&self, language_code: &str) -> Option<PathBuf> {
        self.search_paths
            .iter()
            .map(|root| {
                root.join(format!("{}.lproj", language_code))
                    .join(BUNDLE_FILE)
            })
            .find(|path| path.is_file())
    }

    /// Path of the mapping resource
    ///
    /// `STRTAB_MAPPING` wins; otherwise the first search path holding a
    /// mapping file, else the mapping file name in the first search path.
    pub fn mapping_path(&self) -> PathBuf {
        if let Ok(path) = env::var("STRTAB_MAPPING") {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        self.search_paths
            .iter()
            .map(|root| root.join(MAPPING_FILE))
            .find(|path| path.is_file())
            .or_else(|| self.search_paths.first().map(|root| root.join(MAPPING_FILE)))
            .unwrap_or_else(|| PathBuf::from(MAPPING_FILE))
    }

    /// Load the mapping and the base language bundle
    pub fn load_resources(&self) -> Result<Resources, MappingError> {
        let fallback = self.bundle_path(BASE_LANGUAGE);
        Resources::load(&self.mapping_path(), fallback.as_deref())
    }

    /// Load the primary and secondary components for a locale
    ///
    /// The primary is the most specific variant with a bundle; the secondary
    /// is the next variant with a different bundle. With no bundle at all
    /// the primary is an empty base language component.
    pub fn load_components(
        &self,
        locale: &str,
    ) -> Result<(Component, Option<Component>), BundleError> {
        let mut found: Vec<(String, PathBuf)> = Vec::new();
        for variant in Self::locale_variants(locale) {
            if let Some(path) = self.bundle_path(&variant) {
                if !found.iter().any(|(_, p)| *p == path) {
                    found.push((variant, path));
                }
            }
            if found.len() == 2 {
                break;
            }
        }

        let mut found = found.into_iter();
        let primary = match found.next() {
            Some((code, path)) => {
                info!(language = %code, path = %path.display(), "loaded primary bundle");
                bundle::load_component(&path, &code, None)?
            }
            None => {
                debug!(locale, "no bundle for locale, using base language");
                Component::new(BASE_LANGUAGE, BASE_LANGUAGE, None, Default::default())
            }
        };
        let secondary = match found.next() {
            Some((code, path)) => {
                info!(language = %code, path = %path.display(), "loaded secondary bundle");
                Some(bundle::load_component(&path, &code, None)?)
            }
            None => None,
        };

        Ok((primary, secondary))
    }

    /// Build a catalog for a locale
    pub fn catalog(&self, resources: &Resources, locale: &str) -> Result<StringCatalog, BundleError> {
        let (primary, secondary) = self.load_components(locale)?;
        Ok(StringCatalog::new(resources, primary, secondary))
    }
}
