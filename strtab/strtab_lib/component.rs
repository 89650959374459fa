//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Per-language string dictionaries
//!
//! A [`Component`] is one loaded language bundle. The [`FallbackDictionary`]
//! is the base language table shared by every catalog of a process.

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::strtab_lib::bundle;

/// One language's key to string table with its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    language_code: String,
    localized_name: String,
    pluralization_rules_code: Option<String>,
    dict: HashMap<String, String>,
}

impl Component {
    /// Create a component
    pub fn new(
        language_code: impl Into<String>,
        localized_name: impl Into<String>,
        pluralization_rules_code: Option<String>,
        dict: HashMap<String, String>,
    ) -> Self {
        Component {
            language_code: language_code.into(),
            localized_name: localized_name.into(),
            pluralization_rules_code,
            dict,
        }
    }

    /// Language code, e.g. `pt-br`
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Display name of the language
    pub fn localized_name(&self) -> &str {
        &self.localized_name
    }

    /// Plural rules code, defaulting to the language code
    pub fn pluralization_rules_code(&self) -> &str {
        self.pluralization_rules_code
            .as_deref()
            .unwrap_or(&self.language_code)
    }

    /// Look up a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.dict.get(key).map(|s| s.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.dict.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }
}

/// Base language table consulted after the primary and secondary components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackDictionary {
    dict: HashMap<String, String>,
}

impl FallbackDictionary {
    /// An empty fallback tier
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the base bundle from a file
    ///
    /// A missing or unreadable bundle yields an empty dictionary.
    pub fn load(path: &Path) -> Self {
        match bundle::load(path) {
            Ok(dict) => {
                info!(path = %path.display(), entries = dict.len(), "loaded fallback bundle");
                FallbackDictionary { dict }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "fallback bundle unavailable");
                Self::empty()
            }
        }
    }

    /// Look up a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.dict.get(key).map(|s| s.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.dict.len()
    }

    /// Whether the tier is empty
    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }
}

impl From<HashMap<String, String>> for FallbackDictionary {
    fn from(dict: HashMap<String, String>) -> Self {
        FallbackDictionary { dict }
    }
}

impl From<Component> for FallbackDictionary {
    fn from(component: Component) -> Self {
        FallbackDictionary {
            dict: component.dict,
        }
    }
}
