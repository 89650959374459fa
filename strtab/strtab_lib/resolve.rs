//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Key resolution across language tiers
//!
//! Lookup order, first match wins:
//! 1. primary component
//! 2. secondary component (parent language of a regional variant)
//! 3. process-wide fallback dictionary
//! 4. the key itself

use tracing::debug;

use crate::strtab_lib::component::{Component, FallbackDictionary};
use crate::strtab_lib::plural::PluralForm;

/// Resolver over one primary/secondary/fallback combination
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    primary: &'a Component,
    secondary: Option<&'a Component>,
    fallback: &'a FallbackDictionary,
}

impl<'a> Resolver<'a> {
    pub fn new(
        primary: &'a Component,
        secondary: Option<&'a Component>,
        fallback: &'a FallbackDictionary,
    ) -> Self {
        Resolver {
            primary,
            secondary,
            fallback,
        }
    }

    /// Look up a key in the dictionary tiers only
    pub fn lookup(&self, key: &str) -> Option<&'a str> {
        self.primary
            .get(key)
            .or_else(|| self.secondary.and_then(|c| c.get(key)))
            .or_else(|| self.fallback.get(key))
    }

    /// Resolve a key, falling back to the key text
    pub fn resolve(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(value) => value.to_string(),
            None => {
                debug!(key, "untranslated key");
                key.to_string()
            }
        }
    }

    /// Resolve one plural variant of a key prefix
    ///
    /// The suffixed key is tried at every tier; if no tier has it, the bare
    /// prefix is returned.
    pub fn resolve_form(&self, key_prefix: &str, form: PluralForm) -> String {
        let key = format!("{}{}", key_prefix, form.suffix());
        match self.lookup(&key) {
            Some(value) => value.to_string(),
            None => {
                debug!(key = %key, "untranslated plural form");
                key_prefix.to_string()
            }
        }
    }
}

/// Resolve a key against primary, optional secondary and fallback tiers
pub fn resolve(
    primary: &Component,
    secondary: Option<&Component>,
    fallback: &FallbackDictionary,
    key: &str,
) -> String {
    Resolver::new(primary, secondary, fallback).resolve(key)
}
