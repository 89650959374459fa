//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Localized string table engine
//!
//! This module provides functionality for reading and writing binary string
//! mapping tables, parsing string bundles, resolving keys across language
//! fallbacks, substituting positional arguments while tracking their ranges,
//! and selecting plural forms according to per-language rules.

pub mod bundle;
pub mod catalog;
pub mod component;
pub mod format;
pub mod lookup;
pub mod mapping;
pub mod plural;
pub mod resolve;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "STRTAB_LOG";

/// Send library logs to stderr, filtered by `STRTAB_LOG` (default `warn`)
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
