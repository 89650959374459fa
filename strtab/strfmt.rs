//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! strfmt - print a localized string
//!
//! The strfmt utility resolves a string key for the current locale,
//! optionally substituting arguments or selecting a plural form for a
//! count, and prints the result.

use clap::Parser;
use gettextrs::{LocaleCategory, bind_textdomain_codeset, gettext, setlocale, textdomain};
use posixutils_strtab::strtab_lib::catalog::{CatalogError, StringCatalog};
use posixutils_strtab::strtab_lib::format::Formatted;
use posixutils_strtab::strtab_lib::init_logging;
use posixutils_strtab::strtab_lib::lookup::{BASE_LANGUAGE, BundleLookup, Resources};
use std::path::PathBuf;
use std::process::exit;

/// strfmt - print a localized string
#[derive(Parser)]
#[command(
    version,
    about = gettext("strfmt - print a localized string"),
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    #[arg(short = 'd', long = "directory", help = gettext("Look for bundles in DIR instead of the default search paths"))]
    directory: Option<PathBuf>,

    #[arg(short = 'm', long = "mapping", help = gettext("Binary mapping file"))]
    mapping: Option<PathBuf>,

    #[arg(short = 'l', long = "locale", help = gettext("Use LOCALE instead of the current locale"))]
    locale: Option<String>,

    #[arg(short = 'n', long = "count", allow_negative_numbers = true, help = gettext("Treat KEY as a plural key and select the form for COUNT"))]
    count: Option<i32>,

    #[arg(short = 'r', long = "ranges", help = gettext("Print the position of each substituted argument"))]
    ranges: bool,

    #[arg(short, long, action = clap::ArgAction::HelpLong, help = gettext("Print help"))]
    help: Option<bool>,

    #[arg(short = 'V', long, action = clap::ArgAction::Version, help = gettext("Print version"))]
    version: Option<bool>,

    #[arg(help = gettext("String key, or plural key prefix with -n"))]
    key: String,

    #[arg(conflicts_with = "count", help = gettext("Arguments to substitute"))]
    arguments: Vec<String>,
}

fn resolve(catalog: &StringCatalog, args: &Args) -> Result<Formatted, CatalogError> {
    if let Some(count) = args.count {
        let group = catalog
            .plural_id(&args.key)
            .ok_or_else(|| CatalogError::UnknownKey(args.key.clone()))?;
        return catalog.plural_formatted(group, count);
    }

    let id = catalog
        .string_id(&args.key)
        .ok_or_else(|| CatalogError::UnknownKey(args.key.clone()))?;

    if args.arguments.is_empty() {
        let text = catalog
            .get(id)
            .ok_or(CatalogError::UnknownString(id))?
            .to_string();
        return Ok(Formatted {
            text,
            ranges: Vec::new(),
        });
    }

    catalog.format(id, args.arguments.as_slice())
}

fn main() {
    // Set up localization
    setlocale(LocaleCategory::LcAll, "");
    if textdomain("posixutils-rs").is_err() {
        // Ignore error - translation may not be available
    }
    let _ = bind_textdomain_codeset("posixutils-rs", "UTF-8");

    init_logging();

    let args = Args::parse();

    let lookup = match &args.directory {
        Some(dir) => BundleLookup::with_paths(vec![dir.clone()]),
        None => BundleLookup::new(),
    };

    let mapping_path = args
        .mapping
        .clone()
        .unwrap_or_else(|| lookup.mapping_path());
    let fallback_path = lookup.bundle_path(BASE_LANGUAGE);

    let resources = match Resources::load(&mapping_path, fallback_path.as_deref()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("strfmt: {}: {}", mapping_path.display(), e);
            exit(1);
        }
    };

    let locale = args
        .locale
        .clone()
        .unwrap_or_else(BundleLookup::get_current_locale);

    let catalog = match lookup.catalog(&resources, &locale) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("strfmt: {}: {}", locale, e);
            exit(1);
        }
    };

    let formatted = match resolve(&catalog, &args) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("strfmt: {}", e);
            exit(1);
        }
    };

    println!("{}", formatted.text);
    if args.ranges {
        for r in &formatted.ranges {
            println!("{} {} {}", r.index, r.range.start, r.len());
        }
    }
}
