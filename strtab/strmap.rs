//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! strmap - compile a string bundle into a binary mapping
//!
//! The strmap utility reads the base language bundle and writes the binary
//! mapping resource that assigns every key and plural group a numeric ID.

use clap::Parser;
use gettextrs::{LocaleCategory, bind_textdomain_codeset, gettext, setlocale, textdomain};
use posixutils_strtab::strtab_lib::bundle;
use posixutils_strtab::strtab_lib::init_logging;
use posixutils_strtab::strtab_lib::lookup::MAPPING_FILE;
use posixutils_strtab::strtab_lib::mapping::MappingTable;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::exit;

/// strmap - compile a string bundle into a binary mapping
#[derive(Parser)]
#[command(
    version,
    about = gettext("strmap - compile a string bundle into a binary mapping"),
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    #[arg(short = 'o', long = "output-file", help = gettext("Output file name"))]
    output: Option<PathBuf>,

    #[arg(short = 'v', help = gettext("Print entry counts"))]
    verbose: bool,

    #[arg(short, long, action = clap::ArgAction::HelpLong, help = gettext("Print help"))]
    help: Option<bool>,

    #[arg(short = 'V', long, action = clap::ArgAction::Version, help = gettext("Print version"))]
    version: Option<bool>,

    #[arg(help = gettext("Base language bundle"))]
    bundle: PathBuf,
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

    let dict = match bundle::load(&args.bundle) {
        Ok(dict) => dict,
        Err(e) => {
            eprintln!("strmap: {}: {}", args.bundle.display(), e);
            exit(1);
        }
    };

    let table = match MappingTable::from_base_dictionary(&dict) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("strmap: {}: {}", args.bundle.display(), e);
            exit(1);
        }
    };

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(MAPPING_FILE));

    let file = match File::create(&output) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("strmap: {}: {}", output.display(), e);
            exit(1);
        }
    };

    let mut writer = BufWriter::new(file);
    let written = table
        .write_to(&mut writer)
        .and_then(|_| writer.flush().map_err(Into::into));
    if let Err(e) = written {
        eprintln!("strmap: {}: {}", output.display(), e);
        exit(1);
    }

    if args.verbose {
        eprintln!(
            "strmap: {} strings, {} plural groups",
            table.strings().len(),
            table.plurals().len()
        );
    }
}
