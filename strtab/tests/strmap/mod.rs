//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use plib::testing::{run_test, TestPlan};
use posixutils_strtab::strtab_lib::mapping::MappingTable;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

const BASE_BUNDLE: &str = r#"
/* base language */
"Common.Close" = "Close";
"Cache.Clear" = "Clear %@";
"Photos_1" = "%@ photo";
"Photos_any" = "%@ photos";
"Chat.Title" = "%2$@ in %1$@";
"#;

/// Create a temporary bundle file for testing
fn create_temp_bundle(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let bundle_path = temp_dir.path().join("Localizable.strings");
    let mut file = File::create(&bundle_path).unwrap();
    write!(file, "{}", content).unwrap();
    (temp_dir, bundle_path)
}

fn path_arg(path: &PathBuf) -> String {
    path.to_str().unwrap().to_string()
}

/// Test strmap writes a mapping with sorted IDs
#[test]
fn test_strmap_simple() {
    let (temp_dir, bundle_path) = create_temp_bundle(BASE_BUNDLE);
    let mapping_path = temp_dir.path().join("strings.mapping");

    run_test(TestPlan {
        cmd: String::from("strmap"),
        args: vec![
            String::from("-o"),
            path_arg(&mapping_path),
            path_arg(&bundle_path),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    let table = MappingTable::load(&mapping_path).unwrap();
    assert_eq!(table.strings().len(), 3);
    assert_eq!(table.plurals().len(), 1);

    assert_eq!(table.string_id("Cache.Clear"), Some(0));
    assert_eq!(table.string_id("Chat.Title"), Some(1));
    assert_eq!(table.string_id("Common.Close"), Some(2));
    assert_eq!(table.plural_id("Photos"), Some(0));
    assert_eq!(table.string_id("Photos_1"), None);

    let with_args: Vec<u32> = table.argument_ids().collect();
    assert_eq!(with_args, vec![0, 1]);
}

/// Test strmap -v reports entry counts
#[test]
fn test_strmap_verbose() {
    let (temp_dir, bundle_path) = create_temp_bundle(BASE_BUNDLE);
    let mapping_path = temp_dir.path().join("out.mapping");

    run_test(TestPlan {
        cmd: String::from("strmap"),
        args: vec![
            String::from("-v"),
            String::from("-o"),
            path_arg(&mapping_path),
            path_arg(&bundle_path),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::from("strmap: 3 strings, 1 plural groups\n"),
        expected_exit_code: 0,
    });

    assert!(mapping_path.exists(), "Output mapping file should exist");
}

/// Test strmap with an empty bundle writes two zero counts
#[test]
fn test_strmap_empty_bundle() {
    let (temp_dir, bundle_path) = create_temp_bundle("// nothing here\n");
    let mapping_path = temp_dir.path().join("empty.mapping");

    run_test(TestPlan {
        cmd: String::from("strmap"),
        args: vec![
            String::from("-o"),
            path_arg(&mapping_path),
            path_arg(&bundle_path),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    let data = fs::read(&mapping_path).unwrap();
    assert_eq!(data, vec![0u8; 8]);
}

/// Test strmap rejects a malformed bundle
#[test]
fn test_strmap_parse_error() {
    let (temp_dir, bundle_path) = create_temp_bundle("\"A\" = \"1\"");
    let mapping_path = temp_dir.path().join("bad.mapping");

    run_test(TestPlan {
        cmd: String::from("strmap"),
        args: vec![
            String::from("-o"),
            path_arg(&mapping_path),
            path_arg(&bundle_path),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: format!(
            "strmap: {}: line 1: expected ';', found end of input\n",
            bundle_path.display()
        ),
        expected_exit_code: 1,
    });

    assert!(!mapping_path.exists());
}

/// Test strmap with a missing bundle file
#[test]
fn test_strmap_missing_bundle() {
    let temp_dir = TempDir::new().unwrap();
    let bundle_path = temp_dir.path().join("missing.strings");

    run_test(TestPlan {
        cmd: String::from("strmap"),
        args: vec![
            String::from("-o"),
            path_arg(&temp_dir.path().join("out.mapping")),
            path_arg(&bundle_path),
        ],
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: format!(
            "strmap: {}: I/O error: No such file or directory (os error 2)\n",
            bundle_path.display()
        ),
        expected_exit_code: 1,
    });
}
