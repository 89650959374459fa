//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use plib::testing::{run_test, run_test_with_env, TestPlan};
use posixutils_strtab::strtab_lib::bundle;
use posixutils_strtab::strtab_lib::mapping::MappingTable;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const EN: &str = r#"
"Localization.LanguageName" = "English";
"Common.Close" = "Close";
"Common.Back" = "Back";
"Chat.Title" = "%2$@ in %1$@";
"Photos_1" = "%@ photo";
"Photos_any" = "%@ photos";
"#;

const RU: &str = r#"
"Localization.LanguageName" = "Русский";
"Common.Close" = "Закрыть";
"Chat.Title" = "%2$@ в %1$@";
"Photos_1" = "%@ фотография";
"Photos_3_10" = "%@ фотографии";
"Photos_many" = "%@ фотографий";
"Photos_any" = "%@ фото";
"#;

const PT: &str = r#"
"Common.Close" = "Fechar";
"Common.Back" = "Voltar";
"#;

const PT_BR: &str = r#"
"Common.Back" = "Retornar";
"#;

/// Bundle root with en, ru, pt and pt-br bundles plus a compiled mapping
fn create_bundle_root() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    for (code, content) in [("en", EN), ("ru", RU), ("pt", PT), ("pt-br", PT_BR)] {
        let dir = temp_dir.path().join(format!("{}.lproj", code));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Localizable.strings"), content).unwrap();
    }

    let base = bundle::parse(EN).unwrap();
    let table = MappingTable::from_base_dictionary(&base).unwrap();
    let mapping_path = temp_dir.path().join("strings.mapping");
    fs::write(&mapping_path, table.write_to_bytes().unwrap()).unwrap();

    (temp_dir, mapping_path)
}

fn strfmt_args(root: &Path, locale: Option<&str>, rest: &[&str]) -> Vec<String> {
    let mut args = vec![String::from("-d"), root.to_str().unwrap().to_string()];
    if let Some(locale) = locale {
        args.push(String::from("-l"));
        args.push(locale.to_string());
    }
    args.extend(rest.iter().map(|s| s.to_string()));
    args
}

fn strfmt_test(root: &Path, locale: Option<&str>, rest: &[&str], out: &str, err: &str, code: i32) {
    run_test(TestPlan {
        cmd: String::from("strfmt"),
        args: strfmt_args(root, locale, rest),
        stdin_data: String::new(),
        expected_out: String::from(out),
        expected_err: String::from(err),
        expected_exit_code: code,
    });
}

#[test]
fn test_strfmt_primary_translation() {
    let (root, _) = create_bundle_root();
    strfmt_test(root.path(), Some("ru_RU.UTF-8"), &["Common.Close"], "Закрыть\n", "", 0);
}

#[test]
fn test_strfmt_base_language_fallback() {
    let (root, _) = create_bundle_root();
    strfmt_test(root.path(), Some("ru"), &["Common.Back"], "Back\n", "", 0);
    strfmt_test(root.path(), Some("C"), &["Common.Close"], "Close\n", "", 0);
    strfmt_test(root.path(), Some("ja_JP"), &["Common.Close"], "Close\n", "", 0);
}

#[test]
fn test_strfmt_regional_variant() {
    let (root, _) = create_bundle_root();
    strfmt_test(root.path(), Some("pt_BR"), &["Common.Back"], "Retornar\n", "", 0);
    strfmt_test(root.path(), Some("pt_BR"), &["Common.Close"], "Fechar\n", "", 0);
    strfmt_test(root.path(), Some("pt_PT"), &["Common.Back"], "Voltar\n", "", 0);
}

#[test]
fn test_strfmt_template_without_arguments() {
    let (root, _) = create_bundle_root();
    strfmt_test(root.path(), Some("en"), &["Chat.Title"], "%2$@ in %1$@\n", "", 0);
}

#[test]
fn test_strfmt_format_with_ranges() {
    let (root, _) = create_bundle_root();
    strfmt_test(
        root.path(),
        Some("en"),
        &["-r", "Chat.Title", "General", "Alice"],
        "Alice in General\n1 0 5\n0 9 7\n",
        "",
        0,
    );
    // ranges are byte offsets
    strfmt_test(
        root.path(),
        Some("ru"),
        &["-r", "Chat.Title", "Общий", "Alice"],
        "Alice в Общий\n1 0 5\n0 9 10\n",
        "",
        0,
    );
}

#[test]
fn test_strfmt_plural_forms() {
    let (root, _) = create_bundle_root();
    strfmt_test(root.path(), Some("ru"), &["-n", "1", "Photos"], "1 фотография\n", "", 0);
    strfmt_test(root.path(), Some("ru"), &["-n", "22", "Photos"], "22 фотографии\n", "", 0);
    strfmt_test(root.path(), Some("ru"), &["-n", "5", "Photos"], "5 фотографий\n", "", 0);
    strfmt_test(root.path(), Some("ru"), &["-n", "11", "Photos"], "11 фотографий\n", "", 0);
    strfmt_test(root.path(), Some("en"), &["-n", "1", "Photos"], "1 photo\n", "", 0);
    strfmt_test(root.path(), Some("en"), &["-n", "0", "Photos"], "0 photos\n", "", 0);
    strfmt_test(root.path(), Some("en"), &["-n", "-1", "Photos"], "-1 photos\n", "", 0);
    strfmt_test(
        root.path(),
        Some("en"),
        &["-r", "-n", "12", "Photos"],
        "12 photos\n0 0 2\n",
        "",
        0,
    );
}

#[test]
fn test_strfmt_unknown_key() {
    let (root, _) = create_bundle_root();
    strfmt_test(
        root.path(),
        Some("en"),
        &["No.Such.Key"],
        "",
        "strfmt: unknown key: No.Such.Key\n",
        1,
    );
    strfmt_test(
        root.path(),
        Some("en"),
        &["-n", "2", "Common.Close"],
        "",
        "strfmt: unknown key: Common.Close\n",
        1,
    );
}

#[test]
fn test_strfmt_missing_argument() {
    let (root, _) = create_bundle_root();
    strfmt_test(
        root.path(),
        Some("en"),
        &["Chat.Title", "General"],
        "",
        "strfmt: argument 2 referenced but only 1 supplied\n",
        1,
    );
}

#[test]
fn test_strfmt_locale_from_environment() {
    let (root, _) = create_bundle_root();
    run_test_with_env(
        TestPlan {
            cmd: String::from("strfmt"),
            args: strfmt_args(root.path(), None, &["Common.Close"]),
            stdin_data: String::new(),
            expected_out: String::from("Fechar\n"),
            expected_err: String::new(),
            expected_exit_code: 0,
        },
        &[("LANG", "ru_RU.UTF-8"), ("LC_ALL", "pt_PT.UTF-8")],
    );
}

#[test]
fn test_strfmt_explicit_mapping() {
    let (root, mapping_path) = create_bundle_root();
    let elsewhere = TempDir::new().unwrap();
    let moved = elsewhere.path().join("custom.mapping");
    fs::rename(&mapping_path, &moved).unwrap();

    strfmt_test(
        root.path(),
        Some("ru"),
        &["-m", moved.to_str().unwrap(), "Common.Close"],
        "Закрыть\n",
        "",
        0,
    );
}

#[test]
fn test_strfmt_missing_mapping() {
    let (root, mapping_path) = create_bundle_root();
    fs::remove_file(&mapping_path).unwrap();

    strfmt_test(
        root.path(),
        Some("en"),
        &["Common.Close"],
        "",
        &format!(
            "strfmt: {}: I/O error: No such file or directory (os error 2)\n",
            mapping_path.display()
        ),
        1,
    );
}

#[test]
fn test_strfmt_bundle_dir_from_environment() {
    let (root, _) = create_bundle_root();
    run_test_with_env(
        TestPlan {
            cmd: String::from("strfmt"),
            args: vec![
                String::from("-l"),
                String::from("ru"),
                String::from("Common.Close"),
            ],
            stdin_data: String::new(),
            expected_out: String::from("Закрыть\n"),
            expected_err: String::new(),
            expected_exit_code: 0,
        },
        &[("STRTABDIR", root.path().to_str().unwrap())],
    );
}

#[test]
fn test_strfmt_mapping_from_environment() {
    let (root, mapping_path) = create_bundle_root();
    let elsewhere = TempDir::new().unwrap();
    let moved = elsewhere.path().join("custom.mapping");
    fs::rename(&mapping_path, &moved).unwrap();

    run_test_with_env(
        TestPlan {
            cmd: String::from("strfmt"),
            args: strfmt_args(root.path(), Some("ru"), &["-n", "3", "Photos"]),
            stdin_data: String::new(),
            expected_out: String::from("3 фотографии\n"),
            expected_err: String::new(),
            expected_exit_code: 0,
        },
        &[("STRTAB_MAPPING", moved.to_str().unwrap())],
    );

    let missing = elsewhere.path().join("missing.mapping");
    run_test_with_env(
        TestPlan {
            cmd: String::from("strfmt"),
            args: strfmt_args(root.path(), Some("ru"), &["Common.Close"]),
            stdin_data: String::new(),
            expected_out: String::new(),
            expected_err: format!(
                "strfmt: {}: I/O error: No such file or directory (os error 2)\n",
                missing.display()
            ),
            expected_exit_code: 1,
        },
        &[("STRTAB_MAPPING", missing.to_str().unwrap())],
    );
}
