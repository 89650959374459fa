//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Plural form selection
//!
//! Languages are identified by a packed locale fingerprint: the plural rules
//! code truncated at the first `_` or `-`, lower-cased, with each UTF-16 code
//! unit shifted into a `u32`. Codes longer than four units lose their leading
//! characters, so distinct long codes may collide.
//!
//! The rules are the CLDR cardinal rules restricted to integers, evaluated on
//! the magnitude of the quantity: `-21` takes the form of `21`. The plain
//! "one for 1" families (English and the default, plus es/it/ca) only treat a
//! positive 1 as "one", so `-1` is "other" in English.

use std::fmt;

/// CLDR plural category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluralForm {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralForm {
    /// All forms in ordinal order
    pub const ALL: [PluralForm; 6] = [
        PluralForm::Zero,
        PluralForm::One,
        PluralForm::Two,
        PluralForm::Few,
        PluralForm::Many,
        PluralForm::Other,
    ];

    /// Number of forms
    pub const COUNT: usize = 6;

    /// Position of the form in [`PluralForm::ALL`]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Form for an ordinal, if in range
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    /// Key suffix appended to a plural key prefix in string bundles
    pub fn suffix(self) -> &'static str {
        match self {
            PluralForm::Zero => "_0",
            PluralForm::One => "_1",
            PluralForm::Two => "_2",
            PluralForm::Few => "_3_10",
            PluralForm::Many => "_many",
            PluralForm::Other => "_any",
        }
    }

    /// Split a bundle key into plural prefix and form
    pub fn strip_suffix(key: &str) -> Option<(&str, PluralForm)> {
        // "_3_10" is tried before the single-digit suffixes
        const ORDER: [PluralForm; 6] = [
            PluralForm::Few,
            PluralForm::Many,
            PluralForm::Other,
            PluralForm::Zero,
            PluralForm::One,
            PluralForm::Two,
        ];
        ORDER.iter().find_map(|form| {
            key.strip_suffix(form.suffix())
                .filter(|prefix| !prefix.is_empty())
                .map(|prefix| (prefix, *form))
        })
    }
}

impl fmt::Display for PluralForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PluralForm::Zero => "zero",
            PluralForm::One => "one",
            PluralForm::Two => "two",
            PluralForm::Few => "few",
            PluralForm::Many => "many",
            PluralForm::Other => "other",
        };
        f.write_str(name)
    }
}

/// Compute the locale fingerprint of a plural rules code
pub fn locale_fingerprint(code: &str) -> u32 {
    let end = code.find(['_', '-']).unwrap_or(code.len());
    code[..end]
        .to_lowercase()
        .encode_utf16()
        .fold(0u32, |acc, unit| (acc << 8).wrapping_add(u32::from(unit)))
}

/// Fingerprint of an ASCII language code, usable in patterns
pub const fn lc(code: &[u8]) -> u32 {
    let mut acc = 0u32;
    let mut i = 0;
    while i < code.len() {
        acc = (acc << 8).wrapping_add(code[i] as u32);
        i += 1;
    }
    acc
}

const AK: u32 = lc(b"ak");
const AM: u32 = lc(b"am");
const AR: u32 = lc(b"ar");
const AS: u32 = lc(b"as");
const BE: u32 = lc(b"be");
const BHO: u32 = lc(b"bho");
const BM: u32 = lc(b"bm");
const BN: u32 = lc(b"bn");
const BO: u32 = lc(b"bo");
const BR: u32 = lc(b"br");
const BS: u32 = lc(b"bs");
const CA: u32 = lc(b"ca");
const CEB: u32 = lc(b"ceb");
const CS: u32 = lc(b"cs");
const CY: u32 = lc(b"cy");
const DSB: u32 = lc(b"dsb");
const DZ: u32 = lc(b"dz");
const ES: u32 = lc(b"es");
const FA: u32 = lc(b"fa");
const FF: u32 = lc(b"ff");
const FIL: u32 = lc(b"fil");
const FR: u32 = lc(b"fr");
const GA: u32 = lc(b"ga");
const GD: u32 = lc(b"gd");
const GU: u32 = lc(b"gu");
const GUW: u32 = lc(b"guw");
const GV: u32 = lc(b"gv");
const HE: u32 = lc(b"he");
const HI: u32 = lc(b"hi");
const HR: u32 = lc(b"hr");
const HSB: u32 = lc(b"hsb");
const HY: u32 = lc(b"hy");
const ID: u32 = lc(b"id");
const IG: u32 = lc(b"ig");
const II: u32 = lc(b"ii");
const IS: u32 = lc(b"is");
const IT: u32 = lc(b"it");
const IU: u32 = lc(b"iu");
const IW: u32 = lc(b"iw");
const JA: u32 = lc(b"ja");
const JV: u32 = lc(b"jv");
const KAB: u32 = lc(b"kab");
const KDE: u32 = lc(b"kde");
const KEA: u32 = lc(b"kea");
const KM: u32 = lc(b"km");
const KN: u32 = lc(b"kn");
const KO: u32 = lc(b"ko");
const KSH: u32 = lc(b"ksh");
const KW: u32 = lc(b"kw");
const LAG: u32 = lc(b"lag");
const LN: u32 = lc(b"ln");
const LO: u32 = lc(b"lo");
const LT: u32 = lc(b"lt");
const LV: u32 = lc(b"lv");
const MG: u32 = lc(b"mg");
const MK: u32 = lc(b"mk");
const MO: u32 = lc(b"mo");
const MS: u32 = lc(b"ms");
const MT: u32 = lc(b"mt");
const MY: u32 = lc(b"my");
const NAQ: u32 = lc(b"naq");
const NSO: u32 = lc(b"nso");
const PA: u32 = lc(b"pa");
const PL: u32 = lc(b"pl");
const PT: u32 = lc(b"pt");
const RO: u32 = lc(b"ro");
const RU: u32 = lc(b"ru");
const SAH: u32 = lc(b"sah");
const SE: u32 = lc(b"se");
const SES: u32 = lc(b"ses");
const SG: u32 = lc(b"sg");
const SH: u32 = lc(b"sh");
const SHI: u32 = lc(b"shi");
const SI: u32 = lc(b"si");
const SK: u32 = lc(b"sk");
const SL: u32 = lc(b"sl");
const SMA: u32 = lc(b"sma");
const SMJ: u32 = lc(b"smj");
const SMN: u32 = lc(b"smn");
const SMS: u32 = lc(b"sms");
const SR: u32 = lc(b"sr");
const SU: u32 = lc(b"su");
const TH: u32 = lc(b"th");
const TI: u32 = lc(b"ti");
const TL: u32 = lc(b"tl");
const TO: u32 = lc(b"to");
const TZM: u32 = lc(b"tzm");
const UK: u32 = lc(b"uk");
const VI: u32 = lc(b"vi");
const WA: u32 = lc(b"wa");
const WO: u32 = lc(b"wo");
const YO: u32 = lc(b"yo");
const YUE: u32 = lc(b"yue");
const ZH: u32 = lc(b"zh");
const ZU: u32 = lc(b"zu");

/// Select the plural form for a quantity in the language with the given
/// fingerprint
///
/// Unknown languages use the "one for 1, other otherwise" rule.
pub fn classify(fingerprint: u32, n: i32) -> PluralForm {
    let m = n.unsigned_abs();

    match fingerprint {
        BM | BO | DZ | ID | IG | II | JA | JV | KDE | KEA | KM | KO | LO | MS | MY | SAH
        | SES | SG | SU | TH | TO | VI | WO | YO | YUE | ZH => PluralForm::Other,

        FR | PT => zero_one_rule(m, true),
        AK | AM | AS | BHO | BN | FA | FF | GU | GUW | HI | HY | KAB | KN | LN | MG | NSO
        | PA | SI | TI | WA | ZU => zero_one_rule(m, false),

        ES | IT | CA => one_million_rule(n),

        RU | UK | BE => east_slavic_rule(m),
        PL => polish_rule(m),
        CS | SK => czech_rule(m),
        HR | SR | BS | SH => serbo_croatian_rule(m),
        SL | DSB | HSB => slovenian_rule(m),
        LT => lithuanian_rule(m),
        LV => latvian_rule(m),
        RO | MO => romanian_rule(m),
        GA => irish_rule(m),
        GD => scottish_gaelic_rule(m),
        GV => manx_rule(m),
        CY => welsh_rule(m),
        BR => breton_rule(m),
        KW => cornish_rule(m),
        MT => maltese_rule(m),
        HE | IW | IU | NAQ | SE | SMA | SMJ | SMN | SMS => dual_rule(m),
        AR => arabic_rule(m),
        KSH | LAG => zero_one_other_rule(m),
        SHI => tachelhit_rule(m),
        MK | IS => last_digit_one_rule(m),
        FIL | TL | CEB => filipino_rule(m),
        TZM => tamazight_rule(m),

        // de, en, nl, sv, ...
        _ => one_other_rule(n),
    }
}

// Rule families

fn one_other_rule(n: i32) -> PluralForm {
    if n == 1 {
        PluralForm::One
    } else {
        PluralForm::Other
    }
}

fn is_compact_million(m: u32) -> bool {
    m > 0 && m % 1_000_000 == 0
}

fn zero_one_rule(m: u32, million_is_many: bool) -> PluralForm {
    if m <= 1 {
        PluralForm::One
    } else if million_is_many && is_compact_million(m) {
        PluralForm::Many
    } else {
        PluralForm::Other
    }
}

fn one_million_rule(n: i32) -> PluralForm {
    if n == 1 {
        PluralForm::One
    } else if is_compact_million(n.unsigned_abs()) {
        PluralForm::Many
    } else {
        PluralForm::Other
    }
}

fn east_slavic_rule(m: u32) -> PluralForm {
    let mod10 = m % 10;
    let mod100 = m % 100;

    if mod10 == 1 && mod100 != 11 {
        PluralForm::One
    } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
        PluralForm::Few
    } else {
        PluralForm::Many
    }
}

fn polish_rule(m: u32) -> PluralForm {
    let mod10 = m % 10;
    let mod100 = m % 100;

    if m == 1 {
        PluralForm::One
    } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
        PluralForm::Few
    } else {
        PluralForm::Many
    }
}

fn czech_rule(m: u32) -> PluralForm {
    match m {
        1 => PluralForm::One,
        2..=4 => PluralForm::Few,
        _ => PluralForm::Other,
    }
}

fn serbo_croatian_rule(m: u32) -> PluralForm {
    let mod10 = m % 10;
    let mod100 = m % 100;

    if mod10 == 1 && mod100 != 11 {
        PluralForm::One
    } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
        PluralForm::Few
    } else {
        PluralForm::Other
    }
}

fn slovenian_rule(m: u32) -> PluralForm {
    match m % 100 {
        1 => PluralForm::One,
        2 => PluralForm::Two,
        3 | 4 => PluralForm::Few,
        _ => PluralForm::Other,
    }
}

fn lithuanian_rule(m: u32) -> PluralForm {
    let mod10 = m % 10;
    let teen = (11..=19).contains(&(m % 100));

    if mod10 == 1 && !teen {
        PluralForm::One
    } else if (2..=9).contains(&mod10) && !teen {
        PluralForm::Few
    } else {
        PluralForm::Other
    }
}

fn latvian_rule(m: u32) -> PluralForm {
    let mod10 = m % 10;
    let mod100 = m % 100;

    if mod10 == 0 || (11..=19).contains(&mod100) {
        PluralForm::Zero
    } else if mod10 == 1 {
        PluralForm::One
    } else {
        PluralForm::Other
    }
}

fn romanian_rule(m: u32) -> PluralForm {
    if m == 1 {
        PluralForm::One
    } else if m == 0 || (1..=19).contains(&(m % 100)) {
        PluralForm::Few
    } else {
        PluralForm::Other
    }
}

fn irish_rule(m: u32) -> PluralForm {
    match m {
        1 => PluralForm::One,
        2 => PluralForm::Two,
        3..=6 => PluralForm::Few,
        7..=10 => PluralForm::Many,
        _ => PluralForm::Other,
    }
}

fn scottish_gaelic_rule(m: u32) -> PluralForm {
    match m {
        1 | 11 => PluralForm::One,
        2 | 12 => PluralForm::Two,
        3..=10 | 13..=19 => PluralForm::Few,
        _ => PluralForm::Other,
    }
}

fn manx_rule(m: u32) -> PluralForm {
    match (m % 10, m % 100) {
        (1, _) => PluralForm::One,
        (2, _) => PluralForm::Two,
        (_, 0 | 20 | 40 | 60 | 80) => PluralForm::Few,
        _ => PluralForm::Other,
    }
}

fn welsh_rule(m: u32) -> PluralForm {
    match m {
        0 => PluralForm::Zero,
        1 => PluralForm::One,
        2 => PluralForm::Two,
        3 => PluralForm::Few,
        6 => PluralForm::Many,
        _ => PluralForm::Other,
    }
}

fn breton_rule(m: u32) -> PluralForm {
    let mod10 = m % 10;
    let mod100 = m % 100;

    if mod10 == 1 && ![11, 71, 91].contains(&mod100) {
        PluralForm::One
    } else if mod10 == 2 && ![12, 72, 92].contains(&mod100) {
        PluralForm::Two
    } else if matches!(mod10, 3 | 4 | 9)
        && !(10..=19).contains(&mod100)
        && !(70..=79).contains(&mod100)
        && !(90..=99).contains(&mod100)
    {
        PluralForm::Few
    } else if is_compact_million(m) {
        PluralForm::Many
    } else {
        PluralForm::Other
    }
}

fn cornish_rule(m: u32) -> PluralForm {
    let mod100 = m % 100;
    let mod100000 = m % 100_000;

    if m == 0 {
        PluralForm::Zero
    } else if m == 1 {
        PluralForm::One
    } else if matches!(mod100, 2 | 22 | 42 | 62 | 82)
        || (m % 1000 == 0
            && ((1000..=20000).contains(&mod100000) || matches!(mod100000, 40000 | 60000 | 80000)))
        || m % 1_000_000 == 100_000
    {
        PluralForm::Two
    } else if matches!(mod100, 3 | 23 | 43 | 63 | 83) {
        PluralForm::Few
    } else if matches!(mod100, 1 | 21 | 41 | 61 | 81) {
        PluralForm::Many
    } else {
        PluralForm::Other
    }
}

fn maltese_rule(m: u32) -> PluralForm {
    let mod100 = m % 100;

    if m == 1 {
        PluralForm::One
    } else if m == 2 {
        PluralForm::Two
    } else if m == 0 || (3..=10).contains(&mod100) {
        PluralForm::Few
    } else if (11..=19).contains(&mod100) {
        PluralForm::Many
    } else {
        PluralForm::Other
    }
}

fn dual_rule(m: u32) -> PluralForm {
    match m {
        1 => PluralForm::One,
        2 => PluralForm::Two,
        _ => PluralForm::Other,
    }
}

fn arabic_rule(m: u32) -> PluralForm {
    let mod100 = m % 100;
    match m {
        0 => PluralForm::Zero,
        1 => PluralForm::One,
        2 => PluralForm::Two,
        _ if (3..=10).contains(&mod100) => PluralForm::Few,
        _ if (11..=99).contains(&mod100) => PluralForm::Many,
        _ => PluralForm::Other,
    }
}

fn zero_one_other_rule(m: u32) -> PluralForm {
    match m {
        0 => PluralForm::Zero,
        1 => PluralForm::One,
        _ => PluralForm::Other,
    }
}

fn tachelhit_rule(m: u32) -> PluralForm {
    match m {
        0 | 1 => PluralForm::One,
        2..=10 => PluralForm::Few,
        _ => PluralForm::Other,
    }
}

fn last_digit_one_rule(m: u32) -> PluralForm {
    if m % 10 == 1 && m % 100 != 11 {
        PluralForm::One
    } else {
        PluralForm::Other
    }
}

fn filipino_rule(m: u32) -> PluralForm {
    if matches!(m % 10, 4 | 6 | 9) {
        PluralForm::Other
    } else {
        PluralForm::One
    }
}

fn tamazight_rule(m: u32) -> PluralForm {
    if m <= 1 || (11..=99).contains(&m) {
        PluralForm::One
    } else {
        PluralForm::Other
    }
}
