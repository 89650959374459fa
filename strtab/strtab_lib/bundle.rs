//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! String bundle parser
//!
//! Bundles are flat key/value tables, one file per language:
//!
//! ```text
//! /* comment */
//! // comment
//! "Common.Close" = "Close";
//! "Cache.Clear" = "Clear %@";
//! Plain.Key = "unquoted keys are allowed";
//! ```
//!
//! Strings support the escapes `\" \' \\ \n \t \r \0` and `\uXXXX` /
//! `\UXXXX` (surrogate pairs are combined). A later duplicate key replaces
//! an earlier one.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use crate::strtab_lib::component::Component;

/// Bundle key holding the language's own display name
pub const LANGUAGE_NAME_KEY: &str = "Localization.LanguageName";

/// Error type for bundle parsing
#[derive(Debug)]
pub enum BundleError {
    /// I/O error
    Io(io::Error),
    /// Syntax error with line number
    Parse(usize, String),
    /// Invalid escape sequence
    InvalidEscape(usize, char),
    /// Unterminated string
    UnterminatedString(usize),
    /// Unterminated block comment
    UnterminatedComment(usize),
}

impl std::fmt::Display for BundleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BundleError::Io(e) => write!(f, "I/O error: {}", e),
            BundleError::Parse(line, msg) => write!(f, "line {}: {}", line, msg),
            BundleError::InvalidEscape(line, c) => {
                write!(f, "line {}: invalid escape \\{}", line, c)
            }
            BundleError::UnterminatedString(line) => {
                write!(f, "line {}: unterminated string", line)
            }
            BundleError::UnterminatedComment(line) => {
                write!(f, "line {}: unterminated comment", line)
            }
        }
    }
}

impl std::error::Error for BundleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BundleError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BundleError {
    fn from(e: io::Error) -> Self {
        BundleError::Io(e)
    }
}

/// Parse bundle text into a key/value table
pub fn parse(input: &str) -> Result<HashMap<String, String>, BundleError> {
    Parser::new(input).parse()
}

/// Parse a bundle from a reader
pub fn parse_from<R: Read>(mut reader: R) -> Result<HashMap<String, String>, BundleError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    // tolerate a UTF-8 byte order mark
    parse(input.strip_prefix('\u{feff}').unwrap_or(&input))
}

/// Load a bundle file
pub fn load(path: &Path) -> Result<HashMap<String, String>, BundleError> {
    parse_from(File::open(path)?)
}

/// Load a bundle file as a language component
///
/// The display name comes from the bundle's own language name entry, or
/// the language code when it has none.
pub fn load_component(
    path: &Path,
    language_code: &str,
    pluralization_rules_code: Option<String>,
) -> Result<Component, BundleError> {
    let dict = load(path)?;
    let localized_name = dict
        .get(LANGUAGE_NAME_KEY)
        .cloned()
        .unwrap_or_else(|| language_code.to_string());
    Ok(Component::new(
        language_code,
        localized_name,
        pluralization_rules_code,
        dict,
    ))
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn parse(mut self) -> Result<HashMap<String, String>, BundleError> {
        let mut entries = HashMap::new();

        loop {
            self.skip_trivia()?;
            if self.chars.peek().is_none() {
                break;
            }

            let key = self.parse_token()?;
            self.skip_trivia()?;
            self.expect('=')?;
            self.skip_trivia()?;
            let value = self.parse_token()?;
            self.skip_trivia()?;
            self.expect(';')?;

            entries.insert(key, value);
        }

        Ok(entries)
    }

    fn expect(&mut self, expected: char) -> Result<(), BundleError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(BundleError::Parse(
                self.line,
                format!("expected '{}', found '{}'", expected, c),
            )),
            None => Err(BundleError::Parse(
                self.line,
                format!("expected '{}', found end of input", expected),
            )),
        }
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) -> Result<(), BundleError> {
        loop {
            match self.chars.peek().copied() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    match ahead.next() {
                        Some('/') => {
                            while let Some(c) = self.bump() {
                                if c == '\n' {
                                    break;
                                }
                            }
                        }
                        Some('*') => {
                            let start = self.line;
                            self.bump();
                            self.bump();
                            let mut prev = '\0';
                            loop {
                                match self.bump() {
                                    Some('/') if prev == '*' => break,
                                    Some(c) => prev = c,
                                    None => return Err(BundleError::UnterminatedComment(start)),
                                }
                            }
                        }
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_token(&mut self) -> Result<String, BundleError> {
        match self.chars.peek().copied() {
            Some('"') => self.parse_quoted(),
            Some(c) if is_bare_char(c) => {
                let mut s = String::new();
                while let Some(&c) = self.chars.peek() {
                    if !is_bare_char(c) {
                        break;
                    }
                    s.push(c);
                    self.bump();
                }
                Ok(s)
            }
            Some(c) => Err(BundleError::Parse(
                self.line,
                format!("unexpected character '{}'", c),
            )),
            None => Err(BundleError::Parse(
                self.line,
                "unexpected end of input".to_string(),
            )),
        }
    }

    fn parse_quoted(&mut self) -> Result<String, BundleError> {
        let start = self.line;
        self.bump();
        let mut s = String::new();

        loop {
            match self.bump() {
                None => return Err(BundleError::UnterminatedString(start)),
                Some('"') => return Ok(s),
                Some('\\') => {
                    let c = self.bump().ok_or(BundleError::UnterminatedString(start))?;
                    match c {
                        '"' | '\'' | '\\' => s.push(c),
                        'n' => s.push('\n'),
                        't' => s.push('\t'),
                        'r' => s.push('\r'),
                        '0' => s.push('\0'),
                        'u' | 'U' => {
                            let ch = self.parse_unicode_escape(c)?;
                            s.push(ch);
                        }
                        _ => return Err(BundleError::InvalidEscape(self.line, c)),
                    }
                }
                Some(c) => s.push(c),
            }
        }
    }

    fn read_hex4(&mut self, escape: char) -> Result<u32, BundleError> {
        let mut value = 0u32;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or(BundleError::InvalidEscape(self.line, escape))?;
            value = value * 16 + digit;
        }
        Ok(value)
    }

    fn parse_unicode_escape(&mut self, escape: char) -> Result<char, BundleError> {
        let high = self.read_hex4(escape)?;
        if (0xd800..0xdc00).contains(&high) {
            // a high surrogate must be followed by an escaped low surrogate
            if self.bump() != Some('\\') || !matches!(self.bump(), Some('u' | 'U')) {
                return Err(BundleError::InvalidEscape(self.line, escape));
            }
            let low = self.read_hex4(escape)?;
            if !(0xdc00..0xe000).contains(&low) {
                return Err(BundleError::InvalidEscape(self.line, escape));
            }
            let code = 0x10000 + ((high - 0xd800) << 10) + (low - 0xdc00);
            return char::from_u32(code).ok_or(BundleError::InvalidEscape(self.line, escape));
        }
        char::from_u32(high).ok_or(BundleError::InvalidEscape(self.line, escape))
    }
}

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '$')
}
