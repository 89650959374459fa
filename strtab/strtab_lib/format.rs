//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Placeholder extraction and argument substitution
//!
//! Templates use printf-like placeholders: `%` followed by an optional
//! 1-based position `N$` and one of the type specifiers `@`, `d` or `f`.
//! All arguments arrive already converted to strings, so the specifier only
//! matters for recognizing the token.
//!
//! Substitution records where each argument landed in the output, so callers
//! can style the substituted spans afterwards. Ranges are byte offsets into
//! the output string; [`ArgumentRange::utf16_range`] converts them for
//! toolkits that count UTF-16 code units.
//!
//! [`format_printf`] is the printf-style variant used for plural variants:
//! it also turns `%%` into a single `%`. The other functions leave `%%`
//! untouched.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%(?:(\d+)\$)?[@df]").expect("placeholder pattern is valid")
});

static PRINTF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%%|%(?:(\d+)\$)?[@df]").expect("printf pattern is valid")
});

/// Argument index and the byte range it occupies in a string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgumentRange {
    /// 0-based argument index
    pub index: usize,
    /// Byte range in the template (placeholders) or output (substitutions)
    pub range: Range<usize>,
}

impl ArgumentRange {
    /// Length of the range in bytes
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Whether the range is empty
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// The same range counted in UTF-16 code units of `text`
    pub fn utf16_range(&self, text: &str) -> Option<Range<usize>> {
        let before = text.get(..self.range.start)?;
        let inside = text.get(self.range.clone())?;
        let start = before.encode_utf16().count();
        Some(start..start + inside.encode_utf16().count())
    }
}

/// A substituted string with the ranges of its arguments
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formatted {
    /// The resulting text
    pub text: String,
    /// One entry per placeholder, ascending by start offset
    pub ranges: Vec<ArgumentRange>,
}

impl Formatted {
    /// The text covered by a range
    pub fn argument_text(&self, range: &ArgumentRange) -> Option<&str> {
        self.text.get(range.range.clone())
    }
}

/// Error type for substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A placeholder refers to an argument that was not supplied
    MissingArgument { index: usize, supplied: usize },
    /// A placeholder range is out of order or outside the template
    InvalidRange(Range<usize>),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::MissingArgument { index, supplied } => write!(
                f,
                "argument {} referenced but only {} supplied",
                index + 1,
                supplied
            ),
            FormatError::InvalidRange(range) => {
                write!(f, "invalid placeholder range {}..{}", range.start, range.end)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Find the placeholders of a template
///
/// A placeholder without an explicit position takes the ordinal of the
/// placeholder among all placeholders seen so far. The result is ordered by
/// position in the template.
pub fn extract_placeholders(template: &str) -> Vec<ArgumentRange> {
    let mut result = Vec::new();
    let mut ordinal = 0;

    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        let index = match caps.get(1) {
            Some(pos) => match pos.as_str().parse::<usize>() {
                Ok(n) if n > 0 => n - 1,
                // "%0$@" and overflowing positions are literal text
                _ => continue,
            },
            None => ordinal,
        };
        result.push(ArgumentRange {
            index,
            range: whole.range(),
        });
        ordinal += 1;
    }

    result.sort_by_key(|ph| ph.range.start);
    result
}

/// Whether a template contains at least one placeholder
pub fn has_placeholders(template: &str) -> bool {
    !extract_placeholders(template).is_empty()
}

/// Replace each placeholder with its argument
///
/// `placeholders` must be ordered and non-overlapping, as returned by
/// [`extract_placeholders`]. An argument used by several placeholders gets
/// one range per use.
pub fn substitute<S: AsRef<str>>(
    template: &str,
    placeholders: &[ArgumentRange],
    arguments: &[S],
) -> Result<Formatted, FormatError> {
    let mut text = String::with_capacity(template.len());
    let mut ranges = Vec::with_capacity(placeholders.len());
    let mut current = 0;

    for ph in placeholders {
        let literal = template
            .get(current..ph.range.start)
            .ok_or_else(|| FormatError::InvalidRange(ph.range.clone()))?;
        text.push_str(literal);

        let argument = arguments
            .get(ph.index)
            .ok_or(FormatError::MissingArgument {
                index: ph.index,
                supplied: arguments.len(),
            })?
            .as_ref();

        let start = text.len();
        text.push_str(argument);
        ranges.push(ArgumentRange {
            index: ph.index,
            range: start..text.len(),
        });
        current = ph.range.end;
    }

    let trailing = template
        .get(current..)
        .ok_or(FormatError::InvalidRange(current..template.len()))?;
    text.push_str(trailing);

    Ok(Formatted { text, ranges })
}

/// Extract and substitute in one step
pub fn format_template<S: AsRef<str>>(
    template: &str,
    arguments: &[S],
) -> Result<Formatted, FormatError> {
    substitute(template, &extract_placeholders(template), arguments)
}

/// Substitute printf-style, collapsing `%%` to `%`
///
/// Placeholder numbering matches [`extract_placeholders`]; an escaped `%%`
/// is not a placeholder and does not advance the ordinal.
pub fn format_printf<S: AsRef<str>>(
    template: &str,
    arguments: &[S],
) -> Result<Formatted, FormatError> {
    let mut text = String::with_capacity(template.len());
    let mut ranges = Vec::new();
    let mut current = 0;
    let mut ordinal = 0;

    for caps in PRINTF_RE.captures_iter(template) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };

        if whole.as_str() == "%%" {
            text.push_str(&template[current..whole.start()]);
            text.push('%');
            current = whole.end();
            continue;
        }

        let index = match caps.get(1) {
            Some(pos) => match pos.as_str().parse::<usize>() {
                Ok(n) if n > 0 => n - 1,
                _ => continue,
            },
            None => ordinal,
        };
        ordinal += 1;

        let argument = arguments
            .get(index)
            .ok_or(FormatError::MissingArgument {
                index,
                supplied: arguments.len(),
            })?
            .as_ref();

        text.push_str(&template[current..whole.start()]);
        let start = text.len();
        text.push_str(argument);
        ranges.push(ArgumentRange {
            index,
            range: start..text.len(),
        });
        current = whole.end();
    }

    text.push_str(&template[current..]);
    Ok(Formatted { text, ranges })
}
