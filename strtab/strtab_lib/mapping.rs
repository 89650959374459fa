//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Binary string mapping table reader and writer
//!
//! The mapping table assigns stable integer IDs to string keys and to plural
//! key prefixes. It is generated at build time from the base language bundle
//! and shipped next to the bundles. The file has no header and no version
//! field; the read order is the format:
//!
//! ```text
//! i32 N                         simple entry count
//! N x { i32 id, str key, i32 has_arguments }
//! i32 M                         plural entry count
//! M x { i32 id, str key_prefix }
//!
//! str = i32 byte length, then that many bytes of UTF-8
//! ```
//!
//! All integers are 4 bytes in native byte order.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::io::{self, Cursor, Read, Write};
use std::path::Path;

use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use tracing::info;

use crate::strtab_lib::format::has_placeholders;
use crate::strtab_lib::plural::PluralForm;

/// A simple (non-plural) string entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    /// Stable string ID
    pub id: u32,
    /// Bundle key
    pub key: String,
    /// Whether the value contains argument placeholders
    pub has_arguments: bool,
}

/// A plural string group entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralEntry {
    /// Stable plural group ID
    pub id: u32,
    /// Bundle key prefix; the form suffix is appended on lookup
    pub key_prefix: String,
}

/// Error type for mapping table operations
#[derive(Debug)]
pub enum MappingError {
    /// I/O error
    Io(io::Error),
    /// Read past the end of the data
    Truncated { offset: u64, needed: u64 },
    /// A count, length or ID was negative
    Negative {
        offset: u64,
        field: &'static str,
        value: i32,
    },
    /// The same ID appears twice in one list
    DuplicateId { list: &'static str, id: u32 },
    /// A value does not fit the 4-byte signed field
    TooLarge { field: &'static str, value: usize },
    /// String is not valid UTF-8
    InvalidUtf8(std::string::FromUtf8Error),
}

impl std::fmt::Display for MappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingError::Io(e) => write!(f, "I/O error: {}", e),
            MappingError::Truncated { offset, needed } => write!(
                f,
                "truncated mapping: {} bytes needed at offset {}",
                needed, offset
            ),
            MappingError::Negative {
                offset,
                field,
                value,
            } => write!(f, "negative {} {} at offset {}", field, value, offset),
            MappingError::DuplicateId { list, id } => {
                write!(f, "duplicate {} id {}", list, id)
            }
            MappingError::TooLarge { field, value } => {
                write!(f, "{} {} does not fit in 32 bits", field, value)
            }
            MappingError::InvalidUtf8(e) => write!(f, "invalid UTF-8: {}", e),
        }
    }
}

impl std::error::Error for MappingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MappingError::Io(e) => Some(e),
            MappingError::InvalidUtf8(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MappingError {
    fn from(e: io::Error) -> Self {
        MappingError::Io(e)
    }
}

impl From<std::string::FromUtf8Error> for MappingError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        MappingError::InvalidUtf8(e)
    }
}

/// Parsed string mapping table
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    strings: Vec<StringEntry>,
    plurals: Vec<PluralEntry>,
    string_ids: HashMap<String, u32>,
    plural_ids: HashMap<String, u32>,
}

impl MappingTable {
    /// Build a table from entry lists, validating ID uniqueness
    pub fn new(
        strings: Vec<StringEntry>,
        plurals: Vec<PluralEntry>,
    ) -> Result<Self, MappingError> {
        let mut seen = HashSet::new();
        for entry in &strings {
            if !seen.insert(entry.id) {
                return Err(MappingError::DuplicateId {
                    list: "string",
                    id: entry.id,
                });
            }
        }
        seen.clear();
        for entry in &plurals {
            if !seen.insert(entry.id) {
                return Err(MappingError::DuplicateId {
                    list: "plural",
                    id: entry.id,
                });
            }
        }

        let mut string_ids = HashMap::with_capacity(strings.len());
        for entry in &strings {
            string_ids.entry(entry.key.clone()).or_insert(entry.id);
        }
        let mut plural_ids = HashMap::with_capacity(plurals.len());
        for entry in &plurals {
            plural_ids.entry(entry.key_prefix.clone()).or_insert(entry.id);
        }

        Ok(MappingTable {
            strings,
            plurals,
            string_ids,
            plural_ids,
        })
    }

    /// Read a mapping table from bytes
    pub fn read(data: &[u8]) -> Result<Self, MappingError> {
        let mut reader = Reader::new(data);

        let nstrings = reader.read_count("string count")?;
        let mut strings = Vec::with_capacity(nstrings.min(data.len() / 12));
        for _ in 0..nstrings {
            let id = reader.read_id()?;
            let key = reader.read_string()?;
            let has_arguments = reader.read_i32()? != 0;
            strings.push(StringEntry {
                id,
                key,
                has_arguments,
            });
        }

        let nplurals = reader.read_count("plural count")?;
        let mut plurals = Vec::with_capacity(nplurals.min(data.len() / 8));
        for _ in 0..nplurals {
            let id = reader.read_id()?;
            let key_prefix = reader.read_string()?;
            plurals.push(PluralEntry { id, key_prefix });
        }

        Self::new(strings, plurals)
    }

    /// Read a mapping table from a reader
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self, MappingError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::read(&data)
    }

    /// Load a mapping table from a file
    pub fn load(path: &Path) -> Result<Self, MappingError> {
        let table = Self::read_from(File::open(path)?)?;
        info!(
            path = %path.display(),
            strings = table.strings.len(),
            plurals = table.plurals.len(),
            "loaded string mapping"
        );
        Ok(table)
    }

    /// Derive a table from a base language dictionary
    ///
    /// Keys ending in a plural form suffix are grouped by prefix into plural
    /// entries, everything else becomes a simple entry. IDs are assigned in
    /// ascending key order within each list.
    pub fn from_base_dictionary(dict: &HashMap<String, String>) -> Result<Self, MappingError> {
        let mut simple: BTreeMap<&str, bool> = BTreeMap::new();
        let mut prefixes: BTreeSet<&str> = BTreeSet::new();

        for (key, value) in dict {
            match PluralForm::strip_suffix(key) {
                Some((prefix, _)) => {
                    prefixes.insert(prefix);
                }
                None => {
                    simple.insert(key.as_str(), has_placeholders(value));
                }
            }
        }

        let strings = simple
            .into_iter()
            .enumerate()
            .map(|(i, (key, has_arguments))| {
                Ok(StringEntry {
                    id: to_id(i)?,
                    key: key.to_string(),
                    has_arguments,
                })
            })
            .collect::<Result<Vec<_>, MappingError>>()?;

        let plurals = prefixes
            .into_iter()
            .enumerate()
            .map(|(i, prefix)| {
                Ok(PluralEntry {
                    id: to_id(i)?,
                    key_prefix: prefix.to_string(),
                })
            })
            .collect::<Result<Vec<_>, MappingError>>()?;

        Self::new(strings, plurals)
    }

    /// Simple string entries, in file order
    pub fn strings(&self) -> &[StringEntry] {
        &self.strings
    }

    /// Plural group entries, in file order
    pub fn plurals(&self) -> &[PluralEntry] {
        &self.plurals
    }

    /// IDs of the simple entries flagged as having arguments
    pub fn argument_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.strings
            .iter()
            .filter(|e| e.has_arguments)
            .map(|e| e.id)
    }

    /// Look up the ID of a simple string key
    pub fn string_id(&self, key: &str) -> Option<u32> {
        self.string_ids.get(key).copied()
    }

    /// Look up the ID of a plural key prefix
    pub fn plural_id(&self, key_prefix: &str) -> Option<u32> {
        self.plural_ids.get(key_prefix).copied()
    }

    /// Write the table to a writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), MappingError> {
        let data = self.write_to_bytes()?;
        writer.write_all(&data)?;
        Ok(())
    }

    /// Write the table to bytes
    pub fn write_to_bytes(&self) -> Result<Vec<u8>, MappingError> {
        let mut data = Vec::new();

        data.write_i32::<NativeEndian>(to_i32("string count", self.strings.len())?)?;
        for entry in &self.strings {
            data.write_i32::<NativeEndian>(to_i32("string id", entry.id as usize)?)?;
            write_string(&mut data, &entry.key)?;
            data.write_i32::<NativeEndian>(i32::from(entry.has_arguments))?;
        }

        data.write_i32::<NativeEndian>(to_i32("plural count", self.plurals.len())?)?;
        for entry in &self.plurals {
            data.write_i32::<NativeEndian>(to_i32("plural id", entry.id as usize)?)?;
            write_string(&mut data, &entry.key_prefix)?;
        }

        Ok(data)
    }
}

fn to_i32(field: &'static str, value: usize) -> Result<i32, MappingError> {
    i32::try_from(value).map_err(|_| MappingError::TooLarge { field, value })
}

fn to_id(index: usize) -> Result<u32, MappingError> {
    Ok(to_i32("id", index)? as u32)
}

fn write_string(data: &mut Vec<u8>, s: &str) -> Result<(), MappingError> {
    data.write_i32::<NativeEndian>(to_i32("string length", s.len())?)?;
    data.extend_from_slice(s.as_bytes());
    Ok(())
}

/// Sequential reader over the mapping bytes
struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Reader {
            cursor: Cursor::new(data),
        }
    }

    fn remaining(&self) -> u64 {
        (self.cursor.get_ref().len() as u64).saturating_sub(self.cursor.position())
    }

    fn read_i32(&mut self) -> Result<i32, MappingError> {
        let offset = self.cursor.position();
        self.cursor
            .read_i32::<NativeEndian>()
            .map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => MappingError::Truncated { offset, needed: 4 },
                _ => MappingError::Io(e),
            })
    }

    fn read_non_negative(&mut self, field: &'static str) -> Result<i32, MappingError> {
        let offset = self.cursor.position();
        let value = self.read_i32()?;
        if value < 0 {
            return Err(MappingError::Negative {
                offset,
                field,
                value,
            });
        }
        Ok(value)
    }

    fn read_count(&mut self, field: &'static str) -> Result<usize, MappingError> {
        Ok(self.read_non_negative(field)? as usize)
    }

    fn read_id(&mut self) -> Result<u32, MappingError> {
        Ok(self.read_non_negative("id")? as u32)
    }

    fn read_string(&mut self) -> Result<String, MappingError> {
        let length = self.read_non_negative("string length")? as u64;
        let offset = self.cursor.position();
        if length > self.remaining() {
            return Err(MappingError::Truncated {
                offset,
                needed: length,
            });
        }

        let mut bytes = vec![0u8; length as usize];
        self.cursor.read_exact(&mut bytes)?;
        Ok(String::from_utf8(bytes)?)
    }
}
