//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! posixutils-strtab library
//!
//! This library provides a localized string table engine:
//! - strmap: base bundle to binary mapping compilation
//! - strfmt: string lookup, argument formatting and pluralization

pub mod strtab_lib;
