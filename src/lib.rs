// Copyright 2026 The i18n-stringdefs Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Helpers for generating stringdefs from translatable source strings.
//!
//! A stringdefs file is a generated C++ source file which lists every
//! translatable string of a project as static data, so that Qt
//! Linguist and the Gettext tools can pick the strings up. The crate
//! scans source files for translation-marker calls such as
//! `_("...")`, parses Gettext PO/POT catalogs, and emits the
//! definitions through the `i18n-stringdefs` binary.
//!
//! Everything runs as one synchronous batch: read the inputs, render
//! the output in memory, write it once, exit.

pub mod extract;
pub mod po;
pub mod stringdefs;

pub use extract::{scan_files, ExtractedString, ScanResult, Scanner};
pub use po::{parse_catalog, parse_entries, PoEntry, PoParseError};
pub use stringdefs::EmitterConfig;

/// Merge a scan result with the msgids of a parsed catalog.
///
/// Scanned strings come first, in file-then-occurrence order,
/// followed by the catalog msgids in catalog order. The PO header
/// entry is filtered out here; empty strings and duplicates are the
/// emitter's business.
///
/// # Examples
///
/// ```
/// use i18n_stringdefs::{gather_strings, ExtractedString, PoEntry, ScanResult};
///
/// let scan = ScanResult {
///     strings: vec![ExtractedString {
///         file: "main.cpp".into(),
///         lineno: 10,
///         text: String::from("Loading"),
///     }],
///     warnings: vec![],
/// };
/// let entry = PoEntry {
///     msgid: String::from("Saving"),
///     ..PoEntry::default()
/// };
/// assert_eq!(gather_strings(&scan, &[entry]), vec!["Loading", "Saving"]);
/// ```
pub fn gather_strings<'a>(scan: &'a ScanResult, catalog: &'a [PoEntry]) -> Vec<&'a str> {
    scan.strings
        .iter()
        .map(|s| s.text.as_str())
        .chain(
            catalog
                .iter()
                .filter(|entry| !entry.is_header())
                .map(|entry| entry.msgid.as_str()),
        )
        .collect()
}
