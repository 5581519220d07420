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

//! Parser and serializer for the Gettext PO/POT text format.
//!
//! The format pairs an original string (`msgid`) with zero or more
//! translated variants (`msgstr`, or `msgstr[N]` for plural forms).
//! Long strings are split over continuation lines, each a quoted
//! string, which belong to the preceding keyword. The escape syntax
//! inside the quotes follows C.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Enumerate;
use std::str::Lines;

/// Upper bound on `msgstr[N]` indices. The largest nplurals value in
/// GNU's plural-forms table is 6 (Arabic).
const MAX_PLURAL_FORMS: usize = 8;

/// A single entry from a PO catalog.
///
/// Equality and hashing consider the `msgid` only: within one catalog
/// the `msgid` is the key of the entry.
#[derive(Clone, Debug, Default)]
pub struct PoEntry {
    /// Disambiguation context (`msgctxt`), if any.
    pub msgctxt: Option<String>,
    /// The original string.
    pub msgid: String,
    /// The plural form of the original string, if any.
    pub msgid_plural: Option<String>,
    /// Translated variants, indexed by plural form. Empty or a single
    /// element for singular entries.
    pub msgstr: Vec<String>,
}

impl PoEntry {
    /// True for the catalog header, the entry with an empty `msgid`.
    ///
    /// The header carries catalog metadata in its `msgstr` and must
    /// never be treated as a translatable string.
    pub fn is_header(&self) -> bool {
        self.msgid.is_empty() && self.msgctxt.is_none()
    }
}

impl PartialEq for PoEntry {
    fn eq(&self, other: &Self) -> bool {
        self.msgid == other.msgid
    }
}

impl Eq for PoEntry {}

impl Hash for PoEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.msgid.hash(state);
    }
}

/// Error produced when PO text is malformed.
///
/// Every variant names the 1-based line number and the offending line
/// so the operator can find the problem in the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoParseError {
    /// A line that fits no PO construct at this point.
    Unexpected { lineno: usize, line: String },
    /// A keyword that is not followed by a quoted string.
    ExpectedString { lineno: usize, line: String },
    /// A quoted string with no closing quote.
    UnterminatedString { lineno: usize, line: String },
    /// A `msgstr[N]` index that is not a number.
    InvalidPluralIndex { lineno: usize, line: String },
}

impl fmt::Display for PoParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoParseError::Unexpected { lineno, line } => {
                write!(f, "line {lineno}: unexpected content {line:?}")
            }
            PoParseError::ExpectedString { lineno, line } => {
                write!(f, "line {lineno}: expected quoted string in {line:?}")
            }
            PoParseError::UnterminatedString { lineno, line } => {
                write!(f, "line {lineno}: unterminated string in {line:?}")
            }
            PoParseError::InvalidPluralIndex { lineno, line } => {
                write!(f, "line {lineno}: invalid msgstr index in {line:?}")
            }
        }
    }
}

impl std::error::Error for PoParseError {}

/// Parse PO text into a lazy sequence of entries.
///
/// Entries are yielded in source order. Comment lines (`#`, `#.`,
/// `#:`, `#,` and friends) are skipped. After the first error the
/// iterator is fused: no further entries are produced.
pub fn parse_entries(text: &str) -> PoEntries<'_> {
    PoEntries {
        lines: text.lines().enumerate(),
        peeked: None,
        failed: false,
    }
}

/// Parse PO text into the list of translatable entries.
///
/// Convenience wrapper around [`parse_entries`] which collects the
/// whole catalog and drops the header entry.
pub fn parse_catalog(text: &str) -> Result<Vec<PoEntry>, PoParseError> {
    let mut entries = Vec::new();
    for entry in parse_entries(text) {
        let entry = entry?;
        if !entry.is_header() {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Iterator over the entries of a PO document. Created by
/// [`parse_entries`].
#[derive(Debug)]
pub struct PoEntries<'a> {
    lines: Enumerate<Lines<'a>>,
    peeked: Option<(usize, &'a str)>,
    failed: bool,
}

impl<'a> PoEntries<'a> {
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        self.peeked.take().or_else(|| self.lines.next())
    }

    fn peek_line(&mut self) -> Option<(usize, &'a str)> {
        if self.peeked.is_none() {
            self.peeked = self.lines.next();
        }
        self.peeked
    }

    /// Skip blank lines and comments between entries.
    fn skip_decoration(&mut self) {
        while let Some((_, line)) = self.peek_line() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                self.next_line();
            } else {
                break;
            }
        }
    }

    /// Read the string value following a keyword, concatenating any
    /// continuation lines.
    fn read_string(&mut self, lineno: usize, rest: &str, raw: &str) -> Result<String, PoParseError> {
        let rest = rest.trim();
        if !rest.starts_with('"') {
            return Err(PoParseError::ExpectedString {
                lineno: lineno + 1,
                line: raw.trim().to_string(),
            });
        }
        let mut value = unquote(lineno, rest)?;
        while let Some((continuation_lineno, line)) = self.peek_line() {
            let line = line.trim();
            if !line.starts_with('"') {
                break;
            }
            self.next_line();
            value.push_str(&unquote(continuation_lineno, line)?);
        }
        Ok(value)
    }

    fn parse_entry(&mut self) -> Result<Option<PoEntry>, PoParseError> {
        self.skip_decoration();

        let mut entry = PoEntry::default();
        let mut saw_msgid = false;
        let mut last_lineno = 0;

        loop {
            let Some((lineno, raw)) = self.peek_line() else {
                break;
            };
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                // A blank line or a comment for the following entry
                // ends this one.
                break;
            }

            let (keyword, rest) = split_keyword(line);
            match keyword {
                "msgctxt" | "msgid" if saw_msgid => break,
                "msgctxt" => {
                    self.next_line();
                    entry.msgctxt = Some(self.read_string(lineno, rest, raw)?);
                }
                "msgid" => {
                    self.next_line();
                    entry.msgid = self.read_string(lineno, rest, raw)?;
                    saw_msgid = true;
                }
                "msgid_plural" if saw_msgid => {
                    self.next_line();
                    entry.msgid_plural = Some(self.read_string(lineno, rest, raw)?);
                }
                "msgstr" if saw_msgid => {
                    self.next_line();
                    entry.msgstr.push(self.read_string(lineno, rest, raw)?);
                }
                keyword if saw_msgid && keyword.starts_with("msgstr[") && keyword.ends_with(']') => {
                    // GNU plural rules top out well under MAX_PLURAL_FORMS;
                    // anything larger is garbage, not a catalog, and must
                    // not drive an allocation.
                    let index: usize = keyword["msgstr[".len()..keyword.len() - 1]
                        .parse()
                        .ok()
                        .filter(|&index| index < MAX_PLURAL_FORMS)
                        .ok_or_else(|| PoParseError::InvalidPluralIndex {
                            lineno: lineno + 1,
                            line: line.to_string(),
                        })?;
                    self.next_line();
                    let value = self.read_string(lineno, rest, raw)?;
                    if entry.msgstr.len() <= index {
                        entry.msgstr.resize(index + 1, String::new());
                    }
                    entry.msgstr[index] = value;
                }
                _ => {
                    return Err(PoParseError::Unexpected {
                        lineno: lineno + 1,
                        line: line.to_string(),
                    });
                }
            }
            last_lineno = lineno;
        }

        if !saw_msgid {
            // Either clean end of input, or a dangling msgctxt with
            // no msgid behind it.
            if entry.msgctxt.is_some() {
                return Err(PoParseError::Unexpected {
                    lineno: last_lineno + 1,
                    line: String::from("msgctxt without msgid"),
                });
            }
            return Ok(None);
        }

        Ok(Some(entry))
    }
}

impl Iterator for PoEntries<'_> {
    type Item = Result<PoEntry, PoParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.parse_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Serialize entries back to PO syntax.
///
/// Parsing the result yields the same entries in the same order, so
/// set and order of the non-empty msgids survive a round trip.
pub fn write_po(entries: &[PoEntry]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if let Some(msgctxt) = &entry.msgctxt {
            out.push_str(&format!("msgctxt \"{}\"\n", po_escape(msgctxt)));
        }
        out.push_str(&format!("msgid \"{}\"\n", po_escape(&entry.msgid)));
        if let Some(plural) = &entry.msgid_plural {
            out.push_str(&format!("msgid_plural \"{}\"\n", po_escape(plural)));
        }
        if entry.msgid_plural.is_some() || entry.msgstr.len() > 1 {
            for (index, variant) in entry.msgstr.iter().enumerate() {
                out.push_str(&format!("msgstr[{index}] \"{}\"\n", po_escape(variant)));
            }
        } else {
            let variant = entry.msgstr.first().map(String::as_str).unwrap_or("");
            out.push_str(&format!("msgstr \"{}\"\n", po_escape(variant)));
        }
    }
    out
}

/// Split a line into its leading keyword and the remainder.
fn split_keyword(line: &str) -> (&str, &str) {
    match line.find(|c: char| c == '"' || c.is_whitespace()) {
        Some(i) => (&line[..i], &line[i..]),
        None => (line, ""),
    }
}

/// Decode the quoted strings starting at the first character of `s`.
///
/// Several string tokens may share one line; GNU gettext concatenates
/// adjacent tokens regardless of line breaks, and so do we. Anything
/// after the last closing quote that is not another token is an
/// error.
fn unquote(lineno: usize, s: &str) -> Result<String, PoParseError> {
    let mut out = String::new();
    let mut rest = s;
    loop {
        debug_assert!(rest.starts_with('"'));
        let inner = &rest[1..];

        let mut close = None;
        let mut escaped = false;
        for (i, c) in inner.char_indices() {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '"' => {
                    close = Some(i);
                    break;
                }
                _ => {}
            }
        }
        let Some(close) = close else {
            return Err(PoParseError::UnterminatedString {
                lineno: lineno + 1,
                line: s.to_string(),
            });
        };
        out.push_str(&decode_escapes(&inner[..close]));

        let after = inner[close + 1..].trim_start();
        if after.is_empty() {
            return Ok(out);
        }
        if !after.starts_with('"') {
            return Err(PoParseError::Unexpected {
                lineno: lineno + 1,
                line: s.to_string(),
            });
        }
        rest = after;
    }
}

/// Decode C-style escape sequences. Unknown escapes are kept
/// verbatim, matching what GNU msgfmt tolerates.
pub(crate) fn decode_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Encode a string for a PO quoted literal. Inverse of
/// [`decode_escapes`] for the escapes it produces.
fn po_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out
}
