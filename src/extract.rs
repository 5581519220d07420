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

//! Scanner for translation-marker calls in source files.
//!
//! The scanner looks for calls of a marker, `_("...")` by default,
//! and collects the literal string arguments. Adjacent literals
//! inside one call concatenate, as they do in C.

use std::fs;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use regex::Regex;

use crate::po::decode_escapes;

/// One marker occurrence found in a source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedString {
    /// The file the string was found in.
    pub file: PathBuf,
    /// 1-based line number of the marker call.
    pub lineno: usize,
    /// The decoded string argument.
    pub text: String,
}

/// Outcome of scanning a set of files.
///
/// `strings` are ordered by file, then by occurrence within the file.
/// `warnings` describe files that could not be read; they never abort
/// the scan.
#[derive(Clone, Debug, Default)]
pub struct ScanResult {
    pub strings: Vec<ExtractedString>,
    pub warnings: Vec<String>,
}

/// Compiled matcher for one marker keyword.
#[derive(Debug)]
pub struct Scanner {
    call: Regex,
    literal: Regex,
}

impl Scanner {
    /// Compile a scanner for `keyword`, e.g. `_` or `tr`.
    pub fn new(keyword: &str) -> Result<Scanner> {
        ensure!(
            !keyword.is_empty()
                && keyword
                    .chars()
                    .all(|c| c == '_' || c.is_ascii_alphanumeric()),
            "marker keyword must be a plain identifier, got {keyword:?}"
        );
        let pattern = format!(
            r#"(?sx)
            \b{keyword}                   # the marker itself
            \s*\(\s*                      # start of the call
            (?<literals>                  # one or more adjacent literals
                "(?:[^"\\]|\\.)*"
                (?:\s*"(?:[^"\\]|\\.)*")*
            )
            \s*\)                         # end of the call
            "#,
            keyword = regex::escape(keyword)
        );
        let call = Regex::new(&pattern).context("Compiling marker pattern")?;
        let literal = Regex::new(r#""((?:[^"\\]|\\.)*)""#).context("Compiling literal pattern")?;
        Ok(Scanner { call, literal })
    }

    /// Extract the marker arguments from one source text.
    ///
    /// Returns `(lineno, string)` pairs in occurrence order. Line
    /// numbers are 1-based and refer to the start of the call.
    pub fn extract_strings(&self, source: &str) -> Vec<(usize, String)> {
        // Offsets of each newline, used to turn byte offsets into
        // line numbers.
        let offsets = source
            .match_indices('\n')
            .map(|(offset, _)| offset)
            .collect::<Vec<_>>();

        let mut found = Vec::new();
        for captures in self.call.captures_iter(source) {
            let (Some(call), Some(literals)) = (captures.get(0), captures.name("literals")) else {
                continue;
            };
            let lineno = offsets.partition_point(|&offset| offset < call.start()) + 1;
            let text = self
                .literal
                .captures_iter(literals.as_str())
                .map(|c| decode_escapes(&c[1]))
                .collect::<String>();
            found.push((lineno, text));
        }
        found
    }
}

/// Scan all files matching the given glob patterns.
///
/// Patterns expand in the order given; within one pattern the matches
/// come back in the sorted order the `glob` crate guarantees, which
/// keeps the overall result deterministic. Unreadable files are
/// recorded as warnings and skipped.
pub fn scan_files(patterns: &[String], keyword: &str) -> Result<ScanResult> {
    let scanner = Scanner::new(keyword)?;
    let mut result = ScanResult::default();

    for pattern in patterns {
        let paths =
            glob::glob(pattern).with_context(|| format!("Invalid glob pattern {pattern:?}"))?;
        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    result.warnings.push(err.to_string());
                    continue;
                }
            };
            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(err) => {
                    result.warnings.push(format!("{}: {err}", path.display()));
                    continue;
                }
            };
            for (lineno, text) in scanner.extract_strings(&source) {
                result.strings.push(ExtractedString {
                    file: path.clone(),
                    lineno,
                    text,
                });
            }
        }
    }

    Ok(result)
}
