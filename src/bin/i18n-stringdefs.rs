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

//! Generate a stringdefs file from source files and PO catalogs.
//!
//! This program works like a small `xgettext`: it scans the given
//! source files for translation-marker calls such as `_("...")`,
//! optionally merges in the msgids of a PO/POT catalog produced by an
//! external extractor, and writes the collected strings as
//! `QT_TRANSLATE_NOOP` definitions to a generated C++ file.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use i18n_stringdefs::stringdefs::{self, EmitterConfig};
use i18n_stringdefs::{extract, gather_strings, po};

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Generate a stringdefs file from translatable strings")]
struct Args {
    /// Glob patterns selecting the source files to scan.
    #[arg(id = "src/*.cpp")]
    patterns: Vec<String>,

    /// PO or POT file whose msgids are added to the output; `-` reads
    /// from stdin.
    #[arg(long, value_name = "FILE")]
    po: Option<PathBuf>,

    /// Path of the generated file.
    #[arg(short, long, default_value = "stringdefs.cpp")]
    output: PathBuf,

    /// Name of the translation-marker call to look for.
    #[arg(long, default_value = "_")]
    keyword: String,

    /// Translation context recorded in each definition.
    #[arg(long, default_value = "core")]
    context: String,

    /// Name of the generated string array.
    #[arg(long, default_value = "translated_strings")]
    array_name: String,

    /// Emit every occurrence instead of deduplicating.
    #[arg(long)]
    keep_duplicates: bool,
}

fn read_po_input(path: &PathBuf) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Reading PO data from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.patterns.is_empty() && args.po.is_none() {
        bail!("Nothing to do: give source glob patterns, --po, or both");
    }

    let scan = extract::scan_files(&args.patterns, &args.keyword).context("Scanning sources")?;
    for warning in &scan.warnings {
        eprintln!("Warning: skipping {warning}");
    }

    let catalog = match &args.po {
        Some(path) => {
            let text = read_po_input(path)?;
            po::parse_catalog(&text).context("Parsing PO input")?
        }
        None => Vec::new(),
    };

    let config = EmitterConfig {
        output: args.output,
        context: args.context,
        array_name: args.array_name,
        dedup: !args.keep_duplicates,
    };
    stringdefs::write(&config, gather_strings(&scan, &catalog))?;

    Ok(())
}
