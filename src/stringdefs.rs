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

//! Emitter for the generated stringdefs file.
//!
//! The output is a C++ source file holding one
//! `QT_TRANSLATE_NOOP("context", "...")` definition per string, so Qt
//! Linguist picks the strings up without them being referenced
//! anywhere else. The file is rendered fully in memory and written in
//! one step; a failure mid-run never leaves a partial file behind.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Where and how to emit the generated definitions.
///
/// There is no default output location: callers decide where the
/// file goes.
#[derive(Clone, Debug)]
pub struct EmitterConfig {
    /// Path of the generated file.
    pub output: PathBuf,
    /// Translation context recorded in each definition.
    pub context: String,
    /// Name of the generated array.
    pub array_name: String,
    /// Drop repeated strings, keeping the first occurrence.
    pub dedup: bool,
}

impl EmitterConfig {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        EmitterConfig {
            output: output.into(),
            context: String::from("core"),
            array_name: String::from("translated_strings"),
            dedup: true,
        }
    }
}

/// Render the full generated file.
///
/// Empty strings never appear in the output; they are the PO header
/// sentinel, not translatable text. The result depends only on the
/// inputs, so repeated runs produce byte-identical files.
pub fn render<'a>(config: &EmitterConfig, strings: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    out.push_str("#include <QtGlobal>\n");
    out.push_str("// Automatically generated by i18n-stringdefs. Do not edit.\n");
    out.push_str("#ifdef __GNUC__\n");
    out.push_str("#define UNUSED __attribute__((unused))\n");
    out.push_str("#else\n");
    out.push_str("#define UNUSED\n");
    out.push_str("#endif\n");
    let _ = writeln!(out, "static const char UNUSED *{}[] = {{", config.array_name);

    let mut seen = HashSet::new();
    for string in strings {
        if string.is_empty() {
            continue;
        }
        if config.dedup && !seen.insert(string) {
            continue;
        }
        let _ = writeln!(
            out,
            "QT_TRANSLATE_NOOP(\"{}\", \"{}\"),",
            config.context,
            cpp_escape(string)
        );
    }

    out.push_str("};\n");
    out
}

/// Render and write the generated file in a single step.
///
/// Parent directories are created as needed. A write failure is fatal
/// to the caller; nothing has been written before the content is
/// complete.
pub fn write<'a>(config: &EmitterConfig, strings: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let contents = render(config, strings);
    if let Some(parent) = config.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }
    }
    fs::write(&config.output, contents)
        .with_context(|| format!("Writing string definitions to {}", config.output.display()))?;
    Ok(())
}

/// Escape a string for use inside a C++ double-quoted literal.
///
/// Control characters without a named escape become fixed-width octal
/// (`\001`): unlike `\x`, an octal escape ends after three digits, so
/// a following `b` or `f` in the payload cannot extend the escape.
pub fn cpp_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use pretty_assertions::assert_eq;

    fn test_config() -> EmitterConfig {
        EmitterConfig::new("stringdefs.cpp")
    }

    #[test]
    fn test_render_layout() {
        let config = test_config();
        assert_eq!(
            render(&config, ["Loading block index...", "Done loading"]),
            "#include <QtGlobal>\n\
             // Automatically generated by i18n-stringdefs. Do not edit.\n\
             #ifdef __GNUC__\n\
             #define UNUSED __attribute__((unused))\n\
             #else\n\
             #define UNUSED\n\
             #endif\n\
             static const char UNUSED *translated_strings[] = {\n\
             QT_TRANSLATE_NOOP(\"core\", \"Loading block index...\"),\n\
             QT_TRANSLATE_NOOP(\"core\", \"Done loading\"),\n\
             };\n"
        );
    }

    #[test]
    fn test_render_skips_empty_sentinel() {
        let config = test_config();
        let output = render(&config, ["", "real"]);
        assert!(!output.contains("\"\"),"));
        assert!(output.contains("QT_TRANSLATE_NOOP(\"core\", \"real\"),"));
    }

    #[test]
    fn test_render_dedup_keeps_first_occurrence() {
        let config = test_config();
        let output = render(&config, ["b", "a", "b"]);
        assert_eq!(output.matches("\"b\"),").count(), 1);
        let a = output.find("\"a\"),").unwrap();
        let b = output.find("\"b\"),").unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_render_keep_duplicates() {
        let mut config = test_config();
        config.dedup = false;
        let output = render(&config, ["x", "x"]);
        assert_eq!(output.matches("\"x\"),").count(), 2);
    }

    #[test]
    fn test_render_custom_context_and_array() {
        let mut config = test_config();
        config.context = String::from("wallet");
        config.array_name = String::from("wallet_strings");
        let output = render(&config, ["hi"]);
        assert!(output.contains("static const char UNUSED *wallet_strings[] = {"));
        assert!(output.contains("QT_TRANSLATE_NOOP(\"wallet\", \"hi\"),"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = test_config();
        let strings = ["one", "two", "three"];
        assert_eq!(render(&config, strings), render(&config, strings));
    }

    #[test]
    fn test_cpp_escape() {
        assert_eq!(cpp_escape("plain"), "plain");
        assert_eq!(cpp_escape("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(cpp_escape("back\\slash"), "back\\\\slash");
        assert_eq!(cpp_escape("line\nbreak\ttab"), "line\\nbreak\\ttab");
        assert_eq!(cpp_escape("bell\u{7}"), "bell\\007");
    }

    #[test]
    fn test_cpp_escape_control_char_before_hex_digit() {
        // An octal escape ends after three digits, so a hex digit
        // right after a control character stays part of the payload.
        // With \x01 the lexer would read the whole run as one
        // character and 0x01 followed by 'b' would collide with 0x1b.
        assert_eq!(cpp_escape("\u{1}b"), "\\001b");
        assert_eq!(cpp_escape("\u{1b}"), "\\033");
        assert_ne!(cpp_escape("\u{1}b"), cpp_escape("\u{1b}"));
    }

    #[test]
    fn test_write_creates_parent_directories() -> Result<()> {
        let tmpdir = tempfile::tempdir().context("Could not create temporary directory")?;
        let mut config = test_config();
        config.output = tmpdir.path().join("src").join("qt").join("strings.cpp");

        write(&config, ["content"])?;

        let written = std::fs::read_to_string(&config.output)?;
        assert_eq!(written, render(&config, ["content"]));
        Ok(())
    }

    #[test]
    fn test_write_twice_is_idempotent() -> Result<()> {
        let tmpdir = tempfile::tempdir().context("Could not create temporary directory")?;
        let mut config = test_config();
        config.output = tmpdir.path().join("strings.cpp");

        write(&config, ["same", "input"])?;
        let first = std::fs::read(&config.output)?;
        write(&config, ["same", "input"])?;
        let second = std::fs::read(&config.output)?;
        assert_eq!(first, second);
        Ok(())
    }
}
