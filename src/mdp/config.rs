// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Contains the implementation of the `MdpConfig` structure and its methods.

use std::fmt::{self, Display};
use std::fs::{read_to_string, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;

use super::parser::{self, MdpLine};
use super::value::MdpValue;
use crate::errors::{MdpError, WriteError};
use crate::PANIC_MESSAGE;

/// Width of the key field used when appending a new assignment.
const KEY_FIELD_WIDTH: usize = 28;

/// An mdp run-control configuration held as an ordered buffer of text lines.
///
/// The buffer is edited in place: changing the value of a parameter never
/// touches any other line, and formatting of the edited line (key text,
/// whitespace, inline comment) is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MdpConfig {
    lines: Vec<String>,
}

impl MdpConfig {
    /// Read an mdp configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MdpError> {
        let path = path.as_ref();
        let content =
            read_to_string(path).map_err(|_| MdpError::FileNotFound(Box::from(path)))?;

        Ok(Self::from_lines(
            content.lines().map(|line| line.to_owned()).collect(),
        ))
    }

    /// Construct an mdp configuration from a buffer of lines.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Get the lines of the configuration.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Get mutable access to the lines of the configuration.
    pub fn lines_mut(&mut self) -> &mut Vec<String> {
        &mut self.lines
    }

    /// Consume the configuration, returning its lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Get the raw value of a parameter, if it is present.
    /// Only the first matching assignment is considered.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match parser::classify(line) {
            MdpLine::Assignment(a) if a.key() == key => Some(a.value),
            _ => None,
        })
    }

    /// Set `key` to `value`.
    ///
    /// The first assignment of `key` is edited in place: only the value text
    /// changes, the key, the whitespace before the value and any inline
    /// comment are kept verbatim. Later duplicates of the key, if any, are
    /// left untouched. If the key is not present, a new canonically formatted
    /// line is appended at the end of the buffer.
    pub fn set(&mut self, key: &str, value: impl Into<MdpValue>) {
        let formatted = value.into().format();

        for line in self.lines.iter_mut() {
            let edited = match parser::classify(line) {
                MdpLine::Assignment(a) if a.key() == key => {
                    format!("{}={}{}{}", a.left, a.value_ws, formatted, a.comment)
                }
                _ => continue,
            };

            *line = edited;
            return;
        }

        self.lines
            .push(format!("{:<width$} = {}", key, formatted, width = KEY_FIELD_WIDTH));
    }

    /// Apply a mapping of parameter changes, in the mapping's iteration order.
    pub fn apply(&mut self, changes: &IndexMap<String, MdpValue>) {
        for (key, value) in changes {
            self.set(key, value.clone());
        }
    }

    /// Read parameter changes from a `key=value` overrides file and apply
    /// them to the configuration. Returns the parsed changes.
    ///
    /// Blank lines and lines starting with `#` or `;` are ignored. Each
    /// remaining line is split on its first `=`; the right-hand side is
    /// typed using `MdpValue::parse`. Malformed lines lacking `=` (or with
    /// an empty key) are silently skipped.
    pub fn apply_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<IndexMap<String, MdpValue>, MdpError> {
        let path = path.as_ref();
        let content =
            read_to_string(path).map_err(|_| MdpError::FileNotFound(Box::from(path)))?;

        let mut changes = IndexMap::new();
        for line in content.lines() {
            let stripped = line.trim();
            if stripped.is_empty() || stripped.starts_with(['#', ';']) {
                continue;
            }

            let Some((key, raw_value)) = stripped.split_once('=') else {
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                continue;
            }

            changes.insert(key.to_owned(), MdpValue::parse(raw_value));
        }

        self.apply(&changes);
        Ok(changes)
    }

    /// Write the configuration into a file.
    ///
    /// If the target file already exists, it is backed up unless
    /// overwriting is requested.
    pub fn write(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<(), WriteError> {
        let path = path.as_ref();

        if path.exists() {
            if !overwrite {
                log::warn!(
                    "Output mdp file '{}' already exists. Backing it up.",
                    path.to_str().expect(PANIC_MESSAGE)
                );
                backitup::backup(path)
                    .map_err(|_| WriteError::CouldNotBackupFile(Box::from(path)))?;
            } else {
                log::warn!(
                    "Output mdp file '{}' already exists. It will be overwritten as requested.",
                    path.to_str().expect(PANIC_MESSAGE)
                );
            }
        }

        let file =
            File::create(path).map_err(|_| WriteError::CouldNotCreateFile(Box::from(path)))?;
        let mut writer = BufWriter::new(file);

        for line in &self.lines {
            writeln!(writer, "{}", line)
                .map_err(|_| WriteError::CouldNotWriteLine(Box::from(path)))?;
        }

        Ok(())
    }
}

impl Display for MdpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
