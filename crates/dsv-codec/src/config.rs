//! Format configuration shared by the read and write paths.

use serde::{Deserialize, Serialize};

use crate::error::{DsvError, Result};

/// Immutable format configuration: delimiter, enclosure, header flag.
///
/// Both the delimiter and the enclosure must be exactly one character;
/// construction fails before any I/O otherwise. The default configuration
/// is comma-delimited, double-quote enclosed, no header line.
///
/// A delimiter equal to the enclosure is not rejected, but such a
/// configuration cannot be parsed unambiguously and is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Field separator character.
    pub delimiter: char,
    /// Quoting character wrapping fields that contain the delimiter,
    /// the enclosure itself, or a line terminator.
    pub enclosure: char,
    /// Whether the first physical line is a header naming each column.
    pub has_header: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            enclosure: '"',
            has_header: false,
        }
    }
}

impl FormatConfig {
    /// Build a configuration from string inputs, validating that the
    /// delimiter and enclosure are each exactly one character.
    pub fn new(delimiter: &str, enclosure: &str, has_header: bool) -> Result<Self> {
        Ok(Self {
            delimiter: single_char(delimiter).ok_or_else(|| DsvError::InvalidDelimiter {
                value: delimiter.to_string(),
            })?,
            enclosure: single_char(enclosure).ok_or_else(|| DsvError::InvalidEnclosure {
                value: enclosure.to_string(),
            })?,
            has_header,
        })
    }

    /// Set the delimiter, validating that it is a single character.
    pub fn with_delimiter(mut self, delimiter: &str) -> Result<Self> {
        self.delimiter = single_char(delimiter).ok_or_else(|| DsvError::InvalidDelimiter {
            value: delimiter.to_string(),
        })?;
        Ok(self)
    }

    /// Set the enclosure, validating that it is a single character.
    pub fn with_enclosure(mut self, enclosure: &str) -> Result<Self> {
        self.enclosure = single_char(enclosure).ok_or_else(|| DsvError::InvalidEnclosure {
            value: enclosure.to_string(),
        })?;
        Ok(self)
    }

    /// Enable or disable the header line.
    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }
}

/// Return the sole character of `value`, or `None` if its character count
/// is not exactly one.
fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(first)
}
