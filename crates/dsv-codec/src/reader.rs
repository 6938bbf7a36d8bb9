//! Streaming table reader.
//!
//! Opens a path, optionally consumes a header line, then yields one record
//! per physical line through the `Iterator` implementation. Records are
//! produced lazily, one per pull; the whole table is never materialized
//! unless the caller collects it.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use crate::config::FormatConfig;
use crate::error::{DsvError, Result};
use crate::grammar::parse_record;
use crate::record::Record;

/// Streaming DSV reader.
///
/// The underlying handle is held for the session's lifetime and released
/// deterministically: at clean end-of-input, on the first yielded error
/// (which also fuses the iterator), and on drop if the caller abandons the
/// sequence early.
#[derive(Debug)]
pub struct DsvReader {
    path: PathBuf,
    config: FormatConfig,
    reader: Option<BufReader<File>>,
    header: Option<Vec<String>>,
    /// 1-based physical line counter, including the header line.
    line: u64,
}

impl DsvReader {
    /// Open a path for reading.
    ///
    /// Preconditions are checked before any record is produced: the path
    /// must be non-empty, reference an existing regular file, and open
    /// successfully. With the header flag set, the first physical line is
    /// consumed and parsed as the header; a missing or empty first line
    /// fails with [`DsvError::HeaderNotFound`].
    ///
    /// Duplicate header column names collapse in each record's mapping:
    /// the rightmost column's value wins, and the record reports the
    /// deduplicated field count.
    pub fn open(path: impl AsRef<Path>, config: FormatConfig) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(DsvError::EmptyPath);
        }
        if !path.is_file() {
            return Err(DsvError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => DsvError::NotReadable {
                path: path.to_path_buf(),
            },
            _ => DsvError::OpenFailed {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        tracing::debug!(path = %path.display(), ?config, "opened table for reading");

        let mut reader = Self {
            path: path.to_path_buf(),
            config,
            reader: Some(BufReader::new(file)),
            header: None,
            line: 0,
        };
        if config.has_header {
            reader.read_header()?;
        }
        Ok(reader)
    }

    /// Column names from the header line, when the header flag is set.
    #[must_use]
    pub fn headers(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// The format configuration this session was opened with.
    #[must_use]
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Physical lines consumed so far, including the header line.
    #[must_use]
    pub fn lines_read(&self) -> u64 {
        self.line
    }

    /// Consume and parse the header from line 1.
    fn read_header(&mut self) -> Result<()> {
        let line = match self.next_physical_line()? {
            Some(line) if !line.is_empty() => line,
            _ => {
                self.release();
                return Err(DsvError::HeaderNotFound);
            }
        };
        let fields = parse_record(&line, &self.config).map_err(|e| {
            self.release();
            DsvError::malformed_record(1, e.to_string())
        })?;
        self.header = Some(fields);
        Ok(())
    }

    /// Read one physical line with its terminator stripped, advancing the
    /// line counter. Returns `None` at end-of-input and releases the
    /// handle at that point.
    fn next_physical_line(&mut self) -> Result<Option<String>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        let mut buf = String::new();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            self.release();
            return Ok(None);
        }
        self.line += 1;
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }

    /// Drop the handle; subsequent pulls see end-of-input.
    fn release(&mut self) {
        if self.reader.take().is_some() {
            tracing::debug!(
                path = %self.path.display(),
                lines = self.line,
                "released table handle"
            );
        }
    }

    /// Zip parsed fields with the active header, checking the count first.
    fn to_record(&self, fields: Vec<String>) -> Result<Record> {
        match &self.header {
            None => Ok(Record::Fields(fields)),
            Some(header) => {
                if fields.len() != header.len() {
                    return Err(DsvError::FieldCountMismatch {
                        line: self.line,
                        expected: header.len(),
                        actual: fields.len(),
                    });
                }
                let map: BTreeMap<String, String> =
                    header.iter().cloned().zip(fields).collect();
                Ok(Record::Named(map))
            }
        }
    }
}

impl Iterator for DsvReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.next_physical_line() {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    self.release();
                    return Some(Err(e));
                }
            };
            // Entirely empty lines are skipped; the counter still advanced.
            if line.is_empty() {
                continue;
            }
            let fields = match parse_record(&line, &self.config) {
                Ok(fields) => fields,
                Err(e) => {
                    let err = DsvError::malformed_record(self.line, e.to_string());
                    self.release();
                    return Some(Err(err));
                }
            };
            return Some(match self.to_record(fields) {
                Ok(record) => Ok(record),
                Err(e) => {
                    self.release();
                    Err(e)
                }
            });
        }
    }
}

/// Read every record from a path into memory.
///
/// This is a convenience function for small tables; prefer driving
/// [`DsvReader`] directly to stream large ones.
pub fn read_table(path: impl AsRef<Path>, config: &FormatConfig) -> Result<Vec<Record>> {
    DsvReader::open(path, *config)?.collect()
}
