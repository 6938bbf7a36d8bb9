//! Streaming table writer.
//!
//! Opens a path for output, optionally emits a header line, then appends
//! one line per supplied row, in exactly the order the rows arrive. No
//! reordering, deduplication, or buffering beyond the `BufWriter`.

use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::FormatConfig;
use crate::error::{DsvError, Result};
use crate::grammar::format_record;
use crate::record::Record;

/// Streaming DSV writer.
///
/// The handle is released by [`finish`](Self::finish), which consumes the
/// writer and surfaces flush errors, or on drop, where the `BufWriter`
/// flushes best-effort.
#[derive(Debug)]
pub struct DsvWriter {
    path: PathBuf,
    config: FormatConfig,
    writer: BufWriter<File>,
    /// 1-based physical line counter, including the header line.
    line: u64,
}

impl DsvWriter {
    /// Create or truncate a path for writing.
    ///
    /// Fails with [`DsvError::NotWritable`] when the destination directory
    /// is missing or not writable, and [`DsvError::OpenFailed`] for any
    /// other open failure.
    pub fn create(path: impl AsRef<Path>, config: FormatConfig) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(DsvError::EmptyPath);
        }
        if let Some(parent) = nonempty_parent(path)
            && !parent.is_dir()
        {
            return Err(DsvError::NotWritable {
                path: path.to_path_buf(),
            });
        }
        let file = File::create(path).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied | ErrorKind::NotFound => DsvError::NotWritable {
                path: path.to_path_buf(),
            },
            _ => DsvError::OpenFailed {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        tracing::debug!(path = %path.display(), ?config, "opened table for writing");
        Ok(Self {
            path: path.to_path_buf(),
            config,
            writer: BufWriter::new(file),
            line: 0,
        })
    }

    /// The format configuration this session was opened with.
    #[must_use]
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Physical lines emitted so far, including the header line.
    #[must_use]
    pub fn lines_written(&self) -> u64 {
        self.line
    }

    /// Serialize the header as the next physical line.
    ///
    /// A failed or short write (including `WriteZero`) fails with
    /// [`DsvError::WriteHeader`] carrying the line number.
    pub fn write_header<S: AsRef<str>>(&mut self, header: &[S]) -> Result<()> {
        self.line += 1;
        let line = self.line;
        self.append_line(header)
            .map_err(|source| DsvError::WriteHeader { line, source })
    }

    /// Serialize one row as the next physical line.
    pub fn write_row<S: AsRef<str>>(&mut self, row: &[S]) -> Result<()> {
        self.line += 1;
        let line = self.line;
        self.append_line(row)
            .map_err(|source| DsvError::WriteRow { line, source })
    }

    /// Consume a sequence of rows, appending each in order.
    pub fn write_rows<I, S>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<S>>,
        S: AsRef<str>,
    {
        for row in rows {
            self.write_row(&row)?;
        }
        Ok(())
    }

    /// Flush buffered output and release the handle.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        tracing::debug!(
            path = %self.path.display(),
            lines = self.line,
            "released table handle"
        );
        Ok(())
    }

    fn append_line<S: AsRef<str>>(&mut self, fields: &[S]) -> std::io::Result<()> {
        let mut line = format_record(fields, &self.config);
        line.push('\n');
        self.writer.write_all(line.as_bytes())
    }
}

/// The parent directory, ignoring the implicit empty parent of a bare
/// relative file name.
fn nonempty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Serialize one row as a single line, without the terminator.
///
/// Fields are quoted and escaped per the configuration's grammar; this is
/// the same serialization [`DsvWriter`] appends per row.
pub fn format_line<S: AsRef<str>>(fields: &[S], config: &FormatConfig) -> String {
    format_record(fields, config)
}

/// Write a sequence of rows to a path, emitting the header first when the
/// configuration calls for one.
///
/// This is a convenience function mirroring [`read_table`]; rows land in
/// exactly the input order.
///
/// [`read_table`]: crate::reader::read_table
pub fn write_table<I, S>(
    path: impl AsRef<Path>,
    config: &FormatConfig,
    header: Option<&[S]>,
    rows: I,
) -> Result<()>
where
    I: IntoIterator<Item = Vec<S>>,
    S: AsRef<str>,
{
    let mut writer = DsvWriter::create(path, *config)?;
    if let Some(header) = header {
        writer.write_header(header)?;
    }
    writer.write_rows(rows)?;
    writer.finish()
}

/// Serialize the ordered fields of already-parsed records to a path.
///
/// `Named` records are written in column-name order; pair this with a
/// header in the same order to keep columns aligned.
pub fn write_records<'a, I>(
    path: impl AsRef<Path>,
    config: &FormatConfig,
    header: Option<&[String]>,
    records: I,
) -> Result<()>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut writer = DsvWriter::create(path, *config)?;
    if let Some(header) = header {
        writer.write_header(header)?;
    }
    for record in records {
        writer.write_row(&record.values())?;
    }
    writer.finish()
}
