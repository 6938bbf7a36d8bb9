//! Streaming delimiter-separated values (DSV) table reader and writer.
//!
//! This crate provides a lazy, line-oriented codec for plain-text tables:
//! RFC 4180 quoting with a configurable single-character delimiter and
//! enclosure, an optional header line, and a typed error taxonomy that
//! separates configuration failures (raised before any I/O) from data and
//! I/O failures (raised during streaming, with the physical line number).
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use dsv_codec::{DsvReader, DsvWriter, FormatConfig};
//!
//! // Write a table with a header
//! let config = FormatConfig::default().with_header(true);
//! let mut writer = DsvWriter::create(Path::new("pets.csv"), config).unwrap();
//! writer.write_header(&["name", "mood"]).unwrap();
//! writer.write_row(&["Snowball", "friendly"]).unwrap();
//! writer.finish().unwrap();
//!
//! // Stream it back, one record per pull
//! let reader = DsvReader::open(Path::new("pets.csv"), config).unwrap();
//! for record in reader {
//!     let record = record.unwrap();
//!     println!("{:?} is {:?}", record.get("name"), record.get("mood"));
//! }
//! ```
//!
//! # Resource handling
//!
//! A reader or writer session owns exactly one file handle. The handle is
//! released deterministically: at clean end-of-input, on the first error
//! (which fuses the reader), on [`DsvWriter::finish`], and on drop when a
//! sequence is abandoned early.

mod config;
mod error;
mod grammar;
mod reader;
mod record;
mod writer;

// Re-export error types
pub use error::{DsvError, Result};

// Re-export core types
pub use config::FormatConfig;
pub use record::Record;

// Re-export reader functionality
pub use reader::{DsvReader, read_table};

// Re-export writer functionality
pub use writer::{DsvWriter, format_line, write_records, write_table};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
