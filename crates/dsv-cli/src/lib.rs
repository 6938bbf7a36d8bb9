//! Library surface of the `dsv` CLI.
//!
//! Exposes the logging setup so integration tests and the binary share it.

pub mod logging;
