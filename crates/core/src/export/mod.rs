//! Presenters for computed analysis rows.
//!
//! Two serializations of the same rows: a CSV file for spreadsheet use and
//! a print-ready HTML document for the browser's print-to-PDF dialog.

pub mod csv;
pub mod print;

use thiserror::Error;

pub use self::csv::{csv_filename, write_csv};
pub use self::print::print_document;

/// Export error types.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] ::csv::Error),

    /// The CSV buffer could not be finalized.
    #[error("CSV buffer finalization failed: {0}")]
    Buffer(String),

    /// The exported bytes were not valid UTF-8.
    #[error("Exported CSV was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
