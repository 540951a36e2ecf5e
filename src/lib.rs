//! # csvflow
//!
//! Streaming CSV encoding/decoding with header-to-identifier inference.
//!
//! Rows are parsed lazily, one record at a time, and exposed as ordered,
//! keyed string collections: each cell is reachable both by column position
//! and by a header-derived name. Raw header text is reduced to unique
//! identifier-safe names, with placeholder `Column<N>` fallbacks for
//! anything unusable.
//!
//! The parser intentionally follows spreadsheet-tool behavior instead of
//! strict RFC 4180 in a few documented cases; see [`csv::CsvParser`].
//!
//! ## Reading
//!
//! ```
//! use csvflow::CsvReader;
//!
//! let reader = CsvReader::new();
//! for row in reader.parse_str("name,age\nAlice,30\nBob,25") {
//!     let row = row.unwrap();
//!     assert_eq!(row.headers().collect::<Vec<_>>(), ["Name", "Age"]);
//! }
//! ```
//!
//! ## Writing
//!
//! ```
//! use csvflow::{CellValue, CsvWriter};
//!
//! let writer = CsvWriter::new();
//! let csv = writer
//!     .to_csv(["Name", "Age"], vec![vec![CellValue::from("Alice"), CellValue::Int(30)]])
//!     .into_string()
//!     .unwrap();
//! assert_eq!(csv, "Name,Age\nAlice,30");
//! ```
//!
//! ## Strict cell counts
//!
//! ```
//! use csvflow::{CsvError, CsvReader};
//!
//! let reader = CsvReader::new().strict_cell_count(true);
//! let error = reader
//!     .parse_str("a,b\n1")
//!     .next()
//!     .unwrap()
//!     .unwrap_err();
//! assert!(matches!(error, CsvError::InvalidCellCount { expected: 2, actual: 1 }));
//! ```

pub mod csv;
pub mod error;
pub mod header;
pub mod reader;
pub mod row;
pub mod stream;
pub mod types;
pub mod writer;

pub use error::{CsvError, Result};
pub use reader::{CsvReader, Rows};
pub use row::Row;
pub use stream::CsvStream;
pub use types::CellValue;
pub use writer::CsvWriter;
