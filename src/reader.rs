//! CSV reading: configuration surface and the lazy row iterator

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, trace};
use regex::Regex;

use crate::csv::CsvParser;
use crate::error::Result;
use crate::header::{self, HeaderNameResolver, DEFAULT_HEADER_PATTERN};
use crate::row::Row;

/// Configurable CSV reader
///
/// Holds the parse configuration; each call to [`parse`](CsvReader::parse)
/// opens an independent lazy session over its own input. Rows are produced
/// one at a time; only one record's worth of state is buffered, and errors
/// such as a strict cell-count mismatch surface when the offending record
/// is pulled, not at open time.
///
/// # Examples
///
/// ```
/// use csvflow::CsvReader;
///
/// let reader = CsvReader::new();
/// for row in reader.parse_str("name,age\nAlice,30\nBob,25") {
///     let row = row.unwrap();
///     println!("{} is {}", &row["Name"], &row["Age"]);
/// }
/// ```
///
/// # Without a header row
///
/// ```
/// use csvflow::CsvReader;
///
/// let reader = CsvReader::new().has_header(false);
/// let row = reader.parse_str("val11,val12").next().unwrap().unwrap();
/// assert_eq!(row.get("Column0"), Some("val11"));
/// ```
pub struct CsvReader {
    separator: char,
    has_header: bool,
    strict_cell_count: bool,
    header_pattern: Regex,
    resolve_header_name: Option<Box<HeaderNameResolver>>,
}

impl CsvReader {
    /// Create a reader with default options: comma separator, first record
    /// treated as the header, permissive cell counts
    pub fn new() -> Self {
        CsvReader {
            separator: ',',
            has_header: true,
            strict_cell_count: false,
            header_pattern: header::compile_header_pattern(DEFAULT_HEADER_PATTERN)
                .expect("default header pattern is valid"),
            resolve_header_name: None,
        }
    }

    /// Set the field separator (builder pattern)
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Declare whether the first record is a header (builder pattern)
    ///
    /// When `false`, rows get positional `Column0..ColumnN` names sized
    /// from the first data record.
    pub fn has_header(mut self, has: bool) -> Self {
        self.has_header = has;
        self
    }

    /// Require every record's cell count to match the header count
    ///
    /// Off by default; without it missing trailing cells are padded with
    /// empty strings and extra cells are dropped.
    pub fn strict_cell_count(mut self, strict: bool) -> Self {
        self.strict_cell_count = strict;
        self
    }

    /// Set a custom header-extraction pattern
    ///
    /// The pattern must contain a `header` named capture group; otherwise
    /// configuration fails right here with
    /// [`CsvError::InvalidHeaderPattern`](crate::CsvError::InvalidHeaderPattern).
    pub fn header_pattern(mut self, pattern: &str) -> Result<Self> {
        self.header_pattern = header::compile_header_pattern(pattern)?;
        Ok(self)
    }

    /// Install a header name resolver called once per header cell
    ///
    /// The callback receives the raw header text and the derived name
    /// (`None` when derivation failed); a non-empty return value overrides
    /// the derived name.
    pub fn resolve_header_name<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&str, Option<&str>) -> Option<String> + 'static,
    {
        self.resolve_header_name = Some(Box::new(resolver));
        self
    }

    /// Parse CSV data from any reader, yielding rows lazily
    pub fn parse<R: Read>(&self, input: R) -> Rows<'_, R> {
        Rows {
            options: self,
            parser: CsvParser::new(self.separator),
            source: BufReader::new(input),
            headers: Vec::new(),
            state: SessionState::Initial,
            row_index: 0,
        }
    }

    /// Parse CSV data held in a string
    pub fn parse_str<'r, 's>(&'r self, input: &'s str) -> Rows<'r, &'s [u8]> {
        self.parse(input.as_bytes())
    }

    /// Open and parse a CSV file
    pub fn parse_path<P: AsRef<Path>>(&self, path: P) -> Result<Rows<'_, File>> {
        debug!("opening CSV file {:?}", path.as_ref());
        let file = File::open(path)?;
        Ok(self.parse(file))
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Phases of a reader session
enum SessionState {
    /// Nothing pulled yet; headers not resolved
    Initial,
    /// Headers known, producing data rows
    Records,
    /// Input consumed; the session yields nothing more
    Exhausted,
}

/// Lazy, single-pass iterator over parsed rows
///
/// Created by [`CsvReader::parse`]. Forward-only and not restartable:
/// re-reading requires re-opening the source.
pub struct Rows<'r, R: Read> {
    options: &'r CsvReader,
    parser: CsvParser,
    source: BufReader<R>,
    headers: Vec<String>,
    state: SessionState,
    row_index: u64,
}

impl<R: Read> Rows<'_, R> {
    /// Resolved header names, in column order
    ///
    /// Empty until the first row has been pulled.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn read_record(&mut self) -> Result<Vec<String>> {
        Ok(self.parser.parse_record(&mut self.source)?)
    }

    fn build_row(&mut self, values: Vec<String>) -> Result<Row> {
        self.row_index += 1;
        trace!("building row {} with {} cells", self.row_index, values.len());
        Row::from_record(&self.headers, values, self.options.strict_cell_count)
    }
}

impl<R: Read> Iterator for Rows<'_, R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                SessionState::Exhausted => return None,
                SessionState::Initial => {
                    let record = match self.read_record() {
                        Ok(record) => record,
                        Err(err) => return Some(Err(err)),
                    };
                    if record.is_empty() {
                        // Empty input is not an error, just an empty result.
                        self.state = SessionState::Exhausted;
                        return None;
                    }
                    if self.options.has_header {
                        self.headers = header::resolve_headers(
                            &record,
                            &self.options.header_pattern,
                            self.options.resolve_header_name.as_deref(),
                        );
                        debug!("resolved headers: {:?}", self.headers);
                        self.state = SessionState::Records;
                        // The header record is consumed; pull the first
                        // data record on the next loop turn.
                    } else {
                        self.headers = (0..record.len())
                            .map(header::placeholder_name)
                            .collect();
                        self.state = SessionState::Records;
                        return Some(self.build_row(record));
                    }
                }
                SessionState::Records => {
                    let record = match self.read_record() {
                        Ok(record) => record,
                        Err(err) => return Some(Err(err)),
                    };
                    if record.is_empty() {
                        debug!("input exhausted after {} rows", self.row_index);
                        self.state = SessionState::Exhausted;
                        return None;
                    }
                    return Some(self.build_row(record));
                }
            }
        }
    }
}
