//! Record tokenizer: splits one logical CSV record into fields
//!
//! A logical record may span several physical lines when a quoted value
//! contains line breaks, so the tokenizer pulls lines from the source on
//! demand instead of working on a pre-split line.
//!
//! The machine deliberately deviates from RFC 4180 where the strict reading
//! would reject input that spreadsheet tools accept:
//!
//! - `""X` at the start of a field falls back to unquoted scanning with the
//!   leading quote kept as a literal character
//! - an unterminated quoted value is treated as terminated at end of input
//! - content between a closing quote and the next separator is discarded

use std::io::{self, BufRead};

/// States of the record tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    /// At the start of a field, quoted or not yet unknown
    ValueStart,
    /// Scanning an unquoted field up to the next separator or line end
    Default,
    /// Just past an opening quote, checking for the `""X` literal fallback
    QuotedStart,
    /// Scanning a quoted field for its closing quote, pulling more physical
    /// lines into the buffer when the current one runs out
    QuotedDefault,
    /// Just past a candidate closing quote, disambiguating `""` escapes from
    /// the true terminator
    QuotedEnd,
    /// A complete field is ready to be emitted
    ValueEnd,
    /// The record is complete
    LineEnd,
}

/// Tokenizer for a single CSV record
///
/// Stateless and reusable: each call to [`fields`](CsvParser::fields) or
/// [`parse_record`](CsvParser::parse_record) consumes exactly one record
/// from the source and leaves it positioned at the start of the next one.
///
/// # Examples
///
/// ```
/// use csvflow::csv::CsvParser;
///
/// let parser = CsvParser::new(',');
/// let mut input = "a,\"b,c\",d\nnext".as_bytes();
///
/// let record = parser.parse_record(&mut input).unwrap();
/// assert_eq!(record, vec!["a", "b,c", "d"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CsvParser {
    separator: char,
}

impl CsvParser {
    /// Create a tokenizer with a custom field separator
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    /// Lazily tokenize one record into a field iterator
    ///
    /// The iterator yields nothing at all when the source is at end of
    /// input, which is how "no more records" is signalled. An empty physical
    /// line yields a single empty field instead.
    pub fn fields<'a, R: BufRead>(&self, source: &'a mut R) -> Fields<'a, R> {
        Fields {
            source,
            separator: self.separator,
            line: None,
            state: ParserState::ValueStart,
            pos: 0,
            value_start: 0,
            value_end: None,
        }
    }

    /// Tokenize one record eagerly into a vector of fields
    ///
    /// Returns an empty vector at end of input.
    pub fn parse_record<R: BufRead>(&self, source: &mut R) -> io::Result<Vec<String>> {
        self.fields(source).collect()
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(',')
    }
}

/// Lazy iterator over the fields of a single record
///
/// Created by [`CsvParser::fields`]. Single pass: once exhausted the source
/// is positioned at the start of the next record.
pub struct Fields<'a, R: BufRead> {
    source: &'a mut R,
    separator: char,
    /// Current logical line; grows when a quoted value spans physical lines
    line: Option<String>,
    state: ParserState,
    /// Byte position of the scan within `line`
    pos: usize,
    value_start: usize,
    /// End of a quoted value, when it differs from the scan position
    value_end: Option<usize>,
}

impl<R: BufRead> Fields<'_, R> {
    /// Emit the current field, collapsing `""` escapes to literal quotes
    fn emit(&mut self) -> String {
        let line = self.line.as_ref().unwrap();
        let end = self.value_end.take().unwrap_or(self.pos);
        let field = line[self.value_start..end].replace("\"\"", "\"");
        if self.pos == line.len() {
            self.state = ParserState::LineEnd;
        } else {
            // Skip the separator
            self.pos += self.separator.len_utf8();
            self.state = ParserState::ValueStart;
        }
        field
    }
}

impl<R: BufRead> Iterator for Fields<'_, R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        // First pull decides whether there is a record at all.
        if self.line.is_none() {
            match read_physical_line(self.source) {
                Ok(Some(line)) => self.line = Some(line),
                Ok(None) => {
                    self.state = ParserState::LineEnd;
                    return None;
                }
                Err(err) => {
                    self.state = ParserState::LineEnd;
                    return Some(Err(err));
                }
            }
        }

        loop {
            match self.state {
                ParserState::LineEnd => return None,
                ParserState::ValueStart => {
                    let line = self.line.as_ref().unwrap();
                    if self.pos == line.len() {
                        // Empty field closing the record, e.g. after a
                        // trailing separator or on an empty line.
                        self.state = ParserState::LineEnd;
                        return Some(Ok(String::new()));
                    }
                    if line.as_bytes()[self.pos] == b'"' {
                        self.pos += 1;
                        self.value_start = self.pos;
                        self.state = ParserState::QuotedStart;
                    } else {
                        self.value_start = self.pos;
                        self.state = ParserState::Default;
                    }
                }
                ParserState::Default => {
                    let line = self.line.as_ref().unwrap();
                    self.pos = match line[self.pos..].find(self.separator) {
                        Some(offset) => self.pos + offset,
                        None => line.len(),
                    };
                    self.state = ParserState::ValueEnd;
                }
                ParserState::ValueEnd => {
                    return Some(Ok(self.emit()));
                }
                ParserState::QuotedStart => {
                    let line = self.line.as_ref().unwrap();
                    // A second quote right after the opening one means this
                    // is not a real quoted field; keep it as a literal quote
                    // and fall back to unquoted scanning.
                    if self.pos < line.len() && line.as_bytes()[self.pos] == b'"' {
                        self.pos += 1;
                        self.state = ParserState::Default;
                    } else {
                        self.state = ParserState::QuotedDefault;
                    }
                }
                ParserState::QuotedDefault => {
                    let line = self.line.as_ref().unwrap();
                    match line[self.pos..].find('"') {
                        Some(offset) => {
                            self.pos += offset;
                            self.state = ParserState::QuotedEnd;
                        }
                        None => {
                            self.pos = line.len();
                            match read_physical_line(self.source) {
                                Ok(Some(next)) => {
                                    // The quoted value continues on the next
                                    // physical line; line breaks inside it
                                    // are part of the value.
                                    let line = self.line.as_mut().unwrap();
                                    line.push('\n');
                                    line.push_str(&next);
                                }
                                Ok(None) => {
                                    // Unterminated quoted value: treat it as
                                    // terminated at end of input.
                                    self.state = ParserState::ValueEnd;
                                }
                                Err(err) => {
                                    self.state = ParserState::LineEnd;
                                    return Some(Err(err));
                                }
                            }
                        }
                    }
                }
                ParserState::QuotedEnd => {
                    self.pos += 1;
                    let line = self.line.as_ref().unwrap();
                    if self.pos < line.len() && line.as_bytes()[self.pos] == b'"' {
                        if self.pos == line.len() - 1 {
                            // Unterminated value ending in an escaped quote:
                            // emit everything scanned so far.
                            self.pos = line.len();
                            self.state = ParserState::ValueEnd;
                        } else {
                            // Escaped quote pair; keep scanning the value.
                            self.pos += 1;
                            self.state = ParserState::QuotedDefault;
                        }
                    } else {
                        // True terminator. Anything between here and the
                        // next separator is dropped.
                        self.value_end = Some(self.pos - 1);
                        self.pos = match line[self.pos..].find(self.separator) {
                            Some(offset) => self.pos + offset,
                            None => line.len(),
                        };
                        self.state = ParserState::ValueEnd;
                    }
                }
            }
        }
    }
}

/// Read one physical line, stripping the trailing `\n` or `\r\n`
///
/// Returns `None` at end of input.
fn read_physical_line<R: BufRead>(source: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if source.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}
