//! CSV writing: lazy serialization of typed rows

use std::fs::File;
use std::io;
use std::path::Path;

use log::debug;

use crate::csv::CsvEncoder;
use crate::error::Result;
use crate::stream::CsvStream;
use crate::types::CellValue;

/// Configurable CSV writer
///
/// Serialization is pull-driven: [`to_csv`](CsvWriter::to_csv) returns a
/// byte stream that encodes one line at a time as the consumer reads from
/// it, so a huge row collection is never buffered wholesale.
///
/// # Examples
///
/// ```
/// use csvflow::{CellValue, CsvWriter};
///
/// let writer = CsvWriter::new();
/// let rows = vec![
///     vec![CellValue::from("Alice"), CellValue::Int(30)],
///     vec![CellValue::from("Bob"), CellValue::Int(25)],
/// ];
/// let csv = writer
///     .to_csv(["Name", "Age"], rows)
///     .into_string()
///     .unwrap();
/// assert_eq!(csv, "Name,Age\nAlice,30\nBob,25");
/// ```
pub struct CsvWriter {
    separator: char,
    date_time_format: Option<String>,
}

impl CsvWriter {
    /// Create a writer with default options: comma separator, default
    /// date-time rendering
    pub fn new() -> Self {
        CsvWriter {
            separator: ',',
            date_time_format: None,
        }
    }

    /// Set the field separator (builder pattern)
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Override the rendering of [`CellValue::DateTime`] cells
    ///
    /// Accepts a [`chrono::format::strftime`] format string.
    pub fn date_time_format<S: Into<String>>(mut self, format: S) -> Self {
        self.date_time_format = Some(format.into());
        self
    }

    /// Lazily serialize rows into a CSV byte stream
    ///
    /// The header line comes first, then one line per row. Fields containing
    /// the separator, a quote or a line break are quoted so that parsing the
    /// output recovers the original values.
    pub fn to_csv<H, N, I, R>(&self, headers: H, rows: I) -> CsvStream<impl Iterator<Item = String>>
    where
        H: IntoIterator<Item = N>,
        N: AsRef<str>,
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = CellValue>,
    {
        let encoder = CsvEncoder::new(self.separator);
        let date_time_format = self.date_time_format.clone();

        let header_fields: Vec<String> = headers
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        let mut header_line = String::new();
        encoder.encode_record(&header_fields, &mut header_line);

        let lines = std::iter::once(header_line).chain(rows.into_iter().map(move |row| {
            let fields: Vec<String> = row
                .into_iter()
                .map(|cell| cell.format(date_time_format.as_deref()))
                .collect();
            let mut line = String::from('\n');
            encoder.encode_record(&fields, &mut line);
            line
        }));
        CsvStream::new(lines)
    }

    /// Serialize rows straight into a file
    pub fn to_csv_file<H, N, I, R, P>(&self, headers: H, rows: I, path: P) -> Result<()>
    where
        H: IntoIterator<Item = N>,
        N: AsRef<str>,
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = CellValue>,
        P: AsRef<Path>,
    {
        let mut stream = self.to_csv(headers, rows);
        let mut file = File::create(path.as_ref())?;
        let written = io::copy(&mut stream, &mut file)?;
        debug!("wrote {} bytes to {:?}", written, path.as_ref());
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn string_rows(rows: &[&[&str]]) -> Vec<Vec<CellValue>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| CellValue::from(*cell)).collect())
            .collect()
    }

    #[test]
    fn test_header_line_comes_first() {
        let writer = CsvWriter::new();
        let csv = writer
            .to_csv(["Head1", "Head2"], string_rows(&[&["val11", "val12"]]))
            .into_string()
            .unwrap();
        assert_eq!(csv, "Head1,Head2\nval11,val12");
    }

    #[test]
    fn test_no_rows_produces_header_only() {
        let writer = CsvWriter::new();
        let csv = writer
            .to_csv(["Head1"], Vec::<Vec<CellValue>>::new())
            .into_string()
            .unwrap();
        assert_eq!(csv, "Head1");
    }

    #[test]
    fn test_values_with_separator_are_quoted() {
        let writer = CsvWriter::new();
        let csv = writer
            .to_csv(["H"], string_rows(&[&["a,b"]]))
            .into_string()
            .unwrap();
        assert_eq!(csv, "H\n\"a,b\"");
    }

    #[test]
    fn test_date_time_uses_configured_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let writer = CsvWriter::new().date_time_format("%d.%m.%Y");
        let csv = writer
            .to_csv(["When"], vec![vec![CellValue::DateTime(date)]])
            .into_string()
            .unwrap();
        assert_eq!(csv, "When\n02.01.2024");
    }

    #[test]
    fn test_custom_separator() {
        let writer = CsvWriter::new().separator(';');
        let csv = writer
            .to_csv(["A", "B"], string_rows(&[&["1;2", "3"]]))
            .into_string()
            .unwrap();
        assert_eq!(csv, "A;B\n\"1;2\";3");
    }

    #[test]
    fn test_typed_cells_are_rendered() {
        let writer = CsvWriter::new();
        let csv = writer
            .to_csv(
                ["S", "I", "F", "B", "E"],
                vec![vec![
                    CellValue::from("x"),
                    CellValue::Int(7),
                    CellValue::Float(1.5),
                    CellValue::Bool(false),
                    CellValue::Empty,
                ]],
            )
            .into_string()
            .unwrap();
        assert_eq!(csv, "S,I,F,B,E\nx,7,1.5,false,");
    }
}
