//! Typed cell values for the writer side

use chrono::NaiveDateTime;

/// Default rendering of date-time cells when no format string is configured
const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single typed cell value to be serialized into CSV text
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Date-time value, rendered with the writer's format string
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Render the value as CSV text
    ///
    /// `date_time_format` overrides the default date-time rendering when
    /// present; all other variants ignore it.
    pub fn format(&self, date_time_format: Option<&str>) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => {
                let mut buffer = itoa::Buffer::new();
                buffer.format(*i).to_string()
            }
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => dt
                .format(date_time_format.unwrap_or(DEFAULT_DATE_TIME_FORMAT))
                .to_string(),
        }
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_date_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_scalar_formatting() {
        assert_eq!(CellValue::Empty.format(None), "");
        assert_eq!(CellValue::from("text").format(None), "text");
        assert_eq!(CellValue::Int(-42).format(None), "-42");
        assert_eq!(CellValue::Float(3.25).format(None), "3.25");
        assert_eq!(CellValue::Bool(true).format(None), "true");
    }

    #[test]
    fn test_date_time_default_format() {
        let value = CellValue::DateTime(sample_date_time());
        assert_eq!(value.format(None), "2024-03-07 14:30:05");
    }

    #[test]
    fn test_date_time_custom_format() {
        let value = CellValue::DateTime(sample_date_time());
        assert_eq!(value.format(Some("%d/%m/%Y")), "07/03/2024");
    }
}
