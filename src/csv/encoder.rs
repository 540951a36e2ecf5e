//! CSV encoding: field quoting and escaping on output

/// CSV encoder for writing properly formatted CSV records
///
/// Mirror image of the parser: a field containing the separator, a quote or
/// a line break is wrapped in quotes with inner quotes doubled, so that
/// parsing the output recovers the original value.
#[derive(Debug, Clone, Copy)]
pub struct CsvEncoder {
    separator: char,
}

impl CsvEncoder {
    /// Create an encoder with a custom field separator
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    /// Encode an entire record into the buffer, without a line terminator
    pub fn encode_record<S: AsRef<str>>(&self, fields: &[S], buffer: &mut String) {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                buffer.push(self.separator);
            }
            self.encode_field(field.as_ref(), buffer);
        }
    }

    /// Encode a single field with quoting and escaping as needed
    fn encode_field(&self, field: &str, buffer: &mut String) {
        if self.needs_quoting(field) {
            buffer.push('"');
            for ch in field.chars() {
                if ch == '"' {
                    buffer.push('"');
                }
                buffer.push(ch);
            }
            buffer.push('"');
        } else {
            buffer.push_str(field);
        }
    }

    /// Check whether a field requires quoting
    fn needs_quoting(&self, field: &str) -> bool {
        field
            .chars()
            .any(|ch| ch == self.separator || ch == '"' || ch == '\n' || ch == '\r')
    }
}

impl Default for CsvEncoder {
    fn default() -> Self {
        Self::new(',')
    }
}
