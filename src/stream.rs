//! Adapter exposing a lazily produced string sequence as a byte stream

use std::io::{self, Read};

/// A pull-driven byte stream over a sequence of strings
///
/// Pulls the next chunk from the underlying iterator only when the internal
/// buffer runs dry and encodes it as UTF-8 on demand, so a huge sequence is
/// never buffered wholesale. Single pass, not seekable.
///
/// # Examples
///
/// ```
/// use std::io::Read;
/// use csvflow::CsvStream;
///
/// let chunks = vec!["a,b".to_string(), "\n1,2".to_string()];
/// let mut stream = CsvStream::new(chunks.into_iter());
///
/// let mut output = String::new();
/// stream.read_to_string(&mut output).unwrap();
/// assert_eq!(output, "a,b\n1,2");
/// ```
pub struct CsvStream<I> {
    chunks: I,
    buffer: Vec<u8>,
    offset: usize,
}

impl<I> CsvStream<I>
where
    I: Iterator<Item = String>,
{
    /// Wrap a string-producing iterator
    pub fn new(chunks: I) -> Self {
        CsvStream {
            chunks,
            buffer: Vec::new(),
            offset: 0,
        }
    }

    /// Drain the whole stream into a string
    pub fn into_string(mut self) -> io::Result<String> {
        let mut output = String::new();
        self.read_to_string(&mut output)?;
        Ok(output)
    }
}

impl<I> Read for CsvStream<I>
where
    I: Iterator<Item = String>,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut copied = 0;
        while copied < buf.len() {
            if self.offset == self.buffer.len() {
                match self.chunks.next() {
                    Some(chunk) => {
                        self.buffer = chunk.into_bytes();
                        self.offset = 0;
                    }
                    None => return Ok(copied),
                }
            }
            let available = self.buffer.len() - self.offset;
            let wanted = buf.len() - copied;
            let count = available.min(wanted);
            buf[copied..copied + count]
                .copy_from_slice(&self.buffer[self.offset..self.offset + count]);
            copied += count;
            self.offset += count;
        }
        Ok(copied)
    }
}
