//! Low-level CSV tokenizing and encoding

mod encoder;
mod parser;

pub use encoder::CsvEncoder;
pub use parser::{CsvParser, Fields};
