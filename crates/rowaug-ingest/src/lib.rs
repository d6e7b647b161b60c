//! Record sources and sinks for the row augmentation toolkit.
//!
//! Files are assumed to be UTF-8. Line endings may be LF or CRLF; if the
//! input is anything else, convert it first.
//!
//! Every reader counts the records it has handed out (1-based, like a line
//! number) and can either return every record or skip records considered
//! empty, depending on [`ReadMode`].

pub mod csv_file;
pub mod fixed_width;
pub mod line;

pub use csv_file::{CsvReader, CsvWriter};
pub use fixed_width::{FieldSpan, FixedWidthReader};
pub use line::{LineReader, LineWriter};

/// Controls how a reader treats records it considers empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Hand back every record, empty or not.
    #[default]
    ReturnEveryLine,
    /// Silently skip records whose fields are all blank.
    SkipEmptyLines,
}

/// True when every field of the record is blank.
///
/// With `strict` set, only truly empty strings count as blank; otherwise
/// whitespace-only fields do too.
pub fn is_empty_record(record: &[String], strict: bool) -> bool {
    record.iter().all(|field| {
        if strict {
            field.is_empty()
        } else {
            field.trim().is_empty()
        }
    })
}
