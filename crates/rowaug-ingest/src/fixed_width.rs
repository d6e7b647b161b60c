//! Fixed-width record reading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use rowaug_model::{AugmentError, Result};

use crate::ReadMode;
use crate::line::LineReader;

/// A half-open `[from, to)` character span of one fixed-width field.
///
/// Positions are character offsets, not byte offsets, so multi-byte UTF-8
/// input splits correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpan {
    pub from: usize,
    pub to: usize,
}

impl FieldSpan {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// Reads a text file line by line and splits every line into fixed-width
/// fields according to a span list given at construction.
#[derive(Debug)]
pub struct FixedWidthReader {
    reader: LineReader,
    spans: Vec<FieldSpan>,
}

impl FixedWidthReader {
    pub fn open(path: impl AsRef<Path>, spans: Vec<FieldSpan>) -> Result<Self> {
        check_spans(&spans)?;
        Ok(Self {
            reader: LineReader::open(path)?,
            spans,
        })
    }

    /// Reads and splits the next line, or `None` at end of file.
    ///
    /// Emptiness is judged on the raw line, before splitting.
    pub fn next_record(&mut self, mode: ReadMode) -> Result<Option<Vec<String>>> {
        loop {
            let Some(line) = self.reader.next_line()? else {
                return Ok(None);
            };
            if mode == ReadMode::SkipEmptyLines && LineReader::is_empty(&line, false) {
                continue;
            }
            return Ok(Some(self.split_line(&line)));
        }
    }

    /// The 1-based number of the most recently read line.
    pub fn line_number(&self) -> usize {
        self.reader.line_number()
    }

    pub fn spans(&self) -> &[FieldSpan] {
        &self.spans
    }

    fn split_line(&self, line: &str) -> Vec<String> {
        let chars: Vec<char> = line.chars().collect();
        self.spans
            .iter()
            .map(|span| {
                let from = span.from.min(chars.len());
                let to = span.to.min(chars.len());
                chars[from..to].iter().collect()
            })
            .collect()
    }
}

fn check_spans(spans: &[FieldSpan]) -> Result<()> {
    if spans.is_empty() {
        return Err(AugmentError::Configuration(
            "fields definition is empty".to_string(),
        ));
    }
    for (i, span) in spans.iter().enumerate() {
        if span.from > span.to {
            return Err(AugmentError::Configuration(format!(
                "'from' is not less than 'to' (field {i})"
            )));
        }
    }
    Ok(())
}
