//! Delimited-file reading and writing on top of the `csv` crate.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecordsIntoIter, WriterBuilder};
use tracing::debug;

use rowaug_model::{AugmentError, Result};

use crate::{ReadMode, is_empty_record};

/// Reads a delimited file record by record.
///
/// The first row is treated as a header unless the reader was opened with
/// [`CsvReader::open_headerless`]. Short and long rows are tolerated; the
/// caller decides what a ragged record means.
pub struct CsvReader {
    records: StringRecordsIntoIter<File>,
    header: Option<Vec<String>>,
    path: PathBuf,
    delimiter: u8,
    line_number: usize,
}

impl CsvReader {
    /// Opens a delimited file whose first row is a header.
    pub fn open(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        Self::build(path.as_ref(), delimiter, true)
    }

    /// Opens a delimited file with no header row.
    pub fn open_headerless(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        Self::build(path.as_ref(), delimiter, false)
    }

    fn build(path: &Path, delimiter: u8, has_header: bool) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(has_header)
            .flexible(true)
            .from_path(path)
            .map_err(|e| AugmentError::Csv(e.to_string()))?;
        let header = if has_header {
            let names: Vec<String> = reader
                .headers()
                .map_err(|e| AugmentError::Csv(e.to_string()))?
                .iter()
                .map(|name| name.trim().to_string())
                .collect();
            debug!(path = %path.display(), columns = names.len(), "read csv header");
            Some(names)
        } else {
            None
        };
        Ok(Self {
            records: reader.into_records(),
            header,
            path: path.to_path_buf(),
            delimiter,
            line_number: 0,
        })
    }

    /// Reads the next record, or `None` at end of file.
    pub fn next_record(&mut self, mode: ReadMode) -> Result<Option<Vec<String>>> {
        loop {
            let Some(record) = self.records.next() else {
                return Ok(None);
            };
            let record = record.map_err(|e| AugmentError::Csv(e.to_string()))?;
            self.line_number += 1;
            let fields: Vec<String> = record.iter().map(str::to_string).collect();
            if mode == ReadMode::SkipEmptyLines && is_empty_record(&fields, false) {
                continue;
            }
            return Ok(Some(fields));
        }
    }

    /// The header row, if the file has one.
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// The 1-based number of data records read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes a delimited file record by record.
pub struct CsvWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
    delimiter: u8,
    line_number: usize,
}

impl CsvWriter {
    pub fn create(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let writer = WriterBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_path(path)
            .map_err(|e| AugmentError::Csv(e.to_string()))?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
            delimiter,
            line_number: 0,
        })
    }

    /// Appends one record to the file.
    pub fn write_record<I, S>(&mut self, record: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.writer
            .write_record(record.into_iter().map(|field| field.as_ref().to_string()))
            .map_err(|e| AugmentError::Csv(e.to_string()))?;
        self.line_number += 1;
        Ok(())
    }

    /// The 1-based number of records written so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and closes the file, reporting any pending write error.
    pub fn close(mut self) -> Result<()> {
        self.flush()
    }
}
