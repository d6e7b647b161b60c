//! Plain line-oriented reading and writing.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rowaug_model::Result;

/// Reads a text file line by line, stripping the trailing line ending.
#[derive(Debug)]
pub struct LineReader {
    reader: BufReader<File>,
    path: PathBuf,
    line_number: usize,
}

impl LineReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
            path: path.to_path_buf(),
            line_number: 0,
        })
    }

    /// Reads the next line, or `None` at end of file.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        let bytes = self.reader.read_line(&mut buf)?;
        if bytes == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    /// The 1-based number of the most recently read line.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the line is considered empty. With `strict` set, a line of
    /// whitespace is not empty.
    pub fn is_empty(line: &str, strict: bool) -> bool {
        if strict {
            line.is_empty()
        } else {
            line.trim().is_empty()
        }
    }
}

/// Writes a text file line by line, appending a newline to every line.
#[derive(Debug)]
pub struct LineWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    line_number: usize,
}

impl LineWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            line_number: 0,
        })
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.line_number += 1;
        Ok(())
    }

    /// The 1-based number of the most recently written line.
    pub fn line_number(&self) -> usize {
        self.line_number
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

impl Drop for LineWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
