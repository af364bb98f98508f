//! Line reader shared by every format reader
//!
//! Wraps a buffered source, strips line terminators and keeps the 1-based
//! number of the last line read, so readers can attach it to their errors.

use std::io::{BufRead, BufReader, Read};

use crate::error::{IoError, IoResult};
use crate::traits::FileFormat;

/// Buffered line source with line tracking
pub struct LineReader<R> {
    reader: BufReader<R>,
    format: FileFormat,
    line_number: usize,
}

impl<R: Read> LineReader<R> {
    /// Create a line reader for a source of the given format
    pub fn new(reader: R, format: FileFormat) -> Self {
        LineReader {
            reader: BufReader::new(reader),
            format,
            line_number: 0,
        }
    }

    /// Read the next line without its terminator
    pub fn next_line(&mut self) -> IoResult<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Number of the last line read (0 before the first line)
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Format this reader reports in its errors
    #[inline]
    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Bad coordinates error at the current line
    pub fn bad_coordinates(&self, message: impl Into<String>) -> IoError {
        IoError::bad_coordinates(self.format, self.line_number, message)
    }

    /// Structural error at the current line
    pub fn malformed(&self, message: impl Into<String>) -> IoError {
        IoError::malformed(self.format, self.line_number, message)
    }
}
