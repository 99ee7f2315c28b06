// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::fs::File;                     // File, open
use std::io;                           // Error, Lines
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::result;

use log::debug;
use thiserror::Error;

/// Line that ends a session unless another one is configured.
pub const DEFAULT_SENTINEL: &str = "STOP";

/// Type `ReaderError` describes the errors that can occur while reading
/// patterns.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Error `Open` means the pattern file can not be opened.
    #[error("can not open {}: {source}", .path.display())]
    Open {
        /// Path of the pattern file.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// Error `Io` is relative to the input errors on the given line.
    #[error("Line {line}: IO error {source}")]
    Io {
        /// Line number, starting at 1.
        line: usize,
        /// Underlying error.
        source: io::Error,
    },
}

/// Alias for result::Result<T,ReaderError>.
pub type Result<T> = result::Result<T, ReaderError>;

/// Struct `PatternReader` yields one pattern per line of its source, without
/// the line terminator, until it reads the sentinel line or runs out of
/// input. Reading stops for good after the sentinel or an error.
///
/// # Examples
///
/// ```
/// use re2dfa::pattern::reader::PatternReader;
///
/// let patterns: Vec<String> = PatternReader::from_string("0*\n(01)\nSTOP\n1")
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(patterns, vec!["0*", "(01)"]);
/// ```
pub struct PatternReader<R> {
    lines    : io::Lines<R>,
    sentinel : String,
    nline    : usize,
    done     : bool,
}

impl<R: BufRead> PatternReader<R> {
    /// Reads patterns from any buffered source.
    pub fn from_reader(reader: R) -> PatternReader<R> {
        PatternReader{lines: reader.lines(), sentinel: DEFAULT_SENTINEL.to_owned(), nline: 0, done: false}
    }

    /// Replaces the line that ends the session.
    pub fn with_sentinel<S: Into<String>>(mut self, sentinel: S) -> PatternReader<R> {
        self.sentinel = sentinel.into();
        self
    }

    /// The line that ends the session.
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }
}

impl PatternReader<BufReader<File>> {
    /// Reads patterns from a file.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::Open` if the file can not be opened.
    pub fn from_file<P: AsRef<Path>>(file_path: P) -> Result<PatternReader<BufReader<File>>> {
        let file_path = file_path.as_ref();
        let file = File::open(file_path).map_err(|e| ReaderError::Open{path: file_path.to_owned(), source: e})?;
        Ok(PatternReader::from_reader(BufReader::new(file)))
    }
}

impl<'a> PatternReader<&'a [u8]> {
    /// Reads patterns from a `&str`.
    pub fn from_string(patterns: &'a str) -> PatternReader<&'a [u8]> {
        PatternReader::from_reader(patterns.as_bytes())
    }
}

impl<R: BufRead> Iterator for PatternReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Result<String>> {
        if self.done {
            return None;
        }
        self.nline += 1;
        match self.lines.next() {
            None => {
                self.done = true;
                None
            },
            Some(Err(e)) => {
                self.done = true;
                Some(Err(ReaderError::Io{line: self.nline, source: e}))
            },
            Some(Ok(ref line)) if *line == self.sentinel => {
                debug!("sentinel {:?} read on line {}", self.sentinel, self.nline);
                self.done = true;
                None
            },
            Some(Ok(line)) => Some(Ok(line)),
        }
    }
}
