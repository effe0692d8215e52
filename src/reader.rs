//! A reader of tab-separated record files.

use std::io::BufRead;
use std::io::{self};
use std::iter;

use crate::record;
use crate::record::Record;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A line could not be parsed as a record.
    Parse {
        /// The 1-based number of the offending line.
        line_number: usize,

        /// The offending line.
        line: String,

        /// The reason the line could not be parsed.
        source: record::ParseError,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Parse {
                line_number,
                line,
                source,
            } => write!(f, "line {line_number}: {source}\n\nline: {line}"),
        }
    }
}

impl std::error::Error for Error {}

/// A reader of tab-separated record files.
///
/// One record is read per line. Blank lines are skipped, as is the header line
/// of formats that have one.
#[derive(Clone, Debug)]
pub struct Reader<T>
where
    T: BufRead,
{
    /// The inner reader.
    inner: T,

    /// The number of lines read so far.
    line_number: usize,
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a record reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"TE1\tchr1\t100\t200\n";
    /// let reader = repet_coords::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Gets a mutable reference to the inner reader.
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Gets the number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads a raw, textual line from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"TE1\tchr1\t100\t200\r\nTE2\tchr1\t300\t400";
    /// let mut reader = repet_coords::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 18);
    /// assert_eq!(buffer, "TE1\tchr1\t100\t200");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 16);
    /// assert_eq!(buffer, "TE2\tchr1\t300\t400");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        let read = read_line(&mut self.inner, buffer)?;

        if read > 0 {
            self.line_number += 1;
        }

        Ok(read)
    }

    /// Attempts to read the next record from the underlying reader.
    ///
    /// `Ok(None)` is returned once the end of the input is reached.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::record::Map;
    ///
    /// let data = b"TE1\tchr1\t100\t200\n\nTE2\tchr1\t300\t400\n";
    /// let mut reader = repet_coords::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// assert!(reader.read_record::<Map>(&mut buffer)?.is_some());
    /// assert!(reader.read_record::<Map>(&mut buffer)?.is_some());
    /// assert!(reader.read_record::<Map>(&mut buffer)?.is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_record<R>(&mut self, buffer: &mut String) -> Result<Option<R>, Error>
    where
        R: Record,
    {
        loop {
            if self.read_line_raw(buffer).map_err(Error::Io)? == 0 {
                return Ok(None);
            }

            if buffer.trim().is_empty() || is_header::<R>(buffer) {
                continue;
            }

            return buffer
                .parse::<R>()
                .map(Some)
                .map_err(|source| Error::Parse {
                    line_number: self.line_number,
                    line: buffer.clone(),
                    source,
                });
        }
    }

    /// Returns an iterator over the records in the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::record::Set;
    ///
    /// let data = b"1\tTE1\tchr1\t100\t200\n2\tTE2\tchr1\t300\t400\n";
    /// let mut reader = repet_coords::Reader::new(&data[..]);
    ///
    /// let sets = reader.records::<Set>().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(sets.len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records<R>(&mut self) -> impl Iterator<Item = Result<R, Error>> + '_
    where
        R: Record,
    {
        let mut buffer = String::new();
        iter::from_fn(move || self.read_record(&mut buffer).transpose())
    }

    /// Reads all of the remaining records, failing on the first invalid line.
    pub fn read_all<R>(&mut self) -> Result<Vec<R>, Error>
    where
        R: Record,
    {
        self.records().collect()
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self {
            inner,
            line_number: 0,
        }
    }
}

/// Returns whether a line is the header line of the format of `R`.
fn is_header<R>(line: &str) -> bool
where
    R: Record,
{
    match R::HEADER {
        Some(header) => {
            let first = header.split(record::DELIMITER).next().unwrap_or(header);
            line.split(record::DELIMITER).next() == Some(first)
        }
        None => false,
    }
}

/// Reads a line from a buffered reader, stripping the line ending.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    let read = reader.read_line(buffer)?;

    if buffer.ends_with(NEW_LINE) {
        buffer.pop();

        if buffer.ends_with(CARRIAGE_RETURN) {
            buffer.pop();
        }
    }

    Ok(read)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::core::Located as _;
    use crate::record::Map;
    use crate::record::Match;

    #[test]
    fn test_read_line() {
        let data = b"hello\r\nworld!";
        let mut cursor = io::Cursor::new(data);

        let mut buffer = String::new();
        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "hello");
        assert_eq!(len, 7);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "world!");
        assert_eq!(len, 6);
    }

    #[test]
    fn test_match_header_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let data = format!(
            "{}\nq1\t1\t100\t100\t1.0\t1.0\ts1\t1\t100\t100\t1.0\t0\t90\t99\t1\n",
            crate::record::r#match::HEADER
        );
        let mut reader = Reader::new(data.as_bytes());

        let matches = reader.read_all::<Match>()?;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].seqname(), "q1");

        Ok(())
    }

    #[test]
    fn test_parse_error_reports_line() {
        let data = b"TE1\tchr1\t100\t200\nTE2\tchr1\t300\n";
        let mut reader = Reader::new(&data[..]);

        let err = reader.read_all::<Map>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 2: invalid number of fields in map record: expected 4 fields, found 3 \
             fields\n\nline: TE2\tchr1\t300"
        );
    }

    #[test]
    fn test_records_stop_at_eof() -> Result<(), Box<dyn std::error::Error>> {
        let mut reader = Reader::new(&b""[..]);
        assert!(reader.records::<Map>().next().is_none());

        let mut buffer = String::new();
        assert!(reader.read_record::<Map>(&mut buffer)?.is_none());

        Ok(())
    }
}
