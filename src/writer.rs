//! A writer of tab-separated record files.

use std::io::Write;
use std::io::{self};

use crate::record::Record;

/// A writer of tab-separated record files.
#[derive(Debug)]
pub struct Writer<W>(W)
where
    W: Write;

impl<W> Writer<W>
where
    W: Write,
{
    /// Creates a record writer.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::record::Map;
    ///
    /// let mut writer = repet_coords::Writer::new(Vec::new());
    /// writer.write_record(&"TE1\tchr1\t100\t200".parse::<Map>()?)?;
    ///
    /// assert_eq!(writer.into_inner(), b"TE1\tchr1\t100\t200\n");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(inner: W) -> Self {
        Self(inner)
    }

    /// Gets a mutable reference to the inner writer.
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.0
    }

    /// Consumes self and returns the inner writer.
    pub fn into_inner(self) -> W {
        self.0
    }

    /// Writes the header line of the format of `R`, if it has one.
    pub fn write_header<R>(&mut self) -> io::Result<()>
    where
        R: Record,
    {
        match R::HEADER {
            Some(header) => writeln!(self.0, "{header}"),
            None => Ok(()),
        }
    }

    /// Writes a single record as one line.
    pub fn write_record<R>(&mut self, record: &R) -> io::Result<()>
    where
        R: Record,
    {
        writeln!(self.0, "{record}")
    }

    /// Writes every record, one per line.
    pub fn write_records<'a, R, I>(&mut self, records: I) -> io::Result<()>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        for record in records {
            self.write_record(record)?;
        }

        Ok(())
    }

    /// Flushes the inner writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}
