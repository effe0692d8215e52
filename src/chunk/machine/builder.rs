//! A builder for a [`Machine`].

use std::collections::HashMap;
use std::io::BufRead;

use rust_lapper as lapper;
use tracing::debug;

use crate::chunk::machine::MissPolicy;
use crate::chunk::Machine;
use crate::core::Located;
use crate::core::Named;
use crate::reader;
use crate::record::Map;

/// The inner value of the chunk lookup data structure.
type Iv = lapper::Interval<usize, Map>;

/// An error related to building a [`Machine`].
#[derive(Debug)]
pub enum Error {
    /// An error reading the chunk table.
    InvalidChunkTable(reader::Error),

    /// Two chunks share the same name.
    DuplicateChunk(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidChunkTable(err) => write!(f, "invalid chunk table: {err}"),
            Error::DuplicateChunk(name) => write!(f, "duplicate chunk: {name}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for a [`Machine`].
#[derive(Clone, Debug, Default)]
pub struct Builder {
    /// What the machine does with records for which no chunk can be found.
    miss_policy: MissPolicy,
}

impl Builder {
    /// Sets the miss policy of the machine.
    pub fn miss_policy(mut self, miss_policy: MissPolicy) -> Self {
        self.miss_policy = miss_policy;
        self
    }

    /// Builds a [`Machine`] from a chunk table in the `map` format.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::chunk::MissPolicy;
    ///
    /// let data = b"chunk1\tchr1\t1\t200000\nchunk2\tchr1\t190001\t390000\n";
    /// let reader = repet_coords::Reader::new(&data[..]);
    ///
    /// let machine = repet_coords::chunk::machine::Builder::default()
    ///     .miss_policy(MissPolicy::Fail)
    ///     .try_build_from(reader)?;
    ///
    /// assert_eq!(machine.num_chunks(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build_from<T>(&self, mut reader: reader::Reader<T>) -> Result<Machine>
    where
        T: BufRead,
    {
        let chunks = reader
            .read_all::<Map>()
            .map_err(Error::InvalidChunkTable)?;

        self.build_from_chunks(chunks)
    }

    /// Builds a [`Machine`] from chunk records.
    pub fn build_from_chunks<I>(&self, chunks: I) -> Result<Machine>
    where
        I: IntoIterator<Item = Map>,
    {
        let mut hm = HashMap::<String, Vec<Iv>>::default();
        let mut by_name = HashMap::<String, Map>::new();

        for chunk in chunks {
            if by_name.contains_key(chunk.name()) {
                return Err(Error::DuplicateChunk(chunk.name().to_string()));
            }

            hm.entry(chunk.seqname().to_string())
                .or_default()
                .push(lapper::Interval {
                    start: chunk.min(),
                    stop: chunk.max() + 1,
                    val: chunk.clone(),
                });

            by_name.insert(chunk.name().to_string(), chunk);
        }

        debug!(
            "loaded {} chunk(s) over {} chromosome(s)",
            by_name.len(),
            hm.len()
        );

        let mut by_chromosome = HashMap::<String, lapper::Lapper<usize, Map>>::new();

        for (k, v) in hm.into_iter() {
            by_chromosome.insert(k, lapper::Lapper::new(v));
        }

        Ok(Machine {
            by_chromosome,
            by_name,
            miss_policy: self.miss_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reader;

    #[test]
    fn test_build_from_chunk_table() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"chunk1\tchr1\t1\t1000\n\nchunk2\tchr1\t901\t1900\nchunk3\tchr2\t1000\t1\n";
        let machine = Builder::default().try_build_from(Reader::new(&data[..]))?;

        assert_eq!(machine.num_chunks(), 3);
        assert_eq!(machine.miss_policy(), MissPolicy::Warn);
        assert_eq!(
            machine.chunk("chunk3").map(|chunk| chunk.to_string()),
            Some(String::from("chunk3\tchr2\t1000\t1"))
        );
        assert!(machine.chunk("chunk4").is_none());

        Ok(())
    }

    #[test]
    fn test_duplicate_chunk() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let chunks = vec![
            "chunk1\tchr1\t1\t1000".parse::<Map>()?,
            "chunk1\tchr2\t1\t1000".parse::<Map>()?,
        ];

        let err = Builder::default().build_from_chunks(chunks).unwrap_err();
        assert_eq!(err.to_string(), "duplicate chunk: chunk1");

        Ok(())
    }

    #[test]
    fn test_invalid_chunk_table() {
        let data = b"chunk1\tchr1\t1\n";
        let err = Builder::default()
            .try_build_from(Reader::new(&data[..]))
            .unwrap_err();

        assert!(matches!(err, Error::InvalidChunkTable(_)));
    }
}
