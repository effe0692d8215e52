//! A machine for translating records between chromosome and chunk
//! coordinates.

use std::collections::HashMap;
use std::str::FromStr;

use rust_lapper as lapper;
use tracing::debug;
use tracing::warn;

use crate::core::range;
use crate::core::Located;
use crate::core::Named;
use crate::core::Range;
use crate::core::Relocate;
use crate::record::Map;

pub mod builder;

pub use builder::Builder;

/// An error related to a [`Machine`].
#[derive(Debug)]
pub enum Error {
    /// No chunk could be found for a range.
    Unmapped(Range),

    /// A range expressed on a chunk lies beyond the end of the chunk.
    OutsideChunk {
        /// The name of the chunk.
        chunk: String,

        /// The length of the chunk.
        len: usize,

        /// The offending position.
        position: usize,
    },

    /// A translated range could not be created.
    InvalidRange(range::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Unmapped(range) => write!(
                f,
                "no chunk found for {}:{}-{}",
                range.seqname(),
                range.start(),
                range.end()
            ),
            Error::OutsideChunk {
                chunk,
                len,
                position,
            } => write!(
                f,
                "position {position} lies outside of chunk {chunk} ({len} bp)"
            ),
            Error::InvalidRange(err) => write!(f, "invalid translated range: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// What to do with a record for which no chunk can be found.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MissPolicy {
    /// Set the record aside, only logging at the debug level.
    Drop,

    /// Set the record aside and log a warning.
    #[default]
    Warn,

    /// Fail the whole translation.
    Fail,
}

/// An error when parsing a [`MissPolicy`].
#[derive(Debug)]
pub struct ParseMissPolicyError(String);

impl std::fmt::Display for ParseMissPolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is not a valid miss policy: expected one of drop, warn or fail",
            self.0
        )
    }
}

impl std::error::Error for ParseMissPolicyError {}

impl std::fmt::Display for MissPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissPolicy::Drop => write!(f, "drop"),
            MissPolicy::Warn => write!(f, "warn"),
            MissPolicy::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for MissPolicy {
    type Err = ParseMissPolicyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "drop" => Ok(MissPolicy::Drop),
            "warn" => Ok(MissPolicy::Warn),
            "fail" => Ok(MissPolicy::Fail),
            other => Err(ParseMissPolicyError(other.into())),
        }
    }
}

/// The outcome of translating a list of records.
#[derive(Clone, Debug, PartialEq)]
pub struct Translation<T> {
    /// The translated records.
    mapped: Vec<T>,

    /// The records for which no chunk could be found, untouched.
    unmapped: Vec<T>,
}

impl<T> Translation<T> {
    /// Gets the translated records.
    pub fn mapped(&self) -> &[T] {
        &self.mapped
    }

    /// Gets the records for which no chunk could be found.
    pub fn unmapped(&self) -> &[T] {
        &self.unmapped
    }

    /// Consumes `self` and returns the translated and the unmapped records.
    pub fn into_parts(self) -> (Vec<T>, Vec<T>) {
        (self.mapped, self.unmapped)
    }
}

/// A machine for translating records between chromosome and chunk
/// coordinates.
///
/// Generally, you will want to use a [`builder::Builder`] to construct one of
/// these.
#[derive(Debug)]
pub struct Machine {
    /// The chunks of each chromosome, indexed by their span.
    by_chromosome: HashMap<String, lapper::Lapper<usize, Map>>,

    /// The chunks, indexed by their name.
    by_name: HashMap<String, Map>,

    /// What to do with records for which no chunk can be found.
    miss_policy: MissPolicy,
}

impl Machine {
    /// Gets the number of chunks known to the machine.
    pub fn num_chunks(&self) -> usize {
        self.by_name.len()
    }

    /// Gets the miss policy of the machine.
    pub fn miss_policy(&self) -> MissPolicy {
        self.miss_policy
    }

    /// Gets a chunk by name.
    pub fn chunk(&self, name: &str) -> Option<&Map> {
        self.by_name.get(name)
    }

    /// Translates a record from chromosome coordinates onto every chunk it
    /// overlaps.
    ///
    /// The parts of the record falling outside of a chunk are clipped away.
    /// A projection left with a single base is not reported. An
    /// [`Error::Unmapped`] is returned when nothing is left.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::chunk::machine::Builder;
    /// use repet_coords::record::Map;
    ///
    /// let data = b"chunk1\tchr1\t1\t200000\n";
    /// let machine = Builder::default().try_build_from(repet_coords::Reader::new(&data[..]))?;
    ///
    /// let te = "TE1\tchr1\t50000\t50100".parse::<Map>()?;
    /// let translated = machine.chr_to_chunk(&te)?;
    ///
    /// assert_eq!(translated.len(), 1);
    /// assert_eq!(translated[0].to_string(), "TE1\tchunk1\t50000\t50100");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn chr_to_chunk<T>(&self, value: &T) -> Result<Vec<T>>
    where
        T: Relocate,
    {
        let Some(chunks) = self.by_chromosome.get(value.seqname()) else {
            return Err(Error::Unmapped(value.range().clone()));
        };

        let mut results = Vec::new();

        for entry in chunks.find(value.min(), value.max() + 1) {
            let chunk = &entry.val;

            let lo = value.min().max(chunk.min());
            let hi = value.max().min(chunk.max());

            if lo >= hi {
                continue;
            }

            let (from, to) = match value.is_on_direct_strand() {
                true => (lo, hi),
                false => (hi, lo),
            };

            let range = Range::try_new(
                chunk.name(),
                to_chunk(chunk, from),
                to_chunk(chunk, to),
            )
            .map_err(Error::InvalidRange)?;

            results.push(value.relocate(range));
        }

        if results.is_empty() {
            return Err(Error::Unmapped(value.range().clone()));
        }

        Ok(results)
    }

    /// Translates a record from chunk coordinates back onto its chromosome.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::chunk::machine::Builder;
    /// use repet_coords::record::Map;
    ///
    /// let data = b"chunk2\tchr1\t190001\t390000\n";
    /// let machine = Builder::default().try_build_from(repet_coords::Reader::new(&data[..]))?;
    ///
    /// let te = "TE1\tchunk2\t10\t1".parse::<Map>()?;
    ///
    /// assert_eq!(
    ///     machine.chunk_to_chr(&te)?.to_string(),
    ///     "TE1\tchr1\t190010\t190001"
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn chunk_to_chr<T>(&self, value: &T) -> Result<T>
    where
        T: Relocate,
    {
        let chunk = self
            .by_name
            .get(value.seqname())
            .ok_or_else(|| Error::Unmapped(value.range().clone()))?;

        let len = chunk.range().len();

        if value.max() > len {
            return Err(Error::OutsideChunk {
                chunk: chunk.name().to_string(),
                len,
                position: value.max(),
            });
        }

        let range = Range::try_new(
            chunk.seqname(),
            to_chromosome(chunk, value.start()),
            to_chromosome(chunk, value.end()),
        )
        .map_err(Error::InvalidRange)?;

        Ok(value.relocate(range))
    }

    /// Translates a list of records from chromosome to chunk coordinates.
    ///
    /// Records for which no chunk can be found are handled according to the
    /// [`MissPolicy`] of the machine.
    pub fn translate_chr_to_chunk<T>(&self, list: Vec<T>) -> Result<Translation<T>>
    where
        T: Relocate,
    {
        self.translate(list, |value| self.chr_to_chunk(value))
    }

    /// Translates a list of records from chunk to chromosome coordinates.
    ///
    /// Records located on an unknown chunk are handled according to the
    /// [`MissPolicy`] of the machine. Records lying beyond the end of their
    /// chunk always fail the translation.
    pub fn translate_chunk_to_chr<T>(&self, list: Vec<T>) -> Result<Translation<T>>
    where
        T: Relocate,
    {
        self.translate(list, |value| self.chunk_to_chr(value).map(|v| vec![v]))
    }

    /// Translates every record of a list, applying the miss policy.
    fn translate<T, F>(&self, list: Vec<T>, project: F) -> Result<Translation<T>>
    where
        T: Relocate,
        F: Fn(&T) -> Result<Vec<T>>,
    {
        let mut mapped = Vec::with_capacity(list.len());
        let mut unmapped = Vec::new();

        for value in list {
            match project(&value) {
                Ok(projected) => mapped.extend(projected),
                Err(Error::Unmapped(range)) => {
                    match self.miss_policy {
                        MissPolicy::Drop => debug!(
                            "no chunk found for {}:{}-{}",
                            range.seqname(),
                            range.start(),
                            range.end()
                        ),
                        MissPolicy::Warn => warn!(
                            "no chunk found for {}:{}-{}",
                            range.seqname(),
                            range.start(),
                            range.end()
                        ),
                        MissPolicy::Fail => return Err(Error::Unmapped(range)),
                    }

                    unmapped.push(value);
                }
                Err(err) => return Err(err),
            }
        }

        if !unmapped.is_empty() {
            debug!(
                "{} record(s) translated, {} record(s) unmapped",
                mapped.len(),
                unmapped.len()
            );
        }

        Ok(Translation { mapped, unmapped })
    }
}

/// Converts a chromosome position lying within a chunk to a chunk position.
fn to_chunk(chunk: &Map, position: usize) -> usize {
    match chunk.is_on_direct_strand() {
        true => position - chunk.min() + 1,
        false => chunk.max() - position + 1,
    }
}

/// Converts a chunk position to a chromosome position.
fn to_chromosome(chunk: &Map, position: usize) -> usize {
    match chunk.is_on_direct_strand() {
        true => chunk.min() + position - 1,
        false => chunk.max() + 1 - position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::machine;
    use crate::core::Paired as _;
    use crate::record::Path;
    use crate::record::Set;
    use crate::Reader;

    /// Two overlapping chunks on `chr1` and a reverse chunk on `chr2`.
    const CHUNKS: &[u8] = b"chunk1\tchr1\t1\t200000\n\
                            chunk2\tchr1\t190001\t390000\n\
                            chunk3\tchr2\t500\t101\n";

    fn build(miss_policy: MissPolicy) -> std::result::Result<Machine, builder::Error> {
        machine::Builder::default()
            .miss_policy(miss_policy)
            .try_build_from(Reader::new(CHUNKS))
    }

    #[test]
    fn test_chunk_starting_at_one_keeps_coordinates(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let machine = build(MissPolicy::Fail)?;
        let range = Range::try_new("chr1", 50000, 50100)?;

        let translated = machine.chr_to_chunk(&range)?;
        assert_eq!(translated, vec![Range::try_new("chunk1", 50000, 50100)?]);

        Ok(())
    }

    #[test]
    fn test_record_spanning_two_chunks() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let machine = build(MissPolicy::Fail)?;
        let set = "4\tTE1\tchr1\t189000\t195000".parse::<Set>()?;

        let translated = machine.chr_to_chunk(&set)?;
        assert_eq!(translated.len(), 2);
        assert_eq!(translated[0].to_string(), "4\tTE1\tchunk1\t189000\t195000");
        assert_eq!(translated[1].to_string(), "4\tTE1\tchunk2\t1\t5000");

        Ok(())
    }

    #[test]
    fn test_reverse_chunk() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let machine = build(MissPolicy::Fail)?;
        let map = "TE1\tchr2\t150\t120".parse::<Map>()?;

        let translated = machine.chr_to_chunk(&map)?;
        assert_eq!(translated.len(), 1);
        assert_eq!(translated[0].to_string(), "TE1\tchunk3\t351\t381");

        assert_eq!(machine.chunk_to_chr(&translated[0])?, map);

        Ok(())
    }

    #[test]
    fn test_path_round_trip() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let machine = build(MissPolicy::Fail)?;
        let path = "1\tchr2\t200\t300\ts1\t10\t110\t1e-30\t200\t97.5".parse::<Path>()?;

        let translated = machine.chr_to_chunk(&path)?;
        assert_eq!(translated.len(), 1);
        assert_eq!(translated[0].query(), &Range::try_new("chunk3", 201, 301)?);
        assert_eq!(translated[0].subject(), &Range::try_new("s1", 10, 110)?);

        assert_eq!(machine.chunk_to_chr(&translated[0])?, path);

        Ok(())
    }

    #[test]
    fn test_single_base_projection_is_discarded(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let machine = build(MissPolicy::Drop)?;
        let map = "TE1\tchr2\t500\t600".parse::<Map>()?;

        assert!(matches!(machine.chr_to_chunk(&map), Err(Error::Unmapped(_))));

        let translation = machine.translate_chr_to_chunk(vec![map.clone()])?;
        assert!(translation.mapped().is_empty());
        assert_eq!(translation.unmapped(), &[map]);

        Ok(())
    }

    #[test]
    fn test_miss_policies() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let maps = vec![
            "TE1\tchr1\t100\t200".parse::<Map>()?,
            "TE2\tchr3\t100\t200".parse::<Map>()?,
        ];

        for policy in [MissPolicy::Drop, MissPolicy::Warn] {
            let (mapped, unmapped) = build(policy)?
                .translate_chr_to_chunk(maps.clone())?
                .into_parts();

            assert_eq!(mapped.len(), 1);
            assert_eq!(unmapped, vec![maps[1].clone()]);
        }

        let err = build(MissPolicy::Fail)?
            .translate_chr_to_chunk(maps)
            .unwrap_err();
        assert_eq!(err.to_string(), "no chunk found for chr3:100-200");

        Ok(())
    }

    #[test]
    fn test_outside_chunk() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let machine = build(MissPolicy::Warn)?;
        let map = "TE1\tchunk3\t390\t410".parse::<Map>()?;

        let err = machine.translate_chunk_to_chr(vec![map]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "position 410 lies outside of chunk chunk3 (400 bp)"
        );

        let unknown = "TE1\tchunk9\t1\t10".parse::<Map>()?;
        let translation = machine.translate_chunk_to_chr(vec![unknown])?;
        assert_eq!(translation.unmapped().len(), 1);

        Ok(())
    }

    #[test]
    fn test_miss_policy_from_str() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!("drop".parse::<MissPolicy>()?, MissPolicy::Drop);
        assert_eq!("fail".parse::<MissPolicy>()?, MissPolicy::Fail);
        assert_eq!(MissPolicy::default(), MissPolicy::Warn);
        assert_eq!(MissPolicy::Warn.to_string(), "warn");

        let err = "skip".parse::<MissPolicy>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "skip is not a valid miss policy: expected one of drop, warn or fail"
        );

        Ok(())
    }
}
