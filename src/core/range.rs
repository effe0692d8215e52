//! A 1-based, closed interval on a named sequence.
//!
//! The strand of a range is not stored explicitly. Instead, it is encoded by
//! the relative order of the start and end coordinates.
//!
//! ```text
//! ================ seq0 ===============
//!
//! | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 |
//! -------------------------------------
//! |   |   | X | X | X | X | X |   |   |  <= seq0 3 7
//! |   |   |   |   | X | X | X | X | X |  <= seq0 9 5
//! ```
//!
//! - The first range above (`seq0 3 7`) lies on the direct strand and covers
//!   positions 3 through 7 (both inclusive).
//! - The second range above (`seq0 9 5`) lies on the reverse strand and covers
//!   positions 9 down through 5 (both inclusive).
//!
//! A range whose start equals its end carries no strand information and is
//! rejected with [`Error::Degenerate`]. Coordinates are 1-based, so `0` is
//! rejected with [`Error::ZeroCoordinate`].

use std::cmp::Ordering;
use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::Strand;

/// The delimiter between the fields of a range.
const DELIMITER: char = '\t';

/// The number of fields in a serialized range.
const NUM_FIELDS: usize = 3;

/// An error related to a [`Range`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A coordinate was zero.
    ZeroCoordinate(String),

    /// The start and end coordinates were equal.
    Degenerate(String, usize),

    /// Two ranges were combined but do not sit on the same sequence.
    SeqnameMismatch(String, String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ZeroCoordinate(seqname) => {
                write!(f, "coordinates on {seqname} must be 1-based, found 0")
            }
            Error::Degenerate(seqname, position) => write!(
                f,
                "start and end are both {position} on {seqname}: the strand cannot be determined"
            ),
            Error::SeqnameMismatch(a, b) => {
                write!(f, "cannot combine a range on {a} with a range on {b}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// An error related to parsing a [`Range`].
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields.
    IncorrectNumberOfFields(usize),

    /// An invalid start.
    InvalidStart(ParseIntError),

    /// An invalid end.
    InvalidEnd(ParseIntError),

    /// The parsed values did not form a valid range.
    InvalidRange(Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in range: expected {NUM_FIELDS} fields, found {n} fields"
            ),
            ParseError::InvalidStart(err) => write!(f, "invalid start: {err}"),
            ParseError::InvalidEnd(err) => write!(f, "invalid end: {err}"),
            ParseError::InvalidRange(err) => write!(f, "invalid range: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A strand-aware, closed interval on a named sequence.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Range {
    /// The name of the sequence the range sits on.
    seqname: String,

    /// The start coordinate.
    start: usize,

    /// The end coordinate.
    end: usize,
}

impl Range {
    /// Attempts to create a new [`Range`].
    ///
    /// # Examples
    ///
    /// ```
    /// use omics::coordinate::Strand;
    /// use repet_coords::core::Range;
    ///
    /// let range = Range::try_new("chr1", 200, 100)?;
    ///
    /// assert_eq!(range.seqname(), "chr1");
    /// assert_eq!(range.min(), 100);
    /// assert_eq!(range.max(), 200);
    /// assert_eq!(range.strand(), Strand::Negative);
    ///
    /// assert!(Range::try_new("chr1", 100, 100).is_err());
    /// assert!(Range::try_new("chr1", 0, 100).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(seqname: impl Into<String>, start: usize, end: usize) -> Result<Self> {
        let seqname = seqname.into();

        if start == 0 || end == 0 {
            return Err(Error::ZeroCoordinate(seqname));
        }

        if start == end {
            return Err(Error::Degenerate(seqname, start));
        }

        Ok(Self {
            seqname,
            start,
            end,
        })
    }

    /// Gets the name of the sequence.
    pub fn seqname(&self) -> &str {
        &self.seqname
    }

    /// Gets the start coordinate.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Gets the end coordinate.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Gets the lowest coordinate regardless of strand.
    pub fn min(&self) -> usize {
        self.start.min(self.end)
    }

    /// Gets the highest coordinate regardless of strand.
    pub fn max(&self) -> usize {
        self.start.max(self.end)
    }

    /// Gets the number of positions covered by the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::core::Range;
    ///
    /// assert_eq!(Range::try_new("chr1", 10, 19)?.len(), 10);
    /// assert_eq!(Range::try_new("chr1", 19, 10)?.len(), 10);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.max() - self.min() + 1
    }

    /// Gets the strand of the range.
    pub fn strand(&self) -> Strand {
        match self.is_on_direct_strand() {
            true => Strand::Positive,
            false => Strand::Negative,
        }
    }

    /// Returns whether the range lies on the direct strand (`start < end`).
    pub fn is_on_direct_strand(&self) -> bool {
        self.start < self.end
    }

    /// Returns the same range on the opposite strand.
    pub fn reverse(&self) -> Self {
        Self {
            seqname: self.seqname.clone(),
            start: self.end,
            end: self.start,
        }
    }

    /// Returns a copy of the range moved onto another sequence, keeping the
    /// coordinates.
    pub fn with_seqname(&self, seqname: impl Into<String>) -> Self {
        Self {
            seqname: seqname.into(),
            start: self.start,
            end: self.end,
        }
    }

    /// Returns whether two ranges share at least one position.
    ///
    /// The strand of either range is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::core::Range;
    ///
    /// let a = Range::try_new("chr1", 100, 200)?;
    /// let b = Range::try_new("chr1", 300, 200)?;
    /// let c = Range::try_new("chr2", 100, 200)?;
    ///
    /// assert!(a.overlaps(&b));
    /// assert!(b.overlaps(&a));
    /// assert!(!a.overlaps(&c));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn overlaps(&self, other: &Range) -> bool {
        self.seqname == other.seqname && self.min() <= other.max() && other.min() <= self.max()
    }

    /// Gets the number of positions shared by two ranges.
    pub fn overlap_len(&self, other: &Range) -> usize {
        if !self.overlaps(other) {
            return 0;
        }

        self.max().min(other.max()) - self.min().max(other.min()) + 1
    }

    /// Returns whether `other` lies entirely within this range.
    pub fn contains(&self, other: &Range) -> bool {
        self.seqname == other.seqname && self.min() <= other.min() && other.max() <= self.max()
    }

    /// Merges two ranges into the smallest range covering both.
    ///
    /// The merged range keeps the strand of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::core::Range;
    ///
    /// let a = Range::try_new("chr1", 100, 200)?;
    /// let b = Range::try_new("chr1", 150, 300)?;
    /// assert_eq!(a.merge(&b)?, Range::try_new("chr1", 100, 300)?);
    ///
    /// let c = Range::try_new("chr2", 150, 300)?;
    /// assert!(a.merge(&c).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn merge(&self, other: &Range) -> Result<Self> {
        if self.seqname != other.seqname {
            return Err(Error::SeqnameMismatch(
                self.seqname.clone(),
                other.seqname.clone(),
            ));
        }

        let min = self.min().min(other.min());
        let max = self.max().max(other.max());

        Ok(self.oriented(min, max))
    }

    /// Removes the positions shared with `other` from this range.
    ///
    /// Zero, one or two pieces remain, ordered from left to right, each one
    /// on the sequence and strand of `self`. A piece that would cover a single
    /// position cannot be represented and is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::core::Range;
    ///
    /// let range = Range::try_new("chr1", 1, 100)?;
    ///
    /// let pieces = range.diff(&Range::try_new("chr1", 40, 60)?);
    /// assert_eq!(
    ///     pieces,
    ///     vec![Range::try_new("chr1", 1, 39)?, Range::try_new("chr1", 61, 100)?]
    /// );
    ///
    /// assert!(range.diff(&Range::try_new("chr1", 200, 1)?).is_empty());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn diff(&self, other: &Range) -> Vec<Self> {
        if !self.overlaps(other) {
            return vec![self.clone()];
        }

        let mut pieces = Vec::with_capacity(2);

        if self.min() + 1 < other.min() {
            pieces.push(self.oriented(self.min(), other.min() - 1));
        }

        if other.max() + 1 < self.max() {
            pieces.push(self.oriented(other.max() + 1, self.max()));
        }

        pieces
    }

    /// Compares two ranges by sequence name, then lowest coordinate, then
    /// highest coordinate, then start.
    ///
    /// Ranges on reverse strands sort after the ranges covering the same
    /// positions on the direct strand.
    pub fn compare(&self, other: &Range) -> Ordering {
        self.seqname
            .cmp(&other.seqname)
            .then_with(|| self.min().cmp(&other.min()))
            .then_with(|| self.max().cmp(&other.max()))
            .then_with(|| self.start.cmp(&other.start))
    }

    /// Builds a range on this sequence and strand from `min < max`.
    fn oriented(&self, min: usize, max: usize) -> Self {
        let (start, end) = match self.is_on_direct_strand() {
            true => (min, max),
            false => (max, min),
        };

        Self {
            seqname: self.seqname.clone(),
            start,
            end,
        }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}{DELIMITER}{}",
            self.seqname, self.start, self.end
        )
    }
}

impl FromStr for Range {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts = s.split(DELIMITER).collect::<Vec<_>>();
        if parts.len() != NUM_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        let start = parts[1].parse().map_err(ParseError::InvalidStart)?;
        let end = parts[2].parse().map_err(ParseError::InvalidEnd)?;

        Range::try_new(parts[0], start, end).map_err(ParseError::InvalidRange)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_strand_is_encoded_by_order() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let direct = Range::try_new("chr1", 10, 20)?;
        assert!(direct.is_on_direct_strand());
        assert_eq!(direct.strand(), Strand::Positive);

        let reverse = direct.reverse();
        assert!(!reverse.is_on_direct_strand());
        assert_eq!(reverse.strand(), Strand::Negative);
        assert_eq!(reverse.start(), 20);
        assert_eq!(reverse.end(), 10);
        assert_eq!(reverse.min(), 10);
        assert_eq!(reverse.max(), 20);

        Ok(())
    }

    #[test]
    fn test_invalid_ranges() {
        let err = Range::try_new("chr1", 5, 5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "start and end are both 5 on chr1: the strand cannot be determined"
        );

        let err = Range::try_new("chr1", 0, 5).unwrap_err();
        assert_eq!(err, Error::ZeroCoordinate(String::from("chr1")));
    }

    #[test]
    fn test_overlap_is_symmetric_and_inclusive() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let ranges = [
            Range::try_new("chr1", 1, 10)?,
            Range::try_new("chr1", 10, 20)?,
            Range::try_new("chr1", 30, 21)?,
            Range::try_new("chr1", 25, 40)?,
            Range::try_new("chr2", 1, 10)?,
        ];

        for a in &ranges {
            for b in &ranges {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{a} vs {b}");
            }
        }

        assert!(ranges[0].overlaps(&ranges[1]));
        assert_eq!(ranges[0].overlap_len(&ranges[1]), 1);
        assert!(!ranges[1].overlaps(&ranges[2]));
        assert!(ranges[2].overlaps(&ranges[3]));
        assert_eq!(ranges[2].overlap_len(&ranges[3]), 6);
        assert!(!ranges[0].overlaps(&ranges[4]));

        Ok(())
    }

    #[test]
    fn test_merge_keeps_strand_of_self() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = Range::try_new("chr1", 200, 100)?;
        let b = Range::try_new("chr1", 150, 300)?;

        assert_eq!(a.merge(&b)?, Range::try_new("chr1", 300, 100)?);
        assert_eq!(b.merge(&a)?, Range::try_new("chr1", 100, 300)?);

        let err = a.merge(&Range::try_new("chr2", 1, 2)?).unwrap_err();
        assert_eq!(
            err,
            Error::SeqnameMismatch(String::from("chr1"), String::from("chr2"))
        );

        Ok(())
    }

    #[test]
    fn test_diff() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let reverse = Range::try_new("chr1", 100, 1)?;

        // Left side removed.
        assert_eq!(
            reverse.diff(&Range::try_new("chr1", 1, 50)?),
            vec![Range::try_new("chr1", 100, 51)?]
        );

        // Right side removed.
        assert_eq!(
            reverse.diff(&Range::try_new("chr1", 60, 120)?),
            vec![Range::try_new("chr1", 59, 1)?]
        );

        // Split in two.
        assert_eq!(
            reverse.diff(&Range::try_new("chr1", 20, 30)?),
            vec![
                Range::try_new("chr1", 19, 1)?,
                Range::try_new("chr1", 100, 31)?
            ]
        );

        // No overlap.
        assert_eq!(
            reverse.diff(&Range::try_new("chr2", 20, 30)?),
            vec![reverse.clone()]
        );

        // Single base remainders are dropped.
        assert_eq!(
            reverse.diff(&Range::try_new("chr1", 2, 99)?),
            Vec::<Range>::new()
        );

        Ok(())
    }

    #[test]
    fn test_ordering() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut ranges = vec![
            Range::try_new("chr2", 1, 10)?,
            Range::try_new("chr1", 20, 5)?,
            Range::try_new("chr1", 5, 20)?,
            Range::try_new("chr1", 5, 10)?,
        ];
        ranges.sort_by(Range::compare);

        assert_eq!(
            ranges,
            vec![
                Range::try_new("chr1", 5, 10)?,
                Range::try_new("chr1", 5, 20)?,
                Range::try_new("chr1", 20, 5)?,
                Range::try_new("chr2", 1, 10)?,
            ]
        );

        Ok(())
    }

    #[test]
    fn test_display_and_parse() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let range = "chr1\t500\t100".parse::<Range>()?;
        assert_eq!(range, Range::try_new("chr1", 500, 100)?);
        assert_eq!(range.to_string(), "chr1\t500\t100");

        let err = "chr1\t?\t100".parse::<Range>().unwrap_err();
        assert_eq!(err.to_string(), "invalid start: invalid digit found in string");

        let err = "chr1\t100".parse::<Range>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid number of fields in range: expected 3 fields, found 2 fields"
        );

        Ok(())
    }
}
