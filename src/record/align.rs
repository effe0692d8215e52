//! A pairwise local alignment between a query and a subject.
//!
//! The query range of an [`Align`] always lies on the direct strand. When an
//! aligner reports a query on the reverse strand, only the query is reversed
//! on construction. The subject keeps its coordinates as given, and its strand
//! is the strand of the alignment.

use std::str::FromStr;

use crate::core::range;
use crate::core::Located;
use crate::core::Merge;
use crate::core::Paired;
use crate::core::Range;
use crate::core::Relocate;
use crate::core::Scored;
use crate::record::format_f;
use crate::record::format_g;
use crate::record::parse_e_value;
use crate::record::parse_f64;
use crate::record::parse_range;
use crate::record::parse_score;
use crate::record::split_fields;
use crate::record::ParseError;
use crate::record::Record;
use crate::record::DELIMITER;
use crate::Format;

/// A record of the `align` format.
#[derive(Clone, Debug, PartialEq)]
pub struct Align {
    /// The query range (always on the direct strand).
    query: Range,

    /// The subject range.
    subject: Range,

    /// The E-value.
    e_value: f64,

    /// The score.
    score: u64,

    /// The percentage identity.
    identity: f64,
}

impl Align {
    /// Creates a new [`Align`], moving the query onto the direct strand.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::core::Paired as _;
    /// use repet_coords::core::Range;
    /// use repet_coords::record::Align;
    ///
    /// let align = Align::new(
    ///     Range::try_new("q1", 500, 100)?,
    ///     Range::try_new("s1", 10, 400)?,
    ///     1e-20,
    ///     300,
    ///     95.5,
    /// );
    ///
    /// assert_eq!(align.query(), &Range::try_new("q1", 100, 500)?);
    /// assert_eq!(align.subject(), &Range::try_new("s1", 10, 400)?);
    /// assert!(align.is_on_direct_strand());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(query: Range, subject: Range, e_value: f64, score: u64, identity: f64) -> Self {
        let query = match query.is_on_direct_strand() {
            true => query,
            false => query.reverse(),
        };

        Self {
            query,
            subject,
            e_value,
            score,
            identity,
        }
    }

    /// Returns whether the subject lies on the direct strand.
    pub fn is_on_direct_strand(&self) -> bool {
        self.subject.is_on_direct_strand()
    }

    /// Returns the same alignment with the subject as the query.
    pub fn reverse(&self) -> Self {
        Self::new(
            self.subject.clone(),
            self.query.clone(),
            self.e_value,
            self.score,
            self.identity,
        )
    }

    /// Gets the length of the alignment on the query.
    pub fn query_len(&self) -> usize {
        self.query.len()
    }

    /// Gets the length of the alignment on the subject.
    pub fn subject_len(&self) -> usize {
        self.subject.len()
    }

    /// Returns a copy on other ranges, keeping the scores. The query is moved
    /// back onto the direct strand if needed and the subject is kept as is.
    pub(crate) fn with_ranges(&self, query: Range, subject: Range) -> Self {
        Self::new(query, subject, self.e_value, self.score, self.identity)
    }
}

impl Located for Align {
    fn range(&self) -> &Range {
        &self.query
    }
}

impl Paired for Align {
    fn query(&self) -> &Range {
        &self.query
    }

    fn subject(&self) -> &Range {
        &self.subject
    }
}

impl Scored for Align {
    fn e_value(&self) -> f64 {
        self.e_value
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn identity(&self) -> f64 {
        self.identity
    }
}

impl Merge for Align {
    /// Merges two alignments between the same pair of sequences.
    ///
    /// Both ranges are merged, and the best of each score is kept: the highest
    /// score, the lowest E-value and the highest identity.
    fn merge(&self, other: &Self) -> range::Result<Self> {
        let query = self.query.merge(&other.query)?;
        let subject = self.subject.merge(&other.subject)?;

        Ok(Self::new(
            query,
            subject,
            self.e_value.min(other.e_value),
            self.score.max(other.score),
            self.identity.max(other.identity),
        ))
    }
}

impl Relocate for Align {
    /// Moves the query onto `range`. If `range` is on the reverse strand, the
    /// query is reversed back onto the direct strand and the subject is left
    /// untouched.
    fn relocate(&self, range: Range) -> Self {
        self.with_ranges(range, self.subject.clone())
    }
}

impl Record for Align {
    const FORMAT: Format = Format::Align;
}

impl std::fmt::Display for Align {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            self.query,
            self.subject,
            format_g(self.e_value),
            self.score,
            format_f(self.identity)
        )
    }
}

impl FromStr for Align {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_fields(s, Format::Align)?;
        parse_align_fields(&parts)
    }
}

/// Parses the nine `align` fields.
pub(crate) fn parse_align_fields(parts: &[&str]) -> Result<Align, ParseError> {
    let query = parse_range("query", parts[0], parts[1], parts[2])?;
    let subject = parse_range("subject", parts[3], parts[4], parts[5])?;
    let e_value = parse_e_value(parts[6])?;
    let score = parse_score(parts[7])?;
    let identity = parse_f64("identity", parts[8])?;

    Ok(Align::new(query, subject, e_value, score, identity))
}

#[cfg(test)]
pub mod tests {
    use std::cmp::Ordering;

    use super::*;

    #[test]
    fn test_parse_reverse_query() -> Result<(), Box<dyn std::error::Error>> {
        let align = "q1\t500\t100\ts1\t10\t400\t1e-20\t300\t95.5".parse::<Align>()?;

        assert_eq!(align.query(), &Range::try_new("q1", 100, 500)?);
        assert_eq!(align.subject(), &Range::try_new("s1", 10, 400)?);
        assert_eq!(align.e_value(), 1e-20);
        assert_eq!(align.score(), 300);
        assert_eq!(align.identity(), 95.5);
        assert!(align.is_on_direct_strand());

        assert_eq!(
            align.to_string(),
            "q1\t100\t500\ts1\t10\t400\t1e-20\t300\t95.500000"
        );

        Ok(())
    }

    #[test]
    fn test_reverse_query_keeps_subject_order() -> Result<(), Box<dyn std::error::Error>> {
        let direct = "q1\t500\t100\ts1\t10\t400\t0\t42\t80".parse::<Align>()?;
        assert_eq!(direct.subject(), &Range::try_new("s1", 10, 400)?);
        assert!(direct.is_on_direct_strand());

        let reverse = "q1\t500\t100\ts1\t400\t10\t0\t42\t80".parse::<Align>()?;
        assert_eq!(reverse.query(), &Range::try_new("q1", 100, 500)?);
        assert_eq!(reverse.subject(), &Range::try_new("s1", 400, 10)?);
        assert!(!reverse.is_on_direct_strand());

        Ok(())
    }

    #[test]
    fn test_parse_direct_query() -> Result<(), Box<dyn std::error::Error>> {
        let align = "q1\t100\t500\ts1\t400\t10\t0\t42\t80".parse::<Align>()?;

        assert_eq!(align.query(), &Range::try_new("q1", 100, 500)?);
        assert_eq!(align.subject(), &Range::try_new("s1", 400, 10)?);
        assert_eq!(align.to_string().parse::<Align>()?, align);

        Ok(())
    }

    #[test]
    fn test_invalid_align() {
        let err = "q1\t100\t500\ts1\t400\t10\t0\t42"
            .parse::<Align>()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid number of fields in align record: expected 9 fields, found 8 fields"
        );

        let err = "q1\t100\t500\ts1\t400\tx\t0\t42\t80"
            .parse::<Align>()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid subject: invalid digit found in string"
        );

        let err = "q1\t100\t500\ts1\t400\t10\t0\t42\tnope"
            .parse::<Align>()
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid identity: invalid float literal");
    }

    #[test]
    fn test_merge() -> Result<(), Box<dyn std::error::Error>> {
        let a = "q1\t100\t200\ts1\t1000\t1100\t1e-10\t50\t90".parse::<Align>()?;
        let b = "q1\t150\t300\ts1\t1050\t1200\t1e-30\t40\t95".parse::<Align>()?;

        let merged = a.merge(&b)?;
        assert_eq!(merged.query(), &Range::try_new("q1", 100, 300)?);
        assert_eq!(merged.subject(), &Range::try_new("s1", 1000, 1200)?);
        assert_eq!(merged.e_value(), 1e-30);
        assert_eq!(merged.score(), 50);
        assert_eq!(merged.identity(), 95.0);

        let c = "q1\t150\t300\ts2\t1050\t1200\t1e-30\t40\t95".parse::<Align>()?;
        assert!(a.merge(&c).is_err());

        Ok(())
    }

    #[test]
    fn test_relocate_onto_reverse_range() -> Result<(), Box<dyn std::error::Error>> {
        let align = "q1\t100\t200\ts1\t1000\t1100\t0\t50\t90".parse::<Align>()?;
        let moved = align.relocate(Range::try_new("chunk1", 51, 1)?);

        assert_eq!(moved.query(), &Range::try_new("chunk1", 1, 51)?);
        assert_eq!(moved.subject(), &Range::try_new("s1", 1000, 1100)?);

        Ok(())
    }

    #[test]
    fn test_ordering_by_ranges() -> Result<(), Box<dyn std::error::Error>> {
        let a = "q1\t100\t200\ts1\t1000\t1100\t0\t50\t90".parse::<Align>()?;
        let b = "q1\t100\t200\ts1\t900\t1100\t0\t50\t90".parse::<Align>()?;
        let c = "q1\t90\t200\ts1\t1000\t1100\t0\t50\t90".parse::<Align>()?;

        assert_eq!(a.compare_ranges(&b), Ordering::Greater);
        assert_eq!(c.compare_ranges(&a), Ordering::Less);
        assert_eq!(a.compare_ranges(&a.clone()), Ordering::Equal);

        Ok(())
    }
}
