//! A local alignment annotated with the lengths of the aligned sequences.
//!
//! Matches are the output of comparing a set of sequences against each other.
//! The length percentages are what allow redundant or contained sequences to
//! be detected downstream.

use std::str::FromStr;

use crate::core::Identified;
use crate::core::Located;
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
use crate::record::parse_usize;
use crate::record::split_fields;
use crate::record::Align;
use crate::record::ParseError;
use crate::record::Path;
use crate::record::Record;
use crate::record::DELIMITER;
use crate::Format;

/// The optional header line of the `match` format.
pub const HEADER: &str = "query.name\tquery.start\tquery.end\tquery.length\tquery.length.%\t\
                          match.length.%\tsubject.name\tsubject.start\tsubject.end\t\
                          subject.length\tsubject.length.%\tE.value\tScore\tIdentity\tpath";

/// A record of the `match` format.
#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    /// The local alignment and the identifier of its chain.
    path: Path,

    /// The length of the match on the query.
    query_length: usize,

    /// The length of the match on the query over the length of the query.
    query_length_perc: f64,

    /// The length of the match on the query over the length of the subject.
    match_length_perc: f64,

    /// The length of the match on the subject.
    subject_length: usize,

    /// The length of the match on the subject over the length of the subject.
    subject_length_perc: f64,
}

impl Match {
    /// Creates a new [`Match`].
    pub fn new(
        path: Path,
        query_length: usize,
        query_length_perc: f64,
        match_length_perc: f64,
        subject_length: usize,
        subject_length_perc: f64,
    ) -> Self {
        Self {
            path,
            query_length,
            query_length_perc,
            match_length_perc,
            subject_length,
            subject_length_perc,
        }
    }

    /// Gets the length of the match on the query.
    pub fn query_length(&self) -> usize {
        self.query_length
    }

    /// Gets the fraction of the query covered by the match.
    pub fn query_length_perc(&self) -> f64 {
        self.query_length_perc
    }

    /// Gets the length of the match on the query over the length of the
    /// subject.
    pub fn match_length_perc(&self) -> f64 {
        self.match_length_perc
    }

    /// Gets the length of the match on the subject.
    pub fn subject_length(&self) -> usize {
        self.subject_length
    }

    /// Gets the fraction of the subject covered by the match.
    pub fn subject_length_perc(&self) -> f64 {
        self.subject_length_perc
    }

    /// Gets the underlying path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes `self` and returns the underlying path.
    pub fn into_path(self) -> Path {
        self.path
    }

    /// Reconstructs the total length of the query sequence.
    ///
    /// [`None`] is returned if the query percentage is not strictly positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::record::Match;
    ///
    /// let line = "q1\t1\t100\t100\t0.250000\t0.500000\ts1\t1\t100\t100\t0.500000\t0\t90\t99\t1";
    /// let m = line.parse::<Match>()?;
    ///
    /// assert_eq!(m.query_seqlength(), Some(400));
    /// assert_eq!(m.subject_seqlength(), Some(200));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn query_seqlength(&self) -> Option<usize> {
        seqlength(self.query_length, self.query_length_perc)
    }

    /// Reconstructs the total length of the subject sequence.
    ///
    /// [`None`] is returned if the subject percentage is not strictly positive.
    pub fn subject_seqlength(&self) -> Option<usize> {
        seqlength(self.subject_length, self.subject_length_perc)
    }

    /// Returns whether two matches are duplicates of one another.
    ///
    /// Two matches are duplicates when their scores are equal and they relate
    /// the same two ranges, in either order.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::record::Match;
    ///
    /// let a = "q1\t1\t100\t100\t1.0\t1.0\ts1\t1\t100\t100\t1.0\t0\t90\t99\t1"
    ///     .parse::<Match>()?;
    /// let b = "s1\t1\t100\t100\t1.0\t1.0\tq1\t1\t100\t100\t1.0\t0\t90\t99\t2"
    ///     .parse::<Match>()?;
    ///
    /// assert!(a.is_doublon_with(&b));
    /// assert!(b.is_doublon_with(&a));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_doublon_with(&self, other: &Match) -> bool {
        if self.identity() != other.identity()
            || self.score() != other.score()
            || self.e_value() != other.e_value()
        {
            return false;
        }

        (self.query() == other.query() && self.subject() == other.subject())
            || (self.query() == other.subject() && self.subject() == other.query())
    }
}

/// Divides a match length by its coverage fraction.
fn seqlength(length: usize, perc: f64) -> Option<usize> {
    if perc <= 0.0 || !perc.is_finite() {
        return None;
    }

    Some((length as f64 / perc).round() as usize)
}

impl Located for Match {
    fn range(&self) -> &Range {
        self.path.range()
    }
}

impl Identified for Match {
    fn id(&self) -> usize {
        self.path.id()
    }
}

impl Paired for Match {
    fn query(&self) -> &Range {
        self.path.query()
    }

    fn subject(&self) -> &Range {
        self.path.subject()
    }
}

impl Scored for Match {
    fn e_value(&self) -> f64 {
        self.path.e_value()
    }

    fn score(&self) -> u64 {
        self.path.score()
    }

    fn identity(&self) -> f64 {
        self.path.identity()
    }
}

impl Relocate for Match {
    fn relocate(&self, range: Range) -> Self {
        Self {
            path: self.path.relocate(range),
            ..self.clone()
        }
    }
}

impl Record for Match {
    const FORMAT: Format = Format::Match;
    const HEADER: Option<&'static str> = Some(HEADER);
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (query, subject) = (self.query(), self.subject());

        let parts = [
            query.seqname().to_string(),
            query.start().to_string(),
            query.end().to_string(),
            self.query_length.to_string(),
            format_f(self.query_length_perc),
            format_f(self.match_length_perc),
            subject.seqname().to_string(),
            subject.start().to_string(),
            subject.end().to_string(),
            self.subject_length.to_string(),
            format_f(self.subject_length_perc),
            format_g(self.e_value()),
            self.score().to_string(),
            format_f(self.identity()),
            self.id().to_string(),
        ];

        write!(f, "{}", parts.join(DELIMITER.to_string().as_str()))
    }
}

impl FromStr for Match {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_fields(s, Format::Match)?;

        let query = parse_range("query", parts[0], parts[1], parts[2])?;
        let query_length = parse_usize("query length", parts[3])?;
        let query_length_perc = parse_f64("query length percentage", parts[4])?;
        let match_length_perc = parse_f64("match length percentage", parts[5])?;
        let subject = parse_range("subject", parts[6], parts[7], parts[8])?;
        let subject_length = parse_usize("subject length", parts[9])?;
        let subject_length_perc = parse_f64("subject length percentage", parts[10])?;
        let e_value = parse_e_value(parts[11])?;
        let score = parse_score(parts[12])?;
        let identity = parse_f64("identity", parts[13])?;
        let id = parse_usize("id", parts[14])?;

        let path = Path::new(id, Align::new(query, subject, e_value, score, identity));

        Ok(Self::new(
            path,
            query_length,
            query_length_perc,
            match_length_perc,
            subject_length,
            subject_length_perc,
        ))
    }
}
