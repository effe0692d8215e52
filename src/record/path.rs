//! A chain of local alignments sharing one identifier.

use std::str::FromStr;

use crate::core::range;
use crate::core::Identified;
use crate::core::Located;
use crate::core::Merge;
use crate::core::Paired;
use crate::core::Range;
use crate::core::Relocate;
use crate::core::Scored;
use crate::record::align::parse_align_fields;
use crate::record::parse_usize;
use crate::record::split_fields;
use crate::record::Align;
use crate::record::Map;
use crate::record::ParseError;
use crate::record::Record;
use crate::record::Set;
use crate::record::DELIMITER;
use crate::Format;

/// A record of the `path` format.
///
/// All the local alignments (HSPs) that were chained into a single hit carry
/// the same `id`.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// The identifier of the chain.
    id: usize,

    /// The local alignment.
    align: Align,
}

impl Path {
    /// Creates a new [`Path`].
    pub fn new(id: usize, align: Align) -> Self {
        Self { id, align }
    }

    /// Gets the alignment without its identifier.
    pub fn align(&self) -> &Align {
        &self.align
    }

    /// Consumes `self` and returns the alignment without its identifier.
    pub fn into_align(self) -> Align {
        self.align
    }

    /// Returns whether the subject lies on the direct strand.
    pub fn is_on_direct_strand(&self) -> bool {
        self.align.is_on_direct_strand()
    }

    /// Returns whether two local alignments can be chained into one path.
    ///
    /// This is the case when they belong to different paths, relate the same
    /// pair of sequences in the same orientation and overlap on both the query
    /// and the subject.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::record::Path;
    ///
    /// let a = "1\tq1\t100\t200\ts1\t1000\t1100\t0\t50\t90".parse::<Path>()?;
    /// let b = "2\tq1\t150\t250\ts1\t1050\t1150\t0\t50\t90".parse::<Path>()?;
    /// let c = "3\tq1\t150\t250\ts1\t1150\t1050\t0\t50\t90".parse::<Path>()?;
    ///
    /// assert!(a.can_merge(&b));
    /// assert!(!a.can_merge(&c));
    /// assert!(!a.can_merge(&a));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn can_merge(&self, other: &Path) -> bool {
        let (query, subject) = (self.query(), self.subject());
        let (other_query, other_subject) = (other.query(), other.subject());

        self.id != other.id
            && query.seqname() == other_query.seqname()
            && subject.seqname() == other_subject.seqname()
            && query.is_on_direct_strand() == other_query.is_on_direct_strand()
            && subject.is_on_direct_strand() == other_subject.is_on_direct_strand()
            && query.overlaps(other_query)
            && subject.overlaps(other_subject)
    }

    /// Gets the query range as a feature named after the subject.
    ///
    /// The feature takes the strand of the subject.
    pub fn subject_as_set_of_query(&self) -> Set {
        let query = self.query();
        let range = match self.is_on_direct_strand() {
            true => query.clone(),
            false => query.reverse(),
        };

        Set::new(self.id, Map::new(self.subject().seqname(), range))
    }

    /// Gets the subject range as a feature named after the query.
    pub fn query_as_set_of_subject(&self) -> Set {
        Set::new(
            self.id,
            Map::new(self.query().seqname(), self.subject().clone()),
        )
    }
}

impl Located for Path {
    fn range(&self) -> &Range {
        self.align.range()
    }
}

impl Identified for Path {
    fn id(&self) -> usize {
        self.id
    }
}

impl Paired for Path {
    fn query(&self) -> &Range {
        self.align.query()
    }

    fn subject(&self) -> &Range {
        self.align.subject()
    }
}

impl Scored for Path {
    fn e_value(&self) -> f64 {
        self.align.e_value()
    }

    fn score(&self) -> u64 {
        self.align.score()
    }

    fn identity(&self) -> f64 {
        self.align.identity()
    }
}

impl Merge for Path {
    /// Merges two local alignments, keeping the lowest id of the two.
    fn merge(&self, other: &Self) -> range::Result<Self> {
        Ok(Self {
            id: self.id.min(other.id),
            align: self.align.merge(&other.align)?,
        })
    }
}

impl Relocate for Path {
    fn relocate(&self, range: Range) -> Self {
        Self {
            id: self.id,
            align: self.align.relocate(range),
        }
    }
}

impl Record for Path {
    const FORMAT: Format = Format::Path;
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{DELIMITER}{}", self.id, self.align)
    }
}

impl FromStr for Path {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_fields(s, Format::Path)?;
        let id = parse_usize("id", parts[0])?;
        let align = parse_align_fields(&parts[1..])?;

        Ok(Self::new(id, align))
    }
}
