//! Capabilities shared by the record types.
//!
//! Rather than a chain of record types inheriting from one another, each
//! record type is a small value that implements the capabilities it actually
//! has. List utilities are written against these traits.

use std::cmp::Ordering;

use omics::coordinate::Strand;

use crate::core::range;
use crate::core::Range;

/// A value that is located on a sequence.
///
/// For pairwise records, the location is the query range.
pub trait Located {
    /// Gets the range the value is located on.
    fn range(&self) -> &Range;

    /// Gets the name of the sequence the value is located on.
    fn seqname(&self) -> &str {
        self.range().seqname()
    }

    /// Gets the start coordinate.
    fn start(&self) -> usize {
        self.range().start()
    }

    /// Gets the end coordinate.
    fn end(&self) -> usize {
        self.range().end()
    }

    /// Gets the lowest coordinate regardless of strand.
    fn min(&self) -> usize {
        self.range().min()
    }

    /// Gets the highest coordinate regardless of strand.
    fn max(&self) -> usize {
        self.range().max()
    }

    /// Gets the strand.
    fn strand(&self) -> Strand {
        self.range().strand()
    }

    /// Returns whether the value lies on the direct strand.
    fn is_on_direct_strand(&self) -> bool {
        self.range().is_on_direct_strand()
    }

    /// Returns whether two located values share at least one position.
    fn overlaps<L: Located + ?Sized>(&self, other: &L) -> bool {
        self.range().overlaps(other.range())
    }
}

/// A value that carries the name of an annotated feature.
pub trait Named {
    /// Gets the name of the feature.
    fn name(&self) -> &str;
}

/// A value that belongs to a cluster, path or chain of other values.
pub trait Identified {
    /// Gets the identifier shared by the members of the group.
    fn id(&self) -> usize;
}

/// A value that records the scores of an alignment.
pub trait Scored {
    /// Gets the E-value.
    fn e_value(&self) -> f64;

    /// Gets the alignment score.
    fn score(&self) -> u64;

    /// Gets the percentage identity.
    fn identity(&self) -> f64;
}

/// A value that relates a query range to a subject range.
pub trait Paired {
    /// Gets the query range.
    fn query(&self) -> &Range;

    /// Gets the subject range.
    fn subject(&self) -> &Range;

    /// Compares two values by query range first and subject range second.
    fn compare_ranges<P: Paired + ?Sized>(&self, other: &P) -> Ordering {
        self.query()
            .compare(other.query())
            .then_with(|| self.subject().compare(other.subject()))
    }

    /// Returns whether two values have identical query and subject ranges.
    fn has_same_ranges<P: Paired + ?Sized>(&self, other: &P) -> bool {
        self.query() == other.query() && self.subject() == other.subject()
    }
}

/// A located value that can be combined with another value of its kind.
pub trait Merge: Located + Sized {
    /// Merges two values into one covering both.
    fn merge(&self, other: &Self) -> range::Result<Self>;
}

/// A located value that can be rebuilt on another range.
pub trait Relocate: Located + Sized {
    /// Returns a copy of the value located on `range`, with every other field
    /// kept.
    fn relocate(&self, range: Range) -> Self;
}

impl Located for Range {
    fn range(&self) -> &Range {
        self
    }
}

impl Merge for Range {
    fn merge(&self, other: &Self) -> range::Result<Self> {
        Range::merge(self, other)
    }
}

impl Relocate for Range {
    fn relocate(&self, range: Range) -> Self {
        range
    }
}
