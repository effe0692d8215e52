//! The two orders lists of records are sorted in.
//!
//! - By bounds: sequence name, then lowest coordinate, then highest
//!   coordinate. Strand plays no role. This is the order sweeps over a single
//!   track rely on.
//! - By ranges: the query range first and the subject range second, each
//!   compared with [`Range::compare`](crate::core::Range::compare), which does
//!   take the strand into account. This is the order duplicate detection
//!   relies on.
//!
//! Both sorts are stable.

use std::cmp::Ordering;

use crate::core::Located;
use crate::core::Paired;

/// Compares two located values by sequence name, lowest coordinate and
/// highest coordinate.
pub fn compare_bounds<A, B>(a: &A, b: &B) -> Ordering
where
    A: Located + ?Sized,
    B: Located + ?Sized,
{
    a.seqname()
        .cmp(b.seqname())
        .then_with(|| a.min().cmp(&b.min()))
        .then_with(|| a.max().cmp(&b.max()))
}

/// Sorts located values by their bounds.
///
/// # Examples
///
/// ```
/// use repet_coords::core::Range;
/// use repet_coords::utils::sort;
///
/// let mut ranges = vec![
///     Range::try_new("chr1", 300, 200)?,
///     Range::try_new("chr1", 100, 400)?,
///     Range::try_new("chr1", 200, 250)?,
/// ];
/// sort::by_bounds(&mut ranges);
///
/// assert_eq!(ranges[0], Range::try_new("chr1", 100, 400)?);
/// assert_eq!(ranges[1], Range::try_new("chr1", 200, 250)?);
/// assert_eq!(ranges[2], Range::try_new("chr1", 300, 200)?);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn by_bounds<T>(list: &mut [T])
where
    T: Located,
{
    list.sort_by(|a, b| compare_bounds(a, b));
}

/// Sorts pairwise values by query range, then subject range.
pub fn by_ranges<T>(list: &mut [T])
where
    T: Paired,
{
    list.sort_by(|a, b| a.compare_ranges(b));
}
