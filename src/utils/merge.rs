//! Coalescing and subtracting intervals on a single track.

use crate::core::range;
use crate::core::Located;
use crate::core::Merge;
use crate::core::Relocate;
use crate::utils::sort;

/// Coalesces every group of mutually overlapping values into one value.
///
/// The values are sorted by bounds and swept from left to right. The value
/// under construction absorbs the next value while the two overlap, and is
/// emitted otherwise. The result is sorted by bounds and no two of its values
/// overlap, so merging it again changes nothing.
///
/// Overlapping values are merged with [`Merge::merge()`], and its error is
/// returned as is. This happens with paired records whose queries overlap but
/// whose subjects sit on different sequences.
///
/// # Examples
///
/// ```
/// use repet_coords::core::Range;
/// use repet_coords::utils::self_merge;
///
/// let merged = self_merge(vec![
///     Range::try_new("chr1", 150, 300)?,
///     Range::try_new("chr1", 100, 200)?,
///     Range::try_new("chr1", 500, 400)?,
/// ])?;
///
/// assert_eq!(
///     merged,
///     vec![Range::try_new("chr1", 100, 300)?, Range::try_new("chr1", 500, 400)?]
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn self_merge<T>(list: Vec<T>) -> range::Result<Vec<T>>
where
    T: Merge,
{
    let mut list = list;
    sort::by_bounds(&mut list);

    let mut result = Vec::with_capacity(list.len());
    let mut values = list.into_iter();

    let mut current = match values.next() {
        Some(value) => value,
        None => return Ok(result),
    };

    for value in values {
        match current.overlaps(&value) {
            true => current = current.merge(&value)?,
            false => result.push(std::mem::replace(&mut current, value)),
        }
    }

    result.push(current);
    Ok(result)
}

/// Removes every position covered by `others` from the values of `list`.
///
/// A value may be trimmed, split in two or removed entirely. Each remaining
/// piece keeps every other field of the value it came from.
///
/// # Examples
///
/// ```
/// use repet_coords::record::Map;
/// use repet_coords::utils::diff_all;
///
/// let list = vec!["TE1\tchr1\t1\t100".parse::<Map>()?];
/// let others = vec![
///     "gap1\tchr1\t20\t30".parse::<Map>()?,
///     "gap2\tchr1\t90\t120".parse::<Map>()?,
/// ];
///
/// let pieces = diff_all(list, &others);
/// assert_eq!(
///     pieces,
///     vec![
///         "TE1\tchr1\t1\t19".parse::<Map>()?,
///         "TE1\tchr1\t31\t89".parse::<Map>()?,
///     ]
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn diff_all<T, L>(list: Vec<T>, others: &[L]) -> Vec<T>
where
    T: Relocate,
    L: Located,
{
    let mut result = Vec::with_capacity(list.len());

    for value in list {
        let mut pieces = vec![value.range().clone()];

        for other in others.iter().filter(|other| value.overlaps(*other)) {
            pieces = pieces
                .into_iter()
                .flat_map(|piece| piece.diff(other.range()))
                .collect();
        }

        result.extend(pieces.into_iter().map(|piece| value.relocate(piece)));
    }

    result
}
