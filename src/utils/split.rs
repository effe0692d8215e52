//! Grouping of records by identifier.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use nonempty::NonEmpty;

use crate::core::Identified;

/// Groups values by their identifier.
///
/// Groups are keyed by identifier in ascending order, and each group keeps
/// its members in input order. A group exists only if at least one value
/// carries its identifier, hence [`NonEmpty`].
///
/// # Examples
///
/// ```
/// use repet_coords::record::Set;
/// use repet_coords::utils::split_by_id;
///
/// let sets = vec![
///     "2\tTE1\tchr1\t100\t200".parse::<Set>()?,
///     "1\tTE2\tchr1\t300\t400".parse::<Set>()?,
///     "2\tTE1\tchr1\t500\t600".parse::<Set>()?,
/// ];
///
/// let groups = split_by_id(sets);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[&2].len(), 2);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn split_by_id<T>(list: Vec<T>) -> BTreeMap<usize, NonEmpty<T>>
where
    T: Identified,
{
    let mut groups: BTreeMap<usize, NonEmpty<T>> = BTreeMap::new();

    for value in list {
        match groups.entry(value.id()) {
            Entry::Occupied(entry) => entry.into_mut().push(value),
            Entry::Vacant(entry) => {
                entry.insert(NonEmpty::new(value));
            }
        }
    }

    groups
}
