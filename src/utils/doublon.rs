//! Removal of duplicated alignments ("doublons").

use std::cmp::Ordering;

use crate::core::Paired;
use crate::core::Range;
use crate::record::Match;
use crate::utils::sort;

/// Removes the values that repeat the query and subject ranges of another
/// value.
///
/// Only the ranges are compared: identifiers and scores are ignored. The list
/// is sorted by ranges first, which makes duplicates adjacent, and the first
/// occurrence of each duplicate is kept. The result is sorted by ranges.
///
/// # Examples
///
/// ```
/// use repet_coords::record::Path;
/// use repet_coords::utils::remove_doublons;
///
/// let paths = vec![
///     "1\tq\t10\t20\ts\t1\t10\t0.0\t100\t99.0".parse::<Path>()?,
///     "2\tq\t10\t20\ts\t1\t10\t0.0\t100\t99.0".parse::<Path>()?,
/// ];
///
/// assert_eq!(remove_doublons(paths).len(), 1);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn remove_doublons<T>(list: Vec<T>) -> Vec<T>
where
    T: Paired,
{
    let mut list = list;
    sort::by_ranges(&mut list);

    let doublons = (1..list.len())
        .filter(|&i| list[i - 1].has_same_ranges(&list[i]))
        .collect::<Vec<_>>();

    for i in doublons.into_iter().rev() {
        list.remove(i);
    }

    list
}

/// Removes the matches that are doublons of an earlier match.
///
/// Unlike [`remove_doublons()`], the scores must be equal too, and a match
/// whose query and subject are swapped counts as a doublon (see
/// [`Match::is_doublon_with()`]). The order of the remaining matches is
/// preserved.
pub fn remove_match_doublons(list: Vec<Match>) -> Vec<Match> {
    // Matches that can be doublons of one another share the same unordered
    // pair of ranges, so only those are compared.
    let mut order = (0..list.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| compare_unordered(&list[a], &list[b]).then(a.cmp(&b)));

    let mut keep = vec![true; list.len()];

    for (position, &i) in order.iter().enumerate() {
        let earlier = order[..position]
            .iter()
            .rev()
            .take_while(|&&j| compare_unordered(&list[j], &list[i]) == Ordering::Equal);

        for &j in earlier {
            if keep[j] && list[j].is_doublon_with(&list[i]) {
                keep[i] = false;
                break;
            }
        }
    }

    list.into_iter()
        .zip(keep)
        .filter_map(|(m, keep)| keep.then_some(m))
        .collect()
}

/// Gets the query and subject ranges of a match, lowest first.
fn unordered_ranges(m: &Match) -> (&Range, &Range) {
    match m.query().compare(m.subject()) {
        Ordering::Greater => (m.subject(), m.query()),
        _ => (m.query(), m.subject()),
    }
}

/// Compares the unordered pairs of ranges of two matches.
fn compare_unordered(a: &Match, b: &Match) -> Ordering {
    let (a_low, a_high) = unordered_ranges(a);
    let (b_low, b_high) = unordered_ranges(b);

    a_low
        .compare(b_low)
        .then_with(|| a_high.compare(b_high))
}
