//! The extent of a list of records.

use crate::core::Located;

/// Gets the lowest and highest coordinates over every value of a list.
///
/// Sequence names are not looked at. [`None`] is returned for an empty list.
///
/// # Examples
///
/// ```
/// use repet_coords::record::Map;
/// use repet_coords::utils::boundaries;
///
/// let maps = vec![
///     "TE1\tchr1\t300\t200".parse::<Map>()?,
///     "TE2\tchr1\t100\t150".parse::<Map>()?,
///     "TE3\tchr1\t400\t350".parse::<Map>()?,
/// ];
///
/// assert_eq!(boundaries(&maps), Some((100, 400)));
/// assert_eq!(boundaries::<Map>(&[]), None);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn boundaries<T>(list: &[T]) -> Option<(usize, usize)>
where
    T: Located,
{
    let min = list.iter().map(|value| value.min()).min()?;
    let max = list.iter().map(|value| value.max()).max()?;

    Some((min, max))
}
