//! Splitting of a list of records into runs delimited by a reference list.

use crate::core::Located;
use crate::utils::sort;

/// Splits a list into runs, starting a new run at each reference element.
///
/// Both lists are considered sequence by sequence, in order of their lowest
/// coordinate. Each value of `list` belongs to the run of the last reference
/// element on its sequence whose lowest coordinate is not greater than its
/// own; values lying before the first reference element of their sequence
/// belong to the first run of that sequence. Values on different sequences
/// never share a run. Empty runs are omitted, and the values of each run are
/// sorted by bounds.
///
/// With an empty reference list, the values of each sequence form a single
/// run.
///
/// # Examples
///
/// ```
/// use repet_coords::core::Range;
/// use repet_coords::record::Map;
/// use repet_coords::utils::unjoin;
///
/// let reference = vec![
///     Range::try_new("chr1", 100, 200)?,
///     Range::try_new("chr1", 1000, 1200)?,
/// ];
/// let maps = vec![
///     "TE1\tchr1\t150\t180".parse::<Map>()?,
///     "TE2\tchr1\t1100\t1150".parse::<Map>()?,
///     "TE3\tchr1\t300\t350".parse::<Map>()?,
/// ];
///
/// let runs = unjoin(&reference, maps);
/// assert_eq!(runs.len(), 2);
/// assert_eq!(runs[0].len(), 2);
/// assert_eq!(runs[1].len(), 1);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn unjoin<R, T>(reference: &[R], list: Vec<T>) -> Vec<Vec<T>>
where
    R: Located,
    T: Located,
{
    let mut list = list;
    sort::by_bounds(&mut list);

    let mut starts = reference
        .iter()
        .map(|value| (value.seqname(), value.min()))
        .collect::<Vec<_>>();
    starts.sort_unstable();

    let mut runs: Vec<Vec<T>> = Vec::new();
    let mut current: Option<(String, usize)> = None;

    for value in list {
        let seqname = value.seqname();
        let first = starts.partition_point(|&(name, _)| name < seqname);
        let end = starts.partition_point(|&start| start <= (seqname, value.min()));
        let run = (end - first).saturating_sub(1);

        let same_run = current
            .as_ref()
            .is_some_and(|(name, index)| name == seqname && *index == run);

        match runs.last_mut() {
            Some(last) if same_run => last.push(value),
            _ => {
                current = Some((seqname.to_string(), run));
                runs.push(vec![value]);
            }
        }
    }

    runs
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::core::Named as _;
    use crate::core::Range;
    use crate::record::Map;

    fn names(run: &[Map]) -> Vec<&str> {
        run.iter().map(|map| map.name()).collect()
    }

    #[test]
    fn test_unjoin() -> Result<(), Box<dyn std::error::Error>> {
        let reference = vec![
            Range::try_new("chr1", 500, 600)?,
            Range::try_new("chr1", 100, 200)?,
            Range::try_new("chr1", 900, 950)?,
        ];
        let maps = vec![
            "TE4\tchr1\t950\t920".parse::<Map>()?,
            "TE2\tchr1\t120\t180".parse::<Map>()?,
            "TE1\tchr1\t10\t20".parse::<Map>()?,
            "TE3\tchr1\t300\t400".parse::<Map>()?,
        ];

        let runs = unjoin(&reference, maps);
        assert_eq!(runs.len(), 2);
        assert_eq!(names(&runs[0]), vec!["TE1", "TE2", "TE3"]);
        assert_eq!(names(&runs[1]), vec!["TE4"]);

        Ok(())
    }

    #[test]
    fn test_unjoin_without_reference() -> Result<(), Box<dyn std::error::Error>> {
        let maps = vec![
            "TE1\tchr1\t10\t20".parse::<Map>()?,
            "TE2\tchr1\t30\t40".parse::<Map>()?,
        ];

        let runs = unjoin::<Range, _>(&[], maps);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 2);

        assert!(unjoin::<Range, Map>(&[], Vec::new()).is_empty());

        Ok(())
    }

    #[test]
    fn test_unjoin_keeps_sequences_apart() -> Result<(), Box<dyn std::error::Error>> {
        let reference = vec![
            Range::try_new("chr1", 1, 10)?,
            Range::try_new("chr1", 1000, 1100)?,
        ];
        let maps = vec![
            "TE2\tchr2\t1050\t1060".parse::<Map>()?,
            "TE1\tchr1\t1050\t1060".parse::<Map>()?,
            "TE3\tchr2\t5\t8".parse::<Map>()?,
        ];

        let runs = unjoin(&reference, maps);
        assert_eq!(runs.len(), 2);
        assert_eq!(names(&runs[0]), vec!["TE1"]);
        assert_eq!(names(&runs[1]), vec!["TE3", "TE2"]);

        for run in &runs {
            assert!(run.iter().all(|map| map.seqname() == run[0].seqname()));
        }

        Ok(())
    }

    #[test]
    fn test_unjoin_at_reference_start() -> Result<(), Box<dyn std::error::Error>> {
        let reference = vec![
            Range::try_new("chr1", 100, 200)?,
            Range::try_new("chr1", 500, 600)?,
        ];
        let maps = vec![
            "TE1\tchr1\t120\t499".parse::<Map>()?,
            "TE2\tchr1\t500\t550".parse::<Map>()?,
            "TE3\tchr1\t650\t500".parse::<Map>()?,
        ];

        let runs = unjoin(&reference, maps);
        assert_eq!(runs.len(), 2);
        assert_eq!(names(&runs[0]), vec!["TE1"]);
        assert_eq!(names(&runs[1]), vec!["TE2", "TE3"]);

        Ok(())
    }
}
