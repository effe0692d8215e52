//! A named feature located on a sequence.

use std::str::FromStr;

use crate::core::range;
use crate::core::Located;
use crate::core::Merge;
use crate::core::Named;
use crate::core::Range;
use crate::core::Relocate;
use crate::record::parse_range;
use crate::record::split_fields;
use crate::record::ParseError;
use crate::record::Record;
use crate::record::Set;
use crate::record::DELIMITER;
use crate::Format;

/// A record of the `map` format.
///
/// The `name` identifies the annotated feature, while the sequence name of the
/// range identifies the coordinate system it is expressed in.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Map {
    /// The name of the feature.
    name: String,

    /// The location of the feature.
    range: Range,
}

impl Map {
    /// Creates a new [`Map`].
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::core::Located as _;
    /// use repet_coords::core::Named as _;
    /// use repet_coords::core::Range;
    /// use repet_coords::record::Map;
    ///
    /// let map = Map::new("TE1", Range::try_new("chr1", 100, 200)?);
    ///
    /// assert_eq!(map.name(), "TE1");
    /// assert_eq!(map.seqname(), "chr1");
    /// assert_eq!(map.to_string(), "TE1\tchr1\t100\t200");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(name: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }

    /// Removes the positions shared with `other` from this feature.
    ///
    /// The remaining pieces keep the name, sequence and strand of `self`. An
    /// empty result means nothing remains.
    pub fn diff(&self, other: &Map) -> Vec<Map> {
        self.range
            .diff(&other.range)
            .into_iter()
            .map(|range| self.relocate(range))
            .collect()
    }

    /// Consumes `self` and attaches it to the group `id`.
    pub fn into_set(self, id: usize) -> Set {
        Set::new(id, self)
    }

    /// Consumes `self` and returns the name and the range.
    pub fn into_parts(self) -> (String, Range) {
        (self.name, self.range)
    }
}

impl Located for Map {
    fn range(&self) -> &Range {
        &self.range
    }
}

impl Named for Map {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Merge for Map {
    /// Merges two features, keeping the name of `self`.
    fn merge(&self, other: &Self) -> range::Result<Self> {
        Ok(self.relocate(self.range.merge(&other.range)?))
    }
}

impl Relocate for Map {
    fn relocate(&self, range: Range) -> Self {
        Self {
            name: self.name.clone(),
            range,
        }
    }
}

impl Record for Map {
    const FORMAT: Format = Format::Map;
}

impl std::fmt::Display for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{DELIMITER}{}", self.name, self.range)
    }
}

impl FromStr for Map {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_fields(s, Format::Map)?;
        let range = parse_range("map", parts[1], parts[2], parts[3])?;

        Ok(Self::new(parts[0], range))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_parse_map() -> Result<(), Box<dyn std::error::Error>> {
        let map = "chunk1\tchr1\t1\t200000".parse::<Map>()?;

        assert_eq!(map.name(), "chunk1");
        assert_eq!(map.seqname(), "chr1");
        assert_eq!(map.start(), 1);
        assert_eq!(map.end(), 200000);
        assert_eq!(map.to_string().parse::<Map>()?, map);

        Ok(())
    }

    #[test]
    fn test_invalid_map() {
        let err = "TE1\tchr1\t100".parse::<Map>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid number of fields in map record: expected 4 fields, found 3 fields"
        );

        let err = "TE1\tchr1\tabc\t200".parse::<Map>().unwrap_err();
        assert_eq!(err.to_string(), "invalid map: invalid digit found in string");

        let err = "TE1\tchr1\t200\t200".parse::<Map>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid map range: start and end are both 200 on chr1: the strand cannot be \
             determined"
        );
    }

    #[test]
    fn test_diff_keeps_name() -> Result<(), Box<dyn std::error::Error>> {
        let map = Map::new("TE1", Range::try_new("chr1", 100, 200)?);
        let other = Map::new("TE2", Range::try_new("chr1", 150, 300)?);

        assert_eq!(
            map.diff(&other),
            vec![Map::new("TE1", Range::try_new("chr1", 100, 149)?)]
        );
        assert!(map.diff(&Map::new("TE3", Range::try_new("chr1", 50, 250)?)).is_empty());

        Ok(())
    }

    #[test]
    fn test_merge_keeps_name() -> Result<(), Box<dyn std::error::Error>> {
        let map = Map::new("TE1", Range::try_new("chr1", 100, 200)?);
        let other = Map::new("TE2", Range::try_new("chr1", 150, 300)?);

        assert_eq!(
            map.merge(&other)?,
            Map::new("TE1", Range::try_new("chr1", 100, 300)?)
        );

        Ok(())
    }
}
