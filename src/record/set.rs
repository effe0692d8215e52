//! A named feature belonging to a group of features.

use std::str::FromStr;

use crate::core::range;
use crate::core::Identified;
use crate::core::Located;
use crate::core::Merge;
use crate::core::Named;
use crate::core::Range;
use crate::core::Relocate;
use crate::record::parse_range;
use crate::record::parse_usize;
use crate::record::split_fields;
use crate::record::Map;
use crate::record::ParseError;
use crate::record::Record;
use crate::record::DELIMITER;
use crate::Format;

/// A record of the `set` format.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Set {
    /// The identifier of the group the feature belongs to.
    id: usize,

    /// The feature.
    map: Map,
}

impl Set {
    /// Creates a new [`Set`].
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::core::Identified as _;
    /// use repet_coords::core::Range;
    /// use repet_coords::record::Map;
    /// use repet_coords::record::Set;
    ///
    /// let set = Set::new(7, Map::new("TE1", Range::try_new("chr1", 100, 200)?));
    ///
    /// assert_eq!(set.id(), 7);
    /// assert_eq!(set.to_string(), "7\tTE1\tchr1\t100\t200");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(id: usize, map: Map) -> Self {
        Self { id, map }
    }

    /// Gets the feature without its group.
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Consumes `self` and returns the feature without its group.
    pub fn into_map(self) -> Map {
        self.map
    }

    /// Removes the positions shared with `other` from this feature.
    ///
    /// The remaining pieces keep the id, name, sequence and strand of `self`.
    pub fn diff(&self, other: &Set) -> Vec<Set> {
        self.range()
            .diff(other.range())
            .into_iter()
            .map(|range| self.relocate(range))
            .collect()
    }
}

impl Located for Set {
    fn range(&self) -> &Range {
        self.map.range()
    }
}

impl Named for Set {
    fn name(&self) -> &str {
        self.map.name()
    }
}

impl Identified for Set {
    fn id(&self) -> usize {
        self.id
    }
}

impl Merge for Set {
    /// Merges two features on the same sequence. The lowest id of the two is
    /// kept as the group label.
    fn merge(&self, other: &Self) -> range::Result<Self> {
        Ok(Self {
            id: self.id.min(other.id),
            map: self.map.merge(&other.map)?,
        })
    }
}

impl Relocate for Set {
    fn relocate(&self, range: Range) -> Self {
        Self {
            id: self.id,
            map: self.map.relocate(range),
        }
    }
}

impl Record for Set {
    const FORMAT: Format = Format::Set;
}

impl std::fmt::Display for Set {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{DELIMITER}{}", self.id, self.map)
    }
}

impl FromStr for Set {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_fields(s, Format::Set)?;
        let id = parse_usize("id", parts[0])?;
        let range = parse_range("set", parts[2], parts[3], parts[4])?;

        Ok(Self::new(id, Map::new(parts[1], range)))
    }
}
