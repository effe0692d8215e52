//! The flat-file formats that records are read from and written to.

use std::str::FromStr;

/// An error related to parsing a [`Format`].
#[derive(Debug)]
pub struct ParseError(String);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is not a valid format: expected one of map, set, align, path or match",
            self.0
        )
    }
}

impl std::error::Error for ParseError {}

/// A tab-separated flat-file format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Format {
    /// `name, seqname, start, end`.
    Map,

    /// `id, name, seqname, start, end`.
    Set,

    /// `queryName, queryStart, queryEnd, subjectName, subjectStart,
    /// subjectEnd, e_value, score, identity`.
    Align,

    /// `id` followed by the [`Format::Align`] fields.
    Path,

    /// The fifteen column `tab` format produced when matching sequences
    /// against each other.
    Match,
}

impl Format {
    /// Gets the number of fields in a record of this format.
    ///
    /// # Examples
    ///
    /// ```
    /// use repet_coords::Format;
    ///
    /// assert_eq!(Format::Map.num_fields(), 4);
    /// assert_eq!(Format::Path.num_fields(), 10);
    /// assert_eq!(Format::Match.num_fields(), 15);
    /// ```
    pub fn num_fields(&self) -> usize {
        match self {
            Format::Map => 4,
            Format::Set => 5,
            Format::Align => 9,
            Format::Path => 10,
            Format::Match => 15,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Map => write!(f, "map"),
            Format::Set => write!(f, "set"),
            Format::Align => write!(f, "align"),
            Format::Path => write!(f, "path"),
            Format::Match => write!(f, "match"),
        }
    }
}

impl FromStr for Format {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "map" => Ok(Self::Map),
            "set" => Ok(Self::Set),
            "align" => Ok(Self::Align),
            "path" => Ok(Self::Path),
            "match" | "tab" => Ok(Self::Match),
            other => Err(ParseError(other.into())),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("path".parse::<Format>()?, Format::Path);
        assert_eq!("tab".parse::<Format>()?, Format::Match);
        assert_eq!(Format::Match.to_string(), "match");

        let err = "gff".parse::<Format>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "gff is not a valid format: expected one of map, set, align, path or match"
        );

        Ok(())
    }
}
