//! Records of the tab-separated flat-file formats.
//!
//! Every record type parses from (via [`FromStr`]) and serializes to (via
//! [`Display`](std::fmt::Display)) exactly one line of its [`Format`], with the
//! same field order in both directions.

pub mod align;
pub mod r#match;
pub mod map;
pub mod path;
pub mod set;

use std::num::ParseFloatError;
use std::num::ParseIntError;
use std::str::FromStr;

pub use align::Align;
pub use map::Map;
pub use path::Path;
pub use r#match::Match;
pub use set::Set;

use crate::core::range;
use crate::core::Range;
use crate::Format;

/// The delimiter between the fields of a record.
pub const DELIMITER: char = '\t';

/// An error associated with parsing a record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields for the format.
    IncorrectNumberOfFields(Format, usize),

    /// A field that should hold an integer did not.
    InvalidInteger(&'static str, ParseIntError),

    /// A field that should hold a number did not.
    InvalidFloat(&'static str, ParseFloatError),

    /// The coordinates did not form a valid range.
    InvalidRange(&'static str, range::Error),

    /// A negative E-value.
    NegativeEValue(f64),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(format, n) => write!(
                f,
                "invalid number of fields in {format} record: expected {} fields, found {n} fields",
                format.num_fields()
            ),
            ParseError::InvalidInteger(field, err) => write!(f, "invalid {field}: {err}"),
            ParseError::InvalidFloat(field, err) => write!(f, "invalid {field}: {err}"),
            ParseError::InvalidRange(field, err) => write!(f, "invalid {field} range: {err}"),
            ParseError::NegativeEValue(value) => {
                write!(f, "invalid e-value: {value} is negative")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A record of one of the flat-file formats.
pub trait Record: FromStr<Err = ParseError> + std::fmt::Display {
    /// The format of the record.
    const FORMAT: Format;

    /// The optional header line of the format.
    const HEADER: Option<&'static str> = None;
}

/// Splits a line into exactly the number of fields expected for `format`.
pub(crate) fn split_fields(s: &str, format: Format) -> Result<Vec<&str>, ParseError> {
    let parts = s.split(DELIMITER).collect::<Vec<_>>();

    if parts.len() != format.num_fields() {
        return Err(ParseError::IncorrectNumberOfFields(format, parts.len()));
    }

    Ok(parts)
}

/// Parses an unsigned integer field.
pub(crate) fn parse_usize(field: &'static str, value: &str) -> Result<usize, ParseError> {
    value
        .parse()
        .map_err(|err| ParseError::InvalidInteger(field, err))
}

/// Parses a floating point field.
pub(crate) fn parse_f64(field: &'static str, value: &str) -> Result<f64, ParseError> {
    value
        .parse()
        .map_err(|err| ParseError::InvalidFloat(field, err))
}

/// Parses a score. Fractional scores are truncated.
pub(crate) fn parse_score(value: &str) -> Result<u64, ParseError> {
    match value.parse::<u64>() {
        Ok(score) => Ok(score),
        Err(_) => parse_f64("score", value).map(|score| score.trunc() as u64),
    }
}

/// Parses a non-negative E-value.
pub(crate) fn parse_e_value(value: &str) -> Result<f64, ParseError> {
    let e_value = parse_f64("e-value", value)?;

    if e_value < 0.0 {
        return Err(ParseError::NegativeEValue(e_value));
    }

    Ok(e_value)
}

/// Parses the three fields of a range.
pub(crate) fn parse_range(
    field: &'static str,
    seqname: &str,
    start: &str,
    end: &str,
) -> Result<Range, ParseError> {
    let start = parse_usize(field, start)?;
    let end = parse_usize(field, end)?;

    Range::try_new(seqname, start, end).map_err(|err| ParseError::InvalidRange(field, err))
}

/// Formats a number the way C's `%g` conversion does.
///
/// Six significant digits are kept, trailing zeros are removed and the
/// scientific notation is used when the exponent is below -4 or at least 6.
///
/// # Examples
///
/// ```
/// use repet_coords::record::format_g;
///
/// assert_eq!(format_g(1e-20), "1e-20");
/// assert_eq!(format_g(0.0), "0");
/// assert_eq!(format_g(0.0001), "0.0001");
/// assert_eq!(format_g(123456.0), "123456");
/// assert_eq!(format_g(1234567.0), "1.23457e+06");
/// assert_eq!(format_g(3.5e-5), "3.5e-05");
/// ```
pub fn format_g(value: f64) -> String {
    /// The number of significant digits.
    const PRECISION: i32 = 6;

    if value == 0.0 {
        return String::from("0");
    }

    if !value.is_finite() {
        return match value.is_nan() {
            true => String::from("nan"),
            false if value > 0.0 => String::from("inf"),
            false => String::from("-inf"),
        };
    }

    // The exponent is taken after rounding to the final precision.
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent = exponent.parse::<i32>().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            strip_trailing_zeros(mantissa),
            exponent.abs()
        )
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

/// Formats a number the way C's `%f` conversion does.
pub fn format_f(value: f64) -> String {
    format!("{value:.6}")
}

/// Removes the trailing zeros (and a dangling decimal point) of a decimal
/// number.
fn strip_trailing_zeros(s: &str) -> &str {
    match s.contains('.') {
        true => s.trim_end_matches('0').trim_end_matches('.'),
        false => s,
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_format_g() {
        assert_eq!(format_g(1e-20), "1e-20");
        assert_eq!(format_g(2.5e-180), "2.5e-180");
        assert_eq!(format_g(0.5), "0.5");
        assert_eq!(format_g(10.0), "10");
        assert_eq!(format_g(999999.5), "1e+06");
        assert_eq!(format_g(0.00012345678), "0.000123457");
        assert_eq!(format_g(-0.25), "-0.25");
    }

    #[test]
    fn test_format_f() {
        assert_eq!(format_f(95.5), "95.500000");
        assert_eq!(format_f(0.0), "0.000000");
    }

    #[test]
    fn test_parse_score() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(parse_score("300")?, 300);
        assert_eq!(parse_score("300.9")?, 300);

        let err = parse_score("high").unwrap_err();
        assert_eq!(err.to_string(), "invalid score: invalid float literal");

        Ok(())
    }

    #[test]
    fn test_parse_e_value() {
        let err = parse_e_value("-1").unwrap_err();
        assert_eq!(err.to_string(), "invalid e-value: -1 is negative");
    }
}
