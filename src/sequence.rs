//! Nucleotide sequence utilities.

/// The number of characters shown on each side of an offending character.
const CONTEXT_WIDTH: usize = 10;

/// An error related to a nucleotide sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A character is not part of the IUPAC nucleotide alphabet.
    UnsupportedCharacter {
        /// The offending character.
        character: char,

        /// The 0-based position of the character within the sequence.
        position: usize,

        /// The characters surrounding the offending character.
        context: String,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedCharacter {
                character,
                position,
                context,
            } => write!(
                f,
                "unsupported character '{character}' at position {position}: {context}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Gets the complement of an IUPAC nucleotide code, preserving its case.
///
/// Gaps (`-` and `.`) are their own complement.
pub fn complement(base: char) -> Option<char> {
    let complement = match base.to_ascii_uppercase() {
        'A' => 'T',
        'T' | 'U' => 'A',
        'C' => 'G',
        'G' => 'C',
        'R' => 'Y',
        'Y' => 'R',
        'K' => 'M',
        'M' => 'K',
        'B' => 'V',
        'V' => 'B',
        'D' => 'H',
        'H' => 'D',
        'S' | 'W' | 'N' | 'X' | '-' | '.' => base.to_ascii_uppercase(),
        _ => return None,
    };

    match base.is_ascii_lowercase() {
        true => Some(complement.to_ascii_lowercase()),
        false => Some(complement),
    }
}

/// Gets the reverse complement of a nucleotide sequence.
///
/// # Examples
///
/// ```
/// use repet_coords::sequence::reverse_complement;
///
/// assert_eq!(reverse_complement("ATGCn-RY")?, "RY-nGCAT");
/// assert!(reverse_complement("ATGZ").is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn reverse_complement(sequence: &str) -> Result<String> {
    sequence
        .char_indices()
        .rev()
        .map(|(i, base)| {
            complement(base).ok_or_else(|| Error::UnsupportedCharacter {
                character: base,
                position: sequence[..i].chars().count(),
                context: context(sequence, i),
            })
        })
        .collect()
}

/// Gets the characters surrounding the byte offset `i` of a sequence.
fn context(sequence: &str, i: usize) -> String {
    let before = sequence[..i]
        .chars()
        .rev()
        .take(CONTEXT_WIDTH)
        .collect::<Vec<_>>();
    let after = sequence[i..].chars().take(CONTEXT_WIDTH + 1);

    before.into_iter().rev().chain(after).collect()
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_reverse_complement() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!(reverse_complement("")?, "");
        assert_eq!(reverse_complement("AACG")?, "CGTT");
        assert_eq!(reverse_complement("acgu")?, "acgt");
        assert_eq!(reverse_complement("KMBVDHSWN.")?, ".NWSDHBVKM");

        let sequence = "ATGCATGCATGC";
        assert_eq!(
            reverse_complement(&reverse_complement(sequence)?)?,
            sequence
        );

        Ok(())
    }

    #[test]
    fn test_unsupported_character() {
        let err = reverse_complement("ACGTACGTACGTJACGT").unwrap_err();

        assert_eq!(
            err,
            Error::UnsupportedCharacter {
                character: 'J',
                position: 12,
                context: String::from("GTACGTACGTJACGT"),
            }
        );
        assert_eq!(
            err.to_string(),
            "unsupported character 'J' at position 12: GTACGTACGTJACGT"
        );
    }
}
