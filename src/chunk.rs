//! Translation of records between chromosome and chunk coordinates.
//!
//! Long chromosomes are cut into overlapping chunks so that external tools can
//! work on bounded sequences. Each chunk is described by a `map` record: the
//! name of the record is the name of the chunk, and its range is the span of
//! the chunk on the chromosome. A range whose start is greater than its end
//! describes a chunk taken from the reverse strand.
//!
//! ```text
//! chr1      1 ........ 200000
//! chunk1    |===========|
//! chunk2             |===========|
//!                 190001 ...... 390000
//! ```
//!
//! A record spanning the overlap of two chunks is translated once per chunk.

pub mod machine;

pub use machine::Machine;
pub use machine::MissPolicy;
pub use machine::Translation;
