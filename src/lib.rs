//! `repet_coords` is a crate for working with the interval records exchanged
//! between the steps of a transposable element annotation pipeline.
//!
//! The crate provides three main points of entry:
//!
//! - Parsing, reading and writing the tab-separated record formats.
//! - Operating on lists of records (merging, subtracting, removing duplicates,
//!   grouping).
//! - Providing a machine for translating records between chromosome and chunk
//!   coordinates.
//!
//! ## Coordinates
//!
//! Every record is located on one or two [`Range`](crate::core::Range)s. Coordinates are
//! 1-based and both bounds are included. The strand is not stored separately:
//! a range whose start is greater than its end lies on the reverse strand.
//! Pairwise records ([`record::Align`], [`record::Path`] and
//! [`record::Match`]) always keep their query on the direct strand. Only the
//! query is reversed when needed, and the subject keeps the coordinates it was
//! given.
//!
//! ## Reading and writing records
//!
//! Five formats are supported, one record per line (see [`Format`]). Records
//! are read with a [`Reader`] and written with a [`Writer`].
//!
//! ```
//! use repet_coords::record::Path;
//!
//! let data = b"1\tq1\t500\t100\ts1\t10\t400\t1e-20\t300\t95.5\n";
//! let mut reader = repet_coords::Reader::new(&data[..]);
//!
//! let paths = reader.read_all::<Path>()?;
//!
//! let mut writer = repet_coords::Writer::new(Vec::new());
//! writer.write_records(&paths)?;
//!
//! assert_eq!(
//!     String::from_utf8(writer.into_inner())?,
//!     "1\tq1\t100\t500\ts1\t10\t400\t1e-20\t300\t95.500000\n"
//! );
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Operating on lists
//!
//! The [`utils`] module works on any record type implementing the relevant
//! traits of [`crate::core`].
//!
//! ```
//! use repet_coords::record::Map;
//! use repet_coords::utils;
//!
//! let data = b"TE1\tchr1\t100\t200\nTE1\tchr1\t150\t300\nTE2\tchr1\t400\t500\n";
//! let maps = repet_coords::Reader::new(&data[..]).read_all::<Map>()?;
//!
//! let merged = utils::self_merge(maps)?;
//! assert_eq!(merged.len(), 2);
//! assert_eq!(merged[0].to_string(), "TE1\tchr1\t100\t300");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Chunk Machine
//!
//! Long chromosomes are processed as overlapping chunks. A
//! [`chunk::Machine`] is built from a chunk table with
//! [`chunk::machine::Builder::try_build_from()`] and translates records in
//! both directions.
//!
//! ```
//! use repet_coords::chunk::machine::Builder;
//! use repet_coords::record::Set;
//!
//! let data = b"chunk1\tchr1\t1\t200000\nchunk2\tchr1\t190001\t390000\n";
//! let machine = Builder::default().try_build_from(repet_coords::Reader::new(&data[..]))?;
//!
//! let sets = vec!["1\tTE1\tchr1\t189000\t195000".parse::<Set>()?];
//! let translation = machine.translate_chr_to_chunk(sets)?;
//!
//! assert_eq!(translation.mapped().len(), 2);
//! assert!(translation.unmapped().is_empty());
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod chunk;
pub mod core;
pub mod format;
pub mod reader;
pub mod record;
pub mod sequence;
pub mod utils;
pub mod writer;

pub use self::format::Format;
pub use self::reader::Reader;
pub use self::writer::Writer;
