//! A command-line front end to the `repet_coords` crate.
//!
//! ```shell
//! cargo run --release --bin=repet-coords --features=binaries -- \
//!     chr2chunk --chunks chunks.map --format path -i hits.path -o hits.chunk.path
//! ```
//!
//! Inputs ending in `.gz` are decompressed on the fly. Outputs are written to
//! the standard output unless `-o` is given.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::Args as ClapArgs;
use clap::Parser;
use clap::Subcommand;
use clap_verbosity_flag::Verbosity;
use flate2::read::GzDecoder;
use repet_coords::chunk::machine::Builder;
use repet_coords::chunk::Machine;
use repet_coords::chunk::MissPolicy;
use repet_coords::core::Merge;
use repet_coords::core::Paired;
use repet_coords::core::Relocate;
use repet_coords::record;
use repet_coords::record::Record;
use repet_coords::utils;
use repet_coords::Format;
use repet_coords::Reader;
use repet_coords::Writer;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////
// Arguments
////////////////////////////////////////////////////////////////////////////////////////

/// Operations on the interval records of a transposable element annotation.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// The operation to perform.
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: Verbosity,
}

/// The input and output files shared by every operation.
#[derive(ClapArgs)]
struct Io {
    /// The input file (gzipped if it ends in `.gz`).
    #[arg(short, long)]
    input: PathBuf,

    /// The output file. Defaults to the standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// The arguments of a translation between chromosome and chunk coordinates.
#[derive(ClapArgs)]
struct TranslateArgs {
    /// The chunk table, in the `map` format.
    #[arg(short, long)]
    chunks: PathBuf,

    /// The format of the input records.
    #[arg(short, long)]
    format: Format,

    /// What to do with records for which no chunk can be found.
    #[arg(long, default_value_t = MissPolicy::default())]
    on_miss: MissPolicy,

    /// If desired, a file to write the records for which no chunk can be
    /// found to.
    #[arg(long)]
    unmapped: Option<PathBuf>,

    #[command(flatten)]
    io: Io,
}

/// The arguments of an operation over a single list of records.
#[derive(ClapArgs)]
struct ListArgs {
    /// The format of the input records.
    #[arg(short, long)]
    format: Format,

    #[command(flatten)]
    io: Io,
}

/// An operation.
#[derive(Subcommand)]
enum Command {
    /// Translates records from chromosome to chunk coordinates.
    #[command(name = "chr2chunk")]
    ChrToChunk(TranslateArgs),

    /// Translates records from chunk to chromosome coordinates.
    #[command(name = "chunk2chr")]
    ChunkToChr(TranslateArgs),

    /// Merges the overlapping records of a `map` or `set` file.
    Merge(ListArgs),

    /// Removes the duplicated records of an `align`, `path` or `match` file.
    #[command(name = "rmdoublons")]
    RemoveDoublons(ListArgs),
}

////////////////////////////////////////////////////////////////////////////////////////
// Input and output
////////////////////////////////////////////////////////////////////////////////////////

/// Opens a record reader, decompressing gzipped files.
fn open(path: &Path) -> Result<Reader<Box<dyn BufRead>>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    let inner: Box<dyn BufRead> = match path.extension().is_some_and(|ext| ext == "gz") {
        true => Box::new(BufReader::new(GzDecoder::new(file))),
        false => Box::new(BufReader::new(file)),
    };

    Ok(Reader::new(inner))
}

/// Creates a record writer on a file, or on the standard output.
fn create(path: Option<&Path>) -> Result<Writer<Box<dyn Write>>> {
    let inner: Box<dyn Write> = match path {
        Some(path) => Box::new(std::io::BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(std::io::BufWriter::new(std::io::stdout().lock())),
    };

    Ok(Writer::new(inner))
}

/// Reads every record of the input file.
fn read<R>(io: &Io) -> Result<Vec<R>>
where
    R: Record,
{
    let records = open(&io.input)?
        .read_all::<R>()
        .with_context(|| format!("reading {}", io.input.display()))?;

    info!("read {} {} record(s)", records.len(), R::FORMAT);

    Ok(records)
}

/// Writes records to a file, or to the standard output.
fn write<R>(path: Option<&Path>, records: &[R]) -> Result<()>
where
    R: Record,
{
    let mut writer = create(path)?;
    writer.write_header::<R>()?;
    writer.write_records(records)?;
    writer.flush()?;

    info!("wrote {} {} record(s)", records.len(), R::FORMAT);

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////
// Operations
////////////////////////////////////////////////////////////////////////////////////////

/// The direction of a translation.
#[derive(Clone, Copy)]
enum Direction {
    /// From chromosome to chunk coordinates.
    ChrToChunk,

    /// From chunk to chromosome coordinates.
    ChunkToChr,
}

/// Translates every record of the input file.
fn translate<R>(machine: &Machine, direction: Direction, args: &TranslateArgs) -> Result<()>
where
    R: Record + Relocate,
{
    let records = read::<R>(&args.io)?;

    let translation = match direction {
        Direction::ChrToChunk => machine.translate_chr_to_chunk(records),
        Direction::ChunkToChr => machine.translate_chunk_to_chr(records),
    }
    .context("translating records")?;

    let (mapped, unmapped) = translation.into_parts();

    if !unmapped.is_empty() {
        info!("{} record(s) could not be translated", unmapped.len());
    }

    write(args.io.output.as_deref(), &mapped)?;

    if let Some(path) = &args.unmapped {
        write(Some(path.as_path()), &unmapped)?;
    }

    Ok(())
}

/// Builds a chunk machine and translates the input file with it.
fn run_translation(direction: Direction, args: &TranslateArgs) -> Result<()> {
    let machine = Builder::default()
        .miss_policy(args.on_miss)
        .try_build_from(open(&args.chunks)?)
        .with_context(|| format!("loading chunks from {}", args.chunks.display()))?;

    match args.format {
        Format::Map => translate::<record::Map>(&machine, direction, args),
        Format::Set => translate::<record::Set>(&machine, direction, args),
        Format::Align => translate::<record::Align>(&machine, direction, args),
        Format::Path => translate::<record::Path>(&machine, direction, args),
        Format::Match => translate::<record::Match>(&machine, direction, args),
    }
}

/// Merges the overlapping records of the input file.
fn merge<R>(io: &Io) -> Result<()>
where
    R: Record + Merge,
{
    let merged = utils::self_merge(read::<R>(io)?).context("merging records")?;
    write(io.output.as_deref(), &merged)
}

/// Removes the records of the input file that share their ranges with
/// another record.
fn remove_doublons<R>(io: &Io) -> Result<()>
where
    R: Record + Paired,
{
    let unique = utils::remove_doublons(read::<R>(io)?);
    write(io.output.as_deref(), &unique)
}

/// Runs the requested operation.
fn throw(args: &Args) -> Result<()> {
    match &args.command {
        Command::ChrToChunk(args) => run_translation(Direction::ChrToChunk, args),
        Command::ChunkToChr(args) => run_translation(Direction::ChunkToChr, args),
        Command::Merge(args) => match args.format {
            Format::Map => merge::<record::Map>(&args.io),
            Format::Set => merge::<record::Set>(&args.io),
            format => bail!("cannot merge {format} records: expected map or set"),
        },
        Command::RemoveDoublons(args) => match args.format {
            Format::Align => remove_doublons::<record::Align>(&args.io),
            Format::Path => remove_doublons::<record::Path>(&args.io),
            Format::Match => {
                let unique = utils::remove_match_doublons(read(&args.io)?);
                write::<record::Match>(args.io.output.as_deref(), &unique)
            }
            format => bail!(
                "cannot remove doublons from {format} records: expected align, path or match"
            ),
        },
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .with_writer(std::io::stderr)
            .init(),
    };

    throw(&args)
}
