//! qtarrange - list QuickTime movies in a directory, or sort them into
//! sub-directories named after resolution and frame rate, e.g. `1920x1080@24`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use qtvidmeta::{read_many, video_program, QtError, VideoMetadata};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod arrange;
mod table;

use arrange::Transfer;

/// Operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Print metadata for each movie.
    Show,
    /// Create symbolic links in the target directory.
    Link,
    /// Copy movies to the target directory.
    Copy,
    /// Move movies to the target directory.
    Move,
}

impl Mode {
    fn transfer(&self) -> Option<Transfer> {
        match self {
            Mode::Show => None,
            Mode::Link => Some(Transfer::Link),
            Mode::Copy => Some(Transfer::Copy),
            Mode::Move => Some(Transfer::Move),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "qtarrange")]
#[command(author, version, about = "Show or arrange QuickTime movies by resolution and frame rate")]
#[command(after_help = "EXAMPLES:\n    \
    qtarrange show ~/Videos\n    \
    qtarrange link ~/Videos ~/Sorted\n    \
    qtarrange move .")]
struct Args {
    /// What to do with each movie
    #[arg(value_enum)]
    mode: Mode,

    /// Directory containing the movies
    #[arg(default_value = ".")]
    source: PathBuf,

    /// Directory to create format directories in (default: SOURCE)
    target: Option<PathBuf>,

    /// Number of files to read in parallel (default: auto-detect)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Verbose output (log each atom lookup)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.mode == Mode::Show && args.target.is_some() {
        Args::command()
            .error(ErrorKind::TooManyValues, "'show' does not take a target directory")
            .exit();
    }

    // Initialize logging, RUST_LOG takes precedence
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "error" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let paths = arrange::movies(&args.source)
        .with_context(|| format!("Failed to read directory {}", args.source.display()))?;
    info!(source = %args.source.display(), movies = paths.len(), "found movies");

    let program = video_program();
    let results = read_many(&paths, &program);

    match args.mode.transfer() {
        None => show(&paths, results),
        Some(transfer) => {
            let target = args.target.as_deref().unwrap_or(&args.source);
            arrange(transfer, &paths, results, target);
        }
    }

    Ok(())
}

fn show(paths: &[PathBuf], results: Vec<Result<VideoMetadata, QtError>>) {
    println!("{}", table::headline());

    for (path, result) in paths.iter().zip(results) {
        let row = result
            .map_err(anyhow::Error::from)
            .and_then(|meta| Ok(table::row(&meta)?));
        match row {
            Ok(row) => println!("{row}"),
            Err(err) => {
                debug!(path = %path.display(), %err, "skipped");
                eprintln!("Skipped unsupported file: {}", file_name(path));
            }
        }
    }
}

fn arrange(
    transfer: Transfer,
    paths: &[PathBuf],
    results: Vec<Result<VideoMetadata, QtError>>,
    target: &Path,
) {
    for (path, result) in paths.iter().zip(results) {
        let meta = match result {
            Ok(meta) => meta,
            Err(QtError::IOError(err)) => {
                warn!(path = %path.display(), %err, "read failed");
                eprintln!("IO-Error with file {}", path.display());
                continue;
            },
            Err(_) => {
                eprintln!("Skipped unsupported file: {}", file_name(path));
                continue;
            }
        };

        match arrange::transfer(transfer, path, target, &meta.arrangement_dir(), meta.file_name()) {
            Ok(dest) => println!("{} created.", dest.display()),
            Err(err) => {
                warn!(path = %path.display(), %err, ?transfer, "transfer failed");
                eprintln!("IO-Error with file {}", path.display());
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
