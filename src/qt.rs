//! QuickTime file and batch reading.
//!
//! ```rs
//! use qtvidmeta::{QtFile, video_program};
//! use std::path::Path;
//!
//! fn main() -> Result<(), qtvidmeta::QtError> {
//!     let program = video_program();
//!     let mut qt = QtFile::new(Path::new("VIDEO.MOV"))?;
//!     let meta = qt.video_metadata(&program)?;
//!
//!     println!("{}x{} @ {} fps", meta.width(), meta.height(), meta.fps());
//!
//!     Ok(())
//! }
//! ```

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, warn};

use crate::{aggregate, decode, Atom, CommandProgram, QtError, VideoMetadata};

/// QuickTime file.
/// The file is closed when `QtFile` is dropped.
#[derive(Debug)]
pub struct QtFile {
    path: PathBuf,
    /// Buffered reader over the open file.
    reader: BufReader<File>,
    /// File size in bytes.
    len: u64,
}

impl QtFile {
    /// Open file at `path`, using the default buffer size (8KiB).
    pub fn new(path: &Path) -> Result<Self, QtError> {
        Self::with_capacity(path, None)
    }

    /// Open file at `path` with optional custom buffer size.
    pub fn with_capacity(path: &Path, capacity: Option<usize>) -> Result<Self, QtError> {
        let file = File::open(path)?;
        let len = file.metadata()?.len(); // to avoid repeated sys calls
        let reader = match capacity {
            Some(cap) => BufReader::with_capacity(cap, file),
            None => BufReader::new(file),
        };

        Ok(Self {
            path: path.to_owned(),
            reader,
            len,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name, lossily converted to UTF-8.
    pub fn file_name(&self) -> String {
        self.path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// File size in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Execute `program`, returning decoded atoms in program order.
    /// Reading always starts from the beginning of the file,
    /// so the same `QtFile` can be decoded any number of times.
    pub fn decode(&mut self, program: &CommandProgram) -> Result<Vec<Atom>, QtError> {
        decode(&mut self.reader, program)
    }

    /// Execute `program` and aggregate the result into `VideoMetadata`.
    pub fn video_metadata(&mut self, program: &CommandProgram) -> Result<VideoMetadata, QtError> {
        let atoms = self.decode(program)?;
        aggregate(self.file_name(), atoms)
    }
}

/// Read video metadata for multiple files in parallel.
///
/// Returns one result per path, in the same order as `paths`.
/// A failure for one file does not affect any other.
pub fn read_many<P>(
    paths: &[P],
    program: &CommandProgram
) -> Vec<Result<VideoMetadata, QtError>>
where
    P: AsRef<Path> + Sync
{
    paths.par_iter()
        .map(|path| {
            let path = path.as_ref();
            let result = QtFile::new(path)
                .and_then(|mut qt| qt.video_metadata(program));
            match &result {
                Ok(meta) => debug!(path = %path.display(), resolution = ?meta.resolution(), fps = meta.fps(), "read"),
                Err(err) => warn!(path = %path.display(), %err, "failed to read video metadata"),
            }
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use super::{read_many, QtFile};
    use crate::{
        tests::{movie, mvhd_v0, stsd, video_entry},
        video_program,
        QtError,
    };

    fn temp_file(name: &str, data: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("qtvidmeta-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn file_metadata() {
        let data = movie(&mvhd_v0(0, 25_000, 250_000), &stsd(&[video_entry(b"avc1", 1920, 1080)]));
        let path = temp_file("file_metadata.mov", &data);

        let mut qt = QtFile::new(&path).unwrap();
        assert_eq!(qt.len(), data.len() as u64);
        assert_eq!(qt.file_name(), "file_metadata.mov");

        let program = video_program();
        let meta = qt.video_metadata(&program).unwrap();
        assert_eq!(meta.duration_seconds(), 10);
        assert_eq!(meta.arrangement_dir(), "1920x1080@25");

        // decoding again starts over
        assert_eq!(qt.video_metadata(&program).unwrap(), meta);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn batch_isolates_failures() {
        let good = temp_file(
            "batch_good.mov",
            &movie(&mvhd_v0(0, 50_000, 50_000), &stsd(&[video_entry(b"avc1", 3840, 2160)]))
        );
        let bad = temp_file("batch_bad.mov", b"not a movie");
        let missing = good.with_file_name("batch_missing.mov");

        let results = read_many(&[&good, &bad, &missing], &video_program());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().resolution(), (3840, 2160));
        assert!(results[1].is_err());
        assert!(matches!(results[2], Err(QtError::IOError(_))));

        fs::remove_file(good).unwrap();
        fs::remove_file(bad).unwrap();
    }
}
