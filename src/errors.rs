//! Various QuickTime-related errors.

use thiserror::Error;

use crate::FourCC;

/// QuickTime read/parse errors.
/// All are fatal for the file being read.
#[derive(Debug, Error)]
pub enum QtError {
    /// Converted `BinResult` error.
    #[error("{0}")]
    BinReadError(binrw::Error),
    /// IO error
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    /// Fewer bytes left in the stream or enclosing atom
    /// than an atom header or payload declares.
    #[error("Truncated stream @ offset {offset}: needed {needed} bytes, {available} available.")]
    Truncated{offset: u64, needed: u64, available: u64},
    /// A decoded field violates the layout of its atom type.
    #[error("Malformed atom '{name}': {reason}")]
    MalformedAtom{name: FourCC, reason: String},
    /// Target atom of a program step not found before the
    /// end of the enclosing atom, i.e. the file does not have
    /// the expected structure (e.g. no track).
    #[error("No atom '{name}' at depth {depth}.")]
    AtomNotFound{name: FourCC, depth: usize},
    /// Traversal succeeded, but a movie header, a video sample description,
    /// or both, were missing.
    #[error("Incomplete metadata (movie header: {movie_header}, video sample description: {video_description}).")]
    IncompleteMetadata{movie_header: bool, video_description: bool},
    /// Command program is inconsistent.
    #[error("Invalid command program: {0}")]
    InvalidProgram(String),
}

impl QtError {
    /// Convenience constructor for `QtError::MalformedAtom`.
    pub(crate) fn malformed(name: FourCC, reason: impl Into<String>) -> Self {
        Self::MalformedAtom { name, reason: reason.into() }
    }
}

/// Converts binrw::Error to QtError
impl From<binrw::Error> for QtError {
    fn from(err: binrw::Error) -> QtError {
        match err {
            binrw::Error::Io(e) => QtError::IOError(e),
            e => QtError::BinReadError(e),
        }
    }
}
