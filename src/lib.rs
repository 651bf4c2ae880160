//! Extract video metadata from QuickTime files (`.mov`):
//! duration, frame rate, resolution and creation time.
//!
//! Atoms are located by executing a `CommandProgram`, a fixed path
//! through the atom tree. Siblings not on that path are skipped
//! via their declared size, so only the movie header (`mvhd`)
//! and sample description (`stsd`) atoms are ever decoded.
//! Does not and will not support any kind of video de/encoding.
//!
//! The implementation was mostly done with help from
//! <https://developer.apple.com/documentation/quicktime-file-format>
//!
//! ```rs
//! use qtvidmeta::{QtFile, read_many, video_program};
//! use std::path::Path;
//!
//! fn main() -> Result<(), qtvidmeta::QtError> {
//!     let program = video_program();
//!
//!     let mut qt = QtFile::new(Path::new("VIDEO.MOV"))?;
//!     let meta = qt.video_metadata(&program)?;
//!
//!     // e.g. "1920x1080@24"
//!     println!("{}", meta.arrangement_dir());
//!
//!     // Multiple files, read in parallel
//!     for result in read_many(&["A.MOV", "B.MOV"], &program) {
//!         println!("{result:?}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod atom;
pub mod atom_types;
pub mod consts;
pub mod errors;
pub mod fourcc;
pub mod meta;
pub mod program;
pub mod qt;
pub(crate) mod support;

// Traversal engine
pub(crate) mod reader;


pub use atom::{Atom, AtomHeader};
pub use atom_types::{
    Mvhd,
    Stsd,
    SampleDescription, // stsd component
    SampleKind, // stsd component
    VideoDescription, // stsd component
    VideoFormat, // stsd component
};
pub use consts::{CONTAINER, QT_TIME_ZERO};
pub use errors::QtError;
pub use fourcc::FourCC;
pub use meta::{aggregate, video_program, VideoMetadata};
pub use program::{Command, CommandProgram, Op, ProgramBuilder};
pub use qt::{read_many, QtFile};
pub use reader::decode;
