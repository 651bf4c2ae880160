//! Payload decoders for the atoms needed for video metadata.

mod mvhd;
mod stsd;

pub use mvhd::Mvhd;
pub use stsd::{SampleDescription, SampleKind, Stsd, VideoDescription, VideoFormat};
