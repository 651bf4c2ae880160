mod stsd;
mod format;
mod video;
mod sample;

pub use stsd::Stsd;
pub use sample::{SampleDescription, SampleKind};
pub use format::VideoFormat;
pub use video::VideoDescription;
