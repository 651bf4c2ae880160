//! Sample description. Part of `stsd` atom.

use std::io::Cursor;

use binrw::{BinRead, BinReaderExt};

use crate::{FourCC, QtError};

use super::{format::is_non_video, video::VIDEO_LAYOUT_SIZE, VideoDescription};

/// Size in bytes of the general fields
/// that apply to all sample descriptions.
pub(crate) const ENTRY_HEADER_SIZE: usize = 16;

/// General fields. Apply to all sample descriptions.
#[derive(Debug, BinRead)]
#[br(big)]
struct EntryHeader {
    /// Sample description size, including this field.
    _size: u32,
    /// Data format
    format: [u8; 4],
    /// Reserved. Must be set to 0.
    _reserved: [u8; 6],
    /// Data reference index
    _data_reference_index: u16,
}

/// Kind of sample description,
/// used for "first of kind" lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Generic,
    Video,
}

/// Single entry in a sample description atom (`stsd`).
#[derive(Debug, Clone, PartialEq)]
pub enum SampleDescription {
    /// Any sample description not matching the video layout,
    /// e.g. audio, timecode, metadata.
    Generic {
        format: FourCC
    },
    /// Video sample description.
    Video(VideoDescription),
}

impl SampleDescription {
    /// Decode a single entry. `data` must span exactly
    /// the entry's declared size and be at least
    /// `ENTRY_HEADER_SIZE` bytes.
    pub(crate) fn decode(data: &[u8]) -> Result<Self, QtError> {
        if data.len() < ENTRY_HEADER_SIZE {
            return Err(QtError::malformed(
                FourCC::Stsd,
                format!("sample description of {} bytes", data.len())
            ))
        }

        let mut cursor = Cursor::new(data);
        let header = cursor.read_be::<EntryHeader>()?;
        let format = FourCC::from_slice(&header.format);

        let region = &data[ENTRY_HEADER_SIZE..];

        // any format may carry the video layout,
        // unless known to be sound, timecode or metadata
        if !is_non_video(&format) && region.len() >= VIDEO_LAYOUT_SIZE {
            let video = cursor.read_be_args::<VideoDescription>((format,))?;
            return Ok(Self::Video(video))
        }

        Ok(Self::Generic { format })
    }

    pub fn kind(&self) -> SampleKind {
        match self {
            Self::Generic { .. } => SampleKind::Generic,
            Self::Video(_) => SampleKind::Video,
        }
    }

    pub fn format(&self) -> FourCC {
        match self {
            Self::Generic { format } => *format,
            Self::Video(v) => v.format(),
        }
    }

    /// Returns true if the sample description is for video.
    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video(_))
    }

    /// Returns the video sample description.
    pub fn video(&self) -> Option<&VideoDescription> {
        match self {
            Self::Video(v) => Some(v),
            _ => None,
        }
    }

    /// Returns resolution in pixels if the sample description is for video.
    pub fn resolution(&self) -> Option<(u16, u16)> {
        self.video().map(|v| v.resolution())
    }
}
