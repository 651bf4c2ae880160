//! QuickTime atom FourCC.
//! See atom types in <https://developer.apple.com/documentation/quicktime-file-format/atoms>.
//!
//! Only the atoms on the path to the video sample description are named,
//! everything else is kept as raw bytes in `FourCC::Custom`.

use std::fmt::Display;

/// QuickTime atom Four CC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FourCC {
    /// Movie atom
    Moov,
    /// Movie header atom
    Mvhd,
    /// Track atom
    Trak,
    /// Media atom
    Mdia,
    /// Media information atom
    Minf,
    /// Sample table atom
    Stbl,
    /// Sample description atom
    Stsd,

    /// Any other atom. Bytes are kept as read, since
    /// e.g. GoPro uses ISO8859-1 values above the ASCII range.
    Custom([u8; 4])
}

impl FourCC {
    pub fn from_slice(fourcc: &[u8; 4]) -> Self {
        match fourcc {
            b"moov" => Self::Moov,
            b"mvhd" => Self::Mvhd,
            b"trak" => Self::Trak,
            b"mdia" => Self::Mdia,
            b"minf" => Self::Minf,
            b"stbl" => Self::Stbl,
            b"stsd" => Self::Stsd,
            _ => Self::Custom(*fourcc),
        }
    }

    pub fn from_u32(value: u32) -> Self {
        Self::from_slice(&value.to_be_bytes())
    }

    /// Returns the four bytes as stored in the file.
    pub fn to_bytes(&self) -> [u8; 4] {
        match self {
            Self::Moov => *b"moov",
            Self::Mvhd => *b"mvhd",
            Self::Trak => *b"trak",
            Self::Mdia => *b"mdia",
            Self::Minf => *b"minf",
            Self::Stbl => *b"stbl",
            Self::Stsd => *b"stsd",
            Self::Custom(b) => *b,
        }
    }

    /// Returns `true` if the atom is listed as a container
    /// in `CONTAINER`, i.e. its data load is a sequence of atoms.
    pub fn is_container(&self) -> bool {
        crate::CONTAINER.contains(self)
    }

    /// Returns `true` if there is a payload decoder
    /// for this atom.
    pub fn is_decodable(&self) -> bool {
        matches!(self, Self::Mvhd | Self::Stsd)
    }
}

impl Display for FourCC {
    /// Bytes are mapped to single-byte chars (ISO8859-1),
    /// since decoding non-ASCII FourCC as UTF-8 would fail.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s: String = self.to_bytes().iter().map(|b| *b as char).collect();
        write!(f, "{s}")
    }
}

impl From<&[u8; 4]> for FourCC {
    fn from(value: &[u8; 4]) -> Self {
        Self::from_slice(value)
    }
}
