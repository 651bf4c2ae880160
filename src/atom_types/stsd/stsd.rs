//! Sample description atom (`stsd`).
//!
//! Location: `moov/trak[multiple]/mdia/minf/stbl/stsd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/sample_description_atom>

use std::io::Cursor;

use binrw::{BinRead, BinReaderExt};
use tracing::trace;

use crate::{FourCC, QtError};

use super::{sample::ENTRY_HEADER_SIZE, SampleDescription, SampleKind, VideoDescription};

/// Fields preceding the sample description table.
#[derive(Debug, BinRead)]
#[br(big)]
struct StsdHeader {
    version: u8,
    _flags: [u8; 3],
    no_of_entries: u32,
}

/// Size of `StsdHeader` in bytes.
const STSD_HEADER_SIZE: usize = 8;

/// Sample description atom (`stsd`).
///
/// Entries are decoded in full when the atom is read,
/// iterating over them does not touch the underlying stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stsd {
    version: u8,
    descriptions: Vec<SampleDescription>
}

impl Stsd {
    /// Decode `stsd` data load (i.e. excluding atom header).
    ///
    /// Each entry is located via its own declared size,
    /// so an entry that does not match the video layout
    /// is kept as `SampleDescription::Generic` without affecting
    /// the entries that follow it.
    pub(crate) fn decode(data: &[u8]) -> Result<Self, QtError> {
        if data.len() < STSD_HEADER_SIZE {
            return Err(QtError::malformed(
                FourCC::Stsd,
                format!("{} bytes, requires at least {STSD_HEADER_SIZE} bytes", data.len())
            ))
        }
        let header = Cursor::new(data).read_be::<StsdHeader>()?;

        let mut descriptions = Vec::new();
        let mut pos = STSD_HEADER_SIZE;

        for i in 0..header.no_of_entries {
            let rem = &data[pos..];
            let size = match rem.get(..4) {
                Some(b) => u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as usize,
                None => return Err(QtError::malformed(
                    FourCC::Stsd,
                    format!("{} entries declared, data ends after {i}", header.no_of_entries)
                )),
            };

            if size < ENTRY_HEADER_SIZE || size > rem.len() {
                return Err(QtError::malformed(
                    FourCC::Stsd,
                    format!("entry {i} declares {size} bytes, {} bytes remain", rem.len())
                ))
            }

            let description = SampleDescription::decode(&rem[..size])?;
            trace!(entry = i, format = %description.format(), kind = ?description.kind(), "sample description");
            descriptions.push(description);

            pos += size;
        }

        Ok(Self {
            version: header.version,
            descriptions
        })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn descriptions(&self) -> &[SampleDescription] {
        &self.descriptions
    }

    /// Iterate over sample descriptions in file order.
    /// Can be restarted any number of times.
    pub fn iter(&self) -> std::slice::Iter<'_, SampleDescription> {
        self.descriptions.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    /// Returns first sample description of specified kind.
    pub fn first(&self, kind: SampleKind) -> Option<&SampleDescription> {
        self.descriptions.iter()
            .find(|s| s.kind() == kind)
    }

    /// Returns `true` if the current `stsd`
    /// describes video.
    pub fn is_video(&self) -> bool {
        self.descriptions.iter()
            .any(|s| s.is_video())
    }

    /// Returns first video sample description,
    /// e.g. among mixed audio/video entries.
    pub fn video(&self) -> Option<&VideoDescription> {
        self.descriptions.iter()
            .find_map(|s| s.video())
    }

    /// Consumes `Stsd` and returns first video sample description.
    pub fn into_video(self) -> Option<VideoDescription> {
        self.descriptions.into_iter()
            .find_map(|s| match s {
                SampleDescription::Video(v) => Some(v),
                _ => None,
            })
    }

    /// Returns resolution in pixels
    /// as tuple `(WIDTH, HEIGHT)`,
    /// if current `stsd` describes video.
    pub fn resolution(&self) -> Option<(u16, u16)> {
        self.video().map(|v| v.resolution())
    }
}

impl<'a> IntoIterator for &'a Stsd {
    type Item = &'a SampleDescription;
    type IntoIter = std::slice::Iter<'a, SampleDescription>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Stsd;
    use crate::{
        tests::{audio_entry, stsd, video_entry},
        FourCC,
        QtError,
        SampleDescription,
        SampleKind,
    };

    #[test]
    fn mixed_entries() {
        let data = stsd(&[
            audio_entry(b"mp4a"),
            video_entry(b"avc1", 1280, 720),
            video_entry(b"hvc1", 3840, 2160),
        ]);
        let stsd = Stsd::decode(&data).unwrap();
        assert_eq!(stsd.len(), 3);
        assert!(stsd.is_video());
        // first video entry wins
        assert_eq!(stsd.resolution(), Some((1280, 720)));
        assert_eq!(stsd.first(SampleKind::Generic).map(|s| s.format()), Some(FourCC::from_slice(b"mp4a")));

        // restartable
        let first: Vec<FourCC> = stsd.iter().map(|s| s.format()).collect();
        let second: Vec<FourCC> = (&stsd).into_iter().map(|s| s.format()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn audio_only() {
        let stsd = Stsd::decode(&stsd(&[audio_entry(b"sowt")])).unwrap();
        assert!(!stsd.is_video());
        assert_eq!(stsd.video(), None);
        assert_eq!(stsd.first(SampleKind::Video), None);
        assert_eq!(stsd.into_video(), None);
    }

    #[test]
    fn empty_table() {
        let stsd = Stsd::decode(&stsd(&[])).unwrap();
        assert!(stsd.is_empty());
    }

    #[test]
    fn malformed_entry_isolated() {
        // 'avc1' entry too short for the video layout
        let mut short = video_entry(b"avc1", 640, 480);
        short.truncate(30);
        short[..4].copy_from_slice(&30_u32.to_be_bytes());

        let data = stsd(&[short, video_entry(b"avc1", 1920, 1080)]);
        let stsd = Stsd::decode(&data).unwrap();
        assert_eq!(stsd.descriptions()[0], SampleDescription::Generic { format: FourCC::from_slice(b"avc1") });
        assert_eq!(stsd.resolution(), Some((1920, 1080)));
    }

    #[test]
    fn entry_size_out_of_bounds() {
        let mut data = stsd(&[video_entry(b"avc1", 640, 480)]);
        // entry size past end of data load
        data[8..12].copy_from_slice(&500_u32.to_be_bytes());
        assert!(matches!(Stsd::decode(&data), Err(QtError::MalformedAtom { name: FourCC::Stsd, .. })));

        // entry size smaller than general fields
        data[8..12].copy_from_slice(&8_u32.to_be_bytes());
        assert!(matches!(Stsd::decode(&data), Err(QtError::MalformedAtom { .. })));
    }

    #[test]
    fn entry_count_exceeds_entries() {
        let mut data = stsd(&[audio_entry(b"mp4a")]);
        data[4..8].copy_from_slice(&2_u32.to_be_bytes());
        assert!(matches!(Stsd::decode(&data), Err(QtError::MalformedAtom { .. })));
    }

    #[test]
    fn too_short() {
        assert!(matches!(Stsd::decode(&[0, 0, 0, 0, 0]), Err(QtError::MalformedAtom { .. })));
    }
}
