use std::{io::{Read, Seek}, ops::Range};

use binrw::BinReaderExt;
use tracing::trace;

use crate::{FourCC, QtError};

/// Atom header.
/// 8 or 16 bytes, depending on whether
/// 32 or 64-bit sized.
///
/// ```ignore
/// | [X X X X] [Y Y Y Y] [Z Z Z Z Z Z Z Z] |
///    |         |         |
///    |         |         64bit size (optional, only if 32 bit size == 1)
///    |         FourCC
///    32bit size (0 = extends to end of enclosing atom/file)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomHeader {
    /// Total atom size in bytes including 8/16 byte header.
    /// Already resolved for 64-bit and open-ended sizes.
    pub(crate) atom_size: u64,
    /// FourCC
    pub(crate) name: FourCC,
    /// Absolute byte offset for start of atom,
    /// i.e. byte offset for its header,
    /// starting with 32-bit size.
    pub(crate) offset: u64,
    /// Set to `true` if atom size specified
    /// in 64 bit area, i.e. 32bit size is set to `1`.
    /// Some cameras (e.g. insta360) do this regardless of
    /// actual atom size, so header size can not be derived
    /// from `atom_size`.
    pub(crate) size_64bit: bool,
    /// Set to `true` if 32bit size is `0`, i.e. the
    /// atom extends to the end of the enclosing scope.
    pub(crate) open_ended: bool,
}

impl AtomHeader {
    /// Reads atom header at current position of `reader`.
    ///
    /// `scope_end` is the absolute offset where the enclosing
    /// atom (or the stream) ends. A header or declared atom size
    /// that does not fit before `scope_end` raises `QtError::Truncated`.
    pub(crate) fn read<R: Read + Seek>(
        reader: &mut R,
        scope_end: u64
    ) -> Result<Self, QtError> {
        let offset = reader.stream_position()?;
        let available = scope_end.saturating_sub(offset);

        if available < 8 {
            return Err(QtError::Truncated { offset, needed: 8, available })
        }

        let size = reader.read_be::<u32>()?;
        let name = FourCC::from_slice(&reader.read_be::<[u8; 4]>()?);

        let (atom_size, size_64bit, open_ended) = match size {
            0 => (available, false, true),
            1 => {
                if available < 16 {
                    return Err(QtError::Truncated { offset, needed: 16, available })
                }
                (reader.read_be::<u64>()?, true, false)
            },
            n => (n as u64, false, false),
        };

        let hdr = Self { atom_size, name, offset, size_64bit, open_ended };

        if hdr.atom_size < hdr.header_size() as u64 {
            return Err(QtError::malformed(
                name,
                format!("declared size {atom_size} @ offset {offset} is smaller than its header")
            ))
        }
        if hdr.atom_size > available {
            return Err(QtError::Truncated { offset, needed: atom_size, available })
        }

        trace!(%name, offset, atom_size, "atom header");

        Ok(hdr)
    }

    /// Convenience method to check whether atom is
    /// a container or not.
    pub fn is_container(&self) -> bool {
        self.name.is_container()
    }

    pub fn start(&self) -> u64 {
        self.offset
    }

    pub fn end(&self) -> u64 {
        self.offset + self.atom_size
    }

    pub fn atom_size(&self) -> u64 {
        self.atom_size
    }

    pub fn name(&self) -> FourCC {
        self.name
    }

    pub fn is_64bit(&self) -> bool {
        self.size_64bit
    }

    pub fn is_open_ended(&self) -> bool {
        self.open_ended
    }

    /// Header size in bytes.
    /// Returns 8 or 16 bytes.
    pub fn header_size(&self) -> u8 {
        match self.size_64bit {
            true => 16,
            false => 8,
        }
    }

    /// Data load absolute offset,
    /// i.e. position after header
    /// adjusted for optional 64bit size value.
    pub fn data_offset(&self) -> u64 {
        self.offset + self.header_size() as u64
    }

    /// Size of data load
    /// (excludes header size).
    pub fn data_size(&self) -> u64 {
        self.atom_size - self.header_size() as u64
    }

    /// Returns start, end offset range for atom.
    pub fn bounds(&self) -> Range<u64> {
        self.offset .. self.end()
    }

    /// Returns start, end offset range for the data load.
    /// For containers this is the scope its children are
    /// searched in.
    pub fn data_bounds(&self) -> Range<u64> {
        self.data_offset() .. self.end()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::AtomHeader;
    use crate::{tests::{atom, atom64, atom_open}, FourCC, QtError};

    fn read(bytes: &[u8]) -> Result<AtomHeader, QtError> {
        AtomHeader::read(&mut Cursor::new(bytes), bytes.len() as u64)
    }

    #[test]
    fn header_32bit() {
        let bytes = atom(b"mvhd", &[0; 12]);
        let hdr = read(&bytes).unwrap();
        assert_eq!(hdr.name(), FourCC::Mvhd);
        assert_eq!(hdr.atom_size(), 20);
        assert_eq!(hdr.header_size(), 8);
        assert_eq!(hdr.data_size(), 12);
        assert_eq!(hdr.data_bounds(), 8..20);
    }

    #[test]
    fn header_64bit() {
        let bytes = atom64(b"free", &[0; 4]);
        let hdr = read(&bytes).unwrap();
        assert_eq!(hdr.name(), FourCC::Custom(*b"free"));
        assert!(hdr.is_64bit());
        assert_eq!(hdr.atom_size(), 20);
        assert_eq!(hdr.header_size(), 16);
        assert_eq!(hdr.data_size(), 4);
    }

    #[test]
    fn header_open_ended() {
        let mut bytes = atom_open(b"mdat", &[0; 10]);
        // scope ends before trailing bytes
        let scope_end = bytes.len() as u64;
        bytes.extend_from_slice(&[0xff; 6]);
        let hdr = AtomHeader::read(&mut Cursor::new(&bytes), scope_end).unwrap();
        assert!(hdr.is_open_ended());
        assert_eq!(hdr.atom_size(), 18);
        assert_eq!(hdr.data_size(), 10);
    }

    #[test]
    fn header_truncated() {
        let err = read(&[0, 0, 0, 8, b'm']).unwrap_err();
        assert!(matches!(err, QtError::Truncated { needed: 8, available: 5, .. }));

        // declares 100 bytes, only 12 present
        let mut bytes = atom(b"moov", &[0; 4]);
        bytes[3] = 100;
        let err = read(&bytes).unwrap_err();
        assert!(matches!(err, QtError::Truncated { needed: 100, available: 12, .. }));

        // 64-bit marker without room for the 64-bit size
        let err = read(&[0, 0, 0, 1, b'f', b'r', b'e', b'e', 0, 0]).unwrap_err();
        assert!(matches!(err, QtError::Truncated { needed: 16, .. }));
    }

    #[test]
    fn header_size_below_header_length() {
        let err = read(&[0, 0, 0, 4, b't', b'r', b'a', b'k']).unwrap_err();
        assert!(matches!(err, QtError::MalformedAtom { name: FourCC::Trak, .. }));

        let mut bytes = atom64(b"trak", &[]);
        bytes[15] = 12; // 64-bit size 12 < 16
        let err = read(&bytes).unwrap_err();
        assert!(matches!(err, QtError::MalformedAtom { .. }));
    }
}
