//! Movie header atom (`mvhd`).
//!
//! Location: `moov/mvhd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/movie_header_atom>

use std::io::Cursor;

use binrw::{BinRead, BinReaderExt, BinResult};
use time::{Duration, OffsetDateTime};

use crate::{FourCC, QtError, QT_TIME_ZERO};

/// Minimum data load size for a version 0 `mvhd`,
/// up to and including duration.
const MIN_SIZE_V0: usize = 4 + 4 + 4 + 4 + 4;
/// Minimum data load size for a version 1 `mvhd`,
/// up to and including duration.
const MIN_SIZE_V1: usize = 4 + 8 + 8 + 4 + 8;

/// Movie header atom (`mvhd`).
///
/// Version 0 stores times and duration as 32-bit values,
/// version 1 as 64-bit values. Time scale is 32-bit for both.
/// Remaining fields (rate, volume, matrix etc) are not decoded.
///
/// Location: `moov/mvhd`
#[derive(Debug, Clone, PartialEq, BinRead)]
#[br(big)]
pub struct Mvhd {
    version: u8,
    _flags: [u8; 3],
    /// Seconds since midnight, 1904-01-01 UTC
    #[br(parse_with = versioned, args(version))]
    pub(crate) creation_time: u64,
    /// Seconds since midnight, 1904-01-01 UTC
    #[br(parse_with = versioned, args(version))]
    pub(crate) modification_time: u64,
    /// Number of time units that pass in one second
    pub(crate) time_scale: u32,
    /// Unscaled duration. I.e. "ticks"
    /// that require dividing by time scale
    /// to derive a value in seconds.
    ///
    /// Corresponds to the longest track.
    #[br(parse_with = versioned, args(version))]
    pub(crate) duration: u64,
}

/// Reads a 32-bit value for version 0, 64-bit for version 1.
#[binrw::parser(reader, endian)]
fn versioned(version: u8) -> BinResult<u64> {
    match version {
        1 => u64::read_options(reader, endian, ()),
        _ => u32::read_options(reader, endian, ()).map(u64::from),
    }
}

impl Mvhd {
    /// Decode `mvhd` data load (i.e. excluding atom header).
    pub(crate) fn decode(data: &[u8]) -> Result<Self, QtError> {
        let version = *data.first()
            .ok_or_else(|| QtError::malformed(FourCC::Mvhd, "empty data load"))?;

        let min = match version {
            0 => MIN_SIZE_V0,
            1 => MIN_SIZE_V1,
            v => return Err(QtError::malformed(FourCC::Mvhd, format!("unsupported version {v}"))),
        };

        if data.len() < min {
            return Err(QtError::malformed(
                FourCC::Mvhd,
                format!("{} bytes, version {version} requires at least {min} bytes", data.len())
            ))
        }

        Ok(Cursor::new(data).read_be::<Self>()?)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Creation time in seconds since 1904-01-01 UTC.
    pub fn creation_time_raw(&self) -> u64 {
        self.creation_time
    }

    /// Modification time in seconds since 1904-01-01 UTC.
    pub fn modification_time_raw(&self) -> u64 {
        self.modification_time
    }

    pub fn time_scale(&self) -> u32 {
        self.time_scale
    }

    /// Duration in time scale units.
    pub fn duration_unscaled(&self) -> u64 {
        self.duration
    }

    /// Creation time as UTC datetime.
    /// May default to QuickTime time zero
    /// `1904-01-01 00:00:00` depending on device and settings.
    ///
    /// Returns `None` if the value exceeds the supported date range.
    pub fn creation_time(&self) -> Option<OffsetDateTime> {
        from_time_zero(self.creation_time)
    }

    /// Modification time as UTC datetime.
    pub fn modification_time(&self) -> Option<OffsetDateTime> {
        from_time_zero(self.modification_time)
    }

    /// Duration of the longest track.
    /// Zero if time scale is not set, saturates at `i64::MAX` seconds.
    pub fn duration(&self) -> Duration {
        let ts = self.time_scale as u64;
        if ts == 0 {
            return Duration::ZERO
        }
        let seconds = i64::try_from(self.duration / ts).unwrap_or(i64::MAX);
        let nanos = (self.duration % ts) as u128 * 1_000_000_000 / ts as u128;
        Duration::new(seconds, nanos as i32)
    }
}

fn from_time_zero(seconds: u64) -> Option<OffsetDateTime> {
    let seconds = i64::try_from(seconds).ok()?;
    QT_TIME_ZERO.checked_add(Duration::seconds(seconds))
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::Mvhd;
    use crate::{tests::{mvhd_v0, mvhd_v1}, FourCC, QtError};

    #[test]
    fn version_0() {
        let mvhd = Mvhd::decode(&mvhd_v0(3_600, 600, 6_000)).unwrap();
        assert_eq!(mvhd.version(), 0);
        assert_eq!(mvhd.time_scale(), 600);
        assert_eq!(mvhd.duration_unscaled(), 6_000);
        assert_eq!(mvhd.creation_time(), Some(datetime!(1904-01-01 1:00 UTC)));
        assert_eq!(mvhd.duration().whole_seconds(), 10);
    }

    #[test]
    fn version_1() {
        let ticks = u32::MAX as u64 + 10;
        let mvhd = Mvhd::decode(&mvhd_v1(86_400, 1_000, ticks)).unwrap();
        assert_eq!(mvhd.version(), 1);
        assert_eq!(mvhd.duration_unscaled(), ticks);
        assert_eq!(mvhd.creation_time(), Some(datetime!(1904-01-02 0:00 UTC)));
    }

    #[test]
    fn versions_equivalent() {
        let v0 = Mvhd::decode(&mvhd_v0(3_000_000_000, 24_000, 2_880_000)).unwrap();
        let v1 = Mvhd::decode(&mvhd_v1(3_000_000_000, 24_000, 2_880_000)).unwrap();
        assert_eq!(v0.creation_time(), v1.creation_time());
        assert_eq!(v0.time_scale(), v1.time_scale());
        assert_eq!(v0.duration_unscaled(), v1.duration_unscaled());
    }

    #[test]
    fn only_required_fields() {
        // trailing fields are not required
        let data = mvhd_v0(1, 1_000, 1_000);
        assert!(Mvhd::decode(&data[..20]).is_ok());
        let data = mvhd_v1(1, 1_000, 1_000);
        assert!(Mvhd::decode(&data[..32]).is_ok());
    }

    #[test]
    fn too_short() {
        let data = mvhd_v0(1, 1_000, 1_000);
        let err = Mvhd::decode(&data[..19]).unwrap_err();
        assert!(matches!(err, QtError::MalformedAtom { name: FourCC::Mvhd, .. }));

        // version 1 data load, long enough for version 0
        let data = mvhd_v1(1, 1_000, 1_000);
        assert!(matches!(Mvhd::decode(&data[..24]), Err(QtError::MalformedAtom { .. })));

        assert!(matches!(Mvhd::decode(&[]), Err(QtError::MalformedAtom { .. })));
    }

    #[test]
    fn unsupported_version() {
        let mut data = mvhd_v0(1, 1_000, 1_000);
        data[0] = 2;
        assert!(matches!(Mvhd::decode(&data), Err(QtError::MalformedAtom { .. })));
    }

    #[test]
    fn zero_time_scale() {
        let mvhd = Mvhd::decode(&mvhd_v0(0, 0, 1_000)).unwrap();
        assert_eq!(mvhd.duration(), time::Duration::ZERO);
    }

    #[test]
    fn duration() {
        let mvhd = Mvhd::decode(&mvhd_v0(0, 1_000, 2_500)).unwrap();
        assert_eq!(mvhd.duration(), time::Duration::milliseconds(2_500));

        let mvhd = Mvhd::decode(&mvhd_v1(0, 1, u64::MAX)).unwrap();
        assert_eq!(mvhd.duration().whole_seconds(), i64::MAX);
    }
}
