use time::{macros::datetime, OffsetDateTime};

use crate::FourCC;

/// FourCC:s for known "container" atoms.
/// These are nested and contain more atoms,
/// within their specified, total size.
///
/// Only container atoms on the path to the
/// sample description are listed.
///
/// - `moov`: timing, tracks
/// - `trak`: moov.trak (multiple)
/// - `mdia`: moov.trak.mdia
/// - `minf`: moov.trak.mdia.minf
/// - `stbl`: moov.trak.mdia.minf.stbl, contains sample descriptions (stsd)
pub const CONTAINER: [FourCC; 5] = [
    FourCC::Moov,
    FourCC::Trak,
    FourCC::Mdia,
    FourCC::Minf,
    FourCC::Stbl,
];

/// Time zero for QuickTime containers. Midnight January 1, 1904, UTC.
pub const QT_TIME_ZERO: OffsetDateTime = datetime!(1904-01-01 0:00 UTC);
