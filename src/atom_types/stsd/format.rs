use std::fmt::Display;

use crate::FourCC;

/// Known video data formats. Only used for naming,
/// whether a sample description is video is decided by
/// its layout (see `is_non_video()`).
///
/// See: <https://developer.apple.com/documentation/quicktime-file-format/video_sample_description>
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VideoFormat {
    /// `avc1` H.264 video
    Avc1,
    /// `avc3` H.264 video, parameter sets in-band
    Avc3,
    /// `hvc1` H.265 video
    Hvc1,
    /// `hev1` H.265 video, parameter sets in-band
    Hev1,
    /// `av01` AV1 video
    Av01,
    /// `vp09` VP9 video
    Vp09,
    /// `apco` Apple ProRes 422 Proxy
    Apco,
    /// `apcs` Apple ProRes 422 LT
    Apcs,
    /// `apcn` Apple ProRes 422
    Apcn,
    /// `apch` Apple ProRes 422 HQ
    Apch,
    /// `ap4h` Apple ProRes 4444
    Ap4h,
    /// `cvid` Cinepak
    Cvid,
    /// `dvc ` NTSC DV-25 video
    Dvc,
    /// `dvcp` PAL DV-25 video
    Dvcp,
    /// `h263` H.263 video
    H263,
    /// `jpeg` JPEG
    Jpeg,
    /// `mjpa` Motion-JPEG (format A)
    Mjpa,
    /// `mjpb` Motion-JPEG (format B)
    Mjpb,
    /// `mp4v` MPEG-4 video
    Mp4v,
    /// `png ` Portable Network Graphics
    Png,
    /// `raw ` Uncompressed RGB
    Raw,
    /// `rle ` Animation
    Rle,
    /// `rpza` Apple video
    Rpza,
    /// `SVQ1` Sorenson video, version 1
    Svq1,
    /// `SVQ3` Sorenson video 3
    Svq3,
    /// `2vu ` Uncompressed Y´CbCr,
    /// 8-bit-per-component 4:2:2
    TwoVu,
    /// `v210` Uncompressed Y´CbCr,
    /// 10-bit-per-component 4:2:2
    V210,
    /// `yuv2` Uncompressed Y´CbCr,
    /// 8-bit-per-component 4:2:2
    Yuv2,
}

impl Display for VideoFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl VideoFormat {
    /// Convert from Big Endian `u32`.
    /// Returns `None` for unknown/non-video formats.
    pub fn from_be_u32(value: u32) -> Option<Self> {
        let fmt = match value {
            0x61766331 => Self::Avc1,
            0x61766333 => Self::Avc3,
            0x68766331 => Self::Hvc1,
            0x68657631 => Self::Hev1,
            0x61763031 => Self::Av01,
            0x76703039 => Self::Vp09,
            0x6170636f => Self::Apco,
            0x61706373 => Self::Apcs,
            0x6170636e => Self::Apcn,
            0x61706368 => Self::Apch,
            0x61703468 => Self::Ap4h,
            0x63766964 => Self::Cvid,
            0x64766320 => Self::Dvc,
            0x64766370 => Self::Dvcp,
            0x68323633 => Self::H263,
            0x6a706567 => Self::Jpeg,
            0x6d6a7061 => Self::Mjpa,
            0x6d6a7062 => Self::Mjpb,
            0x6d703476 => Self::Mp4v,
            0x706e6720 => Self::Png,
            0x72617720 => Self::Raw,
            0x726c6520 => Self::Rle,
            0x72707a61 => Self::Rpza,
            0x53565131 => Self::Svq1,
            0x53565133 => Self::Svq3,
            0x32767520 => Self::TwoVu,
            0x76323130 => Self::V210,
            0x79757632 => Self::Yuv2,
            _ => return None,
        };
        Some(fmt)
    }

    pub fn from_fourcc(fourcc: &FourCC) -> Option<Self> {
        Self::from_be_u32(u32::from_be_bytes(fourcc.to_bytes()))
    }

    // Returns `&str` in the same form
    // format is stored, e.g. with added
    // space if only three bytes/characters.
    pub fn to_str(&self) -> &str {
        match self {
            VideoFormat::Avc1 => "avc1",
            VideoFormat::Avc3 => "avc3",
            VideoFormat::Hvc1 => "hvc1",
            VideoFormat::Hev1 => "hev1",
            VideoFormat::Av01 => "av01",
            VideoFormat::Vp09 => "vp09",
            VideoFormat::Apco => "apco",
            VideoFormat::Apcs => "apcs",
            VideoFormat::Apcn => "apcn",
            VideoFormat::Apch => "apch",
            VideoFormat::Ap4h => "ap4h",
            VideoFormat::Cvid => "cvid",
            VideoFormat::Dvc => "dvc ",
            VideoFormat::Dvcp => "dvcp",
            VideoFormat::H263 => "h263",
            VideoFormat::Jpeg => "jpeg",
            VideoFormat::Mjpa => "mjpa",
            VideoFormat::Mjpb => "mjpb",
            VideoFormat::Mp4v => "mp4v",
            VideoFormat::Png => "png ",
            VideoFormat::Raw => "raw ",
            VideoFormat::Rle => "rle ",
            VideoFormat::Rpza => "rpza",
            VideoFormat::Svq1 => "SVQ1",
            VideoFormat::Svq3 => "SVQ3",
            VideoFormat::TwoVu => "2vu ",
            VideoFormat::V210 => "v210",
            VideoFormat::Yuv2 => "yuv2",
        }
    }
}

/// Sample description formats that never use the video layout,
/// even when the entry is long enough to hold it
/// (e.g. version 2 sound descriptions).
///
/// `raw ` is both uncompressed video and 8-bit sound, so it is not listed.
const NON_VIDEO: [&[u8; 4]; 34] = [
    // sound
    b"mp4a", b"sowt", b"twos", b"lpcm", b"in24", b"in32",
    b"fl32", b"fl64", b"alac", b"ac-3", b"ec-3", b".mp3",
    b"ulaw", b"alaw", b"ima4", b"MAC3", b"MAC6", b"Opus",
    b"NONE", b"samr", b"agsm", b"QDM2",
    // timecode, text, metadata
    b"tmcd", b"mebx", b"text", b"tx3g", b"wvtt", b"c608",
    b"c708", b"stpp", b"gpmd", b"camm", b"mett", b"rtp ",
];

/// Returns `true` if `format` is a known sound, timecode,
/// text or metadata format.
pub(crate) fn is_non_video(format: &FourCC) -> bool {
    NON_VIDEO.contains(&&format.to_bytes())
}
