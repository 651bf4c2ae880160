//! Video sample description. Part of `stsd` atom.
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/video_sample_description>

use binrw::BinRead;

use crate::{support::counted_string, FourCC};

use super::VideoFormat;

/// Size in bytes of the fixed video layout
/// following the general sample description fields.
pub(crate) const VIDEO_LAYOUT_SIZE: usize = 70;

/// Video sample description.
///
/// Only the fixed width layout is decoded, video extensions
/// (e.g. `avcC`, `pasp`) following it are ignored.
#[derive(Debug, Clone, PartialEq, BinRead)]
#[br(big, import(format: FourCC))]
pub struct VideoDescription {
    /// Data format, e.g. `avc1`.
    #[br(calc = format)]
    format: FourCC,
    /// A 16-bit integer that holds the sample description version.
    _version: u16,
    /// A 16-bit integer.
    _revision_level: u16,
    /// A 32-bit integer that specifies the developer of the compressor that generated the compressed data.
    vendor: u32,
    /// A 32-bit integer that indicates the degree of temporal compression.
    temporal_quality: u32,
    /// A 32-bit integer that indicates the degree of spatial compression.
    spatial_quality: u32,
    /// A 16-bit integer that specifies the width of the source image in pixels.
    width: u16,
    /// A 16-bit integer that specifies the height of the source image in pixels.
    height: u16,
    /// A 32-bit fixed-point number containing the horizontal resolution of the image in pixels per inch.
    horizontal_resolution: u32,
    /// A 32-bit fixed-point number containing the vertical resolution of the image in pixels per inch.
    vertical_resolution: u32,
    /// A 32-bit integer.
    _data_size: u32,
    /// A 16-bit integer that indicates how many frames of compressed data are stored in each sample.
    frame_count: u16,
    /// A 32-byte Pascal string containing the name of the compressor that created the image, such as “jpeg”.
    #[br(map = |data: [u8; 32]| counted_string(&data, true))]
    compressor_name: String,
    /// A 16-bit integer that indicates the pixel depth of the compressed image.
    depth: i16,
    /// A 16-bit integer that identifies which color table to use.
    color_table_id: i16,
}

impl VideoDescription {
    pub fn format(&self) -> FourCC {
        self.format
    }

    /// Returns the video codec for the data format.
    /// Always set for a decoded video description.
    pub fn video_format(&self) -> Option<VideoFormat> {
        VideoFormat::from_fourcc(&self.format)
    }

    pub fn vendor(&self) -> u32 {
        self.vendor
    }

    pub fn temporal_quality(&self) -> u32 {
        self.temporal_quality
    }

    pub fn spatial_quality(&self) -> u32 {
        self.spatial_quality
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Returns resolution in pixels as `(WIDTH, HEIGHT)`.
    pub fn resolution(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Horizontal resolution in pixels per inch (16.16 fixed point).
    pub fn horizontal_resolution(&self) -> f64 {
        self.horizontal_resolution as f64 / 2_u32.pow(16) as f64
    }

    /// Vertical resolution in pixels per inch (16.16 fixed point).
    pub fn vertical_resolution(&self) -> f64 {
        self.vertical_resolution as f64 / 2_u32.pow(16) as f64
    }

    pub fn frame_count(&self) -> u16 {
        self.frame_count
    }

    pub fn compressor_name(&self) -> &str {
        self.compressor_name.as_str()
    }

    pub fn depth(&self) -> i16 {
        self.depth
    }

    pub fn color_table_id(&self) -> i16 {
        self.color_table_id
    }
}
