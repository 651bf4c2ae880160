//! Video metadata, aggregated from decoded atoms.

use time::{Duration, OffsetDateTime};

use crate::{program::Command, Atom, CommandProgram, FourCC, QtError};

/// Program for locating the movie header and
/// the sample descriptions of the first track:
///
/// ```ignore
/// STEP_IN moov
///     READ mvhd
///     STEP_IN trak
///         STEP_IN mdia
///             STEP_IN minf
///                 STEP_IN stbl
///                     READ stsd
/// ```
pub fn video_program() -> CommandProgram {
    CommandProgram::new_unchecked(vec![
        Command::step_in(FourCC::Moov, 0),
        Command::read(FourCC::Mvhd, 1),
        Command::step_in(FourCC::Trak, 1),
        Command::step_in(FourCC::Mdia, 2),
        Command::step_in(FourCC::Minf, 3),
        Command::step_in(FourCC::Stbl, 4),
        Command::read(FourCC::Stsd, 5),
    ])
}

/// Video metadata for a single file.
/// Can only be created via `aggregate()`, and is
/// never modified after that.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    file_name: String,
    creation_date: OffsetDateTime,
    duration_seconds: u64,
    fps: f64,
    width: u16,
    height: u16,
}

impl VideoMetadata {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Creation time (UTC).
    pub fn creation_date(&self) -> OffsetDateTime {
        self.creation_date
    }

    /// Duration in whole seconds (rounded down).
    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    /// Duration in whole seconds, saturating at `i64::MAX` seconds.
    pub fn duration(&self) -> Duration {
        Duration::seconds(i64::try_from(self.duration_seconds).unwrap_or(i64::MAX))
    }

    /// Frames per second.
    /// Derived as `time scale / 1000`, which holds for
    /// cameras that set time scale to a multiple of 1000
    /// per nominal frame rate (e.g. 24000 for 24 fps),
    /// but is not true for QuickTime files in general.
    pub fn fps(&self) -> f64 {
        self.fps
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

    /// Directory name for sorting files by format:
    /// `{WIDTH}x{HEIGHT}@{FPS}`, FPS rounded to nearest integer,
    /// e.g. `1920x1080@24`.
    pub fn arrangement_dir(&self) -> String {
        format!("{}x{}@{}", self.width, self.height, self.fps.round() as u64)
    }
}

/// Combines the first movie header (`mvhd`) and the first video
/// sample description found in any sample table (`stsd`)
/// in `atoms` into `VideoMetadata`.
///
/// Raises `QtError::IncompleteMetadata` if either is missing,
/// and `QtError::MalformedAtom` if the movie header has a time scale of 0
/// or a creation time that can not be represented.
pub fn aggregate(
    file_name: impl Into<String>,
    atoms: Vec<Atom>
) -> Result<VideoMetadata, QtError> {
    let mut mvhd = None;
    let mut video = None;

    for atom in atoms {
        match atom {
            Atom::MovieHeader(m) if mvhd.is_none() => mvhd = Some(m),
            Atom::SampleTable(stsd) if video.is_none() => video = stsd.into_video(),
            _ => (),
        }
    }

    let (mvhd, video) = match (mvhd, video) {
        (Some(m), Some(v)) => (m, v),
        (m, v) => return Err(QtError::IncompleteMetadata {
            movie_header: m.is_some(),
            video_description: v.is_some()
        }),
    };

    let time_scale = mvhd.time_scale();
    if time_scale == 0 {
        return Err(QtError::malformed(FourCC::Mvhd, "time scale is 0"))
    }

    let creation_date = mvhd.creation_time()
        .ok_or_else(|| QtError::malformed(
            FourCC::Mvhd,
            format!("creation time {} out of range", mvhd.creation_time_raw())
        ))?;

    Ok(VideoMetadata {
        file_name: file_name.into(),
        creation_date,
        duration_seconds: mvhd.duration_unscaled() / time_scale as u64,
        fps: time_scale as f64 / 1000.0,
        width: video.width(),
        height: video.height(),
    })
}
