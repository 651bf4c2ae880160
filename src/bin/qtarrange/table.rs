//! Aligned text table for `show` mode.

use qtvidmeta::VideoMetadata;
use time::{macros::format_description, OffsetDateTime};

/// Column separator.
const SEP: &str = "  ";

const DURATION_WIDTH: usize = 8;
const WIDTH_WIDTH: usize = 5;
const HEIGHT_WIDTH: usize = 6;
const FPS_WIDTH: usize = 10;
const CREATED_WIDTH: usize = 19;

/// Column titles, left-aligned to the same widths as the rows.
pub fn headline() -> String {
    format!(
        "{:<DURATION_WIDTH$}{SEP}{:<WIDTH_WIDTH$}{SEP}{:<HEIGHT_WIDTH$}{SEP}{:<FPS_WIDTH$}{SEP}{:<CREATED_WIDTH$}{SEP}FILE",
        "DURATION", "WIDTH", "HEIGHT", "FRAMESPSEC", "CREADATE"
    )
}

/// Single row for `meta`, values right-aligned.
pub fn row(meta: &VideoMetadata) -> Result<String, time::error::Format> {
    format_row(
        meta.duration_seconds(),
        meta.width(),
        meta.height(),
        meta.fps(),
        meta.creation_date(),
        meta.file_name(),
    )
}

fn format_row(
    duration: u64,
    width: u16,
    height: u16,
    fps: f64,
    created: OffsetDateTime,
    file_name: &str,
) -> Result<String, time::error::Format> {
    let created = created.format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))?;
    let duration = format!("{}:{:02}", duration / 60, duration % 60);

    Ok(format!(
        "{duration:>DURATION_WIDTH$}{SEP}{width:>WIDTH_WIDTH$}{SEP}{height:>HEIGHT_WIDTH$}{SEP}{fps:>FPS_WIDTH$.2}{SEP}{created:>CREATED_WIDTH$}{SEP}{file_name}"
    ))
}
