//! Decoded atom.

use crate::{AtomHeader, FourCC, Mvhd, Stsd, VideoDescription};

/// Atom as produced by a `READ` step.
///
/// Only the atom types needed for video metadata
/// are decoded. Containers are never descended into
/// when read, only their header (i.e. byte range) is kept.
#[derive(Debug, Clone)]
pub enum Atom {
    /// Container atom, e.g. `moov`, `trak`.
    Container(AtomHeader),
    /// Movie header atom (`mvhd`).
    MovieHeader(Mvhd),
    /// Sample description atom (`stsd`).
    SampleTable(Stsd),
}

impl Atom {
    pub fn name(&self) -> FourCC {
        match self {
            Atom::Container(hdr) => hdr.name(),
            Atom::MovieHeader(_) => FourCC::Mvhd,
            Atom::SampleTable(_) => FourCC::Stsd,
        }
    }

    pub fn movie_header(&self) -> Option<&Mvhd> {
        match self {
            Atom::MovieHeader(mvhd) => Some(mvhd),
            _ => None,
        }
    }

    pub fn sample_table(&self) -> Option<&Stsd> {
        match self {
            Atom::SampleTable(stsd) => Some(stsd),
            _ => None,
        }
    }

    /// Returns first video sample description,
    /// if the atom is a sample table containing one.
    pub fn video(&self) -> Option<&VideoDescription> {
        self.sample_table()?.video()
    }
}
