//! Traversal engine. Executes a `CommandProgram` against a stream.

use std::{
    io::{Read, Seek, SeekFrom},
    mem,
    ops::Range,
};

use tracing::{debug, trace};

use crate::{
    program::{Command, Op},
    Atom,
    AtomHeader,
    CommandProgram,
    FourCC,
    Mvhd,
    QtError,
    Stsd,
};

/// Decodes the atoms targeted by the `Read` commands in `program`,
/// returned in program order.
///
/// Siblings are skipped via their declared size, without
/// being parsed. Any error aborts the traversal, no partial
/// result is returned.
///
/// Errors:
/// - `QtError::AtomNotFound` if a command's target does not exist
///   before the end of the enclosing atom (or stream).
/// - `QtError::Truncated` if a header or payload does not fit
///   within the enclosing atom (or stream).
/// - `QtError::MalformedAtom` if a decoded atom violates its layout.
pub fn decode<R: Read + Seek>(
    reader: &mut R,
    program: &CommandProgram
) -> Result<Vec<Atom>, QtError> {
    let mut traversal = Traversal::new(reader)?;
    let mut atoms = Vec::with_capacity(program.reads());

    for cmd in program {
        if let Some(atom) = traversal.execute(cmd)? {
            atoms.push(atom);
        }
    }

    Ok(atoms)
}

/// Scan state for a single traversal.
struct Traversal<'r, R> {
    reader: &'r mut R,
    /// Absolute offset of next atom header to read.
    cursor: u64,
    /// Byte range siblings are searched in.
    scope: Range<u64>,
    /// Enclosing scopes, outermost first.
    /// Never popped, since traversal only descends.
    parents: Vec<Range<u64>>,
}

impl<'r, R: Read + Seek> Traversal<'r, R> {
    fn new(reader: &'r mut R) -> Result<Self, QtError> {
        let len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        Ok(Self {
            reader,
            cursor: 0,
            scope: 0 .. len,
            parents: Vec::new(),
        })
    }

    /// Current nesting depth. 0 = top level.
    fn depth(&self) -> usize {
        self.parents.len()
    }

    fn execute(&mut self, cmd: &Command) -> Result<Option<Atom>, QtError> {
        if cmd.depth != self.depth() {
            return Err(QtError::InvalidProgram(format!(
                "command for '{}' declares depth {}, traversal is at depth {}",
                cmd.target, cmd.depth, self.depth()
            )))
        }

        let header = self.scan(cmd.target)?;

        match cmd.op {
            Op::StepIn => {
                self.step_in(&header);
                Ok(None)
            },
            Op::Read => self.read(header).map(Some)
        }
    }

    /// Finds next atom with name `target` in current scope,
    /// skipping any other atoms. Reader is positioned after
    /// the header of the returned atom.
    fn scan(&mut self, target: FourCC) -> Result<AtomHeader, QtError> {
        loop {
            if self.cursor >= self.scope.end {
                debug!(%target, depth = self.depth(), "atom not found");
                return Err(QtError::AtomNotFound { name: target, depth: self.depth() })
            }

            self.reader.seek(SeekFrom::Start(self.cursor))?;
            let header = AtomHeader::read(self.reader, self.scope.end)?;

            if header.name == target {
                return Ok(header)
            }

            trace!(name = %header.name, offset = header.offset, "skip");
            self.cursor = header.end();
        }
    }

    /// Descends into container, without decoding its data load.
    fn step_in(&mut self, header: &AtomHeader) {
        let inner = header.data_bounds();
        debug!(name = %header.name, scope = ?inner, depth = self.depth() + 1, "step in");
        self.cursor = inner.start;
        self.parents.push(mem::replace(&mut self.scope, inner));
    }

    /// Decodes atom and moves cursor to next sibling.
    fn read(&mut self, header: AtomHeader) -> Result<Atom, QtError> {
        debug!(name = %header.name, offset = header.offset, size = header.atom_size, "read");
        let next = header.end();

        let atom = match header.name {
            FourCC::Mvhd => Atom::MovieHeader(Mvhd::decode(&self.data(&header)?)?),
            FourCC::Stsd => Atom::SampleTable(Stsd::decode(&self.data(&header)?)?),
            name if name.is_container() => Atom::Container(header),
            name => return Err(QtError::InvalidProgram(format!("no decoder for '{name}'"))),
        };

        self.cursor = next;

        Ok(atom)
    }

    /// Reads data load for atom.
    fn data(&mut self, header: &AtomHeader) -> Result<Vec<u8>, QtError> {
        let len = header.data_size();
        self.reader.seek(SeekFrom::Start(header.data_offset()))?;

        let mut buf = Vec::new();
        let read_len = self.reader.by_ref().take(len).read_to_end(&mut buf)? as u64;

        if read_len != len {
            return Err(QtError::Truncated {
                offset: header.data_offset(),
                needed: len,
                available: read_len
            })
        }

        Ok(buf)
    }
}
