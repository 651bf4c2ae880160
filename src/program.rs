//! Command program, describing a single, fixed path through the atom tree.
//!
//! A program is a list of commands, executed in order:
//! - `Op::StepIn`: find target container at current level and descend into it.
//! - `Op::Read`: find target atom at current level and decode it,
//! then continue with its siblings.
//!
//! Each command carries the depth it is expected to run at,
//! i.e. the number of `StepIn` commands preceding it.
//! Programs are validated against this on construction.
//!
//! ```rs
//! use qtvidmeta::{CommandProgram, FourCC};
//!
//! let program = CommandProgram::builder()
//!     .step_in(FourCC::Moov)
//!     .read(FourCC::Mvhd)
//!     .build()?;
//! ```

use crate::{FourCC, QtError};

/// Command operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Descend into target container.
    StepIn,
    /// Decode target atom.
    Read,
}

/// Single program step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub(crate) op: Op,
    pub(crate) target: FourCC,
    /// Nesting depth, 0 = top level of the file.
    pub(crate) depth: usize,
}

impl Command {
    pub fn new(op: Op, target: FourCC, depth: usize) -> Self {
        Self { op, target, depth }
    }

    pub fn step_in(target: FourCC, depth: usize) -> Self {
        Self::new(Op::StepIn, target, depth)
    }

    pub fn read(target: FourCC, depth: usize) -> Self {
        Self::new(Op::Read, target, depth)
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn target(&self) -> FourCC {
        self.target
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Validated, ordered list of commands.
/// Stateless, so a single program can be reused
/// for any number of files, across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandProgram {
    commands: Vec<Command>
}

impl CommandProgram {
    /// Create new program, raising `QtError::InvalidProgram` if:
    /// - `commands` is empty,
    /// - a command's depth does not equal the number of preceding `StepIn`,
    /// - a `StepIn` targets an atom that is not a known container,
    /// - a `Read` targets an atom that is neither a known container nor decodable.
    pub fn new(commands: Vec<Command>) -> Result<Self, QtError> {
        if commands.is_empty() {
            return Err(QtError::InvalidProgram("no commands".to_owned()))
        }

        let mut depth = 0;
        for (i, cmd) in commands.iter().enumerate() {
            if cmd.depth != depth {
                return Err(QtError::InvalidProgram(format!(
                    "command {i} ({:?} '{}') declares depth {}, expected {depth}",
                    cmd.op, cmd.target, cmd.depth
                )))
            }
            match cmd.op {
                Op::StepIn => {
                    if !cmd.target.is_container() {
                        return Err(QtError::InvalidProgram(format!(
                            "command {i} steps into '{}', which is not a container",
                            cmd.target
                        )))
                    }
                    depth += 1;
                },
                Op::Read => {
                    if !cmd.target.is_container() && !cmd.target.is_decodable() {
                        return Err(QtError::InvalidProgram(format!(
                            "command {i} reads '{}', which has no decoder",
                            cmd.target
                        )))
                    }
                }
            }
        }

        Ok(Self { commands })
    }

    /// For programs known to be valid.
    pub(crate) fn new_unchecked(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// Builder that assigns depth automatically.
    pub fn builder() -> ProgramBuilder {
        ProgramBuilder::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of `Read` commands, i.e. number of atoms
    /// a successful traversal returns.
    pub fn reads(&self) -> usize {
        self.commands.iter()
            .filter(|c| c.op == Op::Read)
            .count()
    }
}

impl<'a> IntoIterator for &'a CommandProgram {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds a `CommandProgram`, tracking depth
/// for each added command.
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    commands: Vec<Command>,
    depth: usize,
}

impl ProgramBuilder {
    pub fn step_in(mut self, target: FourCC) -> Self {
        self.commands.push(Command::step_in(target, self.depth));
        self.depth += 1;
        self
    }

    pub fn read(mut self, target: FourCC) -> Self {
        self.commands.push(Command::read(target, self.depth));
        self
    }

    pub fn build(self) -> Result<CommandProgram, QtError> {
        CommandProgram::new(self.commands)
    }
}
