//! Atom headers and decoded atoms.

mod atom;
mod atom_header;

pub use atom::Atom;
pub use atom_header::AtomHeader;
