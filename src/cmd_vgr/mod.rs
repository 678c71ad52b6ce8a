//! Subcommand modules for the `vgr` binary.

pub mod annot;
pub mod offset;
