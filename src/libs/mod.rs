pub mod annot;
pub mod indel;
pub mod io;
pub mod ploidy;
