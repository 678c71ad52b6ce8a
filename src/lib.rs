pub mod libs;

pub use crate::libs::io::{log_writer, reader, writer};
