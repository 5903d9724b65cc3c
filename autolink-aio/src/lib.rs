// autolink-aio/src/lib.rs
//! Filesystem and JSON IO operations for autolink

pub mod fs;
pub mod json_io;
pub mod properties;

pub use fs::*;
pub use json_io::{read_json_sync, to_json_bytes};
pub use properties::{parse_properties, read_properties};
