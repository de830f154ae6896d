//! File system access for the command-line tool.

pub mod file_io;

pub use file_io::{load_file, output_filename, write_file};
