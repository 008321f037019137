// Utility Module
// Stream plumbing around the RSA core

pub mod blocks;
pub mod file_ops;

pub use blocks::{BlockReader, BLOCK_SIZE};
pub use file_ops::{open_input, open_output, read_key_file, Input, Output};
