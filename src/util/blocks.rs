// Block reader
// Splits a ciphertext stream into fixed-size blocks, the last one possibly short

use std::io::{self, ErrorKind, Read};

/// Default ciphertext block size in bytes (512-bit RSA)
pub const BLOCK_SIZE: usize = 64;

/// Yields successive `block_size` chunks of a reader.
///
/// Each chunk is filled with as many reads as it takes, so a pipe that hands
/// out a few bytes at a time still produces full blocks. Only the final chunk
/// may be shorter, and no chunk is ever empty. The iterator stops for good
/// after end of stream or the first error.
pub struct BlockReader<R> {
    inner: R,
    block_size: usize,
    done: bool,
}

impl<R: Read> BlockReader<R> {
    pub fn new(inner: R, block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be non-zero");
        Self {
            inner,
            block_size,
            done: false,
        }
    }

    fn fill_block(&mut self) -> io::Result<Vec<u8>> {
        let mut block = vec![0u8; self.block_size];
        let mut filled = 0;

        while filled < self.block_size {
            match self.inner.read(&mut block[filled..]) {
                Ok(0) => {
                    self.done = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        block.truncate(filled);
        Ok(block)
    }
}

impl<R: Read> Iterator for BlockReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.fill_block() {
            Ok(block) if block.is_empty() => None,
            Ok(block) => Some(Ok(block)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
