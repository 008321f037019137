// Decryption pipeline
// read block -> decode -> decrypt -> encode -> write, in input order

use std::fmt;
use std::io::{Read, Write};

use rayon::prelude::*;

use crate::error::{DecryptError, Result};
use crate::rsa::decrypt::decrypt_block;
use crate::rsa::key::RsaPrivateKey;
use crate::util::blocks::{BlockReader, BLOCK_SIZE};

/// Blocks read per worker thread before a parallel batch is decrypted
const BATCH_FACTOR: usize = 64;

/// Configuration for stream decryption
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub block_size: usize,
    pub jobs: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            jobs: 1,
        }
    }
}

impl PipelineConfig {
    pub fn with_block_size(mut self, size: usize) -> Self {
        self.block_size = size;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(DecryptError::Configuration(
                "block size must be at least 1 byte".to_string(),
            ));
        }
        if self.jobs == 0 {
            return Err(DecryptError::Configuration(
                "jobs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Counters for a finished run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub blocks: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl Stats {
    fn record(&mut self, block_len: usize, plain_len: usize) {
        self.blocks += 1;
        self.bytes_in += block_len as u64;
        self.bytes_out += plain_len as u64;
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} blocks: {} in, {} out",
            self.blocks,
            ByteSize(self.bytes_in),
            ByteSize(self.bytes_out)
        )
    }
}

/// Byte count in binary units, for log lines
struct ByteSize(u64);

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

        let mut value = self.0 as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }

        if unit == 0 {
            write!(f, "{} B", self.0)
        } else {
            write!(f, "{:.2} {}", value, UNITS[unit])
        }
    }
}

/// Decrypt every block of `input` and append the plaintext to `output`.
///
/// Output is the plain concatenation of each block's minimal-length
/// plaintext, with no separators. The first failure aborts the run; bytes
/// already written stay written. `output` is flushed once on success.
pub fn decrypt_stream<R: Read, W: Write>(
    key: &RsaPrivateKey,
    input: R,
    output: &mut W,
    config: &PipelineConfig,
) -> Result<Stats> {
    config.validate()?;
    let blocks = BlockReader::new(input, config.block_size);

    let stats = if config.jobs > 1 {
        decrypt_parallel(key, blocks, output, config.jobs)?
    } else {
        decrypt_sequential(key, blocks, output)?
    };

    output.flush()?;
    log::info!("decrypted {stats}");
    Ok(stats)
}

fn decrypt_sequential<R: Read, W: Write>(
    key: &RsaPrivateKey,
    blocks: BlockReader<R>,
    output: &mut W,
) -> Result<Stats> {
    let mut stats = Stats::default();

    for block in blocks {
        let block = block?;
        log::trace!("block {}: {}", stats.blocks, hex::encode(&block));
        let plain = decrypt_block(&block, key)?;
        output.write_all(&plain)?;
        log::debug!(
            "block {}: {} bytes -> {} bytes",
            stats.blocks,
            block.len(),
            plain.len()
        );
        stats.record(block.len(), plain.len());
    }

    Ok(stats)
}

/// Decrypts batches of blocks on a dedicated pool. Blocks are independent,
/// so each batch is computed in parallel and then written in input order.
fn decrypt_parallel<R: Read, W: Write>(
    key: &RsaPrivateKey,
    mut blocks: BlockReader<R>,
    output: &mut W,
    jobs: usize,
) -> Result<Stats> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| DecryptError::Configuration(format!("cannot start {jobs} workers: {e}")))?;
    log::debug!("decrypting with {jobs} workers");

    let batch_len = jobs * BATCH_FACTOR;
    let mut stats = Stats::default();

    loop {
        // Blocks read before a failed read are still decrypted and written
        let mut batch = Vec::with_capacity(batch_len);
        let mut read_error = None;
        for block in blocks.by_ref().take(batch_len) {
            match block {
                Ok(block) => batch.push(block),
                Err(e) => {
                    read_error = Some(e);
                    break;
                }
            }
        }
        let full = batch.len() == batch_len;

        let plains: Vec<Result<Vec<u8>>> = pool.install(|| {
            batch
                .par_iter()
                .map(|block| decrypt_block(block, key))
                .collect()
        });

        for (block, plain) in batch.iter().zip(plains) {
            let plain = plain?;
            output.write_all(&plain)?;
            stats.record(block.len(), plain.len());
        }
        log::debug!("batch done, {} blocks so far", stats.blocks);

        if let Some(e) = read_error {
            return Err(e.into());
        }
        if !full {
            break;
        }
    }

    Ok(stats)
}
