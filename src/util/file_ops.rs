// File Operations for RSA Decryption
// Opens named files or falls back to the process streams, and reads key files

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, StdinLock, StdoutLock, Write};
use std::path::Path;

use crate::error::{DecryptError, Result};
use crate::rsa::bigint::{from_bytes, RsaBigInt};

/// Ciphertext source: a named file or standard input
///
/// Dropping the file variant closes the file. Standard input is only
/// unlocked, never closed.
pub enum Input {
    File(BufReader<File>),
    Stdin(StdinLock<'static>),
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::File(f) => f.read(buf),
            Input::Stdin(s) => s.read(buf),
        }
    }
}

/// Plaintext destination: a named file or standard output
///
/// Both variants are buffered; the buffer is flushed when dropped. Standard
/// output is never closed.
pub enum Output {
    File(BufWriter<File>),
    Stdout(BufWriter<StdoutLock<'static>>),
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::File(f) => f.write(buf),
            Output::Stdout(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::File(f) => f.flush(),
            Output::Stdout(s) => s.flush(),
        }
    }
}

/// Open `path` for reading, or use standard input if no path is given
pub fn open_input(path: Option<&Path>) -> Result<Input> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|source| DecryptError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            log::debug!("reading ciphertext from {}", path.display());
            Ok(Input::File(BufReader::new(file)))
        }
        None => {
            log::debug!("reading ciphertext from stdin");
            Ok(Input::Stdin(io::stdin().lock()))
        }
    }
}

/// Create (or truncate) `path` for writing, or use standard output
pub fn open_output(path: Option<&Path>) -> Result<Output> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| DecryptError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            log::debug!("writing plaintext to {}", path.display());
            Ok(Output::File(BufWriter::new(file)))
        }
        None => {
            log::debug!("writing plaintext to stdout");
            Ok(Output::Stdout(BufWriter::new(io::stdout().lock())))
        }
    }
}

/// Read a whole file as one big-endian unsigned integer
pub fn read_key_file(path: &Path) -> Result<RsaBigInt> {
    let data = fs::read(path).map_err(|source| DecryptError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(from_bytes(&data))
}
