// Error types
// Every failure is fatal to the run; nothing is retried.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading keys or decrypting a stream
#[derive(Error, Debug)]
pub enum DecryptError {
    /// Reading the ciphertext stream or writing the plaintext stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A named file (key file, input or output) could not be opened or read.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Neither or both of a mutually exclusive pair of options were given,
    /// or a pipeline setting is out of range.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A literal key value is not a non-negative decimal integer.
    #[error("invalid integer literal: {0:?}")]
    InvalidLiteral(String),

    #[error("RSA modulus must be greater than zero")]
    ZeroModulus,
}

/// Result type for decryption operations
pub type Result<T> = std::result::Result<T, DecryptError>;
