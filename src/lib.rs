//! Raw RSA block decrypter.
//!
//! Ciphertext is a stream of 64-byte big-endian integers (the last one may be
//! short). Each block is decrypted with textbook RSA, `m = c^d mod n`, and the
//! plaintext integers are written back out in minimal big-endian form, one
//! after the other, with no framing.

pub mod error;
pub mod pipeline;
pub mod rsa;
pub mod util;

pub use error::{DecryptError, Result};
pub use pipeline::{decrypt_stream, PipelineConfig, Stats};
pub use rsa::{KeySource, RsaPrivateKey};
