// RSA Key Material
// Loads the modulus and private exponent from literals or raw key files

use std::fmt;
use std::path::{Path, PathBuf};

use num_traits::{Num, Zero};

use super::bigint::RsaBigInt;
use crate::error::{DecryptError, Result};
use crate::util::file_ops::read_key_file;

/// Where one key parameter comes from
#[derive(Debug, Clone, PartialEq)]
pub enum KeySource {
    /// A literal non-negative integer given directly
    Literal(RsaBigInt),
    /// A file holding the raw big-endian bytes of the integer
    File(PathBuf),
}

impl KeySource {
    /// Pick the source for `name` from a literal/file option pair.
    /// Exactly one of the two must be present.
    pub fn from_options(
        name: &str,
        literal: Option<&str>,
        file: Option<&Path>,
    ) -> Result<Self> {
        match (literal, file) {
            (Some(text), None) => Ok(KeySource::Literal(parse_literal(text)?)),
            (None, Some(path)) => Ok(KeySource::File(path.to_path_buf())),
            (None, None) => Err(DecryptError::Configuration(format!(
                "one of --{name} or --{name}-file is required"
            ))),
            (Some(_), Some(_)) => Err(DecryptError::Configuration(format!(
                "--{name} and --{name}-file are mutually exclusive"
            ))),
        }
    }

    /// Resolve the source to an integer, reading the file if needed
    pub fn load(&self) -> Result<RsaBigInt> {
        match self {
            KeySource::Literal(n) => Ok(n.clone()),
            KeySource::File(path) => read_key_file(path),
        }
    }
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Literal(_) => write!(f, "literal"),
            KeySource::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

/// Parse a decimal integer literal such as `3233`
pub fn parse_literal(text: &str) -> Result<RsaBigInt> {
    RsaBigInt::from_str_radix(text.trim(), 10)
        .map_err(|_| DecryptError::InvalidLiteral(text.to_string()))
}

/// RSA Private Key
///
/// Only the modulus and private exponent are kept. Nothing checks that they
/// form a consistent key pair; a wrong pair just decrypts to garbage.
#[derive(Debug, Clone, PartialEq)]
pub struct RsaPrivateKey {
    pub n: RsaBigInt, // Modulus
    pub d: RsaBigInt, // Private exponent
}

impl RsaPrivateKey {
    pub fn new(n: RsaBigInt, d: RsaBigInt) -> Result<Self> {
        if n.is_zero() {
            return Err(DecryptError::ZeroModulus);
        }
        Ok(Self { n, d })
    }

    /// Load both parameters and build the key
    pub fn from_sources(modulus: &KeySource, private_exponent: &KeySource) -> Result<Self> {
        let n = modulus.load()?;
        let d = private_exponent.load()?;
        let key = Self::new(n, d)?;
        log::info!(
            "loaded {}-bit modulus ({}) and {}-bit private exponent ({})",
            key.bit_length(),
            modulus,
            key.d.bits(),
            private_exponent
        );
        Ok(key)
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Decrypt one ciphertext block using this private key
    pub fn decrypt(&self, block: &[u8]) -> Result<Vec<u8>> {
        super::decrypt::decrypt_block(block, self)
    }
}
