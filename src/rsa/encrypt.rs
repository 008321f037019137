// RSA Encryption
// Raw RSA counterpart of decrypt_block, used to build ciphertext fixtures

use super::bigint::{from_bytes, mod_pow, to_bytes_padded, RsaBigInt};
use crate::error::{DecryptError, Result};

/// Encrypt `plaintext` as a single integer: c = m^e mod n
/// The ciphertext is left-padded with zeros to `width` bytes.
pub fn encrypt_block(
    plaintext: &[u8],
    e: &RsaBigInt,
    n: &RsaBigInt,
    width: usize,
) -> Result<Vec<u8>> {
    let m = from_bytes(plaintext);
    let c = mod_pow(&m, e, n)?;
    to_bytes_padded(&c, width).ok_or_else(|| {
        DecryptError::Configuration(format!(
            "ciphertext needs {} bytes, block is {} bytes",
            super::bigint::byte_length(&c),
            width
        ))
    })
}
