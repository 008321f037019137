// RSA Big Integer Operations
// Wrapper around num-bigint for raw RSA block arithmetic

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{DecryptError, Result};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

#[cfg(test)]
pub(crate) fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (big-endian)
/// An empty slice decodes to zero.
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to its minimal big-endian encoding.
///
/// The result has `ceil(bit_length / 8)` bytes and never a leading zero byte,
/// so zero encodes to an empty vector. `BigUint::to_bytes_be` returns `[0]`
/// for zero, which is why it is not used directly.
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    if n.is_zero() {
        return Vec::new();
    }
    n.to_bytes_be()
}

/// Convert big integer to bytes left-padded with zeros to `width`.
/// Returns None if the value does not fit.
pub fn to_bytes_padded(n: &RsaBigInt, width: usize) -> Option<Vec<u8>> {
    let bytes = to_bytes(n);
    if bytes.len() > width {
        return None;
    }
    let mut out = vec![0u8; width];
    out[width - bytes.len()..].copy_from_slice(&bytes);
    Some(out)
}

/// Number of bytes in the minimal encoding of `n`
pub fn byte_length(n: &RsaBigInt) -> usize {
    ((n.bits() + 7) / 8) as usize
}

/// Modular exponentiation: base^exp mod modulus
///
/// Right-to-left binary square-and-multiply, reducing after every
/// multiplication. Runs in time dependent on the exponent bits, so it must not
/// back a network-facing decryption oracle.
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> Result<RsaBigInt> {
    if modulus.is_zero() {
        return Err(DecryptError::ZeroModulus);
    }
    if modulus.is_one() {
        return Ok(RsaBigInt::zero());
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        exp >>= 1;
        if !exp.is_zero() {
            base = (&base * &base) % modulus;
        }
    }

    Ok(result)
}
