// RSA Decryption Implementation
// Raw RSA: m = c^d mod n, no padding is removed or checked

use super::bigint::{from_bytes, mod_pow, to_bytes};
use super::key::RsaPrivateKey;
use crate::error::Result;

/// Decrypt one ciphertext block using the RSA private key
///
/// The block is read as a big-endian integer of any length up to the block
/// size. The plaintext is returned in minimal big-endian form, so leading zero
/// bytes of the original message are not reproduced and a plaintext of zero
/// yields no bytes at all.
pub fn decrypt_block(block: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let c = from_bytes(block);
    let m = mod_pow(&c, &private_key.d, &private_key.n)?;
    Ok(to_bytes(&m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::{from_u64, to_bytes_padded};

    fn textbook_key() -> RsaPrivateKey {
        // n = 61 * 53, e = 17, d = 2753
        RsaPrivateKey::new(from_u64(3233), from_u64(2753)).unwrap()
    }

    #[test]
    fn test_decrypt_padded_block() {
        let block = to_bytes_padded(&from_u64(2790), 64).unwrap();
        let decrypted = decrypt_block(&block, &textbook_key()).unwrap();
        assert_eq!(decrypted, vec![0x41]);
    }

    #[test]
    fn test_decrypt_short_block() {
        // Same integer, no left padding
        let decrypted = decrypt_block(&[0x0a, 0xe6], &textbook_key()).unwrap();
        assert_eq!(decrypted, b"A".to_vec());
    }

    #[test]
    fn test_decrypt_zero_block() {
        let decrypted = decrypt_block(&[0u8; 64], &textbook_key()).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_decrypt_wrong_key() {
        let wrong = RsaPrivateKey::new(from_u64(3233), from_u64(17)).unwrap();
        let decrypted = decrypt_block(&[0x0a, 0xe6], &wrong).unwrap();
        assert_ne!(decrypted, vec![0x41]);
    }
}
