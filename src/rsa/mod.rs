// RSA Module - Main module file
// Exports the raw RSA arithmetic and key handling

pub mod bigint;
pub mod decrypt;
pub mod encrypt;
pub mod key;

pub use bigint::{from_bytes, mod_pow, to_bytes, RsaBigInt};
pub use decrypt::decrypt_block;
pub use encrypt::encrypt_block;
pub use key::{parse_literal, KeySource, RsaPrivateKey};
