//! tests/decrypt_tests.rs
//! End-to-end decryption through the public API with a real 511-bit key
//!
//! n = (2^255 - 19) * (2^256 - 189), e = 65537

use std::fs;
use std::io::{Cursor, Read};
use std::path::PathBuf;

use hex::decode;
use keystrings_decrypter::rsa::{encrypt_block, from_bytes, to_bytes, RsaBigInt};
use keystrings_decrypter::util::{open_input, open_output, BLOCK_SIZE};
use keystrings_decrypter::{decrypt_stream, DecryptError, KeySource, PipelineConfig, RsaPrivateKey};
use num_bigint::RandBigInt;
use rand::{thread_rng, Rng};

const MODULUS_HEX: &str = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff8e8000000000000000000000000000000000000000000000000000000000000e07";
const PRIV_EXP_HEX: &str = "67bd984267bd984267bd984267bd984267bd984267bd984267bd984267bd97e53366cc993366cc993366cc993366cc993366cc993366cc993366cc993366d8a1";
const HELLO_CIPHERTEXT_HEX: &str = "492049dbef679702e3f0b7a92e3945b7a23e8764198efe42c34e5557d4ab4d7990645ffb5c0e9620f2846aa0e676eb8d6b4e3939cf15d1d84d51cf7bf31e79ad";

fn modulus() -> RsaBigInt {
    from_bytes(&decode(MODULUS_HEX).unwrap())
}

fn public_exponent() -> RsaBigInt {
    RsaBigInt::from(65537u32)
}

fn private_key() -> RsaPrivateKey {
    RsaPrivateKey::new(modulus(), from_bytes(&decode(PRIV_EXP_HEX).unwrap())).unwrap()
}

fn decrypt_all(input: &[u8], config: &PipelineConfig) -> Vec<u8> {
    let mut out = Vec::new();
    decrypt_stream(&private_key(), Cursor::new(input), &mut out, config).unwrap();
    out
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("keystrings-it-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn decrypts_known_vector() {
    let ciphertext = decode(HELLO_CIPHERTEXT_HEX).unwrap();
    assert_eq!(ciphertext.len(), BLOCK_SIZE);
    let plain = decrypt_all(&ciphertext, &PipelineConfig::default());
    assert_eq!(plain, b"hello keystrings");
}

#[test]
fn random_messages_round_trip() {
    let mut rng = thread_rng();
    let n = modulus();
    let e = public_exponent();

    let mut ciphertext = Vec::new();
    let mut expected = Vec::new();
    for _ in 0..32 {
        let m = rng.gen_biguint_below(&n);
        ciphertext.extend(encrypt_block(&to_bytes(&m), &e, &n, BLOCK_SIZE).unwrap());
        expected.extend(to_bytes(&m));
    }

    assert_eq!(decrypt_all(&ciphertext, &PipelineConfig::default()), expected);
    assert_eq!(
        decrypt_all(&ciphertext, &PipelineConfig::default().with_jobs(4)),
        expected
    );
}

#[test]
fn short_messages_lose_block_alignment() {
    let mut rng = thread_rng();
    let n = modulus();
    let e = public_exponent();

    let messages: Vec<Vec<u8>> = (0..5)
        .map(|_| {
            let len = rng.gen_range(1..=16);
            let mut msg: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            msg[0] |= 1;
            msg
        })
        .collect();

    let mut ciphertext = Vec::new();
    for msg in &messages {
        ciphertext.extend(encrypt_block(msg, &e, &n, BLOCK_SIZE).unwrap());
    }

    assert_eq!(
        decrypt_all(&ciphertext, &PipelineConfig::default()),
        messages.concat()
    );
}

#[test]
fn decrypts_between_files_with_key_files() {
    let dir = temp_dir("files");
    let mod_path = dir.join("modulus.bin");
    let exp_path = dir.join("priv_exp.bin");
    let in_path = dir.join("keystrings.enc");
    let out_path = dir.join("keystrings.txt");

    fs::write(&mod_path, decode(MODULUS_HEX).unwrap()).unwrap();
    fs::write(&exp_path, decode(PRIV_EXP_HEX).unwrap()).unwrap();
    let block = decode(HELLO_CIPHERTEXT_HEX).unwrap();
    fs::write(&in_path, [block.clone(), block].concat()).unwrap();

    let key = RsaPrivateKey::from_sources(
        &KeySource::File(mod_path),
        &KeySource::File(exp_path),
    )
    .unwrap();
    assert_eq!(key, private_key());

    let stats = {
        let mut output = open_output(Some(out_path.as_path())).unwrap();
        let input = open_input(Some(in_path.as_path())).unwrap();
        decrypt_stream(&key, input, &mut output, &PipelineConfig::default()).unwrap()
    };
    assert_eq!(stats.blocks, 2);
    assert_eq!(stats.bytes_in, 128);

    let mut plain = Vec::new();
    fs::File::open(&out_path)
        .unwrap()
        .read_to_end(&mut plain)
        .unwrap();
    fs::remove_dir_all(&dir).unwrap();
    assert_eq!(plain, b"hello keystringshello keystrings");
}

#[test]
fn output_file_is_truncated() {
    let dir = temp_dir("truncate");
    let out_path = dir.join("out.bin");
    fs::write(&out_path, vec![0xffu8; 1000]).unwrap();

    {
        let mut output = open_output(Some(out_path.as_path())).unwrap();
        decrypt_stream(
            &private_key(),
            Cursor::new(Vec::new()),
            &mut output,
            &PipelineConfig::default(),
        )
        .unwrap();
    }

    let len = fs::metadata(&out_path).unwrap().len();
    fs::remove_dir_all(&dir).unwrap();
    assert_eq!(len, 0);
}

#[test]
fn literal_key_sources() {
    let modulus = KeySource::from_options("rsa-mod", Some("3233"), None).unwrap();
    let exponent = KeySource::from_options("rsa-priv-exp", Some("2753"), None).unwrap();
    let key = RsaPrivateKey::from_sources(&modulus, &exponent).unwrap();

    let mut block = vec![0u8; BLOCK_SIZE];
    block[62] = 0x0a;
    block[63] = 0xe6;
    let mut out = Vec::new();
    decrypt_stream(&key, Cursor::new(block), &mut out, &PipelineConfig::default()).unwrap();
    assert_eq!(out, vec![0x41]);
}

#[test]
fn missing_input_file_is_an_error() {
    let dir = temp_dir("missing");
    let result = open_input(Some(dir.join("nope.enc").as_path()));
    fs::remove_dir_all(&dir).unwrap();
    assert!(matches!(result, Err(DecryptError::Open { .. })));
}
