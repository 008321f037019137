use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Parser};
use log::LevelFilter;

use keystrings_decrypter::util::{open_input, open_output, BLOCK_SIZE};
use keystrings_decrypter::{decrypt_stream, KeySource, PipelineConfig, RsaPrivateKey};

/// Decrypt a keystrings file encrypted with raw 512-bit RSA
#[derive(Parser, Debug)]
#[command(name = "keystrings-decrypter", version)]
#[command(group(ArgGroup::new("modulus").required(true).args(["rsa_mod", "rsa_mod_file"])))]
#[command(group(
    ArgGroup::new("private_exponent")
        .required(true)
        .args(["rsa_priv_exp", "rsa_priv_exp_file"])
))]
struct Args {
    /// RSA modulus
    #[arg(long, value_name = "INT")]
    rsa_mod: Option<String>,

    /// RSA modulus file (raw big-endian bytes)
    #[arg(long, value_name = "PATH")]
    rsa_mod_file: Option<PathBuf>,

    /// RSA private exponent
    #[arg(long, value_name = "INT")]
    rsa_priv_exp: Option<String>,

    /// RSA private exponent file (raw big-endian bytes)
    #[arg(long, value_name = "PATH")]
    rsa_priv_exp_file: Option<PathBuf>,

    /// Encrypted keystrings file (default: stdin)
    #[arg(short, long, value_name = "PATH")]
    input_file: Option<PathBuf>,

    /// Decrypted keystrings file (default: stdout)
    #[arg(short, long, value_name = "PATH")]
    output_file: Option<PathBuf>,

    /// Ciphertext block size in bytes
    #[arg(long, default_value_t = BLOCK_SIZE)]
    block_size: usize,

    /// Worker threads for block decryption
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let modulus = KeySource::from_options(
        "rsa-mod",
        args.rsa_mod.as_deref(),
        args.rsa_mod_file.as_deref(),
    )?;
    let private_exponent = KeySource::from_options(
        "rsa-priv-exp",
        args.rsa_priv_exp.as_deref(),
        args.rsa_priv_exp_file.as_deref(),
    )?;
    let key = RsaPrivateKey::from_sources(&modulus, &private_exponent)
        .context("failed to load RSA key")?;

    let config = PipelineConfig::default()
        .with_block_size(args.block_size)
        .with_jobs(args.jobs);
    config.validate()?;

    let mut output = open_output(args.output_file.as_deref())?;
    let input = open_input(args.input_file.as_deref())?;

    decrypt_stream(&key, input, &mut output, &config).context("decryption failed")?;

    Ok(())
}
