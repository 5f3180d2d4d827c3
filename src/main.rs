use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sparse_crc32::{
    compute_sparse_crc32_with, reference, ChecksumConfig, SparseByte, SparseFile,
    DEFAULT_PARALLEL_THRESHOLD,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sparse-crc32", about = "CRC-32 of mostly-zero buffers from their non-zero bytes")]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the IEEE CRC-32 of the described buffer.
    Checksum {
        #[command(flatten)]
        buffer: BufferArgs,
        /// Also checksum the materialized buffer and fail on mismatch.
        #[arg(long)]
        verify: bool,
        /// Distinct entries before contributions are computed in parallel.
        #[arg(long, default_value_t = DEFAULT_PARALLEL_THRESHOLD)]
        parallel_threshold: usize,
    },
    /// Print the described buffer as hex.
    Materialize {
        #[command(flatten)]
        buffer: BufferArgs,
    },
}

#[derive(clap::Args, Debug)]
struct BufferArgs {
    /// Logical buffer length in bytes.
    #[arg(long)]
    size: u64,
    /// Non-zero byte as `POSITION:VALUE` (decimal or 0x-prefixed hex). Repeatable.
    #[arg(long = "byte", value_parser = parse_sparse_byte)]
    bytes: Vec<SparseByte>,
}

impl BufferArgs {
    fn into_file(self) -> SparseFile {
        SparseFile::from_entries(self.bytes, self.size)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Checksum {
            buffer,
            verify,
            parallel_threshold,
        } => run_checksum(buffer.into_file(), verify, parallel_threshold)?,
        Commands::Materialize { buffer } => run_materialize(buffer.into_file())?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_checksum(file: SparseFile, verify: bool, parallel_threshold: usize) -> Result<()> {
    let config = ChecksumConfig::default().with_parallel_threshold(parallel_threshold);
    let crc = compute_sparse_crc32_with(&file, &config)
        .with_context(|| format!("failed to checksum sparse buffer of {} bytes", file.size))?;

    if verify {
        let dense = file
            .materialize()
            .context("failed to materialize buffer for verification")?;
        let expected = reference::crc32_ieee(&dense);
        if expected != crc {
            bail!("sparse CRC-32 {crc:#010x} disagrees with byte-serial {expected:#010x}");
        }
    }

    println!("{crc:#010x}");
    Ok(())
}

fn run_materialize(file: SparseFile) -> Result<()> {
    let dense = file.materialize().context("failed to materialize buffer")?;
    let hex: String = dense.iter().map(|byte| format!("{byte:02x}")).collect();
    println!("{hex}");
    Ok(())
}

fn parse_sparse_byte(raw: &str) -> Result<SparseByte, String> {
    let (position, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected POSITION:VALUE, got `{raw}`"))?;
    let position = parse_number(position).map_err(|e| format!("bad position `{position}`: {e}"))?;
    let value = parse_number(value).map_err(|e| format!("bad value `{value}`: {e}"))?;
    let value = u8::try_from(value).map_err(|_| format!("value {value} does not fit in a byte"))?;
    Ok(SparseByte::new(position, value))
}

fn parse_number(raw: &str) -> Result<u64, std::num::ParseIntError> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => raw.parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sparse_byte() {
        assert_eq!(parse_sparse_byte("4:55"), Ok(SparseByte::new(4, 55)));
        assert_eq!(parse_sparse_byte("0x10:0xff"), Ok(SparseByte::new(16, 255)));
        assert!(parse_sparse_byte("4").is_err());
        assert!(parse_sparse_byte("4:256").is_err());
        assert!(parse_sparse_byte("x:1").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "sparse-crc32",
            "checksum",
            "--size",
            "8",
            "--byte",
            "0:1",
            "--byte",
            "4:55",
            "--verify",
        ])
        .unwrap();
        match cli.command {
            Commands::Checksum { buffer, verify, .. } => {
                assert!(verify);
                assert_eq!(buffer.size, 8);
                assert_eq!(buffer.bytes.len(), 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
