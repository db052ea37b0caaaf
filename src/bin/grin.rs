//! GRIN Compressor Binary
//!
//! Encodes files into the `.grin` format, decodes them back, and inspects
//! the Huffman tree stored in a `.grin` header.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use grin::{decode_file, encode_file, read_file_header, render_code_table, render_tree, CodeReport};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// GRIN - Huffman file compressor
#[derive(Parser, Debug)]
#[command(name = "grin")]
#[command(author, version, about = "Huffman file compressor for the .grin format", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compress a file
    Encode {
        /// File to compress
        infile: PathBuf,

        /// Destination .grin file
        outfile: PathBuf,
    },

    /// Decompress a .grin file
    Decode {
        /// .grin file to decompress
        infile: PathBuf,

        /// Destination file
        outfile: PathBuf,
    },

    /// Show the Huffman tree and code table stored in a .grin file
    Inspect {
        /// .grin file to inspect
        infile: PathBuf,

        /// Print the code table as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode { infile, outfile } => {
            let stats = encode_file(&infile, &outfile)
                .with_context(|| format!("Failed to encode {}", infile.display()))?;
            println!(
                "Encoded {} -> {}: {} bytes -> {} bytes ({:.1}%)",
                infile.display(),
                outfile.display(),
                stats.input_bytes,
                stats.output_bytes,
                stats.ratio() * 100.0
            );
        }
        Commands::Decode { infile, outfile } => {
            let stats = decode_file(&infile, &outfile)
                .with_context(|| format!("Failed to decode {}", infile.display()))?;
            println!(
                "Decoded {} -> {}: {} bytes -> {} bytes",
                infile.display(),
                outfile.display(),
                stats.input_bytes,
                stats.output_bytes
            );
        }
        Commands::Inspect { infile, json } => {
            let codec = read_file_header(&infile)
                .with_context(|| format!("Failed to read header of {}", infile.display()))?;
            if json {
                let report = CodeReport::new(codec.tree(), codec.codes());
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_tree(codec.tree()));
                print!("{}", render_code_table(codec.codes()));
            }
        }
    }

    Ok(())
}
