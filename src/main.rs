#![deny(unsafe_code)]
pub mod commands;
mod version;

use anyhow::Result;
use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use commands::compress::CompressOptions;
use commands::decompress::DecompressOptions;
use commands::list::ListOptions;

/// Custom styles for CLI help output
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Compress or decompress seekable MZGF (.mgz) archives.
///
/// Without options the input file is compressed to `<file>.mgz`. With
/// `--decompress` (or any of the offset/size options, which imply it) an
/// `.mgz` archive is expanded back to the original bytes, optionally
/// starting from a virtual or uncompressed offset.
#[derive(Parser, Debug)]
#[command(name = "mzgzip", version, styles = STYLES)]
struct Args {
    /// Write to standard output, keep original files unchanged
    #[arg(short = 'c')]
    stdout: bool,

    /// Overwrite existing files without asking
    #[arg(short = 'f', long = "force")]
    force: bool,

    /// Decompress
    #[arg(short = 'd', long = "decompress")]
    decompress: bool,

    /// List compressed file contents
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Decompress starting at virtual file offset N
    #[arg(short = 'v', long = "voffset", value_name = "INT")]
    voffset: Option<u64>,

    /// Decompress starting N bytes into the uncompressed stream
    #[arg(short = 'u', long = "uoffset", value_name = "INT")]
    uoffset: Option<u64>,

    /// Decompress up to N bytes
    #[arg(short = 's', long = "size", value_name = "INT")]
    size: Option<u64>,

    /// File to operate on
    file: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("Running mzgzip version {}", version::VERSION.as_str());

    if let Err(e) = run(&args) {
        eprintln!("mzgzip: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    if args.list {
        commands::list::run(&ListOptions { file: args.file.clone() })
    } else if args.decompress
        || args.voffset.is_some()
        || args.uoffset.is_some()
        || args.size.is_some()
    {
        commands::decompress::run(&DecompressOptions {
            file: args.file.clone(),
            to_stdout: args.stdout,
            force: args.force,
            voffset: args.voffset,
            uoffset: args.uoffset,
            size: args.size,
        })
    } else {
        commands::compress::run(&CompressOptions {
            file: args.file.clone(),
            to_stdout: args.stdout,
            force: args.force,
        })
    }
}
