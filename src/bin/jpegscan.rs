//! jpegscan CLI - lists the marker segments and Huffman tables of a JPEG file.

use clap::{Args, Parser, Subcommand};
use jpegscan_rs::{
    scan_with_options, ScanDataPolicy, ScanOptions, ScanSummary, UnknownMarkerPolicy,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Marker-segment inspector for JPEG interchange-format files
#[derive(Parser)]
#[command(name = "jpegscan")]
#[command(version)]
#[command(about = "List the marker segments and Huffman tables of a JPEG file", long_about = None)]
#[command(after_help = "EXAMPLES:
    jpegscan markers -i image.jpg
    jpegscan markers -i progressive.jpg --skip-scan-data
    jpegscan tables -i image.jpg --permissive

Set RUST_LOG=debug to trace every segment the scanner visits.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one line per marker segment: offset, marker and payload length
    #[command(visible_alias = "m")]
    Markers(ScanArgs),

    /// Print every Huffman table defined before scanning stopped
    ///
    /// Each table is listed as `code | symbol` pairs in hex, ordered by
    /// code length and then by code.
    #[command(visible_alias = "t")]
    Tables(ScanArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Input JPEG file
    #[arg(short, long, help = "Path to the JPEG file to scan")]
    input: PathBuf,

    /// Skip unknown markers and fill bytes instead of failing
    #[arg(long)]
    permissive: bool,

    /// Step over entropy-coded data and keep scanning until EOI
    #[arg(long)]
    skip_scan_data: bool,
}

impl ScanArgs {
    fn options(&self) -> ScanOptions {
        let mut options = ScanOptions::new();
        if self.permissive {
            options = options.with_unknown_markers(UnknownMarkerPolicy::Skip);
        }
        if self.skip_scan_data {
            options = options.with_scan_data(ScanDataPolicy::Skip);
        }
        options
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Markers(args) => list_markers(&args),
        Commands::Tables(args) => list_tables(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn scan_file(
    input: &Path,
    options: ScanOptions,
) -> Result<ScanSummary, Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    Ok(scan_with_options(&data, options)?)
}

fn list_markers(args: &ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let summary = scan_file(&args.input, args.options())?;

    for event in &summary.events {
        println!("{}", event);
    }
    if summary.handed_off {
        println!(
            "{:#010x} scan data ({} segments read)",
            summary.end_position,
            summary.events.len()
        );
    }
    Ok(())
}

fn list_tables(args: &ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let summary = scan_file(&args.input, args.options())?;

    if summary.huffman_tables.is_empty() {
        println!("No Huffman tables defined");
        return Ok(());
    }

    for table in summary.huffman_tables.iter() {
        println!(
            "Huffman table: {} {} ({} codes)",
            table.class(),
            table.destination(),
            table.len()
        );
        for code in table {
            println!("{:04x} | {:02x}", code.code, code.symbol);
        }
    }
    Ok(())
}
