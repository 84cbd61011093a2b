//! Example: Scan a raw packed capture for changes
//!
//! Reads a file of back-to-back sample units and prints one line per change.
//!
//! Usage:
//!   cargo run --release --example scan_raw -- \
//!       --file capture.bin \
//!       --unit-size 2 \
//!       --map 0,1,-1,8 \
//!       -n 100
//!
//! With per-channel edges instead of full records:
//!   cargo run --release --example scan_raw -- \
//!       --file capture.bin --unit-size 1 --map 0,1 --edges

use clap::Parser;
use logicscan::{ChangeIterator, ChannelMap, EdgeIter};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to raw capture file
    #[arg(short, long)]
    file: String,

    /// Bytes per sample unit
    #[arg(long, default_value_t = 1)]
    unit_size: usize,

    /// Physical bit per logical channel, -1 for an unused channel
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    map: Vec<i32>,

    /// Absolute sample number of the first unit
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Maximum number of lines to print
    #[arg(short, default_value_t = 20)]
    n: usize,

    /// Print per-channel edges
    #[arg(long)]
    edges: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("=== Raw Capture Scan ===");
    info!("File: {}", args.file);

    let data = std::fs::read(&args.file)?;
    let map = if args.map.is_empty() {
        ChannelMap::identity(u32::try_from(args.unit_size * 8)?)
    } else {
        ChannelMap::from_raw(&args.map)?
    };
    info!(
        "{} bytes, unit size {}, {} channels",
        data.len(),
        args.unit_size,
        map.num_channels()
    );

    let iter = ChangeIterator::new(&data, args.unit_size, &map, args.start)?;
    let units = iter.unit_count();

    if args.edges {
        for edge in EdgeIter::new(iter).take(args.n) {
            println!("{}", edge);
        }
    } else {
        let mut changes = 0usize;
        for record in iter {
            if changes < args.n {
                println!("{}", record);
            }
            changes += 1;
        }
        info!(
            "{} changes in {} units ({:.2}x reduction)",
            changes,
            units,
            units as f64 / changes.max(1) as f64
        );
    }

    info!("Done!");

    Ok(())
}
