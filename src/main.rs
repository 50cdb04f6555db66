use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use rforemost::record::DEFAULT_CHUNK_SIZE;
use rforemost::sizefmt::{human_bytes, parse_size};
use rforemost::{CarveOptions, index, run};

/// A modern, high-performance signature-based forensic file carver,
/// inspired by foremost.
#[derive(Parser)]
#[command(
    author = "vkkkv",
    version,
    about = "Signature-based forensic file carver (JPEG/PDF/ZIP)."
)]
struct Args {
    /// Input disk image, block device, or file to scan
    #[arg(short, long)]
    input: PathBuf,

    /// Directory where carved files and indexes will be saved
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Comma-separated formats to carve: jpeg,pdf,zip
    #[arg(long, default_value = "jpeg,pdf,zip")]
    formats: String,

    /// Max carve size per file (e.g. 256MB)
    #[arg(long, default_value = "512MB", value_parser = parse_size)]
    max_size: u64,

    /// Recursion depth to scan carved files for embedded files (0 disables)
    #[arg(long, default_value_t = 0)]
    embedded_depth: u32,

    /// Enable conservative fragmented-recovery heuristics
    #[arg(long)]
    fragmented: bool,

    /// Logical chunk size for fragmented heuristics (bytes)
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: u64,

    /// Max search span for JPEG EOI from its header
    #[arg(long, default_value = "128MB", value_parser = parse_size)]
    jpeg_scan_window: u64,

    /// Max search span for PDF EOF from its header
    #[arg(long, default_value = "256MB", value_parser = parse_size)]
    pdf_scan_window: u64,

    /// Max search span for ZIP EOCD from its first LFH
    #[arg(long, default_value = "256MB", value_parser = parse_size)]
    zip_scan_window: u64,

    /// Number of rayon worker threads (reserved; the core scan is
    /// single-threaded per spec.md §5, this only affects future
    /// parallel-across-plugins extensions)
    #[arg(short, long)]
    threads: Option<usize>,
}

impl Args {
    fn formats(&self) -> Vec<String> {
        self.formats
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn scan_windows(&self) -> HashMap<String, u64> {
        let mut windows = HashMap::new();
        windows.insert("jpeg".to_string(), self.jpeg_scan_window);
        windows.insert("pdf".to_string(), self.pdf_scan_window);
        windows.insert("zip".to_string(), self.zip_scan_window);
        windows
    }
}

const KNOWN_FORMATS: [&str; 3] = ["jpeg", "pdf", "zip"];

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(t) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(t)
            .build_global()
            .context("failed to initialize thread pool")?;
    }

    let formats = args.formats();
    for f in &formats {
        if !KNOWN_FORMATS.contains(&f.as_str()) {
            anyhow::bail!("unknown format: {f}");
        }
    }

    let options = CarveOptions {
        formats,
        max_size: args.max_size,
        embedded_depth: args.embedded_depth,
        fragmented: args.fragmented,
        chunk_size: args.chunk_size,
        scan_windows: args.scan_windows(),
    };

    log::info!(
        "rforemost v{} - scanning {:?} (max_size={})",
        env!("CARGO_PKG_VERSION"),
        args.input,
        human_bytes(options.max_size)
    );

    let start = Instant::now();
    let records = run(&args.input, &args.output, &options)?;
    index::write_json(&args.output, &records)?;
    index::write_csv(&args.output, &records)?;

    log::info!(
        "done in {:.2}s, carved {} file(s) into {:?}",
        start.elapsed().as_secs_f64(),
        records.len(),
        args.output
    );

    Ok(())
}
