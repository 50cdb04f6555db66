//! Signature-based forensic file carving engine.
//!
//! Given a raw disk image with no filesystem metadata available, locates
//! and extracts self-contained files of known formats (JPEG, PDF, ZIP) by
//! searching for format-specific byte signatures, reconstructing file
//! boundaries, validating the carved bytes, and recursively re-scanning
//! carved artifacts for embedded files.
//!
//! The core engine (`byteview`, `plugin`, `plugins`, `scanner`, `sink`) is
//! format-agnostic and knows nothing about CLI flags, human-readable size
//! strings, or index file formats — those live in `sizefmt`/`index` and in
//! `main.rs`, which consume this crate's public API.

pub mod byteview;
pub mod error;
pub mod index;
pub mod plugin;
pub mod plugins;
pub mod record;
pub mod scanner;
pub mod sink;
pub mod sizefmt;

pub use byteview::ByteView;
pub use error::{CarveError, Result};
pub use plugin::FormatPlugin;
pub use record::{CarveOptions, CarveRecord};
pub use scanner::Scanner;
pub use sink::ByteSink;

use std::path::Path;

/// Executes one full top-level scan of `image_path` and returns the
/// carve records in append order (`spec.md` §6). Creates `<out_dir>` and
/// `<out_dir>/carved` if absent.
pub fn run(image_path: &Path, out_dir: &Path, options: &CarveOptions) -> Result<Vec<CarveRecord>> {
    let view = ByteView::open(image_path)?;
    let sink = ByteSink::new(out_dir)?;
    let scanner = Scanner::new(options, &sink);
    scanner.run(&view)
}
