use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One successfully emitted artifact (`spec.md` §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarveRecord {
    pub format: String,
    pub start: u64,
    pub end: u64,
    pub size: u64,
    pub out_path: String,
    pub validated: bool,
    pub embedded_parent: Option<String>,
    pub notes: Option<String>,
}

/// Immutable configuration for one run (`spec.md` §3).
#[derive(Debug, Clone)]
pub struct CarveOptions {
    pub formats: Vec<String>,
    pub max_size: u64,
    pub embedded_depth: u32,
    pub fragmented: bool,
    pub chunk_size: u64,
    pub scan_windows: HashMap<String, u64>,
}

pub const DEFAULT_MAX_SIZE: u64 = 512 * 1024 * 1024;
pub const DEFAULT_CHUNK_SIZE: u64 = 4096;
pub const DEFAULT_JPEG_SCAN_WINDOW: u64 = 128 * 1024 * 1024;
pub const DEFAULT_PDF_SCAN_WINDOW: u64 = 256 * 1024 * 1024;
pub const DEFAULT_ZIP_SCAN_WINDOW: u64 = 256 * 1024 * 1024;

impl Default for CarveOptions {
    fn default() -> Self {
        let mut scan_windows = HashMap::new();
        scan_windows.insert("jpeg".to_string(), DEFAULT_JPEG_SCAN_WINDOW);
        scan_windows.insert("pdf".to_string(), DEFAULT_PDF_SCAN_WINDOW);
        scan_windows.insert("zip".to_string(), DEFAULT_ZIP_SCAN_WINDOW);
        CarveOptions {
            formats: vec!["jpeg".to_string(), "pdf".to_string(), "zip".to_string()],
            max_size: DEFAULT_MAX_SIZE,
            embedded_depth: 0,
            fragmented: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            scan_windows,
        }
    }
}

impl CarveOptions {
    /// Maximum forward search span for `format`, falling back to `max_size`
    /// per `spec.md` §4.3.1 step (b).
    pub fn scan_window(&self, format: &str) -> u64 {
        self.scan_windows
            .get(format)
            .copied()
            .unwrap_or(self.max_size)
    }
}
