use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the scanning-and-carving engine.
///
/// Only the I/O variants are fatal to a run (see `spec.md` §7); anything a
/// plugin gets wrong about a candidate range is recovered locally by the
/// scanner and never surfaces here.
#[derive(Debug, Error)]
pub enum CarveError {
    #[error("failed to open or map image {path:?}: {source}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write artifact {path:?}: {source}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("permission denied reading {path:?} (try elevated privileges): {source}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize index {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CarveError>;
