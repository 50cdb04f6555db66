use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CarveError, Result};

/// Writes carved byte ranges under `<out_dir>/carved/` and returns the
/// resulting path as a string (`spec.md` §4.3.3).
pub struct ByteSink {
    carved_dir: PathBuf,
}

impl ByteSink {
    /// Creates `<out_dir>` and `<out_dir>/carved` if absent.
    pub fn new(out_dir: &Path) -> Result<Self> {
        let carved_dir = out_dir.join("carved");
        fs::create_dir_all(&carved_dir).map_err(|source| CarveError::IoWrite {
            path: carved_dir.clone(),
            source,
        })?;
        Ok(ByteSink { carved_dir })
    }

    /// Writes `data` to `<out_dir>/carved/<name><ext>`, choosing the
    /// extension from `format` (jpeg -> .jpg, pdf -> .pdf, zip -> .zip,
    /// else -> .bin), and returns the resulting path.
    pub fn write(&self, format: &str, name: &str, data: &[u8]) -> Result<String> {
        let ext = extension_for(format);
        let filename = format!("{name}{ext}");
        let path = self.carved_dir.join(filename);
        fs::write(&path, data).map_err(|source| CarveError::IoWrite {
            path: path.clone(),
            source,
        })?;
        Ok(path.to_string_lossy().into_owned())
    }
}

fn extension_for(format: &str) -> &'static str {
    match format {
        "jpeg" => ".jpg",
        "pdf" => ".pdf",
        "zip" => ".zip",
        _ => ".bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_carved_subdir_and_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ByteSink::new(dir.path()).unwrap();
        let path = sink
            .write("jpeg", "jpeg_000000000000", b"\xff\xd8\xff\xd9")
            .unwrap();
        assert!(path.ends_with("jpeg_000000000000.jpg"));
        assert!(Path::new(&path).exists());
        assert!(dir.path().join("carved").is_dir());
    }

    #[test]
    fn unknown_format_falls_back_to_bin_extension() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ByteSink::new(dir.path()).unwrap();
        let path = sink.write("mystery", "mystery_0", b"???").unwrap();
        assert!(path.ends_with("mystery_0.bin"));
    }
}
