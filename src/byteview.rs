use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{CarveError, Result};

/// A read-only, random-access view over an input image.
///
/// Two backings, per `spec.md` §4.1 / §9: a memory-mapped region for the
/// top-level image, and an owned byte buffer for recursion into already
/// carved bytes. Both expose identical `find`/`rfind`/`slice`/`length`
/// semantics so the scanner never has to know which one it holds.
pub enum ByteView {
    Mapped(Mmap),
    Buffer(Vec<u8>),
}

impl ByteView {
    /// Opens `path` read-only and memory-maps the whole file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| classify_open_error(path, source))?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(|source| CarveError::IoRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(ByteView::Mapped(mmap))
    }

    /// Wraps an owned buffer, used when recursing into a carved artifact's
    /// bytes without touching the filesystem.
    pub fn from_buffer(data: Vec<u8>) -> Self {
        ByteView::Buffer(data)
    }

    fn bytes(&self) -> &[u8] {
        match self {
            ByteView::Mapped(mmap) => &mmap[..],
            ByteView::Buffer(buf) => &buf[..],
        }
    }

    pub fn length(&self) -> u64 {
        self.bytes().len() as u64
    }

    /// First occurrence of `needle` within `[from, to)`, or `None`.
    pub fn find(&self, needle: &[u8], from: u64, to: u64) -> Option<u64> {
        let data = self.bytes();
        let (from, to) = clamp_range(data.len(), from, to)?;
        if needle.is_empty() || to - from < needle.len() {
            return None;
        }
        data[from..to]
            .windows(needle.len())
            .position(|w| w == needle)
            .map(|pos| (from + pos) as u64)
    }

    /// Last occurrence of `needle` within `[from, to)`, or `None`.
    pub fn rfind(&self, needle: &[u8], from: u64, to: u64) -> Option<u64> {
        let data = self.bytes();
        let (from, to) = clamp_range(data.len(), from, to)?;
        if needle.is_empty() || to - from < needle.len() {
            return None;
        }
        data[from..to]
            .windows(needle.len())
            .rposition(|w| w == needle)
            .map(|pos| (from + pos) as u64)
    }

    /// Borrows the byte range `[from, to)`. Clamps `to` to the view's
    /// length; panics if `from > to` after clamping, which would indicate a
    /// caller bug rather than a data condition.
    pub fn slice(&self, from: u64, to: u64) -> &[u8] {
        let data = self.bytes();
        let to = to.min(data.len() as u64) as usize;
        let from = (from as usize).min(to);
        &data[from..to]
    }
}

fn clamp_range(len: usize, from: u64, to: u64) -> Option<(usize, usize)> {
    let from = from.min(len as u64) as usize;
    let to = to.min(len as u64) as usize;
    if from >= to { None } else { Some((from, to)) }
}

fn classify_open_error(path: &Path, source: std::io::Error) -> CarveError {
    if source.kind() == std::io::ErrorKind::PermissionDenied {
        CarveError::PermissionDenied {
            path: path.to_path_buf(),
            source,
        }
    } else {
        CarveError::IoRead {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_locates_first_match() {
        let view = ByteView::from_buffer(b"aXbXc".to_vec());
        assert_eq!(view.find(b"X", 0, view.length()), Some(1));
    }

    #[test]
    fn rfind_locates_last_match() {
        let view = ByteView::from_buffer(b"aXbXc".to_vec());
        assert_eq!(view.rfind(b"X", 0, view.length()), Some(3));
    }

    #[test]
    fn find_respects_window() {
        let view = ByteView::from_buffer(b"aXbXc".to_vec());
        assert_eq!(view.find(b"X", 0, 2), Some(1));
        assert_eq!(view.find(b"X", 2, 3), None);
    }

    #[test]
    fn slice_clamps_to_length() {
        let view = ByteView::from_buffer(b"hello".to_vec());
        assert_eq!(view.slice(0, 100), b"hello");
        assert_eq!(view.slice(2, 4), b"ll");
    }
}
