use byteorder::{ByteOrder, LittleEndian};

use crate::byteview::ByteView;
use crate::plugin::FormatPlugin;

const LFH: &[u8] = b"PK\x03\x04";
const EOCD: &[u8] = b"PK\x05\x06";
const EOCD64_LOC: &[u8] = b"PK\x06\x07";
const EOCD64: &[u8] = b"PK\x06\x06";

const EOCD_FIXED_LEN: u64 = 22;
const EOCD64_MIN_LEN: u64 = 56;

/// ZIP carver: header LFH (`PK\x03\x04`), footer is the EOCD (or ZIP64
/// EOCD locator/record) at the end of the archive (`spec.md` §4.2.3).
pub struct ZipPlugin {
    headers: [&'static [u8]; 1],
}

impl ZipPlugin {
    pub fn new() -> Self {
        ZipPlugin { headers: [LFH] }
    }
}

impl Default for ZipPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatPlugin for ZipPlugin {
    fn format(&self) -> &'static str {
        "zip"
    }

    fn headers(&self) -> &[&'static [u8]] {
        &self.headers
    }

    fn find_footer(&self, view: &ByteView, header_off: u64, max_scan: u64) -> Option<u64> {
        let end_search = (header_off + max_scan).min(view.length());
        let loc = view.rfind(EOCD64_LOC, header_off, end_search);
        let rec = view.rfind(EOCD64, header_off, end_search);
        let eocd = view.rfind(EOCD, header_off, end_search);

        match (loc, rec) {
            (Some(_), Some(rec_off)) => {
                if let Some(eocd_off) = eocd {
                    if eocd_off > rec_off {
                        return Some(parse_eocd_end(view, eocd_off, end_search));
                    }
                }
                Some(rec_off + EOCD64_MIN_LEN)
            }
            _ => eocd.map(|eocd_off| parse_eocd_end(view, eocd_off, end_search)),
        }
    }

    fn validate(&self, data: &[u8]) -> bool {
        contains(data, LFH)
            && (contains(data, EOCD) || contains(data, EOCD64) || contains(data, EOCD64_LOC))
    }

    fn fragmented_try_bridge(
        &self,
        view: &ByteView,
        header_off: u64,
        max_span: u64,
        _chunk_size: u64,
    ) -> Option<u64> {
        let end_search = (header_off + max_span).min(view.length());
        for sig in [EOCD, EOCD64_LOC, EOCD64] {
            if let Some(off) = view.find(sig, header_off, end_search) {
                return Some(if sig == EOCD {
                    parse_eocd_end(view, off, end_search)
                } else {
                    off + sig.len() as u64
                });
            }
        }
        None
    }
}

/// Parses the fixed 22-byte EOCD structure (`<4sHHHHIIH>` little-endian) to
/// determine the comment length, and returns `eocd_off + 22 + comment_len`
/// clamped to the view's length. Falls back to `eocd_off + 22` if the
/// structure is truncated by `end_search` (`spec.md` §4.2.3 step 3, §4.4).
fn parse_eocd_end(view: &ByteView, eocd_off: u64, end_search: u64) -> u64 {
    if eocd_off + EOCD_FIXED_LEN > end_search {
        return eocd_off + EOCD_FIXED_LEN;
    }
    let header = view.slice(eocd_off, eocd_off + EOCD_FIXED_LEN);
    // comment length is the last field: offset 20..22
    let comment_len = LittleEndian::read_u16(&header[20..22]) as u64;
    (eocd_off + EOCD_FIXED_LEN + comment_len).min(view.length())
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.len() <= haystack.len() && haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eocd_record(entries: u16, cd_size: u32, cd_offset: u32, comment: &[u8]) -> Vec<u8> {
        let mut rec = Vec::new();
        rec.extend_from_slice(EOCD);
        rec.extend_from_slice(&0u16.to_le_bytes()); // disk number
        rec.extend_from_slice(&0u16.to_le_bytes()); // disk with CD
        rec.extend_from_slice(&entries.to_le_bytes()); // entries this disk
        rec.extend_from_slice(&entries.to_le_bytes()); // entries total
        rec.extend_from_slice(&cd_size.to_le_bytes());
        rec.extend_from_slice(&cd_offset.to_le_bytes());
        rec.extend_from_slice(&(comment.len() as u16).to_le_bytes());
        rec.extend_from_slice(comment);
        rec
    }

    #[test]
    fn includes_full_comment_in_carve() {
        let mut data = LFH.to_vec();
        data.extend_from_slice(b"some local file header content");
        let eocd_start = data.len() as u64;
        data.extend_from_slice(&eocd_record(1, 10, 4, b"foo.txt"));
        let view = ByteView::from_buffer(data);
        let plugin = ZipPlugin::new();
        let end = plugin.find_footer(&view, 0, view.length()).unwrap();
        assert_eq!(end, eocd_start + 22 + 7);
        assert_eq!(end, view.length());
    }

    #[test]
    fn truncated_eocd_falls_back_to_fixed_size() {
        let mut data = LFH.to_vec();
        data.extend_from_slice(b"x");
        let eocd_start = data.len() as u64;
        data.extend_from_slice(EOCD);
        data.extend_from_slice(&[0u8; 10]); // truncated, missing comment-len field
        let view = ByteView::from_buffer(data);
        let plugin = ZipPlugin::new();
        let end = plugin.find_footer(&view, 0, view.length()).unwrap();
        assert_eq!(end, eocd_start + 22);
    }

    #[test]
    fn zip64_locator_and_record_prefer_record_when_no_trailing_eocd() {
        let mut data = LFH.to_vec();
        let rec_off = data.len() as u64;
        data.extend_from_slice(EOCD64);
        data.extend_from_slice(&[0u8; 52]); // pad to a plausible record size
        data.extend_from_slice(EOCD64_LOC);
        data.extend_from_slice(&[0u8; 16]);
        let view = ByteView::from_buffer(data);
        let plugin = ZipPlugin::new();
        let end = plugin.find_footer(&view, 0, view.length()).unwrap();
        assert_eq!(end, rec_off + 56);
    }

    #[test]
    fn validate_requires_lfh_and_a_directory_marker() {
        let plugin = ZipPlugin::new();
        let mut good = LFH.to_vec();
        good.extend_from_slice(&eocd_record(0, 0, 0, b""));
        assert!(plugin.validate(&good));
        assert!(!plugin.validate(LFH));
    }
}
