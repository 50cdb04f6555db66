use crate::byteview::ByteView;
use crate::plugin::FormatPlugin;

const HEADER: &[u8] = b"%PDF-";
const EOF: &[u8] = b"%%EOF";
const STARTXREF: &[u8] = b"startxref";
const TAIL_INSPECT_LEN: u64 = 2048;

/// PDF carver: header `%PDF-`, footer is the *last* `%%EOF` in the scan
/// window (`spec.md` §4.2.2), since incrementally-updated PDFs may carry
/// several.
pub struct PdfPlugin {
    headers: [&'static [u8]; 1],
}

impl PdfPlugin {
    pub fn new() -> Self {
        PdfPlugin { headers: [HEADER] }
    }
}

impl Default for PdfPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatPlugin for PdfPlugin {
    fn format(&self) -> &'static str {
        "pdf"
    }

    fn headers(&self) -> &[&'static [u8]] {
        &self.headers
    }

    fn find_footer(&self, view: &ByteView, header_off: u64, max_scan: u64) -> Option<u64> {
        let end_search = (header_off + max_scan).min(view.length());
        view.rfind(EOF, header_off, end_search)
            .map(|off| off + EOF.len() as u64)
    }

    fn validate(&self, data: &[u8]) -> bool {
        if !data.starts_with(HEADER) {
            return false;
        }
        if !contains(data, EOF) {
            return false;
        }
        // startxref inspection is informative only: a parse failure never
        // invalidates (spec.md §4.2.2, §9 Open Questions).
        let tail_start = data.len().saturating_sub(TAIL_INSPECT_LEN as usize);
        let tail = &data[tail_start..];
        if let Some(idx) = rfind_slice(tail, STARTXREF) {
            let after = &tail[idx..];
            let _ = after
                .split(|&b| b == b'\n')
                .nth(1)
                .and_then(|line| std::str::from_utf8(line).ok())
                .and_then(|line| line.trim().parse::<i64>().ok());
        }
        true
    }

    fn fragmented_try_bridge(
        &self,
        view: &ByteView,
        header_off: u64,
        max_span: u64,
        _chunk_size: u64,
    ) -> Option<u64> {
        let end_search = (header_off + max_span).min(view.length());
        // First EOF in window, as opposed to the last used by find_footer.
        view.find(EOF, header_off, end_search)
            .map(|off| off + EOF.len() as u64)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn rfind_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_of(bytes: &[u8]) -> ByteView {
        ByteView::from_buffer(bytes.to_vec())
    }

    #[test]
    fn uses_last_eof_for_incremental_updates() {
        let mut data = b"%PDF-1.4\n...%%EOF\n".to_vec();
        let first_eof_end = data.len() as u64;
        data.extend_from_slice(b"<update>%%EOF");
        let view = view_of(&data);
        let plugin = PdfPlugin::new();
        let end = plugin.find_footer(&view, 0, view.length()).unwrap();
        assert_eq!(end, view.length());
        assert!(end > first_eof_end);
    }

    #[test]
    fn fragmented_bridge_uses_first_eof() {
        let data = b"%PDF-1.4\n...%%EOF\n<update>%%EOF".to_vec();
        let view = view_of(&data);
        let plugin = PdfPlugin::new();
        let end = plugin
            .fragmented_try_bridge(&view, 0, view.length(), 4096)
            .unwrap();
        // must land at the first %%EOF, not the last
        assert!(end < view.length());
    }

    #[test]
    fn validate_tolerates_unparseable_startxref() {
        let data = b"%PDF-1.4\n%%EOF\nstartxref\nnotanumber\n".to_vec();
        let plugin = PdfPlugin::new();
        assert!(plugin.validate(&data));
    }
}
