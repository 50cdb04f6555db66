use crate::byteview::ByteView;
use crate::plugin::FormatPlugin;

const SOI: &[u8] = &[0xFF, 0xD8];
const EOI: &[u8] = &[0xFF, 0xD9];
const SOS: &[u8] = &[0xFF, 0xDA];

/// JPEG carver: header SOI (`FF D8`), footer EOI (`FF D9`), `spec.md` §4.2.1.
pub struct JpegPlugin {
    headers: [&'static [u8]; 1],
}

impl JpegPlugin {
    pub fn new() -> Self {
        JpegPlugin { headers: [SOI] }
    }
}

impl Default for JpegPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatPlugin for JpegPlugin {
    fn format(&self) -> &'static str {
        "jpeg"
    }

    fn headers(&self) -> &[&'static [u8]] {
        &self.headers
    }

    fn find_footer(&self, view: &ByteView, header_off: u64, max_scan: u64) -> Option<u64> {
        let start = header_off + 2;
        let end_search = (header_off + max_scan).min(view.length());
        view.find(EOI, start, end_search).map(|off| off + 2)
    }

    fn validate(&self, data: &[u8]) -> bool {
        if !(data.starts_with(SOI) && data.ends_with(EOI)) {
            return false;
        }
        data.windows(SOS.len()).any(|w| w == SOS)
    }

    fn fragmented_try_bridge(
        &self,
        view: &ByteView,
        header_off: u64,
        max_span: u64,
        _chunk_size: u64,
    ) -> Option<u64> {
        // Identical to find_footer: retained as a format hook per
        // spec.md §4.2.1, not because it adds intelligence over the
        // primary locator.
        self.find_footer(view, header_off, max_span)
    }
}
