use crate::byteview::ByteView;

/// A pluggable format descriptor (`spec.md` §4.2).
///
/// The set of implementors is closed at compile time (JPEG, PDF, ZIP), so
/// dynamic dispatch via `dyn FormatPlugin` is purely for the scanner's
/// convenience iterating a heterogeneous list — not an extension point for
/// runtime-loaded formats.
pub trait FormatPlugin: Send + Sync {
    /// Format tag, e.g. `"jpeg"`.
    fn format(&self) -> &'static str;

    /// Non-empty list of header byte signatures. Only `headers()[0]` is
    /// ever used as the scan-forward needle (`spec.md` §9 Open Questions);
    /// the remaining entries exist for plugins that override
    /// `find_header`.
    fn headers(&self) -> &[&'static [u8]];

    /// Returns the nearest header occurrence at or after `from`, within
    /// `[from, view.length())`. Default: first match of `headers()[0]`.
    fn find_header(&self, view: &ByteView, from: u64) -> Option<u64> {
        view.find(self.headers()[0], from, view.length())
    }

    /// Given a header at `header_off`, returns the exclusive end offset of
    /// the carved file within `[header_off, header_off + max_scan)`.
    fn find_footer(&self, view: &ByteView, header_off: u64, max_scan: u64) -> Option<u64>;

    /// Cheap structural check; never decodes content.
    fn validate(&self, data: &[u8]) -> bool;

    /// Best-effort alternate end-locator, invoked only when `find_footer`
    /// fails and fragmented recovery is enabled.
    fn fragmented_try_bridge(
        &self,
        view: &ByteView,
        header_off: u64,
        max_span: u64,
        chunk_size: u64,
    ) -> Option<u64>;

    /// Deterministic, collision-free label for the artifact. `view` is
    /// passed through per the plugin contract but the built-in plugins
    /// derive the name purely from the format tag and header offset.
    fn candidate_name(&self, _view: &ByteView, header_off: u64) -> String {
        format!("{}_{:012x}", self.format(), header_off)
    }
}
