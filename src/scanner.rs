use log::{debug, info};

use crate::byteview::ByteView;
use crate::error::Result;
use crate::plugin::FormatPlugin;
use crate::plugins::plugins_for;
use crate::record::{CarveOptions, CarveRecord};
use crate::sink::ByteSink;

/// The engine (`spec.md` §4.3). Iterates each enabled plugin independently
/// over a byte view, carves non-overlapping candidates, validates them,
/// writes artifacts, and recurses into carved bytes up to
/// `options.embedded_depth`.
pub struct Scanner<'a> {
    plugins: Vec<Box<dyn FormatPlugin>>,
    options: &'a CarveOptions,
    sink: &'a ByteSink,
}

impl<'a> Scanner<'a> {
    pub fn new(options: &'a CarveOptions, sink: &'a ByteSink) -> Self {
        Scanner {
            plugins: plugins_for(&options.formats),
            options,
            sink,
        }
    }

    /// Runs one full top-level scan, returning records in append order.
    pub fn run(&self, view: &ByteView) -> Result<Vec<CarveRecord>> {
        info!(
            "scanning {} bytes across {} format(s)",
            view.length(),
            self.plugins.len()
        );
        let mut records = Vec::new();
        for idx in 0..self.plugins.len() {
            self.scan_with_plugin(view, idx, 0, None, &mut records)?;
        }
        Ok(records)
    }

    /// Scans `view` using `self.plugins[plugin_idx]` only, appending any
    /// carves found to `records`. `embedded_parent` is `Some((name, parent
    /// format))` when this call is itself part of a recursive embedded
    /// scan; `None` at the top level.
    fn scan_with_plugin(
        &self,
        view: &ByteView,
        plugin_idx: usize,
        depth: u32,
        embedded_parent: Option<&str>,
        records: &mut Vec<CarveRecord>,
    ) -> Result<()> {
        let plugin = self.plugins[plugin_idx].as_ref();
        let window = self.options.scan_window(plugin.format());
        let mut cursor = 0u64;

        while cursor < view.length() {
            let Some(header_off) = plugin.find_header(view, cursor) else {
                break;
            };

            let mut end = plugin.find_footer(view, header_off, window);
            let mut used_fragment = false;
            if end.is_none() && self.options.fragmented {
                end = plugin.fragmented_try_bridge(view, header_off, window, self.options.chunk_size);
                used_fragment = end.is_some();
            }

            let Some(end_off) = end else {
                cursor = header_off + 1;
                continue;
            };

            if end_off <= header_off {
                cursor = header_off + 1;
                continue;
            }
            let size = end_off - header_off;
            if size > self.options.max_size {
                cursor = header_off + 1;
                continue;
            }

            let data = view.slice(header_off, end_off).to_vec();
            let validated = plugin.validate(&data);
            let name = match embedded_parent {
                Some(parent) => format!("{parent}__{}_{:08x}", plugin.format(), header_off),
                None => plugin.candidate_name(view, header_off),
            };
            let out_path = self.sink.write(plugin.format(), &name, &data)?;

            let notes = if embedded_parent.is_some() {
                Some("embedded".to_string())
            } else if used_fragment {
                Some("fragmented-bridge".to_string())
            } else {
                None
            };

            debug!(
                "carved {} at [{}, {}) -> {} (validated={})",
                plugin.format(),
                header_off,
                end_off,
                out_path,
                validated
            );

            records.push(CarveRecord {
                format: plugin.format().to_string(),
                start: header_off,
                end: end_off,
                size,
                out_path,
                validated,
                embedded_parent: embedded_parent.map(|s| s.to_string()),
                notes,
            });

            if self.options.embedded_depth > depth {
                self.scan_embedded(&data, plugin_idx, depth + 1, &name, records)?;
            }

            cursor = end_off;
        }

        Ok(())
    }

    /// Recurses into a carved blob for formats other than `parent_idx`'s,
    /// per `spec.md` §4.3.2. Offsets recorded are relative to `data`, not
    /// the top-level image.
    fn scan_embedded(
        &self,
        data: &[u8],
        parent_idx: usize,
        depth: u32,
        parent_name: &str,
        records: &mut Vec<CarveRecord>,
    ) -> Result<()> {
        debug!("recursing into {parent_name} at depth {depth}");
        let blob = ByteView::from_buffer(data.to_vec());
        for idx in 0..self.plugins.len() {
            if idx == parent_idx {
                continue;
            }
            self.scan_with_plugin(&blob, idx, depth, Some(parent_name), records)?;
        }
        Ok(())
    }
}
