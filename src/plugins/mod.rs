mod jpeg;
mod pdf;
mod zip;

pub use jpeg::JpegPlugin;
pub use pdf::PdfPlugin;
pub use zip::ZipPlugin;

use crate::plugin::FormatPlugin;

/// Builds the plugin list for the given enabled format tags, in the order
/// given, skipping unknown tags (the CLI layer validates tags up front).
pub fn plugins_for(formats: &[String]) -> Vec<Box<dyn FormatPlugin>> {
    formats
        .iter()
        .filter_map(|f| match f.as_str() {
            "jpeg" => Some(Box::new(JpegPlugin::new()) as Box<dyn FormatPlugin>),
            "pdf" => Some(Box::new(PdfPlugin::new()) as Box<dyn FormatPlugin>),
            "zip" => Some(Box::new(ZipPlugin::new()) as Box<dyn FormatPlugin>),
            _ => None,
        })
        .collect()
}
