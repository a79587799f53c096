//! Font-safe text writes
//!
//! The host refuses to change text while a font the node uses is not
//! loaded. Every text write in the engine goes through [`write_text`], which
//! loads what it can first and then writes regardless: a font that fails to
//! load degrades styling for one node but never aborts a batch.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::host::{Document, FontLoader, FontName, FontSpec, NodeId};

/// Outcome of loading the fonts of one text node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontLoadReport {
    pub loaded: Vec<FontName>,
    pub failed: Vec<FontName>,
}

impl FontLoadReport {
    /// True when no font failed to load
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Load every font used by the text node `id`.
///
/// A uniform font is loaded directly and retried once on failure. Mixed text
/// is scanned one character at a time and each distinct font is loaded once;
/// ranges whose font cannot be read are skipped.
pub async fn load_fonts_for<H>(host: &H, id: &NodeId) -> FontLoadReport
where
    H: Document + FontLoader,
{
    let mut report = FontLoadReport::default();

    match host.font_name(id) {
        Some(FontSpec::Uniform(font)) => {
            if let Err(first) = host.load_font(&font).await {
                debug!("Loading {} for {} failed ({}), retrying", font, id, first);
                match host.load_font(&font).await {
                    Ok(()) => report.loaded.push(font),
                    Err(e) => {
                        warn!("Could not load font {} for {}: {}", font, id, e);
                        report.failed.push(font);
                    }
                }
            } else {
                report.loaded.push(font);
            }
        }
        Some(FontSpec::Mixed) => {
            let len = host.characters(id).map_or(0, |text| text.chars().count());
            let mut seen = HashSet::new();
            for start in 0..len {
                let font = match host.range_font_name(id, start, start + 1) {
                    Ok(font) => font,
                    Err(e) => {
                        debug!("No font for {} at {}: {}", id, start, e);
                        continue;
                    }
                };
                if !seen.insert(font.clone()) {
                    continue;
                }
                match host.load_font(&font).await {
                    Ok(()) => report.loaded.push(font),
                    Err(e) => {
                        warn!("Could not load font {} for {}: {}", font, id, e);
                        report.failed.push(font);
                    }
                }
            }
        }
        None => debug!("No font information for {}", id),
    }

    report
}

/// Load the fonts of `id`, then replace its text with `text`
pub async fn write_text<H>(
    host: &mut H,
    id: &NodeId,
    text: &str,
) -> anyhow::Result<FontLoadReport>
where
    H: Document + FontLoader,
{
    let report = load_fonts_for(&*host, id).await;
    if !report.is_complete() {
        warn!("Writing {} with {} unloaded font(s)", id, report.failed.len());
    }
    host.set_characters(id, text)?;
    Ok(report)
}
