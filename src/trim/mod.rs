//! Footer trimming: locate, detach, measure, rewrite.
//!
//! The pipeline runs in a fixed order on one in-memory document:
//!
//! 1. [`locate_footer`] finds the footer and its trailing siblings.
//! 2. [`footer_min_y`] records where the footer started (diagnostic only).
//! 3. [`detach_footer`] removes the removal set.
//! 4. [`measure`] computes `content_max_y` over what is left.
//! 5. [`rewrite_height`] updates the root's `height` and viewBox.
//!
//! Measuring always happens after removal, so the footer never contributes
//! to the new height.
//!
//! # Example
//!
//! ```
//! use unfooter::trim::{trim_document, TrimOptions};
//!
//! let mut doc = unfooter::parse_str(
//!     r#"<svg height="600" viewBox="0 0 850 600">
//!          <rect y="50" height="100"/>
//!          <g id="footer"><text y="550">Source</text></g>
//!        </svg>"#,
//! )?;
//! let report = trim_document(&mut doc, &TrimOptions::default())?;
//! assert_eq!(report.new_height.as_deref(), Some("160"));
//! # Ok::<(), unfooter::Error>(())
//! ```

mod extent;
mod locator;
mod number;
mod options;
mod report;
mod rewrite;

pub use extent::{
    content_max_y, extent_contribution, footer_min_y, measure, position_y, Extent, POSITION_ATTRS,
};
pub use locator::{detach_footer, locate_footer, FooterMatch};
pub use number::{parse_number, translate_y};
pub use options::{HeightPolicy, ScanDepth, TrimOptions, DEFAULT_FOOTER_ID, DEFAULT_PADDING};
pub use report::{Inspection, TrimReport};
pub use rewrite::{rewrite_height, target_height, HeightRewrite, ViewBox};

use crate::error::Result;
use crate::model::Document;

/// Remove the footer from a document and re-crop its height.
///
/// When no footer is found the document is left untouched and the report
/// has `footer_found == false`.
pub fn trim_document(doc: &mut Document, options: &TrimOptions) -> Result<TrimReport> {
    options.validate()?;

    let old_height = doc.root.attr("height").map(|h| h.into_owned());
    let Some(found) = locate_footer(doc, &options.footer_id, options.scan_depth) else {
        log::warn!("No element found with id=\"{}\"", options.footer_id);
        return Ok(TrimReport::not_found(&options.footer_id, old_height));
    };

    let min_y = found.footer(doc).and_then(footer_min_y);
    let removed = detach_footer(doc, &found);
    log::info!(
        "Removed <{} id=\"{}\"> and {} trailing sibling(s) (footer min y: {:?})",
        removed.first().map(|el| el.name.as_str()).unwrap_or("?"),
        options.footer_id,
        removed.len().saturating_sub(1),
        min_y
    );

    let extent = measure(&doc.root);
    let rewrite = rewrite_height(
        &mut doc.root,
        extent.max_y,
        options.padding,
        options.height_policy,
    );
    log::info!(
        "height: {} -> {} (content max y {:.2}, padding {})",
        rewrite.old_height.as_deref().unwrap_or("?"),
        rewrite.new_height_text,
        extent.max_y,
        options.padding
    );

    Ok(TrimReport {
        footer_id: options.footer_id.clone(),
        footer_found: true,
        removed_count: removed.len(),
        duplicate_footer_ids: found.duplicates,
        footer_min_y: min_y,
        content_max_y: Some(extent.max_y),
        bottom_element: extent.bottom_element,
        old_height: rewrite.old_height,
        new_height: Some(rewrite.new_height_text),
        viewbox_updated: rewrite.viewbox_updated,
    })
}

/// Report what [`trim_document`] would do without touching `doc`.
pub fn inspect_document(doc: &Document, options: &TrimOptions) -> Result<Inspection> {
    let mut scratch = doc.clone();
    let trim = trim_document(&mut scratch, options)?;

    let view_box = doc.root.attr("viewBox").map(|v| v.into_owned());
    Ok(Inspection {
        root: doc.root.name.clone(),
        width: doc.root.attr("width").map(|w| w.into_owned()),
        height: doc.root.attr("height").map(|h| h.into_owned()),
        view_box_valid: view_box.as_deref().and_then(ViewBox::parse).is_some(),
        view_box,
        element_count: doc.element_count(),
        trim,
    })
}
