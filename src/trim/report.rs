//! Structured outcome of a trim.

use serde::{Deserialize, Serialize};

/// What a trim found and changed.
///
/// This is the only channel through which the core reports; rendering it to
/// a console or log is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrimReport {
    /// Footer id that was searched for
    pub footer_id: String,

    /// Whether an element with the footer id was found
    pub footer_found: bool,

    /// Elements removed (footer plus trailing siblings)
    pub removed_count: usize,

    /// Further elements in scope carrying the same id
    pub duplicate_footer_ids: usize,

    /// Smallest y within the footer, for diagnostics
    pub footer_min_y: Option<f64>,

    /// Bottom edge of the retained content
    pub content_max_y: Option<f64>,

    /// Element that set `content_max_y`
    pub bottom_element: Option<String>,

    /// Root `height` before trimming
    pub old_height: Option<String>,

    /// Root `height` after trimming, as written
    pub new_height: Option<String>,

    /// Whether the viewBox height token was rewritten
    pub viewbox_updated: bool,
}

impl TrimReport {
    /// Report for a document that has no footer; nothing was changed.
    pub fn not_found(footer_id: impl Into<String>, old_height: Option<String>) -> Self {
        Self {
            footer_id: footer_id.into(),
            old_height,
            ..Default::default()
        }
    }

    /// Whether the document was modified.
    pub fn is_trimmed(&self) -> bool {
        self.footer_found
    }

    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        if !self.footer_found {
            return format!("no element with id=\"{}\"", self.footer_id);
        }
        format!(
            "removed {} element(s), height {} -> {}",
            self.removed_count,
            self.old_height.as_deref().unwrap_or("?"),
            self.new_height.as_deref().unwrap_or("?")
        )
    }
}

/// Read-only view of what trimming would do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    /// Root tag name
    pub root: String,

    /// Root `width` attribute
    pub width: Option<String>,

    /// Root `height` attribute
    pub height: Option<String>,

    /// Root `viewBox` attribute
    pub view_box: Option<String>,

    /// Whether the viewBox can be rewritten
    pub view_box_valid: bool,

    /// Total element count, root included
    pub element_count: usize,

    /// Trim that would result with the given options
    pub trim: TrimReport,
}
