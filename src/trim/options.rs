//! Trim options and configuration.

use crate::error::{Error, Result};
use crate::render::OutputMode;

/// Footer id used when none is configured.
pub const DEFAULT_FOOTER_ID: &str = "footer";

/// Space kept below the lowest retained element when none is configured.
pub const DEFAULT_PADDING: f64 = 10.0;

/// Options for trimming a footer from an SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimOptions {
    /// `id` attribute value marking the footer element
    pub footer_id: String,

    /// Space added below `content_max_y`
    pub padding: f64,

    /// Where to look for the footer
    pub scan_depth: ScanDepth,

    /// How the new height is rounded and rendered
    pub height_policy: HeightPolicy,

    /// How trimmed documents are serialized
    pub output_mode: OutputMode,
}

impl TrimOptions {
    /// Create new trim options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer id.
    pub fn with_footer_id(mut self, id: impl Into<String>) -> Self {
        self.footer_id = id.into();
        self
    }

    /// Set the bottom padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set the scan depth.
    pub fn with_scan_depth(mut self, depth: ScanDepth) -> Self {
        self.scan_depth = depth;
        self
    }

    /// Look for the footer at any depth instead of only among the root's children.
    pub fn any_depth(mut self) -> Self {
        self.scan_depth = ScanDepth::AnyDepth;
        self
    }

    /// Set the height policy.
    pub fn with_height_policy(mut self, policy: HeightPolicy) -> Self {
        self.height_policy = policy;
        self
    }

    /// Set the output mode.
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    /// Check that the options describe a runnable trim.
    pub fn validate(&self) -> Result<()> {
        if self.footer_id.is_empty() {
            return Err(Error::InvalidOption("footer id must not be empty".into()));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(Error::InvalidOption(format!(
                "padding must be a finite non-negative number, got {}",
                self.padding
            )));
        }
        Ok(())
    }
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self {
            footer_id: DEFAULT_FOOTER_ID.to_string(),
            padding: DEFAULT_PADDING,
            scan_depth: ScanDepth::RootChildren,
            height_policy: HeightPolicy::Ceil,
            output_mode: OutputMode::Unicode,
        }
    }
}

/// Scope searched for the footer element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanDepth {
    /// Only the root's direct children
    #[default]
    RootChildren,
    /// Every element below the root.
    ///
    /// Parents are visited in document order and all children of one parent
    /// are checked before descending, so with a repeated id the shallower
    /// match among siblings wins over one nested in an earlier sibling.
    AnyDepth,
}

/// Rounding applied to the recomputed height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeightPolicy {
    /// Round up to a whole number (`160`)
    #[default]
    Ceil,
    /// Keep two decimal digits (`160.00`)
    Fixed2,
}

impl HeightPolicy {
    /// Apply the rounding to a raw height.
    ///
    /// The number is read back from [`render`](Self::render), so it always
    /// equals the text written to the document.
    pub fn apply(self, height: f64) -> f64 {
        self.render(height).parse().unwrap_or(height)
    }

    /// Render a raw height as attribute text.
    pub fn render(self, height: f64) -> String {
        match self {
            HeightPolicy::Ceil => format!("{:.0}", height.ceil()),
            HeightPolicy::Fixed2 => format!("{:.2}", height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_options_builder() {
        let options = TrimOptions::new()
            .with_footer_id("source")
            .with_padding(4.5)
            .any_depth()
            .with_height_policy(HeightPolicy::Fixed2)
            .with_output_mode(OutputMode::Utf8WithDeclaration);

        assert_eq!(options.footer_id, "source");
        assert_eq!(options.padding, 4.5);
        assert_eq!(options.scan_depth, ScanDepth::AnyDepth);
        assert_eq!(options.height_policy, HeightPolicy::Fixed2);
        assert_eq!(options.output_mode, OutputMode::Utf8WithDeclaration);
    }

    #[test]
    fn test_default_options() {
        let options = TrimOptions::default();
        assert_eq!(options.footer_id, "footer");
        assert_eq!(options.padding, 10.0);
        assert_eq!(options.scan_depth, ScanDepth::RootChildren);
        assert_eq!(options.height_policy, HeightPolicy::Ceil);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(TrimOptions::new().with_footer_id("").validate().is_err());
        assert!(TrimOptions::new().with_padding(-1.0).validate().is_err());
        assert!(TrimOptions::new().with_padding(f64::NAN).validate().is_err());
        assert!(TrimOptions::new().with_padding(0.0).validate().is_ok());
    }

    #[test]
    fn test_height_policy() {
        assert_eq!(HeightPolicy::Ceil.render(150.2), "151");
        assert_eq!(HeightPolicy::Ceil.render(160.0), "160");
        assert_eq!(HeightPolicy::Ceil.apply(150.2), 151.0);
        assert_eq!(HeightPolicy::Fixed2.render(150.2), "150.20");
        assert_eq!(HeightPolicy::Fixed2.render(160.0), "160.00");
        assert_eq!(HeightPolicy::Fixed2.apply(150.256), 150.26);
    }

    #[test]
    fn test_fixed_rounding_ties_match_rendered_text() {
        for raw in [150.125, 2.675, 0.125] {
            let text = HeightPolicy::Fixed2.render(raw);
            assert_eq!(HeightPolicy::Fixed2.apply(raw), text.parse::<f64>().unwrap());
        }
        assert_eq!(HeightPolicy::Fixed2.render(150.125), "150.12");
        assert_eq!(HeightPolicy::Fixed2.apply(150.125), 150.12);
    }
}
