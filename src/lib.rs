//! # unfooter
//!
//! Remove footer groups from generated SVG charts and re-crop their height.
//!
//! Charting tools often place a source or copyright footer at the bottom of
//! an SVG. This library removes the element carrying the footer id together
//! with everything that follows it, measures how far the remaining content
//! reaches down, and rewrites the root `height` and `viewBox` so the image
//! ends just below the content.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unfooter::{trim_footer, TrimOptions};
//!
//! fn main() -> unfooter::Result<()> {
//!     let report = trim_footer("chart.svg", "chart (cropped).svg", &TrimOptions::default())?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Lossless round-trip**: attributes, entities and namespace prefixes are
//!   written back exactly as they were read
//! - **Configurable trim**: footer id, bottom padding, scan depth and height
//!   rounding
//! - **Structured reports**: every trim returns a serializable [`TrimReport`]
//! - **Atomic writes**: an output file is either complete or untouched
//! - **Batch processing**: whole directories in parallel using Rayon

pub mod batch;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod trim;

// Re-export commonly used types
pub use batch::{run_batch, BatchEntry, BatchOptions, BatchReport, EntryStatus};
pub use error::{Error, Result};
pub use model::{Attribute, Document, Element, Node, XmlDeclaration};
pub use parser::{ParseOptions, SvgParser};
pub use render::{JsonFormat, OutputMode};
pub use trim::{
    inspect_document, trim_document, HeightPolicy, Inspection, ScanDepth, TrimOptions, TrimReport,
};

use std::io::Read;
use std::path::Path;

/// Parse an SVG file and return its document tree.
///
/// # Example
///
/// ```no_run
/// use unfooter::parse_file;
///
/// let doc = parse_file("chart.svg").unwrap();
/// println!("Elements: {}", doc.element_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = SvgParser::open(path)?;
    parser.parse()
}

/// Parse an SVG file with custom options.
///
/// # Example
///
/// ```no_run
/// use unfooter::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().strip_comments();
/// let doc = parse_file_with_options("chart.svg", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = SvgParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse an SVG from UTF-8 bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = SvgParser::from_bytes(data)?;
    parser.parse()
}

/// Parse an SVG from a string.
///
/// # Example
///
/// ```
/// let doc = unfooter::parse_str(r#"<svg height="10"><g id="footer"/></svg>"#).unwrap();
/// assert!(doc.find_by_id("footer").is_some());
/// ```
pub fn parse_str(text: &str) -> Result<Document> {
    SvgParser::from_str_with_options(text, ParseOptions::default()).parse()
}

/// Parse an SVG from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = SvgParser::from_reader(reader)?;
    parser.parse()
}

/// Trim the footer from `input` and write the result to `output`.
///
/// Nothing is written when the footer is not found; check
/// [`TrimReport::footer_found`]. `output` may be the same path as `input`.
///
/// # Example
///
/// ```no_run
/// use unfooter::{trim_footer, TrimOptions};
///
/// let options = TrimOptions::new().with_footer_id("credits").with_padding(20.0);
/// let report = trim_footer("chart.svg", "chart.svg", &options).unwrap();
/// assert!(report.footer_found);
/// ```
pub fn trim_footer<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &TrimOptions,
) -> Result<TrimReport> {
    trim_footer_with_parse_options(input, output, &ParseOptions::default(), options)
}

/// Trim the footer from a file with custom parse options.
pub fn trim_footer_with_parse_options<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    parse_options: &ParseOptions,
    options: &TrimOptions,
) -> Result<TrimReport> {
    let (input, output) = (input.as_ref(), output.as_ref());
    options.validate()?;

    let mut doc = parse_file_with_options(input, parse_options.clone())?;
    let report = trim_document(&mut doc, options)?;
    if !report.footer_found {
        log::warn!("{}: {}; no output written", input.display(), report.summary());
        return Ok(report);
    }

    render::write_file(&doc, output, options.output_mode)?;
    log::info!("{} -> {}: {}", input.display(), output.display(), report.summary());
    Ok(report)
}

/// Result of trimming in memory.
#[derive(Debug, Clone)]
pub struct TrimOutcome {
    /// What was found and changed
    pub report: TrimReport,

    /// Serialized document, present only when the footer was removed
    pub output: Option<Vec<u8>>,
}

impl TrimOutcome {
    /// The serialized document as text, if there is one.
    pub fn output_str(&self) -> Option<&str> {
        self.output
            .as_deref()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

/// Trim the footer from an in-memory SVG.
///
/// # Example
///
/// ```
/// use unfooter::{trim_bytes, TrimOptions};
///
/// let svg = br#"<svg height="600"><rect y="0" height="40"/><g id="footer"/></svg>"#;
/// let outcome = trim_bytes(svg, &TrimOptions::default()).unwrap();
/// assert_eq!(outcome.output_str(), Some(r#"<svg height="50"><rect y="0" height="40"/></svg>"#));
/// ```
pub fn trim_bytes(data: &[u8], options: &TrimOptions) -> Result<TrimOutcome> {
    trim_bytes_with_parse_options(data, &ParseOptions::default(), options)
}

fn trim_bytes_with_parse_options(
    data: &[u8],
    parse_options: &ParseOptions,
    options: &TrimOptions,
) -> Result<TrimOutcome> {
    options.validate()?;
    let mut doc = SvgParser::from_bytes_with_options(data, parse_options.clone())?.parse()?;
    let report = trim_document(&mut doc, options)?;
    let output = if report.footer_found {
        Some(render::to_bytes(&doc, options.output_mode)?)
    } else {
        None
    };
    Ok(TrimOutcome { report, output })
}

/// Report what trimming a file would do, without writing anything.
pub fn inspect_file<P: AsRef<Path>>(path: P, options: &TrimOptions) -> Result<Inspection> {
    let doc = parse_file(path)?;
    inspect_document(&doc, options)
}

/// Builder for trimming SVG files.
///
/// # Example
///
/// ```no_run
/// use unfooter::{HeightPolicy, Unfooter};
///
/// let report = Unfooter::new()
///     .with_footer_id("footer")
///     .with_padding(12.0)
///     .with_height_policy(HeightPolicy::Fixed2)
///     .with_xml_declaration()
///     .trim_file("chart.svg", "chart (cropped).svg")?;
/// println!("{}", report.summary());
/// # Ok::<(), unfooter::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Unfooter {
    parse_options: ParseOptions,
    trim_options: TrimOptions,
}

impl Unfooter {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            trim_options: TrimOptions::default(),
        }
    }

    /// Set the footer id.
    pub fn with_footer_id(mut self, id: impl Into<String>) -> Self {
        self.trim_options = self.trim_options.with_footer_id(id);
        self
    }

    /// Set the padding below the content.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.trim_options = self.trim_options.with_padding(padding);
        self
    }

    /// Set where the footer is searched for.
    pub fn with_scan_depth(mut self, depth: ScanDepth) -> Self {
        self.trim_options = self.trim_options.with_scan_depth(depth);
        self
    }

    /// Search for the footer at any depth.
    pub fn any_depth(mut self) -> Self {
        self.trim_options = self.trim_options.any_depth();
        self
    }

    /// Set how the new height is rounded.
    pub fn with_height_policy(mut self, policy: HeightPolicy) -> Self {
        self.trim_options = self.trim_options.with_height_policy(policy);
        self
    }

    /// Set the output mode.
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.trim_options = self.trim_options.with_output_mode(mode);
        self
    }

    /// Write an XML declaration at the top of the output.
    pub fn with_xml_declaration(self) -> Self {
        self.with_output_mode(OutputMode::Utf8WithDeclaration)
    }

    /// Drop comments while parsing.
    pub fn strip_comments(mut self) -> Self {
        self.parse_options = self.parse_options.strip_comments();
        self
    }

    /// The trim options this builder carries.
    pub fn options(&self) -> &TrimOptions {
        &self.trim_options
    }

    /// Trim a file.
    pub fn trim_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<TrimReport> {
        trim_footer_with_parse_options(input, output, &self.parse_options, &self.trim_options)
    }

    /// Trim an in-memory SVG.
    pub fn trim_bytes(&self, data: &[u8]) -> Result<TrimOutcome> {
        trim_bytes_with_parse_options(data, &self.parse_options, &self.trim_options)
    }

    /// Inspect a file without writing.
    pub fn inspect_file<P: AsRef<Path>>(&self, path: P) -> Result<Inspection> {
        let doc = parse_file_with_options(path, self.parse_options.clone())?;
        inspect_document(&doc, &self.trim_options)
    }

    /// Trim every SVG in a directory with this builder's options.
    pub fn batch<P: AsRef<Path>>(&self, dir: P, options: BatchOptions) -> Result<BatchReport> {
        let options = options
            .with_trim_options(self.trim_options.clone())
            .with_parse_options(self.parse_options.clone());
        run_batch(dir, &options)
    }
}

impl Default for Unfooter {
    fn default() -> Self {
        Self::new()
    }
}
