//! Parsing options and configuration.

/// Options for loading SVG documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Drop comments while building the tree
    pub strip_comments: bool,

    /// Keep the source `<?xml ...?>` declaration on the parsed document
    pub keep_declaration: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable comment stripping.
    pub fn with_strip_comments(mut self, strip: bool) -> Self {
        self.strip_comments = strip;
        self
    }

    /// Drop comments while parsing.
    pub fn strip_comments(mut self) -> Self {
        self.strip_comments = true;
        self
    }

    /// Enable or disable keeping the source declaration.
    pub fn with_declaration(mut self, keep: bool) -> Self {
        self.keep_declaration = keep;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strip_comments: false,
            keep_declaration: true,
        }
    }
}
