//! Serialization options.

/// How a document is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Text without an XML declaration
    #[default]
    Unicode,
    /// UTF-8 bytes preceded by `<?xml version="1.0" encoding="UTF-8"?>`
    Utf8WithDeclaration,
}

impl OutputMode {
    /// Whether an XML declaration is written.
    pub fn writes_declaration(self) -> bool {
        matches!(self, OutputMode::Utf8WithDeclaration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode_default() {
        assert_eq!(OutputMode::default(), OutputMode::Unicode);
        assert!(!OutputMode::Unicode.writes_declaration());
        assert!(OutputMode::Utf8WithDeclaration.writes_declaration());
    }
}
