//! SVG parsing module.

mod options;
mod svg_parser;

pub use options::ParseOptions;
pub use svg_parser::SvgParser;
