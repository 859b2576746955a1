//! Rendering module for serializing documents and reports.

mod json;
mod options;
mod writer;

pub use json::{report_to_json, JsonFormat};
pub use options::OutputMode;
pub use writer::{to_bytes, to_string, write_file, write_to};
