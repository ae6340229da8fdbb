// Markup helpers for untrusted response bodies
pub mod sanitize;

pub use sanitize::{escape_html, sanitize_html};
