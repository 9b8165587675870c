//! civprep-report — renders a study ledger as a standalone HTML page.

pub mod html;

pub use html::{generate_html, write_html_report};
