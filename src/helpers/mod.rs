//! Helper functions shared by the pipeline and the CLI
//!
//! Text helpers (escaping, tag stripping, truncation) and date helpers that
//! work on the raw date strings carried by posts.

mod date;
mod html;

pub use date::*;
pub use html::*;
