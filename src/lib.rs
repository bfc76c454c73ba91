//! # article-export
//!
//! Turns a JSON array of article records into a directory of markdown files,
//! one `{slug}.md` per record containing the record's `body_markdown` verbatim.
//!
//! ## Usage
//!
//! ```bash
//! article-export [-i articles.json] [-o markdown_files] [-j 64] [--on-duplicate last-wins] [--strict]
//! ```
//!
//! ## Modules
//!
//! - `config` - Source and destination paths, write concurrency, duplicate policy
//! - `error` - Error type shared by the pipeline stages
//! - `export` - Loader, record processor, write planner and output writer
pub mod config;
pub mod error;
pub mod export;

pub use config::{DuplicatePolicy, ExportConfig};
pub use error::{ExportError, ExportResult};
pub use export::{ExportReport, Exporter};
