use std::path::PathBuf;

use super::plan::DuplicateSlug;
use super::records::SkippedRecord;

/// A write that did not make it to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    pub slug: String,
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of one export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub total_records: usize,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedRecord>,
    pub duplicates: Vec<DuplicateSlug>,
    pub failed: Vec<WriteFailure>,
}

impl ExportReport {
    /// True when every record ended up in its own file
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.duplicates.is_empty() && self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Export completed: {} records, {} written, {} skipped, {} duplicate slugs, {} failed",
            self.total_records,
            self.written.len(),
            self.skipped.len(),
            self.duplicates.len(),
            self.failed.len()
        )
    }
}
