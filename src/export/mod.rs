//! Article export pipeline
//!
//! Converts a JSON array of article records into one markdown file per record.
//! The pipeline runs in a fixed order:
//!
//! 1. [`writer::ensure_output_dir`] creates the destination once
//! 2. [`loader::load_input`] reads the source document
//! 3. [`records::parse_records`] parses it, all or nothing
//! 4. [`plan::plan_batch`] validates records and resolves duplicate slugs
//! 5. [`writer::write_article`] runs for every planned article, concurrently
//!
//! Failures in steps 1-4 abort the batch. A failed write only affects its own
//! article. [`Exporter::run`] returns once every write has completed.
//!
//! # Example
//!
//! ```rust,no_run
//! use article_export::config::ExportConfig;
//! use article_export::export::Exporter;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let exporter = Exporter::new(ExportConfig::new("articles.json", "markdown_files"));
//! let report = exporter.run().await?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod plan;
pub mod records;
pub mod report;
pub mod writer;

pub use plan::{plan_batch, DuplicateSlug, WritePlan};
pub use records::{parse_records, validate_record, ArticleFile, SkipReason, SkippedRecord};
pub use report::{ExportReport, WriteFailure};

use futures::future::join_all;
use std::path::PathBuf;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use crate::config::ExportConfig;
use crate::error::ExportResult;

pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Run the whole batch
    ///
    /// Fatal errors are logged before being returned.
    pub async fn run(&self) -> ExportResult<ExportReport> {
        let result = self.run_inner().await;
        if let Err(e) = &result {
            error!("{e}");
        }
        result
    }

    async fn run_inner(&self) -> ExportResult<ExportReport> {
        self.config.validate()?;
        writer::ensure_output_dir(&self.config.output_dir).await?;

        let text = loader::load_input(&self.config.input_path).await?;
        let records = records::parse_records(&text)?;
        info!(
            "Loaded {} records from {}",
            records.len(),
            self.config.input_path.display()
        );

        let plan = plan::plan_batch(&records, self.config.on_duplicate);
        let mut report = ExportReport {
            total_records: records.len(),
            skipped: plan.skipped,
            duplicates: plan.duplicates,
            ..Default::default()
        };
        drop(records);

        let (written, failed) = self.write_all(plan.articles).await;
        report.written = written;
        report.failed = failed;

        info!("{}", report.summary());
        Ok(report)
    }

    /// Issue every write at once, bounded by the semaphore, and wait for all
    async fn write_all(&self, articles: Vec<ArticleFile>) -> (Vec<PathBuf>, Vec<WriteFailure>) {
        let max_parallel = self.config.max_parallel_writes.max(1);
        debug!(
            "Writing {} articles with parallelism level {}",
            articles.len(),
            max_parallel
        );

        let semaphore = Semaphore::new(max_parallel);
        let output_dir = self.config.output_dir.as_path();

        let futures = articles.iter().map(|article| {
            let semaphore = &semaphore;
            async move {
                // The semaphore is never closed, so acquire cannot fail
                let _permit = semaphore.acquire().await.ok();
                writer::write_article(output_dir, article)
                    .await
                    .map_err(|e| {
                        error!("{e}");
                        WriteFailure {
                            slug: article.slug.clone(),
                            path: output_dir.join(&article.file_name),
                            error: e.to_string(),
                        }
                    })
            }
        });

        let mut written = Vec::with_capacity(articles.len());
        let mut failed = Vec::new();
        for result in join_all(futures).await {
            match result {
                Ok(path) => written.push(path),
                Err(failure) => failed.push(failure),
            }
        }
        (written, failed)
    }
}
