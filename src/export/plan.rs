//! Turns parsed records into a write plan
//!
//! Planning happens before any file is touched. It validates every record,
//! collects the ones that have to be skipped and resolves slugs that appear
//! more than once, so the plan never contains two writes to the same file.

use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::records::{validate_record, ArticleFile, SkippedRecord};
use crate::config::DuplicatePolicy;

/// A slug shared by several records, and which of them survived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSlug {
    pub slug: String,
    pub kept_index: usize,
    pub dropped_indices: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct WritePlan {
    /// Articles to write, one per slug, in input order
    pub articles: Vec<ArticleFile>,
    pub skipped: Vec<SkippedRecord>,
    pub duplicates: Vec<DuplicateSlug>,
}

/// Validate the records and resolve duplicate slugs
pub fn plan_batch(records: &[Value], policy: DuplicatePolicy) -> WritePlan {
    let mut plan = WritePlan::default();
    let mut valid = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        match validate_record(index, record) {
            Ok(article) => valid.push(article),
            Err(skipped) => {
                warn!("Record skipped due to {}: {}", skipped.reason, skipped.raw);
                plan.skipped.push(skipped);
            }
        }
    }

    let (articles, duplicates) = resolve_duplicates(valid, policy);
    for dup in &duplicates {
        warn!(
            "Duplicate slug \"{}\" in records {:?}; keeping record {}",
            dup.slug,
            all_indices(dup),
            dup.kept_index
        );
    }

    debug!(
        "Planned {} writes ({} skipped, {} duplicate slugs)",
        articles.len(),
        plan.skipped.len(),
        duplicates.len()
    );

    plan.articles = articles;
    plan.duplicates = duplicates;
    plan
}

fn resolve_duplicates(
    articles: Vec<ArticleFile>,
    policy: DuplicatePolicy,
) -> (Vec<ArticleFile>, Vec<DuplicateSlug>) {
    // slug -> indices into `articles`, in input order
    let mut by_slug: HashMap<&str, Vec<usize>> = HashMap::new();
    for (pos, article) in articles.iter().enumerate() {
        by_slug.entry(article.slug.as_str()).or_default().push(pos);
    }

    let mut keep = vec![true; articles.len()];
    let mut duplicates = Vec::new();

    for positions in by_slug.values().filter(|p| p.len() > 1) {
        let kept = match policy {
            DuplicatePolicy::LastWins => positions[positions.len() - 1],
            DuplicatePolicy::FirstWins => positions[0],
        };
        let mut dropped_indices = Vec::with_capacity(positions.len() - 1);
        for &pos in positions.iter().filter(|&&pos| pos != kept) {
            keep[pos] = false;
            dropped_indices.push(articles[pos].index);
        }
        duplicates.push(DuplicateSlug {
            slug: articles[kept].slug.clone(),
            kept_index: articles[kept].index,
            dropped_indices,
        });
    }

    duplicates.sort_by_key(|d| d.kept_index);

    let articles = articles
        .into_iter()
        .zip(keep)
        .filter_map(|(article, keep)| keep.then_some(article))
        .collect();

    (articles, duplicates)
}

fn all_indices(dup: &DuplicateSlug) -> Vec<usize> {
    let mut indices = dup.dropped_indices.clone();
    indices.push(dup.kept_index);
    indices.sort_unstable();
    indices
}
