//! Common test utilities and helpers

#![allow(dead_code)]

use anyhow::Result;
use article_export::ExportConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const INPUT_FILE: &str = "articles.json";
pub const OUTPUT_DIR: &str = "markdown_files";

/// Test context builder for setting up an export workspace
pub struct TestContextBuilder {
    temp_dir: TempDir,
    input: Option<String>,
    with_output_dir: bool,
    initial_files: Vec<(PathBuf, String)>,
}

impl TestContextBuilder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            input: None,
            with_output_dir: false,
            initial_files: Vec::new(),
        })
    }

    /// Contents of `articles.json`
    pub fn with_input(mut self, json: &str) -> Self {
        self.input = Some(json.to_string());
        self
    }

    /// Create the output directory up front
    pub fn with_output_dir(mut self) -> Self {
        self.with_output_dir = true;
        self
    }

    /// Add an initial file
    pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.initial_files
            .push((path.as_ref().to_path_buf(), content.to_string()));
        self
    }

    pub fn build(self) -> Result<TestContext> {
        let path = self.temp_dir.path();

        if let Some(input) = &self.input {
            fs::write(path.join(INPUT_FILE), input)?;
        }

        if self.with_output_dir {
            fs::create_dir(path.join(OUTPUT_DIR))?;
        }

        for (file_path, content) in self.initial_files {
            let full_path = path.join(file_path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(full_path, content)?;
        }

        Ok(TestContext {
            temp_dir: self.temp_dir,
        })
    }
}

/// Test context that manages temporary directories and cleanup
pub struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path().join(OUTPUT_DIR)
    }

    /// Configuration pointing at this context's input and output
    pub fn config(&self) -> ExportConfig {
        ExportConfig::new(self.path().join(INPUT_FILE), self.output_dir())
    }

    pub fn read_output(&self, slug: &str) -> Result<String> {
        Ok(fs::read_to_string(self.output_dir().join(format!("{slug}.md")))?)
    }

    /// Sorted file names in the output directory
    pub fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.output_dir())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}
