//! Reads the source document into memory

use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::error::{ExportError, ExportResult};

/// Read the whole input document as UTF-8 text
pub async fn load_input(path: &Path) -> ExportResult<String> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| ExportError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}
