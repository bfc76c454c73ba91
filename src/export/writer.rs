//! Filesystem side of the export

use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use super::records::ArticleFile;
use crate::error::{ExportError, ExportResult};

/// Create the output directory if it does not exist yet
///
/// Creation is not recursive: the parent directory must already exist.
pub async fn ensure_output_dir(dir: &Path) -> ExportResult<()> {
    if is_dir(dir).await {
        return Ok(());
    }

    match fs::create_dir(dir).await {
        Ok(()) => {
            debug!("Created output directory {}", dir.display());
            Ok(())
        }
        // Lost a race with another creator
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if is_dir(dir).await {
                Ok(())
            } else {
                Err(ExportError::CreateOutputDir {
                    path: dir.to_path_buf(),
                    source: e,
                })
            }
        }
        Err(source) => Err(ExportError::CreateOutputDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_dir())
}

/// Write one article's body verbatim to `{dir}/{slug}.md`
pub async fn write_article(dir: &Path, article: &ArticleFile) -> ExportResult<PathBuf> {
    if !is_plain_file_stem(&article.slug) {
        return Err(ExportError::UnsafeSlug {
            slug: article.slug.clone(),
        });
    }

    let path = dir.join(&article.file_name);
    fs::write(&path, article.body.as_bytes())
        .await
        .map_err(|source| ExportError::WriteFile {
            slug: article.slug.clone(),
            path: path.clone(),
            source,
        })?;

    info!("Markdown file created: {}", path.display());
    Ok(path)
}

/// A slug is usable only if it names a single entry inside the output dir
///
/// Backslash is a separator only on Windows; elsewhere it is an ordinary
/// file name character.
pub fn is_plain_file_stem(slug: &str) -> bool {
    if slug.is_empty() || slug.contains(['/', '\0']) {
        return false;
    }
    if cfg!(windows) && slug.contains('\\') {
        return false;
    }
    let mut components = Path::new(slug).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
