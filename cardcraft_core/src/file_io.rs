// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::error::GenerateError;
use crate::slug::Slug;
use std::path::{Path, PathBuf};

/// Creates `dir` and any missing parents.
pub async fn ensure_dir(dir: &Path) -> Result<(), GenerateError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| GenerateError::fs(dir, e))
}

/// Writes a rendered page to `<pages_dir>/<slug>.html`, replacing any
/// existing page.
///
/// `pages_dir` must already exist.
pub async fn write_page(
    pages_dir: &Path,
    slug: &Slug,
    html: &str,
) -> Result<PathBuf, GenerateError> {
    let path = pages_dir.join(slug.page_file_name());
    tokio::fs::write(&path, html)
        .await
        .map_err(|e| GenerateError::fs(&path, e))?;
    log::info!("Generated {}", path.display());
    Ok(path)
}

/// Writes `contents` to `path`, creating the parent directory if needed.
pub async fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent).await?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| GenerateError::fs(path, e))
}

/// Reads `path` as text, or `None` if it does not exist.
pub async fn read_optional(path: &Path) -> Result<Option<String>, GenerateError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(GenerateError::fs(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_page_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let slug = Slug::new("Inception").unwrap();

        let first = write_page(dir.path(), &slug, "<p>old</p>").await.unwrap();
        let second = write_page(dir.path(), &slug, "<p>new</p>").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, dir.path().join("inception.html"));
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "<p>new</p>");
    }

    #[tokio::test]
    async fn test_write_page_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let slug = Slug::new("Inception").unwrap();
        let pages = dir.path().join("does-not-exist");

        let result = write_page(&pages, &slug, "<p></p>").await;

        assert!(matches!(result, Err(GenerateError::FileSystem { .. })));
        assert!(!pages.exists());
    }

    #[tokio::test]
    async fn test_read_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.json");

        assert_eq!(read_optional(&path).await.unwrap(), None);

        write_file(&path, "[]").await.unwrap();
        assert_eq!(read_optional(&path).await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_write_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("js").join("movie-loader.js");

        write_file(&path, "// loader").await.unwrap();

        assert!(path.exists());
    }
}
