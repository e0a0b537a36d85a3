// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use std::path::PathBuf;

/// Problems with the generator's configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required but was not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Problems turning a template into a document.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("placeholder opened at byte {offset} is never closed")]
    Unterminated { offset: usize },

    #[error("invalid placeholder name '{0}'")]
    InvalidPlaceholder(String),

    #[error("no value bound for placeholder '{0}'")]
    MissingBinding(String),
}

/// Problems fetching a poster image.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("writing {} failed: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything that can stop a movie page from being generated.
///
/// Nothing is retried; each variant aborts the current title.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("title '{title}' does not produce a usable slug")]
    InvalidTitle { title: String },

    #[error("movie lookup failed: {message}")]
    NotFound { message: String },

    #[error("metadata request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("poster download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("file system error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),
}

impl GenerateError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}
