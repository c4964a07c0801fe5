//! Error types for loading and validating portfolio content

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `ContentError`.
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors raised while building the content store.
///
/// Content is fixed at build time, so every variant aborts the build.
#[derive(Error, Debug)]
pub enum ContentError {
    /// Two records share a slug.
    #[error("duplicate project slug: {0}")]
    DuplicateSlug(String),

    /// A slug is empty or not URL-safe.
    #[error("invalid project slug {slug:?} (expected something like {suggested:?})")]
    InvalidSlug { slug: String, suggested: String },

    /// A record has an empty title.
    #[error("project {0:?} has an empty title")]
    EmptyTitle(String),

    /// Front-matter could not be parsed.
    #[error("front-matter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },
}

impl ContentError {
    /// Create a front-matter error for a source path.
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }
}
