//! Document applicability filtering.
//!
//! A selector determines which open documents the client/server pairing
//! attaches to. The shim registers a single glob, [`DOCUMENT_GLOB`], so only
//! `.faang` sources are handled.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use thiserror::Error;

/// Glob pattern selecting faang source documents.
pub const DOCUMENT_GLOB: &str = "**/*.faang";

/// Filter determining which open documents a client instance applies to.
#[derive(Debug, Clone)]
pub struct DocumentSelector {
    patterns: Vec<String>,
    set: GlobSet,
}

impl DocumentSelector {
    /// Compiles a selector from glob patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self, SelectorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let glob = Glob::new(pattern).map_err(|source| SelectorError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|source| SelectorError::Build { source })?;
        Ok(Self { patterns, set })
    }

    /// Selector covering faang source documents (`**/*.faang`).
    pub fn faang_documents() -> Result<Self, SelectorError> {
        Self::new([DOCUMENT_GLOB])
    }

    /// Whether the given document path is covered by the selector.
    #[must_use]
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        self.set.is_match(path)
    }

    /// Patterns the selector was compiled from.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        self.patterns.as_slice()
    }
}

/// Errors raised while compiling a document selector.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// A glob pattern did not parse.
    #[error("invalid document selector pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern that failed to parse.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: globset::Error,
    },

    /// The compiled pattern set could not be built.
    #[error("failed to build document selector: {source}")]
    Build {
        /// Underlying glob error.
        #[source]
        source: globset::Error,
    },
}
