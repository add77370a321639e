// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
pub enum FetchError {
    Io { id: String, source: std::io::Error },
    NotFound { id: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Io { id, source } => write!(f, "failed to read '{}': {}", id, source),
            FetchError::NotFound { id } => write!(f, "no resource named '{}'", id),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Io { source, .. } => Some(source),
            FetchError::NotFound { .. } => None,
        }
    }
}

/// Somewhere mesh text comes from. Resolves once with the whole document.
#[allow(async_fn_in_trait)]
pub trait TextSource {
    async fn fetch(&self, id: &str) -> Result<String, FetchError>;
}

/// Reads ids as paths relative to a base directory.
pub struct FileSource {
    base_dir: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self { base_dir: base_dir.into() }
    }
}

impl TextSource for FileSource {
    async fn fetch(&self, id: &str) -> Result<String, FetchError> {
        let path = self.base_dir.join(id);
        log::info!("Reading mesh text from: {}.", path.display());
        fs::read_to_string(&path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => FetchError::NotFound { id: id.to_string() },
            _ => FetchError::Io { id: id.to_string(), source: err },
        })
    }
}

/// Named in-memory documents.
#[derive(Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document<S: Into<String>, T: Into<String>>(mut self, id: S, text: T) -> Self {
        self.insert(id, text);
        self
    }

    pub fn insert<S: Into<String>, T: Into<String>>(&mut self, id: S, text: T) {
        self.documents.insert(id.into(), text.into());
    }
}

impl TextSource for MemorySource {
    async fn fetch(&self, id: &str) -> Result<String, FetchError> {
        self.documents.get(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound { id: id.to_string() })
    }
}
