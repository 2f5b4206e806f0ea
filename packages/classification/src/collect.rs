//! Document collection: build the input corpus from a document store.
//!
//! The classification pipeline only requires that something produce a
//! newline-delimited UTF-8 corpus before it starts. [`DocumentSource`]
//! is that seam: list documents, fetch each one's text. A document
//! that fails to download is logged and skipped, never fatal, and
//! workspace-native documents (Google Docs, Sheets, ...) are skipped
//! because they have no plain-text body to download.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::Result;

/// Mime-type prefix of workspace-native documents, which cannot be
/// downloaded as plain text.
pub const WORKSPACE_NATIVE_PREFIX: &str = "application/vnd.google-apps.";

/// Errors from a document source.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Listing the store failed
    #[error("listing failed: {0}")]
    List(String),

    /// Downloading one document failed
    #[error("fetch failed for {id}: {message}")]
    Fetch {
        /// Document identifier
        id: String,
        /// Underlying error message
        message: String,
    },

    /// Local filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for document source operations.
pub type CollectResult<T> = std::result::Result<T, CollectError>;

/// A document available for collection.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    /// Store-specific identifier
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Mime type, used for the workspace-native skip rule
    pub mime_type: String,
}

impl DocumentMeta {
    /// Whether this document is workspace-native and must be skipped.
    pub fn is_workspace_native(&self) -> bool {
        self.mime_type.starts_with(WORKSPACE_NATIVE_PREFIX)
    }
}

/// A store of text documents the collector can enumerate and download.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Enumerate the available documents, in store order.
    async fn list(&self) -> CollectResult<Vec<DocumentMeta>>;

    /// Download one document's full text.
    async fn fetch(&self, id: &str) -> CollectResult<String>;
}

/// What a collection pass did.
#[derive(Debug, Clone)]
pub struct CollectSummary {
    /// Documents whose lines made it into the corpus
    pub documents_read: usize,

    /// Documents skipped (workspace-native or failed to download)
    pub documents_skipped: usize,

    /// Total lines written to the corpus
    pub lines_collected: usize,
}

/// Collect every line of every readable document into a corpus file.
///
/// Lines are aggregated in listing order, one logical line per
/// classifiable unit, and written as newline-delimited UTF-8. The
/// corpus file is replaced wholesale; collection is a fresh snapshot,
/// not an append.
pub async fn collect_lines<S: DocumentSource>(
    source: &S,
    output_path: impl AsRef<Path>,
) -> Result<CollectSummary> {
    let documents = source.list().await?;
    info!(count = documents.len(), "listed documents");

    let mut all_lines: Vec<String> = Vec::new();
    let mut documents_read = 0usize;
    let mut documents_skipped = 0usize;

    for (i, doc) in documents.iter().enumerate() {
        if doc.is_workspace_native() {
            info!(
                "[{}/{}] skipping workspace-native document '{}' ({})",
                i + 1,
                documents.len(),
                doc.name,
                doc.mime_type
            );
            documents_skipped += 1;
            continue;
        }

        match source.fetch(&doc.id).await {
            Ok(contents) => {
                let lines: Vec<String> = contents.lines().map(str::to_string).collect();
                info!(
                    "[{}/{}] collected {} lines from '{}'",
                    i + 1,
                    documents.len(),
                    lines.len(),
                    doc.name
                );
                all_lines.extend(lines);
                documents_read += 1;
            }
            Err(error) => {
                warn!(document = %doc.name, %error, "failed to fetch document, skipping");
                documents_skipped += 1;
            }
        }
    }

    let output_path = output_path.as_ref();
    let mut corpus = all_lines.join("\n");
    if !corpus.is_empty() {
        corpus.push('\n');
    }
    tokio::fs::write(output_path, corpus).await?;

    info!(
        lines = all_lines.len(),
        output = %output_path.display(),
        "corpus written"
    );

    Ok(CollectSummary {
        documents_read,
        documents_skipped,
        lines_collected: all_lines.len(),
    })
}

/// A local directory as a document store: every regular file is one
/// document, in file-name order.
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    /// Create a source over the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DocumentSource for DirSource {
    async fn list(&self) -> CollectResult<Vec<DocumentMeta>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| CollectError::List(format!("{}: {e}", self.dir.display())))?;

        let mut documents = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CollectError::List(e.to_string()))?
        {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            documents.push(DocumentMeta {
                id: entry.path().display().to_string(),
                name: entry.file_name().to_string_lossy().into_owned(),
                mime_type: "text/plain".to_string(),
            });
        }

        documents.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(documents)
    }

    async fn fetch(&self, id: &str) -> CollectResult<String> {
        tokio::fs::read_to_string(id)
            .await
            .map_err(|e| CollectError::Fetch {
                id: id.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_native_detection() {
        let doc = DocumentMeta {
            id: "1".into(),
            name: "sheet".into(),
            mime_type: "application/vnd.google-apps.spreadsheet".into(),
        };
        assert!(doc.is_workspace_native());

        let doc = DocumentMeta {
            id: "2".into(),
            name: "notes.txt".into(),
            mime_type: "text/plain".into(),
        };
        assert!(!doc.is_workspace_native());
    }

    #[tokio::test]
    async fn test_dir_source_lists_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "second\n").unwrap();
        std::fs::write(dir.path().join("a.txt"), "first\n").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let source = DirSource::new(dir.path());
        let documents = source.list().await.unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].name, "a.txt");
        assert_eq!(documents[1].name, "b.txt");
    }

    #[tokio::test]
    async fn test_dir_source_collects_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "three\nfour\n").unwrap();
        std::fs::write(dir.path().join("a.txt"), "one\ntwo\n").unwrap();

        let corpus = dir.path().join("corpus.txt");
        let source = DirSource::new(dir.path());
        let summary = collect_lines(&source, &corpus).await.unwrap();

        assert_eq!(summary.documents_read, 2);
        assert_eq!(summary.lines_collected, 4);
        assert_eq!(
            std::fs::read_to_string(&corpus).unwrap(),
            "one\ntwo\nthree\nfour\n"
        );
    }
}
