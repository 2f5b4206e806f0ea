//! Testing utilities including mock implementations.
//!
//! Useful for testing pipeline logic without making real LLM or
//! network calls.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::classifier::Classifier;
use crate::collect::{CollectError, CollectResult, DocumentMeta, DocumentSource};
use crate::outcome::Outcome;
use crate::taxonomy::Taxonomy;

/// A mock classifier returning scripted outcomes.
///
/// Per-sentence outcomes take priority; otherwise outcomes are popped
/// from an ordered queue (handy for retry sequences); otherwise every
/// sentence is labeled `clean`. All calls are recorded for assertions.
#[derive(Default)]
pub struct MockClassifier {
    /// Scripted outcomes by sentence
    by_sentence: Arc<RwLock<HashMap<String, Outcome>>>,

    /// Ordered fallback outcomes, consumed one per call
    queue: Arc<RwLock<VecDeque<Outcome>>>,

    /// Sentences classified, in call order
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockClassifier {
    /// Create a mock that labels everything `clean`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script an outcome for a specific sentence.
    pub fn with_outcome(self, sentence: impl Into<String>, outcome: Outcome) -> Self {
        self.by_sentence
            .write()
            .unwrap()
            .insert(sentence.into(), outcome);
        self
    }

    /// Push an outcome onto the fallback queue.
    pub fn with_queued(self, outcome: Outcome) -> Self {
        self.queue.write().unwrap().push_back(outcome);
        self
    }

    /// Sentences classified so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of classify calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, sentence: &str, _taxonomy: &Taxonomy) -> Outcome {
        self.calls.write().unwrap().push(sentence.to_string());

        if let Some(outcome) = self.by_sentence.read().unwrap().get(sentence) {
            return outcome.clone();
        }
        if let Some(outcome) = self.queue.write().unwrap().pop_front() {
            return outcome;
        }
        Outcome::Label("clean".to_string())
    }
}

/// An in-memory document store for collector tests.
#[derive(Default)]
pub struct MockSource {
    documents: Vec<DocumentMeta>,
    contents: HashMap<String, String>,
    failing: Vec<String>,
}

impl MockSource {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain-text document.
    pub fn with_document(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        let id = id.into();
        self.documents.push(DocumentMeta {
            id: id.clone(),
            name: name.into(),
            mime_type: "text/plain".to_string(),
        });
        self.contents.insert(id, contents.into());
        self
    }

    /// Add a workspace-native document (no downloadable body).
    pub fn with_native_document(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.documents.push(DocumentMeta {
            id: id.into(),
            name: name.into(),
            mime_type: "application/vnd.google-apps.document".to_string(),
        });
        self
    }

    /// Add a document whose download always fails.
    pub fn with_failing_document(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        self.documents.push(DocumentMeta {
            id: id.clone(),
            name: name.into(),
            mime_type: "text/plain".to_string(),
        });
        self.failing.push(id);
        self
    }
}

#[async_trait]
impl DocumentSource for MockSource {
    async fn list(&self) -> CollectResult<Vec<DocumentMeta>> {
        Ok(self.documents.clone())
    }

    async fn fetch(&self, id: &str) -> CollectResult<String> {
        if self.failing.iter().any(|f| f == id) {
            return Err(CollectError::Fetch {
                id: id.to_string(),
                message: "simulated download failure".to_string(),
            });
        }
        self.contents
            .get(id)
            .cloned()
            .ok_or_else(|| CollectError::Fetch {
                id: id.to_string(),
                message: "unknown document".to_string(),
            })
    }
}
