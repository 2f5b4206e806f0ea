//! The remote classifier seam and its OpenAI implementation.
//!
//! [`Classifier`] abstracts the one capability the pipeline needs:
//! hand it a sentence and a taxonomy, get back exactly one
//! [`Outcome`]. The signature is infallible on purpose. The driver
//! and retry policy branch on outcome data, never on errors, so a
//! single bad line can never abort the batch.

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, OpenAIError};
use tracing::debug;

use crate::outcome::{Failure, Outcome};
use crate::taxonomy::Taxonomy;

/// One-shot sentence classification against a closed label set.
///
/// Implementations perform exactly one remote call per invocation and
/// map every failure mode into a typed [`Outcome::Failure`]. Retries
/// are the caller's job.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify a single sentence into one taxonomy label.
    async fn classify(&self, sentence: &str, taxonomy: &Taxonomy) -> Outcome;
}

/// OpenAI-backed classifier.
///
/// Owns an explicitly constructed [`OpenAIClient`]; there is no
/// process-wide client handle.
pub struct OpenAiClassifier {
    client: OpenAIClient,
    model: String,
}

impl OpenAiClassifier {
    /// Create a classifier over the given client.
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            model: "gpt-4o".to_string(),
        }
    }

    /// Set the chat model (default: gpt-4o).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The system instruction: enumerate the taxonomy in order, demand
    /// a bare single label, and ask for per-token scrutiny including
    /// current internet slang and memes.
    fn system_prompt(taxonomy: &Taxonomy) -> String {
        format!(
            "You are a hate speech classifier. Classify the sentence into exactly one of \
             the {count} labels below and respond with that **single label** only. Do not \
             include any explanation or additional text. Examine the sentence word by word \
             for hateful expressions and pick the best matching label; also account for \
             memes and slang currently circulating in online communities. \
             Label list: [{labels}]",
            count = taxonomy.len(),
            labels = taxonomy.prompt_list(),
        )
    }

    fn map_error(error: OpenAIError) -> Failure {
        match error {
            OpenAIError::RateLimited { .. } => Failure::RateLimited,
            OpenAIError::Api { status, message } => Failure::Service {
                message: format!("{status}: {message}"),
            },
            other => Failure::Unknown {
                message: other.to_string(),
            },
        }
    }
}

#[async_trait]
impl Classifier for OpenAiClassifier {
    async fn classify(&self, sentence: &str, taxonomy: &Taxonomy) -> Outcome {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(Self::system_prompt(taxonomy)))
            .message(Message::user(format!(
                "Sentence to classify: {}",
                sentence.trim()
            )))
            // Deterministic decoding: identical input should converge
            // to the same label across calls.
            .temperature(0.0);

        let response = match self.client.chat_completion(request).await {
            Ok(response) => response,
            Err(error) => return Outcome::Failure(Self::map_error(error)),
        };

        let label = response.content.trim();
        debug!(sentence_len = sentence.len(), label, "classifier response");

        if taxonomy.contains(label) {
            Outcome::Label(label.to_string())
        } else {
            Outcome::Failure(Failure::InvalidResponse {
                raw: label.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_enumerates_labels_in_order() {
        let taxonomy = Taxonomy::new(["여성/가족", "악플/욕설", "clean"]).unwrap();
        let prompt = OpenAiClassifier::system_prompt(&taxonomy);

        assert!(prompt.contains("[여성/가족, 악플/욕설, clean]"));
        assert!(prompt.contains("3 labels"));
        assert!(prompt.contains("single label"));
    }

    #[test]
    fn test_error_mapping() {
        let failure = OpenAiClassifier::map_error(OpenAIError::RateLimited { retry_after: None });
        assert_eq!(failure, Failure::RateLimited);

        let failure = OpenAiClassifier::map_error(OpenAIError::Api {
            status: 500,
            message: "server exploded".into(),
        });
        assert!(matches!(failure, Failure::Service { ref message } if message.contains("500")));

        let failure = OpenAiClassifier::map_error(OpenAIError::Network("connection reset".into()));
        assert!(matches!(failure, Failure::Unknown { .. }));

        let failure = OpenAiClassifier::map_error(OpenAIError::Parse("bad json".into()));
        assert!(matches!(failure, Failure::Unknown { .. }));
    }
}
