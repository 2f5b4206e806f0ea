//! Line-by-line text classification over a remote LLM classifier.
//!
//! Drives a corpus of free-text lines, one at a time, through an
//! unreliable remote classifier and records one result per line in an
//! append-safe CSV. The design is built around two rules:
//!
//! - **Failures are data.** The classifier seam returns a tagged
//!   [`Outcome`], never an error; per-line failures become sentinel
//!   records in the output corpus and the batch continues.
//! - **Progress is durable.** Every record is flushed before the next
//!   line starts, so a crash after N records leaves a valid file with
//!   exactly those N records.
//!
//! # Usage
//!
//! ```rust,ignore
//! use classification::{driver, OpenAiClassifier, RunConfig, Taxonomy};
//! use openai_client::OpenAIClient;
//!
//! let taxonomy = Taxonomy::korean_hate_speech();
//! let classifier = OpenAiClassifier::new(OpenAIClient::from_env()?);
//! let summary = driver::run(
//!     "collected_lines.txt",
//!     "classified_results.csv",
//!     &taxonomy,
//!     &classifier,
//!     &RunConfig::new(),
//! )
//! .await?;
//! ```
//!
//! # Modules
//!
//! - [`taxonomy`] - The closed label vocabulary
//! - [`classifier`] - Remote classifier seam + OpenAI implementation
//! - [`policy`] - Bounded retry on throttling, record everything else
//! - [`driver`] - The sequential batch loop
//! - [`output`] - Append-safe CSV result writer
//! - [`collect`] - Document-store collector that builds the input corpus
//! - [`testing`] - Mock implementations for tests

pub mod classifier;
pub mod collect;
pub mod driver;
pub mod error;
pub mod outcome;
pub mod output;
pub mod policy;
pub mod taxonomy;
pub mod testing;

// Re-export core types at crate root
pub use classifier::{Classifier, OpenAiClassifier};
pub use collect::{
    collect_lines, CollectError, CollectSummary, DirSource, DocumentMeta, DocumentSource,
};
pub use driver::{run, RunConfig, RunSummary};
pub use error::{PipelineError, Result};
pub use outcome::{Failure, Outcome};
pub use output::ResultWriter;
pub use policy::{Decision, RetryPolicy};
pub use taxonomy::Taxonomy;
