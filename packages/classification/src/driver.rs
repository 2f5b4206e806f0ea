//! The batch driver: corpus in, labeled corpus out.
//!
//! Strictly sequential. One remote call in flight at a time, one
//! record appended and flushed per non-blank input line before the
//! next line starts, so output order mirrors input order exactly and
//! killing the process between lines loses at most the line in
//! flight.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::classifier::Classifier;
use crate::error::{PipelineError, Result};
use crate::outcome::Outcome;
use crate::output::ResultWriter;
use crate::policy::{Decision, RetryPolicy};
use crate::taxonomy::Taxonomy;

/// Default pause between consecutive classification requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(500);

/// Default length of the sentence preview in progress logs.
pub const DEFAULT_PREVIEW_CHARS: usize = 30;

/// Tuning knobs for a pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Pause between requests, to stay under the service's rate ceiling
    pub request_delay: Duration,

    /// Retry policy applied to classification failures
    pub policy: RetryPolicy,

    /// Max characters of the sentence shown in progress logs
    pub preview_chars: usize,
}

impl RunConfig {
    /// Defaults: 500 ms between requests, 20 s rate-limit cool-down.
    pub fn new() -> Self {
        Self {
            request_delay: DEFAULT_REQUEST_DELAY,
            policy: RetryPolicy::new(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    /// Set the inter-request delay.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Set the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the progress preview length.
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What a completed run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Non-blank lines classified and recorded
    pub lines_processed: usize,

    /// Where the output corpus was written
    pub output_path: PathBuf,
}

/// Classify every non-blank line of `input_path` into `output_path`.
///
/// Fails fast with [`PipelineError::MissingInput`] when the input
/// corpus does not exist; no output file is created in that case.
/// Everything after that point is per-line and non-fatal: failures
/// become sentinel records and the batch continues.
pub async fn run<C: Classifier>(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    taxonomy: &Taxonomy,
    classifier: &C,
    config: &RunConfig,
) -> Result<RunSummary> {
    let input_path = input_path.as_ref();
    if !input_path.exists() {
        return Err(PipelineError::MissingInput {
            path: input_path.to_path_buf(),
        });
    }

    let contents = tokio::fs::read_to_string(input_path).await?;
    let lines: Vec<&str> = contents.lines().collect();
    let total_lines = lines.len();

    info!(input = %input_path.display(), total_lines, "starting classification");

    let mut writer = ResultWriter::open(output_path)?;
    let mut processed = 0usize;

    for (i, line) in lines.iter().enumerate() {
        let sentence = line.trim();
        if sentence.is_empty() {
            continue;
        }

        let outcome = classify_with_retry(classifier, sentence, taxonomy, &config.policy).await;
        let label = outcome.into_recorded_label();

        writer.append(sentence, &label)?;
        processed += 1;

        info!(
            "[{}/{}] '{}' -> {}",
            i + 1,
            total_lines,
            preview(sentence, config.preview_chars),
            label
        );

        sleep(config.request_delay).await;
    }

    let output_path = writer.finish()?;
    info!(
        lines_processed = processed,
        output = %output_path.display(),
        "classification complete"
    );

    Ok(RunSummary {
        lines_processed: processed,
        output_path,
    })
}

/// One classification attempt plus at most one policy-driven retry.
///
/// Whatever the second attempt returns is terminal; a retry that is
/// rate-limited again records `Rate_Limit_Error` instead of looping.
async fn classify_with_retry<C: Classifier>(
    classifier: &C,
    sentence: &str,
    taxonomy: &Taxonomy,
    policy: &RetryPolicy,
) -> Outcome {
    let outcome = classifier.classify(sentence, taxonomy).await;

    let failure = match &outcome {
        Outcome::Label(_) => return outcome,
        Outcome::Failure(failure) => failure,
    };

    match policy.decide(failure) {
        Decision::Record => {
            warn!(?failure, "recording failure sentinel");
            outcome
        }
        Decision::RetryAfterCooldown => {
            warn!(cooldown_secs = policy.cooldown().as_secs(), "rate limited, retrying once");
            sleep(policy.cooldown()).await;
            let retried = classifier.classify(sentence, taxonomy).await;
            if let Outcome::Failure(failure) = &retried {
                warn!(?failure, "retry failed, recording sentinel");
            }
            retried
        }
    }
}

/// First `max_chars` characters of a sentence, char-boundary safe,
/// with an ellipsis when truncated.
fn preview(sentence: &str, max_chars: usize) -> String {
    if sentence.chars().count() <= max_chars {
        return sentence.to_string();
    }
    let truncated: String = sentence.chars().take(max_chars).collect();
    format!("{truncated}...")
}
