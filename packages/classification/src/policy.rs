//! Retry/backoff policy for classification failures.
//!
//! Retries are reserved for the one failure kind whose recovery is
//! mechanical and bounded: throttling. Everything else is recorded as
//! a sentinel and the batch moves on, so one bad line never blocks
//! the rest of the corpus.

use std::time::Duration;

use crate::outcome::Failure;

/// Default cool-down before re-attempting a rate-limited sentence.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(20);

/// What the driver should do with a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Pause for the cool-down, then classify the same sentence once
    /// more. Applies at most once per line; a second consecutive
    /// failure is recorded.
    RetryAfterCooldown,

    /// Record the failure's sentinel and advance to the next line.
    Record,
}

/// Decides, per failure kind, between a bounded retry and a terminal
/// sentinel.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    cooldown: Duration,
}

impl RetryPolicy {
    /// Policy with the default 20 s cool-down.
    pub fn new() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN,
        }
    }

    /// Override the cool-down interval.
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// How long to pause before a retry.
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Classify a failure as retryable or terminal.
    ///
    /// Only [`Failure::RateLimited`] is retryable. An off-taxonomy
    /// response is a data-quality signal, not a transport fault, and
    /// is recorded immediately with its raw text.
    pub fn decide(&self, failure: &Failure) -> Decision {
        match failure {
            Failure::RateLimited => Decision::RetryAfterCooldown,
            Failure::InvalidResponse { .. } | Failure::Service { .. } | Failure::Unknown { .. } => {
                Decision::Record
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
