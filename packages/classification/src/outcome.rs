//! Classification outcomes and their recorded forms.
//!
//! A classifier call produces exactly one [`Outcome`]: either a label
//! from the taxonomy, or a typed [`Failure`]. Failures are data, not
//! control flow; each kind has a fixed sentinel string that stands in
//! for a label in the output corpus so a later audit can tell data
//! quality problems apart from transport problems.

/// Sentinel prefix for off-taxonomy responses; the raw response text
/// follows so nothing the classifier said is lost.
pub const INVALID_RESPONSE_PREFIX: &str = "응답_오류: ";

/// Sentinel recorded when a rate-limit retry is exhausted.
pub const RATE_LIMIT_SENTINEL: &str = "Rate_Limit_Error";

/// Sentinel recorded for a remote service error.
pub const API_ERROR_SENTINEL: &str = "API_Error";

/// Sentinel recorded for any other failure.
pub const UNKNOWN_ERROR_SENTINEL: &str = "Unknown_Error";

/// The result of one classification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A label that is a member of the taxonomy, verbatim.
    Label(String),

    /// A typed failure to be retried or recorded.
    Failure(Failure),
}

impl Outcome {
    /// The string recorded in the output corpus: the label verbatim,
    /// or the failure's sentinel.
    pub fn into_recorded_label(self) -> String {
        match self {
            Outcome::Label(label) => label,
            Outcome::Failure(failure) => failure.sentinel(),
        }
    }
}

/// A failed classification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The service answered, but with text outside the taxonomy.
    /// The raw response is preserved for auditing.
    InvalidResponse {
        /// Trimmed response text as returned by the service
        raw: String,
    },

    /// The transport reported throttling.
    RateLimited,

    /// The remote service reported an error.
    Service {
        /// Underlying error message, for operator diagnosis
        message: String,
    },

    /// Anything else that went wrong during the attempt.
    Unknown {
        /// Underlying error message, for operator diagnosis
        message: String,
    },
}

impl Failure {
    /// The sentinel string recorded in place of a label.
    pub fn sentinel(&self) -> String {
        match self {
            Failure::InvalidResponse { raw } => format!("{INVALID_RESPONSE_PREFIX}{raw}"),
            Failure::RateLimited => RATE_LIMIT_SENTINEL.to_string(),
            Failure::Service { .. } => API_ERROR_SENTINEL.to_string(),
            Failure::Unknown { .. } => UNKNOWN_ERROR_SENTINEL.to_string(),
        }
    }
}
