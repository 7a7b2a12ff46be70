use crate::harness::Verb;

/// Harness-wide Result type
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Errors that stop a scenario or a fixture helper.
///
/// API error responses are not represented here: a 4xx/5xx from the server is
/// an ordinary outcome that checkers assert on (see `client::ApiError`).
#[derive(thiserror::Error, Debug)]
pub enum HarnessError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failures (connection refused, TLS, timeout)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request body serialization or response decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Login rejected or no session cookie returned
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A symbolic reference could not be turned into an id
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// Method bucket that does not map to a known verb
    #[error("Unsupported method bucket: {0}")]
    UnsupportedVerb(String),

    /// Verb the resource has no client operation for
    #[error("{resource} does not support {verb}")]
    UnsupportedOperation { resource: &'static str, verb: Verb },

    /// Operation needs an entity id but the scenario declared none
    #[error("{0} requires an endpoint id")]
    MissingEndpoint(&'static str),

    /// Header value that cannot be sent on the wire
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Lifecycle helper found residual or malformed server state
    #[error("Fixture error: {0}")]
    Fixture(String),
}

// Helper functions for common error scenarios
impl HarnessError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        HarnessError::Configuration(msg.into())
    }

    pub fn lookup(msg: impl Into<String>) -> Self {
        HarnessError::Lookup(msg.into())
    }

    pub fn fixture(msg: impl Into<String>) -> Self {
        HarnessError::Fixture(msg.into())
    }

    pub fn unsupported(resource: &'static str, verb: Verb) -> Self {
        HarnessError::UnsupportedOperation { resource, verb }
    }

    /// Collapse a list of fixture problems into a single error, if any.
    pub fn from_problems(problems: Vec<String>) -> Result<()> {
        if problems.is_empty() {
            Ok(())
        } else {
            Err(HarnessError::Fixture(problems.join("; ")))
        }
    }
}
