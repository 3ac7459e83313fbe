use thiserror::Error;

/// Failures a provider can report for a tree fetch or a handler call.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider refused or failed the request.
    #[error("Provider rejected request: {0}")]
    Rejected(String),

    /// The provider answered with a payload that is not a valid tree/state.
    #[error("Failed to decode provider payload: {0}")]
    Decode(String),

    /// The provider did not answer in time.
    #[error("Provider timed out after {millis}ms")]
    Timeout { millis: u64 },

    /// The provider call panicked before answering.
    #[error("Provider call panicked")]
    Panicked,
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}

impl ProviderError {
    /// Short machine-readable tag for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            ProviderError::Rejected(_) => "rejected",
            ProviderError::Decode(_) => "decode",
            ProviderError::Timeout { .. } => "timeout",
            ProviderError::Panicked => "panicked",
        }
    }
}
