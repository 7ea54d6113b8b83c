// Failure taxonomy for the interception pipeline. Externally every variant
// collapses into the same fixed response code; the distinction exists for
// the operator log and for tests.

use playlist::PlaylistError;

/// Numeric code attached to every locally-caused rejection, equivalent to
/// HTTP 400. No finer-grained codes are distinguished externally.
pub const BAD_REQUEST_ERROR_CODE: u16 = 400;

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("malformed URL after scheme substitution `{input}`: {reason}")]
    MalformedUrl { input: String, reason: String },

    #[error("transport failure for `{url}`: {reason}")]
    Transport { url: String, reason: String },

    #[error("manifest does not conform to the playlist grammar: {0}")]
    Parse(String),

    #[error("manifest could not be re-encoded: {0}")]
    Serialize(String),
}

impl LoaderError {
    pub fn malformed_url(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedUrl {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn transport(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Code delivered through the loading-request bridge for this failure.
    pub fn response_code(&self) -> u16 {
        BAD_REQUEST_ERROR_CODE
    }
}

impl From<PlaylistError> for LoaderError {
    fn from(err: PlaylistError) -> Self {
        match err {
            PlaylistError::Parse(diagnostic) => Self::Parse(diagnostic),
            PlaylistError::Serialize { source } => Self::Serialize(source.to_string()),
        }
    }
}
