use thiserror::Error;

/// Failures while reading or writing persisted page state.
///
/// None of these ever reach the page: callers log them and carry on as if
/// no state had been stored.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("storage rejected write for key `{key}`: {reason}")]
    WriteRejected { key: String, reason: String },

    #[error("storage read failed for key `{key}`: {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("stored state is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid page configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
