use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestBuildError {
    #[error("Failed to render nutrition schema: {0}")]
    SchemaRender(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Model response is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("Model response does not match the nutrition schema at `{path}`: {reason}")]
    SchemaMismatch {
        field: String,
        path: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Failed to reach the model endpoint: {0}")]
    Connection(String),

    #[error("Model endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response envelope: {0}")]
    Envelope(String),

    #[error("Model response contained no choices")]
    EmptyChoices,

    #[error("Model refused the request: {0}")]
    Refused(String),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Food analysis timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Model returned an unusable result: {0}")]
    InvalidResult(#[from] ExtractionError),

    #[error(transparent)]
    RequestBuild(#[from] RequestBuildError),
}

impl ExtractionError {
    pub fn mismatch(path: impl Into<String>, reason: impl Into<String>) -> Self {
        let path = path.into();
        Self::SchemaMismatch {
            field: leaf_field(&path).to_string(),
            path,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if the error is a schema mismatch.
    pub fn field(&self) -> Option<&str> {
        match self {
            ExtractionError::SchemaMismatch { field, .. } => Some(field),
            ExtractionError::MalformedJson(_) => None,
        }
    }
}

impl AnalysisError {
    /// Every analysis failure can be retried by the user with the same image.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, AnalysisError::RequestBuild(_))
    }
}

/// `ingredients[2].calories` -> `calories`
fn leaf_field(path: &str) -> &str {
    let last = path.rsplit('.').next().unwrap_or(path);
    last.split('[').next().unwrap_or(last)
}
