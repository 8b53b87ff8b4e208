use crate::llm::extract::ExtractError;

/// Error taxonomy for the quiz pipeline and its HTTP surface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed ingest payload; surfaces as a 4xx response.
    #[error("invalid message: {0}")]
    Validation(String),
    /// Generation backend unreachable, rate-limited or replied with no
    /// usable text.
    #[error("generation backend error: {0}")]
    Generation(String),
    /// The model's quiz reply was not valid JSON or was missing required
    /// keys after cleanup.
    #[error("malformed quiz payload: {0}")]
    MalformedQuizPayload(#[from] ExtractError),
    /// Local read/write failure in the primary store.
    #[error("storage error: {0}")]
    Storage(anyhow::Error),
}
