use thiserror::Error;

/// Failure kinds surfaced by the hosted inference endpoint. Each kind gets
/// its own user-facing message; the UI never collapses them into a generic
/// failure.
#[derive(Debug, Clone, Error)]
pub enum InferenceError {
    #[error("could not reach the inference endpoint: {0}")]
    Network(String),

    #[error("the model is still loading on the inference host; try again shortly")]
    ModelLoading,

    #[error("the inference endpoint is rate limiting requests; add an API token or wait")]
    RateLimited,

    #[error("the model response could not be parsed: {0}")]
    MalformedResponse(String),
}
