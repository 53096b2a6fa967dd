//! Error type for the client's network and setup layers.
//!
//! ERROR HANDLING
//! ==============
//! `ClientError` never reaches a UI controller. The session layer folds it
//! into `SessionResult::Failed`, the multipart interceptor into an
//! `InterceptOutcome`, and browser setup into a log record.

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No response was reachable (DNS, refused connection, aborted fetch).
    #[error("transport error: {0}")]
    Transport(String),
    /// A response arrived but its body could not be read or decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid client config: {0}")]
    Config(#[source] serde_json::Error),
    /// A browser API call failed while preparing a request.
    #[error("dom error: {0}")]
    Dom(String),
}
