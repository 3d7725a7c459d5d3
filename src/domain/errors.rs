use thiserror::Error;

/// An operation was invoked in a state that does not accept it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("{operation} is not allowed in the {state} state")]
    NotAllowed {
        operation: &'static str,
        state: &'static str,
    },
}

/// Why a scoring request produced no usable recommendation.
///
/// Never reaches the view: the client logs it and answers with the
/// fallback recommendation instead.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("scoring service unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("scoring request timed out")]
    Timeout,

    #[error("scoring service answered with status {0}")]
    Status(u16),

    #[error("malformed scoring response: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ScoringError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ScoringError::Timeout
        } else {
            ScoringError::Transport(error)
        }
    }
}

pub type TransitionResult<T> = Result<T, TransitionError>;
