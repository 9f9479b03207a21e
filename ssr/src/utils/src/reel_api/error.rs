use consts::GENERATE_REEL_FALLBACK_ERROR;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReelGenError {
    /// Transport failure, including aborted requests
    #[error("{0}")]
    Network(String),
    /// The body was not the JSON shape the page expects
    #[error("{0}")]
    Decode(String),
    /// Non-2xx status with a body that could not be decoded
    #[error("Request failed with status {0}")]
    Status(u16),
    /// The backend answered `success: false`
    #[error("{0}")]
    Rejected(String),
    /// A request URL could not be built from the service base
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl ReelGenError {
    /// Text for the error banner. Never empty.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            GENERATE_REEL_FALLBACK_ERROR.to_string()
        } else {
            msg
        }
    }
}
