use thiserror::Error;

/// Failure of a Shipment Service call. Every variant is terminal for the
/// attempt: nothing is retried automatically.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No auth token available")]
    Unauthenticated,

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Generic message shown to the user. Details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "Your session has expired. Please sign in again.",
            ApiError::Status { status, .. } if *status == 401 || *status == 403 => {
                "Your session has expired. Please sign in again."
            }
            _ => "Something went wrong while saving the shipment. Please try again.",
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
