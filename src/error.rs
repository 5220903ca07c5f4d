use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Request error: {0}")]
    RequestError(#[source] BoxError),
    #[error("Unexpected status code: {status}, response: {body}")]
    ResponseError { status: u16, body: String },
    #[error("Decode error: {0}")]
    DecodeError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Polling stopped before reaching a stop condition")]
    PollingCancelled,
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        PaymentError::RequestError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
