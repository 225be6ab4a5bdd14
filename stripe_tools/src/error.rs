use thiserror::Error;

#[derive(Debug, Error)]
pub enum StripeApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Charge creation failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Invalid currency amount: {0}")]
    InvalidCurrencyAmount(String),
}

#[derive(Debug, Clone, Error)]
pub enum WebhookVerifyError {
    #[error("The signature header is missing or malformed: {0}")]
    MalformedHeader(String),
    #[error("The signature timestamp is outside the allowed tolerance")]
    StaleTimestamp,
    #[error("No signature in the header matches the payload")]
    SignatureMismatch,
}
