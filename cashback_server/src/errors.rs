use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use cashback_engine::{
    traits::{DirectoryError, LedgerError},
    RelayError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    /// The original API reports missing records on its POST and GET surfaces as 400s, so this maps to BAD_REQUEST
    /// rather than NOT_FOUND.
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("An upstream service could not process the request.")]
    UpstreamFailure(String),
    #[error("Webhook signature invalid or not provided.")]
    InvalidSignature,
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NoRecordFound(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidSignature => StatusCode::UNAUTHORIZED,
            Self::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<RelayError> for ServerError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::InvalidAmount(_) => Self::InvalidRequestBody(e.to_string()),
            RelayError::BusinessNotFound(_) => Self::NoRecordFound(e.to_string()),
            RelayError::TransactionNotFound(_) => Self::NoRecordFound(e.to_string()),
            // Upstream detail stays in the server logs; the client gets the generic message.
            RelayError::ChargeFailed(detail) => Self::UpstreamFailure(detail),
            RelayError::DirectoryError(e) => Self::UpstreamFailure(e.to_string()),
            RelayError::LedgerError(e) => Self::BackendError(e.to_string()),
        }
    }
}

impl From<DirectoryError> for ServerError {
    fn from(e: DirectoryError) -> Self {
        Self::UpstreamFailure(e.to_string())
    }
}

impl From<LedgerError> for ServerError {
    fn from(e: LedgerError) -> Self {
        Self::BackendError(e.to_string())
    }
}
