use thiserror::Error;

use crate::db_types::{Business, BusinessId};

/// Read-only access to the business directory.
///
/// The directory is owned by an external service; the relay never creates or mutates its rows.
#[allow(async_fn_in_trait)]
pub trait BusinessDirectory: Clone {
    /// Fetches all businesses currently marked active.
    async fn fetch_active_businesses(&self) -> Result<Vec<Business>, DirectoryError>;

    /// Fetches a business by id, active or not. Returns `None` if the id is unknown. Callers that require an active
    /// participant must check the `active` flag themselves.
    async fn fetch_business(&self, id: &BusinessId) -> Result<Option<Business>, DirectoryError>;
}

#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("The directory service could not be reached: {0}")]
    UpstreamError(String),
    #[error("The directory returned a response we could not interpret: {0}")]
    InvalidResponse(String),
}
