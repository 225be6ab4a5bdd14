use cbr_common::Money;
use thiserror::Error;

use crate::{
    db_types::{BusinessId, TransactionId},
    traits::{DirectoryError, LedgerError, ProcessorError},
};

#[derive(Debug, Clone, Error)]
pub enum RelayError {
    #[error("The charge amount must be strictly positive, got {0}")]
    InvalidAmount(Money),
    #[error("Business {0} does not exist or is not active")]
    BusinessNotFound(BusinessId),
    #[error("The payment processor did not create the charge: {0}")]
    ChargeFailed(String),
    #[error("The requested transaction {0} does not exist")]
    TransactionNotFound(TransactionId),
    #[error("Ledger error: {0}")]
    LedgerError(#[from] LedgerError),
    #[error("Directory error: {0}")]
    DirectoryError(#[from] DirectoryError),
}

impl From<ProcessorError> for RelayError {
    fn from(e: ProcessorError) -> Self {
        RelayError::ChargeFailed(e.to_string())
    }
}
