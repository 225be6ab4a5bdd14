use thiserror::Error;

use crate::db_types::{Charge, ChargeRequest};

/// The upstream payment processor.
///
/// The relay requests one charge per transaction and then waits for the processor's webhook to confirm it. There are
/// no retries here; a failed charge fails the enclosing operation and no ledger record is written.
#[allow(async_fn_in_trait)]
pub trait PaymentProcessor: Clone {
    async fn create_charge(&self, request: ChargeRequest) -> Result<Charge, ProcessorError>;
}

#[derive(Debug, Clone, Error)]
pub enum ProcessorError {
    #[error("The processor rejected the charge: {0}")]
    ChargeFailed(String),
    #[error("The processor could not be reached: {0}")]
    UpstreamError(String),
}
