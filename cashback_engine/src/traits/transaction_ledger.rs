use thiserror::Error;

use crate::db_types::{BusinessId, NewTransaction, Transaction, TransactionId};

/// The store of record for relayed transactions.
///
/// The ledger is append-only: records are inserted as `Pending` and the only mutation ever applied is the
/// `Pending` → `Completed` transition. Nothing is deleted or pruned.
#[allow(async_fn_in_trait)]
pub trait TransactionLedger: Clone {
    /// Appends a new transaction to the ledger.
    ///
    /// The ledger assigns the id and timestamps, computes the cashback from the amount, and sets the status to
    /// `Pending`. The cashback on the returned record is final; it is never recomputed.
    async fn insert_transaction(&self, tx: NewTransaction) -> Result<Transaction, LedgerError>;

    /// Fetches a transaction by its ledger id. Returns `None` if no such transaction exists.
    async fn fetch_transaction(&self, id: &TransactionId) -> Result<Option<Transaction>, LedgerError>;

    /// Fetches the transaction holding the given processor charge reference, if any.
    async fn fetch_transaction_by_charge_ref(&self, charge_ref: &str) -> Result<Option<Transaction>, LedgerError>;

    /// Fetches every transaction the business participates in, as buyer or seller, most recent first.
    async fn fetch_transactions_for_business(&self, id: &BusinessId) -> Result<Vec<Transaction>, LedgerError>;

    /// Fetches the entire ledger, most recent first.
    async fn fetch_all_transactions(&self) -> Result<Vec<Transaction>, LedgerError>;

    /// Marks a pending transaction as completed and returns the updated record.
    ///
    /// If the transaction is already `Completed`, nothing is changed and [`LedgerError::SettlementNoOp`] is
    /// returned. Callers that want idempotent settlement map that error back to success.
    async fn complete_transaction(&self, id: &TransactionId) -> Result<Transaction, LedgerError>;
}

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("The requested transaction {0} does not exist")]
    TransactionNotFound(TransactionId),
    #[error("The requested settlement would result in a no-op.")]
    SettlementNoOp,
    #[error("The ledger storage failed: {0}")]
    StorageError(String),
}
