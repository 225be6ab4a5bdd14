//! In-memory backends.
//!
//! [`MemoryLedger`] is the store of record for a running relay: a lock-guarded vector behind the
//! [`TransactionLedger`] trait, safe under a multithreaded runtime. [`MemoryDirectory`] is a seedable stand-in for
//! the hosted directory, used by tests and local runs.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use log::debug;

use crate::{
    cashback::cashback_for,
    db_types::{Business, BusinessId, NewTransaction, Transaction, TransactionId, TransactionStatus},
    helpers::IdGenerator,
    traits::{BusinessDirectory, DirectoryError, LedgerError, TransactionLedger},
};

#[derive(Clone)]
pub struct MemoryLedger {
    transactions: Arc<RwLock<Vec<Transaction>>>,
    ids: Arc<IdGenerator>,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self { transactions: Arc::new(RwLock::new(Vec::new())), ids: Arc::new(IdGenerator::new()) }
    }

    pub fn len(&self) -> usize {
        self.transactions.read().map(|txs| txs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransactionLedger for MemoryLedger {
    async fn insert_transaction(&self, tx: NewTransaction) -> Result<Transaction, LedgerError> {
        let now = Utc::now();
        let record = Transaction {
            id: self.ids.next_id(),
            buyer_id: tx.buyer_id,
            seller_id: tx.seller_id,
            amount: tx.amount,
            cashback: cashback_for(tx.amount),
            description: tx.description,
            charge_ref: tx.charge_ref,
            status: TransactionStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        let mut txs = self.transactions.write().map_err(|e| LedgerError::StorageError(e.to_string()))?;
        txs.push(record.clone());
        debug!("🧾️ Transaction {} appended to the ledger ({} records)", record.id, txs.len());
        Ok(record)
    }

    async fn fetch_transaction(&self, id: &TransactionId) -> Result<Option<Transaction>, LedgerError> {
        let txs = self.transactions.read().map_err(|e| LedgerError::StorageError(e.to_string()))?;
        Ok(txs.iter().find(|tx| &tx.id == id).cloned())
    }

    async fn fetch_transaction_by_charge_ref(&self, charge_ref: &str) -> Result<Option<Transaction>, LedgerError> {
        let txs = self.transactions.read().map_err(|e| LedgerError::StorageError(e.to_string()))?;
        Ok(txs.iter().find(|tx| tx.charge_ref == charge_ref).cloned())
    }

    async fn fetch_transactions_for_business(&self, id: &BusinessId) -> Result<Vec<Transaction>, LedgerError> {
        let txs = self.transactions.read().map_err(|e| LedgerError::StorageError(e.to_string()))?;
        // Insertion order is creation order, so reverse iteration yields most recent first.
        let result = txs.iter().rev().filter(|tx| &tx.buyer_id == id || &tx.seller_id == id).cloned().collect();
        Ok(result)
    }

    async fn fetch_all_transactions(&self) -> Result<Vec<Transaction>, LedgerError> {
        let txs = self.transactions.read().map_err(|e| LedgerError::StorageError(e.to_string()))?;
        Ok(txs.iter().rev().cloned().collect())
    }

    async fn complete_transaction(&self, id: &TransactionId) -> Result<Transaction, LedgerError> {
        let mut txs = self.transactions.write().map_err(|e| LedgerError::StorageError(e.to_string()))?;
        let tx = txs
            .iter_mut()
            .find(|tx| &tx.id == id)
            .ok_or_else(|| LedgerError::TransactionNotFound(id.clone()))?;
        if tx.status == TransactionStatus::Completed {
            return Err(LedgerError::SettlementNoOp);
        }
        tx.status = TransactionStatus::Completed;
        tx.updated_at = Utc::now();
        Ok(tx.clone())
    }
}

//--------------------------------------   MemoryDirectory   ---------------------------------------------------------

#[derive(Clone, Default)]
pub struct MemoryDirectory {
    businesses: Arc<RwLock<Vec<Business>>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(businesses: Vec<Business>) -> Self {
        Self { businesses: Arc::new(RwLock::new(businesses)) }
    }

    pub fn add_business(&self, business: Business) {
        if let Ok(mut rows) = self.businesses.write() {
            rows.push(business);
        }
    }
}

impl BusinessDirectory for MemoryDirectory {
    async fn fetch_active_businesses(&self) -> Result<Vec<Business>, DirectoryError> {
        let rows = self.businesses.read().map_err(|e| DirectoryError::UpstreamError(e.to_string()))?;
        Ok(rows.iter().filter(|b| b.active).cloned().collect())
    }

    async fn fetch_business(&self, id: &BusinessId) -> Result<Option<Business>, DirectoryError> {
        let rows = self.businesses.read().map_err(|e| DirectoryError::UpstreamError(e.to_string()))?;
        Ok(rows.iter().find(|b| &b.id == id).cloned())
    }
}
