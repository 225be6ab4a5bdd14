//! Read-only projections over the ledger and directory.

use std::fmt::Debug;

use cbr_common::Money;
use log::trace;

use crate::{
    cbe_api::{
        errors::RelayError,
        stats_objects::{BusinessStats, Dashboard, NetworkStats},
    },
    db_types::{BusinessId, Transaction, TransactionStatus},
    traits::{BusinessDirectory, TransactionLedger},
};

const DASHBOARD_HISTORY_LEN: usize = 10;

/// The `StatsApi` aggregates ledger records into the dashboard and network views. All methods are pure reads; the
/// aggregates are recomputed from the ledger on every call rather than maintained incrementally.
pub struct StatsApi<L, D> {
    ledger: L,
    directory: D,
}

impl<L, D> Debug for StatsApi<L, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StatsApi")
    }
}

impl<L, D> StatsApi<L, D> {
    pub fn new(ledger: L, directory: D) -> Self {
        Self { ledger, directory }
    }
}

impl<L, D> StatsApi<L, D>
where
    L: TransactionLedger,
    D: BusinessDirectory,
{
    /// Aggregates for one business: the transaction count includes pending records, the monetary sums do not.
    pub async fn business_stats(&self, id: &BusinessId) -> Result<BusinessStats, RelayError> {
        let history = self.ledger.fetch_transactions_for_business(id).await?;
        Ok(stats_from_history(id, &history))
    }

    /// Completed cashback the business has earned as a buyer.
    pub async fn cashback_balance(&self, id: &BusinessId) -> Result<Money, RelayError> {
        let history = self.ledger.fetch_transactions_for_business(id).await?;
        let balance = history
            .iter()
            .filter(|tx| &tx.buyer_id == id && tx.status == TransactionStatus::Completed)
            .map(|tx| tx.cashback)
            .sum();
        Ok(balance)
    }

    /// The full dashboard view: the business record, its aggregates, and its most recent transactions.
    pub async fn dashboard(&self, id: &BusinessId) -> Result<Dashboard, RelayError> {
        let business =
            self.directory.fetch_business(id).await?.ok_or_else(|| RelayError::BusinessNotFound(id.clone()))?;
        let mut history = self.ledger.fetch_transactions_for_business(id).await?;
        let stats = stats_from_history(id, &history);
        history.truncate(DASHBOARD_HISTORY_LEN);
        trace!("📊️ Dashboard for {id}: {} transactions shown", history.len());
        Ok(Dashboard { business, stats, recent_transactions: history })
    }

    /// Network-wide aggregates over completed transactions.
    pub async fn network_stats(&self) -> Result<NetworkStats, RelayError> {
        let active_businesses = self.directory.fetch_active_businesses().await?.len();
        let all = self.ledger.fetch_all_transactions().await?;
        let completed: Vec<&Transaction> = all.iter().filter(|tx| tx.status == TransactionStatus::Completed).collect();
        let total_volume: Money = completed.iter().map(|tx| tx.amount).sum();
        let total_cashback: Money = completed.iter().map(|tx| tx.cashback).sum();
        let average_transaction = match completed.len() {
            0 => Money::default(),
            n => Money::from_cents(total_volume.value() / n as i64),
        };
        Ok(NetworkStats {
            active_businesses,
            completed_transactions: completed.len(),
            total_volume,
            total_cashback,
            average_transaction,
        })
    }
}

fn stats_from_history(id: &BusinessId, history: &[Transaction]) -> BusinessStats {
    let mut stats = BusinessStats { transaction_count: history.len(), ..Default::default() };
    for tx in history.iter().filter(|tx| tx.status == TransactionStatus::Completed) {
        if &tx.buyer_id == id {
            stats.total_cashback_earned = stats.total_cashback_earned + tx.cashback;
            stats.total_spent = stats.total_spent + tx.amount;
        }
        if &tx.seller_id == id {
            stats.total_received = stats.total_received + tx.amount;
        }
    }
    stats
}
