use cbr_common::Money;
use serde::{Deserialize, Serialize};

use crate::db_types::{Business, Transaction};

/// Per-business aggregates. The monetary sums only count `Completed` transactions; the count includes pending ones
/// so a business can see in-flight activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessStats {
    pub transaction_count: usize,
    pub total_cashback_earned: Money,
    pub total_spent: Money,
    pub total_received: Money,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub active_businesses: usize,
    pub completed_transactions: usize,
    pub total_volume: Money,
    pub total_cashback: Money,
    pub average_transaction: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub business: Business,
    pub stats: BusinessStats,
    /// The 10 most recent transactions, newest first.
    pub recent_transactions: Vec<Transaction>,
}
