use cashback_engine::db_types::{Business, BusinessId, Charge, Transaction, TransactionId};
use cbr_common::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTransactionRequest {
    pub buyer_id: BusinessId,
    pub seller_id: BusinessId,
    /// Minor currency units.
    pub amount: Money,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTransactionResponse {
    pub transaction: Transaction,
    pub payment_intent: Charge,
    pub cashback_amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmCashbackRequest {
    pub transaction_id: TransactionId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessBalanceResponse {
    pub business: Business,
    pub cashback_balance: Money,
}

/// Webhook deliveries are always acknowledged with this body once the signature verifies, so the processor does not
/// retry events the relay has chosen to ignore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

impl WebhookAck {
    pub fn ok() -> Self {
        Self { received: true }
    }
}
