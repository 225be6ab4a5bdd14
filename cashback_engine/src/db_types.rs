use std::{fmt::Display, str::FromStr};

use cbr_common::Money;
use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//--------------------------------------     BusinessId      ---------------------------------------------------------
/// A lightweight wrapper around the directory's business identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessId(pub String);

impl Display for BusinessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for BusinessId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

impl BusinessId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------    TransactionId    ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl FromStr for TransactionId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for TransactionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------      Business       ---------------------------------------------------------
/// A directory row. The directory service owns these records; the relay only ever reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: BusinessId,
    pub name: String,
    pub email: String,
    pub category: String,
    pub location: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------  TransactionStatus  ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// A charge has been requested from the processor but not yet confirmed.
    Pending,
    /// The processor confirmed the charge and the cashback is earned.
    Completed,
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "Pending"),
            TransactionStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid transaction status: {value}. But this conversion cannot fail. Defaulting to Pending");
            TransactionStatus::Pending
        })
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid transaction status: {0}")]
pub struct ConversionError(String);

impl FromStr for TransactionStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Completed" => Ok(Self::Completed),
            s => Err(ConversionError(format!("Invalid transaction status: {s}"))),
        }
    }
}

//--------------------------------------     Transaction     ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub buyer_id: BusinessId,
    pub seller_id: BusinessId,
    pub amount: Money,
    /// Derived from the amount exactly once, when the record is created. Never recomputed.
    pub cashback: Money,
    pub description: String,
    /// The processor's charge identifier. Webhook notifications carry this, not our transaction id.
    pub charge_ref: String,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------    NewTransaction   ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub buyer_id: BusinessId,
    pub seller_id: BusinessId,
    /// The full charge amount, in minor currency units
    pub amount: Money,
    /// A free-form description supplied by the buyer
    pub description: String,
    /// The charge identifier assigned by the payment processor
    pub charge_ref: String,
}

impl NewTransaction {
    pub fn new(buyer_id: BusinessId, seller_id: BusinessId, amount: Money, charge_ref: String) -> Self {
        Self { buyer_id, seller_id, amount, description: String::new(), charge_ref }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }
}

//--------------------------------------       Charge        ---------------------------------------------------------
/// The processor-side handle for a requested charge. The `client_secret` goes back to the paying business so it can
/// complete authorization against the processor directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub charge_ref: String,
    pub client_secret: String,
    pub amount: Money,
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub amount: Money,
    pub currency: String,
    pub buyer_id: BusinessId,
    pub seller_id: BusinessId,
    pub description: String,
}
