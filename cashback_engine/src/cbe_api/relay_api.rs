use std::fmt::Debug;

use cbr_common::{Money, DEFAULT_CURRENCY_CODE};
use log::*;

use crate::{
    cbe_api::errors::RelayError,
    db_types::{BusinessId, Charge, ChargeRequest, NewTransaction, Transaction, TransactionId},
    traits::{BusinessDirectory, LedgerError, PaymentProcessor, TransactionLedger},
};

/// `RelayApi` is the primary API for moving money through the network: it validates the participants, requests the
/// charge from the processor, records the transaction, and settles it when confirmation arrives.
pub struct RelayApi<L, D, P> {
    ledger: L,
    directory: D,
    processor: P,
}

impl<L, D, P> Debug for RelayApi<L, D, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RelayApi")
    }
}

impl<L, D, P> RelayApi<L, D, P> {
    pub fn new(ledger: L, directory: D, processor: P) -> Self {
        Self { ledger, directory, processor }
    }
}

impl<L, D, P> RelayApi<L, D, P>
where
    L: TransactionLedger,
    D: BusinessDirectory,
    P: PaymentProcessor,
{
    /// Relay a new transaction from `buyer` to `seller`.
    ///
    /// Both participants must resolve in the directory and be active, and the amount must be strictly positive.
    /// Only once those checks pass is a charge requested from the processor; only once the charge exists is a
    /// `Pending` record appended to the ledger, so a failure at any step leaves the ledger untouched.
    ///
    /// There is no deduplication across calls. Submitting the same purchase twice creates two charges; the webhook
    /// settles whichever ones the processor confirms.
    pub async fn create_transaction(
        &self,
        buyer_id: &BusinessId,
        seller_id: &BusinessId,
        amount: Money,
        description: &str,
    ) -> Result<(Transaction, Charge), RelayError> {
        if !amount.is_positive() {
            warn!("💸️ Rejecting transaction from {buyer_id} for non-positive amount {amount}");
            return Err(RelayError::InvalidAmount(amount));
        }
        let buyer = self.fetch_active_participant(buyer_id).await?;
        let seller = self.fetch_active_participant(seller_id).await?;
        trace!("💸️ Participants resolved: {} -> {}", buyer.name, seller.name);
        let request = ChargeRequest {
            amount,
            currency: DEFAULT_CURRENCY_CODE.to_string(),
            buyer_id: buyer_id.clone(),
            seller_id: seller_id.clone(),
            description: description.to_string(),
        };
        let charge = self.processor.create_charge(request).await.map_err(|e| {
            warn!("💸️ Charge for {amount} from {buyer_id} failed: {e}");
            RelayError::from(e)
        })?;
        let tx = NewTransaction::new(buyer_id.clone(), seller_id.clone(), amount, charge.charge_ref.clone())
            .with_description(description);
        let tx = self.ledger.insert_transaction(tx).await?;
        info!("💸️ Transaction {} created. {} pays {} {amount}, cashback {}", tx.id, buyer_id, seller_id, tx.cashback);
        Ok((tx, charge))
    }

    async fn fetch_active_participant(&self, id: &BusinessId) -> Result<crate::db_types::Business, RelayError> {
        let business = self.directory.fetch_business(id).await?;
        match business {
            Some(b) if b.active => Ok(b),
            Some(_) => {
                warn!("💸️ Business {id} is inactive and cannot transact");
                Err(RelayError::BusinessNotFound(id.clone()))
            },
            None => Err(RelayError::BusinessNotFound(id.clone())),
        }
    }

    /// Settle the transaction holding the given processor charge reference.
    ///
    /// Webhook deliveries arrive at least once and may mention charges the relay never created, so both repeats and
    /// unknown references are benign: an unknown reference returns `Ok(None)` and an already-settled transaction is
    /// returned unchanged.
    pub async fn settle_charge(&self, charge_ref: &str) -> Result<Option<Transaction>, RelayError> {
        let Some(tx) = self.ledger.fetch_transaction_by_charge_ref(charge_ref).await? else {
            debug!("🔔️ No ledger record for charge {charge_ref}. Ignoring.");
            return Ok(None);
        };
        match self.ledger.complete_transaction(&tx.id).await {
            Ok(settled) => {
                info!("🔔️ Charge {charge_ref} confirmed. Transaction {} is complete", settled.id);
                Ok(Some(settled))
            },
            Err(LedgerError::SettlementNoOp) => {
                debug!("🔔️ Charge {charge_ref} was already settled against transaction {}", tx.id);
                Ok(Some(tx))
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Settle a transaction by its ledger id. Used by the manual confirmation endpoint; an unknown id is an error
    /// here, unlike [`Self::settle_charge`], because the caller named a specific record.
    pub async fn confirm_transaction(&self, id: &TransactionId) -> Result<Transaction, RelayError> {
        match self.ledger.complete_transaction(id).await {
            Ok(tx) => {
                info!("✅️ Transaction {id} manually confirmed");
                Ok(tx)
            },
            Err(LedgerError::SettlementNoOp) => {
                debug!("✅️ Transaction {id} was already complete");
                let tx = self
                    .ledger
                    .fetch_transaction(id)
                    .await?
                    .ok_or_else(|| RelayError::TransactionNotFound(id.clone()))?;
                Ok(tx)
            },
            Err(LedgerError::TransactionNotFound(id)) => Err(RelayError::TransactionNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }
}
