//----------------------------------------------   Reconciliation  ----------------------------------------------------

use actix_web::{web, HttpResponse};
use cashback_engine::{
    traits::{BusinessDirectory, PaymentProcessor, TransactionLedger},
    RelayApi,
    RelayError,
};
use log::{debug, info, trace, warn};
use stripe_tools::WebhookEvent;

use crate::data_objects::WebhookAck;

/// Route handler for the stripe-webhook endpoint.
///
/// The signature middleware has already verified the `Stripe-Signature` header against the raw body by the time this
/// handler runs, so the payload is trusted. Responses must always be in the 200 range once the signature checks out,
/// otherwise the processor will retry deliveries the relay has deliberately ignored.
pub async fn stripe_webhook<L, D, P>(body: web::Bytes, api: web::Data<RelayApi<L, D, P>>) -> HttpResponse
where
    L: TransactionLedger,
    D: BusinessDirectory,
    P: PaymentProcessor,
{
    trace!("🔔️ Received webhook delivery ({} bytes)", body.len());
    let event = match serde_json::from_slice::<WebhookEvent>(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!("🔔️ Could not parse webhook payload. {e}");
            return HttpResponse::Ok().json(WebhookAck::ok());
        },
    };
    if !event.is_payment_success() {
        debug!("🔔️ Ignoring webhook event {} of type {}", event.id, event.event_type);
        return HttpResponse::Ok().json(WebhookAck::ok());
    }
    let charge_ref = event.charge_ref();
    match api.settle_charge(charge_ref).await {
        Ok(Some(tx)) => {
            info!("🔔️ Charge {charge_ref} settled transaction {}", tx.id);
        },
        Ok(None) => {
            info!("🔔️ Charge {charge_ref} does not match any transaction. Acknowledged and ignored.");
        },
        Err(RelayError::LedgerError(e)) => {
            warn!("🔔️ Ledger error while settling charge {charge_ref}. {e}");
        },
        Err(e) => {
            warn!("🔔️ Unexpected error while settling charge {charge_ref}. {e}");
        },
    }
    HttpResponse::Ok().json(WebhookAck::ok())
}
