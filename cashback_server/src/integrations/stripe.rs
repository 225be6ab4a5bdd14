//! Adapts the payment processor client to the engine's [`PaymentProcessor`] trait.

use cashback_engine::{
    db_types::{Charge, ChargeRequest},
    traits::{PaymentProcessor, ProcessorError},
};
use cbr_common::Money;
use stripe_tools::{ChargeMetadata, StripeApi, StripeApiError, StripeConfig};

#[derive(Clone)]
pub struct StripeProcessor {
    api: StripeApi,
}

impl StripeProcessor {
    pub fn new(api: StripeApi) -> Self {
        Self { api }
    }

    pub fn from_config(config: StripeConfig) -> Result<Self, ProcessorError> {
        let api = StripeApi::new(config).map_err(|e| ProcessorError::UpstreamError(e.to_string()))?;
        Ok(Self { api })
    }
}

impl PaymentProcessor for StripeProcessor {
    async fn create_charge(&self, request: ChargeRequest) -> Result<Charge, ProcessorError> {
        let metadata = ChargeMetadata {
            buyer_id: request.buyer_id.to_string(),
            seller_id: request.seller_id.to_string(),
            description: request.description.clone(),
        };
        let intent =
            self.api.create_payment_intent(request.amount, &request.currency, &metadata).await.map_err(|e| match e {
                StripeApiError::QueryError { status, message } => {
                    ProcessorError::ChargeFailed(format!("Error {status}. {message}"))
                },
                StripeApiError::InvalidCurrencyAmount(s) => ProcessorError::ChargeFailed(s),
                other => ProcessorError::UpstreamError(other.to_string()),
            })?;
        Ok(Charge {
            charge_ref: intent.id,
            client_secret: intent.client_secret,
            amount: Money::from_cents(intent.amount),
            currency: intent.currency,
        })
    }
}
