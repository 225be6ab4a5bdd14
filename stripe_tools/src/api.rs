use std::sync::Arc;

use cbr_common::Money;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::de::DeserializeOwned;

use crate::{config::StripeConfig, data_objects::ChargeMetadata, error::StripeApiError, PaymentIntent};

#[derive(Clone)]
pub struct StripeApi {
    config: StripeConfig,
    client: Arc<Client>,
}

impl StripeApi {
    pub fn new(config: StripeConfig) -> Result<Self, StripeApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        let bearer = format!("Bearer {}", config.secret_key.reveal());
        let mut val = HeaderValue::from_str(&bearer).map_err(|e| StripeApiError::Initialization(e.to_string()))?;
        val.set_sensitive(true);
        headers.insert("Authorization", val);
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StripeApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// POSTs a form-encoded request to the given API path and deserializes the JSON response. The processor's API is
    /// form-in, JSON-out across the board.
    pub async fn form_post<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, StripeApiError> {
        let url = self.url(path);
        trace!("Sending POST to {url}");
        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| StripeApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("Request successful. {}", response.status());
            response.json::<T>().await.map_err(|e| StripeApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| StripeApiError::RestResponseError(e.to_string()))?;
            Err(StripeApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_base)
    }

    /// Create a PaymentIntent for the given amount. The buyer and seller ids travel in the metadata so the charge can
    /// be traced back to the relay's records from the processor dashboard.
    pub async fn create_payment_intent(
        &self,
        amount: Money,
        currency: &str,
        metadata: &ChargeMetadata,
    ) -> Result<PaymentIntent, StripeApiError> {
        if !amount.is_positive() {
            return Err(StripeApiError::InvalidCurrencyAmount(format!("charge amount must be positive, got {amount}")));
        }
        let params = vec![
            ("amount".to_string(), amount.value().to_string()),
            ("currency".to_string(), currency.to_string()),
            ("metadata[buyer_id]".to_string(), metadata.buyer_id.clone()),
            ("metadata[seller_id]".to_string(), metadata.seller_id.clone()),
            ("metadata[description]".to_string(), metadata.description.clone()),
        ];
        debug!("Creating payment intent for {amount}");
        let intent = self.form_post::<PaymentIntent>("/payment_intents", &params).await?;
        info!("Created payment intent {}", intent.id);
        Ok(intent)
    }
}
