//! A minimal client for the payment processor's REST API.
//!
//! Two concerns live here:
//! * Charge creation ([`StripeApi::create_payment_intent`]), the only money-moving call the relay makes.
//! * Webhook authentication ([`webhook`]), which parses and verifies the `Stripe-Signature` header so that callers
//!   can trust a notification before they parse its payload.

mod api;
mod config;
mod error;

mod data_objects;
pub mod webhook;

pub use api::StripeApi;
pub use config::StripeConfig;
pub use data_objects::{
    ChargeMetadata,
    PaymentIntent,
    WebhookEvent,
    WebhookEventData,
    WebhookEventObject,
    EVENT_PAYMENT_INTENT_SUCCEEDED,
};
pub use error::{StripeApiError, WebhookVerifyError};
