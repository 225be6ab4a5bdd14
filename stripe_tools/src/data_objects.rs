use serde::{Deserialize, Serialize};

/// The subset of the processor's PaymentIntent object that the relay cares about. The `client_secret` is handed back
/// to the paying business so it can complete authorization on its side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

/// Metadata attached to a charge so that processor-side records can be traced back to relay participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeMetadata {
    pub buyer_id: String,
    pub seller_id: String,
    pub description: String,
}

//--------------------------------------    Webhook events    ---------------------------------------------------------

/// The webhook envelope. Only `type` and the nested object id are needed to reconcile a charge; everything else in
/// the event is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEventData {
    pub object: WebhookEventObject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEventObject {
    pub id: String,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

pub const EVENT_PAYMENT_INTENT_SUCCEEDED: &str = "payment_intent.succeeded";

impl WebhookEvent {
    pub fn is_payment_success(&self) -> bool {
        self.event_type == EVENT_PAYMENT_INTENT_SUCCEEDED
    }

    /// The charge reference carried by the event.
    pub fn charge_ref(&self) -> &str {
        &self.data.object.id
    }
}
