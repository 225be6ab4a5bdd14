//! Webhook signature verification.
//!
//! The processor signs each webhook delivery with a `Stripe-Signature` header of the form
//! `t=<unix seconds>,v1=<hex hmac>[,v1=...]`, where each `v1` entry is an HMAC-SHA256 of `"{t}.{raw body}"` keyed
//! with the endpoint's shared webhook secret. Verification must happen on the raw body, before any JSON parsing.
//! Deliveries whose timestamp falls outside the replay tolerance are rejected even when the signature matches.

use cbr_common::Secret;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::WebhookVerifyError;

type HmacSha256 = Hmac<Sha256>;

/// Deliveries older (or newer) than this are treated as replays.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

#[derive(Debug, Clone)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub signatures: Vec<String>,
}

impl SignatureHeader {
    /// Parse a `t=...,v1=...` header. Unknown schemes (e.g. `v0`) are ignored; missing `t` or `v1` entries are an
    /// error since the header can never validate without them.
    pub fn parse(header: &str) -> Result<Self, WebhookVerifyError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();
        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            match key.trim() {
                "t" => {
                    let t = value
                        .trim()
                        .parse::<i64>()
                        .map_err(|e| WebhookVerifyError::MalformedHeader(format!("invalid timestamp: {e}")))?;
                    timestamp = Some(t);
                },
                "v1" => signatures.push(value.trim().to_string()),
                _ => {},
            }
        }
        let timestamp = timestamp.ok_or_else(|| WebhookVerifyError::MalformedHeader("no timestamp".into()))?;
        if signatures.is_empty() {
            return Err(WebhookVerifyError::MalformedHeader("no v1 signature".into()));
        }
        Ok(Self { timestamp, signatures })
    }
}

/// The hex-encoded HMAC-SHA256 of `"{timestamp}.{payload}"`.
pub fn calculate_signature(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    // HMAC accepts keys of any length, so this cannot fail.
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap_or_else(|_| unreachable!());
    mac.update(format!("{timestamp}.").as_bytes());
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a signature header against the raw request body, using the current wall clock for the replay check.
pub fn verify_signature(
    secret: &Secret<String>,
    header: &str,
    payload: &[u8],
) -> Result<(), WebhookVerifyError> {
    verify_signature_at(secret, header, payload, Utc::now())
}

pub fn verify_signature_at(
    secret: &Secret<String>,
    header: &str,
    payload: &[u8],
    now: DateTime<Utc>,
) -> Result<(), WebhookVerifyError> {
    let header = SignatureHeader::parse(header)?;
    let age = now.timestamp() - header.timestamp;
    if age.abs() > Duration::seconds(DEFAULT_TOLERANCE_SECS).num_seconds() {
        return Err(WebhookVerifyError::StaleTimestamp);
    }
    let expected = calculate_signature(secret.reveal(), header.timestamp, payload);
    if header.signatures.iter().any(|sig| *sig == expected) {
        Ok(())
    } else {
        Err(WebhookVerifyError::SignatureMismatch)
    }
}
