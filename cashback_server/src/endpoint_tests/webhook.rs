use actix_web::{guard, http::StatusCode, test::TestRequest, web};
use cashback_engine::{db_types::TransactionStatus, RelayApi};
use cbr_common::Secret;
use chrono::Utc;
use stripe_tools::webhook::{calculate_signature, SIGNATURE_HEADER};

use crate::{
    endpoint_tests::{
        helpers::{send, transaction},
        mocks::{MockDirectory, MockLedger, MockProcessor},
    },
    middleware::StripeSigMiddlewareFactory,
    webhook_routes::stripe_webhook,
};

const WEBHOOK_SECRET: &str = "whsec_endpoint_test_secret";

fn success_event(charge_ref: &str) -> String {
    format!(
        r#"{{"id":"evt_1","type":"payment_intent.succeeded","data":{{"object":{{"id":"{charge_ref}","amount":10000,"status":"succeeded"}}}}}}"#
    )
}

fn signed_header(secret: &str, payload: &str, timestamp: i64) -> String {
    format!("t={timestamp},v1={}", calculate_signature(secret, timestamp, payload.as_bytes()))
}

async fn deliver(ledger: MockLedger, header: Option<String>, payload: &str, sig_checks: bool) -> (StatusCode, String) {
    let api = RelayApi::new(ledger, MockDirectory::new(), MockProcessor::new());
    let secret = Secret::new(WEBHOOK_SECRET.to_string());
    let mut req = TestRequest::post().uri("/api/stripe-webhook");
    if let Some(header) = header {
        req = req.insert_header((SIGNATURE_HEADER, header));
    }
    let req = req.set_payload(payload.to_string()).to_request();
    send(req, move |cfg| {
        cfg.app_data(web::Data::new(api)).service(
            web::resource("/api/stripe-webhook")
                .guard(guard::Post())
                .to(stripe_webhook::<MockLedger, MockDirectory, MockProcessor>)
                .wrap(StripeSigMiddlewareFactory::new(secret, sig_checks)),
        );
    })
    .await
}

#[actix_web::test]
async fn signed_success_event_settles_the_matching_transaction() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger
        .expect_fetch_transaction_by_charge_ref()
        .times(1)
        .returning(|_| Ok(Some(transaction("t1", "alice", "bob", 10_000, TransactionStatus::Pending))));
    ledger
        .expect_complete_transaction()
        .times(1)
        .returning(|id| Ok(transaction(id.as_str(), "alice", "bob", 10_000, TransactionStatus::Completed)));
    let payload = success_event("pi_t1");
    let header = signed_header(WEBHOOK_SECRET, &payload, Utc::now().timestamp());
    let (status, body) = deliver(ledger, Some(header), &payload, true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"received":true}"#);
}

#[actix_web::test]
async fn bad_signature_is_a_401_and_never_reaches_the_ledger() {
    let _ = env_logger::try_init().ok();
    let payload = success_event("pi_t1");
    let header = signed_header("whsec_wrong_secret", &payload, Utc::now().timestamp());
    // No ledger expectations. A settlement attempt would fail the test.
    let (status, _) = deliver(MockLedger::new(), Some(header), &payload, true).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn missing_signature_header_is_a_401() {
    let _ = env_logger::try_init().ok();
    let payload = success_event("pi_t1");
    let (status, _) = deliver(MockLedger::new(), None, &payload, true).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn stale_deliveries_are_rejected() {
    let _ = env_logger::try_init().ok();
    let payload = success_event("pi_t1");
    // Ten minutes old, well beyond the replay tolerance
    let header = signed_header(WEBHOOK_SECRET, &payload, Utc::now().timestamp() - 600);
    let (status, _) = deliver(MockLedger::new(), Some(header), &payload, true).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn irrelevant_event_types_are_acknowledged_and_ignored() {
    let _ = env_logger::try_init().ok();
    let payload =
        r#"{"id":"evt_2","type":"payment_intent.created","data":{"object":{"id":"pi_t1"}}}"#.to_string();
    let header = signed_header(WEBHOOK_SECRET, &payload, Utc::now().timestamp());
    // No ledger expectations. Only payment_intent.succeeded triggers settlement.
    let (status, body) = deliver(MockLedger::new(), Some(header), &payload, true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"received":true}"#);
}

#[actix_web::test]
async fn unknown_charge_refs_are_acknowledged_and_ignored() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_fetch_transaction_by_charge_ref().times(1).returning(|_| Ok(None));
    let payload = success_event("pi_stranger");
    let header = signed_header(WEBHOOK_SECRET, &payload, Utc::now().timestamp());
    let (status, body) = deliver(ledger, Some(header), &payload, true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"received":true}"#);
}

#[actix_web::test]
async fn unparseable_payloads_are_acknowledged_once_the_signature_checks_out() {
    let _ = env_logger::try_init().ok();
    let payload = "this is not json".to_string();
    let header = signed_header(WEBHOOK_SECRET, &payload, Utc::now().timestamp());
    let (status, body) = deliver(MockLedger::new(), Some(header), &payload, true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"received":true}"#);
}

#[actix_web::test]
async fn disabled_signature_checks_allow_unsigned_deliveries() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger
        .expect_fetch_transaction_by_charge_ref()
        .returning(|_| Ok(Some(transaction("t1", "alice", "bob", 10_000, TransactionStatus::Pending))));
    ledger
        .expect_complete_transaction()
        .returning(|id| Ok(transaction(id.as_str(), "alice", "bob", 10_000, TransactionStatus::Completed)));
    let payload = success_event("pi_t1");
    let (status, body) = deliver(ledger, None, &payload, false).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"received":true}"#);
}
