use actix_web::{http::StatusCode, web};
use cashback_engine::{
    db_types::{Business, TransactionStatus},
    DirectoryApi,
    StatsApi,
};

use crate::{
    endpoint_tests::{
        helpers::{business, get_request, transaction},
        mocks::{MockDirectory, MockLedger},
    },
    routes::{BusinessByIdRoute, BusinessesRoute},
};

#[actix_web::test]
async fn businesses_returns_the_active_directory() {
    let _ = env_logger::try_init().ok();
    let mut directory = MockDirectory::new();
    directory
        .expect_fetch_active_businesses()
        .returning(|| Ok(vec![business("alice", true), business("bob", true)]));
    let (status, body) = get_request("/businesses", move |cfg| {
        cfg.app_data(web::Data::new(DirectoryApi::new(directory))).service(BusinessesRoute::<MockDirectory>::new());
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    let businesses: Vec<Business> = serde_json::from_str(&body).unwrap();
    assert_eq!(businesses.len(), 2);
    assert_eq!(businesses[0].id.as_str(), "alice");
    assert_eq!(businesses[1].name, "bob trading co");
}

#[actix_web::test]
async fn businesses_maps_directory_outage_to_502() {
    let _ = env_logger::try_init().ok();
    let mut directory = MockDirectory::new();
    directory.expect_fetch_active_businesses().returning(|| {
        Err(cashback_engine::traits::DirectoryError::UpstreamError("connection refused".to_string()))
    });
    let (status, body) = get_request("/businesses", move |cfg| {
        cfg.app_data(web::Data::new(DirectoryApi::new(directory))).service(BusinessesRoute::<MockDirectory>::new());
    })
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    // The upstream detail is logged, never echoed to the caller
    assert!(!body.contains("connection refused"), "Got body: {body}");
}

#[actix_web::test]
async fn business_by_id_includes_the_completed_cashback_balance() {
    let _ = env_logger::try_init().ok();
    let mut directory = MockDirectory::new();
    directory.expect_fetch_business().returning(|id| Ok(Some(business(id.as_str(), true))));
    let mut ledger = MockLedger::new();
    ledger.expect_fetch_transactions_for_business().returning(|_| {
        Ok(vec![
            // 150c earned as buyer, completed
            transaction("t1", "alice", "bob", 10_000, TransactionStatus::Completed),
            // earned as seller, does not count towards the balance
            transaction("t2", "bob", "alice", 4_000, TransactionStatus::Completed),
            // pending, not yet earned
            transaction("t3", "alice", "bob", 2_000, TransactionStatus::Pending),
        ])
    });
    let (status, body) = get_request("/business/alice", move |cfg| {
        cfg.app_data(web::Data::new(DirectoryApi::new(directory)))
            .app_data(web::Data::new(StatsApi::new(ledger, MockDirectory::new())))
            .service(BusinessByIdRoute::<MockLedger, MockDirectory>::new());
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["business"]["id"], "alice");
    assert_eq!(response["cashbackBalance"], 150);
}

#[actix_web::test]
async fn unknown_business_is_a_400() {
    let _ = env_logger::try_init().ok();
    let mut directory = MockDirectory::new();
    directory.expect_fetch_business().returning(|_| Ok(None));
    let (status, body) = get_request("/business/nobody", move |cfg| {
        cfg.app_data(web::Data::new(DirectoryApi::new(directory)))
            .app_data(web::Data::new(StatsApi::new(MockLedger::new(), MockDirectory::new())))
            .service(BusinessByIdRoute::<MockLedger, MockDirectory>::new());
    })
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("nobody"), "Got body: {body}");
}
