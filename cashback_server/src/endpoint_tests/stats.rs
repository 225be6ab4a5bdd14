use actix_web::{http::StatusCode, web};
use cashback_engine::{db_types::TransactionStatus, StatsApi};

use crate::{
    endpoint_tests::{
        helpers::{business, get_request, transaction},
        mocks::{MockDirectory, MockLedger},
    },
    routes::{DashboardRoute, NetworkStatsRoute},
};

#[actix_web::test]
async fn dashboard_aggregates_the_business_history() {
    let _ = env_logger::try_init().ok();
    let mut directory = MockDirectory::new();
    directory.expect_fetch_business().returning(|id| Ok(Some(business(id.as_str(), true))));
    let mut ledger = MockLedger::new();
    ledger.expect_fetch_transactions_for_business().returning(|_| {
        Ok(vec![
            transaction("t1", "alice", "bob", 10_000, TransactionStatus::Completed),
            transaction("t2", "bob", "alice", 4_000, TransactionStatus::Completed),
            transaction("t3", "alice", "bob", 2_000, TransactionStatus::Pending),
        ])
    });
    let (status, body) = get_request("/business/alice/dashboard", move |cfg| {
        cfg.app_data(web::Data::new(StatsApi::new(ledger, directory)))
            .service(DashboardRoute::<MockLedger, MockDirectory>::new());
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["business"]["id"], "alice");
    // Pending records count towards the transaction total but not the monetary sums
    assert_eq!(response["stats"]["transactionCount"], 3);
    assert_eq!(response["stats"]["totalCashbackEarned"], 150);
    assert_eq!(response["stats"]["totalSpent"], 10_000);
    assert_eq!(response["stats"]["totalReceived"], 4_000);
    assert_eq!(response["recentTransactions"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn dashboard_shows_at_most_ten_recent_transactions() {
    let _ = env_logger::try_init().ok();
    let mut directory = MockDirectory::new();
    directory.expect_fetch_business().returning(|id| Ok(Some(business(id.as_str(), true))));
    let mut ledger = MockLedger::new();
    ledger.expect_fetch_transactions_for_business().returning(|_| {
        let history = (0..12)
            .map(|n| transaction(&format!("t{n}"), "alice", "bob", 1_000, TransactionStatus::Completed))
            .collect();
        Ok(history)
    });
    let (status, body) = get_request("/business/alice/dashboard", move |cfg| {
        cfg.app_data(web::Data::new(StatsApi::new(ledger, directory)))
            .service(DashboardRoute::<MockLedger, MockDirectory>::new());
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    // The stats still cover the full history
    assert_eq!(response["stats"]["transactionCount"], 12);
    let recent = response["recentTransactions"].as_array().unwrap();
    assert_eq!(recent.len(), 10);
    // The ledger returns most recent first and the dashboard keeps the head of that list
    assert_eq!(recent[0]["id"], "t0");
    assert_eq!(recent[9]["id"], "t9");
}

#[actix_web::test]
async fn dashboard_for_an_unknown_business_is_a_400() {
    let _ = env_logger::try_init().ok();
    let mut directory = MockDirectory::new();
    directory.expect_fetch_business().returning(|_| Ok(None));
    let (status, body) = get_request("/business/nobody/dashboard", move |cfg| {
        cfg.app_data(web::Data::new(StatsApi::new(MockLedger::new(), directory)))
            .service(DashboardRoute::<MockLedger, MockDirectory>::new());
    })
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("nobody"), "Got body: {body}");
}

#[actix_web::test]
async fn network_stats_cover_completed_transactions_only() {
    let _ = env_logger::try_init().ok();
    let mut directory = MockDirectory::new();
    directory.expect_fetch_active_businesses().returning(|| Ok(vec![business("alice", true), business("bob", true)]));
    let mut ledger = MockLedger::new();
    ledger.expect_fetch_all_transactions().returning(|| {
        Ok(vec![
            transaction("t1", "alice", "bob", 10_000, TransactionStatus::Completed),
            transaction("t2", "bob", "alice", 4_000, TransactionStatus::Completed),
            transaction("t3", "alice", "bob", 50_000, TransactionStatus::Pending),
        ])
    });
    let (status, body) = get_request("/network-stats", move |cfg| {
        cfg.app_data(web::Data::new(StatsApi::new(ledger, directory)))
            .service(NetworkStatsRoute::<MockLedger, MockDirectory>::new());
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["activeBusinesses"], 2);
    assert_eq!(response["completedTransactions"], 2);
    assert_eq!(response["totalVolume"], 14_000);
    // 150c on the 10 000c charge, 60c on the 4 000c one
    assert_eq!(response["totalCashback"], 210);
    assert_eq!(response["averageTransaction"], 7_000);
}

#[actix_web::test]
async fn network_stats_on_an_empty_ledger_are_all_zero() {
    let _ = env_logger::try_init().ok();
    let mut directory = MockDirectory::new();
    directory.expect_fetch_active_businesses().returning(|| Ok(vec![]));
    let mut ledger = MockLedger::new();
    ledger.expect_fetch_all_transactions().returning(|| Ok(vec![]));
    let (status, body) = get_request("/network-stats", move |cfg| {
        cfg.app_data(web::Data::new(StatsApi::new(ledger, directory)))
            .service(NetworkStatsRoute::<MockLedger, MockDirectory>::new());
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["completedTransactions"], 0);
    assert_eq!(response["totalVolume"], 0);
    assert_eq!(response["averageTransaction"], 0);
}
