//! # Cashback Relay Server
//! This crate hosts the HTTP surface of the cashback relay. It is responsible for:
//! Exposing the business directory and transaction endpoints to member businesses.
//! Relaying charge requests to the payment processor.
//! Listening for signed webhook notifications from the processor and settling the matching ledger records.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/businesses`, `/api/business/{id}`: directory lookups.
//! * `/api/process-transaction`, `/api/confirm-cashback`: the relay flow.
//! * `/api/business/{id}/dashboard`, `/api/network-stats`: aggregates.
//! * `/api/stripe-webhook`: the signed reconciliation listener.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;

pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod webhook_routes;

#[cfg(test)]
mod endpoint_tests;
