//! Cashback Relay Engine
//!
//! The core logic for the B2B cashback relay. The engine is transport-agnostic; the HTTP server wires its APIs to
//! routes, but nothing in this crate knows about actix.
//!
//! The crate is divided into three main sections:
//! 1. Backends ([`mod@db`] and the [`traits`] that describe them). The ledger, the business directory, and the
//!    payment processor are all injected as trait implementations, so the in-memory ledger, the hosted REST
//!    directory, and test mocks are interchangeable.
//! 2. The public API ([`RelayApi`], [`StatsApi`], [`DirectoryApi`]). These orchestrate the backends: validating
//!    participants, requesting charges, recording and settling transactions, and projecting aggregates.
//! 3. The policy and data types ([`cashback`], [`db_types`]) shared by everything above.

mod cbe_api;
mod db;

pub mod cashback;
pub mod db_types;
pub mod helpers;
pub mod traits;

pub use cbe_api::{
    directory_api::DirectoryApi,
    errors::RelayError,
    relay_api::RelayApi,
    stats_api::StatsApi,
    stats_objects::{BusinessStats, Dashboard, NetworkStats},
};
pub use db::{MemoryDirectory, MemoryLedger, RestDirectory};
