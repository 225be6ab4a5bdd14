//! The backend traits the relay orchestrates.
//!
//! Backends are injected as generics, so anything implementing these traits can stand in: the in-memory ledger and
//! directory in this crate, the hosted REST directory, the live processor client, or mocks in tests.

mod business_directory;
mod payment_processor;
mod transaction_ledger;

pub use business_directory::{BusinessDirectory, DirectoryError};
pub use payment_processor::{PaymentProcessor, ProcessorError};
pub use transaction_ledger::{LedgerError, TransactionLedger};
