use std::sync::atomic::{AtomicU64, Ordering};

use crate::db_types::TransactionId;

/// Generates unique transaction ids of the form `txn-{prefix}-{n}`.
///
/// The prefix is 8 random hex characters drawn once per generator, so ids from different process lifetimes do not
/// collide; the counter makes ids unique within a lifetime, including under concurrent creation.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        let prefix = format!("{:08x}", rand::random::<u32>());
        Self { prefix, counter: AtomicU64::new(0) }
    }

    pub fn next_id(&self) -> TransactionId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        TransactionId(format!("txn-{}-{n}", self.prefix))
    }
}
