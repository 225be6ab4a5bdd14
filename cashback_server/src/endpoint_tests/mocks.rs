use cashback_engine::{
    db_types::{Business, BusinessId, Charge, ChargeRequest, NewTransaction, Transaction, TransactionId},
    traits::{BusinessDirectory, DirectoryError, LedgerError, PaymentProcessor, ProcessorError, TransactionLedger},
};
use mockall::mock;

mock! {
    pub Ledger {}
    impl TransactionLedger for Ledger {
        async fn insert_transaction(&self, tx: NewTransaction) -> Result<Transaction, LedgerError>;
        async fn fetch_transaction(&self, id: &TransactionId) -> Result<Option<Transaction>, LedgerError>;
        async fn fetch_transaction_by_charge_ref(&self, charge_ref: &str) -> Result<Option<Transaction>, LedgerError>;
        async fn fetch_transactions_for_business(&self, id: &BusinessId) -> Result<Vec<Transaction>, LedgerError>;
        async fn fetch_all_transactions(&self) -> Result<Vec<Transaction>, LedgerError>;
        async fn complete_transaction(&self, id: &TransactionId) -> Result<Transaction, LedgerError>;
    }
    impl Clone for Ledger {
        fn clone(&self) -> Self;
    }
}

mock! {
    pub Directory {}
    impl BusinessDirectory for Directory {
        async fn fetch_active_businesses(&self) -> Result<Vec<Business>, DirectoryError>;
        async fn fetch_business(&self, id: &BusinessId) -> Result<Option<Business>, DirectoryError>;
    }
    impl Clone for Directory {
        fn clone(&self) -> Self;
    }
}

mock! {
    pub Processor {}
    impl PaymentProcessor for Processor {
        async fn create_charge(&self, request: ChargeRequest) -> Result<Charge, ProcessorError>;
    }
    impl Clone for Processor {
        fn clone(&self) -> Self;
    }
}
