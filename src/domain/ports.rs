use super::activity::ActivityEntry;
use super::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;

pub type TransactionStoreBox = Box<dyn TransactionStore>;
pub type ActivityLogBox = Box<dyn ActivityLog>;

/// The ordered transaction list the review dashboard works over. Newest
/// entries sit at the front.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Inserts at the front of the list.
    async fn insert(&self, txn: Transaction) -> Result<()>;
    /// Replaces the stored transaction with the same id.
    async fn update(&self, txn: Transaction) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Transaction>>;
    async fn exists(&self, id: &str) -> Result<bool>;
    async fn all(&self) -> Result<Vec<Transaction>>;
    /// Transactions currently awaiting review.
    async fn flagged(&self) -> Result<Vec<Transaction>>;
    async fn len(&self) -> Result<usize>;
}

/// Newest-first operations activity feed.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Prepends an entry; index 0 is always the most recent.
    async fn record(&self, entry: ActivityEntry) -> Result<()>;
    async fn recent(&self, limit: usize) -> Result<Vec<ActivityEntry>>;
    async fn len(&self) -> Result<usize>;
}
