use crate::domain::activity::ActivityEntry;
use crate::domain::ports::{ActivityLog, TransactionStore};
use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The dashboard's ordered in-memory transaction list.
///
/// Uses `Arc<RwLock<Vec<Transaction>>>` so handlers and the envelope consumer
/// share one list. Newest transactions sit at the front; `update` keeps the
/// position stable.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store back-to-front so the first fixture ends up first.
    pub async fn seeded(fixtures: Vec<Transaction>) -> Self {
        let store = Self::new();
        for txn in fixtures.into_iter().rev() {
            let mut txns = store.transactions.write().await;
            txns.insert(0, txn);
        }
        store
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, txn: Transaction) -> Result<()> {
        let mut txns = self.transactions.write().await;
        txns.insert(0, txn);
        Ok(())
    }

    async fn update(&self, txn: Transaction) -> Result<()> {
        let mut txns = self.transactions.write().await;
        if let Some(slot) = txns.iter_mut().find(|t| t.id == txn.id) {
            *slot = txn;
        } else {
            txns.insert(0, txn);
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Transaction>> {
        let txns = self.transactions.read().await;
        Ok(txns.iter().find(|t| t.id == id).cloned())
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let txns = self.transactions.read().await;
        Ok(txns.iter().any(|t| t.id == id))
    }

    async fn all(&self) -> Result<Vec<Transaction>> {
        let txns = self.transactions.read().await;
        Ok(txns.clone())
    }

    async fn flagged(&self) -> Result<Vec<Transaction>> {
        let txns = self.transactions.read().await;
        Ok(txns
            .iter()
            .filter(|t| t.status == TransactionStatus::Flagged)
            .cloned()
            .collect())
    }

    async fn len(&self) -> Result<usize> {
        let txns = self.transactions.read().await;
        Ok(txns.len())
    }
}

/// Newest-first activity feed, unbounded; readers truncate.
#[derive(Default, Clone)]
pub struct InMemoryActivityLog {
    entries: Arc<RwLock<Vec<ActivityEntry>>>,
}

impl InMemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityLog for InMemoryActivityLog {
    async fn record(&self, entry: ActivityEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(0, entry);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ActivityEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().take(limit).cloned().collect())
    }

    async fn len(&self) -> Result<usize> {
        let entries = self.entries.read().await;
        Ok(entries.len())
    }
}
