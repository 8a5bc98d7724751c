use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind tag for entries recorded when an inbound flagged transaction is
/// admitted to the list (operator actions use their own token).
pub const KIND_NEW_TXN: &str = "NEW_TXN";

/// One line of the operations activity feed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    pub txn_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ActivityEntry {
    pub fn new(
        kind: impl Into<String>,
        txn_id: impl Into<String>,
        message: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            kind: kind.into(),
            txn_id: txn_id.into(),
            message: message.into(),
            details,
        }
    }
}
