use super::escrow::Escrow;
use super::money::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Flagged,
    Approved,
    Rejected,
    Escalated,
    Calling,
    Released,
    Disputed,
}

impl TransactionStatus {
    /// Terminal statuses accept no further operator action.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Released)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Flagged => "FLAGGED",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Escalated => "ESCALATED",
            Self::Calling => "CALLING",
            Self::Released => "RELEASED",
            Self::Disputed => "DISPUTED",
        };
        f.write_str(s)
    }
}

/// A payment under review.
///
/// Created at intake (or from the seed fixtures), mutated in place by
/// operator actions, never deleted. Field names follow the camelCase wire
/// contract of the dashboard.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub customer: String,
    pub phone: String,
    pub recipient: String,
    pub amount: Amount,
    pub currency: String,
    pub method: String,
    pub message: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub status: TransactionStatus,
    pub sandbox: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escrow: Option<Escrow>,
}

impl Transaction {
    pub fn escrow_mut(&mut self) -> Option<&mut Escrow> {
        self.escrow.as_mut()
    }
}
