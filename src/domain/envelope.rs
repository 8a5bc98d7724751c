use super::action::ReviewAction;
use super::activity::ActivityEntry;
use super::transaction::Transaction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct EnvelopeMeta {
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

impl EnvelopeMeta {
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The messages exchanged between the sandbox shell and the embedded review
/// frame. The `type` tag is the discriminant; anything else fails to parse
/// and is dropped at the channel boundary.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(tag = "type")]
pub enum FrameEnvelope {
    /// Shell -> review frame, after the sandbox view loads a transaction.
    #[serde(rename = "NEW_FLAGGED_TXN")]
    NewFlaggedTxn { txn: Transaction, meta: EnvelopeMeta },
    /// Review frame -> shell, after each dispatched operator action.
    #[serde(rename = "FRAUDOPS_ACTION")]
    FraudopsAction {
        action: ReviewAction,
        txn: Transaction,
        entry: ActivityEntry,
        message: String,
    },
}

impl FrameEnvelope {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::NewFlaggedTxn { .. } => "NEW_FLAGGED_TXN",
            Self::FraudopsAction { .. } => "FRAUDOPS_ACTION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_tag_is_rejected() {
        let raw = serde_json::json!({ "type": "SOMETHING_ELSE", "txn": {} });
        assert!(serde_json::from_value::<FrameEnvelope>(raw).is_err());
    }

    #[test]
    fn test_tag_round_trip() {
        let meta = EnvelopeMeta::from_source("sandbox_shell");
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["source"], "sandbox_shell");
    }
}
