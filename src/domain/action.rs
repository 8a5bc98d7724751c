use super::transaction::TransactionStatus;
use crate::error::FraudOpsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The operator actions the review dashboard can dispatch.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewAction {
    Approve,
    Reject,
    Escalate,
    CallCustomer,
    HoldEscrow,
    ReleaseEscrow,
    PartialRefund,
    RaiseDispute,
}

impl ReviewAction {
    /// Status the transaction moves to on success, or `None` for actions
    /// that only touch the escrow trail.
    pub fn target_status(&self) -> Option<TransactionStatus> {
        match self {
            Self::Approve => Some(TransactionStatus::Approved),
            Self::Reject => Some(TransactionStatus::Rejected),
            Self::Escalate => Some(TransactionStatus::Escalated),
            Self::CallCustomer => Some(TransactionStatus::Calling),
            Self::ReleaseEscrow => Some(TransactionStatus::Released),
            Self::RaiseDispute => Some(TransactionStatus::Disputed),
            Self::HoldEscrow | Self::PartialRefund => None,
        }
    }

    /// The transition table. Terminal statuses accept nothing; Disputed
    /// accepts resolution-shaped actions but not approval.
    pub fn allowed_from(&self, status: TransactionStatus) -> bool {
        use TransactionStatus::*;
        if status.is_terminal() {
            return false;
        }
        match self {
            Self::Approve => matches!(status, Flagged | Escalated | Calling),
            Self::Reject => matches!(status, Flagged | Escalated | Calling | Disputed),
            Self::Escalate => matches!(status, Flagged | Calling),
            Self::CallCustomer => matches!(status, Flagged | Escalated),
            Self::HoldEscrow | Self::ReleaseEscrow | Self::PartialRefund => {
                matches!(status, Flagged | Escalated | Calling | Disputed)
            }
            Self::RaiseDispute => matches!(status, Flagged | Escalated | Calling),
        }
    }

    /// Checks the table and returns the post-action status (unchanged for
    /// trail-only actions), or a typed error for a disallowed pair.
    pub fn next_status(
        &self,
        status: TransactionStatus,
    ) -> Result<TransactionStatus, FraudOpsError> {
        if self.allowed_from(status) {
            Ok(self.target_status().unwrap_or(status))
        } else {
            Err(FraudOpsError::InvalidTransition {
                status: status.to_string(),
                action: self.to_string(),
            })
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Approve => "APPROVE",
            Self::Reject => "REJECT",
            Self::Escalate => "ESCALATE",
            Self::CallCustomer => "CALL_CUSTOMER",
            Self::HoldEscrow => "HOLD_ESCROW",
            Self::ReleaseEscrow => "RELEASE_ESCROW",
            Self::PartialRefund => "PARTIAL_REFUND",
            Self::RaiseDispute => "RAISE_DISPUTE",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TransactionStatus::*;

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&ReviewAction::CallCustomer).unwrap();
        assert_eq!(json, r#""CALL_CUSTOMER""#);
        let parsed: ReviewAction = serde_json::from_str(r#""RAISE_DISPUTE""#).unwrap();
        assert_eq!(parsed, ReviewAction::RaiseDispute);
    }

    #[test]
    fn test_all_actions_allowed_from_flagged() {
        for action in [
            ReviewAction::Approve,
            ReviewAction::Reject,
            ReviewAction::Escalate,
            ReviewAction::CallCustomer,
            ReviewAction::HoldEscrow,
            ReviewAction::ReleaseEscrow,
            ReviewAction::PartialRefund,
            ReviewAction::RaiseDispute,
        ] {
            assert!(action.allowed_from(Flagged), "{action} should be allowed");
        }
    }

    #[test]
    fn test_terminal_statuses_accept_nothing() {
        for status in [Approved, Rejected, Released] {
            for action in [
                ReviewAction::Approve,
                ReviewAction::Reject,
                ReviewAction::HoldEscrow,
                ReviewAction::RaiseDispute,
            ] {
                assert!(matches!(
                    action.next_status(status),
                    Err(FraudOpsError::InvalidTransition { .. })
                ));
            }
        }
    }

    #[test]
    fn test_disputed_cannot_be_approved_directly() {
        assert!(!ReviewAction::Approve.allowed_from(Disputed));
        assert!(ReviewAction::Reject.allowed_from(Disputed));
        assert!(ReviewAction::ReleaseEscrow.allowed_from(Disputed));
    }

    #[test]
    fn test_trail_only_actions_keep_status() {
        assert_eq!(
            ReviewAction::HoldEscrow.next_status(Escalated).unwrap(),
            Escalated
        );
        assert_eq!(
            ReviewAction::PartialRefund.next_status(Calling).unwrap(),
            Calling
        );
    }

    #[test]
    fn test_status_changing_actions() {
        assert_eq!(ReviewAction::Approve.next_status(Flagged).unwrap(), Approved);
        assert_eq!(
            ReviewAction::ReleaseEscrow.next_status(Disputed).unwrap(),
            Released
        );
        assert_eq!(
            ReviewAction::RaiseDispute.next_status(Calling).unwrap(),
            Disputed
        );
    }
}
