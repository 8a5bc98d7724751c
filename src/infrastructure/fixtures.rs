use crate::domain::escrow::Escrow;
use crate::domain::money::Amount;
use crate::domain::transaction::{Transaction, TransactionStatus};
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

/// The two flagged transactions the dashboard is seeded with.
pub fn demo_transactions() -> Vec<Transaction> {
    let now = Utc::now();
    let alice_amount = Amount::new(dec!(2500)).expect("fixture amount");
    let bob_amount = Amount::new(dec!(850)).expect("fixture amount");

    vec![
        Transaction {
            id: "demo-001".to_string(),
            customer: "Alice Thompson".to_string(),
            phone: "+44 7700 900123".to_string(),
            recipient: "Tech Support Services".to_string(),
            amount: alice_amount,
            currency: "GBP".to_string(),
            method: "bank_transfer".to_string(),
            message: "Urgent - please send OTP to verify account".to_string(),
            reason: "AI detected suspicious pattern".to_string(),
            created_at: now,
            status: TransactionStatus::Flagged,
            sandbox: true,
            session_id: None,
            device_fingerprint: None,
            behavior: None,
            llm_explanation: Some(
                "Message contains high-risk keywords (urgent, OTP) commonly used in \
                 social engineering."
                    .to_string(),
            ),
            semantic_context: Some(
                "Payment urgency + credential request = high fraud probability".to_string(),
            ),
            escrow: Some(Escrow::open(alice_amount, "Initial fraud flag")),
        },
        Transaction {
            id: "demo-002".to_string(),
            customer: "Bob Martinez".to_string(),
            phone: "+44 7700 900456".to_string(),
            recipient: "Refund Processing Ltd".to_string(),
            amount: bob_amount,
            currency: "GBP".to_string(),
            method: "bank_transfer".to_string(),
            message: "Click here for immediate refund processing".to_string(),
            reason: "AI detected suspicious pattern".to_string(),
            created_at: now - Duration::minutes(5),
            status: TransactionStatus::Flagged,
            sandbox: true,
            session_id: None,
            device_fingerprint: None,
            behavior: None,
            llm_explanation: Some(
                "Phishing pattern detected with action-oriented language (click, immediate)."
                    .to_string(),
            ),
            semantic_context: Some(
                "Unexpected refund request + urgency = potential scam".to_string(),
            ),
            escrow: Some(Escrow::open(bob_amount, "Initial fraud flag")),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_fully_held() {
        let fixtures = demo_transactions();
        assert_eq!(fixtures.len(), 2);
        for txn in &fixtures {
            assert_eq!(txn.status, TransactionStatus::Flagged);
            assert!(txn.sandbox);
            let escrow = txn.escrow.as_ref().unwrap();
            assert_eq!(escrow.held_amount, txn.amount);
            assert_eq!(escrow.released_amount, Amount::ZERO);
            assert_eq!(escrow.holds.len(), 1);
        }
    }

    #[test]
    fn test_second_fixture_is_older() {
        let fixtures = demo_transactions();
        assert!(fixtures[1].created_at < fixtures[0].created_at);
    }
}
