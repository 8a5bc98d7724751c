use crate::domain::escrow::Escrow;
use crate::domain::money::Amount;
use crate::domain::ports::TransactionStoreBox;
use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::error::Result;
use chrono::Utc;
use log::info;
use rand::Rng;
use rand::distributions::Alphanumeric;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Keywords the simulated analysis flags on. Matching is case-insensitive
/// over the payment message.
pub const RISK_KEYWORDS: [&str; 4] = ["otp", "urgent", "refund", "click"];

const FLAG_REASON: &str = "AI detected suspicious pattern in message";
const FLAG_EXPLANATION: &str = "The payment message contains high-risk keywords commonly \
     associated with social engineering attacks (OTP, urgent requests, refund scams). \
     The transaction has been flagged for manual review.";
const FLAG_CONTEXT: &str = "Payment urgency + credential request = high fraud probability";

/// A submitted payment attempt, before screening.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAttempt {
    pub customer: Option<String>,
    pub phone: Option<String>,
    pub recipient: String,
    pub amount: Decimal,
    #[serde(default)]
    pub message: String,
    pub session_id: Option<String>,
    pub device_fingerprint: Option<String>,
    pub behavior: Option<String>,
}

/// What the caller learns about a submitted attempt.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IntakeOutcome {
    pub txn_id: String,
    pub flagged: bool,
    pub message: String,
}

/// Correlation token in the `sess_` namespace, 13 random alphanumerics.
/// Opaque and non-cryptographic.
pub fn session_token() -> String {
    random_token("sess_")
}

/// Correlation token in the `fp_` namespace.
pub fn fingerprint_token() -> String {
    random_token("fp_")
}

fn random_token(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(13)
        .map(char::from)
        .collect();
    format!("{prefix}{suffix}")
}

/// Returns true when the message trips the keyword simulation.
pub fn is_suspicious(message: &str) -> bool {
    let lower = message.to_lowercase();
    RISK_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Screens payment attempts and creates the resulting transactions.
pub struct IntakeService {
    store: TransactionStoreBox,
}

impl IntakeService {
    pub fn new(store: TransactionStoreBox) -> Self {
        Self { store }
    }

    /// Screens an attempt, stores the resulting transaction, and reports the
    /// outcome. A flagged attempt opens an escrow ledger holding the full
    /// amount; a clean one completes immediately.
    pub async fn submit(&self, attempt: PaymentAttempt) -> Result<IntakeOutcome> {
        let amount = Amount::new(attempt.amount)?;
        let flagged = is_suspicious(&attempt.message);
        let id = Uuid::new_v4().to_string();

        let mut txn = Transaction {
            id: id.clone(),
            customer: attempt.customer.unwrap_or_else(|| "John Doe".to_string()),
            phone: attempt
                .phone
                .unwrap_or_else(|| "+44 7700 900000".to_string()),
            recipient: attempt.recipient,
            amount,
            currency: "GBP".to_string(),
            method: "bank_transfer".to_string(),
            message: attempt.message,
            reason: String::new(),
            created_at: Utc::now(),
            status: TransactionStatus::Approved,
            sandbox: false,
            session_id: attempt.session_id,
            device_fingerprint: attempt.device_fingerprint,
            behavior: attempt.behavior,
            llm_explanation: None,
            semantic_context: None,
            escrow: None,
        };

        let outcome_message = if flagged {
            txn.status = TransactionStatus::Flagged;
            txn.sandbox = true;
            txn.reason = FLAG_REASON.to_string();
            txn.llm_explanation = Some(FLAG_EXPLANATION.to_string());
            txn.semantic_context = Some(FLAG_CONTEXT.to_string());
            txn.escrow = Some(Escrow::open(amount, "Initial fraud flag"));
            "Payment flagged for review"
        } else {
            "Payment processed successfully"
        };

        info!(
            "[intake] {} payment {id} from {} for £{amount}",
            if flagged { "flagged" } else { "cleared" },
            txn.customer
        );
        self.store.insert(txn).await?;

        Ok(IntakeOutcome {
            txn_id: id,
            flagged,
            message: outcome_message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::TransactionStore;
    use crate::error::FraudOpsError;
    use crate::infrastructure::in_memory::InMemoryTransactionStore;
    use rust_decimal_macros::dec;

    fn attempt(message: &str, amount: Decimal) -> PaymentAttempt {
        PaymentAttempt {
            customer: Some("Michael Brown".to_string()),
            phone: Some("+44 7700 900222".to_string()),
            recipient: "Account Verification Services".to_string(),
            amount,
            message: message.to_string(),
            session_id: Some(session_token()),
            device_fingerprint: Some(fingerprint_token()),
            behavior: Some("suspicious".to_string()),
        }
    }

    #[test]
    fn test_keyword_screening() {
        assert!(is_suspicious("URGENT: Please send OTP code immediately"));
        assert!(is_suspicious("click here"));
        assert!(is_suspicious("processing your Refund"));
        assert!(!is_suspicious("Weekly coffee supplies"));
        assert!(!is_suspicious(""));
    }

    #[test]
    fn test_token_prefixes() {
        let sess = session_token();
        let fp = fingerprint_token();
        assert!(sess.starts_with("sess_") && sess.len() == 18);
        assert!(fp.starts_with("fp_") && fp.len() == 16);
        assert_ne!(session_token(), session_token());
    }

    #[tokio::test]
    async fn test_flagged_attempt_opens_escrow() {
        let store = InMemoryTransactionStore::new();
        let intake = IntakeService::new(Box::new(store.clone()));

        let outcome = intake
            .submit(attempt(
                "URGENT: Please send OTP code immediately for refund processing",
                dec!(1250),
            ))
            .await
            .unwrap();

        assert!(outcome.flagged);
        assert_eq!(outcome.message, "Payment flagged for review");

        let txn = store.get(&outcome.txn_id).await.unwrap().unwrap();
        assert_eq!(txn.status, TransactionStatus::Flagged);
        assert!(txn.sandbox);
        assert_eq!(txn.currency, "GBP");
        assert_eq!(txn.method, "bank_transfer");
        let escrow = txn.escrow.unwrap();
        assert_eq!(escrow.held_amount, Amount::new(dec!(1250)).unwrap());
        assert_eq!(escrow.holds[0].reason, "Initial fraud flag");
    }

    #[tokio::test]
    async fn test_clean_attempt_completes() {
        let store = InMemoryTransactionStore::new();
        let intake = IntakeService::new(Box::new(store.clone()));

        let outcome = intake
            .submit(attempt("Weekly coffee supplies", dec!(45.50)))
            .await
            .unwrap();

        assert!(!outcome.flagged);
        assert_eq!(outcome.message, "Payment processed successfully");

        let txn = store.get(&outcome.txn_id).await.unwrap().unwrap();
        assert_eq!(txn.status, TransactionStatus::Approved);
        assert!(!txn.sandbox);
        assert!(txn.escrow.is_none());
        assert!(txn.llm_explanation.is_none());
    }

    #[tokio::test]
    async fn test_negative_amount_rejected() {
        let store = InMemoryTransactionStore::new();
        let intake = IntakeService::new(Box::new(store.clone()));

        let result = intake.submit(attempt("hello", dec!(-5))).await;
        assert!(matches!(result, Err(FraudOpsError::Validation(_))));
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_defaults_applied_when_fields_missing() {
        let store = InMemoryTransactionStore::new();
        let intake = IntakeService::new(Box::new(store.clone()));

        let outcome = intake
            .submit(PaymentAttempt {
                customer: None,
                phone: None,
                recipient: "Local Coffee Shop".to_string(),
                amount: dec!(10),
                message: String::new(),
                session_id: None,
                device_fingerprint: None,
                behavior: None,
            })
            .await
            .unwrap();

        let txn = store.get(&outcome.txn_id).await.unwrap().unwrap();
        assert_eq!(txn.customer, "John Doe");
        assert_eq!(txn.phone, "+44 7700 900000");
    }
}
