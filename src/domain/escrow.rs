use super::money::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EscrowAction {
    Hold,
    Release,
    Reject,
    PartialRefund,
}

/// One entry in the escrow audit trail. Entries are append-only and never
/// mutated or removed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EscrowEntry {
    pub action: EscrowAction,
    pub amount: Amount,
    pub timestamp: DateTime<Utc>,
    pub reason: String,
}

impl EscrowEntry {
    fn new(action: EscrowAction, amount: Amount, reason: impl Into<String>) -> Self {
        Self {
            action,
            amount,
            timestamp: Utc::now(),
            reason: reason.into(),
        }
    }
}

/// Per-transaction escrow ledger: funds held pending review, funds released,
/// and the ordered trail of everything that happened to them.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Escrow {
    pub held_amount: Amount,
    pub released_amount: Amount,
    pub holds: Vec<EscrowEntry>,
    pub disputes: Vec<String>,
}

impl Escrow {
    /// Opens a ledger holding `amount` with the initial hold entry.
    pub fn open(amount: Amount, reason: impl Into<String>) -> Self {
        Self {
            held_amount: amount,
            released_amount: Amount::ZERO,
            holds: vec![EscrowEntry::new(EscrowAction::Hold, amount, reason)],
            disputes: Vec::new(),
        }
    }

    /// Records an additional hold over `amount`. The held total is already
    /// covered by the initial hold, so only the trail grows.
    pub fn record_hold(&mut self, amount: Amount, reason: impl Into<String>) {
        self.holds
            .push(EscrowEntry::new(EscrowAction::Hold, amount, reason));
    }

    /// Moves the full held amount to released and records it.
    pub fn release_all(&mut self, reason: impl Into<String>) {
        let held = self.held_amount;
        self.held_amount = Amount::ZERO;
        self.released_amount = held;
        self.holds
            .push(EscrowEntry::new(EscrowAction::Release, held, reason));
    }

    /// Voids the held funds on rejection. The reject entry carries the
    /// original transaction amount, matching the dashboard's trail.
    pub fn void_held(&mut self, txn_amount: Amount, reason: impl Into<String>) {
        self.held_amount = Amount::ZERO;
        self.holds
            .push(EscrowEntry::new(EscrowAction::Reject, txn_amount, reason));
    }

    /// Records a partial refund of `amount`.
    ///
    /// The held/released totals are intentionally left untouched, so after a
    /// partial refund `held_amount + released_amount` no longer equals the
    /// original amount. Known accounting discrepancy, kept pending a
    /// stakeholder decision (see DESIGN.md).
    pub fn partial_refund(&mut self, amount: Amount, reason: impl Into<String>) {
        self.holds
            .push(EscrowEntry::new(EscrowAction::PartialRefund, amount, reason));
    }

    /// Appends a dispute note.
    pub fn raise_dispute(&mut self, note: impl Into<String>) {
        self.disputes.push(note.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amount(v: rust_decimal::Decimal) -> Amount {
        Amount::new(v).unwrap()
    }

    #[test]
    fn test_open_holds_full_amount() {
        let escrow = Escrow::open(amount(dec!(2500)), "Initial fraud flag");
        assert_eq!(escrow.held_amount, amount(dec!(2500)));
        assert_eq!(escrow.released_amount, Amount::ZERO);
        assert_eq!(escrow.holds.len(), 1);
        assert_eq!(escrow.holds[0].action, EscrowAction::Hold);
        assert_eq!(escrow.holds[0].reason, "Initial fraud flag");
        assert!(escrow.disputes.is_empty());
    }

    #[test]
    fn test_release_all_moves_held_to_released() {
        let mut escrow = Escrow::open(amount(dec!(850)), "Initial fraud flag");
        escrow.release_all("Approved by operator");

        assert_eq!(escrow.held_amount, Amount::ZERO);
        assert_eq!(escrow.released_amount, amount(dec!(850)));
        let entry = escrow.holds.last().unwrap();
        assert_eq!(entry.action, EscrowAction::Release);
        assert_eq!(entry.amount, amount(dec!(850)));
    }

    #[test]
    fn test_void_held_zeroes_without_releasing() {
        let mut escrow = Escrow::open(amount(dec!(850)), "Initial fraud flag");
        escrow.void_held(amount(dec!(850)), "Confirmed fraud");

        assert_eq!(escrow.held_amount, Amount::ZERO);
        assert_eq!(escrow.released_amount, Amount::ZERO);
        assert_eq!(escrow.holds.last().unwrap().action, EscrowAction::Reject);
        assert_eq!(escrow.holds.last().unwrap().reason, "Confirmed fraud");
    }

    #[test]
    fn test_partial_refund_leaves_totals_untouched() {
        let mut escrow = Escrow::open(amount(dec!(2500)), "Initial fraud flag");
        escrow.partial_refund(amount(dec!(1250)), "50% partial refund");

        // Documented discrepancy: the trail grows but the totals do not move.
        assert_eq!(escrow.held_amount, amount(dec!(2500)));
        assert_eq!(escrow.released_amount, Amount::ZERO);
        let entry = escrow.holds.last().unwrap();
        assert_eq!(entry.action, EscrowAction::PartialRefund);
        assert_eq!(entry.amount, amount(dec!(1250)));
    }

    #[test]
    fn test_raise_dispute_appends_note() {
        let mut escrow = Escrow::open(amount(dec!(850)), "Initial fraud flag");
        escrow.raise_dispute("Customer dispute filed");
        escrow.raise_dispute("Second note");
        assert_eq!(
            escrow.disputes,
            vec!["Customer dispute filed", "Second note"]
        );
    }

    #[test]
    fn test_entry_wire_format() {
        let escrow = Escrow::open(amount(dec!(850)), "Initial fraud flag");
        let value = serde_json::to_value(&escrow).unwrap();
        assert!(value.get("heldAmount").is_some());
        assert!(value.get("releasedAmount").is_some());
        assert_eq!(value["holds"][0]["action"], "HOLD");
    }
}
