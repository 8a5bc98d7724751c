use crate::domain::action::ReviewAction;
use crate::domain::activity::{ActivityEntry, KIND_NEW_TXN};
use crate::domain::envelope::FrameEnvelope;
use crate::domain::escrow::Escrow;
use crate::domain::money::Amount;
use crate::domain::ports::{ActivityLogBox, TransactionStoreBox};
use crate::domain::transaction::Transaction;
use crate::error::{FraudOpsError, Result};
use crate::infrastructure::channel::FrameEndpoint;
use log::{info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

/// The fraud-operations review engine: owns the transaction list and the
/// activity feed, dispatches operator actions through the transition table,
/// and bridges the frame channel in both directions.
pub struct ReviewEngine {
    store: TransactionStoreBox,
    activity: ActivityLogBox,
    endpoint: Arc<FrameEndpoint>,
}

impl ReviewEngine {
    pub fn new(
        store: TransactionStoreBox,
        activity: ActivityLogBox,
        endpoint: Arc<FrameEndpoint>,
    ) -> Self {
        Self {
            store,
            activity,
            endpoint,
        }
    }

    /// Applies an operator action to a transaction.
    ///
    /// The transition table is consulted before anything is touched; a
    /// disallowed `(status, action)` pair leaves the transaction, the escrow
    /// trail, and the activity feed exactly as they were. On success exactly
    /// one activity entry is prepended and a `FRAUDOPS_ACTION` envelope is
    /// posted to the shell (fire-and-forget, as the dashboard posts it).
    pub async fn dispatch(
        &self,
        txn_id: &str,
        action: ReviewAction,
        details: Option<String>,
        refund_amount: Option<Decimal>,
    ) -> Result<Transaction> {
        let mut txn = self
            .store
            .get(txn_id)
            .await?
            .ok_or_else(|| FraudOpsError::TransactionNotFound(txn_id.to_string()))?;

        let next_status = action.next_status(txn.status)?;
        self.apply_escrow_effect(&mut txn, action, details.as_deref(), refund_amount)?;
        txn.status = next_status;
        self.store.update(txn.clone()).await?;

        let entry = ActivityEntry::new(
            action.to_string(),
            txn_id,
            format!("{action} executed on {txn_id} by operator"),
            details,
        );
        self.activity.record(entry.clone()).await?;

        let message = format!("Transaction {txn_id}: {action} - {}", txn.status);
        info!("[review] {message}");

        let envelope = FrameEnvelope::FraudopsAction {
            action,
            txn: txn.clone(),
            entry,
            message,
        };
        if let Err(e) = self.endpoint.post(&envelope) {
            // Confirmations are best-effort: no acknowledgement, no retry.
            warn!("[review] dropped action confirmation for {txn_id}: {e}");
        }

        Ok(txn)
    }

    fn apply_escrow_effect(
        &self,
        txn: &mut Transaction,
        action: ReviewAction,
        details: Option<&str>,
        refund_amount: Option<Decimal>,
    ) -> Result<()> {
        let txn_amount = txn.amount;
        let reason = |default: &str| details.unwrap_or(default).to_string();

        match action {
            ReviewAction::Approve => {
                if let Some(escrow) = txn.escrow_mut() {
                    escrow.release_all("Approved by operator");
                }
            }
            ReviewAction::Reject => {
                if let Some(escrow) = txn.escrow_mut() {
                    escrow.void_held(txn_amount, reason("Rejected by operator"));
                }
            }
            ReviewAction::Escalate | ReviewAction::CallCustomer => {}
            ReviewAction::HoldEscrow => {
                let reason = reason("Additional hold");
                self.escrow_of(txn)?.record_hold(txn_amount, reason);
            }
            ReviewAction::ReleaseEscrow => {
                let reason = reason("Released by operator");
                self.escrow_of(txn)?.release_all(reason);
            }
            ReviewAction::PartialRefund => {
                let amount = match refund_amount {
                    Some(value) => Amount::new(value)?,
                    None => txn_amount.half(),
                };
                let reason = reason("Partial refund issued");
                self.escrow_of(txn)?.partial_refund(amount, reason);
            }
            ReviewAction::RaiseDispute => {
                let note = reason("Dispute raised by operator");
                self.escrow_of(txn)?.raise_dispute(note);
            }
        }
        Ok(())
    }

    fn escrow_of<'a>(&self, txn: &'a mut Transaction) -> Result<&'a mut Escrow> {
        let id = txn.id.clone();
        txn.escrow_mut().ok_or(FraudOpsError::EscrowMissing(id))
    }

    /// Admits a transaction announced by the shell. Duplicate ids are
    /// ignored; a fresh one goes to the front of the list with a `NEW_TXN`
    /// feed entry.
    pub async fn admit(&self, txn: Transaction) -> Result<bool> {
        if self.store.exists(&txn.id).await? {
            info!("[review] transaction {} already listed, ignoring", txn.id);
            return Ok(false);
        }

        let entry = ActivityEntry::new(
            KIND_NEW_TXN,
            &txn.id,
            format!(
                "New flagged transaction from {} - £{}",
                txn.customer, txn.amount
            ),
            None,
        );
        self.store.insert(txn).await?;
        self.activity.record(entry).await?;
        Ok(true)
    }

    /// Consumes envelopes from the shell until the channel closes.
    pub async fn run(&self) {
        while let Some(envelope) = self.endpoint.recv().await {
            match envelope {
                FrameEnvelope::NewFlaggedTxn { txn, meta } => {
                    info!(
                        "[review] NEW_FLAGGED_TXN {} from {}",
                        txn.id, meta.source
                    );
                    if let Err(e) = self.admit(txn).await {
                        warn!("[review] failed to admit transaction: {e}");
                    }
                }
                other => {
                    warn!(
                        "[review] ignoring unexpected envelope {}",
                        other.type_name()
                    );
                }
            }
        }
    }
}
