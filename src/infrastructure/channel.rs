use crate::domain::envelope::FrameEnvelope;
use crate::error::{FraudOpsError, Result};
use log::{debug, warn};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::sync::mpsc;

/// Delay between readiness retries, matching the original 1-second poll.
pub const READY_RETRY_DELAY: Duration = Duration::from_secs(1);
/// Retry cap so a dead peer cannot hold a task forever.
pub const READY_RETRY_ATTEMPTS: u32 = 10;

/// Raw message as it crosses the frame boundary: the sender's origin plus an
/// untrusted JSON payload. Validation happens on the receiving side.
#[derive(Debug, Clone)]
struct FrameMessage {
    origin: String,
    payload: Value,
}

/// One side of the shell <-> review frame bridge.
///
/// The bridge is an explicit capability rather than a broadcast: an endpoint
/// can only reach the peer it was paired with, stamps every message with its
/// own origin, and only accepts inbound messages whose origin matches the
/// configured peer. Payloads are deserialized into [`FrameEnvelope`] at the
/// boundary; anything malformed never reaches the application.
pub struct FrameEndpoint {
    origin: String,
    peer_origin: String,
    tx: mpsc::Sender<FrameMessage>,
    rx: Mutex<mpsc::Receiver<FrameMessage>>,
}

impl FrameEndpoint {
    fn new(
        origin: String,
        peer_origin: String,
        tx: mpsc::Sender<FrameMessage>,
        rx: mpsc::Receiver<FrameMessage>,
    ) -> Self {
        Self {
            origin,
            peer_origin,
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Builds a connected pair of endpoints with bounded queues in both
    /// directions.
    pub fn pair(
        shell_origin: &str,
        review_origin: &str,
        capacity: usize,
    ) -> (FrameEndpoint, FrameEndpoint) {
        let (to_review_tx, to_review_rx) = mpsc::channel(capacity);
        let (to_shell_tx, to_shell_rx) = mpsc::channel(capacity);

        let shell = FrameEndpoint::new(
            shell_origin.to_string(),
            review_origin.to_string(),
            to_review_tx,
            to_shell_rx,
        );
        let review = FrameEndpoint::new(
            review_origin.to_string(),
            shell_origin.to_string(),
            to_shell_tx,
            to_review_rx,
        );
        (shell, review)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Posts an envelope to the peer without waiting. A full queue or a gone
    /// peer surfaces as a typed error; the caller decides whether to drop or
    /// retry.
    pub fn post(&self, envelope: &FrameEnvelope) -> Result<()> {
        let message = FrameMessage {
            origin: self.origin.clone(),
            payload: serde_json::to_value(envelope)?,
        };
        debug!(
            "[channel] {} -> {}: {}",
            self.origin,
            self.peer_origin,
            envelope.type_name()
        );
        self.tx.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => FraudOpsError::ChannelFull,
            mpsc::error::TrySendError::Closed(_) => FraudOpsError::ChannelClosed,
        })
    }

    /// Posts an envelope, retrying on a full queue with a fixed delay until
    /// the peer drains it or `attempts` runs out. This is the frame-readiness
    /// handshake: the peer may not be consuming yet when the shell first
    /// announces a transaction.
    pub async fn post_when_ready(
        &self,
        envelope: &FrameEnvelope,
        attempts: u32,
        delay: Duration,
    ) -> Result<()> {
        let mut remaining = attempts;
        loop {
            match self.post(envelope) {
                Err(FraudOpsError::ChannelFull) if remaining > 1 => {
                    remaining -= 1;
                    debug!(
                        "[channel] peer {} not ready, retrying ({remaining} attempts left)",
                        self.peer_origin
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }

    /// Receives the next valid envelope from the peer, or `None` once the
    /// peer is gone. Messages from an unexpected origin and payloads that do
    /// not parse as a known envelope are logged and skipped; they are never
    /// delivered.
    pub async fn recv(&self) -> Option<FrameEnvelope> {
        let mut rx = self.rx.lock().await;
        while let Some(message) = rx.recv().await {
            if message.origin != self.peer_origin {
                warn!(
                    "[channel] {} dropped message from unexpected origin {}",
                    self.origin, message.origin
                );
                continue;
            }
            match serde_json::from_value::<FrameEnvelope>(message.payload) {
                Ok(envelope) => return Some(envelope),
                Err(e) => {
                    warn!("[channel] {} dropped malformed message: {e}", self.origin);
                }
            }
        }
        None
    }
}
