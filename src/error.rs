use thiserror::Error;

pub type Result<T> = std::result::Result<T, FraudOpsError>;

#[derive(Error, Debug)]
pub enum FraudOpsError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("action {action} is not allowed while status is {status}")]
    InvalidTransition { status: String, action: String },
    #[error("transaction {0} has no escrow ledger")]
    EscrowMissing(String),
    #[error("frame channel closed")]
    ChannelClosed,
    #[error("frame channel full")]
    ChannelFull,
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
