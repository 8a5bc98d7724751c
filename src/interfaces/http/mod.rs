//! HTTP API for the payment demo and the review dashboard.
//!
//! Routes:
//! - `POST /api/payments/attempt`: screen a payment, escrow it when flagged
//! - `GET /api/transactions/flagged`: the review queue
//! - `GET /api/transactions/:id`: sandbox view fetch; announces the
//!   transaction to the review frame when it is sandboxed
//! - `POST /api/transactions/:id/action`: dispatch an operator action
//! - `GET /api/activity`: the newest activity entries

pub mod error;

use crate::application::intake::{IntakeOutcome, IntakeService, PaymentAttempt};
use crate::application::review::ReviewEngine;
use crate::domain::action::ReviewAction;
use crate::domain::activity::ActivityEntry;
use crate::domain::envelope::{EnvelopeMeta, FrameEnvelope};
use crate::domain::ports::{ActivityLog, TransactionStore};
use crate::domain::transaction::Transaction;
use crate::infrastructure::channel::{FrameEndpoint, READY_RETRY_ATTEMPTS, READY_RETRY_DELAY};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Origin name the shell stamps on its announcements.
pub const SHELL_SOURCE: &str = "sandbox_shell";

const DEFAULT_ACTIVITY_LIMIT: usize = 20;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub intake: Arc<IntakeService>,
    pub engine: Arc<ReviewEngine>,
    pub store: Arc<dyn TransactionStore>,
    pub activity: Arc<dyn ActivityLog>,
    pub shell: Arc<FrameEndpoint>,
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/payments/attempt", post(attempt_payment))
        .route("/api/transactions/flagged", get(flagged_transactions))
        .route("/api/transactions/:id", get(transaction_detail))
        .route("/api/transactions/:id/action", post(perform_action))
        .route("/api/activity", get(recent_activity))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn attempt_payment(
    State(state): State<AppState>,
    Json(attempt): Json<PaymentAttempt>,
) -> Result<Json<IntakeOutcome>, ApiError> {
    let outcome = state.intake.submit(attempt).await?;
    Ok(Json(outcome))
}

async fn flagged_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    Ok(Json(state.store.flagged().await?))
}

async fn transaction_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    let txn = state
        .store
        .get(&id)
        .await?
        .ok_or(ApiError::NotFound { resource: id })?;

    // The sandbox view has rendered; announce the transaction to the review
    // frame, waiting out frame readiness in the background.
    if txn.sandbox {
        let shell = state.shell.clone();
        let envelope = FrameEnvelope::NewFlaggedTxn {
            txn: txn.clone(),
            meta: EnvelopeMeta::from_source(SHELL_SOURCE),
        };
        let txn_id = txn.id.clone();
        tokio::spawn(async move {
            match shell
                .post_when_ready(&envelope, READY_RETRY_ATTEMPTS, READY_RETRY_DELAY)
                .await
            {
                Ok(()) => info!("[shell] announced {txn_id} to review frame"),
                Err(e) => warn!("[shell] could not announce {txn_id}: {e}"),
            }
        });
    }

    Ok(Json(txn))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub action: ReviewAction,
    pub details: Option<String>,
    pub refund_amount: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub ok: bool,
    pub txn: Transaction,
}

async fn perform_action(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let txn = state
        .engine
        .dispatch(&id, request.action, request.details, request.refund_amount)
        .await?;
    Ok(Json(ActionResponse { ok: true, txn }))
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<usize>,
}

async fn recent_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityEntry>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    Ok(Json(state.activity.recent(limit).await?))
}

/// Start the HTTP server.
pub async fn start_server(host: &str, port: u16, state: AppState) -> crate::error::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("[http] serving fraudops API on http://{addr}");
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
