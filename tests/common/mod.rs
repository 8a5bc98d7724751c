use axum::Router;
use fraudops::application::intake::IntakeService;
use fraudops::application::review::ReviewEngine;
use fraudops::infrastructure::channel::FrameEndpoint;
use fraudops::infrastructure::fixtures::demo_transactions;
use fraudops::infrastructure::in_memory::{InMemoryActivityLog, InMemoryTransactionStore};
use fraudops::interfaces::http::{AppState, create_router};
use std::sync::Arc;

/// Fully wired application with handles on every seam, so tests can drive
/// the router and observe the stores and both channel endpoints directly.
pub struct TestApp {
    pub router: Router,
    pub store: InMemoryTransactionStore,
    pub activity: InMemoryActivityLog,
    pub engine: Arc<ReviewEngine>,
    pub shell: Arc<FrameEndpoint>,
    pub review: Arc<FrameEndpoint>,
}

pub async fn spawn_app(seeded: bool) -> TestApp {
    let store = if seeded {
        InMemoryTransactionStore::seeded(demo_transactions()).await
    } else {
        InMemoryTransactionStore::new()
    };
    let activity = InMemoryActivityLog::new();

    let (shell, review) = FrameEndpoint::pair("http://localhost:4200", "http://localhost:5173", 16);
    let shell = Arc::new(shell);
    let review = Arc::new(review);

    let intake = Arc::new(IntakeService::new(Box::new(store.clone())));
    let engine = Arc::new(ReviewEngine::new(
        Box::new(store.clone()),
        Box::new(activity.clone()),
        review.clone(),
    ));

    let state = AppState {
        intake,
        engine: engine.clone(),
        store: Arc::new(store.clone()),
        activity: Arc::new(activity.clone()),
        shell: shell.clone(),
    };

    TestApp {
        router: create_router(state),
        store,
        activity,
        engine,
        shell,
        review,
    }
}
