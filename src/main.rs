use clap::Parser;
use fraudops::application::intake::IntakeService;
use fraudops::application::review::ReviewEngine;
use fraudops::domain::envelope::FrameEnvelope;
use fraudops::infrastructure::channel::FrameEndpoint;
use fraudops::infrastructure::fixtures::demo_transactions;
use fraudops::infrastructure::in_memory::{InMemoryActivityLog, InMemoryTransactionStore};
use fraudops::interfaces::http::{AppState, start_server};
use log::info;
use miette::{IntoDiagnostic, Result};
use std::sync::Arc;

const SHELL_ORIGIN: &str = "http://localhost:4200";
const REVIEW_ORIGIN: &str = "http://localhost:5173";
const CHANNEL_CAPACITY: usize = 64;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Start with an empty review queue instead of the demo fixtures
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let store = if cli.no_seed {
        InMemoryTransactionStore::new()
    } else {
        InMemoryTransactionStore::seeded(demo_transactions()).await
    };
    let activity = InMemoryActivityLog::new();

    let (shell, review) = FrameEndpoint::pair(SHELL_ORIGIN, REVIEW_ORIGIN, CHANNEL_CAPACITY);
    let shell = Arc::new(shell);
    let review = Arc::new(review);

    let intake = Arc::new(IntakeService::new(Box::new(store.clone())));
    let engine = Arc::new(ReviewEngine::new(
        Box::new(store.clone()),
        Box::new(activity.clone()),
        review,
    ));

    // Review frame: consume shell announcements.
    let consumer = engine.clone();
    tokio::spawn(async move { consumer.run().await });

    // Shell: drain the action confirmations coming back from the frame.
    let confirmations = shell.clone();
    tokio::spawn(async move {
        while let Some(envelope) = confirmations.recv().await {
            if let FrameEnvelope::FraudopsAction { message, .. } = envelope {
                info!("[shell] {message}");
            }
        }
    });

    let state = AppState {
        intake,
        engine,
        store: Arc::new(store),
        activity: Arc::new(activity),
        shell,
    };

    start_server(&cli.host, cli.port, state)
        .await
        .into_diagnostic()?;

    Ok(())
}
