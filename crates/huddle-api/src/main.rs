use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use huddle_api::config::{self, StoreKind};
use huddle_api::notify::TracingNotifier;
use huddle_api::state::AppState;
use huddle_storage::store::{DocumentStore, MemoryStore, S3DocumentStore};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = config::load()?;
    tracing::info!(
        environment = ?config.environment,
        store = ?config.store,
        bucket = %config.bucket,
        debug = config.debug_mode(),
        "starting"
    );

    let store: Arc<dyn DocumentStore> = match config.store {
        StoreKind::S3 => {
            let s3 = huddle_storage::client::build_client().await;
            Arc::new(S3DocumentStore::new(s3, config.bucket.clone()))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store, documents are lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(config, store, Arc::new(TracingNotifier));
    let app = huddle_api::app(state);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
