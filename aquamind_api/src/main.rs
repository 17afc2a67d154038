use std::{net::SocketAddr, sync::Arc};

use aquamind_api::model::{self, Artifacts};
use aquamind_api::routes::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let dir = model::default_artifact_dir();
    let artifacts = Artifacts::load(&dir)?;
    tracing::info!(
        "loaded scaler and model from {}; columns: {:?}",
        dir.display(),
        model::FEATURE_COLUMNS
    );

    let state = AppState {
        artifacts: Arc::new(artifacts),
    };
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 5000));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
