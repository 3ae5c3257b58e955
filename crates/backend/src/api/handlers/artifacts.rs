use axum::Json;
use contracts::shared::artifacts::ArtifactStatusResponse;

use crate::shared::data::artifacts::get_artifacts;

/// GET /api/artifacts
pub async fn get_status() -> Json<ArtifactStatusResponse> {
    Json(get_artifacts().snapshot().status())
}

/// POST /api/artifacts/reload
pub async fn reload() -> Json<ArtifactStatusResponse> {
    let cache = get_artifacts();
    let status = cache.reload().status();
    let available = status.artifacts.iter().filter(|a| a.available).count();
    tracing::info!(
        "Artifacts reloaded from {}: {} of {} available",
        cache.root().display(),
        available,
        status.artifacts.len()
    );
    Json(status)
}
