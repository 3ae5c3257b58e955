use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // DASHBOARD PAGES
        // ========================================
        .route("/api/dashboard/pages", get(handlers::dashboard::list_pages))
        .route("/api/dashboard/pages/:page", get(handlers::dashboard::get_page))
        .route("/api/dashboard/render", post(handlers::dashboard::render_page))
        // ========================================
        // ARTIFACTS
        // ========================================
        .route("/api/artifacts", get(handlers::artifacts::get_status))
        .route("/api/artifacts/reload", post(handlers::artifacts::reload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn call(method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = configure_routes()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn test_list_pages() {
        let (status, body) = call(Method::GET, "/api/dashboard/pages", None).await;
        assert_eq!(status, StatusCode::OK);

        let pages: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(pages.as_array().map(Vec::len), Some(6));
        assert_eq!(pages[0]["id"], "overview");
    }

    #[tokio::test]
    async fn test_unknown_page_is_not_found() {
        let (status, _) = call(Method::GET, "/api/dashboard/pages/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_render_with_partial_params() {
        let (status, body) = call(
            Method::POST,
            "/api/dashboard/render",
            Some(r#"{"page":"association_rules","params":{"association_rules":{"min_lift":2.0}}}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let view: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(view["page"], "association_rules");
        assert!(!view["sections"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_render_body_is_rejected() {
        let (status, _) = call(Method::POST, "/api/dashboard/render", Some(r#"{"page":"nope"}"#)).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_artifact_status_lists_every_dataset() {
        let (status, body) = call(Method::GET, "/api/artifacts", None).await;
        assert_eq!(status, StatusCode::OK);

        let status_body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(status_body["artifacts"].as_array().map(Vec::len), Some(7));
    }

    #[tokio::test]
    async fn test_reload_returns_fresh_status() {
        let (status, body) = call(Method::POST, "/api/artifacts/reload", None).await;
        assert_eq!(status, StatusCode::OK);

        let status_body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(status_body["artifacts"].as_array().map(Vec::len), Some(7));
    }
}
