use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;
use std::time::Duration;

use crate::shared::format::format_number;

/// One console line per request: time, duration, body size, status, method, path.
/// Successful responses get a cyan timestamp, everything else yellow.
fn print_line(status: StatusCode, method: &Method, path: &str, elapsed: Duration, size: &str) {
    let color_code = if status.is_success() { "36" } else { "33" };

    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color_code,
        Local::now().format("%H:%M:%S"),
        elapsed.as_millis(),
        size,
        status.as_u16(),
        method,
        path
    );
}

/// Logs every HTTP request after the response is produced.
///
/// The body is buffered to report its real size; page views are small
/// JSON documents, static assets are served as is.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            print_line(parts.status, &method, &path, start.elapsed(), &format_number(bytes.len()));
            tracing::debug!("{} {} -> {} ({} bytes)", method, path, parts.status, bytes.len());
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            print_line(parts.status, &method, &path, start.elapsed(), "error");
            tracing::warn!("{} {}: cannot buffer response body: {}", method, path, e);
            Response::from_parts(parts, Body::default())
        }
    }
}
